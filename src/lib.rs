//! nupkg-assets - target-platform asset resolution for plugin packages
//!
//! A plugin package archive may ship several builds of the same library:
//! one managed build per framework folder and native or platform-specific
//! binaries per runtime identifier (RID). This crate decides, for one
//! already-downloaded archive and one target platform, which files apply:
//! it picks exactly one best-matching managed framework group, annotates
//! every runtime-specific binary with supported/recommended flags, extracts
//! the winners flat into an output directory and persists a re-loadable
//! manifest of the primary package's assemblies.
//!
//! Out of scope by design: package download, feeds and credentials,
//! dependency resolution and version-range search. Those collaborators
//! hand this crate an open archive and a target spec.
//!
//! ```no_run
//! use nupkg_assets::{
//!     install_package, PackageIdentity, RuntimeGraph, TargetSpec, ZipPackageArchive,
//! };
//!
//! # fn main() -> nupkg_assets::Result<()> {
//! let mut archive = ZipPackageArchive::open(std::path::Path::new("MyPlugin.1.0.0.nupkg"))?;
//! let target = TargetSpec::parse("net6.0")?.with_rid(nupkg_assets::runtime::host_rid());
//! let graph = RuntimeGraph::from_json(&std::fs::read_to_string("runtime.json")?)?;
//!
//! let report = install_package(
//!     "plugins/MyPlugin",
//!     PackageIdentity::new("MyPlugin", "1.0.0"),
//!     target,
//!     &graph,
//!     &mut archive,
//! )?;
//! println!("installed {} assemblies", report.installed.len());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod domain;
pub mod error;
pub mod framework;
pub mod installer;
pub mod manifest;
pub mod runtime;
pub mod selector;

pub use archive::{classify, AssetEntry, MemoryArchive, PackageArchive, RuntimeAssetKind, ZipPackageArchive};
pub use domain::{
    InstallContext, InstallReport, InstalledAssembly, PackageIdentity, RuntimeAssembly, TargetSpec,
};
pub use error::{NupkgAssetError, Result};
pub use framework::{FrameworkMoniker, FrameworkVersion};
pub use installer::{install_package, plugin_assembly_files, PluginInstaller};
pub use runtime::{RidChain, RuntimeGraph};
pub use selector::{select, Selection};
