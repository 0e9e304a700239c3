//! Plugin package installation
//!
//! Orchestrates a resolution run: classify the archive's entries, run the
//! pure selector, extract the winning managed group flat into the output
//! directory and persist the manifest. Several packages (the plugin plus
//! its dependency packages) may be installed through one installer into
//! the same directory; only the primary package's winning files end up in
//! the manifest.
//!
//! A run is synchronous. Two runs into *different* directories share no
//! state and may proceed concurrently; runs targeting the same directory
//! must be serialized by the caller, since extracted files and the
//! manifest are overwritten in place. An aborted run leaves a partially
//! overwritten directory and no manifest update; the next successful run
//! repairs it.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::archive::{classify, PackageArchive};
use crate::domain::{InstallContext, InstallReport, InstalledAssembly, PackageIdentity, RuntimeAssembly, TargetSpec};
use crate::error::Result;
use crate::manifest;
use crate::runtime::{RidChain, RuntimeGraph};
use crate::selector::select;

/// Installs plugin packages into one output directory
pub struct PluginInstaller {
    root: PathBuf,
    primary: PackageIdentity,
    target: TargetSpec,
    chain: RidChain,
    download_only: bool,
    installed: Vec<InstalledAssembly>,
    runtime_assemblies: Vec<RuntimeAssembly>,
    installed_packages: Vec<String>,
    plugin_files: Vec<String>,
}

impl PluginInstaller {
    /// Create an installer for `root`, resolving the RID fallback chain
    /// up front
    ///
    /// # Errors
    ///
    /// Fails when the output directory cannot be created.
    pub fn new(
        root: impl Into<PathBuf>,
        primary: PackageIdentity,
        target: TargetSpec,
        graph: &RuntimeGraph,
    ) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let chain = match target.rid.as_deref() {
            Some(rid) => graph.expand(rid),
            None => RidChain::empty(),
        };

        Ok(Self {
            root,
            primary,
            target,
            chain,
            download_only: false,
            installed: Vec::new(),
            runtime_assemblies: Vec::new(),
            installed_packages: Vec::new(),
            plugin_files: Vec::new(),
        })
    }

    /// Extract archives verbatim under per-package subdirectories instead
    /// of running asset selection
    pub fn download_only(mut self, enabled: bool) -> Self {
        self.download_only = enabled;
        self
    }

    /// Install one package's archive
    ///
    /// Callable once per package contributing to this output directory;
    /// the primary package's winning file names are collected for the
    /// manifest.
    ///
    /// # Errors
    ///
    /// Propagates archive read and file write failures. An archive with no
    /// matching assets is not an error; it simply contributes nothing.
    pub fn install(
        &mut self,
        identity: &PackageIdentity,
        archive: &mut dyn PackageArchive,
    ) -> Result<()> {
        let paths = archive.entry_paths()?;

        if self.download_only {
            return self.extract_verbatim(identity, archive, &paths);
        }

        let entries: Vec<_> = paths.iter().filter_map(|path| classify(path)).collect();
        debug!(
            package = %identity,
            entries = paths.len(),
            assets = entries.len(),
            "classified archive entries"
        );

        let selection = select(&entries, &self.target, &self.chain);

        for asset in &selection.winning_managed {
            let dest = self.root.join(&asset.file_name);
            archive.extract_entry(&asset.full_path, &dest)?;

            if *identity == self.primary && !self.plugin_files.contains(&asset.file_name) {
                self.plugin_files.push(asset.file_name.clone());
            }

            self.installed.push(InstalledAssembly {
                package_id: identity.name.clone(),
                file_name: asset.file_name.clone(),
                relative_path: format!("{}/{}", identity.label(), asset.full_path),
                full_path: dest.display().to_string(),
                framework_name: asset.framework.framework_name(),
                framework_short_name: asset.framework.short_folder_name(),
                framework_version: asset.framework.version.to_string(),
            });
        }

        for runtime in &selection.runtime {
            self.runtime_assemblies.push(RuntimeAssembly {
                package_id: identity.name.clone(),
                file_name: runtime.file_name.clone(),
                relative_path: format!("{}/{}", identity.label(), runtime.full_path),
                full_path: self
                    .root
                    .join(identity.label())
                    .join(&runtime.full_path)
                    .display()
                    .to_string(),
                rid: runtime.rid.clone(),
                framework_short_name: runtime
                    .framework
                    .as_ref()
                    .map(crate::framework::FrameworkMoniker::short_folder_name),
                is_native: runtime.is_native,
                is_supported: runtime.is_supported,
                is_recommended: runtime.is_recommended,
            });
        }

        self.installed_packages.push(identity.label());

        info!(
            package = %identity,
            winning = selection.winning_managed.len(),
            runtime = selection.runtime.len(),
            "installed package assets"
        );

        Ok(())
    }

    fn extract_verbatim(
        &mut self,
        identity: &PackageIdentity,
        archive: &mut dyn PackageArchive,
        paths: &[String],
    ) -> Result<()> {
        let package_dir = self.root.join(identity.label());
        for path in paths {
            if path.ends_with('/') {
                continue;
            }
            let Some(relative) = sanitize_entry_path(path) else {
                debug!(entry = path.as_str(), "skipped archive entry with unsafe path");
                continue;
            };
            archive.extract_entry(path, &package_dir.join(relative))?;
        }
        info!(package = %identity, files = paths.len(), "downloaded package");
        Ok(())
    }

    /// Finish the run: persist the manifest and build the report
    ///
    /// The manifest is written only after every winning file has been
    /// extracted, so a reader never observes a manifest referencing
    /// files that are not on disk yet.
    ///
    /// # Errors
    ///
    /// Fails when the manifest cannot be written or, in download-only
    /// mode, when the package directory cannot be listed.
    pub fn finish(self) -> Result<InstallReport> {
        let package_files = if self.download_only {
            list_files_recursive(&self.root.join(self.primary.label()))?
        } else {
            manifest::write(&self.root, &self.plugin_files)?;
            self.plugin_files
        };

        let context = InstallContext {
            target_framework: self.target.framework.framework_name(),
            target_framework_short_name: self.target.framework.short_folder_name(),
            target_version: self.target.framework.version.to_string(),
            rid: self.target.rid.clone(),
            supported_rids: self.chain.to_vec(),
            folder: self.root.display().to_string(),
            package_name: self.primary.name.clone(),
            package_version: self.primary.version.clone(),
        };

        Ok(InstallReport {
            context,
            installed: self.installed,
            runtime_assemblies: self.runtime_assemblies,
            installed_packages: self.installed_packages,
            package_files,
        })
    }
}

/// Install a single package archive in one call
///
/// Convenience wrapper for the common case of a plugin with no dependency
/// packages.
///
/// # Errors
///
/// Propagates any failure from [`PluginInstaller`].
pub fn install_package(
    root: impl Into<PathBuf>,
    identity: PackageIdentity,
    target: TargetSpec,
    graph: &RuntimeGraph,
    archive: &mut dyn PackageArchive,
) -> Result<InstallReport> {
    let mut installer = PluginInstaller::new(root, identity.clone(), target, graph)?;
    installer.install(&identity, archive)?;
    installer.finish()
}

/// Read back the assembly file list persisted by an earlier run
///
/// # Errors
///
/// Returns [`crate::NupkgAssetError::ManifestMissing`] when the directory
/// has never had a successful install.
pub fn plugin_assembly_files(root: &Path) -> Result<Vec<String>> {
    manifest::read(root)
}

/// Normalize an archive entry path for extraction under a directory
///
/// Entries with absolute paths or parent-directory components would escape
/// the destination directory; they are rejected rather than extracted.
fn sanitize_entry_path(entry: &str) -> Option<PathBuf> {
    let mut safe = PathBuf::new();
    for component in Path::new(entry).components() {
        match component {
            Component::Normal(part) => safe.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if safe.as_os_str().is_empty() {
        None
    } else {
        Some(safe)
    }
}

fn list_files_recursive(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    if !dir.exists() {
        return Ok(files);
    }
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| crate::error::NupkgAssetError::IoError {
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.path().display().to_string());
        }
    }
    files.sort();
    Ok(files)
}
