//! Domain models for nupkg-assets
//!
//! Pure types representing the entities a resolution run works over:
//! the package being installed, the platform it targets and the report
//! the run produces. These types carry no I/O.

pub mod package;
pub mod report;
pub mod target;

pub use package::PackageIdentity;
pub use report::{InstallContext, InstallReport, InstalledAssembly, RuntimeAssembly};
pub use target::TargetSpec;
