//! Resolution run report types
//!
//! Mirrors what a host needs to load the plugin afterwards: which managed
//! assemblies were installed, which runtime-specific binaries exist and
//! which of those are usable or recommended on the target platform.

use serde::Serialize;

/// One managed assembly extracted from a winning framework group
///
/// Created once per winning archive entry; never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct InstalledAssembly {
    /// Name of the package the assembly came from
    pub package_id: String,
    /// Bare file name, also the name under the output directory
    pub file_name: String,
    /// Archive-relative path prefixed with the package label
    pub relative_path: String,
    /// Path the file was extracted to, directly under the output root
    pub full_path: String,
    /// Full framework name of the winning group (`.NETCoreApp,Version=v6.0`)
    pub framework_name: String,
    /// Short folder spelling of the winning group (`net6.0`)
    pub framework_short_name: String,
    /// Version component of the winning framework
    pub framework_version: String,
}

/// One runtime-specific binary found under the runtimes root
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeAssembly {
    pub package_id: String,
    pub file_name: String,
    /// Archive-relative path prefixed with the package label
    pub relative_path: String,
    /// Location of the entry in the package's own layout under the output
    /// root. Runtime binaries are reported, not extracted, during
    /// selection; this path exists on disk only after a download-only run.
    pub full_path: String,
    /// RID folder the binary was found under
    pub rid: String,
    /// Framework of a managed runtime binary; `None` for native ones
    pub framework_short_name: Option<String>,
    pub is_native: bool,
    /// Usable on the target platform (RID on the fallback chain, and for
    /// managed binaries a compatible framework)
    pub is_supported: bool,
    /// Best-ranked usable binary of its file-name group; at most one per
    /// group
    pub is_recommended: bool,
}

/// Summary of the platform and package a report was produced for
#[derive(Debug, Clone, Serialize)]
pub struct InstallContext {
    pub target_framework: String,
    pub target_framework_short_name: String,
    pub target_version: String,
    pub rid: Option<String>,
    /// Full fallback chain of the target RID, most specific first
    pub supported_rids: Vec<String>,
    pub folder: String,
    pub package_name: String,
    pub package_version: String,
}

/// Result of one resolution run
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub context: InstallContext,
    /// Winning managed assemblies across all installed packages
    pub installed: Vec<InstalledAssembly>,
    /// Every runtime-specific binary seen, annotated with support flags
    pub runtime_assemblies: Vec<RuntimeAssembly>,
    /// Labels of all packages that went through this run
    pub installed_packages: Vec<String>,
    /// File names belonging to the primary package (the manifest content),
    /// or every extracted file path in download-only mode
    pub package_files: Vec<String>,
}

impl InstallReport {
    /// Packages that contributed at least one winning managed assembly
    pub fn contributing_packages(&self) -> Vec<&str> {
        let mut packages: Vec<&str> = Vec::new();
        for assembly in &self.installed {
            if !packages.contains(&assembly.package_id.as_str()) {
                packages.push(&assembly.package_id);
            }
        }
        packages
    }

    /// Runtime binaries usable on the target platform
    pub fn supported_runtime_assemblies(&self) -> impl Iterator<Item = &RuntimeAssembly> {
        self.runtime_assemblies.iter().filter(|r| r.is_supported)
    }
}
