//! Framework monikers and compatibility matching
//!
//! A framework moniker identifies a managed platform family plus a version,
//! parsed from archive folder names (`net6.0`, `netcoreapp3.1`,
//! `netstandard2.0`, `net472`) or from a full framework name such as
//! `.NETCoreApp,Version=v6.0`. Monikers drive the selection of the single
//! managed build of a package that best fits a target platform.

pub mod compat;

pub use compat::{is_compatible, reduce_nearest};

use crate::error::{NupkgAssetError, Result};

/// Identifier of the modern cross-platform runtime family
pub const NET_CORE_APP: &str = ".NETCoreApp";

/// Identifier of the classic Windows-only runtime family
pub const NET_FRAMEWORK: &str = ".NETFramework";

/// Identifier of the portable API-surface family
pub const NET_STANDARD: &str = ".NETStandard";

/// Ordered framework version tuple
///
/// Comparison is lexicographic over (major, minor, build, revision), which
/// matches how folder versions like `4.7.2` and `6.0` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameworkVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl FrameworkVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: 0,
            revision: 0,
        }
    }

    pub fn with_build(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision: 0,
        }
    }

    /// A zero major version marks an unversioned catch-all folder; such
    /// candidates are never selected as a managed-library winner.
    pub fn is_zero(&self) -> bool {
        self.major == 0
    }
}

impl std::fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.build > 0 || self.revision > 0 {
            write!(f, ".{}", self.build)?;
        }
        if self.revision > 0 {
            write!(f, ".{}", self.revision)?;
        }
        Ok(())
    }
}

/// A parsed framework moniker: platform family, version and optional
/// platform suffix (e.g. the `windows` in `net6.0-windows`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameworkMoniker {
    pub identifier: String,
    pub version: FrameworkVersion,
    pub platform: Option<String>,
}

impl FrameworkMoniker {
    pub fn new(identifier: impl Into<String>, version: FrameworkVersion) -> Self {
        Self {
            identifier: identifier.into(),
            version,
            platform: None,
        }
    }

    /// Parse a short folder name as found in archive paths
    ///
    /// Returns `None` for folders that are not framework monikers (e.g.
    /// `native`, `any`, `contentFiles`); classification treats that as
    /// "not an asset", never as an error.
    pub fn parse_folder(folder: &str) -> Option<Self> {
        let lower = folder.trim().to_ascii_lowercase();
        if lower.is_empty() {
            return None;
        }

        if let Some(rest) = lower.strip_prefix("netstandard") {
            let version = parse_dotted_version(rest)?;
            return Some(Self::new(NET_STANDARD, version));
        }

        if let Some(rest) = lower.strip_prefix("netcoreapp") {
            let version = parse_dotted_version(rest)?;
            return Some(Self::new(NET_CORE_APP, version));
        }

        let rest = lower.strip_prefix("net")?;
        if rest.is_empty() {
            return None;
        }

        if rest.contains('.') {
            // net5.0 and later; may carry a platform suffix like -windows
            let (version_part, platform) = match rest.split_once('-') {
                Some((v, p)) if !p.is_empty() => (v, Some(p.to_string())),
                Some((v, _)) => (v, None),
                None => (rest, None),
            };
            let version = parse_dotted_version(version_part)?;
            if version.major < 5 {
                return None;
            }
            return Some(Self {
                identifier: NET_CORE_APP.to_string(),
                version,
                platform,
            });
        }

        // Digit-packed classic versions: net472 -> 4.7.2, net48 -> 4.8
        if !rest.bytes().all(|b| b.is_ascii_digit()) || rest.len() > 3 {
            return None;
        }
        let mut digits = rest.bytes().map(|b| u32::from(b - b'0'));
        let major = digits.next()?;
        let minor = digits.next().unwrap_or(0);
        let build = digits.next().unwrap_or(0);
        Some(Self::new(
            NET_FRAMEWORK,
            FrameworkVersion::with_build(major, minor, build),
        ))
    }

    /// Parse a full framework name such as `.NETCoreApp,Version=v6.0`
    ///
    /// This is the spelling a host reads off its own build metadata when
    /// supplying the target framework.
    ///
    /// # Errors
    ///
    /// Returns [`NupkgAssetError::FrameworkParseFailed`] when the name does
    /// not contain an identifier plus a `Version=v` component.
    pub fn parse_framework_name(name: &str) -> Result<Self> {
        let parse_failed = || NupkgAssetError::FrameworkParseFailed {
            moniker: name.to_string(),
        };

        let mut parts = name.split(',').map(str::trim);
        let identifier = parts.next().filter(|s| !s.is_empty()).ok_or_else(parse_failed)?;

        let version_part = parts
            .find_map(|p| p.strip_prefix("Version=v"))
            .ok_or_else(parse_failed)?;
        let version = parse_dotted_version(version_part).ok_or_else(parse_failed)?;

        Ok(Self::new(identifier, version))
    }

    /// Parse a caller-supplied target framework in either spelling
    ///
    /// Accepts both the short folder form (`net6.0`) and the full form
    /// (`.NETCoreApp,Version=v6.0`).
    ///
    /// # Errors
    ///
    /// Returns [`NupkgAssetError::FrameworkParseFailed`] when neither
    /// spelling parses.
    pub fn parse(input: &str) -> Result<Self> {
        if input.contains("Version=") {
            return Self::parse_framework_name(input);
        }
        Self::parse_folder(input).ok_or_else(|| NupkgAssetError::FrameworkParseFailed {
            moniker: input.to_string(),
        })
    }

    /// The short folder spelling of this moniker (`net6.0`, `netstandard2.0`)
    pub fn short_folder_name(&self) -> String {
        match self.identifier.as_str() {
            NET_STANDARD => format!("netstandard{}.{}", self.version.major, self.version.minor),
            NET_CORE_APP => {
                if self.version.major >= 5 {
                    let mut name = format!("net{}.{}", self.version.major, self.version.minor);
                    if let Some(platform) = &self.platform {
                        name.push('-');
                        name.push_str(platform);
                    }
                    name
                } else {
                    format!("netcoreapp{}.{}", self.version.major, self.version.minor)
                }
            }
            NET_FRAMEWORK => {
                let mut name = format!("net{}{}", self.version.major, self.version.minor);
                if self.version.build > 0 {
                    name.push_str(&self.version.build.to_string());
                }
                name
            }
            other => format!(
                "{}{}.{}",
                other.to_ascii_lowercase(),
                self.version.major,
                self.version.minor
            ),
        }
    }

    /// The full framework name spelling (`.NETCoreApp,Version=v6.0`)
    pub fn framework_name(&self) -> String {
        format!("{},Version=v{}", self.identifier, self.version)
    }
}

impl std::fmt::Display for FrameworkMoniker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.framework_name())
    }
}

/// Parse a dotted version with up to four numeric components
fn parse_dotted_version(input: &str) -> Option<FrameworkVersion> {
    if input.is_empty() {
        return None;
    }
    let mut components = [0u32; 4];
    let mut count = 0;
    for part in input.split('.') {
        if count >= 4 {
            return None;
        }
        components[count] = part.parse().ok()?;
        count += 1;
    }
    Some(FrameworkVersion {
        major: components[0],
        minor: components[1],
        build: components[2],
        revision: components[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folder_modern_net() {
        let moniker = FrameworkMoniker::parse_folder("net6.0").unwrap();
        assert_eq!(moniker.identifier, NET_CORE_APP);
        assert_eq!(moniker.version, FrameworkVersion::new(6, 0));
        assert_eq!(moniker.platform, None);
    }

    #[test]
    fn test_parse_folder_platform_suffix() {
        let moniker = FrameworkMoniker::parse_folder("net6.0-windows").unwrap();
        assert_eq!(moniker.identifier, NET_CORE_APP);
        assert_eq!(moniker.platform.as_deref(), Some("windows"));
        assert_eq!(moniker.short_folder_name(), "net6.0-windows");
    }

    #[test]
    fn test_parse_folder_netcoreapp() {
        let moniker = FrameworkMoniker::parse_folder("netcoreapp3.1").unwrap();
        assert_eq!(moniker.identifier, NET_CORE_APP);
        assert_eq!(moniker.version, FrameworkVersion::new(3, 1));
        assert_eq!(moniker.short_folder_name(), "netcoreapp3.1");
    }

    #[test]
    fn test_parse_folder_netstandard() {
        let moniker = FrameworkMoniker::parse_folder("netstandard2.0").unwrap();
        assert_eq!(moniker.identifier, NET_STANDARD);
        assert_eq!(moniker.version, FrameworkVersion::new(2, 0));
    }

    #[test]
    fn test_parse_folder_digit_packed() {
        let moniker = FrameworkMoniker::parse_folder("net472").unwrap();
        assert_eq!(moniker.identifier, NET_FRAMEWORK);
        assert_eq!(moniker.version, FrameworkVersion::with_build(4, 7, 2));
        assert_eq!(moniker.short_folder_name(), "net472");

        let moniker = FrameworkMoniker::parse_folder("net48").unwrap();
        assert_eq!(moniker.version, FrameworkVersion::new(4, 8));
        assert_eq!(moniker.short_folder_name(), "net48");
    }

    #[test]
    fn test_parse_folder_rejects_non_monikers() {
        assert!(FrameworkMoniker::parse_folder("native").is_none());
        assert!(FrameworkMoniker::parse_folder("any").is_none());
        assert!(FrameworkMoniker::parse_folder("contentFiles").is_none());
        assert!(FrameworkMoniker::parse_folder("netweird").is_none());
        assert!(FrameworkMoniker::parse_folder("").is_none());
        // dotted versions below 5 are not a folder spelling
        assert!(FrameworkMoniker::parse_folder("net1.0").is_none());
    }

    #[test]
    fn test_parse_framework_name() {
        let moniker =
            FrameworkMoniker::parse_framework_name(".NETCoreApp,Version=v6.0").unwrap();
        assert_eq!(moniker.identifier, NET_CORE_APP);
        assert_eq!(moniker.version, FrameworkVersion::new(6, 0));
        assert_eq!(moniker.framework_name(), ".NETCoreApp,Version=v6.0");
    }

    #[test]
    fn test_parse_framework_name_invalid() {
        assert!(FrameworkMoniker::parse_framework_name("no version here").is_err());
        assert!(FrameworkMoniker::parse_framework_name("").is_err());
        assert!(FrameworkMoniker::parse_framework_name(",Version=v6.0").is_err());
    }

    #[test]
    fn test_parse_accepts_both_spellings() {
        let short = FrameworkMoniker::parse("net6.0").unwrap();
        let full = FrameworkMoniker::parse(".NETCoreApp,Version=v6.0").unwrap();
        assert_eq!(short, full);
    }

    #[test]
    fn test_version_ordering() {
        assert!(FrameworkVersion::new(6, 0) > FrameworkVersion::new(3, 1));
        assert!(FrameworkVersion::with_build(4, 7, 2) > FrameworkVersion::new(4, 7));
        assert!(FrameworkVersion::new(4, 8) > FrameworkVersion::with_build(4, 7, 2));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(FrameworkVersion::new(6, 0).to_string(), "6.0");
        assert_eq!(FrameworkVersion::with_build(4, 7, 2).to_string(), "4.7.2");
    }
}
