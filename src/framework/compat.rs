//! Framework compatibility rules and nearest-framework reduction
//!
//! Compatibility is asymmetric: a candidate folder from an archive is
//! usable under a caller-supplied target. Same-family candidates match up
//! to the target's version; `.NETStandard` candidates additionally match
//! `.NETCoreApp` and `.NETFramework` targets up to a per-target ceiling,
//! a small static table standing in for the full platform mapping set.

use super::{FrameworkMoniker, FrameworkVersion, NET_CORE_APP, NET_FRAMEWORK, NET_STANDARD};

/// Check whether `candidate` is usable under `target`
///
/// Unversioned catch-all folders (zero major version) are never usable.
pub fn is_compatible(target: &FrameworkMoniker, candidate: &FrameworkMoniker) -> bool {
    if candidate.version.is_zero() {
        return false;
    }

    if candidate.identifier == target.identifier {
        // A platform-specific candidate (net6.0-windows) only matches a
        // target carrying the same platform suffix.
        if let Some(platform) = &candidate.platform {
            if target.platform.as_deref() != Some(platform.as_str()) {
                return false;
            }
        }
        return candidate.version <= target.version;
    }

    if candidate.identifier == NET_STANDARD {
        if let Some(ceiling) = netstandard_ceiling(target) {
            return candidate.version <= ceiling;
        }
    }

    false
}

/// Reduce a set of candidate frameworks to the single nearest one
///
/// The nearest framework is the compatible candidate with the greatest
/// version, preferring candidates from the target's own family over
/// cross-compatible `.NETStandard` ones. Returns `None` when no candidate
/// is compatible; the package then contributes no managed assets for this
/// target.
pub fn reduce_nearest(
    target: &FrameworkMoniker,
    candidates: &[FrameworkMoniker],
) -> Option<FrameworkMoniker> {
    let compatible: Vec<&FrameworkMoniker> = candidates
        .iter()
        .filter(|candidate| is_compatible(target, candidate))
        .collect();

    let same_family = compatible
        .iter()
        .filter(|candidate| candidate.identifier == target.identifier)
        .max_by_key(|candidate| candidate.version);

    if let Some(nearest) = same_family {
        return Some((*nearest).clone());
    }

    compatible
        .into_iter()
        .max_by_key(|candidate| candidate.version)
        .cloned()
}

/// Greatest `.NETStandard` version usable from `target`, if any
fn netstandard_ceiling(target: &FrameworkMoniker) -> Option<FrameworkVersion> {
    match target.identifier.as_str() {
        NET_CORE_APP => {
            if target.version >= FrameworkVersion::new(3, 0) {
                Some(FrameworkVersion::new(2, 1))
            } else if target.version >= FrameworkVersion::new(2, 0) {
                Some(FrameworkVersion::new(2, 0))
            } else {
                Some(FrameworkVersion::new(1, 6))
            }
        }
        NET_FRAMEWORK => {
            if target.version >= FrameworkVersion::with_build(4, 6, 1) {
                Some(FrameworkVersion::new(2, 0))
            } else if target.version >= FrameworkVersion::new(4, 5) {
                Some(FrameworkVersion::new(1, 1))
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(name: &str) -> FrameworkMoniker {
        FrameworkMoniker::parse_folder(name).unwrap()
    }

    #[test]
    fn test_same_family_version_bound() {
        let target = folder("net6.0");
        assert!(is_compatible(&target, &folder("net5.0")));
        assert!(is_compatible(&target, &folder("netcoreapp3.1")));
        assert!(is_compatible(&target, &folder("net6.0")));
        assert!(!is_compatible(&target, &folder("net7.0")));
    }

    #[test]
    fn test_cross_family_rejected() {
        // Classic framework builds are not usable from the modern runtime
        let target = folder("net6.0");
        assert!(!is_compatible(&target, &folder("net48")));
        assert!(!is_compatible(&target, &folder("net472")));
    }

    #[test]
    fn test_netstandard_ceiling_core() {
        let target = folder("net6.0");
        assert!(is_compatible(&target, &folder("netstandard2.1")));
        assert!(is_compatible(&target, &folder("netstandard2.0")));

        let older = folder("netcoreapp2.1");
        assert!(is_compatible(&older, &folder("netstandard2.0")));
        assert!(!is_compatible(&older, &folder("netstandard2.1")));
    }

    #[test]
    fn test_netstandard_ceiling_classic() {
        let target = folder("net472");
        assert!(is_compatible(&target, &folder("netstandard2.0")));
        assert!(!is_compatible(&target, &folder("netstandard2.1")));

        let legacy = folder("net45");
        assert!(is_compatible(&legacy, &folder("netstandard1.1")));
        assert!(!is_compatible(&legacy, &folder("netstandard2.0")));
    }

    #[test]
    fn test_zero_version_never_compatible() {
        let target = folder("net6.0");
        let unversioned = FrameworkMoniker::new(super::NET_CORE_APP, FrameworkVersion::default());
        assert!(!is_compatible(&target, &unversioned));
    }

    #[test]
    fn test_platform_suffix_must_match() {
        let plain = folder("net6.0");
        let windows = folder("net6.0-windows");
        assert!(!is_compatible(&plain, &windows));
        assert!(is_compatible(&windows, &windows));
        // A suffix-free candidate is fine under a platform-specific target
        assert!(is_compatible(&windows, &plain));
    }

    #[test]
    fn test_reduce_nearest_greatest_version() {
        let target = folder("net6.0");
        let candidates = vec![folder("netcoreapp3.1"), folder("net5.0"), folder("net6.0")];
        assert_eq!(reduce_nearest(&target, &candidates), Some(folder("net6.0")));
    }

    #[test]
    fn test_reduce_nearest_singleton() {
        let target = folder("net6.0");
        let candidates = vec![folder("net5.0")];
        assert_eq!(reduce_nearest(&target, &candidates), Some(folder("net5.0")));
    }

    #[test]
    fn test_reduce_nearest_all_exceed_target() {
        let target = folder("netcoreapp3.1");
        let candidates = vec![folder("net5.0"), folder("net6.0")];
        assert_eq!(reduce_nearest(&target, &candidates), None);
    }

    #[test]
    fn test_reduce_nearest_prefers_target_family() {
        // netstandard2.1 is compatible with net6.0, but the same-family
        // netcoreapp3.1 build wins even though 2.1 < 3.1 anyway; flip the
        // versions to make the family preference observable.
        let target = folder("net6.0");
        let candidates = vec![folder("netstandard2.1"), folder("netcoreapp2.0")];
        assert_eq!(
            reduce_nearest(&target, &candidates),
            Some(folder("netcoreapp2.0"))
        );
    }

    #[test]
    fn test_reduce_nearest_netstandard_fallback() {
        let target = folder("net6.0");
        let candidates = vec![
            folder("netstandard1.3"),
            folder("netstandard2.0"),
            folder("net48"),
        ];
        assert_eq!(
            reduce_nearest(&target, &candidates),
            Some(folder("netstandard2.0"))
        );
    }

    #[test]
    fn test_reduce_nearest_no_compatible() {
        let target = folder("net6.0");
        let candidates = vec![folder("net48"), folder("net472")];
        assert_eq!(reduce_nearest(&target, &candidates), None);
    }
}
