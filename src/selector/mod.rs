//! Asset selection and ranking
//!
//! Pure decision logic over classified archive entries: no archive and no
//! filesystem access. One call picks the winning managed framework group
//! and annotates every runtime-specific entry with support flags, so the
//! whole selection is unit-testable and the side-effecting extraction can
//! happen afterwards from the returned plan.

use std::collections::BTreeMap;

use tracing::debug;

use crate::archive::{AssetEntry, RuntimeAssetKind};
use crate::domain::TargetSpec;
use crate::framework::{is_compatible, reduce_nearest, FrameworkMoniker};
use crate::runtime::RidChain;

/// One managed entry of the winning framework group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedManagedAsset {
    pub framework: FrameworkMoniker,
    pub file_name: String,
    pub full_path: String,
}

/// One runtime-specific entry, annotated with support flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRuntimeAsset {
    pub rid: String,
    /// Framework of a managed runtime entry; `None` for native ones
    pub framework: Option<FrameworkMoniker>,
    pub file_name: String,
    pub full_path: String,
    pub is_native: bool,
    /// Usable on the target platform
    pub is_supported: bool,
    /// Best-ranked usable entry of its file-name group
    pub is_recommended: bool,
}

/// Result of one selection pass over an archive's classified entries
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// The nearest compatible framework, when any managed group matched
    pub winning_framework: Option<FrameworkMoniker>,
    /// Every managed entry of the winning framework group
    pub winning_managed: Vec<SelectedManagedAsset>,
    /// Every runtime entry seen, annotated; off-chain entries stay in the
    /// list with both flags false
    pub runtime: Vec<RankedRuntimeAsset>,
}

/// Select the winning managed group and rank runtime assets
pub fn select(entries: &[AssetEntry], target: &TargetSpec, chain: &RidChain) -> Selection {
    let mut frameworks: Vec<FrameworkMoniker> = Vec::new();
    for entry in entries {
        if let AssetEntry::Managed { framework, .. } = entry {
            if !frameworks.contains(framework) {
                frameworks.push(framework.clone());
            }
        }
    }

    let winning_framework = reduce_nearest(&target.framework, &frameworks);
    debug!(
        candidates = frameworks.len(),
        winner = ?winning_framework.as_ref().map(FrameworkMoniker::short_folder_name),
        "reduced managed framework groups"
    );

    let winning_managed = match &winning_framework {
        Some(winner) => entries
            .iter()
            .filter_map(|entry| match entry {
                AssetEntry::Managed {
                    framework,
                    file_name,
                    full_path,
                } if framework == winner => Some(SelectedManagedAsset {
                    framework: framework.clone(),
                    file_name: file_name.clone(),
                    full_path: full_path.clone(),
                }),
                _ => None,
            })
            .collect(),
        None => Vec::new(),
    };

    let runtime = rank_runtime_assets(entries, target, chain);

    Selection {
        winning_framework,
        winning_managed,
        runtime,
    }
}

fn rank_runtime_assets(
    entries: &[AssetEntry],
    target: &TargetSpec,
    chain: &RidChain,
) -> Vec<RankedRuntimeAsset> {
    let mut ranked: Vec<RankedRuntimeAsset> = Vec::new();
    for entry in entries {
        let AssetEntry::Runtime {
            rid,
            kind,
            file_name,
            full_path,
        } = entry
        else {
            continue;
        };

        let on_chain = chain.contains(rid);
        let (framework, is_native, is_supported) = match kind {
            RuntimeAssetKind::Native => (None, true, on_chain),
            RuntimeAssetKind::Managed(framework) => (
                Some(framework.clone()),
                false,
                on_chain && is_compatible(&target.framework, framework),
            ),
        };

        ranked.push(RankedRuntimeAsset {
            rid: rid.clone(),
            framework,
            file_name: file_name.clone(),
            full_path: full_path.clone(),
            is_native,
            is_supported,
            is_recommended: false,
        });
    }

    // Group by file name; each group recommends at most one entry.
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (index, asset) in ranked.iter().enumerate() {
        groups.entry(asset.file_name.clone()).or_default().push(index);
    }

    for (file_name, indices) in &groups {
        if let Some(best) = recommend(&ranked, indices, target, chain) {
            debug!(
                file = file_name.as_str(),
                rid = ranked[best].rid.as_str(),
                "recommended runtime asset"
            );
            ranked[best].is_recommended = true;
        }
    }

    ranked
}

/// Pick the best-ranked supported entry of one file-name group
///
/// Native entries rank by chain position. Managed entries rank by nearest
/// compatible framework first, then chain position. A group holding both
/// kinds recommends from its native entries when any is supported.
fn recommend(
    ranked: &[RankedRuntimeAsset],
    indices: &[usize],
    target: &TargetSpec,
    chain: &RidChain,
) -> Option<usize> {
    let supported: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| ranked[i].is_supported)
        .collect();

    let natives: Vec<usize> = supported
        .iter()
        .copied()
        .filter(|&i| ranked[i].is_native)
        .collect();
    if !natives.is_empty() {
        return natives
            .into_iter()
            .min_by_key(|&i| chain.position(&ranked[i].rid));
    }

    let frameworks: Vec<FrameworkMoniker> = supported
        .iter()
        .filter_map(|&i| ranked[i].framework.clone())
        .collect();
    let nearest = reduce_nearest(&target.framework, &frameworks)?;

    supported
        .into_iter()
        .filter(|&i| ranked[i].framework.as_ref() == Some(&nearest))
        .min_by_key(|&i| chain.position(&ranked[i].rid))
}
