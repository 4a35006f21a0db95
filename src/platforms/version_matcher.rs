// Candidate matching: availability, stability, loader, game version, recency

use crate::models::{Loader, ReleaseType};
use crate::platforms::candidate::ModCandidate;
use log::debug;

/// Why the pipeline produced nothing. Translated into the caller-facing
/// error taxonomy by the resolver, which knows the mod name and platform.
#[derive(Debug, PartialEq, Eq)]
pub enum MatchError {
    /// Some stage left zero candidates.
    NoMatch,
    /// A pinned version label matched more than one candidate.
    AmbiguousVersion { label: String, count: usize },
}

/// Fallback versions derived from a `major.minor.patch` request, tried in
/// order: the decremented patch first, then the bare `major.minor`.
#[derive(Debug, Default, PartialEq, Eq)]
struct FallbackVersions {
    decremented_patch: Option<String>,
    dropped_patch: Option<String>,
}

/// Parse the requested game version and derive its fallbacks. Anything that
/// is not a two- or three-part dotted version has no fallbacks; a
/// non-numeric or zero patch rules out the decremented form only.
fn fallback_versions(requested: &str) -> FallbackVersions {
    let mut parts = requested.split('.');
    let major = parts.next().unwrap_or_default();
    let (Some(minor), patch, None) = (parts.next(), parts.next(), parts.next()) else {
        return FallbackVersions::default();
    };
    if major.is_empty() || minor.is_empty() {
        return FallbackVersions::default();
    }

    FallbackVersions {
        decremented_patch: patch
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .map(|p| format!("{major}.{minor}.{}", p - 1)),
        dropped_patch: patch.map(|_| format!("{major}.{minor}")),
    }
}

fn with_game_version<'a>(
    candidates: &[&'a ModCandidate],
    version: &str,
) -> Vec<&'a ModCandidate> {
    candidates
        .iter()
        .filter(|c| c.game_versions.iter().any(|v| v == version))
        .copied()
        .collect()
}

/// Select the one candidate satisfying the request, or report why none does.
///
/// Deterministic and side-effect free: the same inputs always produce the
/// same output. The filter stages are kept separate so a narrowing-to-zero
/// can be attributed to a specific constraint.
pub fn select_candidate<'a>(
    candidates: &'a [ModCandidate],
    allowed_release_types: &[ReleaseType],
    loader: Loader,
    game_version: &str,
    allow_fallback: bool,
    pinned_version: Option<&str>,
) -> Result<&'a ModCandidate, MatchError> {
    let available: Vec<&ModCandidate> = candidates.iter().filter(|c| c.available).collect();

    let stable: Vec<&ModCandidate> = available
        .iter()
        .filter(|c| allowed_release_types.contains(&c.release_type))
        .copied()
        .collect();

    let loaded: Vec<&ModCandidate> = stable
        .iter()
        .filter(|c| {
            c.loader_tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(loader.as_str()))
        })
        .copied()
        .collect();

    // Exact game version first; fallbacks are staged so a decremented-patch
    // match beats a major.minor one even when both exist.
    let mut matched = with_game_version(&loaded, game_version);
    if matched.is_empty() && allow_fallback {
        let fallbacks = fallback_versions(game_version);
        if let Some(decremented) = &fallbacks.decremented_patch {
            matched = with_game_version(&loaded, decremented);
        }
        if matched.is_empty()
            && let Some(dropped) = &fallbacks.dropped_patch
        {
            matched = with_game_version(&loaded, dropped);
        }
    }

    debug!(
        "matcher: {} candidates, {} available, {} in release tiers, {} for {loader}, {} for {game_version}",
        candidates.len(),
        available.len(),
        stable.len(),
        loaded.len(),
        matched.len(),
    );

    if let Some(label) = pinned_version {
        // A pinned version bypasses recency entirely and must be unique.
        let pinned: Vec<&ModCandidate> = matched
            .iter()
            .filter(|c| c.version_label == label)
            .copied()
            .collect();
        return match pinned.as_slice() {
            [] => Err(MatchError::NoMatch),
            [single] => Ok(*single),
            many => Err(MatchError::AmbiguousVersion {
                label: label.to_string(),
                count: many.len(),
            }),
        };
    }

    // Stable sort: ties keep their upstream order.
    matched.sort_by(|a, b| b.release_date.cmp(&a.release_date));
    matched.first().copied().ok_or(MatchError::NoMatch)
}
