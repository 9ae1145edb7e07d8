//! Matching free-text references against blocks.
//!
//! Abstract designs name blocks loosely ("distortion", "the plate reverb",
//! "Tube Screamer"). A [`BlockMatcher`] decides whether such a reference
//! denotes a given block; resolution only ever asks the matcher and never
//! compares strings itself, so the tolerance can be changed in one place.

/// Decides whether a free-text reference names a candidate string.
pub trait BlockMatcher: Send + Sync {
    /// Whether `reference` denotes `candidate`.
    fn matches(&self, reference: &str, candidate: &str) -> bool;

    /// Whether `reference` denotes any of a block's candidate names.
    fn matches_any(&self, reference: &str, candidates: &[&str]) -> bool {
        candidates.iter().any(|c| self.matches(reference, c))
    }
}

/// Case-insensitive, symmetric substring containment.
///
/// A reference matches when, ignoring case and surrounding whitespace, it
/// equals the candidate, contains it, or is contained in it. Empty strings
/// never match, so a block with no name cannot swallow every reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstringMatcher;

impl BlockMatcher for SubstringMatcher {
    fn matches(&self, reference: &str, candidate: &str) -> bool {
        let reference = reference.trim().to_lowercase();
        let candidate = candidate.trim().to_lowercase();
        if reference.is_empty() || candidate.is_empty() {
            return false;
        }
        reference == candidate || reference.contains(&candidate) || candidate.contains(&reference)
    }
}

/// Exact case-insensitive equality.
///
/// Stricter alternative to [`SubstringMatcher`] for designs that use the
/// device's own names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactMatcher;

impl BlockMatcher for ExactMatcher {
    fn matches(&self, reference: &str, candidate: &str) -> bool {
        let reference = reference.trim();
        !reference.is_empty() && reference.eq_ignore_ascii_case(candidate.trim())
    }
}
