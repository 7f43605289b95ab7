//! Ordered field-alias probing.

/// Return the first candidate for which `lookup` yields a value.
///
/// Candidates are tried in slice order, so earlier names take priority over
/// later ones. `lookup` decides what "present" means for the caller's data
/// format.
pub fn first_present<'a, T, F>(candidates: &[&'a str], lookup: F) -> Option<T>
where
    F: FnMut(&'a str) -> Option<T>,
{
    candidates.iter().copied().find_map(lookup)
}
