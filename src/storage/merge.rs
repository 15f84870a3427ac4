use indexmap::IndexMap;

use crate::storage::models::FilteredCandidate;

/// Union of two candidate lists keyed by `candidate_id`.
///
/// `recovered` is applied after `primary`, so it wins on collisions. A key
/// keeps the position where it was first seen.
pub fn merge_by_candidate_id(
    primary: Vec<FilteredCandidate>,
    recovered: Vec<FilteredCandidate>,
) -> Vec<FilteredCandidate> {
    let mut combined: IndexMap<String, FilteredCandidate> = IndexMap::new();
    for candidate in primary.into_iter().chain(recovered) {
        combined.insert(candidate.candidate_id.clone(), candidate);
    }
    combined.into_values().collect()
}
