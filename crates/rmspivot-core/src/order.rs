//! Category ordering policy.
//!
//! Alarm categories display in a hand-maintained priority order; anything
//! observed in the data but absent from the priority list follows
//! alphabetically. The priority list is configuration, not derived data.

use std::collections::HashSet;

/// Order observed categories: priority entries first (in priority order),
/// then the unlisted remainder alphabetically.
///
/// Priority entries never observed are omitted — the list is a display
/// preference, not a mandate to fabricate empty sections. Duplicate
/// observations collapse to one entry.
pub fn order_categories(observed: &[String], priority: &[String]) -> Vec<String> {
    let observed_set: HashSet<&str> = observed.iter().map(String::as_str).collect();
    let priority_set: HashSet<&str> = priority.iter().map(String::as_str).collect();

    let mut ordered: Vec<String> = priority
        .iter()
        .filter(|p| observed_set.contains(p.as_str()))
        .cloned()
        .collect();

    let mut rest: Vec<String> = observed_set
        .iter()
        .filter(|o| !priority_set.contains(*o))
        .map(|o| (*o).to_owned())
        .collect();
    rest.sort();

    ordered.extend(rest);
    ordered
}
