//! Title search
//!
//! Case-insensitive substring match on the title only. Body and id never
//! participate in the match.

use crate::model::Record;

/// Whether `term` actually filters anything (blank terms do not)
pub fn is_filtering(term: &str) -> bool {
    !term.trim().is_empty()
}

/// Records whose title contains `term`, ignoring case, in source order
///
/// A blank term returns every record unchanged.
pub fn filter_by_title<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    if !is_filtering(term) {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record.title.to_lowercase().contains(&needle))
        .collect()
}
