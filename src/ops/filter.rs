use crate::model::{Candidate, OptionItem};

/// Literal, case-sensitive substring match against label or value.
/// An empty query matches everything.
pub fn matches_query(item: &OptionItem, query: &str) -> bool {
    item.label.contains(query) || item.value.contains(query)
}

/// Unselected candidates matching `query`, in original order.
pub fn filter_candidates<'a>(candidates: &'a [Candidate], query: &str) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|c| !c.selected && matches_query(&c.item, query))
        .collect()
}

/// Plain items matching `query`, ignoring selection state (used by `list`).
pub fn filter_items<'a>(items: &'a [OptionItem], query: &str) -> Vec<&'a OptionItem> {
    items.iter().filter(|i| matches_query(i, query)).collect()
}
