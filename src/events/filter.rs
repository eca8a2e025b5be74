use super::model::{Event, FilterCriteria};
use itertools::Itertools;

/// Distinct tags across all events, in order of first appearance
pub fn collect_tags(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .flat_map(|event| event.tags.iter())
        .unique()
        .cloned()
        .collect()
}

/// Keeps the events matching both the search term and the selected tag, preserving order
pub fn filter_events<'a>(events: &'a [Event], criteria: &FilterCriteria) -> Vec<&'a Event> {
    if criteria.is_empty() {
        return events.iter().collect();
    }

    let search_term = criteria.search_term.to_lowercase();

    events
        .iter()
        .filter(|event| matches_text(event, &search_term) && matches_tag(event, &criteria.selected_tag))
        .collect()
}

fn matches_text(event: &Event, search_term: &str) -> bool {
    search_term.is_empty()
        || [&event.title, &event.description, &event.location]
            .iter()
            .any(|field| field.to_lowercase().contains(search_term))
}

// Tags are compared as-is, only the text search ignores case
fn matches_tag(event: &Event, selected_tag: &str) -> bool {
    selected_tag.is_empty() || event.tags.iter().any(|tag| tag == selected_tag)
}
