use std::collections::HashSet;
use crate::domain::{AllowList, AnnouncedState, GiveawayEntry};

/// Selects the giveaways to announce, keeping the catalog order: at least one of the entry's
/// platforms must be in the allow-list and the entry must not have been announced yet.
/// An empty allow-list matches nothing. If the catalog lists an id more than once, only the
/// first occurrence is kept.
pub fn filter_new<'a>(entries: &'a [GiveawayEntry], allow_list: &AllowList, state: &AnnouncedState) -> Vec<&'a GiveawayEntry> {
    let mut seen = HashSet::new();
    entries.iter()
        .filter(|entry| !state.contains(entry.id))
        .filter(|entry| entry.platform_names().any(|platform| allow_list.contains(platform)))
        .filter(|entry| seen.insert(entry.id))
        .collect()
}
