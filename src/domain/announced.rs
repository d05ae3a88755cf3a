use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use crate::domain::GiveawayId;

/// Identifiers of the giveaways which have already been sent to the room.
///
/// Serialized as an ascending JSON array, so the state file produces stable diffs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncedState(BTreeSet<GiveawayId>);

impl AnnouncedState {
    pub fn contains(&self, id: GiveawayId) -> bool {
        self.0.contains(&id)
    }

    /// Returns `false` if the id was already there.
    pub fn insert(&mut self, id: GiveawayId) -> bool {
        self.0.insert(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<GiveawayId> for AnnouncedState {
    fn from_iter<T: IntoIterator<Item = GiveawayId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
