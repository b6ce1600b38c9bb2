//! Territory groupings that share a capital and carry influence markers.

use super::territory::{FactionId, TerritoryId};

/// Most influence markers a nation can carry; the last one occupies it.
pub const MAX_INFLUENCE: usize = 3;

/// A named cluster of territories with one capital.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nation {
    pub name: String,
    pub territories: Vec<TerritoryId>,
    pub capital: TerritoryId,
    /// Influence markers in placement order.
    pub influence: Vec<FactionId>,
}

impl Nation {
    pub fn new(name: &str, capital: TerritoryId) -> Self {
        Nation {
            name: name.to_string(),
            territories: Vec::new(),
            capital,
            influence: Vec::new(),
        }
    }

    /// The faction whose markers are on the nation, if any.
    pub fn influencer(&self) -> Option<FactionId> {
        self.influence.first().copied()
    }

    /// Number of markers `faction` holds.
    pub fn markers_of(&self, faction: FactionId) -> usize {
        self.influence.iter().filter(|&&f| f == faction).count()
    }
}
