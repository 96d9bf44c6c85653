use crate::world::{
    hex::{FnvIndexSet, HexDirection},
    mob::MobId,
};
use serde::{Deserialize, Serialize};

/// What a tile is made of. This is fixed when the map is built; only a
/// tile's occupants change during play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// Open space
    Empty,
    /// Solid ground. Anything that flies into it gets stuck there.
    Planet,
    /// A gravity well, which adds one unit of velocity in the given direction
    /// to any mob that passes through. These surround planets, so the
    /// direction always points at the planet.
    Gravity(HexDirection),
}

/// One tile on the map. Each tile has a kind, plus the set of mobs that are
/// currently on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    kind: TileKind,
    /// IDs of the mobs on this tile, in the order they arrived
    occupants: FnvIndexSet<MobId>,
}

impl Tile {
    /// Create a tile with no occupants
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            occupants: FnvIndexSet::default(),
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn is_planet(&self) -> bool {
        self.kind == TileKind::Planet
    }

    /// Mobs on this tile, in arrival order
    pub fn occupants(&self) -> &FnvIndexSet<MobId> {
        &self.occupants
    }

    /// Get a copy of this tile with a mob added to the end of the occupant
    /// list. If the mob is already here, it keeps its original spot.
    pub fn with_occupant(&self, id: MobId) -> Self {
        let mut tile = self.clone();
        tile.occupants.insert(id);
        tile
    }

    /// Get a copy of this tile with a mob removed. The remaining occupants
    /// keep their order.
    pub fn without_occupant(&self, id: MobId) -> Self {
        let mut tile = self.clone();
        tile.occupants.shift_remove(&id);
        tile
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileKind::Empty)
    }
}
