use crate::world::hex::Hex;
use std::collections::BTreeMap;

/// Unique identifier for a mob. IDs are never reused.
pub type MobId = u32;

/// Every mob in the game, keyed by ID. This is ordered so that iterating over
/// it (and therefore simulation) is deterministic.
pub type MobRegistry = BTreeMap<MobId, Mob>;

/// A mobile object: a ship, torpedo, or any other thing that moves around the
/// map. A mob moves in a straight line according to its velocity, and that
/// velocity changes only through thrust and gravity.
///
/// A mob that becomes **derelict** (by crashing into a planet or another mob,
/// or by being ordnance) can't thrust anymore. There's no way back from that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mob {
    /// Every position this mob has occupied, oldest first. Never empty, and
    /// grows by exactly one each simulation pass.
    history: Vec<Hex>,
    /// Displacement to apply on the next pass
    velocity: Hex,
    derelict: bool,
}

impl Mob {
    /// Create a mob that has existed for zero passes
    pub fn new(position: Hex, velocity: Hex, derelict: bool) -> Self {
        Self {
            history: vec![position],
            velocity,
            derelict,
        }
    }

    pub fn history(&self) -> &[Hex] {
        &self.history
    }

    /// The mob's current position, i.e. the latest entry in its history
    pub fn position(&self) -> Hex {
        // History is never empty
        self.history[self.history.len() - 1]
    }

    pub fn velocity(&self) -> Hex {
        self.velocity
    }

    pub fn is_derelict(&self) -> bool {
        self.derelict
    }

    /// Where this mob will end up after the next pass, if nothing gets in the
    /// way
    pub fn next_position(&self) -> Hex {
        self.position() + self.velocity
    }

    /// Was this mob created since the last simulation pass? Used to let
    /// freshly launched ordnance share a tile with its launcher.
    pub fn is_fresh(&self) -> bool {
        self.history.len() == 1
    }

    /// Get a copy of this mob with a new velocity
    pub fn with_velocity(&self, velocity: Hex) -> Self {
        Self {
            velocity,
            ..self.clone()
        }
    }

    /// Get the next state of this mob after one pass. `derelict` can only set
    /// the flag, never clear it.
    pub(crate) fn advance(
        &self,
        position: Hex,
        velocity: Hex,
        derelict: bool,
    ) -> Self {
        let mut history = self.history.clone();
        history.push(position);
        Self {
            history,
            velocity,
            derelict: self.derelict || derelict,
        }
    }
}
