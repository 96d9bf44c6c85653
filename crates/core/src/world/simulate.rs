//! Advancement of mobs from one tick to the next. Everything here is a pure
//! function of a [Snapshot]: the input is never modified, and the result is a
//! brand new snapshot that shares most of its map with the old one.

use crate::{
    unwrap,
    world::{
        hex::{Hex, HexMap},
        mob::{Mob, MobId, MobRegistry},
        tile::{Tile, TileKind},
    },
};
use log::{debug, trace};

/// The full state of the board at one instant: every tile and every mob.
/// Every mob's current position should be on the map, and each mob should be
/// listed as an occupant of its tile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub map: HexMap<Tile>,
    pub mobs: MobRegistry,
}

impl Snapshot {
    /// Look up a mob by ID. Panics if the mob doesn't exist.
    pub fn mob(&self, id: MobId) -> &Mob {
        unwrap!(self.mobs.get(&id), "mob {} is not in the registry", id)
    }
}

/// Run one pass for every mob. Each mob's next state is computed from the
/// same pre-pass snapshot, so the order that mobs are processed in doesn't
/// affect the outcome. After that, tile occupancy is updated to match the new
/// positions.
///
/// Panics if any mob's path crosses a hex that isn't on the map.
pub fn simulate_mobs(snapshot: &Snapshot) -> Snapshot {
    let mobs: MobRegistry = snapshot
        .mobs
        .keys()
        .map(|&id| (id, simulate_mob(&snapshot.map, &snapshot.mobs, id)))
        .collect();

    let mut map = snapshot.map.clone();
    for (&id, mob) in &mobs {
        let prev = snapshot.mob(id).position();
        let next = mob.position();
        map = map.update(prev, |tile| tile.without_occupant(id));
        map = map.update(next, |tile| tile.with_occupant(id));
        trace!(
            "mob {}: {} -> {}, velocity {}, derelict {}",
            id,
            prev,
            next,
            mob.velocity(),
            mob.is_derelict()
        );
    }

    Snapshot { map, mobs }
}

/// Compute the next state of a single mob, without modifying anything. The
/// mob travels along the straight line from its position to its position plus
/// velocity, and along the way:
///
/// - Hitting a planet stops the mob dead on the planet tile, and makes it
///   derelict. If the line straddles a planet tile and an open one at that
///   step, the mob skirts past through the open tile instead.
/// - Sharing a tile with any other mob makes it derelict. Mobs that were
///   spawned on the starting tile this turn (e.g. a torpedo that was just
///   launched) don't count.
/// - Each gravity well passed through (including straddled ones) adds one
///   unit of velocity in its direction. The starting tile only counts if the
///   mob isn't moving.
///
/// Panics if the mob isn't in the registry, or if the path crosses a hex that
/// isn't on the map.
pub fn simulate_mob(map: &HexMap<Tile>, mobs: &MobRegistry, id: MobId) -> Mob {
    let mob = unwrap!(mobs.get(&id), "mob {} is not in the registry", id);
    let start = mob.position();
    let mut end = mob.next_position();
    let mut derelict = false;
    let mut gravity = Hex::ZERO;

    for (hex, alt) in start.line_with_alternatives(end) {
        let mut tile = &map[hex];

        if tile.is_planet() {
            match alt.filter(|&alt| !map[alt].is_planet()) {
                Some(alt) => {
                    debug!("mob {} skirted planet at {} via {}", id, hex, alt);
                    tile = &map[alt];
                }
                None => {
                    debug!("mob {} crashed into planet at {}", id, hex);
                    end = hex;
                    derelict = true;
                    // Crashing kills all momentum
                    gravity = -mob.velocity();
                    break;
                }
            }
        }

        let collision = tile.occupants().iter().copied().find(|&other_id| {
            other_id != id
                && !(hex == start
                    && unwrap!(
                        mobs.get(&other_id),
                        "mob {} is not in the registry",
                        other_id
                    )
                    .is_fresh())
        });
        if let Some(other_id) = collision {
            debug!("mob {} collided with mob {} at {}", id, other_id, hex);
            derelict = true;
        }

        if hex != start || start == end {
            gravity = apply_gravity(&map[hex], gravity);
            if let Some(alt) = alt {
                gravity = apply_gravity(&map[alt], gravity);
            }
        }
    }

    mob.advance(end, mob.velocity() + gravity, derelict)
}

/// Add the pull of a tile to some accumulated gravity vector. Only gravity
/// wells pull; every other kind of tile returns `gravity` unchanged.
pub fn apply_gravity(tile: &Tile, gravity: Hex) -> Hex {
    match tile.kind() {
        TileKind::Gravity(direction) => gravity.neighbor(direction),
        TileKind::Empty | TileKind::Planet => gravity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::hex::HexDirection;

    /// Build a snapshot from a radius-2 map, with some tiles overridden, and
    /// some mobs placed on it
    fn snapshot(
        tiles: &[(Hex, TileKind)],
        mobs: impl IntoIterator<Item = (MobId, Mob)>,
    ) -> Snapshot {
        let mut map = HexMap::hexagon(2, |_| Tile::default());
        for &(hex, kind) in tiles {
            map = map.set(hex, Tile::new(kind));
        }
        let mobs: MobRegistry = mobs.into_iter().collect();
        for (&id, mob) in &mobs {
            map = map.update(mob.position(), |tile| tile.with_occupant(id));
        }
        Snapshot { map, mobs }
    }

    fn occupants(snapshot: &Snapshot, hex: Hex) -> Vec<MobId> {
        snapshot.map[hex].occupants().iter().copied().collect()
    }

    #[test]
    fn test_apply_gravity() {
        let gravity = Hex::new(1, 0);
        assert_eq!(apply_gravity(&Tile::default(), gravity), gravity);
        assert_eq!(
            apply_gravity(&Tile::new(TileKind::Planet), gravity),
            gravity
        );
        for direction in HexDirection::ALL.iter().copied() {
            assert_eq!(
                apply_gravity(&Tile::new(TileKind::Gravity(direction)), gravity),
                gravity + direction.to_vector()
            );
        }
    }

    #[test]
    fn test_free_flight() {
        let snapshot = snapshot(
            &[],
            vec![(1, Mob::new(Hex::ZERO, Hex::new(2, -1), false))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.history(), &[Hex::ZERO, Hex::new(2, -1)]);
        assert_eq!(mob.velocity(), Hex::new(2, -1));
        assert!(!mob.is_derelict());
    }

    #[test]
    fn test_planet_crash() {
        let snapshot = snapshot(
            &[(Hex::new(1, 0), TileKind::Planet)],
            vec![(1, Mob::new(Hex::ZERO, Hex::new(1, 0), false))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.position(), Hex::new(1, 0));
        assert_eq!(mob.velocity(), Hex::ZERO);
        assert!(mob.is_derelict());
    }

    #[test]
    fn test_planet_crash_stops_short() {
        // Planet is in the middle of the path, so the mob ends there instead
        // of at its intended destination
        let snapshot = snapshot(
            &[(Hex::new(-1, 0), TileKind::Planet)],
            vec![(1, Mob::new(Hex::new(1, 0), Hex::new(-3, 0), false))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.position(), Hex::new(-1, 0));
        assert_eq!(mob.velocity(), Hex::ZERO);
        assert!(mob.is_derelict());
    }

    #[test]
    fn test_gravity_well() {
        let snapshot = snapshot(
            &[(Hex::new(0, 1), TileKind::Gravity(HexDirection::E))],
            vec![(1, Mob::new(Hex::ZERO, Hex::new(0, 1), false))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.position(), Hex::new(0, 1));
        assert_eq!(mob.velocity(), Hex::new(1, 1));
        assert!(!mob.is_derelict());
    }

    #[test]
    fn test_gravity_ignores_start_tile() {
        let snapshot = snapshot(
            &[(Hex::ZERO, TileKind::Gravity(HexDirection::W))],
            vec![(1, Mob::new(Hex::ZERO, Hex::new(1, 0), false))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.velocity(), Hex::new(1, 0));
    }

    #[test]
    fn test_gravity_while_stationary() {
        let snapshot = snapshot(
            &[(Hex::ZERO, TileKind::Gravity(HexDirection::NW))],
            vec![(1, Mob::new(Hex::ZERO, Hex::ZERO, false))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.position(), Hex::ZERO);
        assert_eq!(mob.velocity(), Hex::new(-1, 1));
    }

    #[test]
    fn test_gravity_from_straddled_tiles() {
        // The path (0,0) -> (2,-1) straddles (1,-1) and (1,0). Both pull.
        let snapshot = snapshot(
            &[
                (Hex::new(1, -1), TileKind::Gravity(HexDirection::NE)),
                (Hex::new(1, 0), TileKind::Gravity(HexDirection::NE)),
            ],
            vec![(1, Mob::new(Hex::ZERO, Hex::new(2, -1), false))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.velocity(), Hex::new(2, 1));
    }

    #[test]
    fn test_skirt_planet() {
        // Straddling a planet and an open tile lets the mob slip by
        let snapshot = snapshot(
            &[(Hex::new(1, -1), TileKind::Planet)],
            vec![(1, Mob::new(Hex::ZERO, Hex::new(2, -1), false))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.position(), Hex::new(2, -1));
        assert_eq!(mob.velocity(), Hex::new(2, -1));
        assert!(!mob.is_derelict());
    }

    #[test]
    fn test_skirt_planet_into_occupied_tile() {
        // Slipping past the planet means passing through (1,0), and whoever
        // is sitting there
        let snapshot = snapshot(
            &[(Hex::new(1, -1), TileKind::Planet)],
            vec![
                (1, Mob::new(Hex::ZERO, Hex::new(2, -1), false)),
                (2, Mob::new(Hex::new(1, 0), Hex::ZERO, false)),
            ],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.position(), Hex::new(2, -1));
        assert_eq!(mob.velocity(), Hex::new(2, -1));
        assert!(mob.is_derelict());
    }

    #[test]
    fn test_skirt_planet_ignores_planet_occupants() {
        // Anything on the planet tile is out of the way
        let snapshot = snapshot(
            &[(Hex::new(1, -1), TileKind::Planet)],
            vec![
                (1, Mob::new(Hex::ZERO, Hex::new(2, -1), false)),
                (2, Mob::new(Hex::new(1, -1), Hex::ZERO, true)),
            ],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.position(), Hex::new(2, -1));
        assert!(!mob.is_derelict());
    }

    #[test]
    fn test_straddle_two_planets() {
        let snapshot = snapshot(
            &[
                (Hex::new(1, -1), TileKind::Planet),
                (Hex::new(1, 0), TileKind::Planet),
            ],
            vec![(1, Mob::new(Hex::ZERO, Hex::new(2, -1), false))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.position(), Hex::new(1, -1));
        assert_eq!(mob.velocity(), Hex::ZERO);
        assert!(mob.is_derelict());
    }

    #[test]
    fn test_entity_collision() {
        let snapshot = snapshot(
            &[],
            vec![
                (1, Mob::new(Hex::ZERO, Hex::new(2, 0), false)),
                // Sitting in the middle of mob 1's path
                (2, Mob::new(Hex::new(1, 0), Hex::ZERO, false)),
            ],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert_eq!(mob.position(), Hex::new(2, 0));
        assert!(mob.is_derelict());
        // Mob 2 never left its tile, and mob 1 wasn't on it at the start
        let other = simulate_mob(&snapshot.map, &snapshot.mobs, 2);
        assert!(!other.is_derelict());
    }

    #[test]
    fn test_fresh_spawn_exemption() {
        let launcher = Mob::new(Hex::ZERO, Hex::ZERO, false)
            .advance(Hex::ZERO, Hex::new(1, 0), false);
        let torpedo = Mob::new(Hex::ZERO, Hex::new(0, 1), true);
        let snapshot = snapshot(&[], vec![(1, launcher), (2, torpedo)]);

        // The torpedo was just launched, so the launcher ignores it
        let launcher = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert!(!launcher.is_derelict());
        // The launcher has been around a while, so the torpedo does hit it
        // (not that it matters, it's derelict already)
        let torpedo = simulate_mob(&snapshot.map, &snapshot.mobs, 2);
        assert!(torpedo.is_derelict());
        assert_eq!(torpedo.position(), Hex::new(0, 1));
    }

    #[test]
    fn test_stale_mob_on_start_tile() {
        let a = Mob::new(Hex::ZERO, Hex::new(1, 0), false)
            .advance(Hex::ZERO, Hex::new(1, 0), false);
        let b = Mob::new(Hex::ZERO, Hex::ZERO, false)
            .advance(Hex::ZERO, Hex::ZERO, false);
        let snapshot = snapshot(&[], vec![(1, a), (2, b)]);
        assert!(simulate_mob(&snapshot.map, &snapshot.mobs, 1).is_derelict());
    }

    #[test]
    fn test_derelict_is_sticky() {
        let snapshot = snapshot(
            &[],
            vec![(1, Mob::new(Hex::ZERO, Hex::new(1, 0), true))],
        );
        let mob = simulate_mob(&snapshot.map, &snapshot.mobs, 1);
        assert!(mob.is_derelict());
        assert_eq!(mob.position(), Hex::new(1, 0));
    }

    #[test]
    fn test_simulate_mobs_occupancy() {
        let before = snapshot(
            &[],
            vec![
                (1, Mob::new(Hex::ZERO, Hex::new(1, 0), false)),
                (2, Mob::new(Hex::new(-1, 0), Hex::new(0, 1), false)),
                (3, Mob::new(Hex::new(2, -2), Hex::ZERO, false)),
            ],
        );
        let after = simulate_mobs(&before);

        assert_eq!(after.mob(1).position(), Hex::new(1, 0));
        assert_eq!(after.mob(2).position(), Hex::new(-1, 1));
        assert_eq!(after.mob(3).position(), Hex::new(2, -2));
        assert_eq!(occupants(&after, Hex::ZERO), Vec::<MobId>::new());
        assert_eq!(occupants(&after, Hex::new(-1, 0)), Vec::<MobId>::new());
        assert_eq!(occupants(&after, Hex::new(1, 0)), vec![1]);
        assert_eq!(occupants(&after, Hex::new(-1, 1)), vec![2]);
        assert_eq!(occupants(&after, Hex::new(2, -2)), vec![3]);
        for mob in after.mobs.values() {
            assert_eq!(mob.history().len(), 2);
        }

        // The old snapshot is untouched
        assert_eq!(occupants(&before, Hex::ZERO), vec![1]);
        assert_eq!(occupants(&before, Hex::new(1, 0)), Vec::<MobId>::new());
        assert_eq!(before.mob(1).history().len(), 1);
    }

    #[test]
    fn test_simulate_mobs_arrival_order() {
        // Both mobs land on (1,0); they're listed in ID order
        let before = snapshot(
            &[],
            vec![
                (4, Mob::new(Hex::new(2, 0), Hex::new(-1, 0), false)),
                (7, Mob::new(Hex::ZERO, Hex::new(1, 0), false)),
            ],
        );
        let after = simulate_mobs(&before);
        assert_eq!(occupants(&after, Hex::new(1, 0)), vec![4, 7]);
        // Neither saw the other during the pass
        assert!(!after.mob(4).is_derelict());
        assert!(!after.mob(7).is_derelict());
        // But they do on the next one
        let after = simulate_mobs(&after);
        assert!(after.mob(4).is_derelict());
        assert!(after.mob(7).is_derelict());
    }

    #[test]
    fn test_simulate_mobs_empty() {
        let before = snapshot(&[], vec![]);
        assert_eq!(simulate_mobs(&before), before);
    }

    #[test]
    #[should_panic(expected = "mob 9 is not in the registry")]
    fn test_missing_mob() {
        let snapshot = snapshot(&[], vec![]);
        simulate_mob(&snapshot.map, &snapshot.mobs, 9);
    }

    #[test]
    #[should_panic(expected = "hex (3, 0, -3) is not on the map")]
    fn test_path_off_map() {
        let snapshot = snapshot(
            &[],
            vec![(1, Mob::new(Hex::new(2, 0), Hex::new(1, 0), false))],
        );
        simulate_mob(&snapshot.map, &snapshot.mobs, 1);
    }
}
