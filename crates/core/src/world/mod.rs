pub mod hex;
pub mod mob;
pub mod simulate;
pub mod tile;

use crate::{
    layout::{unit::Point, HexLayout},
    timed,
    world::{
        hex::{Hex, HexDirection, HexLine, HexMap},
        mob::{Mob, MobId, MobRegistry},
        simulate::Snapshot,
        tile::{Tile, TileKind},
    },
    GameConfig,
};
use anyhow::{bail, Context};
use derive_more::Display;
use log::{debug, info};
use validator::Validate;

/// A single turn's worth of input from the player. Every command that gets
/// applied successfully advances the game by exactly one simulation pass.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
pub enum Command {
    /// Burn towards a tile. The target has to be within the max thrust
    /// distance of where the ship would otherwise end up.
    #[display(fmt = "thrust towards {}", _0)]
    Thrust(Hex),
    /// Don't change course
    #[display(fmt = "coast")]
    Coast,
    /// Launch a torpedo from the ship's current tile towards a target. The
    /// target has the same range restriction as [Command::Thrust].
    #[display(fmt = "fire torpedo towards {}", _0)]
    FireTorpedo(Hex),
    /// Thrust towards whichever tile contains a pixel
    #[display(fmt = "click at {}", _0)]
    Click(Point),
}

/// A game in progress. Holds the board, every mob on it, and the layout used
/// to translate pixels into tiles. The world advances one pass at a time via
/// [World::apply].
///
/// The player controls a single ship. Torpedoes launched by the player fly on
/// their own after launch; any other mob (e.g. a torpedo that is about to fly
/// off the edge of the map) is removed once its course leaves the map.
#[derive(Clone, Debug)]
pub struct World {
    config: GameConfig,
    layout: HexLayout,
    snapshot: Snapshot,
    player_id: MobId,
    next_id: MobId,
    /// IDs of all torpedoes still on the map, in launch order
    torpedoes: Vec<MobId>,
}

impl World {
    /// Set up a new game from a config. Returns an error if the config is
    /// invalid.
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;
        info!(
            "Initializing world with radius {} and {} planet(s)",
            config.radius,
            config.planets.len()
        );

        let map = timed!("Map initialization", Self::build_map(&config));

        let player_id = 1;
        let start = config.player_start;
        let mut mobs = MobRegistry::new();
        mobs.insert(player_id, Mob::new(start, Hex::ZERO, false));
        let map = map.update(start, |tile| tile.with_occupant(player_id));

        Ok(Self {
            layout: config.layout.to_layout(),
            config,
            snapshot: Snapshot { map, mobs },
            player_id,
            next_id: player_id + 1,
            torpedoes: Vec::new(),
        })
    }

    /// Build the board: empty space, with planets and the gravity wells around
    /// them
    fn build_map(config: &GameConfig) -> HexMap<Tile> {
        let mut map = HexMap::hexagon(config.radius, |_| Tile::default());
        for planet in &config.planets {
            map = map.set(planet.position, Tile::new(TileKind::Planet));
        }

        // Wells go in after all planets are placed, so a well can never
        // overwrite a planet. If two rings overlap, the later planet wins.
        for planet in config.planets.iter().filter(|planet| planet.gravity) {
            for direction in HexDirection::ALL.iter().copied() {
                let neighbor = planet.position.neighbor(direction);
                if map.get(neighbor).map_or(false, |tile| !tile.is_planet()) {
                    // Each well pulls back towards the planet
                    map = map.set(
                        neighbor,
                        Tile::new(TileKind::Gravity(direction.opposite())),
                    );
                }
            }
        }
        map
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// The current state of the board. Clone this if you want to hang onto
    /// it; clones are cheap.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn player_id(&self) -> MobId {
        self.player_id
    }

    pub fn player(&self) -> &Mob {
        self.snapshot.mob(self.player_id)
    }

    /// IDs of torpedoes still in flight, oldest first
    pub fn torpedoes(&self) -> &[MobId] {
        &self.torpedoes
    }

    /// Get a mob by ID, or `None` if it doesn't exist (or doesn't anymore)
    pub fn mob(&self, id: MobId) -> Option<&Mob> {
        self.snapshot.mobs.get(&id)
    }

    /// How far the player can deviate from their current course this turn.
    /// Derelict ships can't deviate at all.
    pub fn max_thrust(&self) -> u32 {
        if self.player().is_derelict() {
            0
        } else {
            self.config.max_thrust
        }
    }

    /// Shift the pixel layout by some offset, e.g. when dragging the view
    pub fn pan(&mut self, offset: Point) {
        self.layout = self.layout.panned(offset);
    }

    /// Get the path from the player's ship to some tile, e.g. to preview a
    /// course before committing to it
    pub fn preview(&self, target: Hex) -> HexLine {
        self.player().position().line_with_alternatives(target)
    }

    /// Apply a command and run one simulation pass. If the command is illegal,
    /// return an error and leave the world untouched.
    ///
    /// The player can never leave the map. If a derelict player ends up on a
    /// course that does, every command is illegal from then on.
    pub fn apply(&mut self, command: Command) -> anyhow::Result<()> {
        let snapshot = match command {
            Command::Thrust(target) => self.thrust(target)?,
            Command::Coast => self.thrust(self.player().next_position())?,
            Command::FireTorpedo(target) => self.fire_torpedo(target)?,
            Command::Click(pixel) => self.click(pixel)?,
        };
        debug!("Applying command: {}", command);

        let snapshot = self.drop_lost_mobs(snapshot);
        self.snapshot = timed!(
            "Simulation pass",
            simulate::simulate_mobs(&snapshot)
        );
        let mobs = &self.snapshot.mobs;
        self.torpedoes.retain(|id| mobs.contains_key(id));
        Ok(())
    }

    /// Make sure a thrust/launch target is within range of the player's
    /// projected position
    fn check_target(&self, target: Hex) -> anyhow::Result<()> {
        let projected = self.player().next_position();
        let max_thrust = self.max_thrust();
        if target.distance_to(projected) > max_thrust as usize {
            bail!(
                "target {} is out of range; must be within {} of {}",
                target,
                max_thrust,
                projected
            );
        }
        Ok(())
    }

    /// Make sure a course stays entirely on the map
    fn check_course(&self, from: Hex, to: Hex) -> anyhow::Result<()> {
        let map = &self.snapshot.map;
        if let Some(hex) = from.line(to).find(|&hex| !map.contains(hex)) {
            bail!("course from {} to {} leaves the map at {}", from, to, hex);
        }
        Ok(())
    }

    fn thrust(&self, target: Hex) -> anyhow::Result<Snapshot> {
        self.check_target(target)?;
        let player = self.player();
        self.check_course(player.position(), target)
            .context("can't thrust")?;

        let mut snapshot = self.snapshot.clone();
        snapshot.mobs.insert(
            self.player_id,
            player.with_velocity(target - player.position()),
        );
        Ok(snapshot)
    }

    fn click(&self, pixel: Point) -> anyhow::Result<Snapshot> {
        let target = self.layout.pixel_to_hex(pixel);
        // Far-off pixels can round to hexes too big to do math on
        if !self.snapshot.map.contains(target) {
            bail!("pixel {} is off the map", pixel);
        }
        self.thrust(target)
    }

    fn fire_torpedo(&mut self, target: Hex) -> anyhow::Result<Snapshot> {
        let player = self.player();
        if player.is_derelict() {
            bail!("derelict ships can't fire torpedoes");
        }
        self.check_target(target)?;
        let position = player.position();
        // The player moves in the same pass as the torpedo
        self.check_course(position, player.next_position())
            .context("can't fire torpedo")?;
        self.check_course(position, target)
            .context("can't fire torpedo")?;

        // Torpedoes have no thrust of their own, so they start derelict
        let id = self.next_id;
        let torpedo = Mob::new(position, target - position, true);
        let mut snapshot = self.snapshot.clone();
        snapshot.mobs.insert(id, torpedo);
        snapshot.map = snapshot
            .map
            .update(position, |tile| tile.with_occupant(id));

        self.next_id += 1;
        self.torpedoes.push(id);
        info!("Launched torpedo {} towards {}", id, target);
        Ok(snapshot)
    }

    /// Remove any non-player mobs whose course this pass would carry them off
    /// the map
    fn drop_lost_mobs(&self, mut snapshot: Snapshot) -> Snapshot {
        let lost: Vec<MobId> = snapshot
            .mobs
            .iter()
            .filter(|&(&id, mob)| {
                id != self.player_id
                    && mob
                        .position()
                        .line(mob.next_position())
                        .any(|hex| !snapshot.map.contains(hex))
            })
            .map(|(&id, _)| id)
            .collect();

        for id in lost {
            if let Some(mob) = snapshot.mobs.remove(&id) {
                info!("Mob {} left the map from {}", id, mob.position());
                snapshot.map = snapshot
                    .map
                    .update(mob.position(), |tile| tile.without_occupant(id));
            }
        }
        snapshot
    }
}
