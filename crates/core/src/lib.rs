//! Triplanetary is a turn-based space navigation game played on a hex grid.
//! Ships move in straight lines according to their velocity, and can only
//! adjust course a little bit each turn. Planets are surrounded by gravity
//! wells that bend the course of anything passing through. This crate
//! contains the core game logic: hex geometry, the pixel layout, the board,
//! and the simulation that moves everything. Presentation is implemented
//! elsewhere.
//!
//! ```
//! use triplanetary::{Command, GameConfig, Hex, World};
//!
//! let mut world = World::new(GameConfig::default()).unwrap();
//! world.apply(Command::Thrust(Hex::new(1, 0))).unwrap();
//! assert_eq!(world.player().position(), Hex::new(1, 0));
//! ```
//!
//! See [GameConfig] for details on how the game can be customized.

mod config;
pub mod layout;
pub mod util;
mod world;

pub use crate::{
    config::{GameConfig, LayoutConfig, OrientationKind, PlanetConfig},
    layout::{unit::Point, HexLayout, Orientation},
    world::{
        hex::{FractionalHex, Hex, HexDirection, HexLine, HexMap},
        mob::{Mob, MobId, MobRegistry},
        simulate::{apply_gravity, simulate_mob, simulate_mobs, Snapshot},
        tile::{Tile, TileKind},
        Command, World,
    },
};
