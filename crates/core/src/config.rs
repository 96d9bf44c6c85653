use crate::{
    layout::{unit::Point, HexLayout, Orientation},
    world::hex::Hex,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};
use validator::{Validate, ValidationError};

/// Configuration that defines a game: the board and the starting state.
/// Everything that isn't set explicitly falls back to the default, so an
/// empty config file gives you the standard board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_positions"))]
pub struct GameConfig {
    /// Distance from the center of the map to the edge (in tiles). Every tile
    /// within this distance exists, and nothing can exist outside it.
    #[validate(range(min = 0, max = 1000))]
    pub radius: u16,

    /// How far (in tiles) a ship can adjust its course in a single turn. This
    /// applies to thrust as well as torpedo launches.
    pub max_thrust: u32,

    /// Where the player's ship starts. Must be on the map, and not on a
    /// planet.
    pub player_start: Hex,

    /// Controls how tiles map to pixels. Only matters when converting
    /// pixel positions (e.g. mouse clicks) to tiles.
    #[validate]
    pub layout: LayoutConfig,

    /// All the planets on the map. Each one must be on the map.
    pub planets: Vec<PlanetConfig>,
}

/// Configuration for the pixel layout of the map. See [HexLayout].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LayoutConfig {
    pub orientation: OrientationKind,

    /// Scaling factor from hex space to pixel space, on each axis
    #[validate(custom = "validate_size")]
    pub size: Point,

    /// Pixel position of the center of the origin tile
    pub origin: Point,
}

/// Tile shape. See [Orientation].
#[derive(
    Copy, Clone, Debug, Display, EnumString, PartialEq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrientationKind {
    Pointy,
    Flat,
}

/// A single planet on the map.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub position: Hex,

    /// Surround the planet with a ring of gravity wells, each pulling towards
    /// the planet?
    #[serde(default = "default_gravity")]
    pub gravity: bool,
}

impl OrientationKind {
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Pointy => Orientation::POINTY,
            Self::Flat => Orientation::FLAT,
        }
    }
}

impl LayoutConfig {
    /// Build the layout that this config describes
    pub fn to_layout(&self) -> HexLayout {
        HexLayout::new(self.orientation.orientation(), self.size, self.origin)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            radius: 50,
            max_thrust: 1,
            player_start: Hex::ZERO,
            layout: LayoutConfig::default(),
            planets: vec![PlanetConfig {
                position: Hex::new(5, 5),
                gravity: true,
            }],
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: OrientationKind::Pointy,
            size: Point::new(20.0, 20.0),
            origin: Point::new(300.0, 300.0),
        }
    }
}

fn default_gravity() -> bool {
    true
}

fn validation_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn validate_size(size: &Point) -> Result<(), ValidationError> {
    // Also catches NaN
    if size.x > 0.0 && size.y > 0.0 {
        Ok(())
    } else {
        Err(validation_error(
            "size",
            format!("tile size must be positive on both axes, but was {}", size),
        ))
    }
}

/// Make sure everything that gets placed on the map is actually on the map,
/// and that nothing is placed on top of a planet.
fn validate_positions(config: &GameConfig) -> Result<(), ValidationError> {
    let radius = usize::from(config.radius);
    if config.player_start.len() > radius {
        return Err(validation_error(
            "player_start",
            format!(
                "player start {} is outside the map radius {}",
                config.player_start, radius
            ),
        ));
    }
    for planet in &config.planets {
        if planet.position.len() > radius {
            return Err(validation_error(
                "planets",
                format!(
                    "planet {} is outside the map radius {}",
                    planet.position, radius
                ),
            ));
        }
        if planet.position == config.player_start {
            return Err(validation_error(
                "player_start",
                format!("player can't start on planet {}", planet.position),
            ));
        }
    }
    Ok(())
}
