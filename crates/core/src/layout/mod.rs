//! Conversion between hex space and pixel space. See [crate::world::hex] for a
//! description of both coordinate systems.

pub mod unit;

use crate::{
    layout::unit::Point,
    world::hex::{FractionalHex, Hex},
};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

/// sqrt(3), which shows up all over hexagon geometry
const SQRT_3: f64 = 1.7320508075688772;

/// The shape of tiles in a layout. Holds the matrix that maps hex coordinates
/// onto pixel axes, plus its inverse.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Forward matrix (hex -> pixel), row-major: `[f0, f1, f2, f3]`
    pub forward: [f64; 4],
    /// Inverse matrix (pixel -> hex), row-major: `[b0, b1, b2, b3]`
    pub inverse: [f64; 4],
    /// Angle of the first tile corner, in multiples of 60°. Only needed to
    /// draw tile outlines.
    pub start_angle: f64,
}

impl Orientation {
    /// Tiles with a vertex at the top. Rows of tiles run horizontally.
    pub const POINTY: Self = Self {
        forward: [SQRT_3, SQRT_3 / 2.0, 0.0, 3.0 / 2.0],
        inverse: [SQRT_3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0],
        start_angle: 0.5,
    };

    /// Tiles with a flat side at the top. Columns of tiles run vertically.
    pub const FLAT: Self = Self {
        forward: [3.0 / 2.0, 0.0, SQRT_3 / 2.0, SQRT_3],
        inverse: [2.0 / 3.0, 0.0, -1.0 / 3.0, SQRT_3 / 3.0],
        start_angle: 0.0,
    };

    fn forward_matrix(&self) -> Matrix2<f64> {
        let [f0, f1, f2, f3] = self.forward;
        Matrix2::new(f0, f1, f2, f3)
    }

    fn inverse_matrix(&self) -> Matrix2<f64> {
        let [b0, b1, b2, b3] = self.inverse;
        Matrix2::new(b0, b1, b2, b3)
    }
}

/// Maps tiles onto a 2D pixel plane. `size` scales hex space to pixel space
/// independently on each axis, and `origin` is the pixel location of the
/// center of tile `(0, 0, 0)`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    pub orientation: Orientation,
    pub size: Point,
    pub origin: Point,
}

impl HexLayout {
    pub fn new(orientation: Orientation, size: Point, origin: Point) -> Self {
        Self {
            orientation,
            size,
            origin,
        }
    }

    /// Get the pixel position of the center of a tile
    pub fn hex_to_pixel(&self, hex: Hex) -> Point {
        let hex = Vector2::new(hex.q() as f64, hex.r() as f64);
        let unscaled: Point = (self.orientation.forward_matrix() * hex).into();
        unscaled.scale(self.size) + self.origin
    }

    /// Get the tile that contains a pixel. Every pixel maps to _some_ tile,
    /// even if that tile isn't on the map.
    pub fn pixel_to_hex(&self, pixel: Point) -> Hex {
        let unscaled: Vector2<f64> =
            (pixel - self.origin).unscale(self.size).into();
        let hex = self.orientation.inverse_matrix() * unscaled;
        FractionalHex::new(hex.x, hex.y).round()
    }

    /// Get a copy of this layout with the origin shifted by some pixel offset
    pub fn panned(&self, offset: Point) -> Self {
        Self {
            origin: self.origin + offset,
            ..*self
        }
    }
}
