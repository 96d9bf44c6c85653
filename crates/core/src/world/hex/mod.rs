//! This module holds basic types and data structures related to hexagon grids.
//!
//! ## Coordinate Systems
//!
//! There are two coordinate systems in play:
//!
//! ### Hex Coordinates
//!
//! Hex coordinates define space within the tile grid. We use the [cube
//! coordinate system defined by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube).
//!
//! Each coordinate has three components (`q`, `r`, and `s`). **For any tile
//! coordinate, all three components are integers and `q + r + s = 0`.** Only
//! `q` and `r` are stored; `s` is always derived from the other two, so a
//! [Hex] can never break that rule. Even though the grid is two-dimensional,
//! the third component makes distance, rounding, and line drawing much simpler.
//!
//! Points that fall between tile centers (e.g. samples along a line) are
//! [FractionalHex]es. Those get rounded back to the nearest tile.
//!
//! ### Pixel Coordinates
//!
//! Pixel coordinates are the 2D cartesian space that the grid gets drawn in.
//! In the following diagram, `o` (the layout origin) is the center of the
//! tile `(0, 0, 0)`.
//!
//! +-------------------+
//! |        +y         |
//! |         ^         |
//! |         |         |
//! | -x <----o----> +x |
//! |         |         |
//! |         v         |
//! |        -y         |
//! +-------------------+
//!
//! Direction names ([HexDirection]) assume this orientation, with `+y` up.
//! Converting between the two systems depends on tile size, orientation, and
//! origin. See [crate::layout] for that.

mod data_structure;
mod line;
mod unit;

pub use self::{data_structure::*, line::*, unit::*};
