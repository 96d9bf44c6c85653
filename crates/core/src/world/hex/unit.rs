//! This sub-module contains basic types for units that form the hex coordinate
//! system. See the parent module documentation for more info on the coordinate
//! system.

use crate::util;
use anyhow::{anyhow, bail, Context};
use derive_more::{Add, AddAssign, Display, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::{ops, str::FromStr};
use strum::EnumIter;

/// A whole tile in the hex coordinate system, in cube coordinates.
///
/// See module-level documentation for a description of the hex coordinate
/// system.
///
/// ## Implementation
///
/// Every tile satisfies `q + r + s = 0`, so this struct only stores `q` and
/// `r` and derives `s` as needed. That means the invariant can never be
/// broken, no matter what arithmetic gets done on a hex. It also means
/// component-wise operations (like `Hex * Hex`) only operate on `q` and
/// `r`, and `s` follows from them.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", "self.q()", "self.r()", "self.s()")]
pub struct Hex {
    q: i32,
    r: i32,
}

impl Hex {
    pub const ZERO: Self = Self::new(0, 0);

    /// Largest magnitude any cube component of a checked hex can have. Any
    /// two hexes within this bound can be subtracted (and measured) without
    /// overflowing `i32`.
    pub const MAX_COMPONENT: i32 = i32::MAX / 4;

    /// Construct a new hex with the given q and r. Since q+r+s=0 for all
    /// hexes, we can derive s from q & r.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Like [Hex::new], but returns an error if any of the three cube
    /// components is out of bounds. See [Hex::MAX_COMPONENT]. Use this for
    /// any hex that comes from outside the program.
    pub fn checked_new(q: i32, r: i32) -> anyhow::Result<Self> {
        let s = -i64::from(q) - i64::from(r);
        let max = i64::from(Self::MAX_COMPONENT);
        if [i64::from(q), i64::from(r), s].iter().any(|c| c.abs() > max) {
            bail!(
                "hex component out of bounds in ({}, {}, {}); \
                 must be within ±{}",
                q,
                r,
                s,
                max
            );
        }
        Ok(Self::new(q, r))
    }

    /// Construct a new hex from all three cube components. Returns an error if
    /// the components don't fall on the plane `q + r + s = 0`, or are out of
    /// bounds.
    pub fn new_qrs(q: i32, r: i32, s: i32) -> anyhow::Result<Self> {
        if i64::from(q) + i64::from(r) + i64::from(s) != 0 {
            Err(anyhow!(
                "invalid hex ({}, {}, {}); must be on the plane q+r+s=0",
                q,
                r,
                s
            ))
        } else {
            Self::checked_new(q, r)
        }
    }

    pub const fn q(&self) -> i32 {
        self.q
    }

    pub const fn r(&self) -> i32 {
        self.r
    }

    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// The number of steps between this hex and the origin. Equivalent to
    /// `self.distance_to(Hex::ZERO)`.
    pub fn len(&self) -> usize {
        // https://www.redblobgames.com/grids/hexagons/#distances
        // IMPORTANT: We divide by 2 here because the sum of the absolute
        // components double-counts every step
        (self.q.unsigned_abs() + self.r.unsigned_abs() + self.s().unsigned_abs())
            as usize
            / 2
    }

    /// Calculate the path distance between two hexes, meaning the number of
    /// hops it takes to get from one to the other. 0 if the hexes are equal,
    /// 1 if they are adjacent, 2 if there is 1 tile between them, etc.
    pub fn distance_to(self, other: Hex) -> usize {
        (self - other).len()
    }

    /// Get the hex adjacent to this one in a particular direction
    pub fn neighbor(self, direction: HexDirection) -> Hex {
        self + direction.to_vector()
    }

    /// Get an iterator of all the hexes directly adjacent to this one, in
    /// [HexDirection] order. The iterator will always contain exactly 6
    /// values, and can be cloned to walk it again.
    pub fn neighbors(
        self,
    ) -> impl Iterator<Item = Hex> + ExactSizeIterator + Clone {
        HexDirection::ALL.into_iter().map(move |dir| self.neighbor(dir))
    }

    /// Every hex within `radius` steps of this one, including this one. The
    /// output is a super hexagon with `3r²+3r+1` tiles.
    pub fn spiral(self, radius: u16) -> impl Iterator<Item = Hex> + Clone {
        // If we just do [-r,r] for r as well, then we end up with a diamond
        // pattern instead of a super hexagon
        // https://www.redblobgames.com/grids/hexagons/#range
        let r = radius as i32;
        (-r..=r).flat_map(move |dq| {
            let r_min = (-r).max(-dq - r);
            let r_max = r.min(-dq + r);
            (r_min..=r_max).map(move |dr| self + Hex::new(dq, dr))
        })
    }
}

impl ops::Mul<i32> for Hex {
    type Output = Hex;

    fn mul(self, rhs: i32) -> Self::Output {
        Self::new(self.q * rhs, self.r * rhs)
    }
}

// Component-wise. s gets re-derived, so this isn't the same as multiplying
// all three components
impl ops::Mul<Hex> for Hex {
    type Output = Hex;

    fn mul(self, rhs: Hex) -> Self::Output {
        Self::new(self.q * rhs.q, self.r * rhs.r)
    }
}

/// Parse a hex from either `q,r` or `q,r,s`. Whitespace around each component
/// is ignored, and surrounding parens are optional, so `(1, -1, 0)` works
/// too. That way anything produced by [Display] can be parsed back.
impl FromStr for Hex {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let components = trimmed
            .split(',')
            .map(|component| {
                component.trim().parse::<i32>().with_context(|| {
                    format!("invalid hex component {:?}", component)
                })
            })
            .collect::<anyhow::Result<Vec<i32>>>()
            .with_context(|| format!("error parsing hex {:?}", s))?;
        match components.as_slice() {
            [q, r] => Self::checked_new(*q, *r),
            [q, r, s] => Self::new_qrs(*q, *r, *s),
            _ => bail!("expected 2 or 3 components for hex, got {:?}", s),
        }
    }
}

/// A hex coordinate with float components. This can refer to any point in the
/// hex grid, not just tile centers. Used as an intermediate value when
/// interpolating between tiles or converting from pixel space, and can be
/// rounded back to the tile that contains it with [FractionalHex::round].
#[derive(Copy, Clone, Debug, Default, PartialEq, Display, Add, Sub)]
#[display(fmt = "({}, {}, {})", "self.q", "self.r", "self.s()")]
pub struct FractionalHex {
    pub q: f64,
    pub r: f64,
}

impl FractionalHex {
    pub const fn new(q: f64, r: f64) -> Self {
        Self { q, r }
    }

    pub fn s(&self) -> f64 {
        -self.q - self.r
    }

    /// Linearly interpolate between this hex and another one. Each component
    /// is interpolated separately.
    pub fn lerp(self, other: FractionalHex, t: f64) -> Self {
        Self::new(util::lerp(self.q, other.q, t), util::lerp(self.r, other.r, t))
    }

    /// Round to the tile containing this point. Each component is rounded
    /// individually, then whichever component moved the furthest gets
    /// recomputed from the other two, which puts us back on the plane
    /// `q + r + s = 0`.
    ///
    /// https://www.redblobgames.com/grids/hexagons/#rounding
    pub fn round(self) -> Hex {
        let (q, r, s) = (self.q, self.r, self.s());
        let (qi, ri, si) = (q.round(), r.round(), s.round());
        let q_diff = (qi - q).abs();
        let r_diff = (ri - r).abs();
        let s_diff = (si - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            Hex::new((-ri - si) as i32, ri as i32)
        } else if r_diff > s_diff {
            Hex::new(qi as i32, (-qi - si) as i32)
        } else {
            // s gets derived from q and r
            Hex::new(qi as i32, ri as i32)
        }
    }
}

impl From<Hex> for FractionalHex {
    fn from(hex: Hex) -> Self {
        Self::new(hex.q().into(), hex.r().into())
    }
}

/// The 6 directions in which hexes can line up side-to-side. Each direction
/// points from a tile's center to the center of one of its neighbors. The
/// variant order is fixed: [HexDirection::index] and
/// [HexDirection::from_index] depend on it, and so does anything that
/// iterates over neighbors.
///
/// Names assume "pointy topped" tiles with `+y` pointing up the screen.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HexDirection {
    /// East, `(1, 0)`
    E,
    /// Southeast, `(1, -1)`
    SE,
    /// Southwest, `(0, -1)`
    SW,
    /// West, `(-1, 0)`
    W,
    /// Northwest, `(-1, 1)`
    NW,
    /// Northeast, `(0, 1)`
    NE,
}

impl HexDirection {
    /// All directions, in index order
    pub const ALL: [Self; 6] =
        [Self::E, Self::SE, Self::SW, Self::W, Self::NW, Self::NE];

    /// Get a direction by its index in [Self::ALL]. Returns `None` if the
    /// index is 6 or greater.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Get the index of this direction within [Self::ALL]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the direction that is directly opposite this one
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % Self::ALL.len()]
    }

    /// Get a vector offset that would move a hex one tile in this direction
    pub fn to_vector(self) -> Hex {
        match self {
            Self::E => Hex::new(1, 0),
            Self::SE => Hex::new(1, -1),
            Self::SW => Hex::new(0, -1),
            Self::W => Hex::new(-1, 0),
            Self::NW => Hex::new(-1, 1),
            Self::NE => Hex::new(0, 1),
        }
    }
}
