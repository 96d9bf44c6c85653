//! Line drawing between two tiles. This is what the simulation uses to trace a
//! mob's trajectory, and what a UI would use to preview one.
//!
//! ## Straddling
//!
//! A straight line between two tile centers will sometimes run exactly along
//! the edge between two tiles, or pass exactly through a vertex. At those
//! steps, there's no single "correct" tile, so we report both. We detect this
//! by drawing the line twice, with the endpoints nudged by [EPSILON] in
//! opposite directions. If both nudged lines land on the same tile, the step
//! is unambiguous. If they disagree, the line straddles the two tiles.
//!
//! https://www.redblobgames.com/grids/hexagons/#line-drawing

use crate::{
    util::EPSILON,
    world::hex::{FractionalHex, Hex},
};
use std::iter::{self, FusedIterator};

impl Hex {
    /// Get every tile on the line from this hex to `other`, including both
    /// endpoints. At straddled steps, both tiles are included (the first
    /// candidate, then the alternative). If you need to know which tiles are
    /// alternatives of each other, use [Hex::line_with_alternatives].
    ///
    /// For a line of `n` steps, this yields between `n + 1` and `2n + 1`
    /// tiles. The returned iterator can be cloned to walk the line again.
    pub fn line(self, other: Hex) -> impl Iterator<Item = Hex> + Clone {
        self.line_with_alternatives(other)
            .flat_map(|(hex, alt)| iter::once(hex).chain(alt))
    }

    /// Get every step on the line from this hex to `other`, including both
    /// endpoints. Each step is a tile, plus an alternative tile if the line
    /// straddles two tiles at that step. See the module-level docs for more
    /// info on straddling.
    pub fn line_with_alternatives(self, other: Hex) -> HexLine {
        HexLine::new(self, other)
    }
}

/// An iterator over the steps of a line between two tiles. Created by
/// [Hex::line_with_alternatives]. Yields exactly `distance + 1` items.
#[derive(Clone, Debug)]
pub struct HexLine {
    start: FractionalHex,
    end: FractionalHex,
    /// Number of steps along the line, i.e. the distance between endpoints
    steps: usize,
    /// Index of the next step to yield. Runs from 0 to `steps`, inclusive
    next_step: usize,
}

impl HexLine {
    /// Nudge applied to the endpoints to produce the first candidate. The
    /// second candidate gets the negation. Only q and r are nudged, which
    /// leaves s untouched.
    const NUDGE: FractionalHex = FractionalHex::new(EPSILON, -EPSILON);

    fn new(start: Hex, end: Hex) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            steps: start.distance_to(end),
            next_step: 0,
        }
    }

    /// The number of steps on the line. A line from a tile to itself has 0
    /// steps, but still yields one item.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Get the tile candidate(s) at a particular step along the line
    fn sample(&self, step: usize) -> (Hex, Option<Hex>) {
        // For a zero-length line, the only sample is t=0
        let t = step as f64 / self.steps.max(1) as f64;
        let u = (self.start + Self::NUDGE)
            .lerp(self.end + Self::NUDGE, t)
            .round();
        let v = (self.start - Self::NUDGE)
            .lerp(self.end - Self::NUDGE, t)
            .round();
        if u == v {
            (u, None)
        } else {
            (u, Some(v))
        }
    }
}

impl Iterator for HexLine {
    type Item = (Hex, Option<Hex>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_step > self.steps {
            return None;
        }
        let sample = self.sample(self.next_step);
        self.next_step += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next_step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HexLine {}

impl FusedIterator for HexLine {}
