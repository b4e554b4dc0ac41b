//! Floor accumulation of background snow.

use std::collections::BTreeMap;

use flurry_core::{Coord, VisualState};

use crate::motion::Particle;

/// Tallest stack a single column can hold.
pub const MAX_PILE_HEIGHT: u8 = 5;

/// What happened to a particle handed to [`PileMap::try_land`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Still moving, check again next tick.
    InFlight,
    /// Stacked at the given cell.
    Piled(Coord),
    /// Column was full, particle discarded.
    Removed,
}

/// Per-column stack heights along the floor. Heights only grow.
#[derive(Debug, Clone, Default)]
pub struct PileMap {
    heights: BTreeMap<i32, u8>,
}

impl PileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current height of `column`, zero if nothing landed there yet.
    pub fn height(&self, column: i32) -> u8 {
        self.heights.get(&column).copied().unwrap_or(0)
    }

    /// Columns that have seen at least one landing, with their heights.
    pub fn columns(&self) -> impl Iterator<Item = (i32, u8)> + '_ {
        self.heights.iter().map(|(c, h)| (*c, *h))
    }

    /// Land a background particle that finished its path.
    ///
    /// Particles that still have a path are left untouched. Otherwise the
    /// particle stacks on its column at `floor - height`, or is marked
    /// removed when the column already holds [`MAX_PILE_HEIGHT`].
    pub fn try_land(&mut self, particle: &mut Particle, floor: i32) -> Landing {
        debug_assert!(!particle.is_text(), "text snow never piles");
        if particle.has_path() {
            return Landing::InFlight;
        }

        let column = particle.position.column;
        let height = self.heights.entry(column).or_insert(0);
        assert!(*height <= MAX_PILE_HEIGHT, "column {column} overfilled to {height}");

        if *height < MAX_PILE_HEIGHT {
            let cell = Coord::new(column, floor - i32::from(*height));
            *height += 1;
            particle.position = cell;
            particle.state = VisualState::Piled;
            Landing::Piled(cell)
        } else {
            particle.state = VisualState::Removed;
            Landing::Removed
        }
    }

    /// Run [`PileMap::try_land`] over `active` in order.
    ///
    /// Particles still in flight stay in `active`. Piled and removed ones are
    /// taken out and returned, in their original order, with the outcome.
    pub fn land_all(&mut self, active: &mut Vec<Particle>, floor: i32) -> Vec<(Particle, Landing)> {
        let mut finished = Vec::new();
        let mut still_falling = Vec::with_capacity(active.len());

        for mut particle in active.drain(..) {
            match self.try_land(&mut particle, floor) {
                Landing::InFlight => still_falling.push(particle),
                landing => finished.push((particle, landing)),
            }
        }

        *active = still_falling;
        finished
    }
}
