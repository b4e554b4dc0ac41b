//! Particle motion: easing, waypoint paths and fall path construction.

use flurry_core::{Bounds, Coord, VisualState};

use crate::canvas::EntityId;
use crate::rng::SnowRng;

/// Speed jitter applied to every fall path.
pub const SPEED_JITTER: (f64, f64) = (0.7, 1.3);

/// Sideways offset range of a single sway.
pub const SWAY_OFFSET: (i32, i32) = (1, 3);

/// Range of sway counts drawn per particle.
pub const SWAY_COUNT: (i32, i32) = (2, 4);

/// Easing applied to overall path progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    InQuad,
    InOutSine,
}

impl Easing {
    /// Map linear progress in `0.0..=1.0` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::InQuad => t * t,
            Easing::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// A timed walk through waypoints.
///
/// The path is cut into `ceil(distance / speed)` steps; each call to
/// [`Path::advance`] takes one step and returns the cell at the eased
/// progress along the polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Coord>,
    speed: f64,
    easing: Easing,
    length: f64,
    steps: u32,
    step: u32,
}

impl Path {
    /// Build a path through `points`, the first of which is the start.
    pub fn through(points: Vec<Coord>, speed: f64, easing: Easing) -> Self {
        assert!(!points.is_empty(), "a path needs at least one point");
        assert!(speed > 0.0 && speed.is_finite(), "path speed must be positive, got {speed}");

        let length: f64 = points.windows(2).map(|w| distance(w[0], w[1])).sum();
        let steps = ((length / speed).ceil() as u32).max(1);

        Self {
            points,
            speed,
            easing,
            length,
            steps,
            step: 0,
        }
    }

    pub fn start(&self) -> Coord {
        self.points[0]
    }

    /// Final waypoint.
    pub fn destination(&self) -> Coord {
        self.points[self.points.len() - 1]
    }

    /// All points including the start.
    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Number of ticks the path takes from start to finish.
    pub fn total_steps(&self) -> u32 {
        self.steps
    }

    pub fn is_complete(&self) -> bool {
        self.step >= self.steps
    }

    /// Take one step and return the new position.
    pub fn advance(&mut self) -> Coord {
        if self.step < self.steps {
            self.step += 1;
        }
        if self.is_complete() {
            return self.destination();
        }
        let progress = self.easing.apply(f64::from(self.step) / f64::from(self.steps));
        self.point_at(progress * self.length)
    }

    fn point_at(&self, mut travelled: f64) -> Coord {
        for pair in self.points.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let segment = distance(from, to);
            if travelled <= segment {
                let t = if segment > 0.0 { travelled / segment } else { 1.0 };
                return Coord::new(
                    lerp(from.column, to.column, t),
                    lerp(from.row, to.row, t),
                );
            }
            travelled -= segment;
        }
        self.destination()
    }
}

fn distance(a: Coord, b: Coord) -> f64 {
    let dx = f64::from(b.column - a.column);
    let dy = f64::from(b.row - a.row);
    (dx * dx + dy * dy).sqrt()
}

fn lerp(a: i32, b: i32, t: f64) -> i32 {
    (f64::from(a) + f64::from(b - a) * t).round() as i32
}

/// Where a fall path ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallTarget {
    /// A fixed cell, used by text snow.
    Cell(Coord),
    /// The floor, in whatever column the sways drifted to.
    Floor,
}

/// Draw a sway count for a new particle.
pub fn sway_count(rng: &mut impl SnowRng) -> u32 {
    rng.int_inclusive(SWAY_COUNT.0, SWAY_COUNT.1) as u32
}

/// Build a swaying fall path from the top of the canvas.
///
/// The path starts at `origin`'s column on the top row and passes through
/// `sway_count - 1` sway points before reaching the target. Each sway moves
/// the running column 1 to 3 cells, right on even indices and left on odd
/// ones, and is clamped to the canvas. Speed is `base_speed` jittered by
/// [`SPEED_JITTER`].
pub fn fall_path(
    bounds: &Bounds,
    origin: Coord,
    target: FallTarget,
    base_speed: f64,
    sway_count: u32,
    rng: &mut impl SnowRng,
) -> Path {
    let start = Coord::new(bounds.clamp_column(origin.column), bounds.top);
    let end_row = match target {
        FallTarget::Cell(cell) => cell.row,
        FallTarget::Floor => bounds.bottom,
    };
    let fall = f64::from(end_row - bounds.top);

    let mut points = Vec::with_capacity(sway_count as usize + 1);
    points.push(start);

    let mut column = start.column;
    for i in 1..sway_count {
        let progress = f64::from(i) / f64::from(sway_count);
        let row = bounds.top + (fall * progress) as i32;
        let direction = if i % 2 == 0 { 1 } else { -1 };
        column += direction * rng.int_inclusive(SWAY_OFFSET.0, SWAY_OFFSET.1);
        points.push(Coord::new(bounds.clamp_column(column), row));
    }

    points.push(match target {
        FallTarget::Cell(cell) => cell,
        FallTarget::Floor => Coord::new(bounds.clamp_column(column), bounds.bottom),
    });

    let speed = base_speed * rng.float(SPEED_JITTER.0, SPEED_JITTER.1);
    Path::through(points, speed, Easing::InOutSine)
}

/// Straight drop from `from` to the floor, used by the fast-forward cutover.
pub fn drop_path(bounds: &Bounds, from: Coord, speed: f64) -> Path {
    Path::through(
        vec![from, Coord::new(from.column, bounds.bottom)],
        speed,
        Easing::InQuad,
    )
}

/// Which population a particle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Reveals the text by landing on its own cell.
    Text { destination: Coord },
    /// Decorative snow that piles on the floor.
    Background,
}

/// A single snow particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: EntityId,
    pub kind: ParticleKind,
    pub position: Coord,
    pub state: VisualState,
    pub path: Option<Path>,
}

impl Particle {
    /// Text snow headed for `destination`, positioned at the start of `path`.
    pub fn text(id: EntityId, destination: Coord, path: Path) -> Self {
        Self {
            id,
            kind: ParticleKind::Text { destination },
            position: path.start(),
            state: VisualState::Falling,
            path: Some(path),
        }
    }

    /// Background snow positioned at the start of `path`.
    pub fn background(id: EntityId, path: Path) -> Self {
        Self {
            id,
            kind: ParticleKind::Background,
            position: path.start(),
            state: VisualState::Falling,
            path: Some(path),
        }
    }

    pub fn destination(&self) -> Option<Coord> {
        match self.kind {
            ParticleKind::Text { destination } => Some(destination),
            ParticleKind::Background => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ParticleKind::Text { .. })
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    /// Move one step along the active path, dropping it once complete.
    ///
    /// Returns `true` on the tick the path completes.
    pub fn advance(&mut self) -> bool {
        let Some(path) = self.path.as_mut() else {
            return false;
        };
        self.position = path.advance();
        if path.is_complete() {
            self.path = None;
            return true;
        }
        false
    }

    /// Landing check for text snow: a falling text particle without a path
    /// becomes landed. Returns `true` when the transition happens.
    pub fn settle(&mut self) -> bool {
        if self.is_text() && self.path.is_none() && self.state == VisualState::Falling {
            self.state = VisualState::Landed;
            return true;
        }
        false
    }
}
