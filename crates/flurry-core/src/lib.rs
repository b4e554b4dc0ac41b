//! Core types shared by the flurry crates.

mod geometry;
mod settings;

pub use geometry::{Bounds, Coord};
pub use settings::{GradientDirection, GradientSpec, LandedStyle, ReleaseOrder, SnowSettings};

/// Visual state of a single snow particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    #[default]
    Falling,
    /// Text snow that reached its destination cell.
    Landed,
    /// Background snow stacked on the floor.
    Piled,
    /// Background snow discarded on a full column.
    Removed,
}

/// Global simulation stage. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Phase {
    #[default]
    Spawning,
    FadingOut,
    SpawnStopped,
}

impl Phase {
    /// The phase that follows this one. `SpawnStopped` is terminal.
    pub fn next(self) -> Self {
        match self {
            Phase::Spawning => Phase::FadingOut,
            Phase::FadingOut | Phase::SpawnStopped => Phase::SpawnStopped,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Spawning => "spawning",
            Phase::FadingOut => "fading-out",
            Phase::SpawnStopped => "spawn-stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_progression() {
        assert_eq!(Phase::default(), Phase::Spawning);
        assert_eq!(Phase::Spawning.next(), Phase::FadingOut);
        assert_eq!(Phase::FadingOut.next(), Phase::SpawnStopped);
        assert_eq!(Phase::SpawnStopped.next(), Phase::SpawnStopped);
        assert!(Phase::Spawning < Phase::FadingOut);
        assert!(Phase::FadingOut < Phase::SpawnStopped);
    }
}
