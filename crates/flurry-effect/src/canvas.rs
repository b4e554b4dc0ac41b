//! The rendering substrate the simulation draws through.

use flurry_core::{Bounds, Coord, VisualState};
use ratatui::style::Color;

/// Handle to an entity registered with a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

/// A symbol and its foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub color: Color,
}

impl Glyph {
    pub const fn new(symbol: char, color: Color) -> Self {
        Self { symbol, color }
    }
}

/// How an entity is drawn in each visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Look {
    /// Shown while falling and once piled.
    pub falling: Glyph,
    /// Shown once landed.
    pub landed: Glyph,
}

impl Look {
    /// Same glyph in every state.
    pub const fn uniform(glyph: Glyph) -> Self {
        Self {
            falling: glyph,
            landed: glyph,
        }
    }

    /// Glyph for `state`, or `None` when the entity is not drawn.
    pub fn glyph(&self, state: VisualState) -> Option<Glyph> {
        match state {
            VisualState::Falling | VisualState::Piled => Some(self.falling),
            VisualState::Landed => Some(self.landed),
            VisualState::Removed => None,
        }
    }
}

/// A character of the input text, fixed at its home cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEntity {
    pub id: EntityId,
    pub coord: Coord,
    pub symbol: char,
}

/// Character placement, styling and frame composition.
///
/// Text entities exist before the simulation starts. Background snow is
/// registered on the fly through [`Canvas::add_entity`].
pub trait Canvas {
    /// Whatever one composed frame looks like to the caller.
    type Frame;

    fn bounds(&self) -> Bounds;

    /// The text entities, in no particular order.
    fn entities(&self) -> Vec<TextEntity>;

    /// Register a new background entity, visible at `coord`.
    fn add_entity(&mut self, coord: Coord, look: Look) -> EntityId;

    fn set_look(&mut self, id: EntityId, look: Look);

    fn place_entity(&mut self, id: EntityId, coord: Coord, visible: bool);

    fn set_visual_state(&mut self, id: EntityId, state: VisualState);

    /// Compose the next frame from the current entity states.
    fn compose(&mut self) -> Self::Frame;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_per_state() {
        let falling = Glyph::new('*', Color::White);
        let landed = Glyph::new('A', Color::Red);
        let look = Look { falling, landed };
        assert_eq!(look.glyph(VisualState::Falling), Some(falling));
        assert_eq!(look.glyph(VisualState::Piled), Some(falling));
        assert_eq!(look.glyph(VisualState::Landed), Some(landed));
        assert_eq!(look.glyph(VisualState::Removed), None);
    }
}
