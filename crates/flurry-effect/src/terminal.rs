//! A [`Canvas`] that composes frames as ratatui lines.

use flurry_core::{Bounds, Coord, VisualState};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::canvas::{Canvas, EntityId, Glyph, Look, TextEntity};

/// Draw order. Text snow sits in front of background snow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Background,
    Text,
}

#[derive(Debug, Clone)]
struct EntityRecord {
    /// Input character for text entities, blank for background snow.
    symbol: char,
    coord: Coord,
    visible: bool,
    state: VisualState,
    look: Look,
    layer: Layer,
}

/// Terminal-sized canvas holding the input text and the snow in play.
///
/// Background records that reach [`VisualState::Removed`] are recycled by the
/// next [`Canvas::add_entity`], so the record list stays as large as the most
/// snow ever on screen at once.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    bounds: Bounds,
    records: Vec<EntityRecord>,
    /// Removed background records free for reuse.
    free: Vec<usize>,
}

impl TerminalCanvas {
    /// An empty canvas of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            bounds: Bounds::from_size(width, height),
            records: Vec::new(),
            free: Vec::new(),
        }
    }

    /// A canvas with `text` centered on it.
    ///
    /// Every non-space character inside the canvas becomes a text entity;
    /// anything that does not fit is clipped.
    pub fn with_text(text: &str, width: u16, height: u16) -> Self {
        let mut canvas = Self::new(width, height);
        let lines: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.replace('\t', "    ").trim_end().chars().collect())
            .collect();

        let text_width = lines.iter().map(Vec::len).max().unwrap_or(0) as i32;
        let text_height = lines.len() as i32;
        let left = canvas.bounds.left + ((canvas.bounds.width() - text_width) / 2).max(0);
        let top = canvas.bounds.top + ((canvas.bounds.height() - text_height) / 2).max(0);

        for (row, line) in lines.iter().enumerate() {
            for (column, &symbol) in line.iter().enumerate() {
                let coord = Coord::new(left + column as i32, top + row as i32);
                if symbol.is_whitespace() || !canvas.bounds.contains(coord) {
                    continue;
                }
                canvas.records.push(EntityRecord {
                    symbol,
                    coord,
                    visible: false,
                    state: VisualState::Falling,
                    look: Look::uniform(Glyph::new(symbol, Color::Reset)),
                    layer: Layer::Text,
                });
            }
        }
        canvas
    }

    /// Entities still in play, text and background.
    pub fn entity_count(&self) -> usize {
        self.records.len() - self.free.len()
    }

    /// What is drawn at `coord`, text taking priority over background.
    pub fn glyph_at(&self, coord: Coord) -> Option<Glyph> {
        self.records
            .iter()
            .filter(|r| r.coord == coord && r.visible)
            .max_by_key(|r| r.layer)
            .and_then(|r| r.look.glyph(r.state))
    }

    /// Position, visibility and state of an entity.
    pub fn entity(&self, id: EntityId) -> Option<(Coord, bool, VisualState)> {
        self.records.get(id.0).map(|r| (r.coord, r.visible, r.state))
    }

    fn record_mut(&mut self, id: EntityId) -> &mut EntityRecord {
        let count = self.records.len();
        self.records
            .get_mut(id.0)
            .unwrap_or_else(|| panic!("unknown entity {} of {count}", id.0))
    }
}

impl Canvas for TerminalCanvas {
    type Frame = Vec<Line<'static>>;

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn entities(&self) -> Vec<TextEntity> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.layer == Layer::Text)
            .map(|(i, r)| TextEntity {
                id: EntityId(i),
                coord: r.coord,
                symbol: r.symbol,
            })
            .collect()
    }

    fn add_entity(&mut self, coord: Coord, look: Look) -> EntityId {
        let record = EntityRecord {
            symbol: ' ',
            coord,
            visible: true,
            state: VisualState::Falling,
            look,
            layer: Layer::Background,
        };
        match self.free.pop() {
            Some(index) => {
                self.records[index] = record;
                EntityId(index)
            }
            None => {
                self.records.push(record);
                EntityId(self.records.len() - 1)
            }
        }
    }

    fn set_look(&mut self, id: EntityId, look: Look) {
        self.record_mut(id).look = look;
    }

    fn place_entity(&mut self, id: EntityId, coord: Coord, visible: bool) {
        let record = self.record_mut(id);
        record.coord = coord;
        record.visible = visible;
    }

    fn set_visual_state(&mut self, id: EntityId, state: VisualState) {
        let record = self.record_mut(id);
        let recycle = state == VisualState::Removed
            && record.state != VisualState::Removed
            && record.layer == Layer::Background;
        record.state = state;
        if recycle {
            record.visible = false;
            self.free.push(id.0);
        }
    }

    fn compose(&mut self) -> Self::Frame {
        let width = self.bounds.width() as usize;
        let height = self.bounds.height() as usize;
        let mut cells: Vec<Option<Glyph>> = vec![None; width * height];

        for layer in [Layer::Background, Layer::Text] {
            for record in self.records.iter().filter(|r| r.layer == layer && r.visible) {
                if !self.bounds.contains(record.coord) {
                    continue;
                }
                if let Some(glyph) = record.look.glyph(record.state) {
                    let x = (record.coord.column - self.bounds.left) as usize;
                    let y = (record.coord.row - self.bounds.top) as usize;
                    cells[y * width + x] = Some(glyph);
                }
            }
        }

        cells
            .chunks(width)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(glyph) => {
                            Span::styled(glyph.symbol.to_string(), Style::new().fg(glyph.color))
                        }
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_text_is_centered_and_skips_spaces() {
        let canvas = TerminalCanvas::with_text("a b\ncd", 7, 4);
        let mut coords: Vec<_> = canvas.entities().iter().map(|e| (e.symbol, e.coord)).collect();
        coords.sort_by_key(|(_, c)| (c.row, c.column));
        assert_eq!(
            coords,
            vec![
                ('a', Coord::new(2, 1)),
                ('b', Coord::new(4, 1)),
                ('c', Coord::new(2, 2)),
                ('d', Coord::new(3, 2)),
            ]
        );
    }

    #[test]
    fn test_oversized_text_is_clipped() {
        let canvas = TerminalCanvas::with_text("abcdef\nghijkl\nmnopqr", 3, 2);
        assert_eq!(canvas.entities().len(), 6);
        for entity in canvas.entities() {
            assert!(canvas.bounds().contains(entity.coord));
        }
    }

    #[test]
    fn test_text_starts_hidden() {
        let mut canvas = TerminalCanvas::with_text("x", 3, 3);
        let frame = canvas.compose();
        assert_eq!(frame.len(), 3);
        assert!(frame.iter().all(|line| line_text(line).trim().is_empty()));
    }

    #[test]
    fn test_compose_draws_states_and_layers() {
        let mut canvas = TerminalCanvas::with_text("x", 3, 3);
        let text_id = canvas.entities()[0].id;
        let falling = Glyph::new('*', Color::White);
        let landed = Glyph::new('x', Color::Green);
        canvas.set_look(text_id, Look { falling, landed });
        canvas.place_entity(text_id, Coord::new(1, 1), true);

        let flake =
            canvas.add_entity(Coord::new(1, 1), Look::uniform(Glyph::new('.', Color::Blue)));
        assert_eq!(canvas.glyph_at(Coord::new(1, 1)), Some(falling));

        canvas.set_visual_state(text_id, VisualState::Landed);
        let frame = canvas.compose();
        assert_eq!(line_text(&frame[1]), " x ");

        canvas.place_entity(flake, Coord::new(0, 2), true);
        canvas.set_visual_state(flake, VisualState::Piled);
        let frame = canvas.compose();
        assert_eq!(line_text(&frame[2]), ".  ");

        canvas.place_entity(flake, Coord::new(0, 2), false);
        canvas.set_visual_state(flake, VisualState::Removed);
        assert_eq!(canvas.glyph_at(Coord::new(0, 2)), None);
        assert_eq!(canvas.entity_count(), 1);
    }

    #[test]
    fn test_removed_flakes_are_recycled() {
        let mut canvas = TerminalCanvas::with_text("x", 4, 4);
        let look = Look::uniform(Glyph::new('*', Color::White));
        let first = canvas.add_entity(Coord::new(0, 0), look);
        let second = canvas.add_entity(Coord::new(1, 0), look);
        assert_eq!(canvas.entity_count(), 3);

        canvas.place_entity(first, Coord::new(0, 3), false);
        canvas.set_visual_state(first, VisualState::Removed);
        canvas.set_visual_state(first, VisualState::Removed);
        assert_eq!(canvas.entity_count(), 2);

        let reused = canvas.add_entity(Coord::new(2, 0), look);
        assert_eq!(reused, first);
        assert_eq!(canvas.entity(reused), Some((Coord::new(2, 0), true, VisualState::Falling)));
        assert_eq!(canvas.entity(second), Some((Coord::new(1, 0), true, VisualState::Falling)));

        let fresh = canvas.add_entity(Coord::new(3, 0), look);
        assert_eq!(fresh, EntityId(3));
        assert_eq!(canvas.entity_count(), 4);
    }

    #[test]
    fn test_off_canvas_entities_are_not_drawn() {
        let mut canvas = TerminalCanvas::new(2, 2);
        canvas.add_entity(Coord::new(5, 5), Look::uniform(Glyph::new('*', Color::White)));
        let frame = canvas.compose();
        assert!(frame.iter().all(|line| line_text(line) == "  "));
    }
}
