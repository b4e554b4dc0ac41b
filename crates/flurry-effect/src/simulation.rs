//! The per-tick driver tying motion, spawning and piling together.

use std::cmp::Reverse;

use flurry_core::{Bounds, Coord, Phase, ReleaseOrder, SnowSettings, VisualState};

use crate::canvas::{Canvas, Glyph, Look};
use crate::color::LandedPalette;
use crate::motion::{FallTarget, Particle, drop_path, fall_path, sway_count};
use crate::pile::{Landing, PileMap};
use crate::rng::SnowRng;
use crate::spawn::{FADE_SPEED_MULTIPLIER, SpawnScheduler};

/// Outcome of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<F> {
    /// The simulation moved forward and produced a frame.
    Frame(F),
    /// Spawning has stopped and every background flake has settled.
    Finished,
}

/// Snow falling onto text until the whole text is revealed, followed by a
/// short flurry that piles up on the floor and dies down.
///
/// Each call to [`SnowSimulation::tick`] advances exactly one frame:
///
/// 1. release one pending text flake when the release delay allows;
/// 2. once every text flake has landed, switch to fading out and send all
///    in-flight background flakes straight down at high speed;
/// 3. spawn the scheduled background burst;
/// 4. pile or discard background flakes that finished falling;
/// 5. stop if nothing is left to do, otherwise move everything one step and
///    compose a frame.
#[derive(Debug)]
pub struct SnowSimulation<C: Canvas, R: SnowRng> {
    canvas: C,
    rng: R,
    settings: SnowSettings,
    bounds: Bounds,
    scheduler: SpawnScheduler,
    piles: PileMap,
    /// Every text flake, in canvas id order.
    text: Vec<Particle>,
    /// Indices into `text` not yet released, lowest rows first.
    pending: Vec<usize>,
    /// Indices into `text` already released.
    released: Vec<usize>,
    /// Background flakes still falling.
    background: Vec<Particle>,
    /// Background flakes resting on a pile.
    settled: Vec<Particle>,
    removed: usize,
    ticks: u64,
    finished: bool,
}

impl<C: Canvas, R: SnowRng> SnowSimulation<C, R> {
    /// Dress every text entity on `canvas` and queue it for release.
    pub fn new(mut canvas: C, settings: SnowSettings, mut rng: R) -> Self {
        assert!(!settings.snow_symbols.is_empty(), "no snow symbols configured");
        assert!(!settings.snow_colors.is_empty(), "no snow colors configured");
        assert!(
            settings.movement_speed > 0.0,
            "movement speed must be positive, got {}",
            settings.movement_speed
        );

        let bounds = canvas.bounds();
        let mut entities = canvas.entities();
        entities.sort_by_key(|e| e.id);

        let area = Bounds::enclosing(entities.iter().map(|e| e.coord)).unwrap_or(bounds);
        let palette = LandedPalette::new(&settings, area);

        // Dots read as noise on top of the text, so text snow skips them.
        let mut text_symbols: Vec<char> = settings
            .snow_symbols
            .iter()
            .copied()
            .filter(|s| *s != '.')
            .collect();
        if text_symbols.is_empty() {
            text_symbols = settings.snow_symbols.clone();
        }

        let mut text = Vec::with_capacity(entities.len());
        for entity in entities {
            let falling = Glyph::new(
                *rng.choose(&text_symbols),
                *rng.choose(&settings.snow_colors),
            );
            let landed = Glyph::new(entity.symbol, palette.color_for(entity.coord));
            canvas.set_look(entity.id, Look { falling, landed });

            let sways = sway_count(&mut rng);
            let path = fall_path(
                &bounds,
                entity.coord,
                FallTarget::Cell(entity.coord),
                settings.movement_speed,
                sways,
                &mut rng,
            );
            canvas.place_entity(entity.id, path.start(), false);
            canvas.set_visual_state(entity.id, VisualState::Falling);
            text.push(Particle::text(entity.id, entity.coord, path));
        }

        let mut pending: Vec<usize> = (0..text.len()).collect();
        pending.sort_by_key(|&i| Reverse(destination_row(&text[i])));

        log::debug!(
            "built snow simulation: {} text flakes on {}x{} canvas",
            text.len(),
            bounds.width(),
            bounds.height()
        );

        Self {
            canvas,
            rng,
            settings,
            bounds,
            scheduler: SpawnScheduler::new(),
            piles: PileMap::new(),
            text,
            pending,
            released: Vec::new(),
            background: Vec::new(),
            settled: Vec::new(),
            removed: 0,
            ticks: 0,
            finished: false,
        }
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self) -> Step<C::Frame> {
        if self.finished {
            return Step::Finished;
        }

        if !self.pending.is_empty() {
            if self.scheduler.release_text() {
                self.release_text();
            }
        } else if self.scheduler.phase() == Phase::Spawning
            && self.text.iter().all(|p| !p.has_path())
        {
            self.scheduler.begin_fade_out();
            self.fast_forward();
        }

        if let Some(burst) = self.scheduler.background_burst(&mut self.rng) {
            for _ in 0..burst.count {
                self.spawn_background(burst.speed_multiplier);
            }
        }

        self.accumulate();

        if self.scheduler.phase() == Phase::SpawnStopped && self.background.is_empty() {
            log::debug!(
                "snow finished after {} ticks: {} piled, {} removed",
                self.ticks,
                self.settled.len(),
                self.removed
            );
            self.finished = true;
            return Step::Finished;
        }

        self.advance_motion();
        self.ticks += 1;
        Step::Frame(self.canvas.compose())
    }

    fn release_text(&mut self) {
        let choices = match self.settings.release_order {
            ReleaseOrder::Random => self.pending.len(),
            ReleaseOrder::BottomUp => {
                let lowest = destination_row(&self.text[self.pending[0]]);
                self.pending
                    .iter()
                    .take_while(|&&i| destination_row(&self.text[i]) == lowest)
                    .count()
            }
        };
        let index = self.pending.remove(self.rng.index(choices));
        let particle = &self.text[index];
        self.canvas.place_entity(particle.id, particle.position, true);
        self.released.push(index);
    }

    /// Replace every in-flight background path with a fast straight drop.
    fn fast_forward(&mut self) {
        let speed = self.settings.movement_speed * FADE_SPEED_MULTIPLIER;
        let mut replaced = 0;
        for particle in self.background.iter_mut().filter(|p| p.has_path()) {
            particle.path = Some(drop_path(&self.bounds, particle.position, speed));
            replaced += 1;
        }
        log::debug!(
            "text revealed after {} ticks, fast-forwarding {replaced} flakes",
            self.ticks
        );
    }

    fn spawn_background(&mut self, speed_multiplier: f64) {
        let column = self.rng.int_inclusive(self.bounds.left, self.bounds.right);
        let origin = Coord::new(column, self.bounds.top);
        let glyph = Glyph::new(
            *self.rng.choose(&self.settings.snow_symbols),
            *self.rng.choose(&self.settings.snow_colors),
        );
        let sways = sway_count(&mut self.rng);
        let path = fall_path(
            &self.bounds,
            origin,
            FallTarget::Floor,
            self.settings.movement_speed * speed_multiplier,
            sways,
            &mut self.rng,
        );
        let id = self.canvas.add_entity(path.start(), Look::uniform(glyph));
        self.background.push(Particle::background(id, path));
    }

    fn accumulate(&mut self) {
        for (particle, landing) in self.piles.land_all(&mut self.background, self.bounds.bottom) {
            match landing {
                Landing::Piled(cell) => {
                    self.canvas.place_entity(particle.id, cell, true);
                    self.canvas.set_visual_state(particle.id, VisualState::Piled);
                    self.settled.push(particle);
                }
                Landing::Removed => {
                    self.canvas.place_entity(particle.id, particle.position, false);
                    self.canvas.set_visual_state(particle.id, VisualState::Removed);
                    self.removed += 1;
                }
                Landing::InFlight => self.background.push(particle),
            }
        }
    }

    /// Move every released text flake and falling background flake one step,
    /// then land text flakes whose path just ran out.
    fn advance_motion(&mut self) {
        for &index in &self.released {
            let particle = &mut self.text[index];
            if particle.has_path() {
                particle.advance();
                self.canvas.place_entity(particle.id, particle.position, true);
            }
            if particle.settle() {
                self.canvas.set_visual_state(particle.id, VisualState::Landed);
            }
        }

        for particle in self.background.iter_mut().filter(|p| p.has_path()) {
            particle.advance();
            self.canvas.place_entity(particle.id, particle.position, true);
        }

        log::trace!(
            "tick {}: {} pending, {} falling, {} piled",
            self.ticks,
            self.pending.len(),
            self.background.len(),
            self.settled.len()
        );
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Frames produced so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn piles(&self) -> &PileMap {
        &self.piles
    }

    pub fn pile_height(&self, column: i32) -> u8 {
        self.piles.height(column)
    }

    /// All text flakes, released or not.
    pub fn text_particles(&self) -> &[Particle] {
        &self.text
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Background flakes still falling.
    pub fn active_background(&self) -> &[Particle] {
        &self.background
    }

    /// Background flakes resting on a pile.
    pub fn settled(&self) -> &[Particle] {
        &self.settled
    }

    /// Background flakes discarded on full columns.
    pub fn removed_count(&self) -> usize {
        self.removed
    }
}

impl<C: Canvas, R: SnowRng> Iterator for SnowSimulation<C, R> {
    type Item = C::Frame;

    fn next(&mut self) -> Option<Self::Item> {
        match self.tick() {
            Step::Frame(frame) => Some(frame),
            Step::Finished => None,
        }
    }
}

fn destination_row(particle: &Particle) -> i32 {
    particle.destination().map_or(particle.position.row, |d| d.row)
}
