//! Snow reveal effect for the flurry terminal toy.
//!
//! Text characters start as snowflakes that drift down and land on their
//! own cells, revealing the text, while background snow piles up along the
//! floor. Once the text is complete the flurry speeds up, dies down, and the
//! simulation ends on its own.
//!
//! The simulation talks to the outside world through two seams: a
//! [`Canvas`] that places and draws entities, and a [`SnowRng`] that supplies
//! every random draw. [`TerminalCanvas`] and [`SeededRng`] are the stock
//! implementations.

mod canvas;
mod color;
mod motion;
mod pile;
mod rng;
mod simulation;
mod spawn;
mod terminal;

pub use canvas::{Canvas, EntityId, Glyph, Look, TextEntity};
pub use color::{Gradient, LandedPalette, lerp_color};
pub use motion::{
    Easing, FallTarget, Particle, ParticleKind, Path, drop_path, fall_path, sway_count,
};
pub use pile::{Landing, MAX_PILE_HEIGHT, PileMap};
pub use rng::{SeededRng, SnowRng};
pub use simulation::{SnowSimulation, Step};
pub use spawn::{Burst, FADE_TICKS, SpawnScheduler};
pub use terminal::TerminalCanvas;
