//! Spawn scheduling across the simulation phases.

use flurry_core::Phase;

use crate::rng::SnowRng;

/// Ticks skipped between text releases.
pub const TEXT_RELEASE_DELAY: u32 = 1;

/// Ticks skipped between background bursts while spawning.
pub const SPAWN_DELAY: u32 = 2;

/// Background particles per burst while spawning.
pub const SPAWN_BURST: (i32, i32) = (3, 6);

/// Ticks skipped between background bursts while fading out.
pub const FADE_DELAY: u32 = 1;

/// Background particles per burst while fading out.
pub const FADE_BURST: (i32, i32) = (5, 10);

/// Speed multiplier for fade-out snow and the cutover drop.
pub const FADE_SPEED_MULTIPLIER: f64 = 5.0;

/// Fade-out ticks before spawning stops for good.
pub const FADE_TICKS: u32 = 100;

/// A batch of background snow to create this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: usize,
    pub speed_multiplier: f64,
}

/// Counters and phase that decide when snow enters the canvas.
///
/// Every delay counter fires when it reads zero and then reloads; on any
/// other tick it counts down by one.
#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    phase: Phase,
    text_delay: u32,
    background_delay: u32,
    fade_ticks: u32,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Fade-out ticks counted so far.
    pub fn fade_ticks(&self) -> u32 {
        self.fade_ticks
    }

    /// Whether a pending text particle may be released this tick.
    ///
    /// Call once per tick while text is still pending.
    pub fn release_text(&mut self) -> bool {
        if self.text_delay == 0 {
            self.text_delay = TEXT_RELEASE_DELAY;
            true
        } else {
            self.text_delay -= 1;
            false
        }
    }

    /// Move from spawning to fading out. Returns `false` if already past it.
    pub fn begin_fade_out(&mut self) -> bool {
        if self.phase != Phase::Spawning {
            return false;
        }
        self.advance_phase();
        true
    }

    /// Decide this tick's background burst, if any.
    pub fn background_burst(&mut self, rng: &mut impl SnowRng) -> Option<Burst> {
        match self.phase {
            Phase::Spawning => self
                .fire(SPAWN_DELAY)
                .then(|| Burst {
                    count: rng.int_inclusive(SPAWN_BURST.0, SPAWN_BURST.1) as usize,
                    speed_multiplier: 1.0,
                }),
            Phase::FadingOut => {
                self.fade_ticks += 1;
                if self.fade_ticks > FADE_TICKS {
                    self.advance_phase();
                    return None;
                }
                self.fire(FADE_DELAY).then(|| Burst {
                    count: rng.int_inclusive(FADE_BURST.0, FADE_BURST.1) as usize,
                    speed_multiplier: FADE_SPEED_MULTIPLIER,
                })
            }
            Phase::SpawnStopped => None,
        }
    }

    fn fire(&mut self, reload: u32) -> bool {
        if self.background_delay == 0 {
            self.background_delay = reload;
            true
        } else {
            self.background_delay -= 1;
            false
        }
    }

    fn advance_phase(&mut self) {
        let next = self.phase.next();
        assert!(next > self.phase, "phase {:?} cannot advance", self.phase);
        log::debug!("phase {} -> {}", self.phase.name(), next.name());
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;

    #[test]
    fn test_text_released_every_other_tick() {
        let mut scheduler = SpawnScheduler::new();
        let released: Vec<bool> = (0..6).map(|_| scheduler.release_text()).collect();
        assert_eq!(released, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn test_spawning_bursts_every_third_tick() {
        let mut rng = SeededRng::from_seed(5);
        let mut scheduler = SpawnScheduler::new();
        let bursts: Vec<Option<Burst>> =
            (0..9).map(|_| scheduler.background_burst(&mut rng)).collect();

        for (tick, burst) in bursts.iter().enumerate() {
            match burst {
                Some(b) => {
                    assert_eq!(tick % 3, 0, "unexpected burst on tick {tick}");
                    assert!((3..=6).contains(&b.count));
                    assert_eq!(b.speed_multiplier, 1.0);
                }
                None => assert_ne!(tick % 3, 0),
            }
        }
        assert_eq!(scheduler.phase(), Phase::Spawning);
    }

    #[test]
    fn test_spawning_burst_sizes_cover_range() {
        let mut rng = SeededRng::from_seed(11);
        let mut scheduler = SpawnScheduler::new();
        let mut seen = [false; 7];
        for _ in 0..600 {
            if let Some(b) = scheduler.background_burst(&mut rng) {
                seen[b.count] = true;
            }
        }
        assert_eq!(seen, [false, false, false, true, true, true, true]);
    }

    #[test]
    fn test_fade_out_then_stop() {
        let mut rng = SeededRng::from_seed(2);
        let mut scheduler = SpawnScheduler::new();
        assert!(scheduler.begin_fade_out());
        assert!(!scheduler.begin_fade_out());
        assert_eq!(scheduler.phase(), Phase::FadingOut);

        let mut bursts = 0;
        for _ in 0..FADE_TICKS {
            if let Some(b) = scheduler.background_burst(&mut rng) {
                assert!((5..=10).contains(&b.count));
                assert_eq!(b.speed_multiplier, FADE_SPEED_MULTIPLIER);
                bursts += 1;
            }
            assert_eq!(scheduler.phase(), Phase::FadingOut);
        }
        assert_eq!(bursts, 50);

        // Tick 101 stops spawning without a burst.
        assert_eq!(scheduler.background_burst(&mut rng), None);
        assert_eq!(scheduler.phase(), Phase::SpawnStopped);
        for _ in 0..10 {
            assert_eq!(scheduler.background_burst(&mut rng), None);
        }
        assert_eq!(scheduler.phase(), Phase::SpawnStopped);
        assert!(!scheduler.begin_fade_out());
    }
}
