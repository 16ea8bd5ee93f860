//! Bird physics, scrolling tubes, and boundary detection.
//!
//! The world is the external collaborator of the learning core: it
//! produces one [`Observation`] per tick, applies the chosen [`Action`]
//! physically, and classifies boundary events. It never reaches into the
//! agent, and the agent never reaches into it.

use std::collections::VecDeque;

use rand::{Rng, rngs::StdRng};

use crate::{
    types::{Action, Observation},
    utils::build_rng,
};

/// Side length of the world, in pixels.
pub const WORLD_SIZE: i32 = 32;

/// Fixed horizontal position of the bird.
const BIRD_X: f64 = 8.0;

/// Half-extent of the bird's square hitbox.
const BIRD_HALF: f64 = 1.0;

/// Downward acceleration per tick.
const GRAVITY: f64 = 0.15;

/// Vertical speed set by a flap (negative is upward).
const FLAP_SPEED: f64 = -1.0;

/// Horizontal scroll speed of the tubes, pixels per tick.
const SCROLL_SPEED: f64 = 0.5;

/// Width of a tube body.
const TUBE_WIDTH: f64 = 4.0;

/// Height of the passage gap.
const TUBE_GAP: f64 = 12.0;

/// Horizontal distance between consecutive tubes.
const TUBE_SPACING: f64 = 20.0;

/// Top of the ground band; touching it ends the flight.
const GROUND_Y: f64 = 30.0;

/// Leading edge of the first tube after a reset.
const FIRST_TUBE_X: f64 = 24.0;

/// Tubes are spawned out to this x so one is always queued offscreen.
const SPAWN_HORIZON: f64 = 64.0;

/// Inclusive range of randomized gap tops.
const GAP_TOP_MIN: i32 = 3;
const GAP_TOP_MAX: i32 = 14;

/// Result of advancing the world by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The episode continues.
    Running,
    /// The tracked tube index flipped without a collision.
    Passed,
    /// The bird hit a tube or the ground.
    Crashed,
}

#[derive(Debug, Clone)]
struct Tube {
    id: u64,
    x: f64,
    gap_top: f64,
}

impl Tube {
    fn gap_center(&self) -> f64 {
        self.gap_top + TUBE_GAP / 2.0
    }

    fn passed_by(&self, bird_x: f64) -> bool {
        self.x + TUBE_WIDTH < bird_x - BIRD_HALF
    }
}

/// The 32×32 game world.
#[derive(Debug, Clone)]
pub struct World {
    bird_y: f64,
    bird_speed: f64,
    tubes: VecDeque<Tube>,
    next_tube_id: u64,
    tubes_cleared: u64,
    rng: StdRng,
}

impl World {
    /// Create a world, seeded when a seed is supplied.
    pub fn new(seed: Option<u64>) -> Self {
        let mut world = Self {
            bird_y: 0.0,
            bird_speed: 0.0,
            tubes: VecDeque::new(),
            next_tube_id: 0,
            tubes_cleared: 0,
            rng: build_rng(seed),
        };
        world.reset();
        world
    }

    /// Start a fresh flight after a crash.
    ///
    /// The RNG keeps advancing, so consecutive flights see different
    /// tube layouts while the whole run stays reproducible under a seed.
    pub fn reset(&mut self) {
        self.bird_y = (WORLD_SIZE / 2) as f64;
        self.bird_speed = 0.0;
        self.tubes.clear();
        self.tubes_cleared = 0;
        self.spawn_tubes();
    }

    /// The raw readout the agent consumes this tick.
    ///
    /// `deviation` is positive when the bird sits above the gap center
    /// of the targeted tube.
    pub fn observation(&self) -> Observation {
        let target = self.target();
        Observation {
            vertical_speed: self.bird_speed,
            tube_distance: (target.x - BIRD_X).round() as i32,
            deviation: (target.gap_center() - self.bird_y).round() as i32,
        }
    }

    /// Advance one tick with the chosen action.
    pub fn step(&mut self, action: Action) -> TickOutcome {
        match action {
            Action::Jump => self.bird_speed = FLAP_SPEED,
            Action::Stay => {}
        }
        self.bird_speed += GRAVITY;
        self.bird_y += self.bird_speed;

        // The ceiling clamps rather than kills; only tubes and the
        // ground end a flight.
        if self.bird_y < BIRD_HALF {
            self.bird_y = BIRD_HALF;
            self.bird_speed = 0.0;
        }

        let target_before = self.target().id;

        for tube in &mut self.tubes {
            tube.x -= SCROLL_SPEED;
        }
        self.tubes.retain(|tube| tube.x + TUBE_WIDTH > 0.0);
        self.spawn_tubes();

        if self.collides() {
            return TickOutcome::Crashed;
        }

        if self.target().id != target_before {
            self.tubes_cleared += 1;
            return TickOutcome::Passed;
        }

        TickOutcome::Running
    }

    /// Tubes cleared in the current flight.
    pub fn tubes_cleared(&self) -> u64 {
        self.tubes_cleared
    }

    /// The tube whose passage the bird is currently negotiating.
    fn target(&self) -> &Tube {
        self.tubes
            .iter()
            .find(|tube| !tube.passed_by(BIRD_X))
            .expect("spawn_tubes keeps a target queued")
    }

    fn spawn_tubes(&mut self) {
        while self.tubes.back().is_none_or(|tube| tube.x < SPAWN_HORIZON) {
            let x = self
                .tubes
                .back()
                .map_or(FIRST_TUBE_X, |tube| tube.x + TUBE_SPACING);
            let gap_top = self.rng.random_range(GAP_TOP_MIN..=GAP_TOP_MAX) as f64;
            self.tubes.push_back(Tube {
                id: self.next_tube_id,
                x,
                gap_top,
            });
            self.next_tube_id += 1;
        }
    }

    fn collides(&self) -> bool {
        if self.bird_y + BIRD_HALF >= GROUND_Y {
            return true;
        }
        self.tubes.iter().any(|tube| {
            let overlaps_x =
                BIRD_X + BIRD_HALF > tube.x && BIRD_X - BIRD_HALF < tube.x + TUBE_WIDTH;
            let inside_gap = self.bird_y - BIRD_HALF >= tube.gap_top
                && self.bird_y + BIRD_HALF <= tube.gap_top + TUBE_GAP;
            overlaps_x && !inside_gap
        })
    }
}
