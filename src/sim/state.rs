//! Game state and entity types
//!
//! Velocities and rates are expressed per tick; `tick()` integrates them
//! without a dt factor, matching the fixed 60 Hz timestep.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use super::events::GameEvent;
use crate::consts::*;
use crate::{heading_vec, wrap_coord};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; the host decides what to show and whether to restart
    GameOver,
}

/// Playfield dimensions, supplied by the host at init and fixed thereafter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

/// Rejected field configuration
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("field dimensions must be positive and finite, got {width}x{height}")]
    Invalid { width: f32, height: f32 },
}

impl FieldBounds {
    pub fn new(width: f32, height: f32) -> Result<Self, FieldError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(FieldError::Invalid { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The player's ship. Single instance, owned by `GameState`; collisions
/// respawn it in place rather than destroying it.
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading angle in radians
    pub angle: f32,
    /// Rotation applied per tick (set from input each tick)
    pub rotation: f32,
    pub thrusting: bool,
    pub invincible: bool,
    invincibility_ticks: u32,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            rotation: 0.0,
            thrusting: false,
            invincible: false,
            invincibility_ticks: 0,
        }
    }

    /// Advance one tick: turn, thrust, integrate, wrap, decay
    pub fn update(&mut self, bounds: &FieldBounds) {
        self.angle += self.rotation;
        if self.thrusting {
            self.vel += heading_vec(self.angle) * SHIP_THRUST_ACCEL;
        }
        self.pos += self.vel;

        self.pos.x = wrap_coord(self.pos.x, bounds.width, SHIP_WRAP_MARGIN);
        self.pos.y = wrap_coord(self.pos.y, bounds.height, SHIP_WRAP_MARGIN);

        self.vel *= SHIP_DRAG;

        if self.invincible {
            self.invincibility_ticks = self.invincibility_ticks.saturating_sub(1);
            if self.invincibility_ticks == 0 {
                self.invincible = false;
            }
        }
    }

    /// Grant the post-collision grace period
    pub fn set_invincible(&mut self) {
        self.invincible = true;
        self.invincibility_ticks = INVINCIBILITY_TICKS;
    }

    /// Reset to a spawn point with zero velocity and heading
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.angle = 0.0;
    }
}

/// A drifting rock. Shape is generated once at creation and fixed for its
/// lifetime; only the rotation angle animates.
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub angle: f32,
    /// Spin per tick
    pub rotation: f32,
    /// Silhouette offsets around the center, in local (unrotated) space
    pub points: Vec<Vec2>,
}

impl Asteroid {
    pub fn new(pos: Vec2, radius: f32, rng: &mut Pcg32) -> Self {
        let vel = Vec2::new(
            rng.random_range(-ASTEROID_MAX_SPEED..ASTEROID_MAX_SPEED),
            rng.random_range(-ASTEROID_MAX_SPEED..ASTEROID_MAX_SPEED),
        );
        let rotation = rng.random_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN);
        let points = Self::generate_points(radius, rng);
        Self {
            pos,
            vel,
            radius,
            angle: 0.0,
            rotation,
            points,
        }
    }

    /// Irregular polygon: 8-11 points at even angular spacing, each pushed
    /// radially to a uniform fraction of the base radius
    fn generate_points(radius: f32, rng: &mut Pcg32) -> Vec<Vec2> {
        let count = rng.random_range(ASTEROID_MIN_POINTS..=ASTEROID_MAX_POINTS);
        (0..count)
            .map(|i| {
                let angle = (i as f32 / count as f32) * std::f32::consts::TAU;
                let r = radius * rng.random_range(ASTEROID_SHAPE_MIN..ASTEROID_SHAPE_MAX);
                heading_vec(angle) * r
            })
            .collect()
    }

    /// Advance one tick: drift, spin, wrap using own radius as margin
    pub fn update(&mut self, bounds: &FieldBounds) {
        self.pos += self.vel;
        self.angle += self.rotation;

        self.pos.x = wrap_coord(self.pos.x, bounds.width, self.radius);
        self.pos.y = wrap_coord(self.pos.y, bounds.height, self.radius);
    }
}

/// A ship projectile with a tick-countdown lifetime
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Remaining ticks; the orchestrator drops bullets at zero
    pub life: u32,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: heading_vec(angle) * BULLET_SPEED,
            radius: BULLET_RADIUS,
            life: BULLET_LIFE_TICKS,
        }
    }

    /// Advance one tick: move, age, wrap hard at the field edges
    pub fn update(&mut self, bounds: &FieldBounds) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);

        self.pos.x = wrap_coord(self.pos.x, bounds.width, 0.0);
        self.pos.y = wrap_coord(self.pos.y, bounds.height, 0.0);
    }
}

/// Complete game state, exclusively owned and mutated by the tick loop
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub bounds: FieldBounds,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Current level, 1-based; increments when a wave is cleared
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    /// Discrete triggers for the audio/UI collaborators, drained by the host
    pub events: Vec<GameEvent>,
    /// Edge-detection latch for the level-triggered fire input
    pub(crate) fire_latched: bool,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh run. The host calls `generate_wave` afterwards to
    /// populate the first wave.
    pub fn new(seed: u64, bounds: FieldBounds) -> Self {
        Self {
            seed,
            bounds,
            phase: GamePhase::Playing,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            time_ticks: 0,
            ship: Ship::new(bounds.center()),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            events: Vec::new(),
            fire_latched: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Drain the event buffer for the host's collaborators
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
