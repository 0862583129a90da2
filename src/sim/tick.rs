//! Fixed timestep orchestration
//!
//! `tick()` advances the simulation by exactly one 60 Hz step. The host feeds
//! wall-clock frame time into a `FrameClock`, which decides how many whole
//! ticks to run while carrying the remainder so long runs do not drift.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::events::GameEvent;
use super::state::{Asteroid, Bullet, GamePhase, GameState};
use crate::consts::*;
use crate::heading_vec;

/// Raw input snapshot for one tick. All fields are level-triggered booleans
/// straight from the host's key state; edge detection for `fire` lives in
/// the sim, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// Accumulates frame time and releases whole simulation ticks.
///
/// Elapsed time below one tick duration releases zero ticks and mutates
/// nothing; the remainder is carried, never reset.
#[derive(Debug, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `dt` seconds of frame time; returns how many ticks to run now.
    /// Clamped so a long stall cannot trigger a spiral of death.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);
        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    apply_controls(state, input);

    let bounds = state.bounds;
    state.ship.update(&bounds);
    for asteroid in &mut state.asteroids {
        asteroid.update(&bounds);
    }
    for bullet in &mut state.bullets {
        bullet.update(&bounds);
    }
    // Expired bullets go before collision resolution sees them
    state.bullets.retain(|b| b.life > 0);

    collision::resolve(state);

    if state.asteroids.is_empty() && state.phase == GamePhase::Playing {
        state.level += 1;
        generate_wave(state);
        state.ship.set_invincible();
        log::info!("wave cleared, level {} begins", state.level);
    }
}

/// Translate the input snapshot into ship intent and fire bullets on the
/// rising edge of the fire key.
fn apply_controls(state: &mut GameState, input: &TickInput) {
    let ship = &mut state.ship;

    ship.rotation = if input.rotate_left {
        -SHIP_TURN_RATE
    } else if input.rotate_right {
        SHIP_TURN_RATE
    } else {
        0.0
    };

    let was_thrusting = ship.thrusting;
    ship.thrusting = input.thrust;
    if ship.thrusting && !was_thrusting {
        state.events.push(GameEvent::ThrustStarted);
    } else if !ship.thrusting && was_thrusting {
        state.events.push(GameEvent::ThrustStopped);
    }

    if input.fire && !state.fire_latched {
        let nose = state.ship.pos + heading_vec(state.ship.angle) * SHIP_NOSE_OFFSET;
        state.bullets.push(Bullet::new(nose, state.ship.angle));
        state.events.push(GameEvent::Shoot);
    }
    state.fire_latched = input.fire;
}

/// Populate a wave of `level + 4` asteroids at base radius, none near the
/// ship. Placement rejects and resamples up to a bounded retry count, then
/// accepts the last candidate rather than looping forever on tiny fields.
pub fn generate_wave(state: &mut GameState) {
    let count = state.level + WAVE_BASE_COUNT;
    for _ in 0..count {
        let pos = place_clear_of_ship(state);
        let asteroid = Asteroid::new(pos, ASTEROID_BASE_RADIUS, &mut state.rng);
        state.asteroids.push(asteroid);
    }
    log::debug!("spawned wave of {} asteroids for level {}", count, state.level);
}

fn place_clear_of_ship(state: &mut GameState) -> Vec2 {
    let mut pos = random_field_point(state);
    for _ in 0..MAX_PLACEMENT_RETRIES {
        if pos.distance(state.ship.pos) >= SPAWN_EXCLUSION_RADIUS {
            return pos;
        }
        pos = random_field_point(state);
    }
    log::warn!("spawn placement retries exhausted, accepting {pos}");
    pos
}

fn random_field_point(state: &mut GameState) -> Vec2 {
    Vec2::new(
        state.rng.random_range(0.0..state.bounds.width),
        state.rng.random_range(0.0..state.bounds.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FieldBounds;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, FieldBounds::new(800.0, 600.0).unwrap())
    }

    fn fire_input() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    /// Park one motionless rock far from the ship and its line of fire so
    /// wave progression never kicks in mid-test.
    fn add_sentinel_asteroid(state: &mut GameState) {
        let mut a = Asteroid::new(Vec2::new(50.0, 50.0), 8.0, &mut state.rng);
        a.vel = Vec2::ZERO;
        a.rotation = 0.0;
        state.asteroids.push(a);
    }

    #[test]
    fn clock_releases_nothing_below_one_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        // Remainder carries: another 0.6 dt crosses the boundary once
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
        assert_eq!(clock.advance(SIM_DT * 0.8), 0);
    }

    #[test]
    fn clock_is_capped_per_frame() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(10.0), MAX_SUBSTEPS);
    }

    #[test]
    fn sub_tick_elapsed_mutates_nothing() {
        let mut state = new_state(3);
        generate_wave(&mut state);
        let mut clock = FrameClock::new();
        let snapshot_ticks = state.time_ticks;
        let snapshot_pos = state.asteroids[0].pos;

        for _ in 0..clock.advance(SIM_DT * 0.9) {
            tick(&mut state, &TickInput::default());
        }

        assert_eq!(state.time_ticks, snapshot_ticks);
        assert_eq!(state.asteroids[0].pos, snapshot_pos);
    }

    #[test]
    fn first_wave_has_five_asteroids_clear_of_ship() {
        let mut state = new_state(11);
        generate_wave(&mut state);

        assert_eq!(state.level, 1);
        assert_eq!(state.asteroids.len(), 5);
        for a in &state.asteroids {
            assert!(a.pos.distance(state.ship.pos) >= SPAWN_EXCLUSION_RADIUS);
            assert_eq!(a.radius, ASTEROID_BASE_RADIUS);
        }
    }

    #[test]
    fn clearing_a_wave_advances_the_level() {
        let mut state = new_state(5);
        // Leave one tiny asteroid far from the ship and shoot it point-blank
        let mut a = Asteroid::new(Vec2::new(100.0, 100.0), ASTEROID_MIN_SPLIT_RADIUS, &mut state.rng);
        a.vel = Vec2::ZERO;
        state.asteroids.push(a);
        state.bullets.push(Bullet::new(Vec2::new(100.0, 100.0) - Vec2::X * BULLET_SPEED, 0.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.level, 2);
        // New wave: level + 4 = 6 asteroids
        assert_eq!(state.asteroids.len(), 6);
        assert!(state.ship.invincible);
        assert_eq!(state.score, SCORE_PER_ASTEROID);
    }

    #[test]
    fn fire_is_edge_triggered() {
        let mut state = new_state(9);
        add_sentinel_asteroid(&mut state);

        // Holding fire across many ticks produces exactly one bullet
        for _ in 0..5 {
            tick(&mut state, &fire_input());
        }
        assert_eq!(state.bullets.len(), 1);

        // Release, press again: one more
        tick(&mut state, &TickInput::default());
        tick(&mut state, &fire_input());
        assert_eq!(state.bullets.len(), 2);
        let shots = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::Shoot)
            .count();
        assert_eq!(shots, 2);
    }

    #[test]
    fn bullet_expires_after_its_lifetime() {
        let mut state = new_state(13);
        add_sentinel_asteroid(&mut state);
        // The firing tick already ages the bullet once
        tick(&mut state, &fire_input());
        assert_eq!(state.bullets.len(), 1);

        for _ in 1..BULLET_LIFE_TICKS - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.bullets.len(), 1, "bullet should survive 139 ticks");

        tick(&mut state, &TickInput::default());
        assert!(state.bullets.is_empty(), "bullet should expire on tick 140");
    }

    #[test]
    fn thrust_edges_emit_audio_events() {
        let mut state = new_state(17);
        generate_wave(&mut state);

        let thrust = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &thrust);
        tick(&mut state, &thrust);
        tick(&mut state, &TickInput::default());

        let events = state.take_events();
        let starts = events
            .iter()
            .filter(|e| **e == GameEvent::ThrustStarted)
            .count();
        let stops = events
            .iter()
            .filter(|e| **e == GameEvent::ThrustStopped)
            .count();
        assert_eq!(starts, 1);
        assert_eq!(stops, 1);
    }

    #[test]
    fn rotation_follows_input() {
        let mut state = new_state(19);
        generate_wave(&mut state);

        let left = TickInput {
            rotate_left: true,
            ..Default::default()
        };
        let angle_before = state.ship.angle;
        tick(&mut state, &left);
        assert!((state.ship.angle - (angle_before - SHIP_TURN_RATE)).abs() < 1e-6);

        let right = TickInput {
            rotate_right: true,
            ..Default::default()
        };
        let angle_before = state.ship.angle;
        tick(&mut state, &right);
        assert!((state.ship.angle - (angle_before + SHIP_TURN_RATE)).abs() < 1e-6);
    }

    #[test]
    fn game_over_freezes_the_simulation() {
        let mut state = new_state(23);
        state.phase = GamePhase::GameOver;
        let ticks_before = state.time_ticks;

        tick(&mut state, &fire_input());

        assert_eq!(state.time_ticks, ticks_before);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn same_seed_and_inputs_are_deterministic() {
        let mut a = new_state(99);
        let mut b = new_state(99);
        generate_wave(&mut a);
        generate_wave(&mut b);

        let inputs = [
            TickInput {
                thrust: true,
                ..Default::default()
            },
            fire_input(),
            TickInput {
                rotate_left: true,
                thrust: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for input in inputs.iter().cycle().take(240) {
            tick(&mut a, input);
            tick(&mut b, input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.asteroids.len(), b.asteroids.len());
        assert_eq!(a.ship.pos, b.ship.pos);
    }
}
