//! Astro Rocks - a wraparound-field Asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, wave progression)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio sound effects (wasm only)
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the classic arcade cadence)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ship tuning - velocities and rates are per tick
    pub const SHIP_TURN_RATE: f32 = 0.05;
    pub const SHIP_THRUST_ACCEL: f32 = 0.1;
    /// Velocity damping applied every tick
    pub const SHIP_DRAG: f32 = 0.99;
    /// Ship collision radius
    pub const SHIP_RADIUS: f32 = 15.0;
    /// Ship wraps this many pixels past the field edge
    pub const SHIP_WRAP_MARGIN: f32 = 20.0;
    /// Bullets spawn this far ahead of the ship center
    pub const SHIP_NOSE_OFFSET: f32 = 20.0;
    /// Post-collision grace period (3 seconds at 60 Hz)
    pub const INVINCIBILITY_TICKS: u32 = 180;
    pub const STARTING_LIVES: u32 = 3;

    /// Bullet tuning
    pub const BULLET_SPEED: f32 = 5.0;
    pub const BULLET_RADIUS: f32 = 2.0;
    pub const BULLET_LIFE_TICKS: u32 = 140;

    /// Asteroid tuning
    pub const ASTEROID_BASE_RADIUS: f32 = 80.0;
    /// Asteroids at or below this radius shatter without spawning children
    pub const ASTEROID_MIN_SPLIT_RADIUS: f32 = 10.0;
    /// Per-axis speed drawn uniformly from [-max, max)
    pub const ASTEROID_MAX_SPEED: f32 = 1.0;
    /// Spin rate drawn uniformly from [-max, max)
    pub const ASTEROID_MAX_SPIN: f32 = 0.01;
    /// Polygon silhouettes have 8 to 11 points
    pub const ASTEROID_MIN_POINTS: u32 = 8;
    pub const ASTEROID_MAX_POINTS: u32 = 11;
    /// Radial perturbation factor range for silhouette points
    pub const ASTEROID_SHAPE_MIN: f32 = 0.7;
    pub const ASTEROID_SHAPE_MAX: f32 = 1.0;

    /// Scoring and waves
    pub const SCORE_PER_ASTEROID: u64 = 10;
    /// Splitting spawns min(level + 1, cap) children
    pub const SPLIT_CHILD_CAP: u32 = 4;
    /// Each wave has level + this many asteroids
    pub const WAVE_BASE_COUNT: u32 = 4;
    /// New asteroids never spawn within this distance of the ship
    pub const SPAWN_EXCLUSION_RADIUS: f32 = 100.0;
    /// Resample cap for spawn placement; past it the constraint is dropped
    pub const MAX_PLACEMENT_RETRIES: u32 = 64;
}

/// Unit vector along a heading angle
#[inline]
pub fn heading_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Toroidal wrap for one axis. A coordinate leaving `[-margin, max + margin]`
/// reappears at the opposite edge. `margin = 0` wraps hard at `0`/`max`.
#[inline]
pub fn wrap_coord(v: f32, max: f32, margin: f32) -> f32 {
    if v < -margin {
        max + margin
    } else if v > max + margin {
        -margin
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn wrap_is_identity_in_range(v in -20.0f32..820.0, margin in 0.0f32..80.0) {
            prop_assume!(v >= -margin && v <= 800.0 + margin);
            prop_assert_eq!(wrap_coord(v, 800.0, margin), v);
        }

        #[test]
        fn wrap_lands_back_in_range(v in -2000.0f32..2000.0, margin in 0.0f32..80.0) {
            let w = wrap_coord(v, 800.0, margin);
            prop_assert!(w >= -margin && w <= 800.0 + margin);
        }
    }

    #[test]
    fn wrap_crosses_to_opposite_edge() {
        assert_eq!(wrap_coord(-21.0, 800.0, 20.0), 820.0);
        assert_eq!(wrap_coord(821.0, 800.0, 20.0), -20.0);
        // Hard wrap (bullets)
        assert_eq!(wrap_coord(-0.5, 800.0, 0.0), 800.0);
        assert_eq!(wrap_coord(800.5, 800.0, 0.0), -0.0);
    }

    #[test]
    fn heading_points_along_angle() {
        let v = heading_vec(0.0);
        assert!((v.x - 1.0).abs() < 1e-6 && v.y.abs() < 1e-6);
        let v = heading_vec(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6 && (v.y - 1.0).abs() < 1e-6);
    }
}
