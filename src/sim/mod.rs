//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod events;
pub mod state;
pub mod tick;

pub use events::GameEvent;
pub use state::{Asteroid, Bullet, FieldBounds, FieldError, GamePhase, GameState, Ship};
pub use tick::{FrameClock, TickInput, generate_wave, tick};
