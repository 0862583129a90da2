//! Discrete simulation events
//!
//! The sim buffers these on `GameState` each tick; the host drains them and
//! forwards to the audio/UI collaborators fire-and-forget. The sim never
//! assumes playback latency or success.

/// One-shot triggers produced by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Engine ignited this tick
    ThrustStarted,
    /// Engine cut this tick
    ThrustStopped,
    /// A bullet was fired
    Shoot,
    /// An asteroid shattered or the ship was hit
    Explosion,
    /// Lives exhausted; the run has ended
    GameOver,
}
