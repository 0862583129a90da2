//! Scene assembly
//!
//! Walks the game state and turns every live entity into triangle-list
//! vertices in field coordinates. The drawable kinds are a closed set, so
//! dispatch is a plain enum match rather than a trait object per entity.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{Asteroid, Bullet, GameState, Ship};

const OUTLINE_WIDTH: f32 = 2.0;
const BULLET_SEGMENTS: u32 = 8;

/// Ship silhouette in local space, nose along +x
const SHIP_OUTLINE: [Vec2; 4] = [
    Vec2::new(20.0, 0.0),
    Vec2::new(-15.0, 15.0),
    Vec2::new(-5.0, 0.0),
    Vec2::new(-15.0, -15.0),
];

/// A drawable entity borrowed from the game state
pub enum EntityRef<'a> {
    Ship(&'a Ship),
    Asteroid(&'a Asteroid),
    Bullet(&'a Bullet),
}

impl EntityRef<'_> {
    /// Append this entity's vertices. `time_ticks` drives the flame flicker.
    pub fn emit(&self, out: &mut Vec<Vertex>, time_ticks: u64) {
        match self {
            EntityRef::Ship(ship) => emit_ship(out, ship, time_ticks),
            EntityRef::Asteroid(asteroid) => emit_asteroid(out, asteroid),
            EntityRef::Bullet(bullet) => emit_bullet(out, bullet),
        }
    }
}

/// Build the full vertex list for one frame
pub fn build(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(
        64 + state.asteroids.len() * 72 + state.bullets.len() * (BULLET_SEGMENTS as usize * 3),
    );

    for asteroid in &state.asteroids {
        EntityRef::Asteroid(asteroid).emit(&mut out, state.time_ticks);
    }
    for bullet in &state.bullets {
        EntityRef::Bullet(bullet).emit(&mut out, state.time_ticks);
    }
    if !state.game_over() {
        EntityRef::Ship(&state.ship).emit(&mut out, state.time_ticks);
    }

    out
}

/// Clear color for the frame; a faint slow pulse keeps the field from
/// reading as a dead screenshot. Disabled via settings for reduced motion.
pub fn clear_color(time_ticks: u64, flicker: bool) -> [f32; 4] {
    let base = colors::BACKGROUND;
    if !flicker {
        return base;
    }
    let phase = (time_ticks % 240) as f32 / 240.0 * std::f32::consts::TAU;
    let pulse = 0.006 * (1.0 + phase.sin());
    [base[0] + pulse, base[1] + pulse, base[2] + pulse * 2.0, 1.0]
}

fn emit_ship(out: &mut Vec<Vertex>, ship: &Ship, time_ticks: u64) {
    let rot = Vec2::from_angle(ship.angle);
    let transform = |p: Vec2| ship.pos + rot.rotate(p);

    let mut color = colors::SHIP;
    if ship.invincible {
        color[3] = 0.5;
    }

    let outline: Vec<Vec2> = SHIP_OUTLINE.iter().map(|&p| transform(p)).collect();
    shapes::line_loop(out, &outline, OUTLINE_WIDTH, color);

    if ship.thrusting {
        // Flame length jitters with the tick counter
        let len = 14.0 + 4.0 * ((time_ticks % 4) as f32 - 1.5);
        shapes::triangle(
            out,
            transform(Vec2::new(-8.0, 5.0)),
            transform(Vec2::new(-8.0, -5.0)),
            transform(Vec2::new(-8.0 - len, 0.0)),
            colors::SHIP_FLAME,
        );
    }
}

fn emit_asteroid(out: &mut Vec<Vertex>, asteroid: &Asteroid) {
    let rot = Vec2::from_angle(asteroid.angle);
    let outline: Vec<Vec2> = asteroid
        .points
        .iter()
        .map(|&p| asteroid.pos + rot.rotate(p))
        .collect();
    shapes::line_loop(out, &outline, OUTLINE_WIDTH, colors::ASTEROID);
}

fn emit_bullet(out: &mut Vec<Vertex>, bullet: &Bullet) {
    shapes::circle(
        out,
        bullet.pos,
        bullet.radius,
        colors::BULLET,
        BULLET_SEGMENTS,
    );
}
