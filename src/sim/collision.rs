//! Collision resolution
//!
//! Plain pairwise proximity tests over small entity counts. Both scans walk
//! in reverse index order so removals never skip or reindex survivors, and
//! each bullet kills at most one asteroid per tick.

use super::events::GameEvent;
use super::state::{Asteroid, GamePhase, GameState};
use crate::consts::*;

/// Resolve all collisions for the current tick
pub fn resolve(state: &mut GameState) {
    resolve_bullet_hits(state);
    resolve_ship_hits(state);
}

/// Bullet vs asteroid: first asteroid within its own radius of the bullet is
/// hit. Splittable parents spawn `min(level + 1, cap)` half-radius children.
fn resolve_bullet_hits(state: &mut GameState) {
    let mut bi = state.bullets.len();
    while bi > 0 {
        bi -= 1;
        let bullet_pos = state.bullets[bi].pos;

        let mut ai = state.asteroids.len();
        while ai > 0 {
            ai -= 1;
            let (hit_pos, hit_radius) = {
                let a = &state.asteroids[ai];
                (a.pos, a.radius)
            };
            if bullet_pos.distance(hit_pos) >= hit_radius {
                continue;
            }

            state.bullets.remove(bi);
            state.asteroids.remove(ai);

            if hit_radius > ASTEROID_MIN_SPLIT_RADIUS {
                let children = (state.level + 1).min(SPLIT_CHILD_CAP);
                for _ in 0..children {
                    let child = Asteroid::new(hit_pos, hit_radius / 2.0, &mut state.rng);
                    state.asteroids.push(child);
                }
            }

            state.score += SCORE_PER_ASTEROID;
            state.events.push(GameEvent::Explosion);
            break;
        }
    }
}

/// Ship vs asteroid: skipped while invincible; at most one life lost per
/// tick. The ship respawns at the field center; the asteroid survives.
fn resolve_ship_hits(state: &mut GameState) {
    if state.ship.invincible {
        return;
    }

    let mut ai = state.asteroids.len();
    while ai > 0 {
        ai -= 1;
        let a = &state.asteroids[ai];
        if state.ship.pos.distance(a.pos) >= a.radius + SHIP_RADIUS {
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::Explosion);
        state.ship.respawn(state.bounds.center());
        state.ship.set_invincible();

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver);
        }
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, FieldBounds};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> GameState {
        GameState::new(7, FieldBounds::new(800.0, 600.0).unwrap())
    }

    fn asteroid_at(pos: Vec2, radius: f32) -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut a = Asteroid::new(pos, radius, &mut rng);
        a.vel = Vec2::ZERO;
        a
    }

    #[test]
    fn bullet_splits_large_asteroid() {
        let mut s = state();
        s.asteroids.push(asteroid_at(Vec2::new(100.0, 100.0), 80.0));
        s.bullets.push(Bullet::new(Vec2::new(100.0, 100.0), 0.0));

        resolve(&mut s);

        // Level 1: min(1 + 1, 4) = 2 children of half radius
        assert_eq!(s.asteroids.len(), 2);
        for a in &s.asteroids {
            assert_eq!(a.radius, 40.0);
            assert_eq!(a.pos, Vec2::new(100.0, 100.0));
        }
        assert!(s.bullets.is_empty());
        assert_eq!(s.score, SCORE_PER_ASTEROID);
        assert!(s.events.contains(&GameEvent::Explosion));
    }

    #[test]
    fn high_level_split_count_is_capped() {
        let mut s = state();
        s.level = 9;
        s.asteroids.push(asteroid_at(Vec2::new(100.0, 100.0), 80.0));
        s.bullets.push(Bullet::new(Vec2::new(100.0, 100.0), 0.0));

        resolve(&mut s);

        assert_eq!(s.asteroids.len(), SPLIT_CHILD_CAP as usize);
    }

    #[test]
    fn small_asteroid_shatters_without_children() {
        let mut s = state();
        s.asteroids
            .push(asteroid_at(Vec2::new(100.0, 100.0), ASTEROID_MIN_SPLIT_RADIUS));
        s.bullets.push(Bullet::new(Vec2::new(100.0, 100.0), 0.0));

        resolve(&mut s);

        assert!(s.asteroids.is_empty());
        assert_eq!(s.score, SCORE_PER_ASTEROID);
    }

    #[test]
    fn bullet_kills_at_most_one_asteroid() {
        let mut s = state();
        s.asteroids.push(asteroid_at(Vec2::new(100.0, 100.0), 30.0));
        s.asteroids.push(asteroid_at(Vec2::new(102.0, 100.0), 30.0));
        s.bullets.push(Bullet::new(Vec2::new(100.0, 100.0), 0.0));

        resolve(&mut s);

        // Both overlapped the bullet; only one dies (plus its children)
        let survivors = s.asteroids.iter().filter(|a| a.radius == 30.0).count();
        assert_eq!(survivors, 1);
        assert_eq!(s.score, SCORE_PER_ASTEROID);
    }

    #[test]
    fn miss_changes_nothing() {
        let mut s = state();
        s.asteroids.push(asteroid_at(Vec2::new(100.0, 100.0), 30.0));
        s.bullets.push(Bullet::new(Vec2::new(500.0, 500.0), 0.0));

        resolve(&mut s);

        assert_eq!(s.asteroids.len(), 1);
        assert_eq!(s.bullets.len(), 1);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn ship_hit_costs_a_life_and_respawns_at_center() {
        let mut s = state();
        s.ship.pos = Vec2::new(100.0, 100.0);
        s.ship.vel = Vec2::new(3.0, -2.0);
        s.ship.angle = 1.0;
        s.asteroids.push(asteroid_at(Vec2::new(110.0, 100.0), 30.0));

        resolve(&mut s);

        assert_eq!(s.lives, STARTING_LIVES - 1);
        assert_eq!(s.ship.pos, s.bounds.center());
        assert_eq!(s.ship.vel, Vec2::ZERO);
        assert_eq!(s.ship.angle, 0.0);
        assert!(s.ship.invincible);
        // The asteroid is not consumed by the crash
        assert_eq!(s.asteroids.len(), 1);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn overlapping_asteroids_cost_one_life_per_tick() {
        let mut s = state();
        s.ship.pos = Vec2::new(100.0, 100.0);
        s.asteroids.push(asteroid_at(Vec2::new(100.0, 100.0), 30.0));
        s.asteroids.push(asteroid_at(Vec2::new(105.0, 100.0), 30.0));

        resolve(&mut s);

        assert_eq!(s.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn invincible_ship_ignores_asteroids() {
        let mut s = state();
        s.ship.pos = Vec2::new(100.0, 100.0);
        s.ship.set_invincible();
        s.asteroids.push(asteroid_at(Vec2::new(100.0, 100.0), 30.0));

        resolve(&mut s);

        assert_eq!(s.lives, STARTING_LIVES);
        assert_eq!(s.ship.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn last_life_triggers_game_over() {
        let mut s = state();
        s.lives = 1;
        s.ship.pos = Vec2::new(100.0, 100.0);
        s.asteroids.push(asteroid_at(Vec2::new(100.0, 100.0), 30.0));

        resolve(&mut s);

        assert_eq!(s.lives, 0);
        assert!(s.game_over());
        assert!(s.events.contains(&GameEvent::GameOver));
    }
}
