//! Pure per-tick integration for the player and the opponent.
//!
//! Rates in the configs are per reference frame; every function scales
//! them by the number of reference frames in `dt`. A `dt` that is not a
//! positive finite number leaves the skier untouched.

use crate::actor::ActorState;
use crate::config::{AiConfig, PhysicsConfig, REFERENCE_HZ, RaceConfig};
use crate::course::{Course, WorldObject};
use crate::input::InputState;

/// Reference frames covered by `dt` seconds.
pub fn frames(dt: f64) -> f64 {
    dt * REFERENCE_HZ
}

/// Whether `dt` can be integrated.
pub fn is_usable_dt(dt: f64) -> bool {
    dt.is_finite() && dt > 0.0
}

/// Result of advancing the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStep {
    /// The player after the tick.
    pub state: ActorState,
    /// The obstacle hit this tick, if any.
    pub hit: Option<WorldObject>,
}

/// Result of advancing both skiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The player after the tick.
    pub player: ActorState,
    /// The opponent after the tick.
    pub ai: ActorState,
    /// The obstacle the player hit this tick, if any.
    pub hit: Option<WorldObject>,
}

/// Advance both skiers from the same prior snapshot.
///
/// `elapsed` is race time at the start of the tick.
pub fn step(
    player: &ActorState,
    ai: &ActorState,
    course: &Course,
    input: InputState,
    elapsed: f64,
    dt: f64,
    config: &RaceConfig,
) -> Step {
    let PlayerStep { state, hit } = step_player(player, input, course, &config.physics, dt);
    Step {
        player: state,
        ai: step_ai(ai, elapsed, &config.ai, dt),
        hit,
    }
}

/// Advance the player by `dt` seconds. A crashed player does not move.
///
/// Long ticks are split into sub-steps of at most one reference frame and
/// collisions are checked after each, so a coarse timestep cannot carry
/// the player past an obstacle.
pub fn step_player(
    prev: &ActorState,
    input: InputState,
    course: &Course,
    cfg: &PhysicsConfig,
    dt: f64,
) -> PlayerStep {
    if prev.is_crashed || !is_usable_dt(dt) {
        return PlayerStep {
            state: *prev,
            hit: None,
        };
    }

    // Rounding in `dt * 60` must not add a sliver sub-step.
    let substeps = (frames(dt) - 1e-9).ceil().max(1.0);
    let h = dt / substeps;
    let mut state = *prev;
    for _ in 0..substeps as u64 {
        let step = substep_player(&state, input, course, cfg, h);
        if step.hit.is_some() {
            return step;
        }
        state = step.state;
    }
    PlayerStep { state, hit: None }
}

fn substep_player(
    prev: &ActorState,
    input: InputState,
    course: &Course,
    cfg: &PhysicsConfig,
    dt: f64,
) -> PlayerStep {
    let f = frames(dt);
    let mut next = *prev;
    next.is_tucking = input.tuck;

    let (max_speed, accel) = if input.tuck {
        (cfg.tuck_max_speed, cfg.tuck_accel)
    } else {
        (cfg.max_speed, cfg.accel)
    };
    // Releasing tuck above the upright cap keeps the speed.
    if next.speed_y < max_speed {
        next.speed_y = (next.speed_y + accel * f).min(max_speed);
    }

    let steering = if input.tuck {
        cfg.steering * cfg.tuck_steer_factor
    } else {
        cfg.steering
    };
    if input.steer_left {
        next.speed_x -= steering * f;
    }
    if input.steer_right {
        next.speed_x += steering * f;
    }
    next.speed_x *= cfg.friction.powf(f);
    next.x += next.speed_x * f;
    next.y += next.speed_y * f;
    clamp_to_track(&mut next);

    let hit = find_collision(&next, course, cfg);
    if hit.is_some() {
        next.is_crashed = true;
        next.speed_x = 0.0;
        next.speed_y = 0.0;
    }
    PlayerStep { state: next, hit }
}

/// The first solid object overlapping the player, if any.
pub fn find_collision(
    player: &ActorState,
    course: &Course,
    cfg: &PhysicsConfig,
) -> Option<WorldObject> {
    course
        .nearby(player.y, cfg.collision_window)
        .iter()
        .find(|o| o.kind.is_solid() && o.spans(player.y) && (player.x - o.x).abs() < o.reach(cfg))
        .copied()
}

/// Advance the opponent by `dt` seconds. `elapsed` drives the weave.
pub fn step_ai(prev: &ActorState, elapsed: f64, cfg: &AiConfig, dt: f64) -> ActorState {
    if !is_usable_dt(dt) {
        return *prev;
    }
    let f = frames(dt);
    let mut next = *prev;

    if next.speed_y < cfg.target_speed {
        next.speed_y = (next.speed_y + cfg.accel * f).min(cfg.target_speed);
    }

    let target_x = cfg.weave_center + cfg.weave_amplitude * (cfg.weave_rate * elapsed + cfg.phase).sin();
    if next.x < target_x {
        next.speed_x += cfg.steering * f;
    } else if next.x > target_x {
        next.speed_x -= cfg.steering * f;
    }
    next.speed_x *= cfg.friction.powf(f);
    next.x += next.speed_x * f;
    next.y += next.speed_y * f;
    clamp_to_track(&mut next);
    next
}

fn clamp_to_track(actor: &mut ActorState) {
    if actor.x < 0.0 {
        actor.x = 0.0;
        actor.speed_x = 0.0;
    } else if actor.x > 100.0 {
        actor.x = 100.0;
        actor.speed_x = 0.0;
    }
}
