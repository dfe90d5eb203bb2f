use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::actor::ActorState;
use crate::clock::{FixedTimestep, RaceClock};
use crate::config::RaceConfig;
use crate::course::Course;
use crate::error::SlopeResult;
use crate::event::{EventLog, RaceEvent, RaceEventKind};
use crate::input::{InputSource, InputState};
use crate::physics;

const MAX_EVENTS: usize = 256;

/// Where the race is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceStatus {
    /// Waiting for the player to start.
    StartScreen,
    /// Ticks are being simulated.
    Racing,
    /// The player reached the finish.
    Finished,
    /// The player hit a solid obstacle.
    Crashed,
}

impl RaceStatus {
    /// Whether the race has ended for the player.
    pub fn is_over(self) -> bool {
        matches!(self, Self::Finished | Self::Crashed)
    }
}

/// Read-only view of a race for renderers.
#[derive(Debug, Clone, Copy)]
pub struct RaceSnapshot<'a> {
    /// The player.
    pub player: ActorState,
    /// The opponent.
    pub ai: ActorState,
    /// The course being raced.
    pub course: &'a Course,
    /// Current status.
    pub status: RaceStatus,
}

/// The top-level race orchestrator.
///
/// Owns the course, both skiers, the clock and the event log. Each tick
/// computes both next states from the same prior snapshot and commits them
/// together.
pub struct Race {
    config: RaceConfig,
    course: Course,
    player: ActorState,
    ai: ActorState,
    status: RaceStatus,
    clock: RaceClock,
    events: EventLog,
    finish_time: Option<f64>,
    opponent_finish_time: Option<f64>,
}

impl std::fmt::Debug for Race {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Race")
            .field("seed", &self.config.seed)
            .field("tick", &self.clock.tick())
            .field("status", &self.status)
            .field("objects", &self.course.len())
            .finish()
    }
}

impl Race {
    /// Validate `config` and generate its course.
    pub fn new(config: RaceConfig) -> SlopeResult<Self> {
        config.validate()?;
        let course = Course::generate(&config.course, &config.physics, config.seed)?;
        Ok(Self::assemble(config, course))
    }

    /// Validate `config` and race on a prebuilt course.
    pub fn with_course(config: RaceConfig, course: Course) -> SlopeResult<Self> {
        config.validate()?;
        Ok(Self::assemble(config, course))
    }

    fn assemble(config: RaceConfig, course: Course) -> Self {
        Self {
            player: ActorState::at(config.player_start_x),
            ai: ActorState::at(config.ai.start_x),
            status: RaceStatus::StartScreen,
            clock: RaceClock::new(),
            events: EventLog::new(MAX_EVENTS),
            finish_time: None,
            opponent_finish_time: None,
            config,
            course,
        }
    }

    /// Leave the start screen. Has no effect in any other status.
    pub fn start(&mut self) {
        if self.status != RaceStatus::StartScreen {
            return;
        }
        self.status = RaceStatus::Racing;
        self.log(RaceEventKind::Started, "The race is on");
        info!(seed = self.config.seed, "race started");
    }

    /// Put both skiers back at the top of the same course and race again.
    pub fn restart(&mut self) {
        self.player = ActorState::at(self.config.player_start_x);
        self.ai = ActorState::at(self.config.ai.start_x);
        self.clock.reset();
        self.finish_time = None;
        self.opponent_finish_time = None;
        self.status = RaceStatus::Racing;
        self.log(RaceEventKind::Restarted, "Back to the top");
        info!(seed = self.config.seed, "race restarted");
    }

    /// Simulate one tick of the configured timestep.
    pub fn tick(&mut self, input: InputState) -> RaceStatus {
        self.tick_with(input, self.config.timestep)
    }

    /// Simulate one tick of `dt` seconds. Only a racing race moves, and a
    /// `dt` that is not a positive finite number is ignored.
    pub fn tick_with(&mut self, input: InputState, dt: f64) -> RaceStatus {
        if self.status != RaceStatus::Racing {
            return self.status;
        }
        if !physics::is_usable_dt(dt) {
            warn!(dt, "ignoring unusable tick length");
            return self.status;
        }

        let step = physics::step(
            &self.player,
            &self.ai,
            &self.course,
            input,
            self.clock.elapsed_secs(),
            dt,
            &self.config,
        );
        self.clock.advance(dt);
        self.player = step.player;
        self.ai = step.ai;

        let time = self.clock.elapsed_secs();
        if self.opponent_finish_time.is_none() && self.ai.y >= self.config.finish_distance {
            self.opponent_finish_time = Some(time);
            self.log(
                RaceEventKind::OpponentFinished { time },
                format!("The opponent crossed the line in {time:.2}s"),
            );
            debug!(time, "opponent finished");
        }

        if let Some(obstacle) = step.hit {
            self.status = RaceStatus::Crashed;
            let (x, y) = (self.player.x, self.player.y);
            self.log(
                RaceEventKind::Crashed {
                    obstacle: obstacle.kind,
                    x,
                    y,
                },
                format!("Crashed into a {} at {y:.0}", obstacle.kind.label()),
            );
            info!(obstacle = obstacle.kind.label(), x, y, "player crashed");
        } else if self.player.y >= self.config.finish_distance {
            self.status = RaceStatus::Finished;
            self.finish_time = Some(time);
            self.log(
                RaceEventKind::Finished { time },
                format!("Finished in {time:.2}s"),
            );
            info!(time, "player finished");
        }
        self.status
    }

    /// Feed `elapsed` wall-clock seconds through `timestep`, simulating
    /// every tick that falls due.
    pub fn advance_by(
        &mut self,
        timestep: &mut FixedTimestep,
        elapsed: f64,
        input: &mut dyn InputSource,
    ) -> RaceStatus {
        let steps = timestep.accumulate(elapsed);
        for _ in 0..steps {
            if self.status != RaceStatus::Racing {
                break;
            }
            let held = input.poll(&self.player, &self.course);
            self.tick_with(held, timestep.step());
        }
        self.status
    }

    /// Start if needed, then tick until the race ends or `max_ticks` pass.
    pub fn run(&mut self, input: &mut dyn InputSource, max_ticks: u64) -> RaceStatus {
        self.start();
        let mut ticks = 0;
        while self.status == RaceStatus::Racing && ticks < max_ticks {
            let held = input.poll(&self.player, &self.course);
            self.tick(held);
            ticks += 1;
        }
        self.status
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> RaceSnapshot<'_> {
        RaceSnapshot {
            player: self.player,
            ai: self.ai,
            course: &self.course,
            status: self.status,
        }
    }

    fn log(&mut self, kind: RaceEventKind, description: impl Into<String>) {
        self.events
            .push(RaceEvent::new(self.clock.tick(), kind, description));
    }

    /// The race configuration.
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// The course being raced.
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// The player skier.
    pub fn player(&self) -> &ActorState {
        &self.player
    }

    /// The opponent skier.
    pub fn ai(&self) -> &ActorState {
        &self.ai
    }

    /// Current status.
    pub fn status(&self) -> RaceStatus {
        self.status
    }

    /// The race clock.
    pub fn clock(&self) -> &RaceClock {
        &self.clock
    }

    /// Events recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Player finish time in seconds, once finished.
    pub fn finish_time(&self) -> Option<f64> {
        self.finish_time
    }

    /// Opponent finish time in seconds, once it has crossed the line.
    pub fn opponent_finish_time(&self) -> Option<f64> {
        self.opponent_finish_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CourseConfig;
    use crate::course::{ObjectKind, WorldObject};
    use crate::input::HeldKeys;

    fn open_course() -> Course {
        Course::default()
    }

    fn short_race() -> RaceConfig {
        RaceConfig::default().with_finish_distance(600.0)
    }

    #[test]
    fn new_race_waits_on_start_screen() {
        let mut race = Race::new(RaceConfig::default()).unwrap();
        assert_eq!(race.status(), RaceStatus::StartScreen);
        assert_eq!(race.player().x, 50.0);
        assert_eq!(race.ai().x, 60.0);

        // Ticking before start changes nothing.
        assert_eq!(race.tick(InputState::right()), RaceStatus::StartScreen);
        assert_eq!(race.clock().tick(), 0);
        assert_eq!(race.player().x, 50.0);

        race.start();
        assert_eq!(race.status(), RaceStatus::Racing);
        assert_eq!(race.events().iter().count(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RaceConfig::default().with_timestep(-1.0);
        assert!(Race::new(config.clone()).is_err());
        assert!(Race::with_course(config, open_course()).is_err());
    }

    #[test]
    fn open_course_finishes() {
        let mut race = Race::with_course(short_race(), open_course()).unwrap();
        let status = race.run(&mut InputState::default(), 10_000);
        assert_eq!(status, RaceStatus::Finished);
        assert!(race.player().y >= 600.0);
        let time = race.finish_time().unwrap();
        assert!((time - race.clock().elapsed_secs()).abs() < 1e-9);
        assert!(matches!(
            race.events().last().map(|e| &e.kind),
            Some(RaceEventKind::Finished { .. })
        ));

        // Finished races are frozen.
        let before = *race.player();
        race.tick(InputState::left());
        assert_eq!(*race.player(), before);
    }

    #[test]
    fn crash_ends_race_until_restart() {
        let tree = WorldObject::new(ObjectKind::Tree, 200.0, 50.0, 60.0, 80.0);
        let mut race = Race::with_course(short_race(), Course::from_objects(vec![tree])).unwrap();
        assert_eq!(race.run(&mut InputState::default(), 10_000), RaceStatus::Crashed);
        assert!(race.player().is_crashed);
        assert_eq!(race.player().speed_x, 0.0);
        assert_eq!(race.player().speed_y, 0.0);

        let frozen = *race.player();
        let tick = race.clock().tick();
        for _ in 0..5 {
            assert_eq!(race.tick(InputState::right().tucked()), RaceStatus::Crashed);
        }
        assert_eq!(*race.player(), frozen);
        assert_eq!(race.clock().tick(), tick);

        race.restart();
        assert_eq!(race.status(), RaceStatus::Racing);
        assert!(!race.player().is_crashed);
        assert_eq!(race.player().y, 0.0);
        assert_eq!(race.clock().tick(), 0);
        assert_eq!(race.course().len(), 1);
        assert!(matches!(
            race.events().last().map(|e| &e.kind),
            Some(RaceEventKind::Restarted)
        ));
    }

    #[test]
    fn coarse_timestep_cannot_skip_tree() {
        let tree = WorldObject::new(ObjectKind::Tree, 200.0, 50.0, 60.0, 80.0);
        let config = short_race().with_timestep(0.5);
        config.validate().unwrap();
        let mut race = Race::with_course(config, Course::from_objects(vec![tree])).unwrap();
        assert_eq!(race.run(&mut InputState::default(), 10_000), RaceStatus::Crashed);
        assert!(race.player().y < 240.0);
        assert!(race.finish_time().is_none());
    }

    #[test]
    fn unusable_tick_length_is_ignored() {
        let mut race = Race::with_course(short_race(), open_course()).unwrap();
        race.start();
        race.tick(InputState::default());
        let before = *race.player();
        for dt in [0.0, -0.1, f64::NAN, f64::NEG_INFINITY] {
            assert_eq!(race.tick_with(InputState::right(), dt), RaceStatus::Racing);
        }
        assert_eq!(*race.player(), before);
        assert_eq!(race.clock().tick(), 1);
        assert!((0.0..=100.0).contains(&race.player().x));
        assert!(race.player().speed_y > 0.0);
    }

    #[test]
    fn steering_around_tree_avoids_crash() {
        let tree = WorldObject::new(ObjectKind::Tree, 200.0, 50.0, 60.0, 80.0);
        let mut race = Race::with_course(short_race(), Course::from_objects(vec![tree])).unwrap();
        let mut keys = HeldKeys::new();
        keys.press(crate::input::Key::Left);
        assert_eq!(race.run(&mut keys, 10_000), RaceStatus::Finished);
    }

    #[test]
    fn opponent_finish_is_recorded() {
        let mut race = Race::with_course(short_race(), open_course()).unwrap();
        race.run(&mut InputState::default(), 10_000);
        // Cruising at 16 the opponent beats an upright player capped at 15.
        assert!(race.opponent_finish_time().is_some());
        assert!(race.opponent_finish_time() <= race.finish_time());
    }

    #[test]
    fn run_respects_tick_limit() {
        let mut race = Race::new(RaceConfig::default()).unwrap();
        assert_eq!(race.run(&mut InputState::default(), 10), RaceStatus::Racing);
        assert_eq!(race.clock().tick(), 10);
    }

    #[test]
    fn advance_by_releases_whole_ticks() {
        let mut race = Race::with_course(short_race(), open_course()).unwrap();
        race.start();
        let mut fixed = FixedTimestep::new(1.0 / 60.0).unwrap();
        race.advance_by(&mut fixed, 0.06, &mut InputState::default());
        assert_eq!(race.clock().tick(), 3);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let config =
            RaceConfig::default().with_course(CourseConfig::default().with_length(1000.0));
        let mut race = Race::new(config).unwrap();
        race.run(&mut InputState::default(), 5);
        let snap = race.snapshot();
        assert_eq!(snap.player, *race.player());
        assert_eq!(snap.ai, *race.ai());
        assert_eq!(snap.status, RaceStatus::Racing);
        assert_eq!(snap.course.len(), race.course().len());
    }
}
