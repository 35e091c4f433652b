//! Scenario execution engine

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::aim::PointerSource;
use crate::course::Course;
use crate::events::{EventBus, EventLogConfig};
use crate::game::{
    AngleKey, GolfGame, GolfInput, GolfPlugin, Notice, PointerEvent, ShotSampler,
};
use crate::settings::GolfSettings;
use crate::swing::{FixedSampler, RandomSampler, SampleOrigin};

use super::assertions::{AssertionError, CapturedEvent, WorldState, check_sequence, check_state};
use super::parser::{ScenarioDefinition, Step};

/// Result of running a scenario
#[derive(Debug)]
pub enum ScenarioResult {
    Pass { frames: u64 },
    /// `state` is the game as it stood on the failing frame
    Fail {
        error: AssertionError,
        frame: u64,
        state: Box<WorldState>,
    },
    Error { message: String },
}

impl ScenarioResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, ScenarioResult::Pass { .. })
    }
}

/// "mouse", "pointer", "touch" or "touch:ID"
pub fn parse_source(name: &str) -> Result<PointerSource, String> {
    match name.trim() {
        "mouse" => Ok(PointerSource::Mouse),
        "pointer" => Ok(PointerSource::Pointer),
        "touch" => Ok(PointerSource::Touch(0)),
        other => other
            .strip_prefix("touch:")
            .and_then(|id| id.parse().ok())
            .map(PointerSource::Touch)
            .ok_or_else(|| format!("Unknown pointer source '{}'", other)),
    }
}

/// Settings equivalent of a scenario setup block
pub fn scenario_settings(scenario: &ScenarioDefinition) -> GolfSettings {
    let setup = &scenario.setup;
    let mut settings = GolfSettings {
        aim_mode: setup.aim,
        starting_club: setup.club,
        seed: setup.seed,
        motion: setup.motion.clone(),
        ..Default::default()
    };
    if let Some(margin) = setup.margin {
        settings.activation_margin = margin;
    }
    if let Some(frames) = setup.frames {
        settings.frame_count = frames;
    }
    settings.validated()
}

/// Headless app for a scenario: MinimalPlugins plus the game plugin
pub fn build_scenario_app(scenario: &ScenarioDefinition) -> App {
    let setup = &scenario.setup;
    let settings = scenario_settings(scenario);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(
        GolfPlugin::new(settings.clone()).with_course(Course::new(setup.width, setup.height)),
    );

    let sampler = match setup.strength {
        Some(strength) => ShotSampler::new(FixedSampler::new(strength, setup.deviation)),
        None => ShotSampler::new(
            RandomSampler::seeded(setup.seed.unwrap_or(0))
                .with_ranges(settings.strength_range, settings.deviation_range),
        ),
    };
    app.insert_resource(sampler);
    app.insert_resource(EventLogConfig {
        enabled: true,
        keep_history: true,
    });
    app
}

/// Queue one input step into the buffer
fn queue_step(input: &mut GolfInput, step: &Step) -> Result<(), String> {
    match step {
        Step::PointerDown { x, y, source } => {
            input.push_pointer(PointerEvent::start(parse_source(source)?, DVec2::new(*x, *y)));
        }
        Step::PointerMove { x, y, source } => {
            input.push_pointer(PointerEvent::moved(parse_source(source)?, DVec2::new(*x, *y)));
        }
        Step::PointerUp { x, y, source } => {
            input.push_pointer(PointerEvent::end(parse_source(source)?, DVec2::new(*x, *y)));
        }
        Step::TypeAngle { text } => input.angle_keys.extend(text.chars().map(AngleKey::Char)),
        Step::Backspace { count } => {
            input.angle_keys.extend((0..*count).map(|_| AngleKey::Backspace));
        }
        Step::Swing => input.swing_pressed = true,
        Step::CycleClub => input.cycle_club_pressed = true,
        Step::SelectClub { club } => input.select_club = Some(*club),
        Step::Dismiss => input.dismiss_pressed = true,
        Step::Advance { .. } => {}
    }
    Ok(())
}

/// Snapshot of the game for state checks
pub fn capture_world_state(world: &World) -> WorldState {
    let game = world.resource::<GolfGame>();
    let notice = world.resource::<Notice>();
    let ball = game.ball_position();
    let shot = game.last_shot();

    WorldState {
        ball_x: ball.x,
        ball_y: ball.y,
        swing_in_progress: game.swing_in_progress(),
        swing_enabled: game.swing_enabled(),
        aim_angle: game.aim().base_angle(),
        aim_drawing: game.aim().is_drawing(),
        aim_line: game.aim().line_end().is_some(),
        notice: notice.is_visible(),
        club: game.club().name().to_string(),
        prompt: game.prompt().to_string(),
        motion_permission: game.motion().permission().to_string(),
        shot_distance: shot.map(|s| s.distance),
        shot_final_angle: shot.map(|s| s.final_angle),
        shot_strength: shot.map(|s| s.strength),
        shot_motion: shot.map(|s| s.sample_origin == SampleOrigin::Motion),
    }
}

/// Steps through a scenario one frame at a time
struct ScenarioRun {
    app: App,
    frame: u64,
    events_seen: usize,
    captured: Vec<CapturedEvent>,
    checks: Vec<super::parser::StateAssertion>,
    next_check: usize,
}

impl ScenarioRun {
    fn new(scenario: &ScenarioDefinition) -> Self {
        let mut checks = scenario.expect.state.clone();
        checks.sort_by_key(|c| c.after_frame);
        Self {
            app: build_scenario_app(scenario),
            frame: 0,
            events_seen: 0,
            captured: Vec::new(),
            checks,
            next_check: 0,
        }
    }

    /// Run one frame, collect its events and evaluate checks due by now
    fn step(&mut self) -> Result<(), AssertionError> {
        self.app.update();
        self.frame += 1;

        let processed = self.app.world().resource::<EventBus>().processed();
        for bus_event in &processed[self.events_seen..] {
            self.captured
                .push(CapturedEvent::from_golf_event(self.frame, &bus_event.event));
        }
        self.events_seen = processed.len();

        while let Some(check) = self.checks.get(self.next_check) {
            if check.after_frame > self.frame {
                break;
            }
            let state = capture_world_state(self.app.world());
            check_state(check, &state)?;
            self.next_check += 1;
        }
        Ok(())
    }

    fn fail(&self, error: AssertionError) -> ScenarioResult {
        ScenarioResult::Fail {
            error,
            frame: self.frame,
            state: Box::new(capture_world_state(self.app.world())),
        }
    }

    fn last_check_frame(&self) -> u64 {
        self.checks.last().map(|c| c.after_frame).unwrap_or(0)
    }
}

/// Run a single scenario and return the result
pub fn run_scenario(scenario: &ScenarioDefinition) -> ScenarioResult {
    let mut run = ScenarioRun::new(scenario);

    for step in &scenario.steps {
        let frames = match step {
            Step::Advance { frames } => *frames,
            other => {
                let mut input = run.app.world_mut().resource_mut::<GolfInput>();
                if let Err(message) = queue_step(&mut input, other) {
                    return ScenarioResult::Error { message };
                }
                1
            }
        };
        for _ in 0..frames {
            if let Err(error) = run.step() {
                return run.fail(error);
            }
        }
    }

    // Idle until every state check has run
    while run.frame < run.last_check_frame() {
        if let Err(error) = run.step() {
            return run.fail(error);
        }
    }

    if let Err(error) = check_sequence(&scenario.expect.sequence, &run.captured) {
        return run.fail(error);
    }

    ScenarioResult::Pass { frames: run.frame }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::parser::parse_scenario;

    #[test]
    fn test_parse_source() {
        assert_eq!(parse_source("mouse"), Ok(PointerSource::Mouse));
        assert_eq!(parse_source("touch:3"), Ok(PointerSource::Touch(3)));
        assert!(parse_source("pen").is_err());
    }

    #[test]
    fn test_numeric_shot_runs_to_completion() {
        let scenario = parse_scenario(
            r#"
name = "numeric"
[setup]
aim = "numeric"
strength = 10.0

[[steps]]
action = "type_angle"
text = "90"

[[steps]]
action = "swing"

[[steps]]
action = "advance"
frames = 59

[[expect.state]]
after_frame = 2
checks = ["swing_in_progress = true", "swing_enabled = false"]

[[expect.state]]
after_frame = 61
checks = ["ball.x = 50", "ball.y = 430", "swing_in_progress = false"]

[[expect.sequence]]
event = "SwingStarted"
frame_min = 2
frame_max = 2

[[expect.sequence]]
event = "SwingFinished"
frame_max = 61
"#,
        )
        .unwrap();

        let result = run_scenario(&scenario);
        assert!(result.is_pass(), "{:?}", result);
    }

    #[test]
    fn test_failure_reports_frame_and_state() {
        let scenario = parse_scenario(
            r#"
name = "wrong expectation"

[[steps]]
action = "pointer_down"
x = 50.0
y = 550.0
source = "touch:1"

[[expect.state]]
after_frame = 1
checks = ["aim.drawing = false"]
"#,
        )
        .unwrap();

        match run_scenario(&scenario) {
            ScenarioResult::Fail { frame, state, .. } => {
                assert_eq!(frame, 1);
                assert!(state.aim_drawing);
                assert_eq!(state.ball_x, 50.0);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
