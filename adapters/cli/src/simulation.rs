//! Frame driver wiring the world to its systems and the rendered scene.

use std::time::Duration;

use snake_core::{Command, ConfigError, Event, GameConfig};
use snake_rendering::{
    intent::{filter_axis, swipe_direction, SWIPE_THRESHOLD},
    FrameInput, GridPresentation, Overlay, RenderingError, Scene, SwipeFeedback,
};
use snake_system_analytics::Analytics;
use snake_system_cues::Cues;
use snake_system_scheduler::Scheduler;
use snake_world::{self as world, query, World};
use tracing::{debug, warn};

/// Most ticks a single frame may release; longer stalls are dropped.
const MAX_CATCH_UP_TICKS: u32 = 4;

/// Owns the world and every system, advancing them once per rendered frame.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    scheduler: Scheduler,
    cues: Cues,
    analytics: Analytics,
}

impl Simulation {
    /// Builds a simulation for a validated configuration.
    pub(crate) fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            world: World::new(config, seed)?,
            scheduler: Scheduler::new(),
            cues: Cues::new(),
            analytics: Analytics::new(),
        })
    }

    /// Scene describing the world before the first frame.
    pub(crate) fn initial_scene(&self) -> Result<Scene, RenderingError> {
        let grid = GridPresentation::new(query::grid(&self.world))?;
        Ok(Scene::new(
            grid,
            query::snake_view(&self.world),
            query::food(&self.world),
            query::hud(&self.world),
        ))
    }

    /// Advances the simulation by one frame.
    ///
    /// Time is applied first, then the frame's input, then the scheduler
    /// releases due ticks one at a time until it falls silent. Game time is
    /// capped at [`MAX_CATCH_UP_TICKS`] intervals per frame.
    pub(crate) fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        if let Some(swipe) = scene.swipe.as_mut() {
            if !swipe.advance(dt) {
                scene.swipe = None;
            }
        }

        let budget = query::interval(&self.world).saturating_mul(MAX_CATCH_UP_TICKS);
        let step = dt.min(budget);
        if step < dt {
            warn!(
                frame_ms = dt.as_millis() as u64,
                budget_ms = budget.as_millis() as u64,
                "long frame clamped"
            );
        }

        let mut pending = Vec::new();
        world::apply(&mut self.world, Command::AdvanceTime { dt: step }, &mut pending);
        for command in self.input_commands(&input, scene) {
            world::apply(&mut self.world, command, &mut pending);
        }

        let mut log = Vec::new();
        loop {
            let mut commands = Vec::new();
            self.scheduler.handle(&pending, &mut commands);
            log.append(&mut pending);

            if commands.is_empty() {
                break;
            }
            for command in commands {
                world::apply(&mut self.world, command, &mut pending);
            }
        }

        self.cues.handle(&log, &mut scene.cues);
        if let Some(stats) = self.analytics.handle(&log) {
            scene.stats = stats;
        }

        if log.iter().any(Event::requires_render) {
            self.populate_scene(scene);
        }
    }

    /// Translates frame input into world commands, recording swipe feedback.
    fn input_commands(&self, input: &FrameInput, scene: &mut Scene) -> Vec<Command> {
        let mut commands = Vec::new();
        if input.restart {
            commands.push(Command::Restart);
        }

        let swiped = input.swipe.and_then(|gesture| {
            let direction = swipe_direction(gesture.delta, SWIPE_THRESHOLD)?;
            scene.swipe = Some(SwipeFeedback::new(direction, gesture.origin));
            Some(direction)
        });
        let heading = if input.restart {
            None
        } else {
            query::heading(&self.world)
        };
        if let Some(direction) = input
            .direction
            .or(swiped)
            .and_then(|direction| filter_axis(heading, direction))
        {
            commands.push(Command::ChangeDirection { direction });
        }

        if input.start {
            commands.push(Command::Start);
        }
        if input.pause_toggle {
            commands.push(Command::TogglePause);
        }

        if !commands.is_empty() {
            debug!(?commands, "input");
        }
        commands
    }

    fn populate_scene(&self, scene: &mut Scene) {
        let hud = query::hud(&self.world);
        scene.snake = query::snake_view(&self.world);
        scene.food = query::food(&self.world);
        scene.hud = hud;
        scene.overlay = Overlay::for_hud(hud, self.analytics.stats().last_cause);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use snake_core::{CellCoord, Direction, GameOverCause, GamePhase};
    use snake_rendering::SwipeGesture;
    use snake_system_cues::Cue;

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(150);

    fn simulation() -> (Simulation, Scene) {
        let config = GameConfig {
            canvas_width: 200,
            canvas_height: 200,
            ..GameConfig::default()
        };
        let simulation = Simulation::new(&config, 9).expect("valid config");
        let scene = simulation.initial_scene().expect("drawable grid");
        (simulation, scene)
    }

    fn press(direction: Direction) -> FrameInput {
        FrameInput {
            direction: Some(direction),
            ..FrameInput::default()
        }
    }

    #[test]
    fn initial_scene_shows_welcome() {
        let (_, scene) = simulation();
        assert_eq!(scene.overlay, Some(Overlay::Welcome));
        assert_eq!(scene.snake.head(), Some(CellCoord::new(5, 5)));
        assert!(scene.food.is_some());
    }

    #[test]
    fn direction_key_starts_and_ticks_move_the_snake() {
        let (mut simulation, mut scene) = simulation();
        simulation.world.arrange(
            &[CellCoord::new(5, 5)],
            None,
            Some(CellCoord::new(0, 0)),
        );

        simulation.frame(Duration::ZERO, press(Direction::Up), &mut scene);
        assert_eq!(scene.hud.phase, GamePhase::Running);
        assert_eq!(scene.overlay, None);

        simulation.frame(INTERVAL, FrameInput::default(), &mut scene);
        assert_eq!(scene.snake.head(), Some(CellCoord::new(5, 4)));
        assert_eq!(scene.stats.games_played, 1);
    }

    #[test]
    fn stalled_frame_releases_a_bounded_number_of_ticks() {
        let (mut simulation, mut scene) = simulation();
        simulation.frame(Duration::ZERO, press(Direction::Up), &mut scene);
        simulation.world.arrange(
            &[CellCoord::new(0, 9)],
            Some(Direction::Up),
            Some(CellCoord::new(9, 0)),
        );

        simulation.frame(Duration::from_secs(60), FrameInput::default(), &mut scene);

        assert_eq!(query::tick_index(&simulation.world), u64::from(MAX_CATCH_UP_TICKS));
        assert_eq!(scene.snake.head(), Some(CellCoord::new(0, 5)));
        assert_eq!(scene.hud.phase, GamePhase::Running);
    }

    #[test]
    fn swipe_steers_and_leaves_feedback() {
        let (mut simulation, mut scene) = simulation();
        let input = FrameInput {
            swipe: Some(SwipeGesture {
                origin: Vec2::new(40.0, 40.0),
                delta: Vec2::new(-90.0, 5.0),
            }),
            ..FrameInput::default()
        };

        simulation.frame(Duration::ZERO, input, &mut scene);

        assert_eq!(scene.snake.heading(), Some(Direction::Left));
        let feedback = scene.swipe.expect("feedback recorded");
        assert_eq!(feedback.direction, Direction::Left);

        simulation.frame(SwipeFeedback::LIFETIME, FrameInput::default(), &mut scene);
        assert_eq!(scene.swipe, None);
    }

    #[test]
    fn same_axis_intents_never_reach_the_world() {
        let (mut simulation, mut scene) = simulation();
        simulation.frame(Duration::ZERO, press(Direction::Right), &mut scene);

        let commands = simulation.input_commands(&press(Direction::Left), &mut scene);
        assert!(commands.is_empty());

        let commands = simulation.input_commands(&press(Direction::Down), &mut scene);
        assert_eq!(
            commands,
            vec![Command::ChangeDirection {
                direction: Direction::Down
            }]
        );
    }

    #[test]
    fn pause_shows_overlay_and_freezes() {
        let (mut simulation, mut scene) = simulation();
        simulation.world.arrange(
            &[CellCoord::new(2, 2)],
            None,
            Some(CellCoord::new(9, 9)),
        );
        simulation.frame(Duration::ZERO, press(Direction::Right), &mut scene);

        let pause = FrameInput {
            pause_toggle: true,
            ..FrameInput::default()
        };
        simulation.frame(Duration::ZERO, pause.clone(), &mut scene);
        assert_eq!(scene.overlay, Some(Overlay::Paused));
        assert_eq!(scene.cues.drain(..).collect::<Vec<_>>(), vec![Cue::Pause]);

        simulation.frame(INTERVAL * 10, FrameInput::default(), &mut scene);
        assert_eq!(scene.snake.head(), Some(CellCoord::new(2, 2)));

        simulation.frame(Duration::ZERO, pause, &mut scene);
        assert_eq!(scene.overlay, None);
        assert_eq!(scene.cues, vec![Cue::Resume]);
    }

    #[test]
    fn game_over_then_restart() {
        let (mut simulation, mut scene) = simulation();
        simulation.frame(
            Duration::ZERO,
            FrameInput {
                start: true,
                ..FrameInput::default()
            },
            &mut scene,
        );
        simulation.world.arrange(
            &[CellCoord::new(9, 3)],
            Some(Direction::Right),
            Some(CellCoord::new(0, 0)),
        );

        simulation.frame(INTERVAL, FrameInput::default(), &mut scene);
        assert_eq!(
            scene.overlay,
            Some(Overlay::GameOver {
                cause: GameOverCause::Boundary,
                score: 0
            })
        );
        assert!(scene.cues.contains(&Cue::GameOver));

        let restart = FrameInput {
            restart: true,
            ..FrameInput::default()
        };
        simulation.frame(Duration::ZERO, restart, &mut scene);
        assert_eq!(scene.overlay, Some(Overlay::Welcome));
        assert_eq!(scene.hud.score, 0);
        assert_eq!(scene.snake.len(), 1);
        assert_eq!(scene.stats.last_cause, Some(GameOverCause::Boundary));
    }
}
