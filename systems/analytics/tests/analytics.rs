use std::time::Duration;

use snake_core::{CellCoord, Command, Direction, Event, GameConfig, GameOverCause};
use snake_system_analytics::Analytics;
use snake_world::{self as world, World};

fn world() -> World {
    let config = GameConfig {
        canvas_width: 200,
        canvas_height: 200,
        cell_size: 20,
        points_per_level: 2,
        ..GameConfig::default()
    };
    World::new(&config, 0xa11a).expect("valid config")
}

fn step(world: &mut World, analytics: &mut Analytics, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    let _ = analytics.handle(&events);
    events
}

fn eat_twice(world: &mut World, analytics: &mut Analytics) {
    for column in [1, 3] {
        world.arrange(
            &[CellCoord::new(column, 4)],
            Some(Direction::Down),
            Some(CellCoord::new(column, 5)),
        );
        let _ = step(world, analytics, Command::Tick);
    }
}

#[test]
fn single_session_is_recorded() {
    let mut world = world();
    let mut analytics = Analytics::new();

    let _ = step(&mut world, &mut analytics, Command::Start);
    eat_twice(&mut world, &mut analytics);
    world.arrange(&[CellCoord::new(0, 0)], Some(Direction::Up), None);
    let _ = step(&mut world, &mut analytics, Command::Tick);

    let stats = analytics.stats();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.best_score, 2);
    assert_eq!(stats.best_level, 2);
    assert_eq!(stats.foods_eaten, 2);
    assert_eq!(stats.ticks_survived, 2, "the fatal tick does not count");
    assert_eq!(stats.last_cause, Some(GameOverCause::Boundary));
}

#[test]
fn best_values_survive_restarts() {
    let mut world = world();
    let mut analytics = Analytics::new();

    let _ = step(&mut world, &mut analytics, Command::Start);
    eat_twice(&mut world, &mut analytics);
    let _ = step(&mut world, &mut analytics, Command::Restart);

    let _ = step(
        &mut world,
        &mut analytics,
        Command::ChangeDirection {
            direction: Direction::Left,
        },
    );
    world.arrange(
        &[CellCoord::new(5, 5)],
        Some(Direction::Left),
        Some(CellCoord::new(9, 9)),
    );
    for _ in 0..6 {
        let _ = step(&mut world, &mut analytics, Command::Tick);
    }

    let stats = analytics.stats();
    assert_eq!(stats.games_played, 2);
    assert_eq!(stats.best_score, 2);
    assert_eq!(stats.best_level, 2);
    assert_eq!(stats.foods_eaten, 2);
    assert_eq!(stats.last_cause, Some(GameOverCause::Boundary));
}

#[test]
fn publishes_only_when_changed() {
    let mut analytics = Analytics::new();

    assert_eq!(
        analytics.handle(&[Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }]),
        None
    );

    let published = analytics
        .handle(&[
            Event::GameStarted {
                interval: Duration::from_millis(150),
            },
            Event::SnakeHeld {
                head: CellCoord::new(5, 5),
            },
        ])
        .expect("stats changed");
    assert_eq!(published.games_played, 1);
    assert_eq!(published.ticks_survived, 1);
}
