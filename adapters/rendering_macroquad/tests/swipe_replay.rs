use glam::Vec2;
use snake_core::Direction;
use snake_rendering::intent::{swipe_direction, SWIPE_THRESHOLD};
use snake_rendering_macroquad::SwipeTracker;

enum Pointer {
    Down(Vec2),
    Up(Vec2),
    Cancel,
}

fn replay(script: &[Pointer]) -> Vec<Option<Direction>> {
    let mut tracker = SwipeTracker::default();
    let mut resolved = Vec::new();
    for step in script {
        match step {
            Pointer::Down(position) => tracker.press(*position),
            Pointer::Up(position) => resolved.push(
                tracker
                    .release(*position)
                    .and_then(|gesture| swipe_direction(gesture.delta, SWIPE_THRESHOLD)),
            ),
            Pointer::Cancel => tracker.cancel(),
        }
    }
    resolved
}

#[test]
fn pointer_script_resolves_deterministically() {
    let script = [
        Pointer::Down(Vec2::new(100.0, 100.0)),
        Pointer::Up(Vec2::new(180.0, 110.0)),
        Pointer::Down(Vec2::new(50.0, 200.0)),
        Pointer::Up(Vec2::new(52.0, 120.0)),
        Pointer::Down(Vec2::new(10.0, 10.0)),
        Pointer::Up(Vec2::new(15.0, 12.0)),
        Pointer::Up(Vec2::new(300.0, 10.0)),
        Pointer::Down(Vec2::new(0.0, 0.0)),
        Pointer::Cancel,
        Pointer::Up(Vec2::new(0.0, 90.0)),
    ];

    let first = replay(&script);
    let second = replay(&script);

    assert_eq!(
        first,
        vec![
            Some(Direction::Right),
            Some(Direction::Up),
            None,
            None,
            None,
        ]
    );
    assert_eq!(first, second);
}

#[test]
fn second_press_restarts_the_gesture() {
    let mut tracker = SwipeTracker::default();
    tracker.press(Vec2::new(0.0, 0.0));
    tracker.press(Vec2::new(100.0, 100.0));
    assert!(tracker.is_tracking());

    let gesture = tracker.release(Vec2::new(100.0, 160.0)).expect("gesture");
    assert_eq!(gesture.origin, Vec2::new(100.0, 100.0));
    assert_eq!(gesture.delta, Vec2::new(0.0, 60.0));
    assert!(!tracker.is_tracking());
}
