//! Timed, composable actions
//!
//! An `Action` is an immutable description (move, wait, sequence, repeat,
//! emit). Attaching one to a body instantiates a `Runner` that accumulates
//! frame time until it completes. Callbacks are expressed as `Emit`: the
//! event is queued during advancement and applied by the tick afterwards,
//! so animation scheduling never mutates game rules directly.

use glam::Vec2;

use super::body::{Clip, Sprite};
use super::state::SimEvent;
use crate::travel_time;

/// Key under which a keyed action is stored on a body
pub type ActionKey = &'static str;

/// Declarative action tree
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Linear move of the selected axes over a fixed duration.
    /// The start position is captured when the action starts running.
    MoveTo {
        x: Option<f32>,
        y: Option<f32>,
        duration: f32,
    },
    /// Instant reposition of the selected axes
    Place { x: Option<f32>, y: Option<f32> },
    /// Idle for a fixed duration
    Wait(f32),
    /// Play a sprite clip once, then restore the still frame
    Animate {
        clip: Clip,
        frames: u32,
        frame_time: f32,
    },
    /// Zero-duration callback: queue an event for the tick to apply
    Emit(SimEvent),
    /// Run children strictly in order
    Sequence(Vec<Action>),
    /// Restart the child immediately every time it completes
    RepeatForever(Box<Action>),
}

impl Action {
    /// Constant-speed move to `to`, with the duration derived from `from`
    pub fn move_to(from: Vec2, to: Vec2, speed: f32) -> Self {
        Action::MoveTo {
            x: Some(to.x),
            y: Some(to.y),
            duration: travel_time(from, to, speed),
        }
    }

    /// Constant-speed horizontal move; y is left untouched
    pub fn move_to_x(from: Vec2, x: f32, speed: f32) -> Self {
        Action::MoveTo {
            x: Some(x),
            y: None,
            duration: travel_time(from, Vec2::new(x, from.y), speed),
        }
    }

    /// Constant-speed vertical move; x is left untouched
    pub fn move_to_y(from: Vec2, y: f32, speed: f32) -> Self {
        Action::MoveTo {
            x: None,
            y: Some(y),
            duration: travel_time(from, Vec2::new(from.x, y), speed),
        }
    }

    pub fn place_y(y: f32) -> Self {
        Action::Place { x: None, y: Some(y) }
    }

    pub fn wait(seconds: f32) -> Self {
        Action::Wait(seconds)
    }

    pub fn emit(event: SimEvent) -> Self {
        Action::Emit(event)
    }

    pub fn sequence(steps: Vec<Action>) -> Self {
        Action::Sequence(steps)
    }

    pub fn forever(action: Action) -> Self {
        Action::RepeatForever(Box::new(action))
    }
}

/// Mutable view of the body an action runs on
pub struct ActionTarget<'a> {
    pub pos: &'a mut Vec2,
    pub sprite: &'a mut Sprite,
    pub events: &'a mut Vec<SimEvent>,
}

/// Outcome of advancing a runner
#[derive(Debug, Clone, Copy, PartialEq)]
enum Progress {
    Running,
    /// Completed, with unused time available to whatever runs next
    Finished { leftover: f32 },
}

/// Running instance of an `Action`
#[derive(Debug, Clone)]
enum Runner {
    Move {
        x: Option<f32>,
        y: Option<f32>,
        duration: f32,
        elapsed: f32,
        start: Option<Vec2>,
    },
    Place {
        x: Option<f32>,
        y: Option<f32>,
    },
    Wait {
        duration: f32,
        elapsed: f32,
    },
    Animate {
        clip: Clip,
        frames: u32,
        frame_time: f32,
        elapsed: f32,
    },
    Emit(SimEvent),
    Sequence {
        steps: Vec<Action>,
        index: usize,
        current: Option<Box<Runner>>,
    },
    Forever {
        template: Action,
        current: Box<Runner>,
    },
}

impl Runner {
    fn new(action: &Action) -> Self {
        match action {
            Action::MoveTo { x, y, duration } => Runner::Move {
                x: *x,
                y: *y,
                duration: *duration,
                elapsed: 0.0,
                start: None,
            },
            Action::Place { x, y } => Runner::Place { x: *x, y: *y },
            Action::Wait(duration) => Runner::Wait {
                duration: *duration,
                elapsed: 0.0,
            },
            Action::Animate {
                clip,
                frames,
                frame_time,
            } => Runner::Animate {
                clip: *clip,
                frames: *frames,
                frame_time: *frame_time,
                elapsed: 0.0,
            },
            Action::Emit(event) => Runner::Emit(event.clone()),
            Action::Sequence(steps) => Runner::Sequence {
                steps: steps.clone(),
                index: 0,
                current: None,
            },
            Action::RepeatForever(child) => Runner::Forever {
                template: (**child).clone(),
                current: Box::new(Runner::new(child)),
            },
        }
    }

    fn step(&mut self, target: &mut ActionTarget<'_>, dt: f32) -> Progress {
        match self {
            Runner::Move {
                x,
                y,
                duration,
                elapsed,
                start,
            } => {
                let from = *start.get_or_insert(*target.pos);
                *elapsed += dt;
                if *elapsed >= *duration {
                    if let Some(x) = x {
                        target.pos.x = *x;
                    }
                    if let Some(y) = y {
                        target.pos.y = *y;
                    }
                    return Progress::Finished {
                        leftover: *elapsed - duration.max(0.0),
                    };
                }
                let t = *elapsed / *duration;
                if let Some(x) = x {
                    target.pos.x = from.x + (*x - from.x) * t;
                }
                if let Some(y) = y {
                    target.pos.y = from.y + (*y - from.y) * t;
                }
                Progress::Running
            }
            Runner::Place { x, y } => {
                if let Some(x) = x {
                    target.pos.x = *x;
                }
                if let Some(y) = y {
                    target.pos.y = *y;
                }
                Progress::Finished { leftover: dt }
            }
            Runner::Wait { duration, elapsed } => {
                *elapsed += dt;
                if *elapsed >= *duration {
                    Progress::Finished {
                        leftover: *elapsed - *duration,
                    }
                } else {
                    Progress::Running
                }
            }
            Runner::Animate {
                clip,
                frames,
                frame_time,
                elapsed,
            } => {
                *elapsed += dt;
                let total = *frames as f32 * *frame_time;
                if *elapsed >= total {
                    *target.sprite = Sprite::default();
                    return Progress::Finished {
                        leftover: *elapsed - total,
                    };
                }
                let frame = if *frame_time > 0.0 {
                    ((*elapsed / *frame_time) as u32).min(frames.saturating_sub(1))
                } else {
                    0
                };
                *target.sprite = Sprite { clip: *clip, frame };
                Progress::Running
            }
            Runner::Emit(event) => {
                target.events.push(event.clone());
                Progress::Finished { leftover: dt }
            }
            Runner::Sequence {
                steps,
                index,
                current,
            } => {
                let mut remaining = dt;
                loop {
                    if current.is_none() && *index >= steps.len() {
                        return Progress::Finished {
                            leftover: remaining,
                        };
                    }
                    let child =
                        current.get_or_insert_with(|| Box::new(Runner::new(&steps[*index])));
                    match child.step(target, remaining) {
                        Progress::Running => return Progress::Running,
                        Progress::Finished { leftover } => {
                            remaining = leftover;
                            *index += 1;
                            *current = None;
                        }
                    }
                }
            }
            Runner::Forever { template, current } => {
                let mut remaining = dt;
                loop {
                    match current.step(target, remaining) {
                        Progress::Running => return Progress::Running,
                        Progress::Finished { leftover } => {
                            **current = Runner::new(template);
                            // A pass that consumed no time would spin forever
                            if leftover <= 0.0 || leftover >= remaining {
                                return Progress::Running;
                            }
                            remaining = leftover;
                        }
                    }
                }
            }
        }
    }
}

struct Scheduled {
    key: Option<ActionKey>,
    runner: Runner,
}

/// Actions currently attached to one body
#[derive(Default)]
pub struct ActionSet {
    running: Vec<Scheduled>,
}

impl std::fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSet")
            .field("count", &self.running.len())
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an unkeyed action
    pub fn run(&mut self, action: Action) {
        self.running.push(Scheduled {
            key: None,
            runner: Runner::new(&action),
        });
    }

    /// Attach an action under `key`, cancelling any action already stored there
    pub fn run_keyed(&mut self, key: ActionKey, action: Action) {
        self.cancel(key);
        self.running.push(Scheduled {
            key: Some(key),
            runner: Runner::new(&action),
        });
    }

    /// Drop the action stored under `key`; no completion event fires.
    /// Returns whether anything was cancelled.
    pub fn cancel(&mut self, key: ActionKey) -> bool {
        let before = self.running.len();
        self.running.retain(|s| s.key != Some(key));
        before != self.running.len()
    }

    pub fn contains(&self, key: ActionKey) -> bool {
        self.running.iter().any(|s| s.key == Some(key))
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = ActionKey> + '_ {
        self.running.iter().filter_map(|s| s.key)
    }

    /// Advance every action by `dt`, dropping the ones that complete
    pub fn advance(&mut self, target: &mut ActionTarget<'_>, dt: f32) {
        self.running
            .retain_mut(|s| s.runner.step(target, dt) == Progress::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::door::Lane;

    struct Harness {
        pos: Vec2,
        sprite: Sprite,
        events: Vec<SimEvent>,
        actions: ActionSet,
    }

    impl Harness {
        fn at(pos: Vec2) -> Self {
            Self {
                pos,
                sprite: Sprite::default(),
                events: Vec::new(),
                actions: ActionSet::new(),
            }
        }

        fn advance(&mut self, dt: f32) {
            let mut target = ActionTarget {
                pos: &mut self.pos,
                sprite: &mut self.sprite,
                events: &mut self.events,
            };
            self.actions.advance(&mut target, dt);
        }
    }

    #[test]
    fn test_move_is_constant_speed() {
        let mut h = Harness::at(Vec2::ZERO);
        let action = Action::move_to_x(h.pos, 100.0, 50.0);
        h.actions.run(action);

        h.advance(1.0);
        assert!((h.pos.x - 50.0).abs() < 1e-4);
        h.advance(0.5);
        assert!((h.pos.x - 75.0).abs() < 1e-4);
        h.advance(1.0);
        assert_eq!(h.pos.x, 100.0);
        assert!(h.actions.is_empty());
    }

    #[test]
    fn test_zero_distance_move_completes_immediately() {
        let mut h = Harness::at(Vec2::new(5.0, 5.0));
        let action = Action::move_to(h.pos, h.pos, 360.0);
        assert!(matches!(action, Action::MoveTo { duration, .. } if duration == 0.0));
        h.actions.run(action);
        h.advance(0.0);
        assert!(h.actions.is_empty());
        assert_eq!(h.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_sequence_runs_in_order_and_carries_leftover() {
        let mut h = Harness::at(Vec2::ZERO);
        h.actions.run(Action::sequence(vec![
            Action::wait(1.0),
            Action::emit(SimEvent::EnemyCycleCompleted),
            Action::move_to_y(Vec2::ZERO, -10.0, 10.0),
        ]));

        h.advance(0.9);
        assert!(h.events.is_empty());
        assert_eq!(h.pos.y, 0.0);

        // 0.1 finishes the wait, the emit fires, 0.4 goes into the move
        h.advance(0.5);
        assert_eq!(h.events, vec![SimEvent::EnemyCycleCompleted]);
        assert!((h.pos.y + 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_repeat_forever_restarts() {
        let mut h = Harness::at(Vec2::ZERO);
        h.actions.run(Action::forever(Action::sequence(vec![
            Action::wait(1.0),
            Action::emit(SimEvent::DoorCycleCompleted(Lane::Left)),
        ])));

        for _ in 0..10 {
            h.advance(0.5);
        }
        assert_eq!(h.events.len(), 5);
        assert_eq!(h.actions.len(), 1);
    }

    #[test]
    fn test_zero_duration_repeat_does_not_spin() {
        let mut h = Harness::at(Vec2::ZERO);
        h.actions
            .run(Action::forever(Action::emit(SimEvent::SmashFinished)));
        h.advance(0.016);
        assert_eq!(h.events.len(), 1);
        h.advance(0.016);
        assert_eq!(h.events.len(), 2);
    }

    #[test]
    fn test_keyed_replace_cancels_without_callback() {
        let mut h = Harness::at(Vec2::ZERO);
        h.actions.run_keyed(
            "cycle",
            Action::sequence(vec![
                Action::wait(1.0),
                Action::emit(SimEvent::EnemyCycleCompleted),
            ]),
        );
        h.advance(0.5);
        h.actions
            .run_keyed("cycle", Action::move_to_x(h.pos, 10.0, 10.0));
        assert_eq!(h.actions.len(), 1);

        h.advance(2.0);
        assert!(h.events.is_empty());
        assert_eq!(h.pos.x, 10.0);
    }

    #[test]
    fn test_cancel_reports_presence() {
        let mut h = Harness::at(Vec2::ZERO);
        h.actions.run_keyed("a", Action::wait(1.0));
        h.actions.run(Action::wait(1.0));
        assert!(h.actions.contains("a"));
        assert!(h.actions.cancel("a"));
        assert!(!h.actions.cancel("a"));
        assert_eq!(h.actions.len(), 1);
    }

    #[test]
    fn test_animate_sets_frames_then_restores() {
        let mut h = Harness::at(Vec2::ZERO);
        h.actions.run(Action::Animate {
            clip: Clip::Smash,
            frames: 4,
            frame_time: 0.1,
        });
        h.advance(0.25);
        assert_eq!(
            h.sprite,
            Sprite {
                clip: Clip::Smash,
                frame: 2
            }
        );
        h.advance(0.2);
        assert_eq!(h.sprite, Sprite::default());
        assert!(h.actions.is_empty());
    }

    #[test]
    fn test_axis_moves_compose() {
        let mut h = Harness::at(Vec2::new(0.0, 100.0));
        h.actions.run(Action::move_to_x(h.pos, 20.0, 10.0));
        h.actions.run(Action::move_to_y(h.pos, 0.0, 50.0));
        h.advance(1.0);
        assert!((h.pos.x - 10.0).abs() < 1e-4);
        assert!((h.pos.y - 50.0).abs() < 1e-4);
    }
}
