//! First-run tutorial
//!
//! A fixed walk-through: tap the left third, tap the right third, then a
//! "RUN!" caption. Each reveal pauses the simulation until the highlighted
//! region is tapped; the rabbit's arrival and fixed delays drive the rest.
//! The step only ever moves forward, and reaching `Ended` is persisted so
//! later sessions skip the sequence.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionKey};
use super::door::Lane;
use super::geometry::Rect;
use super::state::{GamePhase, GameState, PauseReason, RABBIT_MOVE, SimEvent};
use crate::platform::Services;

/// Key of the pending reveal timer on the scene body
pub const TUTORIAL_TIMER: ActionKey = "tutorial";

pub const TOUCH_CAPTION: &str = "Touch";
pub const RUN_CAPTION: &str = "RUN!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TutorialStep {
    /// Waiting for the first reveal, then for the left tap
    Step1,
    /// Rabbit reached the left lane; second reveal pending
    Step2,
    /// Waiting for the right tap
    Step3,
    /// Rabbit reached the right lane; "RUN!" pending
    Step4,
    /// "RUN!" on screen
    Step5,
    Ended,
}

impl TutorialStep {
    pub fn next(self) -> Self {
        match self {
            TutorialStep::Step1 => TutorialStep::Step2,
            TutorialStep::Step2 => TutorialStep::Step3,
            TutorialStep::Step3 => TutorialStep::Step4,
            TutorialStep::Step4 => TutorialStep::Step5,
            TutorialStep::Step5 | TutorialStep::Ended => TutorialStep::Ended,
        }
    }

    /// Lane the player is asked to tap at this step, if any
    pub fn target_lane(self) -> Option<Lane> {
        match self {
            TutorialStep::Step1 => Some(Lane::Left),
            TutorialStep::Step3 => Some(Lane::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialCue {
    /// A reveal delay elapsed
    Reveal,
    /// The tutorial-driven rabbit move finished
    RabbitArrived,
}

/// What the tutorial currently draws over the scene
#[derive(Debug, Clone, PartialEq)]
pub struct TutorialOverlay {
    /// Tappable highlight, absent for caption-only reveals
    pub highlight: Option<Rect>,
    pub hand: Option<Vec2>,
    pub caption: &'static str,
}

#[derive(Debug, Clone)]
pub struct Tutorial {
    step: TutorialStep,
    pub overlay: Option<TutorialOverlay>,
}

impl Tutorial {
    pub fn new(completed: bool) -> Self {
        Self {
            step: if completed {
                TutorialStep::Ended
            } else {
                TutorialStep::Step1
            },
            overlay: None,
        }
    }

    pub fn step(&self) -> TutorialStep {
        self.step
    }

    pub fn is_active(&self) -> bool {
        self.step != TutorialStep::Ended
    }

    fn advance(&mut self) {
        let next = self.step.next();
        log::debug!("Tutorial {:?} -> {:?}", self.step, next);
        self.step = next;
    }

    /// Point falls inside the highlighted region
    pub fn highlight_contains(&self, p: Vec2) -> bool {
        self.overlay
            .as_ref()
            .and_then(|o| o.highlight)
            .is_some_and(|r| r.contains(p))
    }
}

/// Schedule the first reveal if the tutorial still has to run
pub fn begin(state: &mut GameState) {
    if state.tutorial.is_active() {
        let delay = state.tuning.tutorial_intro_delay;
        schedule_reveal(state, delay);
    }
}

fn schedule_reveal(state: &mut GameState, delay: f32) {
    state.scene.run_keyed(
        TUTORIAL_TIMER,
        Action::sequence(vec![
            Action::wait(delay),
            Action::emit(SimEvent::Tutorial(TutorialCue::Reveal)),
        ]),
    );
}

/// Highlight one screen third with the hand inside it
fn tap_overlay(state: &GameState, lane: Lane) -> TutorialOverlay {
    let screen = state.layout.screen;
    let third = screen.x / 3.0;
    let left = third * lane.index() as f32;
    TutorialOverlay {
        highlight: Some(Rect::new(
            Vec2::new(left, 0.0),
            Vec2::new(left + third, screen.y),
        )),
        hand: Some(Vec2::new(left + third / 2.0, screen.y / 3.0)),
        caption: TOUCH_CAPTION,
    }
}

fn reveal_tap(state: &mut GameState, lane: Lane) {
    state.tutorial.overlay = Some(tap_overlay(state, lane));
    state.phase = GamePhase::Paused(PauseReason::Tutorial);
}

/// Tap on the highlighted region: resume and walk the rabbit to the lane
pub fn on_tap(state: &mut GameState) {
    if state.phase != GamePhase::Paused(PauseReason::Tutorial) {
        return;
    }
    let Some(lane) = state.tutorial.step.target_lane() else {
        return;
    };
    state.tutorial.overlay = None;
    state.phase = GamePhase::Running;
    let walk = state.rabbit_move_action(lane);
    state.rabbit.run_keyed(
        RABBIT_MOVE,
        Action::sequence(vec![
            walk,
            Action::emit(SimEvent::Tutorial(TutorialCue::RabbitArrived)),
        ]),
    );
}

pub fn on_cue(state: &mut GameState, cue: TutorialCue, services: &mut Services<'_>) {
    let tuning = &state.tuning;
    let (second_tap, run, outro) = (
        tuning.tutorial_second_tap_delay,
        tuning.tutorial_run_delay,
        tuning.tutorial_outro_delay,
    );

    match (state.tutorial.step, cue) {
        (TutorialStep::Step1, TutorialCue::Reveal) => reveal_tap(state, Lane::Left),
        (TutorialStep::Step1, TutorialCue::RabbitArrived) => {
            state.tutorial.advance();
            schedule_reveal(state, second_tap);
        }
        (TutorialStep::Step2, TutorialCue::Reveal) => {
            state.tutorial.advance();
            reveal_tap(state, Lane::Right);
        }
        (TutorialStep::Step3, TutorialCue::RabbitArrived) => {
            state.tutorial.advance();
            schedule_reveal(state, run);
        }
        (TutorialStep::Step4, TutorialCue::Reveal) => {
            state.tutorial.advance();
            state.tutorial.overlay = Some(TutorialOverlay {
                highlight: None,
                hand: None,
                caption: RUN_CAPTION,
            });
            schedule_reveal(state, outro);
        }
        (TutorialStep::Step5, TutorialCue::Reveal) => {
            state.tutorial.advance();
            state.tutorial.overlay = None;
            state.records.mark_tutorial_completed(services.store);
        }
        (step, cue) => log::debug!("Ignoring {cue:?} during tutorial {step:?}"),
    }
}
