use crate::focus::{FocusBody, FocusCompleted, FocusFailed, FocusOrigin};
use bevy::prelude::*;
use solar_system::body::{pace_all, BodyMotion, Pace};
use solar_system::registry::BodyRegistry;
use std::num::NonZeroUsize;
use std::time::Duration;

#[derive(Debug, Clone, Reflect)]
pub struct TourStep {
    index: usize,
    dwell: Timer,
    /// Whether the camera has landed at this step's body yet.
    arrived: bool,
}

impl TourStep {
    fn new(index: usize, dwell: Duration) -> Self {
        Self {
            index,
            dwell: Timer::new(dwell, TimerMode::Once),
            arrived: false,
        }
    }
}

#[derive(Debug, Clone, Default, Reflect)]
pub enum TourState {
    #[default]
    Idle,
    Touring(TourStep),
}

/// Automatic tour through every body of the registry, in tour order.
///
/// The tour moves on once the dwell time of the current step has elapsed and
/// the camera has arrived at its body, whichever comes last.
#[derive(Debug, Clone, Resource, Reflect)]
#[reflect(Resource)]
pub struct AutoTour {
    state: TourState,
    dwell: Duration,
}

impl AutoTour {
    pub fn new(dwell: Duration) -> Self {
        Self {
            state: TourState::Idle,
            dwell,
        }
    }

    pub fn state(&self) -> &TourState {
        &self.state
    }

    pub fn is_touring(&self) -> bool {
        matches!(self.state, TourState::Touring(_))
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            TourState::Idle => None,
            TourState::Touring(step) => Some(step.index),
        }
    }

    /// Begins a tour at the first stop. Returns `None` if already touring.
    pub fn start(&mut self) -> Option<usize> {
        if self.is_touring() {
            return None;
        }
        self.state = TourState::Touring(TourStep::new(0, self.dwell));
        Some(0)
    }

    /// Drops the current step along with its timer. Returns whether a tour
    /// was running.
    pub fn stop(&mut self) -> bool {
        matches!(std::mem::take(&mut self.state), TourState::Touring(_))
    }

    pub fn arrive(&mut self, index: usize) {
        if let TourState::Touring(step) = &mut self.state {
            if step.index == index {
                step.arrived = true;
            }
        }
    }

    /// Ticks the dwell timer and returns the index of the next stop when the
    /// tour moves on.
    pub fn tick(&mut self, delta: Duration, len: NonZeroUsize) -> Option<usize> {
        let TourState::Touring(step) = &mut self.state else {
            return None;
        };
        step.dwell.tick(delta);
        if !(step.arrived && step.dwell.finished()) {
            return None;
        }
        let next = (step.index + 1) % len;
        *step = TourStep::new(next, self.dwell);
        Some(next)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Event)]
pub enum TourCommand {
    Start,
    Stop,
    Toggle,
}

fn enter_step(
    commands: &mut Commands,
    q_motion: &mut Query<&mut BodyMotion>,
    registry: &BodyRegistry,
    index: usize,
) {
    let body = registry.tour_stop(index);
    debug!("Tour stop {index}: {body}");
    pace_all(q_motion, Pace::Slowed);
    commands.trigger(FocusBody {
        body,
        origin: FocusOrigin::Tour,
    });
}

pub(crate) fn on_tour_command(
    trigger: Trigger<TourCommand>,
    mut commands: Commands,
    mut tour: ResMut<AutoTour>,
    registry: Option<Res<BodyRegistry>>,
    mut q_motion: Query<&mut BodyMotion>,
) {
    let command = *trigger.event();
    let start = match command {
        TourCommand::Start => true,
        TourCommand::Stop => false,
        TourCommand::Toggle => !tour.is_touring(),
    };
    if !start {
        if tour.stop() {
            info!("Auto tour stopped");
            pace_all(&mut q_motion, Pace::Normal);
        }
        return;
    }

    let Some(registry) = registry else {
        warn!("Cannot start the auto tour before the bodies are spawned");
        return;
    };
    if let Some(index) = tour.start() {
        info!("Auto tour started, {} stops", registry.tour_len());
        enter_step(&mut commands, &mut q_motion, &registry, index);
    }
}

pub(crate) fn preempt_on_manual_focus(
    trigger: Trigger<FocusBody>,
    mut tour: ResMut<AutoTour>,
    mut q_motion: Query<&mut BodyMotion>,
) {
    if trigger.event().origin == FocusOrigin::Manual && tour.stop() {
        info!("Auto tour interrupted by manual focus");
        pace_all(&mut q_motion, Pace::Normal);
    }
}

fn arrive_at(tour: &mut AutoTour, registry: Option<&BodyRegistry>, body: Entity) {
    let (Some(index), Some(registry)) = (tour.current_index(), registry) else {
        return;
    };
    if registry.tour_stop(index) == body {
        tour.arrive(index);
    }
}

pub(crate) fn on_focus_completed(
    trigger: Trigger<FocusCompleted>,
    mut tour: ResMut<AutoTour>,
    registry: Option<Res<BodyRegistry>>,
) {
    arrive_at(&mut tour, registry.as_deref(), trigger.event().body);
}

/// A stop the camera cannot reach is skipped once its dwell is over.
pub(crate) fn on_focus_failed(
    trigger: Trigger<FocusFailed>,
    mut tour: ResMut<AutoTour>,
    registry: Option<Res<BodyRegistry>>,
) {
    let body = trigger.event().body;
    if tour.is_touring() {
        debug!("Tour stop {body} is unreachable, skipping after the dwell");
    }
    arrive_at(&mut tour, registry.as_deref(), body);
}

pub(crate) fn advance_tour(
    mut commands: Commands,
    time: Res<Time>,
    registry: Res<BodyRegistry>,
    mut tour: ResMut<AutoTour>,
    mut q_motion: Query<&mut BodyMotion>,
) {
    if let Some(next) = tour.tick(time.delta(), registry.tour_len()) {
        pace_all(&mut q_motion, Pace::Normal);
        enter_step(&mut commands, &mut q_motion, &registry, next);
    }
}
