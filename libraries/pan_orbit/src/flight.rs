//! Eased camera flights between two eye positions.
//!
//! A flight is a component on the camera. Inserting a new one replaces the
//! flight in progress, starting from wherever the camera currently is.

use crate::components::PanOrbitState;
use crate::events::{FlightAborted, FlightCompleted};
use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::prelude::*;
use std::time::Duration;

/// What the camera looks at while flying.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum FlightAim {
    /// Re-read the entity's world position on every step.
    Track(Entity),
    Point(Vec3),
}

#[derive(Debug, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct CameraFlight {
    from: Vec3,
    to: Vec3,
    aim: FlightAim,
    timer: Timer,
}

impl CameraFlight {
    pub fn new(from: Vec3, to: Vec3, aim: FlightAim, duration: Duration) -> Self {
        Self {
            from,
            to,
            aim,
            timer: Timer::new(duration, TimerMode::Once),
        }
    }

    pub fn destination(&self) -> Vec3 {
        self.to
    }

    pub fn aim(&self) -> FlightAim {
        self.aim
    }

    pub fn is_finished(&self) -> bool {
        self.timer.finished()
    }

    /// Advances the flight and returns the new eye position.
    pub fn advance(&mut self, delta: Duration) -> Vec3 {
        self.timer.tick(delta);
        self.position()
    }

    pub fn position(&self) -> Vec3 {
        self.from.lerp(self.to, ease_in_out(self.timer.fraction()))
    }
}

/// Quadratic ease-in-out over progress `t`, clamped to `0..=1`.
pub fn ease_in_out(t: f32) -> f32 {
    EasingCurve::new(0.0, 1.0, EaseFunction::QuadraticInOut).sample_clamped(t)
}

pub(crate) fn fly_cameras(
    mut commands: Commands,
    time: Res<Time>,
    mut q_camera: Query<(
        Entity,
        &mut CameraFlight,
        &mut Transform,
        Option<&mut PanOrbitState>,
    )>,
    q_targets: Query<&GlobalTransform>,
) {
    for (camera, mut flight, mut transform, state) in &mut q_camera {
        let aim = match flight.aim {
            FlightAim::Point(point) => point,
            FlightAim::Track(entity) => match q_targets.get(entity) {
                Ok(target) => target.translation(),
                Err(_) => {
                    warn!("Flight target {entity} disappeared, stopping camera {camera}");
                    commands.entity(camera).remove::<CameraFlight>();
                    commands.trigger(FlightAborted {
                        camera,
                        aim: flight.aim,
                    });
                    continue;
                }
            },
        };

        transform.translation = flight.advance(time.delta());
        if transform.translation.distance_squared(aim) > f32::EPSILON {
            transform.look_at(aim, Vec3::Y);
        }

        if flight.is_finished() {
            debug!("Camera {camera} landed at {}", transform.translation);
            if let Some(mut state) = state {
                *state = PanOrbitState::looking_from(aim, transform.translation);
            }
            commands.entity(camera).remove::<CameraFlight>();
            commands.trigger(FlightCompleted {
                camera,
                aim: flight.aim,
                pivot: aim,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ease_in_out_is_symmetric_and_clamped() {
        assert_abs_diff_eq!(ease_in_out(0.0), 0.0);
        assert_abs_diff_eq!(ease_in_out(0.25), 0.125);
        assert_abs_diff_eq!(ease_in_out(0.5), 0.5);
        assert_abs_diff_eq!(ease_in_out(0.75), 0.875);
        assert_abs_diff_eq!(ease_in_out(1.0), 1.0);
        assert_abs_diff_eq!(ease_in_out(-1.0), 0.0);
        assert_abs_diff_eq!(ease_in_out(3.0), 1.0);
    }

    #[test]
    fn flight_reaches_destination_after_duration() {
        let from = Vec3::new(0.0, 60.0, 160.0);
        let to = Vec3::new(26.0, 3.2, 6.4);
        let aim = FlightAim::Point(Vec3::ZERO);
        let mut flight = CameraFlight::new(from, to, aim, Duration::from_secs(2));

        let halfway = flight.advance(Duration::from_secs(1));
        assert_abs_diff_eq!(halfway.x, 13.0, epsilon = 1e-4);
        assert!(!flight.is_finished());

        let end = flight.advance(Duration::from_secs(1));
        assert!(flight.is_finished());
        assert_abs_diff_eq!(end.distance(to), 0.0, epsilon = 1e-4);

        let past = flight.advance(Duration::from_secs(5));
        assert_abs_diff_eq!(past.distance(to), 0.0, epsilon = 1e-4);
    }

    fn flight_app() -> App {
        let mut app = App::new();
        app.add_plugins((TransformPlugin, HierarchyPlugin, crate::CameraFlightPlugin))
            .init_resource::<Time>();
        app
    }

    fn step(app: &mut App, millis: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(millis));
        app.update();
    }

    #[derive(Resource, Default)]
    struct Landings(Vec<FlightCompleted>);

    #[test]
    fn camera_tracks_a_moving_target_and_lands() {
        let mut app = flight_app();
        app.init_resource::<Landings>()
            .add_observer(|trigger: Trigger<FlightCompleted>, mut landings: ResMut<Landings>| {
                landings.0.push(*trigger.event());
            });
        let target = app.world_mut().spawn(Transform::from_xyz(10.0, 0.0, 0.0)).id();
        let camera = app
            .world_mut()
            .spawn((Transform::from_xyz(0.0, 60.0, 160.0), PanOrbitState::default()))
            .id();
        step(&mut app, 0);

        app.world_mut().entity_mut(camera).insert(CameraFlight::new(
            Vec3::new(0.0, 60.0, 160.0),
            Vec3::new(10.0, 2.0, 4.0),
            FlightAim::Track(target),
            Duration::from_secs(2),
        ));
        step(&mut app, 500);

        // Move the target mid-flight; the camera must follow it with its gaze.
        app.world_mut()
            .get_mut::<Transform>(target)
            .unwrap()
            .translation = Vec3::new(10.0, 0.0, -5.0);
        step(&mut app, 500);
        step(&mut app, 500);
        let transform = *app.world().get::<Transform>(camera).unwrap();
        let forward = transform.forward().as_vec3();
        let expected = (Vec3::new(10.0, 0.0, -5.0) - transform.translation).normalize();
        assert_abs_diff_eq!(forward.dot(expected), 1.0, epsilon = 1e-4);
        assert!(app.world().get::<CameraFlight>(camera).is_some());

        step(&mut app, 500);
        let world = app.world();
        assert!(world.get::<CameraFlight>(camera).is_none());
        let landings = &world.resource::<Landings>().0;
        assert_eq!(landings.len(), 1);
        assert_eq!(landings[0].aim, FlightAim::Track(target));
        let state = world.get::<PanOrbitState>(camera).unwrap();
        assert_abs_diff_eq!(state.center.distance(landings[0].pivot), 0.0);
        let eye = world.get::<Transform>(camera).unwrap().translation;
        assert_abs_diff_eq!(eye.distance(Vec3::new(10.0, 2.0, 4.0)), 0.0, epsilon = 1e-4);
    }

    #[derive(Resource, Default)]
    struct Aborts(Vec<FlightAborted>);

    #[test]
    fn flight_is_dropped_when_its_target_disappears() {
        let mut app = flight_app();
        app.init_resource::<Aborts>()
            .add_observer(|trigger: Trigger<FlightAborted>, mut aborts: ResMut<Aborts>| {
                aborts.0.push(*trigger.event());
            });
        let target = app.world_mut().spawn(Transform::from_xyz(10.0, 0.0, 0.0)).id();
        let camera = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, 10.0)).id();
        step(&mut app, 0);
        app.world_mut().entity_mut(camera).insert(CameraFlight::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(10.0, 2.0, 4.0),
            FlightAim::Track(target),
            Duration::from_secs(2),
        ));
        step(&mut app, 500);

        app.world_mut().despawn(target);
        step(&mut app, 500);
        let world = app.world();
        assert!(world.get::<CameraFlight>(camera).is_none());
        let aborts = &world.resource::<Aborts>().0;
        assert_eq!(aborts.len(), 1);
        assert_eq!(aborts[0].camera, camera);
        assert_eq!(aborts[0].aim, FlightAim::Track(target));
    }

    #[test]
    fn newer_flight_replaces_the_current_one() {
        let mut app = flight_app();
        let camera = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, 10.0)).id();
        app.world_mut().entity_mut(camera).insert(CameraFlight::new(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(100.0, 0.0, 10.0),
            FlightAim::Point(Vec3::ZERO),
            Duration::from_secs(2),
        ));
        step(&mut app, 1000);

        let here = app.world().get::<Transform>(camera).unwrap().translation;
        app.world_mut().entity_mut(camera).insert(CameraFlight::new(
            here,
            Vec3::new(-20.0, 0.0, 10.0),
            FlightAim::Point(Vec3::ZERO),
            Duration::from_secs(2),
        ));
        step(&mut app, 2000);

        let end = app.world().get::<Transform>(camera).unwrap().translation;
        assert_abs_diff_eq!(end.x, -20.0, epsilon = 1e-4);
    }
}
