//! Flying the scene camera to a body and publishing what it is looking at.

use bevy::prelude::*;
use pan_orbit::events::{FlightAborted, FlightCompleted};
use pan_orbit::flight::{CameraFlight, FlightAim};
use solar_system::body::{BodyInfo, CelestialBody};
use solar_system::scene::components::SceneCamera;
use std::time::Duration;

/// Eye offset from a focused body, in multiples of its radius.
pub const FOCUS_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 4.0);

pub fn focus_eye(body: Vec3, radius: f32) -> Vec3 {
    body + FOCUS_OFFSET * radius
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Reflect)]
pub enum FocusOrigin {
    /// Picked by the user, through the selector or a click.
    Manual,
    Tour,
}

#[derive(Debug, Copy, Clone, Event)]
pub struct FocusBody {
    pub body: Entity,
    pub origin: FocusOrigin,
}

impl FocusBody {
    pub fn manual(body: Entity) -> Self {
        Self {
            body,
            origin: FocusOrigin::Manual,
        }
    }
}

/// Fired once the camera has landed in front of a focused body.
#[derive(Debug, Copy, Clone, Event)]
pub struct FocusCompleted {
    pub body: Entity,
}

/// Fired when the camera will never land at a requested body: the request was
/// rejected, or the body vanished mid-flight.
#[derive(Debug, Copy, Clone, Event)]
pub struct FocusFailed {
    pub body: Entity,
}

#[derive(Debug, Clone, Resource)]
pub struct FocusSettings {
    pub flight_duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct ShownBody {
    pub entity: Entity,
    pub name: String,
    pub info: BodyInfo,
}

/// Metadata of the last body the camera arrived at, if any.
#[derive(Debug, Clone, Default, Resource, Reflect)]
#[reflect(Resource)]
pub struct InfoPanel(Option<ShownBody>);

impl InfoPanel {
    pub fn shown(&self) -> Option<&ShownBody> {
        self.0.as_ref()
    }

    pub fn show(&mut self, body: ShownBody) {
        self.0 = Some(body);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

pub(crate) fn on_focus_body(
    trigger: Trigger<FocusBody>,
    mut commands: Commands,
    settings: Res<FocusSettings>,
    q_bodies: Query<(&CelestialBody, &GlobalTransform)>,
    q_camera: Query<(Entity, &Transform), With<SceneCamera>>,
) {
    let FocusBody { body, origin } = *trigger.event();
    let Ok((celestial, global)) = q_bodies.get(body) else {
        warn!("Cannot focus {body}: not a celestial body");
        commands.trigger(FocusFailed { body });
        return;
    };
    let Ok((camera, transform)) = q_camera.get_single() else {
        warn!("Cannot focus {body}: no scene camera");
        commands.trigger(FocusFailed { body });
        return;
    };
    let eye = focus_eye(global.translation(), celestial.radius);
    debug!("Focusing {body} ({origin:?}), flying camera to {eye}");
    commands.entity(camera).insert(CameraFlight::new(
        transform.translation,
        eye,
        FlightAim::Track(body),
        settings.flight_duration,
    ));
}

pub(crate) fn on_flight_completed(
    trigger: Trigger<FlightCompleted>,
    mut commands: Commands,
    mut panel: ResMut<InfoPanel>,
    q_bodies: Query<(&Name, &CelestialBody)>,
) {
    let FlightAim::Track(body) = trigger.event().aim else {
        return;
    };
    let Ok((name, celestial)) = q_bodies.get(body) else {
        return;
    };
    panel.show(ShownBody {
        entity: body,
        name: name.to_string(),
        info: celestial.info.clone(),
    });
    commands.trigger(FocusCompleted { body });
}

pub(crate) fn on_flight_aborted(trigger: Trigger<FlightAborted>, mut commands: Commands) {
    if let FlightAim::Track(body) = trigger.event().aim {
        commands.trigger(FocusFailed { body });
    }
}
