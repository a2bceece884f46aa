use crate::focus::{FocusSettings, InfoPanel};
use crate::sequencer::AutoTour;
use bevy::prelude::*;
use pan_orbit::flight::{CameraFlight, FlightAim};
use solar_system::body::{pace_all, BodyMotion, Pace};
use solar_system::scene::components::SceneCamera;

/// Return the camera to the overview of the whole system.
#[derive(Debug, Copy, Clone, Event)]
pub struct ResetView;

#[derive(Debug, Copy, Clone, PartialEq, Resource, Reflect)]
#[reflect(Resource)]
pub struct DefaultView {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for DefaultView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 60.0, 160.0),
            target: Vec3::ZERO,
        }
    }
}

pub(crate) fn on_reset_view(
    _trigger: Trigger<ResetView>,
    mut commands: Commands,
    view: Res<DefaultView>,
    settings: Res<FocusSettings>,
    mut tour: ResMut<AutoTour>,
    mut panel: ResMut<InfoPanel>,
    mut q_motion: Query<&mut BodyMotion>,
    q_camera: Query<(Entity, &Transform), With<SceneCamera>>,
) {
    if tour.stop() {
        info!("Auto tour stopped by view reset");
    }
    pace_all(&mut q_motion, Pace::Normal);
    panel.clear();

    let Ok((camera, transform)) = q_camera.get_single() else {
        warn!("Cannot reset the view: no scene camera");
        return;
    };
    debug!("Resetting view to {}", view.eye);
    commands.entity(camera).insert(CameraFlight::new(
        transform.translation,
        view.eye,
        FlightAim::Point(view.target),
        settings.flight_duration,
    ));
}
