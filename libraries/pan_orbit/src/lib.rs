use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod flight;
mod systems;

/// Mouse-driven pan/orbit/zoom camera. Includes [`CameraFlightPlugin`].
#[derive(Default)]
pub struct PanOrbitCameraPlugin;

impl Plugin for PanOrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<CameraFlightPlugin>() {
            app.add_plugins(CameraFlightPlugin);
        }
        app.register_type::<components::PanOrbitState>()
            .register_type::<components::PanOrbitCamera>()
            .add_systems(
                Update,
                systems::get_blocked_inputs
                    .pipe(systems::pan_orbit_camera)
                    .run_if(
                        any_with_component::<components::PanOrbitState>
                            .and(resource_exists::<bevy_egui::EguiUserTextures>),
                    ),
            );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, SystemSet)]
pub struct FlightSystems;

/// Eased camera flights, without any input handling.
pub struct CameraFlightPlugin;

impl Plugin for CameraFlightPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, flight::fly_cameras.in_set(FlightSystems));
    }
}
