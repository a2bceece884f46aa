use bevy::prelude::*;
use pan_orbit::{CameraFlightPlugin, FlightSystems};
use solar_system::registry::BodyRegistry;
use std::time::Duration;

pub mod focus;
pub mod reset;
pub mod sequencer;

pub use focus::{FocusBody, FocusCompleted, FocusFailed, FocusOrigin, InfoPanel};
pub use reset::{DefaultView, ResetView};
pub use sequencer::{AutoTour, TourCommand};

/// Camera focus, the automatic tour and the view reset, all driven by
/// triggered events.
pub struct AutoTourPlugin {
    /// Minimum time spent at each tour stop.
    pub dwell: Duration,
    pub flight: Duration,
    pub default_view: DefaultView,
}

impl Default for AutoTourPlugin {
    fn default() -> Self {
        Self {
            dwell: Duration::from_millis(4500),
            flight: Duration::from_secs(2),
            default_view: DefaultView::default(),
        }
    }
}

impl Plugin for AutoTourPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<CameraFlightPlugin>() {
            app.add_plugins(CameraFlightPlugin);
        }
        app.register_type::<AutoTour>()
            .register_type::<InfoPanel>()
            .register_type::<DefaultView>()
            .insert_resource(AutoTour::new(self.dwell))
            .insert_resource(focus::FocusSettings {
                flight_duration: self.flight,
            })
            .insert_resource(self.default_view)
            .init_resource::<InfoPanel>()
            .add_observer(focus::on_focus_body)
            .add_observer(focus::on_flight_completed)
            .add_observer(focus::on_flight_aborted)
            .add_observer(sequencer::on_tour_command)
            .add_observer(sequencer::preempt_on_manual_focus)
            .add_observer(sequencer::on_focus_completed)
            .add_observer(sequencer::on_focus_failed)
            .add_observer(reset::on_reset_view)
            .add_systems(
                Update,
                sequencer::advance_tour
                    .after(FlightSystems)
                    .run_if(resource_exists::<BodyRegistry>),
            );
    }
}
