use crate::flight::FlightAim;
use bevy::prelude::*;

/// Fired when a [`CameraFlight`](crate::flight::CameraFlight) reaches its
/// destination. Superseded flights never fire.
#[derive(Debug, Clone, Copy, Event)]
pub struct FlightCompleted {
    pub camera: Entity,
    pub aim: FlightAim,
    /// Where the camera was looking when it arrived; the new orbit center.
    pub pivot: Vec3,
}

/// Fired when a flight is dropped because its tracked target no longer exists.
#[derive(Debug, Clone, Copy, Event)]
pub struct FlightAborted {
    pub camera: Entity,
    pub aim: FlightAim,
}
