use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CelestialBody>()
            .register_type::<BodyMotion>()
            .register_type::<OrbitPivot>()
            .add_systems(Update, advance_bodies.in_set(MotionSystems));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, SystemSet)]
pub struct MotionSystems;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Reflect)]
pub enum BodyKind {
    Star,
    Planet,
}

/// Human-readable facts shown when a body is focused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Reflect)]
#[serde(rename_all = "kebab-case")]
pub struct BodyInfo {
    pub distance: String,
    pub orbital_period: String,
    pub rotation_period: String,
    pub moons: String,
}

#[derive(Debug, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct CelestialBody {
    pub kind: BodyKind,
    pub info: BodyInfo,
    /// Bounding radius of the rendered sphere, in world units.
    pub radius: f32,
}

/// Parent frame of an orbiting body. Rotates about +Y by the body's orbit angle.
#[derive(Debug, Copy, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct OrbitPivot {
    pub body: Entity,
    pub radius: f32,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Reflect)]
pub struct AngularSpeeds {
    /// Radians per frame around the parent.
    pub orbit: f32,
    /// Radians per frame around the body's own axis.
    pub rotation: f32,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Reflect)]
pub enum Pace {
    #[default]
    Normal,
    Slowed,
}

impl Pace {
    pub const SLOWED_FACTOR: f32 = 0.1;

    pub fn factor(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Slowed => Self::SLOWED_FACTOR,
        }
    }
}

/// Per-frame angular motion of a body.
///
/// Only the baseline speeds are stored; the current speeds are always the
/// baseline scaled by the [`Pace`] factor.
#[derive(Debug, Copy, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct BodyMotion {
    baseline: AngularSpeeds,
    pace: Pace,
    orbit_angle: f32,
    spin_angle: f32,
}

impl BodyMotion {
    pub fn new(baseline: AngularSpeeds) -> Self {
        Self {
            baseline,
            pace: Pace::Normal,
            orbit_angle: 0.0,
            spin_angle: 0.0,
        }
    }

    pub fn baseline(&self) -> AngularSpeeds {
        self.baseline
    }

    pub fn current(&self) -> AngularSpeeds {
        let factor = self.pace.factor();
        AngularSpeeds {
            orbit: self.baseline.orbit * factor,
            rotation: self.baseline.rotation * factor,
        }
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn set_pace(&mut self, pace: Pace) {
        self.pace = pace;
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    pub fn spin_angle(&self) -> f32 {
        self.spin_angle
    }

    /// Steps both angles by one frame at the current speeds.
    pub fn advance(&mut self) {
        let current = self.current();
        self.orbit_angle = (self.orbit_angle + current.orbit).rem_euclid(TAU);
        self.spin_angle = (self.spin_angle + current.rotation).rem_euclid(TAU);
    }
}

/// Sets the pace of every body at once.
pub fn pace_all(q_motion: &mut Query<&mut BodyMotion>, pace: Pace) {
    for mut motion in q_motion.iter_mut() {
        motion.set_pace(pace);
    }
}

fn advance_bodies(
    mut q_bodies: Query<(&mut BodyMotion, &mut Transform), Without<OrbitPivot>>,
    mut q_pivots: Query<(&OrbitPivot, &mut Transform), Without<BodyMotion>>,
) {
    for (mut motion, mut transform) in &mut q_bodies {
        motion.advance();
        transform.rotation = Quat::from_rotation_y(motion.spin_angle());
    }
    for (pivot, mut transform) in &mut q_pivots {
        let Ok((motion, _)) = q_bodies.get(pivot.body) else {
            continue;
        };
        transform.rotation = Quat::from_rotation_y(motion.orbit_angle());
    }
}
