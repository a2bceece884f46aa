use crate::body::{AngularSpeeds, BodyKind, BodyMotion, CelestialBody, OrbitPivot};
use crate::scene::manifest::SolarSystemManifest;
use bevy::prelude::*;
use std::iter;
use std::num::NonZeroUsize;

/// Every body of the system in tour order: the sun, then the planets as
/// listed in the manifest.
///
/// A registry cannot exist without a sun, which keeps the tour non-empty.
#[derive(Debug, Clone, Resource, Reflect)]
#[reflect(Resource)]
pub struct BodyRegistry {
    sun: Entity,
    planets: Vec<Entity>,
}

impl BodyRegistry {
    pub fn new(sun: Entity, planets: Vec<Entity>) -> Self {
        Self { sun, planets }
    }

    pub fn sun(&self) -> Entity {
        self.sun
    }

    pub fn planets(&self) -> &[Entity] {
        &self.planets
    }

    pub fn tour_order(&self) -> impl Iterator<Item = Entity> + '_ {
        iter::once(self.sun).chain(self.planets.iter().copied())
    }

    pub fn tour_len(&self) -> NonZeroUsize {
        NonZeroUsize::MIN.saturating_add(self.planets.len())
    }

    /// Body at position `index` of the tour, wrapping around its length.
    pub fn tour_stop(&self, index: usize) -> Entity {
        match index % self.tour_len() {
            0 => self.sun,
            i => self.planets[i - 1],
        }
    }
}

/// Spawns the simulated part of every body: name, metadata, motion and the
/// orbit pivot hierarchy. Meshes and materials are attached separately.
pub fn spawn_bodies(commands: &mut Commands, manifest: &SolarSystemManifest) -> BodyRegistry {
    let sun_config = &manifest.sun;
    let sun = commands
        .spawn((
            Name::new(sun_config.name.clone()),
            CelestialBody {
                kind: BodyKind::Star,
                info: sun_config.info.clone(),
                radius: sun_config.radius,
            },
            BodyMotion::new(AngularSpeeds {
                orbit: 0.0,
                rotation: sun_config.rotation_speed,
            }),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let planets = manifest
        .planets
        .iter()
        .map(|planet| {
            let body = commands
                .spawn((
                    Name::new(planet.name.clone()),
                    CelestialBody {
                        kind: BodyKind::Planet,
                        info: planet.info.clone(),
                        radius: planet.radius,
                    },
                    BodyMotion::new(AngularSpeeds {
                        orbit: planet.orbit_speed,
                        rotation: planet.rotation_speed,
                    }),
                    Transform::from_xyz(planet.distance, 0.0, 0.0),
                    Visibility::default(),
                ))
                .id();
            commands
                .spawn((
                    Name::new(format!("{} (Orbit)", planet.name)),
                    OrbitPivot {
                        body,
                        radius: planet.distance,
                    },
                    Transform::default(),
                    Visibility::default(),
                ))
                .add_child(body);
            body
        })
        .collect();

    BodyRegistry::new(sun, planets)
}
