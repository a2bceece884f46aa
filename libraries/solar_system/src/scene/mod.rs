use crate::registry;
use bevy::prelude::*;

pub mod components;
pub mod error;
pub mod manifest;
mod visuals;

pub use error::ManifestError;
pub use manifest::{ActiveSystem, SolarSystemManifest};
pub use visuals::PendingTextures;

/// Builds the scene described by the [`ActiveSystem`] resource at startup.
pub struct PlanetScenePlugin;

impl Plugin for PlanetScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::SceneCamera>()
            .register_type::<components::SunLight>()
            .init_resource::<PendingTextures>()
            .add_systems(Startup, spawn_scene.run_if(resource_exists::<ActiveSystem>))
            .add_systems(
                Update,
                visuals::blank_failed_textures
                    .run_if(|pending: Res<PendingTextures>| !pending.is_empty()),
            );
    }
}

fn spawn_scene(
    mut commands: Commands,
    system: Res<ActiveSystem>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut pending: ResMut<PendingTextures>,
) {
    let registry = registry::spawn_bodies(&mut commands, &system);
    let mut assets = visuals::SceneAssets {
        asset_server: &asset_server,
        meshes: &mut meshes,
        materials: &mut materials,
        pending: &mut pending,
    };
    visuals::attach_visuals(&mut commands, &mut assets, &system, &registry);
    visuals::spawn_lights(&mut commands);
    let camera = visuals::spawn_camera(&mut commands, &system.camera);
    info!("Spawned {} bodies, camera {camera}", registry.tour_len());
    commands.insert_resource(registry);
}
