use crate::registry::BodyRegistry;
use crate::scene::components::{SceneCamera, SunLight};
use crate::scene::manifest::{CameraConfig, RingConfig, SolarSystemManifest};
use bevy::asset::LoadState;
use bevy::prelude::*;
use std::f32::consts;

/// Materials whose texture is still loading. A texture that fails to load is
/// dropped from its material so the body shows up blank instead of not at all.
#[derive(Resource, Default)]
pub struct PendingTextures(Vec<(AssetId<StandardMaterial>, Handle<Image>)>);

impl PendingTextures {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn track(&mut self, material: &Handle<StandardMaterial>, texture: Option<&Handle<Image>>) {
        if let Some(texture) = texture {
            self.0.push((material.id(), texture.clone()));
        }
    }
}

pub(super) struct SceneAssets<'a> {
    pub(super) asset_server: &'a AssetServer,
    pub(super) meshes: &'a mut Assets<Mesh>,
    pub(super) materials: &'a mut Assets<StandardMaterial>,
    pub(super) pending: &'a mut PendingTextures,
}

impl SceneAssets<'_> {
    fn texture(&self, path: Option<&String>) -> Option<Handle<Image>> {
        path.map(|path| self.asset_server.load(path.clone()))
    }

    fn material(&mut self, material: StandardMaterial) -> Handle<StandardMaterial> {
        let texture = material.base_color_texture.clone();
        let handle = self.materials.add(material);
        self.pending.track(&handle, texture.as_ref());
        handle
    }
}

pub(super) fn attach_visuals(
    commands: &mut Commands,
    assets: &mut SceneAssets,
    manifest: &SolarSystemManifest,
    registry: &BodyRegistry,
) {
    let sun = &manifest.sun;
    let sun_mesh = assets
        .meshes
        .add(Sphere::new(sun.radius).mesh().uv(64, 64));
    let sun_material = StandardMaterial {
        base_color_texture: assets.texture(sun.texture.as_ref()),
        unlit: true,
        ..default()
    };
    let sun_material = assets.material(sun_material);
    commands
        .entity(registry.sun())
        .insert((Mesh3d(sun_mesh), MeshMaterial3d(sun_material)));

    for (planet, &entity) in manifest.planets.iter().zip(registry.planets()) {
        let mesh = assets
            .meshes
            .add(Sphere::new(planet.radius).mesh().uv(48, 48));
        let material = StandardMaterial {
            base_color_texture: assets.texture(planet.texture.as_ref()),
            perceptual_roughness: 0.9,
            ..default()
        };
        let material = assets.material(material);
        let mut body = commands.entity(entity);
        body.insert((Mesh3d(mesh), MeshMaterial3d(material)));
        if let Some(ring) = &planet.ring {
            let ring = spawn_ring(&mut body.commands(), assets, &planet.name, ring);
            body.add_child(ring);
        }
    }
}

fn spawn_ring(
    commands: &mut Commands,
    assets: &mut SceneAssets,
    planet: &str,
    ring: &RingConfig,
) -> Entity {
    let mesh = assets.meshes.add(Annulus::new(ring.inner, ring.outer));
    let material = StandardMaterial {
        base_color_texture: assets.texture(ring.texture.as_ref()),
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        unlit: true,
        ..default()
    };
    let material = assets.material(material);
    commands
        .spawn((
            Name::new(format!("{planet} (Ring)")),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            // Annulus meshes face +Z; lay the ring in the equatorial plane.
            Transform::from_rotation(Quat::from_rotation_x(-consts::FRAC_PI_2)),
        ))
        .id()
}

pub(super) fn spawn_lights(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0x33, 0x33, 0x33),
        brightness: 400.0,
    });
    commands.spawn((
        Name::new("Sunlight"),
        SunLight,
        PointLight {
            color: Color::WHITE,
            intensity: 2.5e8,
            range: 1000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
    ));
}

pub(super) fn spawn_camera(commands: &mut Commands, config: &CameraConfig) -> Entity {
    commands
        .spawn((
            Name::new("Camera"),
            SceneCamera,
            Projection::Perspective(PerspectiveProjection {
                fov: config.fov_degrees.to_radians(),
                near: 0.1,
                far: 2000.0,
                ..default()
            }),
            Transform::from_translation(config.position).looking_at(config.target, Vec3::Y),
        ))
        .id()
}

pub(super) fn blank_failed_textures(
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingTextures>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    pending.0.retain(|(material, texture)| {
        match asset_server.load_state(texture.id()) {
            LoadState::Failed(err) => {
                warn!("Texture {:?} failed to load, rendering blank: {err}", texture.path());
                if let Some(material) = materials.get_mut(*material) {
                    material.base_color_texture = None;
                }
                false
            }
            LoadState::Loaded => false,
            _ => true,
        }
    });
}
