use bevy::picking::PickingBehavior;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Default)]
pub struct StarryNightPlugin {
    pub settings: StarfieldSettings,
}

impl Plugin for StarryNightPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Starfield>()
            .insert_resource(self.settings.clone())
            .add_systems(Startup, spawn_starfield);
    }
}

#[derive(Debug, Clone, Resource)]
pub struct StarfieldSettings {
    pub count: usize,
    /// Stars fill a cube of this side length centered on the origin.
    pub extent: f32,
    pub seed: u64,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            count: 4500,
            extent: 1800.0,
            seed: 0x5747,
        }
    }
}

#[derive(Debug, Copy, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct Starfield;

/// Star positions, uniformly scattered in the settings' cube. The same seed
/// always gives the same sky.
///
/// Panics if `extent` is not a positive finite number.
pub fn star_positions(settings: &StarfieldSettings) -> Vec<[f32; 3]> {
    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
    let half = settings.extent / 2.0;
    (0..settings.count)
        .map(|_| {
            [
                rng.random_range(-half..half),
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            ]
        })
        .collect()
}

fn spawn_starfield(
    settings: Res<StarfieldSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if settings.count == 0 || !(settings.extent.is_finite() && settings.extent > 0.0) {
        return;
    }
    let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, star_positions(&settings));
    debug!("Spawning {} stars", settings.count);
    commands.spawn((
        Name::new("Starfield"),
        Starfield,
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        PickingBehavior::IGNORE,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_fill_the_cube() {
        let settings = StarfieldSettings::default();
        let stars = star_positions(&settings);
        assert_eq!(stars.len(), 4500);
        assert!(stars.iter().flatten().all(|c| (-900.0..900.0).contains(c)));
        // Uniform scatter reaches well into every octant.
        let far = stars.iter().filter(|s| s.iter().all(|c| c.abs() > 450.0)).count();
        assert!(far > 100, "only {far} stars in the outer corners");
    }

    #[test]
    fn same_seed_same_sky() {
        let settings = StarfieldSettings {
            count: 32,
            ..default()
        };
        assert_eq!(star_positions(&settings), star_positions(&settings));

        let other = StarfieldSettings {
            seed: settings.seed + 1,
            ..settings.clone()
        };
        assert_ne!(star_positions(&settings), star_positions(&other));
    }
}
