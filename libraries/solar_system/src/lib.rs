use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

pub mod body;
pub mod orbit;
pub mod registry;
pub mod scene;

pub struct SolarSystemPlugin;

impl PluginGroup for SolarSystemPlugin {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(body::MotionPlugin)
            .add(orbit::OrbitLinesPlugin::default())
            .add(scene::PlanetScenePlugin)
    }
}
