use crate::ui;
use auto_tour::{AutoTourPlugin, DefaultView};
use bevy::core_pipeline::bloom::Bloom;
use bevy::log::{LogPlugin, DEFAULT_FILTER};
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_inspector_egui::DefaultInspectorConfigPlugin;
use pan_orbit::components::{PanOrbitCamera, PanOrbitState};
use pan_orbit::PanOrbitCameraPlugin;
use solar_system::scene::components::SceneCamera;
use solar_system::scene::{ActiveSystem, SolarSystemManifest};
use starrynight::{StarfieldSettings, StarryNightPlugin};

pub(crate) struct AppSettings {
    pub(crate) resolution: WindowResolution,
    pub(crate) with_inspector: bool,
    pub(crate) log_filter: Option<String>,
    pub(crate) manifest: SolarSystemManifest,
}

pub fn get_app(settings: AppSettings) -> App {
    let AppSettings {
        resolution,
        with_inspector,
        log_filter,
        manifest,
    } = settings;
    let filter = match log_filter {
        Some(extra) => format!("{DEFAULT_FILTER},{extra}"),
        None => DEFAULT_FILTER.to_string(),
    };
    let tour = AutoTourPlugin {
        dwell: manifest.tour.dwell(),
        flight: manifest.tour.flight(),
        default_view: DefaultView {
            eye: manifest.camera.position,
            target: manifest.camera.target,
        },
    };
    let stars = StarryNightPlugin {
        settings: StarfieldSettings {
            count: manifest.starfield.count,
            extent: manifest.starfield.extent,
            seed: manifest.starfield.seed,
        },
    };

    let mut app = App::new();
    app.add_plugins((
        DefaultPlugins
            .build()
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Bevy Solar Tour".to_string(),
                    resolution,
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter,
                ..default()
            }),
        MeshPickingPlugin,
        DefaultInspectorConfigPlugin,
        PanOrbitCameraPlugin,
    ))
    .add_plugins((
        solar_system::SolarSystemPlugin,
        stars,
        tour,
        ui::UiPlugin { with_inspector },
    ))
    .insert_resource(ActiveSystem(manifest))
    .insert_resource(ClearColor(Color::BLACK))
    .add_observer(on_add_scene_camera)
    .add_observer(debug_show_named_entities);
    app
}

fn debug_show_named_entities(trigger: Trigger<OnAdd, Name>, q: Query<&Name>) {
    let Ok(name) = q.get(trigger.entity()) else {
        return;
    };
    debug!("{entity}: {name}", entity = trigger.entity());
}

fn on_add_scene_camera(
    trigger: Trigger<OnAdd, SceneCamera>,
    mut commands: Commands,
    system: Res<ActiveSystem>,
    q_transform: Query<&Transform>,
) {
    let camera = trigger.entity();
    debug!("Add scene camera to {camera}");
    let eye = q_transform
        .get(camera)
        .map(|transform| transform.translation)
        .unwrap_or(system.camera.position);
    commands.entity(camera).insert((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Bloom {
            intensity: 0.05,
            ..default()
        },
        PanOrbitCamera::default(),
        PanOrbitState::looking_from(system.camera.target, eye),
    ));
}
