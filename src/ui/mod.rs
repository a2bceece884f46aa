use auto_tour::{AutoTour, FocusBody, InfoPanel, ResetView, TourCommand};
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContext, EguiPlugin};
use egui::panel::TopBottomSide;
use egui::{containers, Align, Align2, Color32, RichText, Ui};
use solar_system::orbit::DrawOrbits;
use solar_system::registry::BodyRegistry;

mod input;
mod inspector;

#[derive(Default)]
pub struct UiPlugin {
    pub with_inspector: bool,
}

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin);
        }

        app.add_plugins(input::InputPlugin).add_systems(Update, ui);

        if self.with_inspector {
            app.add_plugins(inspector::Plugin);
        }
    }
}

#[derive(SystemParam)]
struct UiSystems<'w, 's> {
    diagnostics: Res<'w, DiagnosticsStore>,
    draw_orbits: ResMut<'w, DrawOrbits>,
    tour: Res<'w, AutoTour>,
    panel: Res<'w, InfoPanel>,
    registry: Option<Res<'w, BodyRegistry>>,
    q_names: Query<'w, 's, &'static Name>,
    commands: Commands<'w, 's>,
}

fn ui(mut this: UiSystems, mut q_egui: Query<&mut EguiContext, With<PrimaryWindow>>) {
    let Ok(mut egui) = q_egui.get_single_mut() else {
        return;
    };

    let ctx = egui.get_mut();
    this.toplevel(ctx);
}

impl UiSystems<'_, '_> {
    fn toplevel(&mut self, ctx: &egui::Context) {
        self.topbar(ctx);
        self.focused_name(ctx);
        self.info_window(ctx);
    }

    fn topbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::new(TopBottomSide::Top, "toolbar")
            .frame(default_translucent_frame())
            .show(ctx, |ui| {
                self.topbar_ui(ui);
            });
    }

    fn topbar_ui(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            self.body_selector(ui);
            ui.separator();
            self.tour_toggle(ui);
            if ui.button("Reset view").clicked() {
                self.commands.trigger(ResetView);
            }
            ui.with_layout(egui::Layout::right_to_left(Align::Max), |ui| {
                self.fps_display(ui);
                ui.separator();
                self.draw_orbit_toggle(ui);
            });
        });
    }

    fn body_selector(&mut self, ui: &mut Ui) {
        let bodies = self
            .registry
            .iter()
            .flat_map(|registry| registry.tour_order())
            .filter_map(|e| Some((e, self.q_names.get(e).ok()?.to_string())))
            .collect::<Vec<_>>();
        let current = self.panel.shown().map(|body| body.name.as_str());
        containers::ComboBox::new("bodies", "Focus")
            .selected_text(current.unwrap_or("None"))
            .show_ui(ui, |ui| {
                for (entity, name) in bodies {
                    if ui.button(name).clicked() {
                        self.commands.trigger(FocusBody::manual(entity));
                    }
                }
            });
    }

    fn tour_toggle(&mut self, ui: &mut Ui) {
        let label = if self.tour.is_touring() {
            "Stop Auto Tour"
        } else {
            "Start Auto Tour"
        };
        if ui.button(label).clicked() {
            self.commands.trigger(TourCommand::Toggle);
        }
    }

    fn draw_orbit_toggle(&mut self, ui: &mut Ui) {
        let mut draw = **self.draw_orbits;
        if ui.checkbox(&mut draw, "Draw orbits").changed() {
            **self.draw_orbits = draw;
        };
    }

    fn fps_display(&mut self, ui: &mut Ui) {
        let Some(fps) = self.diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) else {
            return;
        };
        if !fps.is_enabled {
            return;
        }
        ui.label(
            fps.average()
                .map(|v| format!("FPS: {v:2.1} Hz"))
                .unwrap_or_else(|| String::from("N/A")),
        );
    }

    fn focused_name(&self, ctx: &egui::Context) {
        let Some(body) = self.panel.shown() else {
            return;
        };
        egui::Area::new(egui::Id::new("focused_name"))
            .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 48.0))
            .interactable(false)
            .show(ctx, |ui| {
                ui.label(RichText::new(body.name.as_str()).size(36.0).color(Color32::WHITE));
            });
    }

    fn info_window(&self, ctx: &egui::Context) {
        let Some(body) = self.panel.shown() else {
            return;
        };
        egui::Window::new("Body info")
            .anchor(Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
            .collapsible(false)
            .resizable(false)
            .frame(default_translucent_frame())
            .show(ctx, |ui| {
                ui.heading(body.name.as_str());
                egui::Grid::new("body_info").num_columns(2).show(ui, |ui| {
                    for (label, value) in [
                        ("Distance", &body.info.distance),
                        ("Orbital period", &body.info.orbital_period),
                        ("Rotation period", &body.info.rotation_period),
                        ("Moons", &body.info.moons),
                    ] {
                        ui.label(label);
                        ui.label(value.as_str());
                        ui.end_row();
                    }
                });
            });
    }
}

fn default_translucent_frame() -> egui::Frame {
    let default_frame = egui::Frame::default();
    let [r, g, b, _] = default_frame.fill.to_array();
    default_frame
        .fill(egui::Color32::from_rgba_unmultiplied(r, g, b, 128))
        .inner_margin(egui::vec2(8.0, 6.0))
}
