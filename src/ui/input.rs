use auto_tour::{FocusBody, ResetView, TourCommand};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiUserTextures};
use solar_system::body::CelestialBody;

pub(super) struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EguiClaims>()
            .add_observer(focus_on_click)
            .add_systems(
                Update,
                (
                    update_egui_claims.run_if(resource_exists::<EguiUserTextures>),
                    shortcuts,
                )
                    .chain(),
            );
    }
}

/// Which inputs egui is using this frame; the scene ignores those.
#[derive(Debug, Default, Resource)]
struct EguiClaims {
    pointer: bool,
    keyboard: bool,
}

fn update_egui_claims(
    mut claims: ResMut<EguiClaims>,
    mut egui: EguiContexts,
    q_windows: Query<Entity, With<Window>>,
) {
    let mut ret = EguiClaims::default();
    for window in &q_windows {
        if let Some(ctx) = egui.try_ctx_for_entity_mut(window) {
            ret.pointer |= ctx.is_pointer_over_area() || ctx.wants_pointer_input();
            ret.keyboard |= ctx.wants_keyboard_input();
        }
    }
    *claims = ret;
}

/// Picking events bubble up the hierarchy, so a click on a ring reaches the
/// planet holding it.
fn focus_on_click(
    mut trigger: Trigger<Pointer<Click>>,
    mut commands: Commands,
    claims: Res<EguiClaims>,
    q_bodies: Query<(), With<CelestialBody>>,
) {
    let body = trigger.entity();
    if trigger.event().button != PointerButton::Primary || !q_bodies.contains(body) {
        return;
    }
    trigger.propagate(false);
    if claims.pointer {
        return;
    }
    commands.trigger(FocusBody::manual(body));
}

fn shortcuts(
    mut commands: Commands,
    claims: Res<EguiClaims>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
) {
    if !claims.keyboard && keyboard.just_pressed(KeyCode::KeyT) {
        commands.trigger(TourCommand::Toggle);
    }
    if !claims.pointer && mouse_buttons.just_pressed(MouseButton::Right) {
        commands.trigger(ResetView);
    }
}
