use bevy::prelude::*;

use crate::components::{PanOrbitCamera, PanOrbitState};
use crate::flight::CameraFlight;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[derive(Default)]
pub(crate) struct BlockedInputs {
    pointer: bool,
    keyboard: bool,
}

pub(crate) fn get_blocked_inputs(
    mut egui: bevy_egui::EguiContexts,
    q_window_entities: Query<Entity, With<Window>>,
) -> BlockedInputs {
    let mut ret = BlockedInputs::default();
    for window_entity in &q_window_entities {
        if let Some(ctx) = egui.try_ctx_for_entity_mut(window_entity) {
            ret.pointer |= ctx.wants_pointer_input();
            ret.keyboard |= ctx.wants_keyboard_input();
        }
    }
    ret
}

/// Free camera manipulation. Cameras in a [`CameraFlight`] are left alone
/// until they land.
pub(crate) fn pan_orbit_camera(
    In(blocked_inputs): In<BlockedInputs>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut evr_motion: EventReader<MouseMotion>,
    mut evr_scroll: EventReader<MouseWheel>,
    mut q_camera: Query<
        (&PanOrbitCamera, &mut PanOrbitState, &mut Transform),
        Without<CameraFlight>,
    >,
) {
    // Drain the readers even when blocked, so stale motion isn't applied once
    // the pointer leaves the UI.
    let mut total_motion: Vec2 = evr_motion.read().map(|ev| ev.delta).sum();
    let scroll = evr_scroll.read().fold(
        (Vec2::ZERO, Vec2::ZERO),
        |(mut lines, mut pixels), ev| {
            match ev.unit {
                MouseScrollUnit::Line => lines += Vec2::new(ev.x, -ev.y),
                MouseScrollUnit::Pixel => pixels += Vec2::new(ev.x, -ev.y),
            }
            (lines, pixels)
        },
    );
    if blocked_inputs.pointer {
        return;
    }
    let (total_scroll_lines, total_scroll_pixels) = scroll;

    // Bevy's world space is Y-up, window coordinates are Y-down.
    total_motion.y = -total_motion.y;

    for (settings, mut state, mut transform) in &mut q_camera {
        let mut total_pan = Vec2::ZERO;
        let mut total_orbit = Vec2::ZERO;
        if mouse_buttons.pressed(MouseButton::Left)
            && !blocked_inputs.keyboard
            && (keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight))
        {
            total_pan -= total_motion * settings.pan_sensitivity;
        } else if mouse_buttons.pressed(MouseButton::Left) {
            total_orbit -= total_motion * settings.orbit_sensitivity;
        }

        let mut total_zoom = Vec2::ZERO;
        total_zoom -=
            total_scroll_lines * settings.scroll_line_sensitivity * settings.zoom_sensitivity;
        total_zoom -=
            total_scroll_pixels * settings.scroll_pixel_sensitivity * settings.zoom_sensitivity;

        // Orbiting from upside-down reverses the horizontal direction for the
        // whole drag.
        if mouse_buttons.just_pressed(MouseButton::Left) {
            state.upside_down = state.pitch < -FRAC_PI_2 || state.pitch > FRAC_PI_2;
        }
        if state.upside_down {
            total_orbit.x = -total_orbit.x;
        }

        let mut any = false;

        // Zoom is exponential so it feels the same at every distance.
        if total_zoom != Vec2::ZERO {
            any = true;
            state.radius *= (-total_zoom.y).exp();
        }

        if total_orbit != Vec2::ZERO {
            any = true;
            state.yaw = wrap_angle(state.yaw + total_orbit.x);
            state.pitch = wrap_angle(state.pitch + total_orbit.y);
        }

        // Pan along the view plane, scaled by the radius to match the zoom.
        if total_pan != Vec2::ZERO {
            any = true;
            let radius = state.radius;
            state.center += transform.right() * total_pan.x * radius;
            state.center += transform.up() * total_pan.y * radius;
        }

        if any || state.is_changed() || state.is_added() {
            transform.rotation = state.rotation();
            transform.translation = state.eye();
        }
    }
}

/// Keeps an angle within ±180 degrees.
fn wrap_angle(angle: f32) -> f32 {
    if angle > PI {
        angle - TAU
    } else if angle < -PI {
        angle + TAU
    } else {
        angle
    }
}
