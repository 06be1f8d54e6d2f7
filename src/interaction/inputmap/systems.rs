//! Systems translating raw device state into named action states.
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use super::types::*;

pub fn system_collect_inputs(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut input_map: ResMut<InputMap>,
) {
    input_map.frame_counter += 1;

    let mut mouse_delta = Vec2::ZERO;
    for ev in motion_evr.read() {
        mouse_delta += ev.delta;
    }

    // Binary actions: re-derive from device state each frame, OR-merging all
    // bindings so any bound token can drive the action.
    for state in input_map.dynamic_states.iter_mut() {
        if let Some(b) = state.as_binary_mut() {
            b.clear_transitions();
            b.pressed = false;
        }
    }
    let bindings = input_map.bindings.clone();
    for binding in &bindings {
        let (pressed, just_pressed, just_released) = match binding.token {
            RawToken::Key(k) => (
                keyboard.pressed(k),
                keyboard.just_pressed(k),
                keyboard.just_released(k),
            ),
            RawToken::MouseBtn(b) => (
                mouse_buttons.pressed(b),
                mouse_buttons.just_pressed(b),
                mouse_buttons.just_released(b),
            ),
            RawToken::MouseMoveXy => continue, // handled below
        };
        if let Some(state) = input_map.dynamic_states.get_mut(binding.action.0 as usize) {
            if let Some(b) = state.as_binary_mut() {
                b.pressed |= pressed;
                b.just_pressed |= just_pressed;
                b.just_released |= just_released;
            }
        }
    }

    // Motion-driven Axis2 (mouse look): value carries the per-frame delta.
    for binding in &bindings {
        if binding.token != RawToken::MouseMoveXy {
            continue;
        }
        if let Some(state) = input_map.dynamic_states.get_mut(binding.action.0 as usize) {
            if let Some(a2) = state.as_axis2_mut() {
                a2.delta = mouse_delta;
                a2.value = mouse_delta;
                a2.active = mouse_delta.length_squared() > 0.0;
            }
        }
    }

    // Virtual key-pair axes composing Axis2 components (movement).
    let axes = input_map.virtual_axes.clone();
    let mut composed: Vec<(ActionId, Vec2)> = Vec::new();
    for va in &axes {
        let mut v = 0.0;
        if token_pressed(&keyboard, &mouse_buttons, va.pos) {
            v += 1.0;
        }
        if token_pressed(&keyboard, &mouse_buttons, va.neg) {
            v -= 1.0;
        }
        v = (v * va.scale).clamp(-1.0, 1.0);
        let entry = composed.iter_mut().find(|(id, _)| *id == va.action);
        let slot = match entry {
            Some((_, vec)) => vec,
            None => {
                composed.push((va.action, Vec2::ZERO));
                &mut composed.last_mut().unwrap().1
            }
        };
        // Multiple pairs may feed one component (WASD + arrows); contributions sum.
        match va.component {
            AxisComponent::X => slot.x = (slot.x + v).clamp(-1.0, 1.0),
            AxisComponent::Y => slot.y = (slot.y + v).clamp(-1.0, 1.0),
        }
    }
    for (aid, value) in composed {
        if let Some(state) = input_map.dynamic_states.get_mut(aid.0 as usize) {
            if let Some(a2) = state.as_axis2_mut() {
                a2.delta = value - a2.value;
                a2.value = value;
                a2.active = value.length_squared() > 0.0;
            }
        }
    }
}

fn token_pressed(
    keyboard: &ButtonInput<KeyCode>,
    mouse: &ButtonInput<MouseButton>,
    token: RawToken,
) -> bool {
    match token {
        RawToken::Key(k) => keyboard.pressed(k),
        RawToken::MouseBtn(b) => mouse.pressed(b),
        RawToken::MouseMoveXy => false,
    }
}
