use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Binary,
    Axis1,
    Axis2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u16); // internal index (array position)

#[derive(Debug, Clone)]
pub struct ActionMeta {
    pub id: ActionId,
    pub name: String,
    pub description: String,
    pub kind: ActionKind,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct ActionStateBinary {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}
impl ActionStateBinary {
    pub fn clear_transitions(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct ActionStateAxis1 {
    pub value: f32,
    pub active: bool,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct ActionStateAxis2 {
    pub value: Vec2,
    pub delta: Vec2,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub enum ActionDynamicState {
    Binary(ActionStateBinary),
    Axis1(ActionStateAxis1),
    Axis2(ActionStateAxis2),
}

impl ActionDynamicState {
    pub fn as_binary_mut(&mut self) -> Option<&mut ActionStateBinary> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }
    pub fn as_axis2_mut(&mut self) -> Option<&mut ActionStateAxis2> {
        match self {
            Self::Axis2(a) => Some(a),
            _ => None,
        }
    }
}

/// A raw device source a binding or virtual axis can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawToken {
    Key(KeyCode),
    MouseBtn(MouseButton),
    /// Accumulated mouse motion mapped onto an Axis2 action.
    MouseMoveXy,
}

#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub action: ActionId,
    pub token: RawToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisComponent {
    X,
    Y,
}

/// Key pair contributing to one component of an Axis2 action (e.g. W/S -> Move.y).
#[derive(Debug, Clone, Copy)]
pub struct VirtualAxis {
    pub action: ActionId,
    pub component: AxisComponent,
    pub pos: RawToken,
    pub neg: RawToken,
    pub scale: f32,
}

#[derive(Resource, Debug, Default)]
pub struct InputMap {
    pub actions: Vec<ActionMeta>,
    pub name_to_id: HashMap<String, ActionId>,
    pub bindings: Vec<Binding>,
    pub virtual_axes: Vec<VirtualAxis>,
    pub dynamic_states: Vec<ActionDynamicState>,
    pub frame_counter: u64,
}

impl InputMap {
    pub fn get_state(&self, name: &str) -> Option<&ActionDynamicState> {
        self.name_to_id
            .get(name)
            .map(|id| &self.dynamic_states[id.0 as usize])
    }
    pub fn pressed(&self, name: &str) -> bool {
        match self.get_state(name) {
            Some(ActionDynamicState::Binary(b)) => b.pressed,
            Some(ActionDynamicState::Axis1(a)) => a.active,
            Some(ActionDynamicState::Axis2(a)) => a.active,
            None => false,
        }
    }
    pub fn just_pressed(&self, name: &str) -> bool {
        matches!(
            self.get_state(name),
            Some(ActionDynamicState::Binary(b)) if b.just_pressed
        )
    }
    pub fn just_released(&self, name: &str) -> bool {
        matches!(
            self.get_state(name),
            Some(ActionDynamicState::Binary(b)) if b.just_released
        )
    }
    pub fn axis1(&self, name: &str) -> f32 {
        match self.get_state(name) {
            Some(ActionDynamicState::Axis1(a)) => a.value,
            _ => 0.0,
        }
    }
    pub fn axis2(&self, name: &str) -> Vec2 {
        match self.get_state(name) {
            Some(ActionDynamicState::Axis2(a)) => a.value,
            _ => Vec2::ZERO,
        }
    }
    /// Per-frame delta for motion-driven Axis2 actions (mouse look).
    pub fn axis2_delta(&self, name: &str) -> Vec2 {
        match self.get_state(name) {
            Some(ActionDynamicState::Axis2(a)) => a.delta,
            _ => Vec2::ZERO,
        }
    }
}
