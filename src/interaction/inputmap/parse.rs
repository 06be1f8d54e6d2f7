use super::types::*;
use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ParsedInputConfig {
    pub input_map: InputMap,
    pub errors: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ActionDecl {
    description: Option<String>,
    kind: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct VirtualAxisToml {
    action: String,
    component: String,
    pos: String,
    neg: String,
    scale: Option<f32>,
}

#[derive(Debug, serde::Deserialize)]
struct RootToml {
    actions: Option<HashMap<String, ActionDecl>>,
    bindings: Option<HashMap<String, Vec<String>>>,
    virtual_axes: Option<Vec<VirtualAxisToml>>,
}

pub fn parse_input_toml(raw: &str) -> ParsedInputConfig {
    let mut result = ParsedInputConfig::default();
    let root: RootToml = match toml::from_str(raw) {
        Ok(r) => r,
        Err(e) => {
            result.errors.push(format!("Top-level parse: {e}"));
            return result;
        }
    };

    let mut actions: Vec<ActionMeta> = Vec::new();
    let mut name_to_id = HashMap::new();
    if let Some(map) = root.actions {
        // Sort for stable ids; toml tables have no inherent order.
        let mut decls: Vec<_> = map.into_iter().collect();
        decls.sort_by(|a, b| a.0.cmp(&b.0));
        for (idx, (name, decl)) in decls.into_iter().enumerate() {
            if !validate_action_name(&name) {
                result
                    .errors
                    .push(format!("Invalid action name '{name}': must be PascalCase"));
                continue;
            }
            let kind = decl.kind.as_deref().unwrap_or("Binary");
            let kind_enum = match kind {
                "Binary" => ActionKind::Binary,
                "Axis1" => ActionKind::Axis1,
                "Axis2" => ActionKind::Axis2,
                other => {
                    result.errors.push(format!(
                        "Action {name} unknown kind '{other}': expected Binary|Axis1|Axis2"
                    ));
                    ActionKind::Binary
                }
            };
            let id = ActionId(idx as u16);
            actions.push(ActionMeta {
                id,
                name: name.clone(),
                description: decl.description.unwrap_or_default(),
                kind: kind_enum,
            });
            name_to_id.insert(name, id);
        }
    }

    let mut dynamic_states: Vec<ActionDynamicState> = Vec::with_capacity(actions.len());
    for meta in &actions {
        dynamic_states.push(match meta.kind {
            ActionKind::Binary => ActionDynamicState::Binary(ActionStateBinary::default()),
            ActionKind::Axis1 => ActionDynamicState::Axis1(ActionStateAxis1::default()),
            ActionKind::Axis2 => ActionDynamicState::Axis2(ActionStateAxis2::default()),
        });
    }

    let mut input_map = InputMap {
        actions,
        name_to_id,
        dynamic_states,
        ..Default::default()
    };

    if let Some(bindings) = root.bindings {
        let mut pairs: Vec<_> = bindings.into_iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        for (action_name, list) in pairs {
            let Some(aid) = input_map.name_to_id.get(&action_name).copied() else {
                result
                    .errors
                    .push(format!("Binding references unknown action '{action_name}'"));
                continue;
            };
            for spec in &list {
                match parse_token(spec) {
                    Ok(token) => input_map.bindings.push(Binding { action: aid, token }),
                    Err(err) => result
                        .errors
                        .push(format!("[binding {action_name} '{spec}'] {err}")),
                }
            }
        }
    }

    if let Some(vas) = root.virtual_axes {
        for va in vas {
            let Some(aid) = input_map.name_to_id.get(&va.action).copied() else {
                result
                    .errors
                    .push(format!("VirtualAxis references unknown action '{}'", va.action));
                continue;
            };
            let component = match va.component.as_str() {
                "x" | "X" => AxisComponent::X,
                "y" | "Y" => AxisComponent::Y,
                other => {
                    result
                        .errors
                        .push(format!("VirtualAxis '{}': bad component '{other}'", va.action));
                    continue;
                }
            };
            match (parse_token(&va.pos), parse_token(&va.neg)) {
                (Ok(pos), Ok(neg)) => input_map.virtual_axes.push(VirtualAxis {
                    action: aid,
                    component,
                    pos,
                    neg,
                    scale: va.scale.unwrap_or(1.0),
                }),
                (Err(e), _) => result
                    .errors
                    .push(format!("VirtualAxis pos error '{}': {e}", va.action)),
                (_, Err(e)) => result
                    .errors
                    .push(format!("VirtualAxis neg error '{}': {e}", va.action)),
            }
        }
    }

    result.input_map = input_map;
    result
}

fn validate_action_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || !bytes[0].is_ascii_uppercase() {
        return false;
    }
    !name.chars().any(|c| !c.is_ascii_alphanumeric())
}

fn parse_token(s: &str) -> Result<RawToken, String> {
    if let Some(rest) = s.strip_prefix("Key:") {
        return parse_keycode(rest);
    }
    if let Some(rest) = s.strip_prefix("Mouse:") {
        return match rest {
            "Left" => Ok(RawToken::MouseBtn(MouseButton::Left)),
            "Right" => Ok(RawToken::MouseBtn(MouseButton::Right)),
            "Middle" => Ok(RawToken::MouseBtn(MouseButton::Middle)),
            other => Err(format!("Unknown mouse button '{other}'")),
        };
    }
    if s == "MouseMove:XY" {
        return Ok(RawToken::MouseMoveXy);
    }
    Err(format!("Unrecognized token '{s}'"))
}

fn parse_keycode(name: &str) -> Result<RawToken, String> {
    use bevy::input::keyboard::KeyCode;
    let kc = match name {
        "Space" => KeyCode::Space,
        "Escape" => KeyCode::Escape,
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "W" | "KeyW" => KeyCode::KeyW,
        "A" | "KeyA" => KeyCode::KeyA,
        "S" | "KeyS" => KeyCode::KeyS,
        "D" | "KeyD" => KeyCode::KeyD,
        "R" | "KeyR" => KeyCode::KeyR,
        "P" | "KeyP" => KeyCode::KeyP,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ControlLeft" => KeyCode::ControlLeft,
        "F1" => KeyCode::F1,
        other => return Err(format!("Unsupported KeyCode '{other}' (extend parser)")),
    };
    Ok(RawToken::Key(kc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[actions]
Jump = { kind = "Binary", description = "Jump / buffered jump" }
Move = { kind = "Axis2" }
Look = { kind = "Axis2" }

[bindings]
Jump = ["Key:Space"]
Look = ["MouseMove:XY"]

[[virtual_axes]]
action = "Move"
component = "x"
pos = "Key:D"
neg = "Key:A"

[[virtual_axes]]
action = "Move"
component = "y"
pos = "Key:W"
neg = "Key:S"
"#;

    #[test]
    fn parses_sample() {
        let parsed = parse_input_toml(SAMPLE);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(parsed.input_map.actions.len(), 3);
        assert_eq!(parsed.input_map.bindings.len(), 2);
        assert_eq!(parsed.input_map.virtual_axes.len(), 2);
        assert!(parsed.input_map.name_to_id.contains_key("Jump"));
    }

    #[test]
    fn unknown_action_binding_reports_error() {
        let parsed = parse_input_toml("[bindings]\nNope = [\"Key:Space\"]\n");
        assert!(parsed
            .errors
            .iter()
            .any(|e| e.contains("unknown action 'Nope'")));
    }

    #[test]
    fn bad_token_reports_error() {
        let parsed =
            parse_input_toml("[actions]\nJump = {}\n[bindings]\nJump = [\"Pad:North\"]\n");
        assert!(parsed.errors.iter().any(|e| e.contains("Unrecognized token")));
    }

    #[test]
    fn lowercase_action_name_rejected() {
        let parsed = parse_input_toml("[actions]\njump = {}\n");
        assert!(parsed.errors.iter().any(|e| e.contains("PascalCase")));
        assert!(parsed.input_map.actions.is_empty());
    }
}
