use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Ball Roller".into(),
        }
    }
}

/// Locomotion controller tuning. Immutable for the duration of a session.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Continuous drive force scale (camera-relative input * speed).
    pub speed: f32,
    /// Soft cap: thrust fades to zero as velocity along the input direction
    /// approaches this.
    pub max_speed: f32,
    /// Jump impulse scale; velocity change is `2.0 * jump_scale` from rest.
    pub jump_scale: f32,
    /// Explicit downward gravity (engine gravity is zeroed).
    pub gravity_scale: f32,
    pub ball_radius: f32,
    /// Collider density; rapier derives the body mass from this.
    pub ball_density: f32,
    /// Added to the collider radius for the short grounding probes.
    pub ground_probe_margin: f32,
    /// Added to the collider radius for the single near-landing probe.
    pub almost_ground_margin: f32,
    /// Falling below this Y triggers the out-of-bounds recovery.
    pub kill_y: f32,
    pub spawn_height: f32,
}
impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 18.0,
            max_speed: 14.0,
            jump_scale: 2.0,
            gravity_scale: 14.0,
            ball_radius: 0.5,
            ball_density: 1.0,
            ground_probe_margin: 0.25,
            almost_ground_margin: 2.0,
            kill_y: -12.0,
            spawn_height: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f32,
    pub sensitivity: f32,
    pub initial_pitch_deg: f32,
    pub pitch_min_deg: f32,
    pub pitch_max_deg: f32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 9.0,
            sensitivity: 0.25,
            initial_pitch_deg: 20.0,
            pitch_min_deg: -10.0,
            pitch_max_deg: 65.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LevelConfig {
    pub ground_half_extent: f32,
    pub wall_height: f32,
    pub pickup_count: u32,
    pub pickup_ring_radius: f32,
    /// Pickups needed to win; defaults to every pickup on the ring.
    pub win_threshold: u32,
}
impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            ground_half_extent: 20.0,
            wall_height: 1.5,
            pickup_count: 12,
            pickup_ring_radius: 8.0,
            win_threshold: 12,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub level: LevelConfig,
    pub rapier_debug: bool,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Merge any number of RON files over the defaults; later files win per
    /// key. Unreadable files are reported but non-fatal.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        let mut replaced = false;
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                let val = incoming.take().unwrap();
                                merge_value(ev, val);
                                replaced = true;
                                break;
                            }
                        }
                        if !replaced {
                            bm.insert(k, incoming.unwrap());
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        if let Some(val) = merged {
            match val.clone().into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => (GameConfig::default(), used, {
                    let mut evec = errors;
                    evec.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    evec
                }),
            }
        } else {
            (GameConfig::default(), used, errors)
        }
    }

    /// Soft sanity checks; returned strings are logged as warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.player.gravity_scale < 1e-4 {
            w.push("player.gravity_scale near zero; the ball will float".into());
        }
        if self.player.gravity_scale > 200.0 {
            w.push(format!(
                "player.gravity_scale very large ({}); integration instability possible",
                self.player.gravity_scale
            ));
        }
        if self.player.max_speed > 0.0 && self.player.speed > 10.0 * self.player.max_speed {
            w.push(format!(
                "player.speed {} much larger than max_speed {}; the soft cap will dominate",
                self.player.speed, self.player.max_speed
            ));
        }
        if self.player.almost_ground_margin <= self.player.ground_probe_margin {
            w.push(format!(
                "almost_ground_margin {} not beyond ground_probe_margin {}; late-jump buffering never triggers",
                self.player.almost_ground_margin, self.player.ground_probe_margin
            ));
        }
        if self.player.kill_y >= 0.0 {
            w.push(format!(
                "player.kill_y {} is at or above the ground plane; instant out-of-bounds loop likely",
                self.player.kill_y
            ));
        }
        if self.level.win_threshold == 0 {
            w.push("level.win_threshold is 0; the session wins immediately".into());
        }
        if self.level.win_threshold > self.level.pickup_count {
            w.push(format!(
                "level.win_threshold {} exceeds pickup_count {}; the session can never be won",
                self.level.win_threshold, self.level.pickup_count
            ));
        }
        if self.level.pickup_ring_radius >= self.level.ground_half_extent {
            w.push(format!(
                "pickup_ring_radius {} outside ground_half_extent {}",
                self.level.pickup_ring_radius, self.level.ground_half_extent
            ));
        }
        w
    }

    /// Hard rejections for values the controller cannot run with.
    pub fn reject_invalid(&self) -> anyhow::Result<()> {
        let p = &self.player;
        if p.speed <= 0.0 {
            anyhow::bail!("player.speed must be > 0 (got {})", p.speed);
        }
        if p.max_speed <= 0.0 {
            anyhow::bail!("player.max_speed must be > 0 (got {})", p.max_speed);
        }
        if p.jump_scale < 0.0 {
            anyhow::bail!("player.jump_scale must be >= 0 (got {})", p.jump_scale);
        }
        if p.ball_radius <= 0.0 {
            anyhow::bail!("player.ball_radius must be > 0 (got {})", p.ball_radius);
        }
        if p.ball_density <= 0.0 {
            anyhow::bail!(
                "player.ball_density must be > 0 (got {}); a zero-mass body cannot be driven",
                p.ball_density
            );
        }
        if p.ground_probe_margin <= 0.0 {
            anyhow::bail!(
                "player.ground_probe_margin must be > 0 (got {})",
                p.ground_probe_margin
            );
        }
        if p.almost_ground_margin <= 0.0 {
            anyhow::bail!(
                "player.almost_ground_margin must be > 0 (got {})",
                p.almost_ground_margin
            );
        }
        Ok(())
    }
}
