use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use winit::keyboard::KeyCode;

use super::session::SessionState;

/// How far one steering command moves the lateral target.
const TARGET_STEP: f32 = 0.5;

/// Logical steering commands, decoupled from platform key codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteerAction {
    /// Shift the lateral target toward -1.
    SteerRight,
    /// Shift the lateral target toward +1.
    SteerLeft,
    /// Jump to the other face of the strip.
    FlipSide,
}

impl SteerAction {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SteerRight => "Steer Right",
            Self::SteerLeft => "Steer Left",
            Self::FlipSide => "Flip Side",
        }
    }

    pub fn all() -> &'static [SteerAction] {
        &[Self::SteerRight, Self::SteerLeft, Self::FlipSide]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
}

impl KeyBind {
    pub fn new(code: KeyCode) -> Self {
        Self { code }
    }

    pub fn display_name(&self) -> String {
        format!("{:?}", self.code)
    }
}

impl Serialize for KeyBind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:?}", self.code))
    }
}

impl<'de> Deserialize<'de> for KeyBind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let code = keycode_from_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Unknown key code: {s}")))?;
        Ok(KeyBind { code })
    }
}

fn keycode_from_str(s: &str) -> Option<KeyCode> {
    // Match the Debug output of KeyCode variants
    match s {
        "ArrowUp" => Some(KeyCode::ArrowUp),
        "ArrowDown" => Some(KeyCode::ArrowDown),
        "ArrowLeft" => Some(KeyCode::ArrowLeft),
        "ArrowRight" => Some(KeyCode::ArrowRight),
        "KeyA" => Some(KeyCode::KeyA),
        "KeyD" => Some(KeyCode::KeyD),
        "KeyS" => Some(KeyCode::KeyS),
        "KeyW" => Some(KeyCode::KeyW),
        "KeyQ" => Some(KeyCode::KeyQ),
        "KeyE" => Some(KeyCode::KeyE),
        "KeyX" => Some(KeyCode::KeyX),
        "KeyZ" => Some(KeyCode::KeyZ),
        "Space" => Some(KeyCode::Space),
        "Enter" => Some(KeyCode::Enter),
        "Tab" => Some(KeyCode::Tab),
        _ => None,
    }
}

pub fn default_bindings() -> HashMap<SteerAction, KeyBind> {
    use SteerAction::*;
    HashMap::from([
        (SteerRight, KeyBind::new(KeyCode::ArrowRight)),
        (SteerLeft, KeyBind::new(KeyCode::ArrowLeft)),
        (FlipSide, KeyBind::new(KeyCode::ArrowDown)),
    ])
}

/// Routes key presses into target-state mutations, debounced by the
/// session's input gate.
pub struct InputController {
    reverse_map: HashMap<KeyCode, SteerAction>,
}

impl InputController {
    pub fn new(bindings: HashMap<SteerAction, KeyBind>) -> Self {
        Self {
            reverse_map: build_reverse_map(&bindings),
        }
    }

    #[cfg(test)]
    pub fn with_defaults() -> Self {
        Self::new(default_bindings())
    }

    pub fn action_for(&self, code: KeyCode) -> Option<SteerAction> {
        self.reverse_map.get(&code).copied()
    }

    /// Handle one key press. Any press closes the gate for the debounce
    /// window, bound or not; presses landing on a closed gate are dropped
    /// entirely. Unbound codes mutate nothing and are not an error.
    pub fn on_key(&self, code: KeyCode, session: &mut SessionState, now: Instant) {
        session.gate.poll(now);
        if !session.gate.is_open() {
            return;
        }
        session.gate.disarm(now);

        match self.action_for(code) {
            Some(SteerAction::SteerRight) => {
                session.lateral.target = (session.lateral.target - TARGET_STEP).max(-1.0);
                log::debug!("steer right, lateral target {}", session.lateral.target);
            }
            Some(SteerAction::SteerLeft) => {
                session.lateral.target = (session.lateral.target + TARGET_STEP).min(1.0);
                log::debug!("steer left, lateral target {}", session.lateral.target);
            }
            Some(SteerAction::FlipSide) => {
                session.vertical.target = -session.vertical.target;
                log::debug!("flip side, vertical target {}", session.vertical.target);
            }
            None => {}
        }
    }
}

fn build_reverse_map(bindings: &HashMap<SteerAction, KeyBind>) -> HashMap<KeyCode, SteerAction> {
    bindings
        .iter()
        .map(|(&action, bind)| (bind.code, action))
        .collect()
}
