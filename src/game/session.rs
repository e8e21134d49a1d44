use std::time::{Duration, Instant};

use crate::sim::motion::MotionAxis;

/// Keyboard lockout window after an accepted key event.
pub const DEBOUNCE: Duration = Duration::from_millis(100);

/// Gate guarding steering input. Any key event closes it and arms a
/// one-shot reopen deadline; events arriving while closed are dropped
/// without touching the deadline. The gate itself prevents re-entrant
/// arming: a new deadline can only start while the gate is open.
#[derive(Clone, Copy, Debug)]
pub struct InputGate {
    accept_keys: bool,
    reenable_at: Option<Instant>,
}

impl InputGate {
    pub fn new() -> Self {
        Self {
            accept_keys: true,
            reenable_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.accept_keys
    }

    /// Close the gate and arm the reopen deadline.
    pub fn disarm(&mut self, now: Instant) {
        self.accept_keys = false;
        self.reenable_at = Some(now + DEBOUNCE);
    }

    /// Reopen the gate once its deadline has passed. No-op while open.
    pub fn poll(&mut self, now: Instant) {
        if self.accept_keys {
            return;
        }
        if let Some(deadline) = self.reenable_at {
            if now >= deadline {
                self.accept_keys = true;
                self.reenable_at = None;
            }
        }
    }
}

/// Mutable state of one play session: the two animated control axes and the
/// input gate. Owned by the app and handed explicitly to input handling and
/// the frame loop; there is no global.
pub struct SessionState {
    pub lateral: MotionAxis,
    pub vertical: MotionAxis,
    pub gate: InputGate,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            lateral: MotionAxis::lateral(),
            vertical: MotionAxis::vertical(),
            gate: InputGate::new(),
        }
    }

    /// One simulation tick: advance both axes toward their targets.
    pub fn advance(&mut self) {
        self.lateral.advance();
        self.vertical.advance();
    }
}
