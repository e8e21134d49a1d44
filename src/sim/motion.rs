/// Per-tick increment of the lateral axis.
pub const LATERAL_STEP: f32 = 0.025;
/// Per-tick increment of the vertical axis.
pub const VERTICAL_STEP: f32 = 0.05;
/// Tolerance below which an axis stops adjusting.
const DEADBAND: f32 = 0.001;

/// One animated control axis: `current` chases `target` by a fixed
/// increment per simulation tick. Targets are quantized (multiples of 0.5
/// laterally, ±1 vertically) and the steps divide them evenly, so the chase
/// lands inside the deadband without oscillating.
#[derive(Clone, Copy, Debug)]
pub struct MotionAxis {
    pub current: f32,
    pub target: f32,
    step: f32,
    deadband: f32,
}

impl MotionAxis {
    /// Lateral axis: starts centered on the ribbon.
    pub fn lateral() -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            step: LATERAL_STEP,
            deadband: DEADBAND,
        }
    }

    /// Vertical axis: starts on the upper face.
    pub fn vertical() -> Self {
        Self {
            current: 1.0,
            target: 1.0,
            step: VERTICAL_STEP,
            deadband: DEADBAND,
        }
    }

    /// Advance `current` one fixed increment toward `target`. The deadband
    /// check runs before the increment, so a converged axis is a no-op.
    pub fn advance(&mut self) {
        if self.current < self.target - self.deadband {
            self.current += self.step;
        } else if self.current > self.target + self.deadband {
            self.current -= self.step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_to_converge(axis: &MotionAxis) -> usize {
        ((axis.target - axis.current).abs() / axis.step).ceil() as usize
    }

    #[test]
    fn test_lateral_converges_in_bounded_ticks() {
        let mut axis = MotionAxis::lateral();
        axis.target = -1.0;
        for _ in 0..ticks_to_converge(&axis) {
            axis.advance();
        }
        assert!((axis.current - axis.target).abs() <= DEADBAND);
    }

    #[test]
    fn test_converged_axis_is_fixed_point() {
        let mut axis = MotionAxis::lateral();
        axis.target = 0.5;
        for _ in 0..ticks_to_converge(&axis) {
            axis.advance();
        }
        let settled = axis.current;
        for _ in 0..10 {
            axis.advance();
        }
        assert_eq!(axis.current, settled);
    }

    #[test]
    fn test_error_never_grows() {
        let mut axis = MotionAxis::vertical();
        axis.target = -1.0;
        let mut prev_error = (axis.current - axis.target).abs();
        for _ in 0..100 {
            axis.advance();
            let error = (axis.current - axis.target).abs();
            assert!(
                error <= prev_error + DEADBAND,
                "error grew from {prev_error} to {error}"
            );
            prev_error = error;
        }
    }

    #[test]
    fn test_vertical_flip_travel() {
        // A side flip traverses from +1 to -1 in 2.0 / 0.05 = 40 ticks.
        let mut axis = MotionAxis::vertical();
        axis.target = -1.0;
        for _ in 0..40 {
            axis.advance();
        }
        assert!((axis.current - -1.0).abs() <= DEADBAND);
    }

    #[test]
    fn test_no_overshoot_past_target() {
        let mut axis = MotionAxis::lateral();
        axis.target = 0.5;
        for _ in 0..200 {
            axis.advance();
            assert!(axis.current <= axis.target + DEADBAND + axis.step);
        }
        assert!((axis.current - axis.target).abs() <= DEADBAND);
    }
}
