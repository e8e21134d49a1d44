/// Fixed simulation rate: 60 updates per second.
pub const SIM_DT: f64 = 1.0 / 60.0;

/// Maximum frame time to prevent spiral of death.
/// If a frame takes longer than this, we cap the accumulated time.
const MAX_FRAME_TIME: f64 = 0.25;

/// Fixed-timestep frame loop: real frame time accumulates into whole
/// simulation ticks, and the leftover fraction smooths camera and vehicle
/// motion between ticks.
pub struct GameLoop {
    accumulator: f64,
    sim_tick: u64,
    last_frame: Option<std::time::Instant>,
    // FPS/UPS tracking
    fps_samples: Vec<f64>,
    ups_ticks: u32,
    ups_timer: f64,
    pub fps: f64,
    pub ups: f64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            sim_tick: 0,
            last_frame: None,
            fps_samples: Vec::with_capacity(60),
            ups_ticks: 0,
            ups_timer: 0.0,
            fps: 0.0,
            ups: 0.0,
        }
    }

    /// Call at the start of each frame. Returns the frame dt (capped) if we
    /// have a previous frame, or None on the very first frame.
    pub fn begin_frame(&mut self) -> Option<f64> {
        let now = std::time::Instant::now();
        let dt = if let Some(last) = self.last_frame {
            let raw_dt = now.duration_since(last).as_secs_f64();
            let dt = raw_dt.min(MAX_FRAME_TIME);

            if raw_dt > 0.0 {
                self.fps_samples.push(raw_dt);
                if self.fps_samples.len() > 60 {
                    self.fps_samples.remove(0);
                }
                let avg: f64 =
                    self.fps_samples.iter().sum::<f64>() / self.fps_samples.len() as f64;
                self.fps = 1.0 / avg;
            }

            Some(dt)
        } else {
            None
        };
        self.last_frame = Some(now);
        dt
    }

    /// Accumulate frame time and return how many sim ticks should run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt;
        self.ups_timer += frame_dt;

        let mut ticks = 0u32;
        while self.accumulator >= SIM_DT {
            self.accumulator -= SIM_DT;
            self.sim_tick += 1;
            ticks += 1;

            self.ups_ticks += 1;
        }

        if self.ups_timer >= 1.0 {
            self.ups = self.ups_ticks as f64 / self.ups_timer;
            self.ups_ticks = 0;
            self.ups_timer = 0.0;
            log::debug!("fps {:.1}, ups {:.1}", self.fps, self.ups);
        }

        ticks
    }

    /// Elapsed simulation ticks including the fractional remainder of the
    /// current frame. Drives the camera orbit and vehicle travel.
    pub fn elapsed_ticks(&self) -> f64 {
        self.sim_tick as f64 + self.accumulator / SIM_DT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_whole_ticks() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.accumulate(SIM_DT * 3.0), 3);
        assert!((game_loop.elapsed_ticks() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_remainder_carries_over() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.accumulate(SIM_DT * 0.75), 0);
        assert!((game_loop.elapsed_ticks() - 0.75).abs() < 1e-9);
        assert_eq!(game_loop.accumulate(SIM_DT * 0.75), 1);
        assert!((game_loop.elapsed_ticks() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_capped_frame_bounds_tick_burst() {
        // begin_frame caps dt at MAX_FRAME_TIME, so one frame can never
        // queue more than MAX_FRAME_TIME / SIM_DT ticks.
        let mut game_loop = GameLoop::new();
        let ticks = game_loop.accumulate(MAX_FRAME_TIME);
        assert_eq!(ticks, (MAX_FRAME_TIME / SIM_DT) as u32);
    }
}
