use std::time::{Duration, Instant};

use kiss3d::event::{Action, Key, WindowEvent};

use crate::config::SimulationConfig;

// Key config, all in one place
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_TOGGLE_PAUSE: Key = Key::Space;
pub const KEY_TOGGLE_ORBITS: Key = Key::H;

/// Edge-triggered toggle for the orbit overlay.
///
/// Fires once when Shift+H goes down and stays latched until H itself is
/// released, so holding the keys doesn't flicker the overlay every frame.
/// Releasing only Shift keeps the latch.
#[derive(Debug, Default)]
pub struct OrbitToggle {
    latched: bool,
}

impl OrbitToggle {
    pub fn new() -> Self {
        Default::default()
    }

    /// Feeds the current key state; returns true on the frame the toggle fires.
    pub fn update(&mut self, shift_down: bool, h_down: bool) -> bool {
        if shift_down && h_down {
            if !self.latched {
                self.latched = true;
                return true;
            }
        } else if !h_down {
            self.latched = false;
        }
        false
    }
}

/// Wall-clock frame timer. Deltas longer than `max_dt` are clamped so a stall
/// (window drag, breakpoint) doesn't make everything jump.
#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    max_dt: Option<Duration>,
}

impl FrameClock {
    /// A `max_dt_secs` of zero or less disables clamping.
    pub fn new(max_dt_secs: f32) -> Self {
        FrameClock {
            last: None,
            max_dt: if max_dt_secs > 0.0 {
                Some(Duration::from_secs_f32(max_dt_secs))
            } else {
                None
            },
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Seconds since the previous tick; the first tick returns 0.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = match self.last {
            Some(then) => now.saturating_duration_since(then),
            None => Duration::ZERO,
        };
        self.last = Some(now);

        match self.max_dt {
            Some(max_dt) if elapsed > max_dt => {
                log::debug!("Clamping {:?} frame to {:?}", elapsed, max_dt);
                max_dt.as_secs_f32()
            }
            _ => elapsed.as_secs_f32(),
        }
    }
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

/// Time controls and other input that isn't camera movement.
pub struct Controller {
    time_scale: f32,
    paused: bool,
    clock: FrameClock,
    orbit_toggle: OrbitToggle,
    fps_counter: FpsCounter,
}

impl Controller {
    pub fn new(config: &SimulationConfig) -> Self {
        Controller {
            time_scale: config.time_scale,
            paused: false,
            clock: FrameClock::new(config.max_frame_time),
            orbit_toggle: OrbitToggle::new(),
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                self.time_scale *= 2.0;
                log::info!("Time scale is {}x", self.time_scale);
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                self.time_scale /= 2.0;
                log::info!("Time scale is {}x", self.time_scale);
            }
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
            _ => {}
        }
    }

    /// Returns true if the orbit overlay should flip this frame.
    pub fn poll_orbit_toggle(&mut self, shift_down: bool, h_down: bool) -> bool {
        self.orbit_toggle.update(shift_down, h_down)
    }

    /// Simulated seconds to advance this frame.
    pub fn frame_dt(&mut self) -> f32 {
        let wall_dt = self.clock.tick();
        self.scaled_dt(wall_dt)
    }

    fn scaled_dt(&self, wall_dt: f32) -> f32 {
        if self.paused {
            0.0
        } else {
            wall_dt * self.time_scale
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}
