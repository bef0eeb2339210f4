use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};

use crate::config::CameraConfig;

const KEY_MOVE_FORWARD: Key = Key::W;
const KEY_MOVE_BACKWARD: Key = Key::S;
const KEY_MOVE_LEFT: Key = Key::A;
const KEY_MOVE_RIGHT: Key = Key::D;

const PITCH_LIMIT: f32 = 89.0;
const MIN_FOV: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTier {
    Slow,
    Normal,
    Fast,
}

impl SpeedTier {
    /// Shift wins if both modifiers are held.
    pub fn from_modifiers(shift: bool, control: bool) -> Self {
        if shift {
            SpeedTier::Fast
        } else if control {
            SpeedTier::Slow
        } else {
            SpeedTier::Normal
        }
    }
}

/// Which movement keys are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

// A free-fly camera: WASD moves along the view direction and its right
// vector, dragging with the left button turns, scrolling narrows or widens
// the field of view. Unlike an arcball it has no target; it just goes where
// it's pointed. Yaw and pitch are in degrees, with yaw -90 looking down -Z.
pub struct FlyCamera {
    // -- position --
    position: Point3<f32>,
    yaw: f32,
    pitch: f32,
    // -- perspective --
    width: u32,
    height: u32,
    fov: f32,
    max_fov: f32,
    znear: f32,
    zfar: f32,
    // -- movement --
    tier: SpeedTier,
    speeds: [f32; 3],
    mouse_sensitivity: f32,
    last_cursor_pos: Vector2<f32>,
    last_update: Option<Instant>,
}

impl FlyCamera {
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        FlyCamera {
            position: config.start_position(),
            yaw: config.yaw_degrees,
            pitch: nalgebra::clamp(config.pitch_degrees, -PITCH_LIMIT, PITCH_LIMIT),
            width,
            height,
            fov: config.fov_degrees,
            max_fov: config.fov_degrees,
            znear: config.near_plane,
            zfar: config.far_plane,
            tier: SpeedTier::Normal,
            speeds: [config.slow_speed, config.normal_speed, config.fast_speed],
            mouse_sensitivity: config.mouse_sensitivity,
            last_cursor_pos: Vector2::zeros(),
            last_update: None,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn speed_tier(&self) -> SpeedTier {
        self.tier
    }

    pub fn set_speed_tier(&mut self, tier: SpeedTier) {
        self.tier = tier;
    }

    pub fn speed(&self) -> f32 {
        match self.tier {
            SpeedTier::Slow => self.speeds[0],
            SpeedTier::Normal => self.speeds[1],
            SpeedTier::Fast => self.speeds[2],
        }
    }

    pub fn front(&self) -> Vector3<f32> {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.front().cross(&Vector3::y()).normalize()
    }

    /// Moves the camera for `dt` seconds at the current speed tier.
    pub fn travel(&mut self, input: MoveInput, dt: f32) {
        let step = self.speed() * dt;
        let (front, right) = (self.front(), self.right());
        if input.forward {
            self.position += front * step;
        }
        if input.backward {
            self.position -= front * step;
        }
        if input.left {
            self.position -= right * step;
        }
        if input.right {
            self.position += right * step;
        }
    }

    /// Turns by a cursor offset in pixels. Moving the mouse up looks up.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw + dx * self.mouse_sensitivity) % 360.0;
        self.pitch = nalgebra::clamp(
            self.pitch - dy * self.mouse_sensitivity,
            -PITCH_LIMIT,
            PITCH_LIMIT,
        );
    }

    /// Scrolling up zooms in.
    pub fn zoom(&mut self, offset: f32) {
        self.fov = nalgebra::clamp(self.fov - offset, MIN_FOV, self.max_fov);
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect(), self.fov.to_radians(), self.znear, self.zfar)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for FlyCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    let dpos = curr_pos - self.last_cursor_pos;
                    self.look(dpos.x, dpos.y);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => self.zoom(off as f32),
            WindowEvent::FramebufferSize(w, h) => {
                self.width = w;
                self.height = h;
            }
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.position
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.position, &(self.position + self.front()), &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, canvas: &Canvas) {
        let now = Instant::now();
        let dt = match self.last_update {
            Some(then) => now.duration_since(then).as_secs_f32(),
            None => 0.0,
        };
        self.last_update = Some(now);

        let held = |key| canvas.get_key(key) == Action::Press;
        self.set_speed_tier(SpeedTier::from_modifiers(
            held(Key::LShift) || held(Key::RShift),
            held(Key::LControl) || held(Key::RControl),
        ));

        let input = MoveInput {
            forward: held(KEY_MOVE_FORWARD),
            backward: held(KEY_MOVE_BACKWARD),
            left: held(KEY_MOVE_LEFT),
            right: held(KEY_MOVE_RIGHT),
        };
        self.travel(input, dt);
    }

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn camera() -> FlyCamera {
        let config = CameraConfig {
            start_position: [0.0, 0.0, 10.0],
            pitch_degrees: 0.0,
            ..CameraConfig::default()
        };
        FlyCamera::new(&config, 800, 600)
    }

    #[test]
    fn test_speed_tiers() {
        assert_eq!(SpeedTier::from_modifiers(false, false), SpeedTier::Normal);
        assert_eq!(SpeedTier::from_modifiers(true, false), SpeedTier::Fast);
        assert_eq!(SpeedTier::from_modifiers(false, true), SpeedTier::Slow);
        assert_eq!(SpeedTier::from_modifiers(true, true), SpeedTier::Fast);

        let mut camera = camera();
        assert_eq!(camera.speed(), 2.5);
        camera.set_speed_tier(SpeedTier::Fast);
        assert_eq!(camera.speed(), 50.0);
        camera.set_speed_tier(SpeedTier::Slow);
        assert_eq!(camera.speed(), 0.5);
    }

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = camera();
        assert_relative_eq!(camera.front(), -Vector3::z(), epsilon = 1e-6);
        assert_relative_eq!(camera.right(), Vector3::x(), epsilon = 1e-6);

        // A point straight ahead ends up on the view axis
        let ahead = camera.view_transform() * Point3::new(0.0, 0.0, 0.0);
        assert_relative_eq!(ahead, Point3::new(0.0, 0.0, -10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_travel() {
        let mut camera = camera();
        let forward = MoveInput {
            forward: true,
            ..Default::default()
        };
        camera.travel(forward, 2.0);
        assert_relative_eq!(camera.position(), Point3::new(0.0, 0.0, 5.0), epsilon = 1e-5);

        // Opposite keys cancel out
        let both = MoveInput {
            left: true,
            right: true,
            ..Default::default()
        };
        camera.travel(both, 1.0);
        assert_relative_eq!(camera.position(), Point3::new(0.0, 0.0, 5.0), epsilon = 1e-5);
    }

    #[test]
    fn test_pitch_and_zoom_limits() {
        let mut camera = camera();
        camera.look(0.0, -10000.0);
        assert!(camera.front().y > 0.99);
        assert!(camera.front().y < 1.0);

        camera.zoom(100.0);
        assert_eq!(camera.fov(), MIN_FOV);
        camera.zoom(-100.0);
        assert_eq!(camera.fov(), 45.0);
    }

    #[test]
    fn test_clip_planes_from_config() {
        let camera = camera();
        assert_eq!(camera.clip_planes(), (1.0, 20000.0));
        assert_relative_eq!(camera.aspect(), 800.0 / 600.0);
    }
}
