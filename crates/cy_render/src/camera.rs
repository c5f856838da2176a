//! Free-fly perspective camera driven by keyboard translation, mouse yaw/pitch
//! and scroll-wheel FOV zoom.
//!
//! Invariant: `front`/`right`/`up` are always re-derived from yaw/pitch in
//! `update_vectors` and never mutated independently. Callers that want to
//! point the camera somewhere (e.g. settings load) go through `set_facing`,
//! which converts the direction back to angles first.

use glam::{Mat3, Mat4, Vec3};

const WORLD_UP: Vec3 = Vec3::Y;
const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 4],
}

/// Rotation-only view for the skybox pass: the cube must follow the camera
/// orientation but never its translation.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyboxUniform {
    pub view_proj: [[f32; 4]; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    pub speed: f32,
    pub sensitivity: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl FlyCamera {
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            zoom: 45.0,
            speed: 2.5,
            sensitivity: 0.1,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: WORLD_UP,
        };
        camera.update_vectors();
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Translate along the front/right basis vectors scaled by `speed * dt`.
    pub fn process_keyboard(&mut self, direction: MoveDirection, dt: f32) {
        let velocity = self.speed * dt;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a sensitivity-scaled mouse delta to yaw/pitch. Positive `dy`
    /// raises pitch; the event handler flips screen-space Y before calling.
    /// Pitch is clamped short of +-90 degrees to avoid the gimbal flip.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Scroll narrows or widens the FOV within [1, 45] degrees.
    pub fn process_mouse_scroll(&mut self, dy: f32) {
        self.zoom = (self.zoom - dy).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Point the camera along `front` by deriving yaw/pitch from the vector,
    /// then rebuilding the basis from the angles. A zero vector is ignored.
    pub fn set_facing(&mut self, front: Vec3) {
        let Some(dir) = front.try_normalize() else {
            log::warn!("Ignoring zero-length camera facing vector");
            return;
        };
        self.yaw = dir.z.atan2(dir.x).to_degrees();
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Look-at matrix from (position, front, up). Pure function of state.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn build_uniform(&self, aspect: f32) -> CameraUniform {
        let view_proj = self.projection_matrix(aspect) * self.view_matrix();
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            view_pos: self.position.extend(1.0).to_array(),
        }
    }

    pub fn build_skybox_uniform(&self, aspect: f32) -> SkyboxUniform {
        let rotation_only = Mat4::from_mat3(Mat3::from_mat4(self.view_matrix()));
        let view_proj = self.projection_matrix(aspect) * rotation_only;
        SkyboxUniform {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_clamped_under_cumulative_input() {
        let mut camera = FlyCamera::default();
        for _ in 0..1000 {
            camera.process_mouse_movement(0.0, 500.0);
        }
        assert!(camera.pitch() <= PITCH_LIMIT);
        for _ in 0..1000 {
            camera.process_mouse_movement(0.0, -500.0);
        }
        assert!(camera.pitch() >= -PITCH_LIMIT);
        // Vectors must remain a sane basis even at the clamp.
        assert!((camera.front().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zoom_stays_in_clamp_range() {
        let mut camera = FlyCamera::default();
        for dy in [-10.0f32, 100.0, -3.5, 200.0, -999.0, 7.25] {
            camera.process_mouse_scroll(dy);
            assert!(camera.zoom() >= ZOOM_MIN && camera.zoom() <= ZOOM_MAX);
        }
    }

    #[test]
    fn view_matrix_is_pure() {
        let mut camera = FlyCamera::new(Vec3::new(1.5, -2.0, 8.0));
        camera.process_mouse_movement(123.0, -45.0);
        let first = camera.view_matrix().to_cols_array();
        let second = camera.view_matrix().to_cols_array();
        // Bit-identical, not approximately equal.
        assert_eq!(first, second);
    }

    #[test]
    fn default_faces_negative_z() {
        let camera = FlyCamera::default();
        assert!((camera.front() - Vec3::NEG_Z).length() < 1e-5);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn keyboard_moves_along_basis() {
        let mut camera = FlyCamera::default();
        camera.process_keyboard(MoveDirection::Forward, 1.0);
        assert!((camera.position.z - 0.5).abs() < 1e-5);
        camera.process_keyboard(MoveDirection::Right, 1.0);
        assert!((camera.position.x - 2.5).abs() < 1e-5);
    }

    #[test]
    fn set_facing_round_trips_direction() {
        let mut camera = FlyCamera::default();
        let target = Vec3::new(0.3, -0.4, -0.85).normalize();
        camera.set_facing(target);
        assert!((camera.front() - target).length() < 1e-4);
    }

    #[test]
    fn set_facing_ignores_zero_vector() {
        let mut camera = FlyCamera::default();
        let before = camera.front();
        camera.set_facing(Vec3::ZERO);
        assert_eq!(camera.front(), before);
    }
}
