//! Camera for the 3D orbital scenes

use glam::{Mat4, Quat, Vec2, Vec3};

/// A point projected to the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Distance along the view direction; larger is farther
    pub depth: f32,
    /// Pixels per world unit at this depth
    pub scale: f32,
}

/// Orbiting camera looking at `target` from `distance` away
#[derive(Debug, Clone)]
pub struct Camera {
    pub distance: f32,
    pub rotation: Quat,
    pub target: Vec3,
    pub viewport: Vec2,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera placed at `eye` looking at `target`
    pub fn looking_at(eye: Vec3, target: Vec3, fovy_deg: f32, viewport: Vec2) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(1.0);
        let rotation = Quat::from_rotation_arc(Vec3::Z, offset / distance);

        Self {
            distance,
            rotation,
            target,
            viewport,
            fovy: fovy_deg.to_radians(),
            znear: 0.1,
            zfar: 10000.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        let offset = self.rotation * Vec3::new(0.0, 0.0, self.distance);
        self.target + offset
    }

    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        let up = self.rotation * Vec3::Y;
        let yaw_rotation = Quat::from_axis_angle(up, delta_x);

        let right = self.rotation * Vec3::X;
        let pitch_rotation = Quat::from_axis_angle(right, -delta_y);

        self.rotation = yaw_rotation * pitch_rotation * self.rotation;
        self.rotation = self.rotation.normalize();
    }

    pub fn zoom(&mut self, delta: f32, min: f32, max: f32) {
        self.distance = (self.distance + delta).clamp(min, max);
    }

    /// Pointer drag in pixels
    pub fn orbit_drag(&mut self, delta: Vec2) {
        self.rotate(-delta.x * 0.005, delta.y * 0.005);
    }

    /// Wheel zoom, proportional to the current distance
    pub fn scroll_zoom(&mut self, scroll: f32, min: f32, max: f32) {
        self.zoom(-scroll * self.distance / 100.0, min, max);
    }

    /// Move the look-at point a fraction `t` of the way towards `desired`
    pub fn ease_target(&mut self, desired: Vec3, t: f32) {
        self.target = self.target.lerp(desired, t.clamp(0.0, 1.0));
    }

    /// Move the eye a fraction `t` of the way towards `desired`, keeping the target
    pub fn ease_eye(&mut self, desired: Vec3, t: f32) {
        let eye = self.position().lerp(desired, t.clamp(0.0, 1.0));
        let offset = eye - self.target;
        let distance = offset.length();
        if distance < 1e-3 {
            return;
        }
        self.distance = distance;
        self.rotation = Quat::from_rotation_arc(Vec3::Z, offset / distance);
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y.max(1.0)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let position = self.position();
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-position);
        let view = rotation_matrix * translation_matrix;
        let proj = Mat4::perspective_rh(self.fovy, self.aspect(), self.znear, self.zfar);
        proj * view
    }

    /// Project a world point. `None` when it is behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<Projected> {
        self.project_with(&self.build_view_projection_matrix(), world)
    }

    /// Like [`Camera::project`] with a precomputed view-projection matrix
    pub fn project_with(&self, view_proj: &Mat4, world: Vec3) -> Option<Projected> {
        let clip = *view_proj * world.extend(1.0);
        if clip.w <= self.znear {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        );
        let focal_px = 0.5 * self.viewport.y / (0.5 * self.fovy).tan();
        Some(Projected {
            screen,
            depth: clip.w,
            scale: focal_px / clip.w,
        })
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::looking_at(
            Vec3::new(0.0, 60.0, 90.0),
            Vec3::ZERO,
            45.0,
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_position_round_trip() {
        let camera = camera();
        assert!((camera.position() - Vec3::new(0.0, 60.0, 90.0)).length() < 1e-3);
    }

    #[test]
    fn test_target_at_screen_centre() {
        let p = camera().project(Vec3::ZERO).unwrap();
        assert!((p.screen - Vec2::new(400.0, 300.0)).length() < 1e-2);
        assert!((p.depth - 60f32.hypot(90.0)).abs() < 1e-2);
    }

    #[test]
    fn test_orientation() {
        let camera = camera();
        let right = camera.project(Vec3::new(10.0, 0.0, 0.0)).unwrap();
        let near = camera.project(Vec3::new(0.0, 0.0, 10.0)).unwrap();
        let far = camera.project(Vec3::new(0.0, 0.0, -10.0)).unwrap();
        assert!(right.screen.x > 400.0);
        // Looking down at the XZ plane: near points sit lower on screen
        assert!(near.screen.y > far.screen.y);
        assert!(near.scale > far.scale);
    }

    #[test]
    fn test_behind_camera_culled() {
        assert!(camera().project(Vec3::new(0.0, 120.0, 180.0)).is_none());
    }

    #[test]
    fn test_ease_target() {
        let mut camera = camera();
        camera.ease_target(Vec3::new(40.0, 0.0, 0.0), 0.05);
        assert!((camera.target.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_ease_eye_converges_home() {
        let home = Vec3::new(0.0, 60.0, 90.0);
        let mut camera = camera();
        camera.orbit_drag(Vec2::new(200.0, -80.0));
        camera.scroll_zoom(5.0, 10.0, 400.0);
        assert!((camera.position() - home).length() > 1.0);

        for _ in 0..400 {
            camera.ease_eye(home, 0.05);
        }
        assert!((camera.position() - home).length() < 1e-2);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = camera();
        camera.zoom(-1000.0, 20.0, 400.0);
        assert_eq!(camera.distance, 20.0);
        // 20 + 10000 * 20 / 100 overshoots the far limit
        camera.scroll_zoom(-10000.0, 20.0, 400.0);
        assert_eq!(camera.distance, 400.0);
    }
}
