//! Chase camera rig.
//!
//! While following, the rig owns the camera pose: it sits behind and above
//! the actor and looks slightly ahead of it. Once the user starts
//! interacting, the rig stops writing the camera position and only keeps the
//! orbit pivot on the actor, so the user's orbit moves with the train. When
//! the interaction ends, following resumes on the next update.

use crate::camera::Camera;
use trackline_core::Vec3;

/// Who controls the camera position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RigMode {
    #[default]
    Following,
    UserOverride,
}

/// Placement of the chase camera relative to the actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigConfig {
    /// Distance behind the actor, along its tangent
    pub trail_distance: f32,
    /// Height above the actor
    pub height: f32,
    /// Look-at point relative to the actor
    pub look_at_offset: Vec3,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            trail_distance: 200.0,
            height: 100.0,
            look_at_offset: Vec3::new(0.0, 10.0, -50.0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    pub config: RigConfig,
    mode: RigMode,
    target: Option<Vec3>,
}

impl CameraRig {
    pub fn new(config: RigConfig) -> Self {
        Self {
            config,
            mode: RigMode::Following,
            target: None,
        }
    }

    pub fn mode(&self) -> RigMode {
        self.mode
    }

    /// Last computed look-at target, if the rig has updated at least once
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Camera position the rig would place for an actor at `position`
    /// moving along `tangent`.
    pub fn follow_position(&self, position: Vec3, tangent: Vec3) -> Vec3 {
        position - tangent * self.config.trail_distance + Vec3::new(0.0, self.config.height, 0.0)
    }

    /// Look-at target for an actor at `position`.
    pub fn follow_target(&self, position: Vec3) -> Vec3 {
        position + self.config.look_at_offset
    }

    /// Recompute the rig from the actor pose and apply it to `camera`.
    pub fn update(&mut self, position: Vec3, tangent: Vec3, camera: &mut Camera) {
        let target = self.follow_target(position);
        self.target = Some(target);
        match self.mode {
            RigMode::Following => {
                camera.look_at(self.follow_position(position, tangent), target);
            }
            RigMode::UserOverride => {
                camera.retarget(target);
            }
        }
    }

    /// The user grabbed the view.
    pub fn interaction_start(&mut self) {
        if self.mode == RigMode::UserOverride {
            tracing::debug!("interaction start ignored, already overridden");
            return;
        }
        self.mode = RigMode::UserOverride;
        tracing::info!("camera rig: user override");
    }

    /// The user let go; following resumes on the next update.
    pub fn interaction_end(&mut self) {
        if self.mode == RigMode::Following {
            tracing::debug!("interaction end ignored, already following");
            return;
        }
        self.mode = RigMode::Following;
        tracing::info!("camera rig: following");
    }

    /// Apply manual orbit input. Ignored unless the user has the view.
    pub fn apply_orbit(&self, camera: &mut Camera, yaw: f32, pitch: f32) {
        if self.mode != RigMode::UserOverride {
            return;
        }
        camera.orbit_horizontal(yaw);
        camera.orbit_vertical(pitch);
    }

    /// Apply manual zoom input. Ignored unless the user has the view.
    pub fn apply_zoom(&self, camera: &mut Camera, delta: f32) {
        if self.mode != RigMode::UserOverride {
            return;
        }
        camera.zoom(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn following_places_camera_behind_and_above() {
        let mut rig = CameraRig::default();
        let mut cam = Camera::new();
        let pos = Vec3::new(47.0, -64.0, -20.0);
        rig.update(pos, Vec3::FORWARD, &mut cam);

        assert_eq!(rig.mode(), RigMode::Following);
        assert!(approx(cam.position, Vec3::new(47.0, 36.0, 180.0)));
        assert!(approx(cam.target, Vec3::new(47.0, -54.0, -70.0)));
        assert_eq!(rig.target(), Some(cam.target));
    }

    #[test]
    fn override_only_moves_pivot() {
        let mut rig = CameraRig::default();
        let mut cam = Camera::new();
        rig.update(Vec3::ZERO, Vec3::FORWARD, &mut cam);
        let parked = cam.position;

        rig.interaction_start();
        assert_eq!(rig.mode(), RigMode::UserOverride);
        rig.update(Vec3::new(0.0, 0.0, -40.0), Vec3::FORWARD, &mut cam);
        assert_eq!(cam.position, parked);
        assert!(approx(cam.target, Vec3::new(0.0, 10.0, -90.0)));
    }

    #[test]
    fn target_is_continuous_across_hand_back() {
        let mut rig = CameraRig::default();
        let mut cam = Camera::new();
        let tangent = Vec3::FORWARD;

        rig.update(Vec3::ZERO, tangent, &mut cam);
        rig.interaction_start();
        rig.update(Vec3::new(0.0, 0.0, -1.0), tangent, &mut cam);
        let during = rig.target().unwrap();
        rig.interaction_end();
        rig.update(Vec3::new(0.0, 0.0, -2.0), tangent, &mut cam);
        let after = rig.target().unwrap();

        // The target moves by the actor's displacement only
        assert!(approx(after - during, Vec3::new(0.0, 0.0, -1.0)));
        assert_eq!(rig.mode(), RigMode::Following);
        assert!(approx(cam.position, Vec3::new(0.0, 100.0, 198.0)));
    }

    #[test]
    fn orbit_after_pivot_moves_does_not_jump() {
        let mut rig = CameraRig::default();
        let mut cam = Camera::new();
        rig.update(Vec3::ZERO, Vec3::FORWARD, &mut cam);

        rig.interaction_start();
        rig.update(Vec3::new(0.0, 0.0, -100.0), Vec3::FORWARD, &mut cam);
        let before = cam.position;
        rig.apply_orbit(&mut cam, 0.001, 0.0);
        assert!(cam.position.distance(&before) < 1.0);

        let before = cam.position;
        rig.apply_zoom(&mut cam, 0.5);
        assert!(cam.position.distance(&before) < 1.0);
    }

    #[test]
    fn redundant_signals_are_ignored() {
        let mut rig = CameraRig::default();
        rig.interaction_end();
        assert_eq!(rig.mode(), RigMode::Following);
        rig.interaction_start();
        rig.interaction_start();
        assert_eq!(rig.mode(), RigMode::UserOverride);
        rig.interaction_end();
        assert_eq!(rig.mode(), RigMode::Following);
    }

    #[test]
    fn orbit_input_needs_override() {
        let mut rig = CameraRig::default();
        let mut cam = Camera::new();
        rig.update(Vec3::ZERO, Vec3::FORWARD, &mut cam);
        let before = cam.clone();

        rig.apply_orbit(&mut cam, 0.5, 0.1);
        rig.apply_zoom(&mut cam, 10.0);
        assert_eq!(cam, before);

        rig.interaction_start();
        rig.apply_orbit(&mut cam, 0.5, 0.0);
        assert!(cam.position != before.position);
        assert!((cam.position.distance(&cam.target) - before.distance).abs() < 1e-2);
    }
}
