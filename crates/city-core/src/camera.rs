//! Scroll-driven fly-through camera.
//!
//! The camera orbits a quarter turn around the tower while closing in and
//! lifting its gaze as the page scrolls. It carries no state between frames.

use crate::animate::clamp_progress;
use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// Eye/target pair for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

#[inline]
pub fn orbit_radius(progress: f32) -> f32 {
    CAMERA_BASE_RADIUS - clamp_progress(progress) * CAMERA_RADIUS_SHRINK
}

pub fn camera_pose(progress: f32) -> CameraPose {
    let p = clamp_progress(progress);
    let angle = p * FRAC_PI_2;
    let radius = orbit_radius(p);
    let eye = Vec3::new(
        angle.sin() * radius,
        CAMERA_BASE_HEIGHT + (p * PI).sin() * CAMERA_HEIGHT_SWING,
        angle.cos() * radius,
    );
    let target = Vec3::new(0.0, LOOK_AT_BASE_HEIGHT + p * LOOK_AT_RISE, 0.0);
    CameraPose { eye, target }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let pose = camera_pose(0.0);
        Self {
            eye: pose.eye,
            target: pose.target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
    }

    /// Keep the previous aspect when the surface is degenerate (zero height).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
