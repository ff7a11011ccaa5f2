//! Position, orientation and scale of an entity.
//!
//! Rotation is stored as Tait-Bryan Euler angles (radians) applied in Y-X-Z
//! order, which is what a first-person camera naturally produces: yaw around
//! Y, then pitch around X, then roll around Z.

use cgmath::{Matrix4, Rad, Vector3};

/// Translation, Euler rotation and non-uniform scale.
///
/// The world matrix is derived on every call to [`Transform::to_matrix`];
/// nothing is cached so a transform can be mutated freely between queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    /// `x` = pitch, `y` = yaw, `z` = roll (radians).
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transform: origin, no rotation, unit scale.
    pub fn new() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_translation(mut self, translation: impl Into<Vector3<f32>>) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn with_rotation(mut self, rotation: impl Into<Vector3<f32>>) -> Self {
        self.rotation = rotation.into();
        self
    }

    pub fn with_scale(mut self, scale: impl Into<Vector3<f32>>) -> Self {
        self.scale = scale.into();
        self
    }

    /// `T * Ry * Rx * Rz * S`
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(translation: Vector3<f32>) -> Self {
        Transform {
            translation,
            ..Default::default()
        }
    }
}
