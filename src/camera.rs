//! Perspective camera that looks through the viewer's eyes.

use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use crate::{config::RenderConfig, controller::view_dir, data_structures::transform::Transform};

/// cgmath produces OpenGL clip space (z in -1..1); wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub fov_y: Deg<f32>,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            fov_y: Deg(config.fov_y_degrees),
            z_near: config.z_near,
            z_far: config.z_far,
        }
    }

    /// View matrix for a viewer whose rotation carries pitch in `x` and yaw
    /// in `y`.
    pub fn view(viewer: &Transform) -> Matrix4<f32> {
        let eye = Point3::new(
            viewer.translation.x,
            viewer.translation.y,
            viewer.translation.z,
        );
        let dir = view_dir(viewer.rotation.y, viewer.rotation.x);
        Matrix4::look_to_rh(eye, dir, Vector3::unit_y())
    }

    pub fn projection(&self, aspect: f32) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fov_y, aspect, self.z_near, self.z_far)
    }

    pub fn view_projection(&self, viewer: &Transform, aspect: f32) -> Matrix4<f32> {
        self.projection(aspect) * Self::view(viewer)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Matrix4<f32>) -> Self {
        Self {
            view_proj: view_proj.into(),
        }
    }
}

/// The uniform buffer and bind group the vertex shader reads the camera from.
#[derive(Debug)]
pub struct CameraResources {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = CameraUniform::new(Matrix4::identity());
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, view_proj: Matrix4<f32>) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(view_proj)]),
        );
    }
}
