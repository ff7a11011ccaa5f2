use std::sync::Arc;

use crate::data_structures::model::Mesh;

/**
 * This module contains all logic for building meshes and uploading them to
 * the GPU.
 */
pub mod geometry;

/// The shared meshes the demo draws with. Every entity holds an `Arc` into
/// this set, so a mesh lives as long as its last user.
#[derive(Debug, Clone)]
pub struct MeshLibrary {
    pub cube: Arc<Mesh>,
    pub floor: Arc<Mesh>,
    pub projectile: Arc<Mesh>,
    pub weapon: Arc<Mesh>,
}

impl MeshLibrary {
    pub fn load(device: &wgpu::Device) -> anyhow::Result<Self> {
        log::info!("Building primitive meshes");
        Ok(Self {
            cube: Mesh::upload(device, "cube", &geometry::cube(2.0))?,
            floor: Mesh::upload(device, "floor", &geometry::plane(2.0, 2.0))?,
            projectile: Mesh::upload(device, "projectile", &geometry::sphere(2.0, 16, 12))?,
            weapon: Mesh::upload(device, "rifle", &geometry::rifle(0.5))?,
        })
    }
}
