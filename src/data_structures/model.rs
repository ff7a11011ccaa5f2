//! Mesh geometry and its GPU representation.
//!
//! A [`MeshData`] is plain CPU-side geometry as produced by
//! [`crate::resources::geometry`]. Uploading it yields a [`Mesh`]: immutable
//! vertex/index buffers that are shared between entities through an `Arc`.

use std::sync::Arc;

use wgpu::util::DeviceExt;

/// Describes how a vertex type is laid out inside a vertex buffer.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// CPU-side geometry. An empty index list means the vertices are drawn as a
/// plain triangle list.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Append another mesh, rebasing its indices onto the current vertex count.
    pub fn append(&mut self, other: MeshData) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + offset));
    }
}

/// GPU-resident geometry. Never mutated after [`Mesh::upload`].
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub num_vertices: u32,
    pub num_indices: u32,
}

impl Mesh {
    pub fn upload(device: &wgpu::Device, name: &str, data: &MeshData) -> anyhow::Result<Arc<Self>> {
        anyhow::ensure!(!data.vertices.is_empty(), "mesh {} has no vertices", name);
        if let Some(out_of_range) = data
            .indices
            .iter()
            .find(|&&i| i as usize >= data.vertices.len())
        {
            anyhow::bail!(
                "mesh {} references vertex {} but only has {}",
                name,
                out_of_range,
                data.vertices.len()
            );
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = if data.indices.is_empty() {
            None
        } else {
            Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", name)),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            }))
        };
        log::debug!(
            "uploaded mesh {} ({} vertices, {} indices)",
            name,
            data.vertices.len(),
            data.indices.len()
        );

        Ok(Arc::new(Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_vertices: data.vertices.len() as u32,
            num_indices: data.indices.len() as u32,
        }))
    }
}

/// Draw helpers on a render pass, mirroring how the pipeline expects its
/// vertex slots: slot 0 holds the mesh, slot 1 the per-entity instance data.
pub trait DrawMesh<'a> {
    fn draw_mesh_instance(&mut self, mesh: &'a Mesh, instance: u32);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh_instance(&mut self, mesh: &'b Mesh, instance: u32) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        match &mesh.index_buffer {
            Some(index_buffer) => {
                self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                self.draw_indexed(0..mesh.num_indices, 0, instance..instance + 1);
            }
            None => self.draw(0..mesh.num_vertices, instance..instance + 1),
        }
    }
}
