//! Engine data structures: transforms, entities, meshes and GPU-side records.
//!
//! - `transform` holds position/rotation/scale and the world matrix
//! - `entity` is the id-carrying record of transform, color, mesh and body
//! - `table` is the insertion-ordered owner of entities
//! - `model` contains mesh geometry and its GPU buffers
//! - `instance` is the per-entity record uploaded for drawing
//! - `texture` wraps the depth target

pub mod entity;
pub mod instance;
pub mod model;
pub mod table;
pub mod texture;
pub mod transform;
