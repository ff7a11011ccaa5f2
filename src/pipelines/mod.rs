//! Render pipelines. The demo needs a single one: flat-coloured, depth-tested
//! geometry with per-instance transform and tint.
pub mod basic;
