//! flow-fps
//!
//! A small first-person shooter on top of wgpu and winit: a main menu, a
//! static level of platforms and targets, a first-person weapon and
//! projectiles that fall and bounce. The renderer survives window resizes and
//! minimization by rebuilding its swap chain on demand.
//!
//! High-level modules
//! - `camera`: perspective projection and the camera uniform
//! - `config`: window, render, key, controller and projectile settings
//! - `context`: GPU and window context, implements the frame backend on wgpu
//! - `controller`: first-person movement and mouse look
//! - `data_structures`: transforms, entities, entity tables, meshes, instances
//! - `flow`: the winit event loop and [`run`] / [`run_with`]
//! - `frame`: the acquire/record/submit/present/recreate lifecycle
//! - `game`: menu/playing/paused state machine, level layout, projectiles
//! - `input`: per-frame keyboard and mouse state
//! - `pipelines`: the render pipeline and its shader
//! - `render`: draw sets handed from the game to the frame controller
//! - `resources`: procedural meshes
//! - `swap_chain`: surface configuration and depth target
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod controller;
pub mod data_structures;
pub mod flow;
pub mod frame;
pub mod game;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod swap_chain;

pub use config::Config;
pub use flow::{run, run_with};

// Re-exports commonly used types for convenience in downstream code.
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
