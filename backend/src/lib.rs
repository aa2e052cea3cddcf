//! SDL2 window, OpenGL 3.1 core context and the single-triangle renderer
//! driven by the `game` binary.

pub mod app;
pub mod config;
pub mod error;
pub mod geometry;
pub mod glutils;
pub mod gpu;
pub mod logging;
pub mod render;
pub mod shaders;
pub mod system;

pub use error::{InitError, Result};
