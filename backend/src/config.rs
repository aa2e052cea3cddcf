use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: (u8, u8),
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL SDL2 Window".to_string(),
            width: 750,
            height: 500,
            gl_version: (3, 1),
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("shader/shader.vert"),
            fragment: PathBuf::from("shader/shader.frag"),
        }
    }
}
