use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::shaders::ShaderStage;

pub type Result<T> = std::result::Result<T, InitError>;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("platform initialization failed: {0}")]
    Platform(String),

    #[error("error loading OpenGL functions: {0} is not available")]
    DriverLoader(String),

    #[error("error reading {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to compile {stage} shader {handle}: {log}")]
    ShaderCompile {
        stage: ShaderStage,
        handle: u32,
        log: String,
    },

    #[error("error linking program {handle}: {log}")]
    ProgramLink { handle: u32, log: String },

    /// The driver returned the reserved zero name for a new object.
    #[error("gl failed to allocate {0}")]
    ResourceAllocation(&'static str),

    #[error("gl error 0x{code:04x} during {during}")]
    Gl { during: &'static str, code: u32 },
}

impl InitError {
    pub fn exit_code(&self) -> u8 {
        match self {
            InitError::Platform(_) => 2,
            InitError::DriverLoader(_) => 3,
            InitError::SourceRead { .. } => 4,
            InitError::ShaderCompile { .. } => 5,
            InitError::ProgramLink { .. } => 6,
            InitError::ResourceAllocation(_) | InitError::Gl { .. } => 7,
        }
    }
}
