use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::ShaderPaths;
use crate::error::{InitError, Result};
use crate::geometry::VERTEX_LAYOUT;
use crate::gpu::Gpu;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> gl::types::GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

pub fn read_shader_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| InitError::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Sizes a buffer from the driver-reported `len`, lets `fetch` fill it and
/// keeps only the bytes actually written. A non-positive length means there
/// is no log and `fetch` is never called.
fn read_info_log(len: i32, fetch: impl FnOnce(&mut [u8]) -> usize) -> String {
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len as usize];
    let written = fetch(&mut buf).min(buf.len());
    buf.truncate(written);
    while buf.last() == Some(&0) {
        buf.pop();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn shader_log<G: Gpu>(gpu: &G, shader: u32) -> String {
    if !gpu.is_shader(shader) {
        log::warn!("name {} is not a shader", shader);
        return String::new();
    }
    let len = gpu.shader_info_log_length(shader);
    read_info_log(len, |buf| gpu.shader_info_log(shader, buf))
}

pub fn program_log<G: Gpu>(gpu: &G, program: u32) -> String {
    if !gpu.is_program(program) {
        log::warn!("name {} is not a program", program);
        return String::new();
    }
    let len = gpu.program_info_log_length(program);
    read_info_log(len, |buf| gpu.program_info_log(program, buf))
}

pub fn compile<G: Gpu>(gpu: &mut G, stage: ShaderStage, source: &str) -> Result<u32> {
    let shader = gpu.create_shader(stage);
    if shader == 0 {
        return Err(InitError::ResourceAllocation("shader object"));
    }

    gpu.shader_source(shader, source);
    gpu.compile_shader(shader);

    if !gpu.shader_compile_status(shader) {
        let log = shader_log(gpu, shader);
        log::error!("unable to compile {} shader {}!", stage, shader);
        if !log.is_empty() {
            log::error!("{}", log);
        }
        gpu.delete_shader(shader);
        return Err(InitError::ShaderCompile {
            stage,
            handle: shader,
            log,
        });
    }

    log::debug!("compiled {} shader {}", stage, shader);
    Ok(shader)
}

/// Links both stages into a new program. The shader objects are consumed:
/// they are released whether or not the link succeeds.
pub fn link<G: Gpu>(gpu: &mut G, vertex: u32, fragment: u32) -> Result<u32> {
    let program = gpu.create_program();
    if program == 0 {
        gpu.delete_shader(vertex);
        gpu.delete_shader(fragment);
        return Err(InitError::ResourceAllocation("program object"));
    }

    gpu.attach_shader(program, vertex);
    gpu.attach_shader(program, fragment);
    for binding in VERTEX_LAYOUT.iter() {
        gpu.bind_attrib_location(program, binding.index, binding.name);
    }
    gpu.link_program(program);

    if !gpu.program_link_status(program) {
        let log = program_log(gpu, program);
        log::error!("error linking program {}!", program);
        if !log.is_empty() {
            log::error!("{}", log);
        }
        gpu.delete_program(program);
        gpu.delete_shader(vertex);
        gpu.delete_shader(fragment);
        return Err(InitError::ProgramLink {
            handle: program,
            log,
        });
    }

    // not needed anymore
    gpu.detach_shader(program, vertex);
    gpu.detach_shader(program, fragment);
    gpu.delete_shader(vertex);
    gpu.delete_shader(fragment);

    log::debug!("linked program {}", program);
    Ok(program)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Shaders {
    program_id: u32,
}

impl Shaders {
    pub fn from_files<G: Gpu>(gpu: &mut G, paths: &ShaderPaths) -> Result<Shaders> {
        let vertex_code = read_shader_source(&paths.vertex)?;
        let fragment_code = read_shader_source(&paths.fragment)?;
        log::debug!(
            "loaded shader sources {} and {}",
            paths.vertex.display(),
            paths.fragment.display()
        );

        Shaders::from_str(gpu, &vertex_code, &fragment_code)
    }

    pub fn from_str<G: Gpu>(gpu: &mut G, vertex_code: &str, fragment_code: &str) -> Result<Shaders> {
        let vertex_shader = compile(gpu, ShaderStage::Vertex, vertex_code)?;
        let fragment_shader = match compile(gpu, ShaderStage::Fragment, fragment_code) {
            Ok(s) => s,
            Err(e) => {
                gpu.delete_shader(vertex_shader);
                return Err(e);
            }
        };

        let program_id = link(gpu, vertex_shader, fragment_shader)?;
        Ok(Shaders { program_id })
    }

    pub fn program_id(&self) -> u32 {
        self.program_id
    }

    pub fn use_program<G: Gpu>(&self, gpu: &mut G) {
        gpu.use_program(self.program_id);
    }

    pub fn delete<G: Gpu>(self, gpu: &mut G) {
        gpu.delete_program(self.program_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::fake::{Call, FakeGpu};
    use std::io::Write;

    const VERT: &str = "#version 140\nin vec3 position;\nvoid main() {}\n";
    const FRAG: &str = "#version 140\nout vec4 c;\nvoid main() {}\n";

    #[test]
    fn valid_pair_links_to_non_zero_program_and_releases_shaders() {
        let mut gpu = FakeGpu::new();
        let shaders = Shaders::from_str(&mut gpu, VERT, FRAG).unwrap();

        assert_ne!(shaders.program_id(), 0);
        assert_eq!(gpu.deleted_shaders(), vec![1, 2]);
        assert!(gpu
            .calls
            .contains(&Call::DetachShader(shaders.program_id(), 1)));
        assert!(gpu
            .calls
            .contains(&Call::DetachShader(shaders.program_id(), 2)));
    }

    #[test]
    fn source_text_reaches_the_driver_verbatim() {
        let mut gpu = FakeGpu::new();
        Shaders::from_str(&mut gpu, VERT, FRAG).unwrap();
        assert!(gpu.calls.contains(&Call::ShaderSource(1, VERT.to_string())));
        assert!(gpu.calls.contains(&Call::ShaderSource(2, FRAG.to_string())));
    }

    #[test]
    fn attribute_locations_are_bound_before_link() {
        let mut gpu = FakeGpu::new();
        let shaders = Shaders::from_str(&mut gpu, VERT, FRAG).unwrap();
        let program = shaders.program_id();

        let position = gpu
            .calls
            .iter()
            .position(|c| *c == Call::BindAttribLocation(program, 0, "position".into()))
            .unwrap();
        let color = gpu
            .calls
            .iter()
            .position(|c| *c == Call::BindAttribLocation(program, 1, "color".into()))
            .unwrap();
        let link = gpu
            .calls
            .iter()
            .position(|c| *c == Call::LinkProgram(program))
            .unwrap();
        assert!(position < link && color < link);
    }

    #[test]
    fn compile_failure_carries_stage_and_driver_log() {
        let mut gpu = FakeGpu::new();
        gpu.failing_stage = Some((ShaderStage::Fragment, "0:2: syntax error".into()));

        let err = Shaders::from_str(&mut gpu, VERT, FRAG).unwrap_err();
        match err {
            InitError::ShaderCompile { stage, handle, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert_eq!(handle, 2);
                assert_eq!(log, "0:2: syntax error");
            }
            other => panic!("unexpected error: {other}"),
        }
        // both the failed fragment and the compiled vertex shader are gone
        assert_eq!(gpu.deleted_shaders(), vec![2, 1]);
        assert!(!gpu.calls.iter().any(|c| matches!(c, Call::CreateProgram(_))));
    }

    #[test]
    fn compile_failure_with_empty_log_never_reads_the_log() {
        let mut gpu = FakeGpu::new();
        gpu.failing_stage = Some((ShaderStage::Vertex, String::new()));

        let err = compile(&mut gpu, ShaderStage::Vertex, "garbage").unwrap_err();
        match err {
            InitError::ShaderCompile { log, .. } => assert!(log.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn link_failure_carries_program_log_and_releases_everything() {
        let mut gpu = FakeGpu::new();
        gpu.link_failure = Some("error: unresolved varying".into());

        let err = Shaders::from_str(&mut gpu, VERT, FRAG).unwrap_err();
        match err {
            InitError::ProgramLink { handle, log } => {
                assert_eq!(handle, 3);
                assert_eq!(log, "error: unresolved varying");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(gpu.calls.contains(&Call::DeleteProgram(3)));
        assert_eq!(gpu.deleted_shaders(), vec![1, 2]);
    }

    #[test]
    fn info_log_of_zero_or_negative_length_is_empty() {
        let mut called = false;
        assert_eq!(read_info_log(0, |_| { called = true; 0 }), "");
        assert_eq!(read_info_log(-1, |_| { called = true; 0 }), "");
        assert!(!called);
    }

    #[test]
    fn info_log_keeps_only_written_bytes() {
        let log = read_info_log(16, |buf| {
            assert_eq!(buf.len(), 16);
            buf[..5].copy_from_slice(b"oops\0");
            4
        });
        assert_eq!(log, "oops");
    }

    #[test]
    fn info_log_ignores_overreported_write_count() {
        let log = read_info_log(3, |buf| {
            buf.copy_from_slice(b"ab\0");
            99
        });
        assert_eq!(log, "ab");
    }

    #[test]
    fn log_of_unknown_name_is_empty() {
        let gpu = FakeGpu::new();
        assert_eq!(shader_log(&gpu, 42), "");
        assert_eq!(program_log(&gpu, 42), "");
    }

    #[test]
    fn missing_file_is_a_source_read_error() {
        let path = std::env::temp_dir().join("backend-shaders-does-not-exist.vert");
        let err = read_shader_source(&path).unwrap_err();
        match err {
            InitError::SourceRead { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_files_reads_both_stages() {
        let dir = std::env::temp_dir().join(format!("backend-shaders-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let paths = ShaderPaths {
            vertex: dir.join("shader.vert"),
            fragment: dir.join("shader.frag"),
        };
        fs::File::create(&paths.vertex)
            .unwrap()
            .write_all(VERT.as_bytes())
            .unwrap();
        fs::File::create(&paths.fragment)
            .unwrap()
            .write_all(FRAG.as_bytes())
            .unwrap();

        let mut gpu = FakeGpu::new();
        let shaders = Shaders::from_files(&mut gpu, &paths).unwrap();
        assert_ne!(shaders.program_id(), 0);
        assert!(gpu.calls.contains(&Call::ShaderSource(2, FRAG.to_string())));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bundled_shaders_are_readable() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
        let defaults = ShaderPaths::default();
        let vertex = read_shader_source(&root.join(&defaults.vertex)).unwrap();
        let fragment = read_shader_source(&root.join(&defaults.fragment)).unwrap();
        assert!(vertex.contains("in vec3 position;"));
        assert!(vertex.contains("in vec3 color;"));
        assert!(fragment.starts_with("#version 140"));
    }
}
