use crate::config::ShaderPaths;
use crate::error::Result;
use crate::geometry::{self, Geometry, TRIANGLE};
use crate::gpu::Gpu;
use crate::shaders::Shaders;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlResources {
    pub shaders: Shaders,
    pub geometry: Geometry,
}

impl GlResources {
    pub fn init<G: Gpu>(gpu: &mut G, paths: &ShaderPaths) -> Result<GlResources> {
        let shaders = Shaders::from_files(gpu, paths)?;
        GlResources::with_shaders(gpu, shaders)
    }

    pub fn from_sources<G: Gpu>(gpu: &mut G, vertex: &str, fragment: &str) -> Result<GlResources> {
        let shaders = Shaders::from_str(gpu, vertex, fragment)?;
        GlResources::with_shaders(gpu, shaders)
    }

    fn with_shaders<G: Gpu>(gpu: &mut G, shaders: Shaders) -> Result<GlResources> {
        gpu.set_clear_color(0.0, 0.0, 0.0, 1.0);

        let geometry = match geometry::upload(gpu, &TRIANGLE) {
            Ok(g) => g,
            Err(e) => {
                shaders.delete(gpu);
                return Err(e);
            }
        };

        shaders.use_program(gpu);
        log::info!(
            "gl resources ready: program {}, vao {}, vbo {}",
            shaders.program_id(),
            geometry.vao,
            geometry.vbo
        );

        Ok(GlResources { shaders, geometry })
    }

    /// Deletes every GL object. The context must still be current.
    pub fn release<G: Gpu>(self, gpu: &mut G) {
        gpu.bind_vertex_array(0);
        gpu.use_program(0);
        gpu.delete_buffer(self.geometry.vbo);
        gpu.delete_vertex_array(self.geometry.vao);
        self.shaders.delete(gpu);
        log::debug!("gl resources released");
    }
}

pub fn render_frame<G: Gpu>(gpu: &mut G, resources: &GlResources) {
    gpu.clear_color_buffer();

    resources.shaders.use_program(gpu);
    gpu.bind_vertex_array(resources.geometry.vao);
    gpu.draw_triangles(0, resources.geometry.vertex_count);
}
