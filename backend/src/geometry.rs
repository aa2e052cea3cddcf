use std::ffi::CStr;
use std::ops::Range;

use crate::error::{InitError, Result};
use crate::gpu::Gpu;

pub const FLOATS_PER_VERTEX: usize = 6;

/// How one vertex shader input reads the interleaved buffer. `stride` and
/// `offset` are counted in floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttribBinding {
    pub index: u32,
    pub name: &'static CStr,
    pub components: u32,
    pub stride: u32,
    pub offset: usize,
}

impl AttribBinding {
    pub fn stride_bytes(&self) -> usize {
        self.stride as usize * std::mem::size_of::<f32>()
    }

    pub fn offset_bytes(&self) -> usize {
        self.offset * std::mem::size_of::<f32>()
    }

    pub fn float_range(&self) -> Range<usize> {
        self.offset..self.offset + self.components as usize
    }
}

pub const POSITION: AttribBinding = AttribBinding {
    index: 0,
    name: c"position",
    components: 3,
    stride: FLOATS_PER_VERTEX as u32,
    offset: 0,
};

pub const COLOR: AttribBinding = AttribBinding {
    index: 1,
    name: c"color",
    components: 3,
    stride: FLOATS_PER_VERTEX as u32,
    offset: 3,
};

pub const VERTEX_LAYOUT: [AttribBinding; 2] = [POSITION, COLOR];

#[rustfmt::skip]
pub const TRIANGLE: [f32; 18] = [
    // positions          // colors
    -0.5, -0.5, 0.0,      1.0, 0.0, 0.0, // bottom left
     0.5, -0.5, 0.0,      0.0, 1.0, 0.0, // bottom right
     0.0,  0.5, 0.0,      0.0, 0.0, 1.0, // top
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub vao: u32,
    pub vbo: u32,
    pub vertex_count: i32,
}

pub fn upload<G: Gpu>(gpu: &mut G, vertices: &[f32]) -> Result<Geometry> {
    let vao = gpu.gen_vertex_array();
    if vao == 0 {
        return Err(InitError::ResourceAllocation("vertex array"));
    }
    let vbo = gpu.gen_buffer();
    if vbo == 0 {
        gpu.delete_vertex_array(vao);
        return Err(InitError::ResourceAllocation("vertex buffer"));
    }

    gpu.bind_vertex_array(vao);
    gpu.bind_array_buffer(vbo);
    gpu.buffer_static_data(vertices);

    for binding in VERTEX_LAYOUT.iter() {
        gpu.vertex_attrib(binding);
    }

    if let Some(code) = gpu.take_error() {
        gpu.delete_buffer(vbo);
        gpu.delete_vertex_array(vao);
        return Err(InitError::Gl {
            during: "geometry upload",
            code,
        });
    }

    let vertex_count = (vertices.len() / FLOATS_PER_VERTEX) as i32;
    log::debug!(
        "uploaded {} vertices into vao {} / vbo {}",
        vertex_count,
        vao,
        vbo
    );

    Ok(Geometry {
        vao,
        vbo,
        vertex_count,
    })
}
