use std::ffi::CStr;
use std::marker::PhantomData;

use gl::types::*;

use crate::geometry::AttribBinding;
use crate::glutils::{gl_buffer_data_arr_stat, gl_error, gl_vertex_attrib_ptr_enab};
use crate::shaders::ShaderStage;

pub trait Gpu {
    fn create_shader(&mut self, stage: ShaderStage) -> u32;
    fn shader_source(&mut self, shader: u32, source: &str);
    fn compile_shader(&mut self, shader: u32);
    fn shader_compile_status(&self, shader: u32) -> bool;
    fn is_shader(&self, name: u32) -> bool;
    /// `GL_INFO_LOG_LENGTH` of a shader, including the terminating NUL.
    fn shader_info_log_length(&self, shader: u32) -> i32;
    /// Copies at most `buf.len()` bytes of the log, returning how many bytes
    /// were written excluding the NUL.
    fn shader_info_log(&self, shader: u32, buf: &mut [u8]) -> usize;
    fn delete_shader(&mut self, shader: u32);

    fn create_program(&mut self) -> u32;
    fn attach_shader(&mut self, program: u32, shader: u32);
    fn detach_shader(&mut self, program: u32, shader: u32);
    fn bind_attrib_location(&mut self, program: u32, index: u32, name: &CStr);
    fn link_program(&mut self, program: u32);
    fn program_link_status(&self, program: u32) -> bool;
    fn is_program(&self, name: u32) -> bool;
    fn program_info_log_length(&self, program: u32) -> i32;
    fn program_info_log(&self, program: u32, buf: &mut [u8]) -> usize;
    fn use_program(&mut self, program: u32);
    fn delete_program(&mut self, program: u32);

    fn gen_vertex_array(&mut self) -> u32;
    fn bind_vertex_array(&mut self, vao: u32);
    fn delete_vertex_array(&mut self, vao: u32);
    fn gen_buffer(&mut self) -> u32;
    fn bind_array_buffer(&mut self, vbo: u32);
    fn buffer_static_data(&mut self, data: &[f32]);
    fn vertex_attrib(&mut self, binding: &AttribBinding);
    fn delete_buffer(&mut self, vbo: u32);

    fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&mut self);
    fn draw_triangles(&mut self, first: i32, count: i32);

    fn take_error(&mut self) -> Option<u32>;
}

pub struct GlGpu {
    _not_send: PhantomData<*const ()>,
}

impl GlGpu {
    pub(crate) fn new() -> GlGpu {
        GlGpu {
            _not_send: PhantomData,
        }
    }
}

impl Gpu for GlGpu {
    fn create_shader(&mut self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn shader_source(&mut self, shader: u32, source: &str) {
        let len: GLint = source.len() as GLint;
        unsafe {
            gl::ShaderSource(shader, 1, &(source.as_bytes().as_ptr().cast()), &len);
        }
    }

    fn compile_shader(&mut self, shader: u32) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success == gl::TRUE as GLint
    }

    fn is_shader(&self, name: u32) -> bool {
        unsafe { gl::IsShader(name) == gl::TRUE }
    }

    fn shader_info_log_length(&self, shader: u32) -> i32 {
        let mut len = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len) };
        len
    }

    fn shader_info_log(&self, shader: u32, buf: &mut [u8]) -> usize {
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                buf.len() as GLsizei,
                &mut written,
                buf.as_mut_ptr().cast(),
            )
        };
        written.max(0) as usize
    }

    fn delete_shader(&mut self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&mut self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn detach_shader(&mut self, program: u32, shader: u32) {
        unsafe { gl::DetachShader(program, shader) };
    }

    fn bind_attrib_location(&mut self, program: u32, index: u32, name: &CStr) {
        unsafe { gl::BindAttribLocation(program, index, name.as_ptr().cast()) };
    }

    fn link_program(&mut self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success == gl::TRUE as GLint
    }

    fn is_program(&self, name: u32) -> bool {
        unsafe { gl::IsProgram(name) == gl::TRUE }
    }

    fn program_info_log_length(&self, program: u32) -> i32 {
        let mut len = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len) };
        len
    }

    fn program_info_log(&self, program: u32, buf: &mut [u8]) -> usize {
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                buf.len() as GLsizei,
                &mut written,
                buf.as_mut_ptr().cast(),
            )
        };
        written.max(0) as usize
    }

    fn use_program(&mut self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }

    fn delete_program(&mut self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn gen_vertex_array(&mut self) -> u32 {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        vao
    }

    fn bind_vertex_array(&mut self, vao: u32) {
        unsafe { gl::BindVertexArray(vao) };
    }

    fn delete_vertex_array(&mut self, vao: u32) {
        unsafe { gl::DeleteVertexArrays(1, &vao) };
    }

    fn gen_buffer(&mut self) -> u32 {
        let mut vbo = 0;
        unsafe { gl::GenBuffers(1, &mut vbo) };
        vbo
    }

    fn bind_array_buffer(&mut self, vbo: u32) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, vbo) };
    }

    fn buffer_static_data(&mut self, data: &[f32]) {
        gl_buffer_data_arr_stat(data);
    }

    fn vertex_attrib(&mut self, binding: &AttribBinding) {
        gl_vertex_attrib_ptr_enab(
            binding.index,
            binding.components,
            binding.stride_bytes(),
            binding.offset_bytes(),
        );
    }

    fn delete_buffer(&mut self, vbo: u32) {
        unsafe { gl::DeleteBuffers(1, &vbo) };
    }

    fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) };
    }

    fn clear_color_buffer(&mut self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) };
    }

    fn take_error(&mut self) -> Option<u32> {
        gl_error()
    }
}
