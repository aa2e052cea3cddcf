use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::video::{GLProfile, SwapInterval};

use crate::app::Platform;
use crate::config::WindowConfig;
use crate::error::{InitError, Result};
use crate::glutils;
use crate::gpu::GlGpu;

pub fn is_quit_event(event: &Event) -> bool {
    matches!(
        event,
        Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            }
            | Event::KeyDown {
                scancode: Some(Scancode::Escape),
                ..
            }
    )
}

pub fn drain_quit_requests<I: IntoIterator<Item = Event>>(events: I) -> bool {
    let mut quit = false;
    for event in events {
        if is_quit_event(&event) {
            quit = true;
        }
    }
    quit
}

fn check_swap_interval(result: std::result::Result<(), String>) -> Result<()> {
    result.map_err(|e| InitError::Platform(format!("unable to set vsync: {e}")))
}

// Field order is drop order: context, window, then the subsystems.
pub struct System {
    event_pump: sdl2::EventPump,
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(config: &WindowConfig) -> Result<System> {
        let sdl_context = sdl2::init().map_err(InitError::Platform)?;
        let video_subsystem = sdl_context.video().map_err(InitError::Platform)?;

        let (major, minor) = config.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(major, minor);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| InitError::Platform(format!("error while building OpenGL window: {e}")))?;

        let gl_ctx = window.gl_create_context().map_err(|e| {
            InitError::Platform(format!("OpenGL context could not be created: {e}"))
        })?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
        glutils::ensure_loaded()?;

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        log::debug!(
            "requested GL {}.{} core, got {:?}",
            major,
            minor,
            gl_attr.context_version()
        );
        glutils::print_opengl_info();

        if config.vsync {
            check_swap_interval(video_subsystem.gl_set_swap_interval(SwapInterval::VSync))?;
        }

        let event_pump = sdl_context.event_pump().map_err(InitError::Platform)?;

        log::info!(
            "window '{}' {}x{} created",
            config.title,
            config.width,
            config.height
        );

        Ok(System {
            event_pump,
            gl_ctx,
            window,
            video_subsystem,
            sdl_context,
        })
    }

    pub fn gpu(&self) -> GlGpu {
        GlGpu::new()
    }

    pub fn process_io_events(&mut self) -> bool {
        !drain_quit_requests(self.event_pump.poll_iter())
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
    }
}

impl Platform for System {
    fn poll_quit(&mut self) -> bool {
        !self.process_io_events()
    }

    fn present(&mut self) {
        self.draw_to_screen();
    }
}
