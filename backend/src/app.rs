use crate::gpu::Gpu;
use crate::render::{render_frame, GlResources};

pub trait Platform {
    fn poll_quit(&mut self) -> bool;
    fn present(&mut self);
}

pub fn run<P: Platform, G: Gpu>(platform: &mut P, gpu: &mut G, resources: &GlResources) -> u64 {
    let mut frames = 0;
    loop {
        if platform.poll_quit() {
            break;
        }
        render_frame(gpu, resources);
        platform.present();
        frames += 1;
    }
    log::info!("quit requested after {} frames", frames);
    frames
}
