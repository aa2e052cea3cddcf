use std::process::ExitCode;

use backend::app;
use backend::config::{ShaderPaths, WindowConfig};
use backend::logging::init_logging;
use backend::render::GlResources;
use backend::system::System;

fn run() -> backend::Result<()> {
    let mut system = System::new(&WindowConfig::default())?;
    let mut gpu = system.gpu();

    let resources = GlResources::init(&mut gpu, &ShaderPaths::default())?;

    app::run(&mut system, &mut gpu, &resources);

    resources.release(&mut gpu);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("initialization failure: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
