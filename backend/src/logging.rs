use env_logger::Env;

/// `RUST_LOG` filtered, `info` by default. Safe to call more than once.
pub fn init_logging() {
    if env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .try_init()
        .is_ok()
    {
        log::debug!("logging initialized");
    }
}
