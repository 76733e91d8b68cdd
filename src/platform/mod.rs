//! Platform abstraction layer
//!
//! Handles browser/native differences for logger and panic-hook setup, and
//! where native builds store progress.

/// Install the logger for this target
///
/// Native: `env_logger` (filter with `RUST_LOG`, defaults to `info`).
/// Web: browser console plus panic hook.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Where native builds keep progress: `override_dir` if given, else the
/// per-user data directory
#[cfg(not(target_arch = "wasm32"))]
pub fn save_dir(override_dir: Option<std::ffi::OsString>) -> std::path::PathBuf {
    match override_dir {
        Some(dir) => std::path::PathBuf::from(dir),
        None => dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("flappy-teddy"),
    }
}
