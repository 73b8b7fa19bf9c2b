//! Logging initialization

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable, e.g.
/// `RUST_LOG=scenebrush::stroke=debug` to trace every placement decision.
///
/// # Example
/// ```
/// scenebrush::core::logging::init();
/// log::info!("Brush tool started");
/// ```
pub fn init() {
    // try_init so repeated calls from tests and tools are harmless
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}
