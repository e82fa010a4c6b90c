use std::process::ExitCode;

use mpg_app::{build_tool_label, App, WinitPlatform};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("=== Multi-Platform GUI Application ===");
    log::info!("Build tool: {}", build_tool_label());

    let mut app = App::new(WinitPlatform, build_tool_label());
    if let Err(err) = app.initialize() {
        log::error!("Failed to initialize application: {}", err);
        return ExitCode::FAILURE;
    }

    app.run();
    app.cleanup();

    log::info!("Application exited successfully");
    ExitCode::SUCCESS
}
