use form_core::{cli::run_cli, config::ConfigManager, init, utils};

fn main() {
    if let Ok(config) = ConfigManager::new().and_then(|manager| manager.load()) {
        utils::init_tracing_with(&config.log_filter);
    }
    init();

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
