mod app;
mod browser;
mod chartjs_bindings;
mod reveal;
mod telemetry;

use app::*;
use leptos::*;
use shared::DashboardConfig;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match browser::load_config() {
        Ok(config) => (config, None),
        Err(err) => (DashboardConfig::default(), Some(err)),
    };
    if !telemetry::init_tracing(&config.log_level) {
        tracing::debug!("tracing subscriber already installed");
    }
    if let Some(err) = config_error {
        tracing::warn!(%err, "ignoring page config, using defaults");
    }

    mount_to_body(|| {
        view! { <App/> }
    });

    if let Err(err) = browser::start(&config) {
        tracing::error!(?err, "dashboard failed to start");
    }
}
