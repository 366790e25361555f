mod client;
mod components;
mod config;
mod error;
mod interventions;
mod model;
mod paint;
mod presenters;
mod scene;
mod score;
mod session;
mod util;

use components::App;
use config::ClientConfig;

fn main() {
    let config = ClientConfig::load();
    util::init_logging(&config.log_level);
    log::info!("engine endpoint: {}", config.endpoint());
    yew::Renderer::<App>::new().render();
}
