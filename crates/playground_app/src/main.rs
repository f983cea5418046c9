mod app;
mod auth;
mod config;
mod effects;
mod logging;
mod ui;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);
    let settings = config::Settings::from_env();
    app::App::new(settings).run()
}
