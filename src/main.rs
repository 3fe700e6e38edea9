mod ai;
mod app;
mod calories;
mod config;
mod error;
mod extractors;
mod logging;
mod meals;
mod nutrition;
mod profile;
mod simulator;
mod state;
mod suggestions;
#[cfg(test)]
mod testing;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init(config.log_format);

    let state = AppState::init(&config).await?;
    app::serve(app::build_app(state), config.listen_addr).await
}
