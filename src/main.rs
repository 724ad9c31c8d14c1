use link_shortener::{config, logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_env_file()?;

    let config = config::load_from_env()?;
    logging::init(config.env)?;
    config.print_summary();

    server::run(config).await
}
