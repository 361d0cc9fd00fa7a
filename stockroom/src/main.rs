use clap::Parser;
use stockroom::cli::{self, Cli};
use stockroom::core::{Config, init_logger};
use stockroom::db::DbService;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cfg = Config::from_env();
    init_logger(&cfg.log_level, cfg.log_dir.as_deref());

    let cli = Cli::parse();
    if let Err(err) = run(cli, &cfg).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, cfg: &Config) -> anyhow::Result<()> {
    let db = DbService::new(&cfg.db_path).await?;
    let result = cli::run(cli, &db, cfg).await;
    db.close().await;
    result
}
