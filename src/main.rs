use std::{path::Path, sync::Arc};

use clap::Parser;

use shipshape::{
    cli::{Args, Commands},
    config::RulesConfig,
    organizer::Organizer,
    store::{LockRetention, S3Store},
    transfer::Uploader,
    utils::init_tracing,
};

const DEFAULT_CONFIG: &str = "config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    match args.cmd {
        Commands::Organize {
            path,
            config,
            on_collision,
        } => {
            let rules = match config {
                Some(file) => RulesConfig::load_from_file(file)?,
                None if Path::new(DEFAULT_CONFIG).exists() => {
                    RulesConfig::load_from_file(DEFAULT_CONFIG)?
                }
                None => RulesConfig::default(),
            };

            Organizer::new(rules)
                .with_collision_policy(on_collision)
                .organize(&path)?;
        }
        Commands::Upload { bucket, path } => {
            let store = Arc::new(S3Store::connect(bucket).await);
            Uploader::new(store).upload_directory(&path).await?;
        }
        Commands::ValidateLock { bucket } => {
            let desired = LockRetention::from_env()?;
            let store = Arc::new(S3Store::connect(bucket).await);

            if Uploader::new(store).validate_object_lock(&desired).await {
                println!("object lock configuration matches");
            } else {
                anyhow::bail!("object lock configuration does not match");
            }
        }
    }

    Ok(())
}
