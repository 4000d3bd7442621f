use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use folio::application::{CatalogService, PreloadUseCase};
use folio::domain::entities::ImageKey;
use folio::domain::services::PicturePairing;
use folio::infrastructure::{
    AppConfig, CatalogStore, CliArgs, Command, DirectoryPictureSource, FifoImageCache,
    HttpImageFetcher, StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let manager = StorageManager::new()?;
    let mut config = manager.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn catalog_service(config: &AppConfig) -> CatalogService {
    let content = &config.content;
    CatalogService::new(
        Arc::new(DirectoryPictureSource::new(content.pictures_dir())),
        CatalogStore::new(content.pictures_dir(), content.videos_dir()),
        PicturePairing::new(content.public_base()),
    )
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let service = catalog_service(config);

    match command {
        Command::Pictures { scan, fallback } => {
            let catalog = if scan {
                service.generate_pictures()
            } else if fallback {
                service.pictures_or_sample()
            } else {
                service.pictures()?
            };
            print_json(&catalog)
        }
        Command::Videos { fallback } => {
            let catalog = if fallback {
                service.videos_or_sample()
            } else {
                service.videos()?
            };
            print_json(&catalog)
        }
        Command::Generate => {
            let (catalog, path) = service.export_pictures()?;
            println!(
                "Wrote {} pictures in {} categories to {}",
                catalog.picture_count(),
                catalog.categories.len(),
                path.display()
            );
            Ok(())
        }
        Command::Preload { urls } => {
            let keys: Vec<ImageKey> = if urls.is_empty() {
                PreloadUseCase::keys_for_catalog(&service.pictures()?)
            } else {
                urls.into_iter().map(ImageKey::from).collect()
            };

            let fetcher = Arc::new(HttpImageFetcher::new(config.fetcher_config())?);
            let cache = Arc::new(
                FifoImageCache::new(config.cache.capacity, fetcher)
                    .with_single_flight(config.cache.single_flight),
            );
            let report = PreloadUseCase::new(cache.clone()).execute(&keys).await;

            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok((source, width, height)) => {
                        println!("ok     {source} {width}x{height}  {}", outcome.key);
                    }
                    Err(e) => println!("failed {e}  {}", outcome.key),
                }
            }
            println!("{}", cache.stats());

            if report.failed() > 0 {
                return Err(eyre!(
                    "{} of {} images failed to preload",
                    report.failed(),
                    report.outcomes.len()
                ));
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = folio::VERSION, "Starting folio");

    run(args.command, &config).await
}
