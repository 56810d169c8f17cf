//! biketag - command line front end for the BikeTag resolution engine
//!
//! ```text
//! biketag [--config PATH] tag    [--album HASH | --album-file PATH] [--tag N|current] [--uncached]
//! biketag [--config PATH] posts  --subreddit NAME [--limit N]
//! biketag [--config PATH] users  [--album HASH | --album-file PATH] [--username NAME]
//! biketag [--config PATH] images [--album HASH | --album-file PATH] [--by-date] [--newest-first]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use biketag_common::BikeTagConfig;
use biketag_core::sequence::sort_by_upload_date;
use biketag_core::sources::{
    AlbumSource, FileAlbumSource, GooglePlacesGeocoder, ImgurClient, PostQuery, RedditClient,
};
use biketag_core::{new_cache, BikeTagService, ServiceOptions, TagRequest, UserTags};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for biketag
#[derive(Parser, Debug)]
#[command(name = "biketag")]
#[command(about = "Resolve BikeTag rounds from Imgur albums and Reddit posts")]
#[command(version)]
struct Cli {
    /// Configuration file (default: ~/.config/biketag/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the record for one round
    Tag {
        #[command(flatten)]
        album: AlbumArgs,

        /// Tag number or "current"
        #[arg(short, long, default_value = "current")]
        tag: TagRequest,

        /// Bypass cached data
        #[arg(long)]
        uncached: bool,
    },

    /// Print records assembled from subreddit posts
    Posts {
        /// Subreddit to search (default from config)
        #[arg(short, long)]
        subreddit: Option<String>,

        /// Maximum number of posts
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// Print album entries by player
    Users {
        #[command(flatten)]
        album: AlbumArgs,

        /// Only entries mentioning this username
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Print the sorted album
    Images {
        #[command(flatten)]
        album: AlbumArgs,

        /// Order by upload time instead of tag number
        #[arg(long)]
        by_date: bool,

        /// With --by-date, newest entries first
        #[arg(long, requires = "by_date")]
        newest_first: bool,
    },
}

/// Album selection shared by album commands
#[derive(Args, Debug)]
struct AlbumArgs {
    /// Imgur album hash (default from config)
    #[arg(long, conflicts_with = "album_file")]
    album: Option<String>,

    /// Read the album from a JSON file instead of Imgur
    #[arg(long)]
    album_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = BikeTagConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("biketag {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Tag {
            album,
            tag,
            uncached,
        } => {
            let (service, hash) = album_service(&config, &album)?;
            let record = service.tag_record(&hash, tag, uncached).await?;
            print_json(&record.as_deref())?;
        }
        Command::Posts { subreddit, limit } => {
            let subreddit = subreddit
                .or_else(|| non_empty(config.subreddit.as_deref()))
                .context("No subreddit given (use --subreddit or set subreddit in config)")?;
            let service = post_service(&config)?;
            let query = PostQuery::default().with_limit(limit);
            let records = service.post_records(&subreddit, &query, false).await?;
            print_json(&records)?;
        }
        Command::Users { album, username } => {
            let (service, hash) = album_service(&config, &album)?;
            match service.tags_by_user(&hash, username.as_deref(), false).await? {
                UserTags::ForUser(images) => print_json(&images)?,
                UserTags::Grouped(grouped) => print_json(&*grouped)?,
            }
        }
        Command::Images {
            album,
            by_date,
            newest_first,
        } => {
            let (service, hash) = album_service(&config, &album)?;
            let images = service.album_images(&hash, false).await?;
            if by_date {
                let mut images = images.to_vec();
                sort_by_upload_date(&mut images, newest_first);
                print_json(&images)?;
            } else {
                print_json(images.as_slice())?;
            }
        }
    }

    Ok(())
}

/// Service over the selected album source, plus the album hash to query
fn album_service(config: &BikeTagConfig, album: &AlbumArgs) -> Result<(BikeTagService, String)> {
    if let Some(path) = &album.album_file {
        debug!(path = %path.display(), "Using album file");
        let source = Arc::new(FileAlbumSource::from_file(path));
        return Ok((service_with(config, source), "file".to_string()));
    }

    let hash = album
        .album
        .clone()
        .or_else(|| non_empty(config.album_hash.as_deref()))
        .context("No album given (use --album, --album-file or set album_hash in config)")?;
    Ok((service_with(config, imgur(config)?), hash))
}

fn post_service(config: &BikeTagConfig) -> Result<BikeTagService> {
    let mut service =
        service_with(config, imgur(config)?).with_post_source(Arc::new(RedditClient::new()?));

    if let Some(api_key) = config.google_api_key.as_deref().filter(|_| config.geocoding_enabled()) {
        let geocoder = GooglePlacesGeocoder::new(api_key, &config.geocoder)?;
        service = service.with_geocoder(Arc::new(geocoder));
    }
    Ok(service)
}

fn imgur(config: &BikeTagConfig) -> Result<Arc<dyn AlbumSource>> {
    let Some(client_id) = non_empty(config.imgur_client_id.as_deref()) else {
        bail!("imgur_client_id is not configured (set it in config or BIKETAG_IMGUR_CLIENT_ID)");
    };
    Ok(Arc::new(ImgurClient::new(client_id)?))
}

fn service_with(config: &BikeTagConfig, albums: Arc<dyn AlbumSource>) -> BikeTagService {
    let cache = new_cache(&config.cache);
    let service =
        BikeTagService::new(cache, albums).with_options(ServiceOptions::from_config(config));
    service.spawn_cache_sweeper();
    service
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
