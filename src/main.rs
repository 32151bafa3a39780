mod command;
mod config;
mod database;
mod error;
mod filesystem;

use command::Command;
use config::{AppConfig, CONFIG_FILE};
use error::AppError;
use photo_gallery::{
    bare_file_name, BrowserPhotoStore, DeviceCamera, HttpFetcher, LocalFilesystem,
    MetadataCache, NativePhotoStore, Photo, PhotoGallery, PhotoStore, Platform,
};
use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        log::error!("{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("photo-gallery"),
    );

    #[cfg(not(target_os = "android"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

async fn run() -> Result<(), AppError> {
    let command = Command::parse(std::env::args().skip(1))?;

    let data_dir = filesystem::get_app_data_dir();
    let config = AppConfig::load(&data_dir.join(CONFIG_FILE))?;
    check_supported(&command, config.platform())?;
    let gallery = build_gallery(&config, &data_dir)?;
    gallery.initialize().await?;

    match command {
        Command::List => print_photos(&gallery.photos()),
        Command::Capture => {
            let photo = gallery.capture().await?;
            println!("Saved {}", photo.filepath);
        }
        Command::Delete(target) => {
            let photo = find_photo(&gallery.photos(), &target)
                .unwrap_or_else(|| Photo::new(target.clone(), None));
            let removed = gallery.delete(&photo).await?;
            println!("Deleted {} ({} removed from gallery)", photo.filepath, removed);
        }
    }

    Ok(())
}

/// Wires the gallery to the adapters for the configured platform
fn build_gallery(config: &AppConfig, data_dir: &Path) -> Result<PhotoGallery, AppError> {
    let gallery_config = config.gallery_config(data_dir);
    let fs = LocalFilesystem::new(&gallery_config.storage_path);
    let kv = database::open_key_value_store(&config.database_path(data_dir))?;

    let store: Box<dyn PhotoStore> = match gallery_config.platform {
        Platform::NativeBridge => Box::new(NativePhotoStore::new(
            fs,
            gallery_config.display_origin.clone(),
        )),
        Platform::Browser => Box::new(BrowserPhotoStore::new(fs, HttpFetcher::new())),
    };
    let cache = MetadataCache::new(Box::new(kv), gallery_config.cache_key.clone());

    Ok(PhotoGallery::new(Box::new(DeviceCamera::default()), store, cache))
}

/// The device camera returns file paths only, so browser mode can list and
/// delete but not capture
fn check_supported(command: &Command, platform: Platform) -> Result<(), AppError> {
    if *command == Command::Capture && platform == Platform::Browser {
        return Err(AppError::Validation(
            "capture is not available in browser mode, only list and delete".to_string(),
        ));
    }
    Ok(())
}

/// Matches a full filepath first, then a bare file name
fn find_photo(photos: &[Photo], target: &str) -> Option<Photo> {
    photos
        .iter()
        .find(|p| p.filepath == target)
        .or_else(|| photos.iter().find(|p| bare_file_name(&p.filepath) == target))
        .cloned()
}

fn print_photos(photos: &[Photo]) {
    if photos.is_empty() {
        println!("No photos yet");
        return;
    }
    for photo in photos {
        match &photo.display_path {
            Some(display) if display.len() <= 80 => println!("{}  {}", photo.filepath, display),
            Some(_) => println!("{}  <inline image>", photo.filepath),
            None => println!("{}", photo.filepath),
        }
    }
}
