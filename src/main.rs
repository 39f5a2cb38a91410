//! Command line entry point: open a carousel window over a set of images.

use std::path::{Path, PathBuf};

use arcslide::{ArcslideError, Viewer};

/// Raster extensions the decode pipeline accepts.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
}

/// Resolve CLI arguments into an ordered image list. A directory argument
/// is scanned (non-recursively) and sorted by name; file arguments are
/// taken as given, in order.
fn resolve_images(args: &[String]) -> Result<Vec<PathBuf>, ArcslideError> {
    let mut images = Vec::new();

    for arg in args {
        let path = PathBuf::from(arg);
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(&path)
                .map_err(ArcslideError::Io)?
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.is_file() && is_image(p))
                .collect();
            entries.sort();
            if entries.is_empty() {
                return Err(ArcslideError::NoImages(format!(
                    "no image files in {}",
                    path.display()
                )));
            }
            images.extend(entries);
        } else if is_image(&path) {
            images.push(path);
        } else {
            return Err(ArcslideError::NoImages(format!(
                "not an image file or directory: {}",
                path.display()
            )));
        }
    }

    if images.is_empty() {
        return Err(ArcslideError::NoImages(
            "no image sources given".into(),
        ));
    }
    Ok(images)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        log::error!("Usage: arcslide <image-dir or image files...>");
        std::process::exit(1);
    }

    let images = match resolve_images(&args) {
        Ok(images) => images,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("carousel of {} images", images.len());

    let viewer = Viewer::builder().with_images(images).build();
    if let Err(e) = viewer.run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
