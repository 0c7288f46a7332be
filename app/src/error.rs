use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("nothing to export: width {width} produced no columns")]
    EmptyTerrain { width: i32 },

    #[error("failed to write {}: {source}", path.display())]
    SaveImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("viewer failed: {0}")]
    Viewer(#[from] eframe::Error),
}
