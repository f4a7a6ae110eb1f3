use thiserror::Error;

/// Why a single grid cell could not show its image
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("thumbnail task did not finish: {0}")]
    Join(String),
}

impl LoadError {
    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        LoadError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub fn from_image(path: &std::path::Path, err: image::ImageError) -> Self {
        let path = path.display().to_string();
        match err {
            image::ImageError::IoError(io) => LoadError::Io {
                path,
                reason: io.to_string(),
            },
            other => LoadError::Decode {
                path,
                reason: other.to_string(),
            },
        }
    }
}
