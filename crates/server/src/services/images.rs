//! Image storage for uploaded profile and product pictures.
//!
//! Files are stored under the configured upload root with a random hex
//! filename to avoid collisions; only the returned relative path is kept in
//! the database. A failed write surfaces as an error so the triggering
//! update can abort instead of pointing at a missing file.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

/// File extensions accepted for uploads.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Length of the random filename stem, in bytes (hex-encoded to twice this).
const FILENAME_BYTES: usize = 8;

/// Errors that can occur while storing an uploaded image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The upload's extension is not an accepted image type.
    #[error("unsupported image extension: {0:?}")]
    UnsupportedExtension(String),

    /// Writing the file failed.
    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

/// The kind of image being stored; each kind has its own subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// User profile pictures.
    Profile,
    /// Item product pictures.
    Product,
}

impl ImageKind {
    /// Subdirectory under the upload root for this kind.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Profile => "artisans",
            Self::Product => "products",
        }
    }
}

/// Filesystem store for uploaded images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store an uploaded image and return its relative path.
    ///
    /// The original filename only contributes its extension; the stored name
    /// is a random hex stem, so concurrent uploads cannot collide.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::UnsupportedExtension` if the filename has no
    /// accepted image extension, and `ImageError::Io` if the write fails.
    pub async fn save(
        &self,
        kind: ImageKind,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, ImageError> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ImageError::UnsupportedExtension(original_name.to_owned()))?;

        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImageError::UnsupportedExtension(ext));
        }

        let filename = format!("{}.{ext}", random_stem());
        let dir = self.root.join(kind.dir());

        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&filename), bytes).await?;

        Ok(format!("{}/{filename}", kind.dir()))
    }
}

/// Random hex filename stem.
fn random_stem() -> String {
    use std::fmt::Write;

    let mut buf = [0u8; FILENAME_BYTES];
    rand::rng().fill(&mut buf);

    buf.iter()
        .fold(String::with_capacity(FILENAME_BYTES * 2), |mut stem, byte| {
            let _ = write!(stem, "{byte:02x}");
            stem
        })
}
