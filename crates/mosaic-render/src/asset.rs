#![forbid(unsafe_code)]

//! Asset ingestion.
//!
//! The engine only ever asks for "the image called `name`"; where it comes
//! from is up to the [`AssetSource`].

use std::collections::HashMap;
use std::fmt;
#[cfg(feature = "assets")]
use std::path::{Path, PathBuf};

use crate::image::PixelImage;

/// Failure to produce an image for a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// No resource with this name exists.
    NotFound(String),
    /// The resource exists but could not be decoded.
    Decode { name: String, message: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "asset not found: {name}"),
            Self::Decode { name, message } => write!(f, "failed to decode asset {name}: {message}"),
        }
    }
}

impl std::error::Error for AssetError {}

/// Synchronous image loader.
pub trait AssetSource {
    /// Load the image called `name` as four-channel RGBA.
    fn load(&self, name: &str) -> Result<PixelImage, AssetError>;
}

/// In-memory assets, mostly for tests and procedurally generated art.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    images: HashMap<String, PixelImage>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image, replacing any previous image with the same name.
    pub fn insert(&mut self, name: impl Into<String>, image: PixelImage) {
        self.images.insert(name.into(), image);
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, image: PixelImage) -> Self {
        self.insert(name, image);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, name: &str) -> Result<PixelImage, AssetError> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

/// Decode an encoded image (PNG, JPEG, GIF) held in memory.
#[cfg(feature = "assets")]
pub fn decode(name: &str, bytes: &[u8]) -> Result<PixelImage, AssetError> {
    let decoded = ::image::load_from_memory(bytes).map_err(|err| AssetError::Decode {
        name: name.to_string(),
        message: err.to_string(),
    })?;
    into_pixel_image(name, decoded)
}

#[cfg(feature = "assets")]
fn into_pixel_image(name: &str, decoded: ::image::DynamicImage) -> Result<PixelImage, AssetError> {
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    #[cfg(feature = "tracing")]
    tracing::debug!(asset = name, width, height, "decoded image asset");
    PixelImage::from_rgba(width, height, rgba.into_raw()).map_err(|err| AssetError::Decode {
        name: name.to_string(),
        message: err.to_string(),
    })
}

/// Images decoded from files under a root directory.
#[cfg(feature = "assets")]
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

#[cfg(feature = "assets")]
impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load an image from an explicit path, outside any root.
    pub fn load_path(path: &Path) -> Result<PixelImage, AssetError> {
        let name = path.display().to_string();
        if !path.is_file() {
            return Err(AssetError::NotFound(name));
        }
        let decoded = ::image::open(path).map_err(|err| AssetError::Decode {
            name: name.clone(),
            message: err.to_string(),
        })?;
        into_pixel_image(&name, decoded)
    }
}

#[cfg(feature = "assets")]
impl AssetSource for DirAssets {
    fn load(&self, name: &str) -> Result<PixelImage, AssetError> {
        Self::load_path(&self.root.join(name))
    }
}
