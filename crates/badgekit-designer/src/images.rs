//! Uploaded image registry.
//!
//! Elements reference images by [`ImageId`] only. The library keeps the
//! opaque source string (a data URI, blob URL or file URL) and the
//! intrinsic pixel size when it is known.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use crate::model::ImageId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    #[serde(rename = "dataURI")]
    pub data_uri: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ImageAsset {
    pub fn new(data_uri: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            data_uri: data_uri.into(),
            filename: filename.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Width / height, if the intrinsic size is known.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(w as f64 / h as f64),
            _ => None,
        }
    }
}

/// Reads the pixel size from encoded image bytes without decoding pixels.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("Failed to read image header")?
        .into_dimensions()
        .context("Unrecognized image format")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageLibrary {
    images: BTreeMap<ImageId, ImageAsset>,
}

impl ImageLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an asset under a fresh id.
    pub fn insert(&mut self, asset: ImageAsset) -> ImageId {
        let id = ImageId::new_v4();
        tracing::debug!(%id, filename = %asset.filename, "Registered image");
        self.images.insert(id.clone(), asset);
        id
    }

    /// Registers an uploaded image, probing its size from the raw bytes.
    ///
    /// Unreadable bytes still register the image, just without a size.
    pub fn upload(
        &mut self,
        data_uri: impl Into<String>,
        filename: impl Into<String>,
        bytes: &[u8],
    ) -> ImageId {
        let mut asset = ImageAsset::new(data_uri, filename);
        match probe_dimensions(bytes) {
            Ok((w, h)) => asset = asset.with_size(w, h),
            Err(e) => tracing::warn!("Could not probe image size for {}: {:#}", asset.filename, e),
        }
        self.insert(asset)
    }

    /// Registers an image file by path, referenced through a `file://` URL.
    pub fn import_file(&mut self, path: &Path) -> Result<ImageId> {
        let (width, height) = image::ImageReader::open(path)
            .with_context(|| format!("Failed to open image {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("Failed to read image {}", path.display()))?
            .into_dimensions()
            .with_context(|| format!("Unrecognized image format: {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let asset = ImageAsset::new(format!("file://{}", path.display()), filename)
            .with_size(width, height);
        Ok(self.insert(asset))
    }

    pub fn get(&self, id: &ImageId) -> Option<&ImageAsset> {
        self.images.get(id)
    }

    pub fn contains(&self, id: &ImageId) -> bool {
        self.images.contains_key(id)
    }

    pub fn remove(&mut self, id: &ImageId) -> Option<ImageAsset> {
        self.images.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ImageId, &ImageAsset)> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
