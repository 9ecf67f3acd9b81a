//! Input resolution: load the optional reference image from disk.
//!
//! The image is sniffed by content, not by extension. Only PNG and JPEG are
//! accepted; anything else is rejected before a request is built so the
//! remote call is never spent on a payload the model would refuse.

use crate::error::ItineraryError;
use crate::trip::ImageAttachment;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read an image file and classify it as PNG or JPEG.
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageAttachment, ItineraryError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ItineraryError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ItineraryError::ImagePermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ItineraryError::ImageNotFound {
            path: PathBuf::from(path),
        },
    })?;

    let attachment = image_from_bytes(bytes)?;
    debug!(
        "Loaded image {} ({}, {} bytes)",
        path.display(),
        attachment.mime_type,
        attachment.bytes.len()
    );
    Ok(attachment)
}

/// Classify in-memory image bytes as PNG or JPEG.
pub fn image_from_bytes(bytes: Vec<u8>) -> Result<ImageAttachment, ItineraryError> {
    let mime_type = match image::guess_format(&bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(other) => {
            return Err(ItineraryError::UnsupportedImage {
                detail: format!("{other:?}"),
            })
        }
        Err(e) => {
            return Err(ItineraryError::UnsupportedImage {
                detail: e.to_string(),
            })
        }
    };
    Ok(ImageAttachment { bytes, mime_type })
}
