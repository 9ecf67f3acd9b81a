//! Image encoding: attachment bytes → base64 for the multimodal request body.
//!
//! The original bytes are sent as-is. PNG and JPEG are both accepted by the
//! model APIs, so there is nothing to gain from re-encoding.

use crate::trip::ImageAttachment;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use edgequake_llm::ImageData;
use tracing::debug;

/// Base64 of the attachment bytes, standard alphabet with padding.
pub fn to_base64(image: &ImageAttachment) -> String {
    let b64 = STANDARD.encode(&image.bytes);
    debug!("Encoded {} → {} bytes base64", image.mime_type, b64.len());
    b64
}

/// Wrap the attachment for an `edgequake-llm` chat message.
pub fn to_image_data(image: &ImageAttachment) -> ImageData {
    ImageData::new(to_base64(image), image.mime_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment() -> ImageAttachment {
        ImageAttachment {
            bytes: vec![0x89, b'P', b'N', b'G', 0, 1, 2],
            mime_type: "image/png",
        }
    }

    #[test]
    fn base64_round_trips_bytes() {
        let img = attachment();
        let decoded = STANDARD.decode(to_base64(&img)).expect("valid base64");
        assert_eq!(decoded, img.bytes);
    }

    #[test]
    fn image_data_keeps_mime_type() {
        let data = to_image_data(&attachment());
        assert_eq!(data.mime_type, "image/png");
        assert!(!data.data.is_empty());
    }
}
