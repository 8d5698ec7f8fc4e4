//! Validation of base64-encoded recipe photos.
//!
//! Only JPEG and PNG are accepted. The declared type is checked against the file
//! signature, and an empty declaration is filled in from the signature.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("image data is empty")]
    Empty,

    #[error("image data is not valid base64")]
    InvalidBase64,

    #[error("image data is too short to identify")]
    TooShort,

    #[error("unsupported image type: {0} (expected jpeg or png)")]
    UnsupportedType(String),

    #[error("image is neither JPEG nor PNG")]
    Unrecognized,

    #[error("image data does not match declared type {0}")]
    Mismatch(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Jpeg,
    Png,
}

impl ImageType {
    /// Parse a declared type, e.g. `jpeg`, `JPG`, `image/png`.
    pub fn parse(declared: &str) -> Result<Self, ImageError> {
        let normalized = declared.trim().to_ascii_lowercase();
        let name = normalized.strip_prefix("image/").unwrap_or(&normalized);
        match name {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(ImageError::UnsupportedType(declared.to_string())),
        }
    }

    /// Identify an image from its leading bytes.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(JPEG_SIGNATURE) {
            Some(Self::Jpeg)
        } else if data.starts_with(PNG_SIGNATURE) {
            Some(Self::Png)
        } else {
            None
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }
}

/// A photo that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub image_type: ImageType,
}

impl DecodedImage {
    /// `data:<mime>;base64,<payload>`, the form vision models accept inline.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.image_type.mime_type(),
            STANDARD.encode(&self.data)
        )
    }
}

/// Decode and validate a base64 photo.
///
/// `encoded` may carry a `data:<mime>;base64,` prefix. `declared` may be empty, in which
/// case the type is taken from the file signature.
pub fn decode_image(encoded: &str, declared: &str) -> Result<DecodedImage, ImageError> {
    let payload = strip_data_uri_prefix(encoded.trim());
    if payload.is_empty() {
        return Err(ImageError::Empty);
    }

    let data = STANDARD
        .decode(payload)
        .map_err(|_| ImageError::InvalidBase64)?;
    if data.len() < PNG_SIGNATURE.len() {
        return Err(ImageError::TooShort);
    }

    let image_type = if declared.trim().is_empty() {
        ImageType::detect(&data).ok_or(ImageError::Unrecognized)?
    } else {
        let declared = ImageType::parse(declared)?;
        if ImageType::detect(&data) != Some(declared) {
            return Err(ImageError::Mismatch(declared.name()));
        }
        declared
    };

    Ok(DecodedImage { data, image_type })
}

fn strip_data_uri_prefix(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        if let Some((_, payload)) = encoded.split_once(',') {
            return payload;
        }
    }
    encoded
}
