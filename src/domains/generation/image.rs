//! Generated image values and descriptor decoding.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::error::GenerationError;

/// Raw bytes of one generated image. Handed to the caller; nothing is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub binary_data: Vec<u8>,
    pub format: String,
}

impl GeneratedImage {
    pub fn mime_type(&self) -> String {
        format!("image/{}", self.format)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.binary_data)
    }
}

/// What an image descriptor pointed at.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageReference {
    /// Bytes that arrived inline as a `data:` URI.
    Inline(GeneratedImage),
    /// A hosted image the caller has to fetch.
    Url { url: String, format: String },
}

impl ImageReference {
    /// Interpret a descriptor URL.
    ///
    /// `content_type` is the MIME type the service reported, and
    /// `fallback_format` is used when neither the data URI nor the service
    /// names one.
    pub fn parse(
        url: &str,
        content_type: Option<&str>,
        fallback_format: &str,
    ) -> Result<Self, GenerationError> {
        let reported = content_type.and_then(mime_subtype);

        if let Some(rest) = url.strip_prefix("data:") {
            let (header, data) = rest
                .split_once(',')
                .ok_or_else(|| GenerationError::UnsupportedReference(preview(url)))?;
            let mime = header
                .strip_suffix(";base64")
                .ok_or_else(|| GenerationError::UnsupportedReference(preview(url)))?;

            let binary_data = STANDARD
                .decode(data.trim())
                .map_err(|e| GenerationError::Decode(e.to_string()))?;
            let format = mime_subtype(mime)
                .or(reported)
                .unwrap_or(fallback_format)
                .to_string();

            return Ok(Self::Inline(GeneratedImage { binary_data, format }));
        }

        if url.starts_with("https://") || url.starts_with("http://") {
            return Ok(Self::Url {
                url: url.to_string(),
                format: reported.unwrap_or(fallback_format).to_string(),
            });
        }

        Err(GenerationError::UnsupportedReference(preview(url)))
    }
}

/// `image/png` -> `png`; parameters after `;` are ignored.
fn mime_subtype(mime: &str) -> Option<&str> {
    let essence = mime.split(';').next()?.trim();
    let (_, subtype) = essence.split_once('/')?;
    (!subtype.is_empty()).then_some(subtype)
}

/// Keep error messages short when a descriptor carries a large payload.
fn preview(url: &str) -> String {
    const MAX: usize = 64;
    match url.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &url[..cut]),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

    #[test]
    fn test_inline_png_round_trip() {
        let encoded = STANDARD.encode(PIXEL);
        let uri = format!("data:image/png;base64,{}", encoded);

        let ImageReference::Inline(image) = ImageReference::parse(&uri, None, "jpeg").unwrap() else {
            panic!("expected inline image");
        };
        assert_eq!(image.binary_data, PIXEL);
        assert_eq!(image.format, "png");
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.to_base64(), encoded);
    }

    #[test]
    fn test_splits_on_first_comma_only() {
        // a comma can't appear in base64, so anything after it is invalid data
        let uri = "data:image/png;base64,AAAA,BBBB";
        let err = ImageReference::parse(uri, None, "png").unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[test]
    fn test_invalid_base64_is_decode_error() {
        let err = ImageReference::parse("data:image/png;base64,@@not-base64@@", None, "png").unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[test]
    fn test_format_falls_back_to_reported_then_default() {
        let data = STANDARD.encode(b"abc");

        let uri = format!("data:;base64,{}", data);
        let ImageReference::Inline(image) = ImageReference::parse(&uri, Some("image/webp"), "png").unwrap() else {
            panic!("expected inline image");
        };
        assert_eq!(image.format, "webp");

        let ImageReference::Inline(image) = ImageReference::parse(&uri, None, "png").unwrap() else {
            panic!("expected inline image");
        };
        assert_eq!(image.format, "png");
    }

    #[test]
    fn test_plain_url_is_not_decoded() {
        let reference =
            ImageReference::parse("https://cdn.example.com/out.jpeg", Some("image/jpeg"), "png").unwrap();
        assert_eq!(
            reference,
            ImageReference::Url {
                url: "https://cdn.example.com/out.jpeg".to_string(),
                format: "jpeg".to_string(),
            }
        );
    }

    #[test]
    fn test_unsupported_references() {
        assert!(matches!(
            ImageReference::parse("ftp://host/file.png", None, "png").unwrap_err(),
            GenerationError::UnsupportedReference(_)
        ));
        assert!(matches!(
            ImageReference::parse("data:image/png,rawbytes", None, "png").unwrap_err(),
            GenerationError::UnsupportedReference(_)
        ));

        let long = format!("ftp://{}", "x".repeat(500));
        let message = ImageReference::parse(&long, None, "png").unwrap_err().to_string();
        assert!(message.len() < 200);
    }
}
