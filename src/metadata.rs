//! Metadata enhancement applied after a fetch
//!
//! Raw protocol headers land in the document metadata untouched. An enhancer
//! derives normalized fields from them and mirrors those fields onto the
//! document itself.

use crate::doc::{Document, Metadata, CONTENT_ENCODING_KEY, CONTENT_TYPE_KEY};

/// Normalizes raw headers and reconciles document fields from metadata
///
/// Both operations must be idempotent.
pub trait MetadataEnhancer: Send + Sync {
    /// Derives normalized fields from raw headers
    fn enhance(&self, metadata: &mut Metadata);

    /// Copies normalized fields from the metadata onto the document
    fn apply_metadata_to_document(&self, doc: &mut Document);
}

/// Enhancer for HTTP response headers
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpHeaderEnhancer;

impl MetadataEnhancer for HttpHeaderEnhancer {
    fn enhance(&self, metadata: &mut Metadata) {
        let Some(raw) = metadata.get_first("content-type").map(str::to_string) else {
            return;
        };

        let (media_type, charset) = parse_content_type(&raw);
        if let Some(media_type) = media_type {
            metadata.set(CONTENT_TYPE_KEY, media_type);
        }
        match charset {
            Some(charset) => metadata.set(CONTENT_ENCODING_KEY, charset),
            None => {
                metadata.remove(CONTENT_ENCODING_KEY);
            }
        }
    }

    fn apply_metadata_to_document(&self, doc: &mut Document) {
        if let Some(content_type) = doc.metadata.get_first(CONTENT_TYPE_KEY) {
            doc.info.content_type = Some(content_type.to_string());
        }
        if let Some(encoding) = doc.metadata.get_first(CONTENT_ENCODING_KEY) {
            doc.info.content_encoding = Some(encoding.to_string());
        }
    }
}

/// Splits a `Content-Type` header into media type and charset
///
/// `text/HTML; Charset="UTF-8"` yields `(Some("text/html"), Some("UTF-8"))`.
pub fn parse_content_type(raw: &str) -> (Option<String>, Option<String>) {
    let mut parts = raw.split(';');

    let media_type = parts
        .next()
        .map(|m| m.trim().to_ascii_lowercase())
        .filter(|m| !m.is_empty());

    let charset = parts.find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_string())
    });

    (media_type, charset)
}
