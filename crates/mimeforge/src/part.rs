//! Building one logical content item into a typed MIME leaf.

use crate::content_type::{ContentType, media_type_for_extension};
use crate::encoding::TransferEncoding;
use crate::node::Leaf;
use std::fmt;
use std::path::Path;

/// How a part should be presented by the receiving client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Rendered in place, referenced from the HTML body.
    Inline,
    /// Offered as a downloadable file.
    Attachment,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => write!(f, "inline"),
            Self::Attachment => write!(f, "attachment"),
        }
    }
}

/// One inline or attached resource, as supplied by the caller.
///
/// Every field but the content is optional; missing values are filled
/// with documented defaults while the leaf is built, never rejected.
#[derive(Debug, Clone, Default)]
pub struct Attachment {
    /// File name; drives the disposition filename parameter and, when the
    /// MIME type is absent, extension sniffing.
    pub file_name: Option<String>,
    /// `type/subtype` string. Missing or malformed values fall back to
    /// `application/octet-stream`.
    pub mime_type: Option<String>,
    /// Content-Id; wrapped in angle brackets if not already.
    pub content_id: Option<String>,
    /// Presentation disposition; defaulted by
    /// [`Message::embed`](crate::Message::embed) and
    /// [`Message::attach`](crate::Message::attach) when unset.
    pub disposition: Option<Disposition>,
    /// Encoding the content bytes are already in. Defaults to identity.
    pub input_encoding: Option<TransferEncoding>,
    /// Encoding to serialize the part with. Defaults to base64.
    pub output_encoding: Option<TransferEncoding>,
    /// Raw content bytes.
    pub content: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from raw content bytes.
    #[must_use]
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Sets the file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Sets the Content-Id.
    #[must_use]
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }
}

/// Builds a typed leaf from one attachment.
///
/// The disposition is always set: the attachment's own value wins,
/// otherwise `default_disposition` applies. Encodings default to identity
/// in, base64 out. The leaf owns copies of everything it needs; no state
/// is shared with the attachment afterwards.
pub(crate) fn build_leaf(
    attachment: &Attachment,
    default_disposition: Disposition,
    sniff: bool,
) -> Leaf {
    let content_id = attachment.content_id.as_ref().map(|cid| {
        if cid.starts_with('<') {
            cid.clone()
        } else {
            format!("<{cid}>")
        }
    });

    Leaf {
        content_type: resolve_content_type(attachment, sniff),
        content_id,
        disposition: Some(attachment.disposition.unwrap_or(default_disposition)),
        filename: attachment.file_name.clone(),
        input_encoding: attachment.input_encoding.unwrap_or_default(),
        output_encoding: attachment
            .output_encoding
            .unwrap_or(TransferEncoding::Base64),
        content: attachment.content.clone(),
    }
}

/// Content type resolution: a well-formed `type/subtype` string wins; with
/// sniffing enabled a missing type is looked up from the file extension;
/// everything else is `application/octet-stream`.
fn resolve_content_type(attachment: &Attachment, sniff: bool) -> ContentType {
    if let Some(media_type) = attachment.mime_type.as_deref()
        && !media_type.is_empty()
    {
        let halves: Vec<&str> = media_type.split('/').collect();
        if halves.len() == 2 && !halves[0].is_empty() && !halves[1].is_empty() {
            return ContentType::new(halves[0], halves[1]);
        }
        return ContentType::application_octet_stream();
    }

    if sniff
        && let Some(content_type) = attachment
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .and_then(media_type_for_extension)
    {
        return content_type;
    }

    ContentType::application_octet_stream()
}
