//! MIME content type handling.

use std::fmt;

/// MIME content type with ordered parameters.
///
/// Parameters keep insertion order so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Main type (e.g., "text", "image", "multipart").
    pub main_type: String,
    /// Subtype (e.g., "plain", "html", "png").
    pub sub_type: String,
    /// Parameters in insertion order (e.g., charset=utf-8, boundary=xxx).
    pub parameters: Vec<(String, String)>,
}

impl ContentType {
    /// Creates a new content type.
    #[must_use]
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
            parameters: Vec::new(),
        }
    }

    /// Creates a `text/plain; charset=utf-8` content type.
    #[must_use]
    pub fn text_plain() -> Self {
        Self::new("text", "plain").with_parameter("charset", "utf-8")
    }

    /// Creates a `text/html; charset=utf-8` content type.
    #[must_use]
    pub fn text_html() -> Self {
        Self::new("text", "html").with_parameter("charset", "utf-8")
    }

    /// Creates the `application/octet-stream` fallback content type.
    #[must_use]
    pub fn application_octet_stream() -> Self {
        Self::new("application", "octet-stream")
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }

    /// Returns the charset parameter if present.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(key, _)| key == "charset")
            .map(|(_, value)| value.as_str())
    }

    /// Checks if this is a text content type.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.main_type.eq_ignore_ascii_case("text")
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = &self.main_type;
        let sub = &self.sub_type;
        write!(f, "{main}/{sub}")?;

        for (key, value) in &self.parameters {
            // Quote value if it contains special characters
            if value.contains(|c: char| c.is_whitespace() || "()<>@,;:\\\"/[]?=".contains(c)) {
                write!(f, "; {key}=\"{value}\"")?;
            } else {
                write!(f, "; {key}={value}")?;
            }
        }

        Ok(())
    }
}

/// Looks up the media type for a file extension.
///
/// Used by the part builder when an attachment carries no explicit MIME
/// type; unknown extensions fall back to `application/octet-stream` at the
/// call site.
#[must_use]
pub fn media_type_for_extension(ext: &str) -> Option<ContentType> {
    let (main_type, sub_type) = match ext.to_ascii_lowercase().as_str() {
        "png" => ("image", "png"),
        "jpg" | "jpeg" => ("image", "jpeg"),
        "gif" => ("image", "gif"),
        "webp" => ("image", "webp"),
        "svg" => ("image", "svg+xml"),
        "ico" => ("image", "vnd.microsoft.icon"),
        "txt" => ("text", "plain"),
        "html" | "htm" => ("text", "html"),
        "css" => ("text", "css"),
        "csv" => ("text", "csv"),
        "ics" => ("text", "calendar"),
        "json" => ("application", "json"),
        "xml" => ("application", "xml"),
        "pdf" => ("application", "pdf"),
        "zip" => ("application", "zip"),
        "gz" => ("application", "gzip"),
        "eml" => ("message", "rfc822"),
        _ => return None,
    };

    Some(ContentType::new(main_type, sub_type))
}
