//! The user-facing message facade.

use crate::address::Address;
use crate::error::Result;
use crate::header::{EncodedHeader, Header, inject};
use crate::node::MessageNode;
use crate::part::{Attachment, Disposition};
use crate::tree::assemble;
use crate::write::write_message;

/// Export behavior knobs.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Look up a missing MIME type from the attachment's file extension
    /// before falling back to `application/octet-stream`.
    pub sniff_mime_type: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            sniff_mime_type: true,
        }
    }
}

/// Accumulates bodies, attachments, headers and addresses, and exports the
/// composed MIME message on demand.
///
/// At least one of the text and html bodies must be non-empty at export
/// time. Each export derives a fresh tree from the current state using
/// only locally scoped resources, so a message can be exported repeatedly
/// and is never mutated by an export.
#[derive(Debug, Clone, Default)]
pub struct Message {
    text: Vec<u8>,
    html: Vec<u8>,
    embeds: Vec<Attachment>,
    attaches: Vec<Attachment>,
    headers: Vec<Header>,
    addresses: Vec<Address>,
    options: ComposeOptions,
}

impl Message {
    /// Creates an empty message with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty message with explicit export options.
    #[must_use]
    pub fn with_options(options: ComposeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replaces the plain-text body.
    pub fn set_text(&mut self, body: impl Into<Vec<u8>>) {
        self.text = body.into();
    }

    /// Replaces the HTML body.
    pub fn set_html(&mut self, body: impl Into<Vec<u8>>) {
        self.html = body.into();
    }

    /// Adds an inline resource, carried in a `multipart/related` wrapper.
    ///
    /// Defaults the attachment's disposition to inline when unset.
    pub fn embed(&mut self, mut attachment: Attachment) {
        attachment.disposition.get_or_insert(Disposition::Inline);
        self.embeds.push(attachment);
    }

    /// Adds a file attachment, carried in a `multipart/mixed` wrapper.
    ///
    /// Defaults the attachment's disposition to attachment when unset.
    pub fn attach(&mut self, mut attachment: Attachment) {
        attachment.disposition.get_or_insert(Disposition::Attachment);
        self.attaches.push(attachment);
    }

    /// Adds a header after those already present.
    ///
    /// Injection prepends onto the message node, so headers appear in the
    /// serialized output in reverse append order; see
    /// [`Message::encoded_headers`].
    pub fn append_header(&mut self, header: Header) {
        self.headers.push(header);
    }

    /// Adds a header before those already present, which places it after
    /// them in the serialized output.
    pub fn prepend_header(&mut self, header: Header) {
        self.headers.insert(0, header);
    }

    /// Adds an address entry. To and Cc entries accumulate; From and
    /// Reply-To replace any earlier entry of the same kind.
    pub fn add_address(&mut self, address: Address) {
        self.addresses.push(address);
    }

    /// Returns the fully encoded header block without serializing a body.
    ///
    /// Custom headers come first, in reverse append order, followed by the
    /// To, Cc, From and Reply-To headers derived from address entries.
    /// `MIME-Version` is added at serialization time and is not listed
    /// here.
    #[must_use]
    pub fn encoded_headers(&self) -> Vec<EncodedHeader> {
        let mut node = MessageNode::new();
        inject(&mut node, &self.headers, &self.addresses);
        node.encoded_headers()
    }

    /// Serializes the message into `out`, returning the bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoContent`](crate::Error::NoContent) when neither
    /// a text nor an html body is set, and propagates stream write
    /// failures.
    pub fn write_to<W: std::io::Write>(&self, out: &mut W) -> Result<u64> {
        let body = assemble(
            &self.text,
            &self.html,
            &self.embeds,
            &self.attaches,
            &self.options,
        )?;

        let mut node = MessageNode::new();
        inject(&mut node, &self.headers, &self.addresses);
        node.set_body(body);
        write_message(&node, out)
    }

    /// Serializes the message to an owned byte buffer.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Message::write_to`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }
}
