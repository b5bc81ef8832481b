//! The MIME object model: leaves, multipart containers, and the root
//! message node that headers and the body tree attach to.
//!
//! Every node is a plain owned value. An export builds its own tree,
//! serializes it, and drops it; nothing is shared between exports.

use crate::address::AddressKind;
use crate::content_type::ContentType;
use crate::encoding::{TransferEncoding, encode_header_text};
use crate::header::{EncodedHeader, HeaderBlock};
use crate::part::Disposition;
use rand::Rng;
use std::fmt;

/// A content-bearing MIME node.
#[derive(Debug, Clone)]
pub struct Leaf {
    /// Content type of the part.
    pub content_type: ContentType,
    /// Content-Id value, angle brackets included.
    pub content_id: Option<String>,
    /// Presentation disposition; always set for embeds and attachments.
    pub disposition: Option<Disposition>,
    /// Filename carried on the Content-Disposition header.
    pub filename: Option<String>,
    /// Encoding the content bytes are already in.
    pub input_encoding: TransferEncoding,
    /// Encoding the part is serialized with.
    pub output_encoding: TransferEncoding,
    /// Raw content bytes.
    pub content: Vec<u8>,
}

/// Multipart subtypes used by the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipartSubtype {
    /// Interchangeable renderings of the same content, least faithful first.
    Alternative,
    /// A root document plus the inline resources it references.
    Related,
    /// Independent parts, used for file attachments.
    Mixed,
}

impl fmt::Display for MultipartSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alternative => write!(f, "alternative"),
            Self::Related => write!(f, "related"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

/// A multipart container with ordered children and a unique boundary.
#[derive(Debug, Clone)]
pub struct Multipart {
    /// Multipart subtype.
    pub subtype: MultipartSubtype,
    /// Boundary delimiter, freshly generated per container.
    pub boundary: String,
    /// Ordered children.
    pub children: Vec<MimeNode>,
}

impl Multipart {
    /// Creates an empty container with a random boundary.
    #[must_use]
    pub fn new(subtype: MultipartSubtype) -> Self {
        Self {
            subtype,
            boundary: make_boundary(),
            children: Vec::new(),
        }
    }

    /// Appends a child part.
    pub fn add(&mut self, child: MimeNode) {
        self.children.push(child);
    }
}

/// Create a random MIME boundary.
fn make_boundary() -> String {
    rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}

/// Either a leaf or a multipart container.
#[derive(Debug, Clone)]
pub enum MimeNode {
    /// Content-bearing part.
    Leaf(Leaf),
    /// Container of ordered child parts.
    Multipart(Multipart),
}

/// A named recipient entry on the message node.
#[derive(Debug, Clone)]
pub(crate) struct Mailbox {
    pub(crate) name: String,
    pub(crate) address: String,
}

impl Mailbox {
    /// Wire form: display name RFC-2047-encoded when needed, bare address
    /// when the name is empty.
    fn encoded(&self) -> String {
        if self.name.is_empty() {
            self.address.clone()
        } else {
            format!("{} <{}>", encode_header_text(&self.name), self.address)
        }
    }
}

/// The root message object the injector and serializer operate on.
#[derive(Debug, Clone, Default)]
pub(crate) struct MessageNode {
    pub(crate) headers: HeaderBlock,
    pub(crate) to: Vec<Mailbox>,
    pub(crate) cc: Vec<Mailbox>,
    pub(crate) sender: Option<String>,
    pub(crate) reply_to: Option<String>,
    pub(crate) body: Option<MimeNode>,
}

impl MessageNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_body(&mut self, body: MimeNode) {
        self.body = Some(body);
    }

    /// Adds a recipient to the matching accumulating list.
    pub(crate) fn add_recipient(&mut self, kind: AddressKind, name: &str, address: &str) {
        let mailbox = Mailbox {
            name: name.to_string(),
            address: address.to_string(),
        };
        match kind {
            AddressKind::To => self.to.push(mailbox),
            AddressKind::Cc => self.cc.push(mailbox),
            // From and Reply-To go through the replacing setters
            AddressKind::From | AddressKind::ReplyTo => {}
        }
    }

    /// Sets the sender, replacing any previous value.
    pub(crate) fn set_sender(&mut self, formatted: String) {
        self.sender = Some(formatted);
    }

    /// Sets the reply-to address, replacing any previous value.
    pub(crate) fn set_reply_to(&mut self, formatted: String) {
        self.reply_to = Some(formatted);
    }

    /// The fully encoded header block in wire order: injected headers
    /// first, then the To, Cc, From and Reply-To headers derived from
    /// address entries.
    pub(crate) fn encoded_headers(&self) -> Vec<EncodedHeader> {
        let mut headers = self.headers.encoded_entries();

        if !self.to.is_empty() {
            headers.push(EncodedHeader {
                name: "To".to_string(),
                value: join_mailboxes(&self.to),
            });
        }
        if !self.cc.is_empty() {
            headers.push(EncodedHeader {
                name: "Cc".to_string(),
                value: join_mailboxes(&self.cc),
            });
        }
        if let Some(sender) = &self.sender {
            headers.push(EncodedHeader {
                name: "From".to_string(),
                value: encode_header_text(sender),
            });
        }
        if let Some(reply_to) = &self.reply_to {
            headers.push(EncodedHeader {
                name: "Reply-To".to_string(),
                value: encode_header_text(reply_to),
            });
        }

        headers
    }
}

fn join_mailboxes(mailboxes: &[Mailbox]) -> String {
    mailboxes
        .iter()
        .map(Mailbox::encoded)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_multipart_preserves_child_order() {
        let mut multipart = Multipart::new(MultipartSubtype::Mixed);
        multipart.add(MimeNode::Leaf(leaf(b"first")));
        multipart.add(MimeNode::Leaf(leaf(b"second")));

        let contents: Vec<&[u8]> = multipart
            .children
            .iter()
            .map(|child| match child {
                MimeNode::Leaf(l) => l.content.as_slice(),
                MimeNode::Multipart(_) => panic!("expected leaf"),
            })
            .collect();
        assert_eq!(contents, vec![b"first".as_slice(), b"second".as_slice()]);
    }

    #[test]
    fn test_boundaries_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(make_boundary()));
        }
    }

    #[test]
    fn test_recipients_accumulate() {
        let mut node = MessageNode::new();
        node.add_recipient(AddressKind::To, "Alice", "alice@example.com");
        node.add_recipient(AddressKind::To, "", "bob@example.com");
        node.add_recipient(AddressKind::Cc, "Carol", "carol@example.com");

        let headers = node.encoded_headers();
        assert_eq!(headers[0].name, "To");
        assert_eq!(
            headers[0].value,
            "Alice <alice@example.com>, bob@example.com"
        );
        assert_eq!(headers[1].name, "Cc");
        assert_eq!(headers[1].value, "Carol <carol@example.com>");
    }

    #[test]
    fn test_recipient_name_is_encoded() {
        let mut node = MessageNode::new();
        node.add_recipient(AddressKind::To, "Кто то", "someone@example.com");

        let headers = node.encoded_headers();
        assert!(headers[0].value.contains("=?utf-8?B?"));
        assert!(headers[0].value.ends_with("<someone@example.com>"));
    }

    fn leaf(content: &[u8]) -> Leaf {
        Leaf {
            content_type: ContentType::application_octet_stream(),
            content_id: None,
            disposition: None,
            filename: None,
            input_encoding: TransferEncoding::default(),
            output_encoding: TransferEncoding::Base64,
            content: content.to_vec(),
        }
    }
}
