//! Ordered header storage, encoding, and injection onto the message node.
//!
//! Injection always prepends onto the node's header list, so the final
//! block reads in reverse caller-append order. A per-name style registry
//! lets raw headers bypass RFC 2047 encoding entirely.

use crate::address::{Address, AddressKind};
use crate::encoding::encode_header_text;
use crate::node::MessageNode;
use std::collections::HashMap;

/// A caller-supplied header prior to encoding.
#[derive(Debug, Clone)]
pub struct Header {
    /// Header name as it should appear on the wire.
    pub name: String,
    /// Header value, unencoded.
    pub value: String,
    /// When true the value is serialized byte for byte, bypassing RFC 2047.
    pub raw: bool,
}

impl Header {
    /// Creates a header whose value is RFC-2047-encoded when serialized.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            raw: false,
        }
    }

    /// Creates a header serialized verbatim as `Name: Value`.
    #[must_use]
    pub fn raw(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            raw: true,
        }
    }
}

/// A fully encoded header as it will appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHeader {
    /// Header name.
    pub name: String,
    /// Encoded value.
    pub value: String,
}

/// Serialization strategy for one header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum HeaderStyle {
    /// Value passes through RFC 2047 text encoding.
    #[default]
    Encoded,
    /// Value is emitted byte for byte as given.
    Raw,
}

/// Ordered header block with a per-name style registry.
///
/// Entries are stored in wire order, first to last. The registry is
/// consulted when the block is formatted, overriding the default encoding
/// for every header of a registered name.
#[derive(Debug, Clone, Default)]
pub(crate) struct HeaderBlock {
    entries: Vec<(String, String)>,
    styles: HashMap<String, HeaderStyle>,
}

impl HeaderBlock {
    /// Inserts a header at the front of the block.
    pub(crate) fn prepend(&mut self, name: &str, value: &str) {
        self.entries.insert(0, (name.to_string(), value.to_string()));
    }

    /// Registers the serialization style for a header name.
    pub(crate) fn register_style(&mut self, name: &str, style: HeaderStyle) {
        self.styles.insert(name.to_ascii_lowercase(), style);
    }

    fn style_for(&self, name: &str) -> HeaderStyle {
        self.styles
            .get(&name.to_ascii_lowercase())
            .copied()
            .unwrap_or_default()
    }

    /// Formats every entry in storage order.
    pub(crate) fn encoded_entries(&self) -> Vec<EncodedHeader> {
        self.entries
            .iter()
            .map(|(name, value)| {
                let value = match self.style_for(name) {
                    HeaderStyle::Raw => value.clone(),
                    HeaderStyle::Encoded => encode_header_text(value),
                };
                EncodedHeader {
                    name: name.clone(),
                    value,
                }
            })
            .collect()
    }
}

/// Applies caller-ordered headers and typed addresses onto a message node.
///
/// Each header is prepended, so the last-processed header ends up first:
/// the final block order is the reverse of caller append order. To and Cc
/// entries accumulate; From and Reply-To replace on repeat. Injection
/// cannot fail under valid UTF-8 input.
pub(crate) fn inject(node: &mut MessageNode, headers: &[Header], addresses: &[Address]) {
    for header in headers {
        if header.raw {
            node.headers.register_style(&header.name, HeaderStyle::Raw);
        }
        node.headers.prepend(&header.name, &header.value);
    }

    for address in addresses {
        match address.kind {
            AddressKind::To | AddressKind::Cc => {
                node.add_recipient(address.kind, &address.name, &address.address);
            }
            AddressKind::From => node.set_sender(address.angle_formatted()),
            AddressKind::ReplyTo => node.set_reply_to(address.angle_formatted()),
        }
    }
}
