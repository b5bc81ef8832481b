//! Assembling leaves into the canonical nested multipart structure.
//!
//! The full shape is `mixed(related(alternative(text, html), embeds...),
//! attaches...)`; wrapper levels are dropped when their content is absent.

use crate::content_type::ContentType;
use crate::encoding::TransferEncoding;
use crate::error::{Error, Result};
use crate::message::ComposeOptions;
use crate::node::{Leaf, MimeNode, Multipart, MultipartSubtype};
use crate::part::{Attachment, Disposition, build_leaf};

/// Builds the body tree for one export.
///
/// # Errors
///
/// Returns [`Error::NoContent`] when both bodies are empty. Embeds and
/// attachments alone never satisfy the content requirement.
pub(crate) fn assemble(
    text: &[u8],
    html: &[u8],
    embeds: &[Attachment],
    attaches: &[Attachment],
    options: &ComposeOptions,
) -> Result<MimeNode> {
    let mut root = text_html_part(text, html)?;

    if !embeds.is_empty() {
        let mut related = Multipart::new(MultipartSubtype::Related);
        related.add(root);
        for embed in embeds {
            related.add(MimeNode::Leaf(build_leaf(
                embed,
                Disposition::Inline,
                options.sniff_mime_type,
            )));
        }
        root = MimeNode::Multipart(related);
    }

    if !attaches.is_empty() {
        let mut mixed = Multipart::new(MultipartSubtype::Mixed);
        mixed.add(root);
        for attach in attaches {
            mixed.add(MimeNode::Leaf(build_leaf(
                attach,
                Disposition::Attachment,
                options.sniff_mime_type,
            )));
        }
        root = MimeNode::Multipart(mixed);
    }

    tracing::trace!(
        embeds = embeds.len(),
        attaches = attaches.len(),
        "assembled body tree"
    );
    Ok(root)
}

/// Text and html compose into `multipart/alternative`, plain part first so
/// clients that stop at the first acceptable part render the text version.
fn text_html_part(text: &[u8], html: &[u8]) -> Result<MimeNode> {
    match (text.is_empty(), html.is_empty()) {
        (false, false) => {
            let mut alternative = Multipart::new(MultipartSubtype::Alternative);
            alternative.add(MimeNode::Leaf(text_leaf(text, ContentType::text_plain())));
            alternative.add(MimeNode::Leaf(text_leaf(html, ContentType::text_html())));
            Ok(MimeNode::Multipart(alternative))
        }
        (false, true) => Ok(MimeNode::Leaf(text_leaf(text, ContentType::text_plain()))),
        (true, false) => Ok(MimeNode::Leaf(text_leaf(html, ContentType::text_html()))),
        (true, true) => Err(Error::NoContent),
    }
}

/// UTF-8 body leaf, quoted-printable on the wire.
fn text_leaf(content: &[u8], content_type: ContentType) -> Leaf {
    Leaf {
        content_type,
        content_id: None,
        disposition: None,
        filename: None,
        input_encoding: TransferEncoding::default(),
        output_encoding: TransferEncoding::QuotedPrintable,
        content: content.to_vec(),
    }
}
