//! Serializing message and body nodes to a byte stream.
//!
//! Line endings are `\n` throughout, matching the header writer format
//! `Name: Value\n` used by the injection layer.

use crate::error::Result;
use crate::node::{Leaf, MessageNode, MimeNode, Multipart};
use std::io::Write;

/// `Write` adapter that tracks how many bytes went out.
struct CountingWriter<'a, W: Write> {
    inner: &'a mut W,
    written: u64,
}

impl<W: Write> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Serializes the full message: encoded header block, `MIME-Version`, then
/// the body tree. Returns the number of bytes written.
pub(crate) fn write_message<W: Write>(node: &MessageNode, out: &mut W) -> Result<u64> {
    let mut out = CountingWriter { inner: out, written: 0 };

    for header in node.encoded_headers() {
        writeln!(out, "{}: {}", header.name, header.value)?;
    }
    out.write_all(b"MIME-Version: 1.0\n")?;

    match &node.body {
        Some(body) => write_node(body, &mut out)?,
        None => writeln!(out)?,
    }

    let written = out.written;
    tracing::debug!(bytes = written, "serialized message");
    Ok(written)
}

fn write_node<W: Write>(node: &MimeNode, out: &mut W) -> Result<()> {
    match node {
        MimeNode::Leaf(leaf) => write_leaf(leaf, out),
        MimeNode::Multipart(multipart) => write_multipart(multipart, out),
    }
}

/// Part headers, blank line, then the content converted from its input
/// encoding to the declared output encoding.
fn write_leaf<W: Write>(leaf: &Leaf, out: &mut W) -> Result<()> {
    writeln!(out, "Content-Type: {}", leaf.content_type)?;
    if let Some(content_id) = &leaf.content_id {
        writeln!(out, "Content-Id: {content_id}")?;
    }
    if let Some(disposition) = leaf.disposition {
        match &leaf.filename {
            Some(filename) => {
                writeln!(out, "Content-Disposition: {disposition}; filename=\"{filename}\"")?;
            }
            None => writeln!(out, "Content-Disposition: {disposition}")?,
        }
    }
    writeln!(out, "Content-Transfer-Encoding: {}", leaf.output_encoding)?;
    writeln!(out)?;

    let raw = leaf.input_encoding.decode(&leaf.content)?;
    out.write_all(&leaf.output_encoding.encode(&raw))?;
    writeln!(out)?;
    Ok(())
}

fn write_multipart<W: Write>(multipart: &Multipart, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Content-Type: multipart/{}; boundary=\"{}\"",
        multipart.subtype, multipart.boundary
    )?;
    writeln!(out)?;

    for child in &multipart.children {
        writeln!(out, "--{}", multipart.boundary)?;
        write_node(child, out)?;
    }
    writeln!(out, "--{}--", multipart.boundary)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::content_type::ContentType;
    use crate::encoding::TransferEncoding;
    use crate::node::{Multipart, MultipartSubtype};
    use crate::part::Disposition;

    fn sample_leaf() -> Leaf {
        Leaf {
            content_type: ContentType::new("image", "png"),
            content_id: Some("<cid-1>".to_string()),
            disposition: Some(Disposition::Attachment),
            filename: Some("photo.png".to_string()),
            input_encoding: TransferEncoding::default(),
            output_encoding: TransferEncoding::Base64,
            content: b"fake image bytes".to_vec(),
        }
    }

    #[test]
    fn test_write_leaf_layout() {
        let mut out = Vec::new();
        write_leaf(&sample_leaf(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let expected = concat!(
            "Content-Type: image/png\n",
            "Content-Id: <cid-1>\n",
            "Content-Disposition: attachment; filename=\"photo.png\"\n",
            "Content-Transfer-Encoding: base64\n",
            "\n",
            "ZmFrZSBpbWFnZSBieXRlcw==\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_write_multipart_delimits_children() {
        let mut multipart = Multipart::new(MultipartSubtype::Mixed);
        multipart.add(MimeNode::Leaf(sample_leaf()));
        multipart.add(MimeNode::Leaf(sample_leaf()));

        let mut out = Vec::new();
        write_multipart(&multipart, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let boundary = &multipart.boundary;
        assert!(text.starts_with(&format!(
            "Content-Type: multipart/mixed; boundary=\"{boundary}\"\n\n"
        )));
        assert_eq!(text.matches(&format!("--{boundary}\n")).count(), 2);
        assert!(text.ends_with(&format!("--{boundary}--\n")));
    }

    #[test]
    fn test_input_encoding_is_converted() {
        let mut leaf = sample_leaf();
        leaf.content = b"ZmFrZSBpbWFnZSBieXRlcw==".to_vec();
        leaf.input_encoding = TransferEncoding::Base64;
        leaf.output_encoding = TransferEncoding::SevenBit;

        let mut out = Vec::new();
        write_leaf(&leaf, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("\n\nfake image bytes\n"));
    }

    #[test]
    fn test_write_failure_propagates() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("stream refused"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut node = MessageNode::new();
        node.set_body(MimeNode::Leaf(sample_leaf()));

        let result = write_message(&node, &mut FailingWriter);
        assert!(matches!(result, Err(crate::error::Error::Write(_))));
    }

    #[test]
    fn test_write_message_counts_bytes() {
        let mut node = MessageNode::new();
        node.set_body(MimeNode::Leaf(sample_leaf()));

        let mut out = Vec::new();
        let written = write_message(&node, &mut out).unwrap();
        assert_eq!(written, out.len() as u64);
        assert!(
            String::from_utf8(out)
                .unwrap()
                .starts_with("MIME-Version: 1.0\n")
        );
    }
}
