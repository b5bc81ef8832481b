//! # mimeforge
//!
//! MIME message assembly and generation library for email.
//!
//! ## Features
//!
//! - **Message assembly**: text and HTML bodies, inline resources and file
//!   attachments nested into the canonical multipart structure
//!   (`mixed(related(alternative(text, html), embeds...), attaches...)`)
//! - **Header encoding**: RFC 2047 encoded headers, raw pass-through
//!   headers, and typed To/Cc/From/Reply-To addresses
//! - **Encoding**: Base64, Quoted-Printable, RFC 2047 header encoding
//! - **Serialization**: deterministic byte output with unique multipart
//!   boundaries
//!
//! ## Quick Start
//!
//! ```ignore
//! use mimeforge::{Address, AddressKind, Header, Message};
//!
//! let mut message = Message::new();
//! message.set_text("Plain text version");
//! message.set_html("<h1>HTML version</h1>");
//! message.append_header(Header::new("Subject", "Hello"));
//! message.add_address(Address::new(AddressKind::To, "John Doe", "john@example.com"));
//!
//! let bytes = message.to_bytes()?;
//! ```
//!
//! ## Attachments and inline resources
//!
//! ```ignore
//! use mimeforge::{Attachment, Message};
//!
//! let mut message = Message::new();
//! message.set_html("<img src=\"cid:logo\">");
//! message.embed(Attachment::new(logo_bytes).with_content_id("logo"));
//! message.attach(Attachment::new(report_bytes).with_file_name("report.pdf"));
//!
//! let bytes = message.to_bytes()?;
//! ```
//!
//! ## Header preview
//!
//! ```ignore
//! use mimeforge::{Header, Message};
//!
//! let mut message = Message::new();
//! message.append_header(Header::new("X-A", "1"));
//! message.append_header(Header::new("X-B", "2"));
//!
//! // Headers appear in reverse append order: X-B, then X-A.
//! for header in message.encoded_headers() {
//!     println!("{}: {}", header.name, header.value);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod content_type;
mod error;
mod header;
mod message;
mod node;
mod part;
mod tree;
mod write;

pub mod encoding;

pub use address::{Address, AddressKind};
pub use content_type::{ContentType, media_type_for_extension};
pub use encoding::TransferEncoding;
pub use error::{Error, Result};
pub use header::{EncodedHeader, Header};
pub use message::{ComposeOptions, Message};
pub use node::{Leaf, MimeNode, Multipart, MultipartSubtype};
pub use part::{Attachment, Disposition};
