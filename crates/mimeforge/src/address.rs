//! Typed address entries (To, Cc, From, Reply-To).

/// The header an address entry maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Recipient list entry; repeatable, multiple entries accumulate.
    To,
    /// Carbon-copy list entry; repeatable, multiple entries accumulate.
    Cc,
    /// Message sender; single-valued, a later entry replaces the earlier.
    From,
    /// Reply-To address; single-valued, a later entry replaces the earlier.
    ReplyTo,
}

/// A display name plus address, tagged with the header it belongs to.
#[derive(Debug, Clone)]
pub struct Address {
    /// Target header.
    pub kind: AddressKind,
    /// Display name; may be empty.
    pub name: String,
    /// Bare email address.
    pub address: String,
}

impl Address {
    /// Creates an address entry.
    #[must_use]
    pub fn new(kind: AddressKind, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            address: address.into(),
        }
    }

    /// `Name <address>` form used for the From and Reply-To headers.
    ///
    /// An empty name still yields the leading space; existing consumers
    /// depend on the exact byte sequence.
    pub(crate) fn angle_formatted(&self) -> String {
        format!("{} <{}>", self.name, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_formatted() {
        let address = Address::new(AddressKind::From, "John Doe", "john@example.com");
        assert_eq!(address.angle_formatted(), "John Doe <john@example.com>");
    }

    #[test]
    fn test_angle_formatted_empty_name_keeps_leading_space() {
        let address = Address::new(AddressKind::ReplyTo, "", "john@example.com");
        assert_eq!(address.angle_formatted(), " <john@example.com>");
    }
}
