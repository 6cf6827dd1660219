//! Core IMAP identifiers.
//!
//! Newtypes for command tags, message sequence numbers, UIDs, and
//! UIDVALIDITY. The numeric identifiers wrap `NonZeroU32` so that a zero
//! value is unrepresentable by construction.

use std::num::NonZeroU32;

/// IMAP command tag.
///
/// The server echoes the tag of the command a tagged response completes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(pub String);

impl Tag {
    /// Creates a new tag from a string.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! nz_identifier {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub NonZeroU32);

        impl $name {
            /// Creates a new value; `None` if the input is 0.
            #[must_use]
            pub fn new(n: u32) -> Option<Self> {
                NonZeroU32::new(n).map(Self)
            }

            /// Returns the underlying value.
            #[must_use]
            pub fn get(self) -> u32 {
                self.0.get()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for u32 {
            fn from(v: $name) -> Self {
                v.get()
            }
        }
    };
}

nz_identifier! {
    /// Message sequence number.
    ///
    /// Assigned from 1 within a mailbox; ephemeral, renumbered on expunge.
    SeqNum
}

nz_identifier! {
    /// Unique identifier for a message.
    ///
    /// Persistent within a mailbox for a given [`UidValidity`].
    Uid
}

nz_identifier! {
    /// UIDVALIDITY value for a mailbox.
    ///
    /// When this changes, all cached UIDs for the mailbox are invalid.
    UidValidity
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        let tag = Tag::new("A001");
        assert_eq!(tag.as_str(), "A001");
        assert_eq!(format!("{tag}"), "A001");
    }

    #[test]
    fn zero_is_unrepresentable() {
        assert!(SeqNum::new(0).is_none());
        assert!(Uid::new(0).is_none());
        assert!(UidValidity::new(0).is_none());
    }

    #[test]
    fn max_values_are_fine() {
        assert_eq!(SeqNum::new(u32::MAX).unwrap().get(), u32::MAX);
        assert_eq!(Uid::new(u32::MAX).unwrap().get(), u32::MAX);
    }

    #[test]
    fn ordering() {
        assert!(SeqNum::new(1).unwrap() < SeqNum::new(2).unwrap());
        assert!(Uid::new(100).unwrap() < Uid::new(200).unwrap());
    }

    #[test]
    fn display() {
        assert_eq!(SeqNum::new(42).unwrap().to_string(), "42");
        assert_eq!(Uid::new(12345).unwrap().to_string(), "12345");
    }
}
