//! Core IMAP types.
//!
//! Identifiers, flags, capabilities, mailbox data, response codes, and the
//! sequence-set algebra, following RFC 9051 (`IMAP4rev2`) with RFC 3501
//! (`IMAP4rev1`) compatibility.

mod capability;
mod flags;
mod identifiers;
mod mailbox;
mod response_code;
mod sequence;

pub use capability::Capability;
pub use flags::{Flag, Flags};
pub use identifiers::{SeqNum, Tag, Uid, UidValidity};
pub use mailbox::{ListEntry, Mailbox, MailboxAttribute};
pub use response_code::{ResponseCode, UidPlusData};
pub use sequence::{
    parse_uid_set, uid_set_numbers, SeqElement, SeqEntry, SequenceSet, UidSetMember,
};
