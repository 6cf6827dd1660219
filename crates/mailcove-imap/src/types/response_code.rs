//! Bracketed response codes.

use super::{Capability, Flag, SeqNum, SequenceSet, Uid, UidSetMember, UidValidity};

/// A `resp-text-code`: the bracketed code inside response text, e.g.
/// `[UIDVALIDITY 12345]`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseCode {
    /// ALERT: the text must be shown to the user.
    Alert,
    /// PARSE: the server could not parse a message header.
    Parse,
    /// READ-ONLY: mailbox selected read-only.
    ReadOnly,
    /// READ-WRITE: mailbox selected read-write.
    ReadWrite,
    /// TRYCREATE: the target mailbox does not exist but may be created.
    TryCreate,
    /// NOMODSEQ: the mailbox does not support mod-sequences (RFC 7162).
    NoModSeq,
    /// CLOSED: the previously selected mailbox was closed (RFC 7162).
    Closed,
    /// UIDNOTSTICKY: the mailbox does not support persistent UIDs
    /// (RFC 4315).
    UidNotSticky,
    /// BADCHARSET with the charsets the server does support.
    BadCharset(Vec<String>),
    /// CAPABILITY listing inside a response code.
    Capability(Vec<Capability>),
    /// PERMANENTFLAGS, possibly including `\*`.
    PermanentFlags(Vec<Flag>),
    /// UIDNEXT n.
    UidNext(Uid),
    /// UIDVALIDITY n.
    UidValidity(UidValidity),
    /// UNSEEN n: sequence number of the first unseen message (rev1).
    Unseen(SeqNum),
    /// HIGHESTMODSEQ n (RFC 7162).
    HighestModSeq(u64),
    /// MODIFIED sequence-set: messages that failed a conditional STORE
    /// (RFC 7162).
    Modified(SequenceSet),
    /// APPENDUID: UIDVALIDITY and the UIDs assigned to appended messages
    /// (RFC 4315).
    AppendUid(UidPlusData),
    /// COPYUID: UIDVALIDITY plus source and destination UIDs (RFC 4315).
    CopyUid(UidPlusData),
    /// A code this library does not know, with any argument text.
    Other {
        /// The code's atom, as sent.
        name: String,
        /// Raw argument text up to the closing bracket, if any.
        data: Option<String>,
    },
}

/// Data carried by the UIDPLUS APPENDUID/COPYUID codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UidPlusData {
    /// UIDVALIDITY of the destination mailbox.
    pub validity: UidValidity,
    /// Source UIDs; `None` for APPENDUID, which has no source.
    pub source_uids: Option<Vec<UidSetMember>>,
    /// UIDs assigned in the destination mailbox.
    pub assigned_uids: Vec<UidSetMember>,
}
