//! # mailcove-imap
//!
//! The protocol core of an IMAP client: a sans-I/O parser for server
//! responses (RFC 9051 `IMAP4rev2`, with RFC 3501 `IMAP4rev1`
//! compatibility) and the `sequence-set` algebra used throughout IMAP
//! commands and results.
//!
//! ## What this crate is
//!
//! - **Response parsing**: [`ResponseParser::parse`] takes the bytes of
//!   one complete server response (a line plus any embedded literals) and
//!   returns a typed [`Response`]: a continuation request, a tagged
//!   completion, or one of the untagged data responses (FETCH, LIST,
//!   STATUS, SEARCH, ESEARCH, NAMESPACE, QUOTA, ACL, ID, and friends).
//! - **Sequence sets**: [`SequenceSet`] stores message numbers and UIDs as
//!   sorted disjoint intervals over `1..=*` with union, difference,
//!   intersection, complement, coverage, and mailbox-size truncation.
//!
//! Known server deviations from the grammar (trailing spaces, `BODY[]`,
//! `message/rfc822` attachments without an embedded message, zero-part
//! multiparts) are tolerated with a `tracing` warning rather than an
//! error.
//!
//! ## What this crate is not
//!
//! There is no socket handling, TLS, command serialization, or
//! authentication here. The transport layer reads lines, watches for
//! `{n}` literal prefixes to find response boundaries, and feeds each
//! assembled response to the parser.
//!
//! ```
//! use mailcove_imap::{Response, ResponseParser, SequenceSet, UntaggedResponse};
//!
//! # fn main() -> mailcove_imap::Result<()> {
//! let response = ResponseParser::parse(b"* 23 EXISTS\r\n")?;
//! assert_eq!(response, Response::Untagged(UntaggedResponse::Exists(23)));
//!
//! let mut wanted: SequenceSet = "1:10,20:*".parse()?;
//! wanted.subtract("5:8")?;
//! assert_eq!(wanted.to_string(), "1:4,9:10,20:*");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc)]

mod error;
pub mod grammar;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use parser::{
    AclEntry, Address, BodyExtension, BodyFields, BodyStructure, ContentDisposition, Envelope,
    EsearchResponse, EsearchReturn, FetchItem, MultiPartExtension, Namespace, Namespaces, Quota,
    QuotaResource, Response, ResponseParser, ResponseText, SinglePartExtension, Status,
    StatusItem, UntaggedResponse,
};
pub use types::{
    Capability, Flag, Flags, ListEntry, Mailbox, MailboxAttribute, ResponseCode, SeqElement,
    SeqEntry, SeqNum, SequenceSet, Tag, Uid, UidPlusData, UidSetMember, UidValidity,
};

/// IMAP protocol revision this crate targets.
pub const IMAP_VERSION: &str = "IMAP4rev2";
