//! Parsed response data.
//!
//! Every server response becomes one [`Response`]; untagged payloads are
//! dispatched into [`UntaggedResponse`] variants by their label.

use crate::types::{
    Capability, Flags, ListEntry, Mailbox, ResponseCode, SeqNum, SequenceSet, Tag, Uid,
    UidValidity,
};

/// Condition of a tagged response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Command completed successfully.
    Ok,
    /// Command failed.
    No,
    /// Command was malformed or unknown.
    Bad,
}

/// `resp-text`: optional bracketed response code plus free text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseText {
    /// The bracketed code, when present.
    pub code: Option<ResponseCode>,
    /// Human-readable text; may be empty.
    pub text: String,
}

/// A parsed IMAP server response.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Continuation request (`+`): the server is ready for more data.
    Continuation {
        /// Response text; empty for a bare `+`.
        text: ResponseText,
    },
    /// Tagged response: completion of the command with this tag.
    Tagged {
        /// The echoed command tag.
        tag: Tag,
        /// Completion condition.
        status: Status,
        /// Response text with optional code.
        text: ResponseText,
    },
    /// Untagged response (`*`): server data or status.
    Untagged(UntaggedResponse),
}

/// Payload of an untagged response, chosen by its label.
#[derive(Debug, Clone, PartialEq)]
pub enum UntaggedResponse {
    /// `* OK`: informational, or the greeting.
    Ok(ResponseText),
    /// `* NO`: warning.
    No(ResponseText),
    /// `* BAD`: protocol-level complaint.
    Bad(ResponseText),
    /// `* PREAUTH` greeting: connection is already authenticated.
    PreAuth(ResponseText),
    /// `* BYE`: the server is closing the connection.
    Bye(ResponseText),
    /// `* CAPABILITY ...`.
    Capability(Vec<Capability>),
    /// `* ENABLED ...` (RFC 5161).
    Enabled(Vec<Capability>),
    /// `* FLAGS (...)`.
    Flags(Flags),
    /// `* LIST (...) delim name`.
    List(ListEntry),
    /// `* LSUB (...) delim name`.
    Lsub(ListEntry),
    /// `* XLIST (...) delim name` (pre-RFC 6154 servers).
    XList(ListEntry),
    /// `* n EXISTS`.
    Exists(u32),
    /// `* n RECENT` (rev1).
    Recent(u32),
    /// `* n EXPUNGE`.
    Expunge(SeqNum),
    /// `* n FETCH (...)`.
    Fetch {
        /// Message sequence number.
        seq: SeqNum,
        /// The `msg-att` items.
        items: Vec<FetchItem>,
    },
    /// `* SEARCH n...` with optional `(MODSEQ n)` (RFC 7162).
    Search {
        /// Matching numbers, in server order.
        numbers: Vec<u32>,
        /// Highest mod-sequence among the matches, when sent.
        modseq: Option<u64>,
    },
    /// `* SORT n...` (RFC 5256), same shape as SEARCH.
    Sort {
        /// Matching numbers, in server order.
        numbers: Vec<u32>,
        /// Highest mod-sequence among the matches, when sent.
        modseq: Option<u64>,
    },
    /// `* ESEARCH ...` (RFC 4731 / RFC 9051).
    Esearch(EsearchResponse),
    /// `* STATUS mailbox (...)`.
    Status {
        /// The mailbox the attributes apply to.
        mailbox: Mailbox,
        /// The reported attributes.
        items: Vec<StatusItem>,
    },
    /// `* NAMESPACE ...` (RFC 2342).
    Namespace(Namespaces),
    /// `* QUOTA root (...)` (RFC 2087 / 9208).
    Quota(Quota),
    /// `* QUOTAROOT mailbox root...`.
    QuotaRoot {
        /// The mailbox asked about.
        mailbox: Mailbox,
        /// Quota roots that apply to it.
        roots: Vec<String>,
    },
    /// `* ACL mailbox (identifier rights)...` (RFC 4314).
    Acl {
        /// The mailbox the ACL applies to.
        mailbox: Mailbox,
        /// Identifier/rights pairs.
        entries: Vec<AclEntry>,
    },
    /// `* ID ...` (RFC 2971); `None` when the server sent NIL.
    Id(Option<Vec<(String, Option<String>)>>),
    /// An untagged response with an unrecognized label, kept opaque.
    Unknown {
        /// The label, as sent.
        name: String,
        /// A number preceding the label, e.g. `* 99 XSTATE`.
        number: Option<u32>,
        /// Unparsed payload text following the label, if any.
        text: Option<String>,
    },
}

/// One `msg-att` item of a FETCH response.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchItem {
    /// `UID n`.
    Uid(Uid),
    /// `FLAGS (...)`.
    Flags(Flags),
    /// `INTERNALDATE "..."`.
    InternalDate(String),
    /// `ENVELOPE (...)`.
    Envelope(Box<Envelope>),
    /// `BODY (...)`: structure without extension data.
    Body(BodyStructure),
    /// `BODYSTRUCTURE (...)`: structure with extension data.
    BodyStructure(BodyStructure),
    /// `BODY[section]<origin>` content.
    BodySection {
        /// Text between the brackets, e.g. `HEADER.FIELDS (From To)`.
        /// `None` for `BODY[]`.
        section: Option<String>,
        /// The `<n>` partial-fetch origin octet, when present.
        origin: Option<u32>,
        /// The content; `None` when the server sent NIL.
        data: Option<Vec<u8>>,
    },
    /// `RFC822` content (rev1 compatibility).
    Rfc822(Option<Vec<u8>>),
    /// `RFC822.HEADER` content.
    Rfc822Header(Option<Vec<u8>>),
    /// `RFC822.TEXT` content.
    Rfc822Text(Option<Vec<u8>>),
    /// `RFC822.SIZE n`.
    Rfc822Size(u64),
    /// `BINARY[section]` content (RFC 3516).
    Binary {
        /// Section part numbers between the brackets.
        section: Option<String>,
        /// Decoded content; `None` when the server sent NIL.
        data: Option<Vec<u8>>,
    },
    /// `BINARY.SIZE[section] n`.
    BinarySize {
        /// Section part numbers between the brackets.
        section: Option<String>,
        /// Decoded size in octets.
        size: u64,
    },
    /// `MODSEQ (n)` (RFC 7162).
    ModSeq(u64),
    /// `X-GM-MSGID n` (Gmail).
    GmailMsgId(u64),
    /// `X-GM-THRID n` (Gmail).
    GmailThreadId(u64),
    /// `X-GM-LABELS (...)` (Gmail).
    GmailLabels(Vec<String>),
}

/// Message envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Envelope {
    /// Date header.
    pub date: Option<String>,
    /// Subject header.
    pub subject: Option<String>,
    /// From addresses.
    pub from: Vec<Address>,
    /// Sender addresses.
    pub sender: Vec<Address>,
    /// Reply-To addresses.
    pub reply_to: Vec<Address>,
    /// To addresses.
    pub to: Vec<Address>,
    /// Cc addresses.
    pub cc: Vec<Address>,
    /// Bcc addresses.
    pub bcc: Vec<Address>,
    /// In-Reply-To header.
    pub in_reply_to: Option<String>,
    /// Message-ID header.
    pub message_id: Option<String>,
}

/// One address of an envelope address list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Display name.
    pub name: Option<String>,
    /// Source route (obsolete `adl`).
    pub route: Option<String>,
    /// Local part.
    pub mailbox: Option<String>,
    /// Domain part.
    pub host: Option<String>,
}

impl Address {
    /// Returns `mailbox@host` when both parts are present.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        match (&self.mailbox, &self.host) {
            (Some(m), Some(h)) => Some(format!("{m}@{h}")),
            _ => None,
        }
    }
}

/// The `body-fields` common to every single-part body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyFields {
    /// `body-fld-param` key/value pairs.
    pub params: Vec<(String, String)>,
    /// Content-ID.
    pub id: Option<String>,
    /// Content-Description.
    pub description: Option<String>,
    /// Content-Transfer-Encoding.
    pub encoding: String,
    /// Body size in octets.
    pub size: u32,
}

/// `body-ext-1part` extension data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SinglePartExtension {
    /// `body-fld-md5`.
    pub md5: Option<String>,
    /// `body-fld-dsp`.
    pub disposition: Option<ContentDisposition>,
    /// `body-fld-lang` tags.
    pub language: Vec<String>,
    /// `body-fld-loc`.
    pub location: Option<String>,
    /// Trailing `body-extension` values.
    pub extra: Vec<BodyExtension>,
}

/// `body-ext-mpart` extension data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPartExtension {
    /// `body-fld-param` key/value pairs.
    pub params: Vec<(String, String)>,
    /// `body-fld-dsp`.
    pub disposition: Option<ContentDisposition>,
    /// `body-fld-lang` tags.
    pub language: Vec<String>,
    /// `body-fld-loc`.
    pub location: Option<String>,
    /// Trailing `body-extension` values.
    pub extra: Vec<BodyExtension>,
}

/// Content-Disposition of a body part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    /// Disposition type, e.g. `attachment`.
    pub disposition: String,
    /// Disposition parameters.
    pub params: Vec<(String, String)>,
}

/// A `body-extension` value: recursively an nstring, a number, or a list.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyExtension {
    /// An nstring value; `None` for NIL.
    Str(Option<String>),
    /// A number.
    Number(u64),
    /// A parenthesized list of extensions.
    List(Vec<BodyExtension>),
}

/// Parsed `body` / `bodystructure`.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyStructure {
    /// A single part that is neither text nor an embedded message.
    Basic {
        /// MIME type, e.g. `application`.
        media_type: String,
        /// MIME subtype, e.g. `pdf`.
        media_subtype: String,
        /// Common body fields.
        fields: BodyFields,
        /// Extension data, when the server sent any.
        extension: Option<SinglePartExtension>,
    },
    /// A `text/*` part.
    Text {
        /// MIME subtype, e.g. `plain`.
        media_subtype: String,
        /// Common body fields.
        fields: BodyFields,
        /// Size in lines.
        lines: u32,
        /// Extension data, when the server sent any.
        extension: Option<SinglePartExtension>,
    },
    /// A `message/rfc822` or `message/global` part with the embedded
    /// message's envelope and structure.
    Message {
        /// MIME subtype (`rfc822` or `global`).
        media_subtype: String,
        /// Common body fields.
        fields: BodyFields,
        /// Envelope of the embedded message.
        envelope: Box<Envelope>,
        /// Structure of the embedded message.
        body: Box<BodyStructure>,
        /// Size in lines.
        lines: u32,
        /// Extension data, when the server sent any.
        extension: Option<SinglePartExtension>,
    },
    /// A multipart body. `parts` is empty for the malformed
    /// `multipart/mixed` with no parts that some servers send.
    Multipart {
        /// Child parts.
        parts: Vec<BodyStructure>,
        /// Multipart subtype, e.g. `alternative`.
        media_subtype: String,
        /// Extension data, when the server sent any.
        extension: Option<MultiPartExtension>,
    },
}

impl BodyStructure {
    /// Returns the `type/subtype` of this part.
    #[must_use]
    pub fn media_type(&self) -> String {
        match self {
            Self::Basic {
                media_type,
                media_subtype,
                ..
            } => format!("{media_type}/{media_subtype}"),
            Self::Text { media_subtype, .. } => format!("text/{media_subtype}"),
            Self::Message { media_subtype, .. } => format!("message/{media_subtype}"),
            Self::Multipart { media_subtype, .. } => format!("multipart/{media_subtype}"),
        }
    }
}

/// One STATUS attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusItem {
    /// `MESSAGES n`.
    Messages(u32),
    /// `RECENT n` (rev1).
    Recent(u32),
    /// `UIDNEXT n`.
    UidNext(Uid),
    /// `UIDVALIDITY n`.
    UidValidity(UidValidity),
    /// `UNSEEN n`.
    Unseen(u32),
    /// `SIZE n` (RFC 8438).
    Size(u64),
    /// `DELETED n` (RFC 9051).
    Deleted(u32),
    /// `HIGHESTMODSEQ n` (RFC 7162).
    HighestModSeq(u64),
    /// An attribute this library does not know, value preserved.
    Unknown(String, u64),
}

/// `* ESEARCH` extended search result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EsearchResponse {
    /// Correlating command tag from `(TAG "...")`, when present.
    pub tag: Option<String>,
    /// True when the results are UIDs.
    pub uid: bool,
    /// The returned data items, in server order.
    pub returns: Vec<EsearchReturn>,
}

/// One ESEARCH return data item.
#[derive(Debug, Clone, PartialEq)]
pub enum EsearchReturn {
    /// `MIN n`.
    Min(u32),
    /// `MAX n`.
    Max(u32),
    /// `COUNT n`.
    Count(u32),
    /// `ALL sequence-set`.
    All(SequenceSet),
    /// `MODSEQ n` (RFC 7162).
    ModSeq(u64),
    /// An item this library does not know, value text preserved.
    Other(String, Option<String>),
}

/// The three NAMESPACE groups.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Namespaces {
    /// Personal namespaces.
    pub personal: Vec<Namespace>,
    /// Other users' namespaces.
    pub other: Vec<Namespace>,
    /// Shared namespaces.
    pub shared: Vec<Namespace>,
}

/// One namespace descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Mailbox name prefix.
    pub prefix: String,
    /// Hierarchy delimiter; `None` for a flat namespace.
    pub delimiter: Option<char>,
    /// Namespace response extensions.
    pub extensions: Vec<(String, Vec<String>)>,
}

/// `* QUOTA` data for one quota root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quota {
    /// The quota root name.
    pub root: String,
    /// Resource usage/limit triples.
    pub resources: Vec<QuotaResource>,
}

/// One resource of a QUOTA response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaResource {
    /// Resource name, e.g. `STORAGE`.
    pub name: String,
    /// Current usage.
    pub usage: u64,
    /// Limit.
    pub limit: u64,
}

/// One identifier/rights pair of an ACL response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclEntry {
    /// The identifier the rights apply to.
    pub identifier: String,
    /// The rights string.
    pub rights: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_email() {
        let addr = Address {
            name: Some("Mail Cove".to_string()),
            route: None,
            mailbox: Some("hello".to_string()),
            host: Some("example.com".to_string()),
        };
        assert_eq!(addr.email(), Some("hello@example.com".to_string()));

        let group_marker = Address {
            name: Some("undisclosed-recipients".to_string()),
            route: None,
            mailbox: None,
            host: None,
        };
        assert_eq!(group_marker.email(), None);
    }

    #[test]
    fn media_type_names() {
        let text = BodyStructure::Text {
            media_subtype: "plain".to_string(),
            fields: BodyFields::default(),
            lines: 0,
            extension: None,
        };
        assert_eq!(text.media_type(), "text/plain");

        let multipart = BodyStructure::Multipart {
            parts: vec![],
            media_subtype: "MIXED".to_string(),
            extension: None,
        };
        assert_eq!(multipart.media_type(), "multipart/MIXED");
    }
}
