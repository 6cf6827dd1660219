//! Mailbox names and LIST data.

/// A mailbox name.
///
/// `INBOX` is case-insensitive on the wire; it is normalized to uppercase
/// so that lookups behave the way servers do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mailbox(String);

impl Mailbox {
    /// Creates a mailbox name, normalizing `INBOX`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case("INBOX") {
            Self("INBOX".to_string())
        } else {
            Self(name)
        }
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the INBOX.
    #[must_use]
    pub fn is_inbox(&self) -> bool {
        self.0 == "INBOX"
    }
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Mailbox {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A name attribute in a LIST/LSUB/XLIST entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailboxAttribute {
    /// `\Noinferiors`: no child mailboxes can exist.
    NoInferiors,
    /// `\Noselect`: the name cannot be selected.
    NoSelect,
    /// `\Marked`: the mailbox has new activity.
    Marked,
    /// `\Unmarked`: no new activity.
    Unmarked,
    /// `\HasChildren`: child mailboxes exist.
    HasChildren,
    /// `\HasNoChildren`: no child mailboxes exist.
    HasNoChildren,
    /// `\NonExistent`: the name does not refer to an existing mailbox.
    NonExistent,
    /// `\Subscribed`: the mailbox is subscribed.
    Subscribed,
    /// `\Remote`: the mailbox lives on a remote server.
    Remote,
    /// `\All`: special-use, all messages.
    All,
    /// `\Archive`: special-use, archive.
    Archive,
    /// `\Drafts`: special-use, drafts.
    Drafts,
    /// `\Flagged`: special-use, flagged messages.
    Flagged,
    /// `\Junk`: special-use, spam.
    Junk,
    /// `\Sent`: special-use, sent messages.
    Sent,
    /// `\Trash`: special-use, deleted messages.
    Trash,
    /// Anything else, name as sent (without the backslash).
    Extension(String),
}

impl MailboxAttribute {
    /// Interprets the atom following the backslash of a name attribute.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "NOINFERIORS" => Self::NoInferiors,
            "NOSELECT" => Self::NoSelect,
            "MARKED" => Self::Marked,
            "UNMARKED" => Self::Unmarked,
            "HASCHILDREN" => Self::HasChildren,
            "HASNOCHILDREN" => Self::HasNoChildren,
            "NONEXISTENT" => Self::NonExistent,
            "SUBSCRIBED" => Self::Subscribed,
            "REMOTE" => Self::Remote,
            "ALL" => Self::All,
            "ARCHIVE" => Self::Archive,
            "DRAFTS" => Self::Drafts,
            "FLAGGED" => Self::Flagged,
            "JUNK" => Self::Junk,
            "SENT" => Self::Sent,
            "TRASH" => Self::Trash,
            _ => Self::Extension(name.to_string()),
        }
    }
}

/// One entry of a LIST, LSUB, or XLIST response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Name attributes.
    pub attributes: Vec<MailboxAttribute>,
    /// Hierarchy delimiter, `None` when the server sent NIL.
    pub delimiter: Option<char>,
    /// The mailbox name.
    pub mailbox: Mailbox,
}
