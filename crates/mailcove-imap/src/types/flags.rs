//! Message flags.

/// A message flag.
///
/// System flags (`\Seen` and friends) are captured as canonical-cased
/// variants regardless of the casing the server sent. Unrecognized
/// backslash-prefixed flags become [`Flag::System`]; bare atoms become
/// [`Flag::Keyword`]. [`Flag::Wildcard`] is the `\*` of a PERMANENTFLAGS
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Message has been read (`\Seen`).
    Seen,
    /// Message has been answered (`\Answered`).
    Answered,
    /// Message is flagged for special attention (`\Flagged`).
    Flagged,
    /// Message is marked for deletion (`\Deleted`).
    Deleted,
    /// Message is a draft (`\Draft`).
    Draft,
    /// Message arrived since the last session (`\Recent`, rev1 only).
    Recent,
    /// `\*`: clients may use arbitrary keywords (PERMANENTFLAGS).
    Wildcard,
    /// A backslash-prefixed flag outside the system set, name as sent.
    System(String),
    /// A keyword flag (bare atom), name as sent.
    Keyword(String),
}

impl Flag {
    /// Interprets the atom following a backslash.
    #[must_use]
    pub fn from_system_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "SEEN" => Self::Seen,
            "ANSWERED" => Self::Answered,
            "FLAGGED" => Self::Flagged,
            "DELETED" => Self::Deleted,
            "DRAFT" => Self::Draft,
            "RECENT" => Self::Recent,
            _ => Self::System(name.to_string()),
        }
    }

    /// Parses a flag from its full textual form, with or without the
    /// leading backslash.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix('\\') {
            Some("*") => Self::Wildcard,
            Some(name) => Self::from_system_name(name),
            None => Self::Keyword(s.to_string()),
        }
    }

    /// Returns the wire form of the flag.
    #[must_use]
    pub fn to_wire(&self) -> String {
        match self {
            Self::Seen => "\\Seen".to_string(),
            Self::Answered => "\\Answered".to_string(),
            Self::Flagged => "\\Flagged".to_string(),
            Self::Deleted => "\\Deleted".to_string(),
            Self::Draft => "\\Draft".to_string(),
            Self::Recent => "\\Recent".to_string(),
            Self::Wildcard => "\\*".to_string(),
            Self::System(s) => format!("\\{s}"),
            Self::Keyword(s) => s.clone(),
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

/// An ordered collection of unique flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    flags: Vec<Flag>,
}

impl Flags {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection from a vector, keeping first occurrences.
    #[must_use]
    pub fn from_vec(flags: Vec<Flag>) -> Self {
        let mut out = Self::new();
        for flag in flags {
            out.insert(flag);
        }
        out
    }

    /// Adds a flag if not already present.
    pub fn insert(&mut self, flag: Flag) {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
    }

    /// Removes a flag.
    pub fn remove(&mut self, flag: &Flag) {
        self.flags.retain(|f| f != flag);
    }

    /// Returns true if the flag is present.
    #[must_use]
    pub fn contains(&self, flag: &Flag) -> bool {
        self.flags.contains(flag)
    }

    /// Returns true if `\Seen` is present.
    #[must_use]
    pub fn is_seen(&self) -> bool {
        self.contains(&Flag::Seen)
    }

    /// Returns true if `\Deleted` is present.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.contains(&Flag::Deleted)
    }

    /// Returns an iterator over the flags.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    /// Returns the number of flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if there are no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl IntoIterator for Flags {
    type Item = Flag;
    type IntoIter = std::vec::IntoIter<Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.into_iter()
    }
}

impl FromIterator<Flag> for Flags {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_flags_are_canonical_cased() {
        assert_eq!(Flag::from_system_name("SEEN"), Flag::Seen);
        assert_eq!(Flag::from_system_name("seen"), Flag::Seen);
        assert_eq!(Flag::from_system_name("Answered"), Flag::Answered);
        assert_eq!(
            Flag::from_system_name("Important"),
            Flag::System("Important".to_string())
        );
    }

    #[test]
    fn parse_full_forms() {
        assert_eq!(Flag::parse("\\Deleted"), Flag::Deleted);
        assert_eq!(Flag::parse("\\*"), Flag::Wildcard);
        assert_eq!(Flag::parse("$Phishing"), Flag::Keyword("$Phishing".to_string()));
    }

    #[test]
    fn wire_forms() {
        assert_eq!(Flag::Seen.to_wire(), "\\Seen");
        assert_eq!(Flag::Wildcard.to_wire(), "\\*");
        assert_eq!(Flag::System("MDNSent".to_string()).to_wire(), "\\MDNSent");
        assert_eq!(Flag::Keyword("custom".to_string()).to_wire(), "custom");
    }

    #[test]
    fn collection_deduplicates() {
        let flags = Flags::from_vec(vec![Flag::Seen, Flag::Seen, Flag::Draft]);
        assert_eq!(flags.len(), 2);
        assert!(flags.is_seen());
        assert!(!flags.is_deleted());
    }

    #[test]
    fn remove_keeps_the_rest() {
        let mut flags = Flags::from_vec(vec![Flag::Seen, Flag::Answered]);
        flags.remove(&Flag::Seen);
        assert!(!flags.contains(&Flag::Seen));
        assert!(flags.contains(&Flag::Answered));
    }
}
