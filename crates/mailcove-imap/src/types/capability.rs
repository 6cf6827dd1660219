//! Server capabilities.

/// A server capability advertised by `CAPABILITY` or `ENABLED`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `IMAP4rev1` (RFC 3501).
    Imap4Rev1,
    /// `IMAP4rev2` (RFC 9051).
    Imap4Rev2,
    /// IDLE (RFC 2177).
    Idle,
    /// NAMESPACE (RFC 2342).
    Namespace,
    /// UIDPLUS (RFC 4315).
    UidPlus,
    /// MOVE (RFC 6851).
    Move,
    /// CONDSTORE (RFC 7162).
    CondStore,
    /// QRESYNC (RFC 7162).
    QResync,
    /// ENABLE (RFC 5161).
    Enable,
    /// LITERAL+ (RFC 7888).
    LiteralPlus,
    /// LITERAL- (RFC 7888).
    LiteralMinus,
    /// ESEARCH (RFC 4731).
    Esearch,
    /// SORT (RFC 5256).
    Sort,
    /// QUOTA (RFC 2087 / 9208).
    Quota,
    /// ACL (RFC 4314).
    Acl,
    /// ID (RFC 2971).
    Id,
    /// BINARY (RFC 3516).
    Binary,
    /// UTF8=ACCEPT (RFC 6855).
    Utf8Accept,
    /// An `AUTH=` mechanism.
    Auth(String),
    /// Anything else, preserved as sent.
    Unknown(String),
}

impl Capability {
    /// Parses a capability atom.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let upper = s.to_ascii_uppercase();
        if let Some(mechanism) = upper.strip_prefix("AUTH=") {
            return Self::Auth(mechanism.to_string());
        }
        match upper.as_str() {
            "IMAP4REV1" => Self::Imap4Rev1,
            "IMAP4REV2" => Self::Imap4Rev2,
            "IDLE" => Self::Idle,
            "NAMESPACE" => Self::Namespace,
            "UIDPLUS" => Self::UidPlus,
            "MOVE" => Self::Move,
            "CONDSTORE" => Self::CondStore,
            "QRESYNC" => Self::QResync,
            "ENABLE" => Self::Enable,
            "LITERAL+" => Self::LiteralPlus,
            "LITERAL-" => Self::LiteralMinus,
            "ESEARCH" => Self::Esearch,
            "SORT" => Self::Sort,
            "QUOTA" => Self::Quota,
            "ACL" => Self::Acl,
            "ID" => Self::Id,
            "BINARY" => Self::Binary,
            "UTF8=ACCEPT" => Self::Utf8Accept,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Imap4Rev1 => write!(f, "IMAP4rev1"),
            Self::Imap4Rev2 => write!(f, "IMAP4rev2"),
            Self::Idle => write!(f, "IDLE"),
            Self::Namespace => write!(f, "NAMESPACE"),
            Self::UidPlus => write!(f, "UIDPLUS"),
            Self::Move => write!(f, "MOVE"),
            Self::CondStore => write!(f, "CONDSTORE"),
            Self::QResync => write!(f, "QRESYNC"),
            Self::Enable => write!(f, "ENABLE"),
            Self::LiteralPlus => write!(f, "LITERAL+"),
            Self::LiteralMinus => write!(f, "LITERAL-"),
            Self::Esearch => write!(f, "ESEARCH"),
            Self::Sort => write!(f, "SORT"),
            Self::Quota => write!(f, "QUOTA"),
            Self::Acl => write!(f, "ACL"),
            Self::Id => write!(f, "ID"),
            Self::Binary => write!(f, "BINARY"),
            Self::Utf8Accept => write!(f, "UTF8=ACCEPT"),
            Self::Auth(m) => write!(f, "AUTH={m}"),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Capability::parse("IMAP4rev1"), Capability::Imap4Rev1);
        assert_eq!(Capability::parse("imap4rev2"), Capability::Imap4Rev2);
        assert_eq!(Capability::parse("idle"), Capability::Idle);
    }

    #[test]
    fn auth_mechanisms() {
        assert_eq!(
            Capability::parse("AUTH=PLAIN"),
            Capability::Auth("PLAIN".to_string())
        );
        assert_eq!(
            Capability::parse("auth=xoauth2"),
            Capability::Auth("XOAUTH2".to_string())
        );
    }

    #[test]
    fn unknown_preserves_original_case() {
        assert_eq!(
            Capability::parse("X-GM-EXT-1"),
            Capability::Unknown("X-GM-EXT-1".to_string())
        );
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(Capability::LiteralPlus.to_string(), "LITERAL+");
        assert_eq!(Capability::Auth("PLAIN".to_string()).to_string(), "AUTH=PLAIN");
    }
}
