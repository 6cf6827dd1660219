//! Shared response productions.
//!
//! Everything here is reachable from more than one untagged label:
//! `resp-text` and its codes, flag lists, capability lists, and the
//! structured payloads of LIST, STATUS, SEARCH, ESEARCH, NAMESPACE,
//! QUOTA, ACL, and ID.

use crate::parser::lexer::{Lexer, Mode, Token};
use crate::types::{
    parse_uid_set, Capability, Flag, Flags, ListEntry, Mailbox, MailboxAttribute, ResponseCode,
    SeqNum, SequenceSet, Uid, UidPlusData, UidSetMember, UidValidity,
};
use crate::Result;

use super::types::{
    AclEntry, EsearchResponse, EsearchReturn, Namespace, Namespaces, Quota, QuotaResource,
    ResponseText, StatusItem,
};

/// Parses `resp-text`: optional `[code]`, then free text to end of line.
pub fn parse_resp_text(lexer: &mut Lexer<'_>) -> Result<ResponseText> {
    let code = if lexer.peek() == Some(b'[') {
        Some(parse_response_code(lexer)?)
    } else {
        None
    };

    lexer.accept_space();
    let text = lexer.remaining_text();

    Ok(ResponseText { code, text })
}

/// Parses a bracketed `resp-text-code`.
pub fn parse_response_code(lexer: &mut Lexer<'_>) -> Result<ResponseCode> {
    lexer.expect(Token::LBracket)?;

    let atom = lexer.read_atom_string()?;
    let upper = atom.to_ascii_uppercase();

    let code = match upper.as_str() {
        "ALERT" => ResponseCode::Alert,
        "PARSE" => ResponseCode::Parse,
        "READ-ONLY" => ResponseCode::ReadOnly,
        "READ-WRITE" => ResponseCode::ReadWrite,
        "TRYCREATE" => ResponseCode::TryCreate,
        "NOMODSEQ" => ResponseCode::NoModSeq,
        "CLOSED" => ResponseCode::Closed,
        "UIDNOTSTICKY" => ResponseCode::UidNotSticky,
        "BADCHARSET" => {
            let mut charsets = Vec::new();
            if lexer.peek() == Some(b' ') {
                lexer.advance();
                lexer.expect(Token::LParen)?;
                loop {
                    match lexer.peek() {
                        Some(b')') => {
                            lexer.advance();
                            break;
                        }
                        Some(b' ') => {
                            lexer.advance();
                        }
                        _ => charsets.push(lexer.read_astring()?),
                    }
                }
            }
            ResponseCode::BadCharset(charsets)
        }
        "CAPABILITY" => ResponseCode::Capability(parse_capabilities(lexer)?),
        "PERMANENTFLAGS" => {
            lexer.expect_space()?;
            ResponseCode::PermanentFlags(parse_flag_list(lexer)?.into_iter().collect())
        }
        "UIDNEXT" => {
            lexer.expect_space()?;
            let n = lexer.read_nz_number()?;
            ResponseCode::UidNext(Uid::new(n).expect("nonzero"))
        }
        "UIDVALIDITY" => {
            lexer.expect_space()?;
            let n = lexer.read_nz_number()?;
            ResponseCode::UidValidity(UidValidity::new(n).expect("nonzero"))
        }
        "UNSEEN" => {
            lexer.expect_space()?;
            let n = lexer.read_nz_number()?;
            ResponseCode::Unseen(SeqNum::new(n).expect("nonzero"))
        }
        "HIGHESTMODSEQ" => {
            lexer.expect_space()?;
            ResponseCode::HighestModSeq(lexer.read_number64()?)
        }
        "MODIFIED" => {
            lexer.expect_space()?;
            ResponseCode::Modified(read_sequence_set(lexer)?)
        }
        "APPENDUID" => {
            lexer.expect_space()?;
            let validity = read_uid_validity(lexer)?;
            lexer.expect_space()?;
            let assigned_uids = read_uid_set(lexer)?;
            ResponseCode::AppendUid(UidPlusData {
                validity,
                source_uids: None,
                assigned_uids,
            })
        }
        "COPYUID" => {
            lexer.expect_space()?;
            let validity = read_uid_validity(lexer)?;
            lexer.expect_space()?;
            let source_uids = read_uid_set(lexer)?;
            lexer.expect_space()?;
            let assigned_uids = read_uid_set(lexer)?;
            ResponseCode::CopyUid(UidPlusData {
                validity,
                source_uids: Some(source_uids),
                assigned_uids,
            })
        }
        _ => {
            // Unknown code: keep whatever sits before the bracket as text.
            let mut data = Vec::new();
            while let Some(b) = lexer.peek() {
                if b == b']' {
                    break;
                }
                data.push(b);
                lexer.advance();
            }
            let data = String::from_utf8_lossy(&data).into_owned();
            let data = data.strip_prefix(' ').map(str::to_string);
            ResponseCode::Other {
                name: atom.to_string(),
                data,
            }
        }
    };

    lexer.expect(Token::RBracket)?;
    Ok(code)
}

fn read_uid_validity(lexer: &mut Lexer<'_>) -> Result<UidValidity> {
    let n = lexer.read_nz_number()?;
    Ok(UidValidity::new(n).expect("nonzero"))
}

/// Reads a UIDPLUS `uid-set`, which the lexer hands over as a single
/// number or atom token (`:` and `,` are atom characters).
fn read_uid_set(lexer: &mut Lexer<'_>) -> Result<Vec<UidSetMember>> {
    let pos = lexer.position();
    match lexer.next_token()? {
        Token::Number(n) => {
            let n = u32::try_from(n)
                .ok()
                .filter(|&n| n != 0)
                .ok_or_else(|| lexer.error_at(pos, "uid out of range"))?;
            Ok(vec![UidSetMember::Single(n)])
        }
        Token::Atom(s) => {
            parse_uid_set(s).map_err(|e| lexer.error_at(pos, &format!("bad uid-set: {e}")))
        }
        token => Err(lexer.error_at(pos, &format!("expected uid-set, found {}", token.describe()))),
    }
}

/// Reads a `sequence-set`, which likewise arrives as one number or atom.
pub fn read_sequence_set(lexer: &mut Lexer<'_>) -> Result<SequenceSet> {
    let pos = lexer.position();
    match lexer.next_token()? {
        Token::Number(n) => {
            let n = u32::try_from(n)
                .map_err(|_| lexer.error_at(pos, "sequence number out of range"))?;
            SequenceSet::try_from(n)
                .map_err(|e| lexer.error_at(pos, &format!("bad sequence-set: {e}")))
        }
        Token::Atom(s) => s
            .parse()
            .map_err(|e| lexer.error_at(pos, &format!("bad sequence-set: {e}"))),
        Token::Star => Ok("*".parse().expect("'*' is a valid sequence-set")),
        token => Err(lexer.error_at(
            pos,
            &format!("expected sequence-set, found {}", token.describe()),
        )),
    }
}

/// Parses space-separated capability atoms until the list ends at `]` or
/// CRLF.
pub fn parse_capabilities(lexer: &mut Lexer<'_>) -> Result<Vec<Capability>> {
    let mut caps = Vec::new();

    while lexer.peek() == Some(b' ') {
        lexer.advance();
        if lexer.peek() == Some(b'\r') {
            break; // trailing space quirk
        }
        let atom = lexer.read_atom_string()?;
        caps.push(Capability::parse(atom));
    }

    Ok(caps)
}

/// Parses a parenthesized flag list.
///
/// Each flag is `\Name` (a system flag, canonical-cased), `\*` (the
/// PERMANENTFLAGS wildcard), or a bare keyword atom.
pub fn parse_flag_list(lexer: &mut Lexer<'_>) -> Result<Flags> {
    lexer.expect(Token::LParen)?;

    let mut flags = Flags::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Space => {}
            Token::Backslash => match lexer.next_token()? {
                Token::Atom(name) => flags.insert(Flag::from_system_name(name)),
                Token::Star => flags.insert(Flag::Wildcard),
                token => {
                    return Err(lexer.error(&format!(
                        "expected flag name after '\\', found {}",
                        token.describe()
                    )));
                }
            },
            Token::Atom(s) => flags.insert(Flag::Keyword(s.to_string())),
            token => {
                return Err(
                    lexer.error(&format!("unexpected {} in flag list", token.describe()))
                );
            }
        }
    }

    Ok(flags)
}

/// Parses the payload of LIST, LSUB, and XLIST:
/// `(attributes) SP (QUOTED-CHAR / NIL) SP mailbox`.
pub fn parse_list_entry(lexer: &mut Lexer<'_>) -> Result<ListEntry> {
    lexer.expect(Token::LParen)?;
    let mut attributes = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Space => {}
            Token::Backslash => {
                let name = lexer.read_atom_string()?;
                attributes.push(MailboxAttribute::from_name(name));
            }
            token => {
                return Err(lexer.error(&format!(
                    "unexpected {} in LIST attributes",
                    token.describe()
                )));
            }
        }
    }

    lexer.expect_space()?;

    let delimiter = match lexer.next_token()? {
        Token::Nil => None,
        Token::Quoted(s) => s.chars().next(),
        token => {
            return Err(lexer.error(&format!(
                "expected hierarchy delimiter, found {}",
                token.describe()
            )));
        }
    };

    lexer.expect_space()?;
    let mailbox = lexer.read_astring()?;

    Ok(ListEntry {
        attributes,
        delimiter,
        mailbox: Mailbox::new(mailbox),
    })
}

/// Parses SEARCH/SORT data: `*(SP nz-number) [SP "(" "MODSEQ" SP n ")"]`.
pub fn parse_search(lexer: &mut Lexer<'_>) -> Result<(Vec<u32>, Option<u64>)> {
    let mut numbers = Vec::new();
    let mut modseq = None;

    while lexer.accept_space() {
        match lexer.peek() {
            Some(b'\r') | None => break, // trailing space quirk
            Some(b'(') => {
                lexer.expect(Token::LParen)?;
                lexer.expect_label("MODSEQ")?;
                lexer.expect_space()?;
                modseq = Some(lexer.read_number64()?);
                lexer.expect(Token::RParen)?;
            }
            _ => numbers.push(lexer.read_nz_number()?),
        }
    }

    Ok((numbers, modseq))
}

/// Parses STATUS data: `mailbox SP "(" (attr SP number)* ")"`.
pub fn parse_status(lexer: &mut Lexer<'_>) -> Result<(Mailbox, Vec<StatusItem>)> {
    let mailbox = lexer.read_astring()?;
    lexer.expect_space()?;
    lexer.expect(Token::LParen)?;

    let mut items = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Space => {}
            Token::Atom(name) => {
                lexer.expect_space()?;
                let value = lexer.read_number64()?;
                items.push(status_item(lexer, name, value)?);
            }
            token => {
                return Err(lexer.error(&format!(
                    "unexpected {} in STATUS attributes",
                    token.describe()
                )));
            }
        }
    }

    Ok((Mailbox::new(mailbox), items))
}

fn status_item(lexer: &Lexer<'_>, name: &str, value: u64) -> Result<StatusItem> {
    let narrow = |v: u64| {
        u32::try_from(v).map_err(|_| lexer.error(&format!("{name} value exceeds 32 bits")))
    };
    let nonzero = |v: u64| {
        let v = narrow(v)?;
        if v == 0 {
            return Err(lexer.error(&format!("{name} must be nonzero")));
        }
        Ok(v)
    };

    Ok(match name.to_ascii_uppercase().as_str() {
        "MESSAGES" => StatusItem::Messages(narrow(value)?),
        "RECENT" => StatusItem::Recent(narrow(value)?),
        "UIDNEXT" => StatusItem::UidNext(Uid::new(nonzero(value)?).expect("nonzero")),
        "UIDVALIDITY" => {
            StatusItem::UidValidity(UidValidity::new(nonzero(value)?).expect("nonzero"))
        }
        "UNSEEN" => StatusItem::Unseen(narrow(value)?),
        "SIZE" => StatusItem::Size(value),
        "DELETED" => StatusItem::Deleted(narrow(value)?),
        "HIGHESTMODSEQ" => StatusItem::HighestModSeq(value),
        _ => StatusItem::Unknown(name.to_string(), value),
    })
}

/// Parses ESEARCH data:
/// `["(" "TAG" SP string ")"] ["UID"] *(SP return-name SP return-value)`,
/// each piece space-separated.
pub fn parse_esearch(lexer: &mut Lexer<'_>) -> Result<EsearchResponse> {
    let mut resp = EsearchResponse::default();
    let mut at_correlator = true;

    while lexer.accept_space() {
        match lexer.peek() {
            Some(b'\r') | None => break, // trailing space quirk
            Some(b'(') if at_correlator => {
                lexer.expect(Token::LParen)?;
                lexer.expect_label("TAG")?;
                lexer.expect_space()?;
                resp.tag = Some(lexer.read_string()?);
                lexer.expect(Token::RParen)?;
                at_correlator = false;
            }
            _ => {
                at_correlator = false;
                let name = lexer.read_atom_string()?.to_ascii_uppercase();
                match name.as_str() {
                    "UID" => resp.uid = true,
                    "MIN" => {
                        lexer.expect_space()?;
                        resp.returns.push(EsearchReturn::Min(lexer.read_nz_number()?));
                    }
                    "MAX" => {
                        lexer.expect_space()?;
                        resp.returns.push(EsearchReturn::Max(lexer.read_nz_number()?));
                    }
                    "COUNT" => {
                        lexer.expect_space()?;
                        resp.returns
                            .push(EsearchReturn::Count(lexer.read_number()?));
                    }
                    "ALL" => {
                        lexer.expect_space()?;
                        resp.returns
                            .push(EsearchReturn::All(read_sequence_set(lexer)?));
                    }
                    "MODSEQ" => {
                        lexer.expect_space()?;
                        resp.returns
                            .push(EsearchReturn::ModSeq(lexer.read_number64()?));
                    }
                    _ => {
                        // Unknown return item; RFC 4731 guarantees a value.
                        lexer.expect_space()?;
                        let value = match lexer.next_token()? {
                            Token::Atom(s) => s.to_string(),
                            Token::Number(n) => n.to_string(),
                            Token::Quoted(s) => s,
                            token => {
                                return Err(lexer.error(&format!(
                                    "unexpected {} as ESEARCH value",
                                    token.describe()
                                )));
                            }
                        };
                        resp.returns.push(EsearchReturn::Other(name, Some(value)));
                    }
                }
            }
        }
    }

    Ok(resp)
}

/// Parses NAMESPACE data: three namespace groups, each NIL or a
/// parenthesized list of descriptors. Runs the lexer in data mode.
pub fn parse_namespaces(lexer: &mut Lexer<'_>) -> Result<Namespaces> {
    lexer.set_mode(Mode::Data);
    let result = (|| {
        let personal = parse_namespace_group(lexer)?;
        lexer.expect_space()?;
        let other = parse_namespace_group(lexer)?;
        lexer.expect_space()?;
        let shared = parse_namespace_group(lexer)?;
        Ok(Namespaces {
            personal,
            other,
            shared,
        })
    })();
    lexer.set_mode(Mode::Begin);
    result
}

fn parse_namespace_group(lexer: &mut Lexer<'_>) -> Result<Vec<Namespace>> {
    match lexer.next_token()? {
        Token::Nil => Ok(Vec::new()),
        Token::LParen => {
            let mut namespaces = Vec::new();
            loop {
                match lexer.peek() {
                    Some(b')') => {
                        lexer.advance();
                        break;
                    }
                    Some(b'(') => namespaces.push(parse_namespace_descr(lexer)?),
                    Some(b' ') => {
                        lexer.advance();
                    }
                    _ => return Err(lexer.error("malformed namespace group")),
                }
            }
            Ok(namespaces)
        }
        token => Err(lexer.error(&format!(
            "expected namespace group, found {}",
            token.describe()
        ))),
    }
}

fn parse_namespace_descr(lexer: &mut Lexer<'_>) -> Result<Namespace> {
    lexer.expect(Token::LParen)?;
    let prefix = lexer.read_string()?;
    lexer.expect_space()?;

    let delimiter = match lexer.next_token()? {
        Token::Nil => None,
        Token::Quoted(s) => s.chars().next(),
        token => {
            return Err(lexer.error(&format!(
                "expected namespace delimiter, found {}",
                token.describe()
            )));
        }
    };

    let mut extensions = Vec::new();
    while lexer.accept_space() {
        let key = lexer.read_string()?;
        lexer.expect_space()?;
        lexer.expect(Token::LParen)?;
        let mut values = Vec::new();
        loop {
            match lexer.peek() {
                Some(b')') => {
                    lexer.advance();
                    break;
                }
                Some(b' ') => {
                    lexer.advance();
                }
                _ => values.push(lexer.read_string()?),
            }
        }
        extensions.push((key, values));
    }

    lexer.expect(Token::RParen)?;
    Ok(Namespace {
        prefix,
        delimiter,
        extensions,
    })
}

/// Parses QUOTA data: `root SP "(" (resource SP usage SP limit)* ")"`.
pub fn parse_quota(lexer: &mut Lexer<'_>) -> Result<Quota> {
    let root = lexer.read_astring()?;
    lexer.expect_space()?;
    lexer.expect(Token::LParen)?;

    let mut resources = Vec::new();
    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Space => {}
            Token::Atom(name) => {
                lexer.expect_space()?;
                let usage = lexer.read_number64()?;
                lexer.expect_space()?;
                let limit = lexer.read_number64()?;
                resources.push(QuotaResource {
                    name: name.to_string(),
                    usage,
                    limit,
                });
            }
            token => {
                return Err(lexer.error(&format!(
                    "unexpected {} in QUOTA resources",
                    token.describe()
                )));
            }
        }
    }

    Ok(Quota { root, resources })
}

/// Parses QUOTAROOT data: `mailbox *(SP root)`.
pub fn parse_quota_root(lexer: &mut Lexer<'_>) -> Result<(Mailbox, Vec<String>)> {
    let mailbox = lexer.read_astring()?;
    let mut roots = Vec::new();
    while lexer.accept_space() {
        if matches!(lexer.peek(), Some(b'\r') | None) {
            break; // trailing space quirk
        }
        roots.push(lexer.read_astring()?);
    }
    Ok((Mailbox::new(mailbox), roots))
}

/// Parses ACL data: `mailbox *(SP identifier SP rights)`.
pub fn parse_acl(lexer: &mut Lexer<'_>) -> Result<(Mailbox, Vec<AclEntry>)> {
    let mailbox = lexer.read_astring()?;
    let mut entries = Vec::new();
    while lexer.accept_space() {
        if matches!(lexer.peek(), Some(b'\r') | None) {
            break; // trailing space quirk
        }
        let identifier = lexer.read_astring()?;
        lexer.expect_space()?;
        let rights = lexer.read_astring()?;
        entries.push(AclEntry { identifier, rights });
    }
    Ok((Mailbox::new(mailbox), entries))
}

/// Parses ID data: NIL or a parenthesized list of `field SP value` pairs.
pub fn parse_id(lexer: &mut Lexer<'_>) -> Result<Option<Vec<(String, Option<String>)>>> {
    match lexer.next_token()? {
        Token::Nil => Ok(None),
        Token::LParen => {
            let mut fields = Vec::new();
            loop {
                match lexer.next_token()? {
                    Token::RParen => break,
                    Token::Space => {}
                    Token::Quoted(key) => {
                        lexer.expect_space()?;
                        let value = lexer.read_nstring()?;
                        fields.push((key, value));
                    }
                    Token::Literal(data) => {
                        let key = String::from_utf8(data)
                            .map_err(|_| lexer.error("invalid UTF-8 in ID field"))?;
                        lexer.expect_space()?;
                        let value = lexer.read_nstring()?;
                        fields.push((key, value));
                    }
                    token => {
                        return Err(lexer.error(&format!(
                            "unexpected {} in ID fields",
                            token.describe()
                        )));
                    }
                }
            }
            Ok(Some(fields))
        }
        token => Err(lexer.error(&format!("expected ID data, found {}", token.describe()))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lexer(input: &[u8]) -> Lexer<'_> {
        Lexer::new(input)
    }

    #[test]
    fn resp_text_with_code_and_text() {
        let mut lx = lexer(b"[UIDVALIDITY 1234] UIDs valid\r\n");
        let text = parse_resp_text(&mut lx).unwrap();
        assert_eq!(
            text.code,
            Some(ResponseCode::UidValidity(UidValidity::new(1234).unwrap()))
        );
        assert_eq!(text.text, "UIDs valid");
    }

    #[test]
    fn resp_text_without_code() {
        let mut lx = lexer(b"LOGIN completed\r\n");
        let text = parse_resp_text(&mut lx).unwrap();
        assert!(text.code.is_none());
        assert_eq!(text.text, "LOGIN completed");
    }

    #[test]
    fn unknown_code_keeps_argument_text() {
        let mut lx = lexer(b"[XWIDGETS 17 blue] ok\r\n");
        let text = parse_resp_text(&mut lx).unwrap();
        assert_eq!(
            text.code,
            Some(ResponseCode::Other {
                name: "XWIDGETS".to_string(),
                data: Some("17 blue".to_string()),
            })
        );
    }

    #[test]
    fn badcharset_with_and_without_list() {
        let mut lx = lexer(b"[BADCHARSET (UTF-8 US-ASCII)]\r\n");
        let text = parse_resp_text(&mut lx).unwrap();
        assert_eq!(
            text.code,
            Some(ResponseCode::BadCharset(vec![
                "UTF-8".to_string(),
                "US-ASCII".to_string()
            ]))
        );

        let mut lx = lexer(b"[BADCHARSET]\r\n");
        let text = parse_resp_text(&mut lx).unwrap();
        assert_eq!(text.code, Some(ResponseCode::BadCharset(vec![])));
    }

    #[test]
    fn permanentflags_with_wildcard() {
        let mut lx = lexer(b"[PERMANENTFLAGS (\\Deleted \\Seen \\*)] ok\r\n");
        let text = parse_resp_text(&mut lx).unwrap();
        assert_eq!(
            text.code,
            Some(ResponseCode::PermanentFlags(vec![
                Flag::Deleted,
                Flag::Seen,
                Flag::Wildcard
            ]))
        );
    }

    #[test]
    fn appenduid_and_copyuid() {
        let mut lx = lexer(b"[APPENDUID 38505 3955]\r\n");
        let text = parse_resp_text(&mut lx).unwrap();
        match text.code {
            Some(ResponseCode::AppendUid(data)) => {
                assert_eq!(data.validity.get(), 38505);
                assert!(data.source_uids.is_none());
                assert_eq!(data.assigned_uids, vec![UidSetMember::Single(3955)]);
            }
            other => panic!("expected APPENDUID, got {other:?}"),
        }

        let mut lx = lexer(b"[COPYUID 38505 304:310,402 3955:3962]\r\n");
        let text = parse_resp_text(&mut lx).unwrap();
        match text.code {
            Some(ResponseCode::CopyUid(data)) => {
                assert_eq!(
                    data.source_uids.unwrap(),
                    vec![UidSetMember::Range(304, 310), UidSetMember::Single(402)]
                );
                assert_eq!(data.assigned_uids, vec![UidSetMember::Range(3955, 3962)]);
            }
            other => panic!("expected COPYUID, got {other:?}"),
        }
    }

    #[test]
    fn modified_code_carries_a_set() {
        let mut lx = lexer(b"[MODIFIED 7,9]\r\n");
        let text = parse_resp_text(&mut lx).unwrap();
        assert_eq!(
            text.code,
            Some(ResponseCode::Modified("7,9".parse().unwrap()))
        );
    }

    #[test]
    fn flag_list_mixes_system_and_keywords() {
        let mut lx = lexer(b"(\\Seen $Forwarded custom)\r\n");
        let flags = parse_flag_list(&mut lx).unwrap();
        assert!(flags.contains(&Flag::Seen));
        assert!(flags.contains(&Flag::Keyword("$Forwarded".to_string())));
        assert!(flags.contains(&Flag::Keyword("custom".to_string())));
    }

    #[test]
    fn list_entry_with_nil_delimiter() {
        let mut lx = lexer(b"(\\Noselect) NIL foo\r\n");
        let entry = parse_list_entry(&mut lx).unwrap();
        assert_eq!(entry.attributes, vec![MailboxAttribute::NoSelect]);
        assert_eq!(entry.delimiter, None);
        assert_eq!(entry.mailbox.as_str(), "foo");
    }

    #[test]
    fn search_with_modseq() {
        let mut lx = lexer(b" 2 5 9 (MODSEQ 917162500)\r\n");
        let (numbers, modseq) = parse_search(&mut lx).unwrap();
        assert_eq!(numbers, vec![2, 5, 9]);
        assert_eq!(modseq, Some(917_162_500));
    }

    #[test]
    fn esearch_full_shape() {
        let mut lx = lexer(b" (TAG \"A282\") UID MIN 2 COUNT 3 ALL 2:10,12\r\n");
        let resp = parse_esearch(&mut lx).unwrap();
        assert_eq!(resp.tag.as_deref(), Some("A282"));
        assert!(resp.uid);
        assert_eq!(resp.returns.len(), 3);
        assert_eq!(resp.returns[0], EsearchReturn::Min(2));
        assert_eq!(resp.returns[1], EsearchReturn::Count(3));
        assert_eq!(
            resp.returns[2],
            EsearchReturn::All("2:10,12".parse().unwrap())
        );
    }

    #[test]
    fn namespace_groups() {
        let mut lx = lexer(b"((\"\" \"/\")) ((\"~\" \"/\" \"X-PARAM\" (\"a\" \"b\"))) NIL\r\n");
        let ns = parse_namespaces(&mut lx).unwrap();
        assert_eq!(ns.personal.len(), 1);
        assert_eq!(ns.personal[0].prefix, "");
        assert_eq!(ns.personal[0].delimiter, Some('/'));
        assert_eq!(ns.other.len(), 1);
        assert_eq!(
            ns.other[0].extensions,
            vec![("X-PARAM".to_string(), vec!["a".to_string(), "b".to_string()])]
        );
        assert!(ns.shared.is_empty());
    }

    #[test]
    fn quota_resources() {
        let mut lx = lexer(b"\"\" (STORAGE 10 512 MESSAGE 20 100)\r\n");
        let quota = parse_quota(&mut lx).unwrap();
        assert_eq!(quota.root, "");
        assert_eq!(
            quota.resources,
            vec![
                QuotaResource {
                    name: "STORAGE".to_string(),
                    usage: 10,
                    limit: 512
                },
                QuotaResource {
                    name: "MESSAGE".to_string(),
                    usage: 20,
                    limit: 100
                },
            ]
        );
    }

    #[test]
    fn id_nil_and_fields() {
        let mut lx = lexer(b"NIL\r\n");
        assert_eq!(parse_id(&mut lx).unwrap(), None);

        let mut lx = lexer(b"(\"name\" \"Dovecot\" \"version\" NIL)\r\n");
        let fields = parse_id(&mut lx).unwrap().unwrap();
        assert_eq!(
            fields,
            vec![
                ("name".to_string(), Some("Dovecot".to_string())),
                ("version".to_string(), None),
            ]
        );
    }
}
