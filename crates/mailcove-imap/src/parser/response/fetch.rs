//! FETCH `msg-att` parsing.

use crate::grammar::is_header_fld_name_char;
use crate::parser::lexer::{Lexer, Mode, Token};
use crate::types::Uid;
use crate::Result;

use super::body::parse_body;
use super::helpers::parse_flag_list;
use super::types::{Address, Envelope, FetchItem};

/// Parses the parenthesized `msg-att` list of a FETCH response.
pub fn parse_fetch_items(lexer: &mut Lexer<'_>) -> Result<Vec<FetchItem>> {
    lexer.expect(Token::LParen)?;

    let mut items = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            // A stray extra space before ')' is absorbed here.
            Token::Space => {}
            Token::Atom(name) => items.push(parse_fetch_item(lexer, name)?),
            token => {
                return Err(lexer.error(&format!(
                    "unexpected {} in msg-att list",
                    token.describe()
                )));
            }
        }
    }

    Ok(items)
}

fn parse_fetch_item(lexer: &mut Lexer<'_>, name: &str) -> Result<FetchItem> {
    let upper = name.to_ascii_uppercase();
    match upper.as_str() {
        "UID" => {
            lexer.expect_space()?;
            let n = lexer.read_nz_number()?;
            Ok(FetchItem::Uid(Uid::new(n).expect("nonzero")))
        }
        "FLAGS" => {
            lexer.expect_space()?;
            Ok(FetchItem::Flags(parse_flag_list(lexer)?))
        }
        "INTERNALDATE" => {
            lexer.expect_space()?;
            Ok(FetchItem::InternalDate(lexer.read_string()?))
        }
        "ENVELOPE" => {
            lexer.expect_space()?;
            let envelope = in_data_mode(lexer, parse_envelope)?;
            Ok(FetchItem::Envelope(Box::new(envelope)))
        }
        "BODY" => {
            if lexer.peek() == Some(b'[') {
                let section = parse_section(lexer)?;
                let origin = parse_origin(lexer)?;
                lexer.expect_space()?;
                let data = lexer.read_nstring_bytes()?;
                Ok(FetchItem::BodySection {
                    section,
                    origin,
                    data,
                })
            } else {
                lexer.expect_space()?;
                Ok(FetchItem::Body(in_data_mode(lexer, parse_body)?))
            }
        }
        "BODYSTRUCTURE" => {
            lexer.expect_space()?;
            Ok(FetchItem::BodyStructure(in_data_mode(lexer, parse_body)?))
        }
        "RFC822" | "RFC822.HEADER" | "RFC822.TEXT" => {
            // Some servers append an empty [] to RFC822 attributes.
            if lexer.peek() == Some(b'[') {
                let stray = parse_section(lexer)?;
                tracing::warn!(attribute = %upper, ?stray, "stray section on RFC822 attribute");
            }
            lexer.expect_space()?;
            let data = lexer.read_nstring_bytes()?;
            Ok(match upper.as_str() {
                "RFC822" => FetchItem::Rfc822(data),
                "RFC822.HEADER" => FetchItem::Rfc822Header(data),
                _ => FetchItem::Rfc822Text(data),
            })
        }
        "RFC822.SIZE" => {
            lexer.expect_space()?;
            Ok(FetchItem::Rfc822Size(lexer.read_number64()?))
        }
        "MODSEQ" => {
            lexer.expect_space()?;
            lexer.expect(Token::LParen)?;
            let n = lexer.read_number64()?;
            lexer.expect(Token::RParen)?;
            Ok(FetchItem::ModSeq(n))
        }
        "BINARY" => {
            let section = parse_section(lexer)?;
            lexer.expect_space()?;
            let data = lexer.read_nstring_bytes()?;
            Ok(FetchItem::Binary { section, data })
        }
        "BINARY.SIZE" => {
            let section = parse_section(lexer)?;
            lexer.expect_space()?;
            let size = lexer.read_number64()?;
            Ok(FetchItem::BinarySize { section, size })
        }
        "X-GM-MSGID" => {
            lexer.expect_space()?;
            Ok(FetchItem::GmailMsgId(lexer.read_number64()?))
        }
        "X-GM-THRID" => {
            lexer.expect_space()?;
            Ok(FetchItem::GmailThreadId(lexer.read_number64()?))
        }
        "X-GM-LABELS" => {
            lexer.expect_space()?;
            Ok(FetchItem::GmailLabels(parse_gmail_labels(lexer)?))
        }
        _ => Err(lexer.error(&format!("unknown msg-att key {name:?}"))),
    }
}

/// Captures the `[section]` of `BODY[...]` / `BINARY[...]` literally.
///
/// Quoted strings inside (header names in `HEADER.FIELDS (...)`) are kept
/// verbatim, including their quotes, so a `]` inside a quoted name does
/// not end the section. Returns `None` for the degenerate `BODY[]`.
fn parse_section(lexer: &mut Lexer<'_>) -> Result<Option<String>> {
    if lexer.peek() != Some(b'[') {
        return Ok(None);
    }
    lexer.advance();

    let mut raw: Vec<u8> = Vec::new();
    loop {
        match lexer.peek() {
            Some(b']') => {
                lexer.advance();
                break;
            }
            Some(b'"') => {
                raw.push(b'"');
                lexer.advance();
                loop {
                    match lexer.advance() {
                        Some(b'"') => {
                            raw.push(b'"');
                            break;
                        }
                        Some(b'\\') => {
                            raw.push(b'\\');
                            if let Some(escaped) = lexer.advance() {
                                raw.push(escaped);
                            }
                        }
                        Some(b) => raw.push(b),
                        None => return Err(lexer.error("unterminated quoted section text")),
                    }
                }
            }
            Some(b) => {
                raw.push(b);
                lexer.advance();
            }
            None => return Err(lexer.error("unterminated body section")),
        }
    }

    if raw.is_empty() {
        return Ok(None);
    }
    let section = String::from_utf8_lossy(&raw).into_owned();
    check_header_field_names(&section);
    Ok(Some(section))
}

/// Warns about header field names that are not valid RFC 5322 names.
///
/// Servers occasionally echo back nonsense inside `HEADER.FIELDS (...)`;
/// the section is kept as sent either way.
fn check_header_field_names(section: &str) {
    let upper = section.to_ascii_uppercase();
    if !upper.starts_with("HEADER.FIELDS") {
        return;
    }
    let Some(open) = section.find('(') else {
        return;
    };
    let inner = section[open + 1..].trim_end_matches(')');
    for word in inner.split(' ').filter(|w| !w.is_empty()) {
        let name = word.trim_matches('"');
        if !name.bytes().all(is_header_fld_name_char) {
            tracing::warn!(field = name, "invalid header field name in section");
        }
    }
}

/// Parses the `<origin>` partial-fetch marker after a section.
fn parse_origin(lexer: &mut Lexer<'_>) -> Result<Option<u32>> {
    if lexer.peek() != Some(b'<') {
        return Ok(None);
    }
    lexer.advance();

    let mut digits = String::new();
    loop {
        match lexer.peek() {
            Some(b'>') => {
                lexer.advance();
                break;
            }
            Some(b @ b'0'..=b'9') => {
                digits.push(b as char);
                lexer.advance();
            }
            _ => return Err(lexer.error("malformed partial-fetch origin")),
        }
    }

    digits
        .parse()
        .map(Some)
        .map_err(|_| lexer.error("partial-fetch origin out of range"))
}

/// Runs a production with the lexer switched to data mode.
pub(super) fn in_data_mode<T>(
    lexer: &mut Lexer<'_>,
    f: impl FnOnce(&mut Lexer<'_>) -> Result<T>,
) -> Result<T> {
    lexer.set_mode(Mode::Data);
    let result = f(lexer);
    lexer.set_mode(Mode::Begin);
    result
}

/// Parses an `envelope`. The lexer must be in data mode.
pub fn parse_envelope(lexer: &mut Lexer<'_>) -> Result<Envelope> {
    match lexer.next_token()? {
        // A NIL envelope is grammatical; it carries no fields.
        Token::Nil => return Ok(Envelope::default()),
        Token::LParen => {}
        token => {
            return Err(lexer.error(&format!("expected envelope, found {}", token.describe())));
        }
    }

    let date = lexer.read_nstring()?;
    lexer.expect_space()?;
    let subject = lexer.read_nstring()?;
    lexer.expect_space()?;
    let from = parse_address_list(lexer)?;
    lexer.expect_space()?;
    let sender = parse_address_list(lexer)?;
    lexer.expect_space()?;
    let reply_to = parse_address_list(lexer)?;
    lexer.expect_space()?;
    let to = parse_address_list(lexer)?;
    lexer.expect_space()?;
    let cc = parse_address_list(lexer)?;
    lexer.expect_space()?;
    let bcc = parse_address_list(lexer)?;
    lexer.expect_space()?;
    let in_reply_to = lexer.read_nstring()?;
    lexer.expect_space()?;
    let message_id = lexer.read_nstring()?;

    lexer.expect(Token::RParen)?;

    Ok(Envelope {
        date,
        subject,
        from,
        sender,
        reply_to,
        to,
        cc,
        bcc,
        in_reply_to,
        message_id,
    })
}

/// Parses an envelope address slot: NIL or `( address+ )`.
fn parse_address_list(lexer: &mut Lexer<'_>) -> Result<Vec<Address>> {
    match lexer.next_token()? {
        Token::Nil => Ok(Vec::new()),
        Token::LParen => {
            let mut addresses = Vec::new();
            loop {
                match lexer.peek() {
                    Some(b')') => {
                        lexer.advance();
                        break;
                    }
                    Some(b'(') => addresses.push(parse_address(lexer)?),
                    Some(b' ') => {
                        lexer.advance();
                    }
                    _ => return Err(lexer.error("malformed address list")),
                }
            }
            Ok(addresses)
        }
        token => Err(lexer.error(&format!(
            "expected address list, found {}",
            token.describe()
        ))),
    }
}

/// Parses one `address`: `( name route mailbox host )`, all nstrings.
fn parse_address(lexer: &mut Lexer<'_>) -> Result<Address> {
    lexer.expect(Token::LParen)?;

    let name = lexer.read_nstring()?;
    lexer.expect_space()?;
    let route = lexer.read_nstring()?;
    lexer.expect_space()?;
    let mailbox = lexer.read_nstring()?;
    lexer.expect_space()?;
    let host = lexer.read_nstring()?;

    lexer.expect(Token::RParen)?;

    Ok(Address {
        name,
        route,
        mailbox,
        host,
    })
}

/// Parses Gmail's `X-GM-LABELS` list: backslash-prefixed atoms, bare
/// atoms, and quoted strings.
fn parse_gmail_labels(lexer: &mut Lexer<'_>) -> Result<Vec<String>> {
    lexer.expect(Token::LParen)?;

    let mut labels = Vec::new();
    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Space => {}
            Token::Backslash => {
                let name = lexer.read_atom_string()?;
                labels.push(format!("\\{name}"));
            }
            Token::Atom(s) => labels.push(s.to_string()),
            Token::Quoted(s) => labels.push(s),
            token => {
                return Err(lexer.error(&format!(
                    "unexpected {} in X-GM-LABELS",
                    token.describe()
                )));
            }
        }
    }

    Ok(labels)
}
