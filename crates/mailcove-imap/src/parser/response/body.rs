//! `body` / `bodystructure` parsing.
//!
//! The grammar here is the most server-mangled corner of IMAP, so several
//! deviations are tolerated with a warning instead of a parse error: a
//! `message/rfc822` part that carries no embedded envelope is downgraded
//! to a basic part, and a `multipart/mixed` with zero child parts is kept
//! as an empty multipart. The lexer must already be in data mode.

use crate::parser::lexer::{Lexer, Token};
use crate::Result;

use super::fetch::parse_envelope;
use super::types::{
    BodyExtension, BodyFields, BodyStructure, ContentDisposition, MultiPartExtension,
    SinglePartExtension,
};

/// Parses a `body`: `(` then a single part or nested multipart `)`.
pub fn parse_body(lexer: &mut Lexer<'_>) -> Result<BodyStructure> {
    lexer.expect(Token::LParen)?;

    if lexer.peek() == Some(b'(') {
        parse_multipart(lexer)
    } else {
        parse_single_part(lexer)
    }
}

/// Parses `body-type-mpart`: adjacent child bodies, then the subtype and
/// optional extension data. The opening paren is already consumed.
fn parse_multipart(lexer: &mut Lexer<'_>) -> Result<BodyStructure> {
    let mut parts = Vec::new();
    while lexer.peek() == Some(b'(') {
        parts.push(parse_body(lexer)?);
    }

    lexer.expect_space()?;
    let media_subtype = lexer.read_string()?;
    let extension = parse_mpart_extension(lexer)?;
    lexer.expect(Token::RParen)?;

    Ok(BodyStructure::Multipart {
        parts,
        media_subtype,
        extension,
    })
}

/// Parses `body-type-1part` after the opening paren.
///
/// The first string classifies the part: TEXT and MESSAGE get their
/// specialized shapes, everything else is basic. Two quirks live here:
/// a bare `("MIXED")` emits a zero-part multipart, and a MESSAGE part not
/// followed by ` (` collapses into a basic part.
fn parse_single_part(lexer: &mut Lexer<'_>) -> Result<BodyStructure> {
    let media_type = lexer.read_string()?;

    if lexer.peek() == Some(b')') && media_type.eq_ignore_ascii_case("MIXED") {
        tracing::warn!("multipart/mixed with no parts");
        lexer.advance();
        return Ok(BodyStructure::Multipart {
            parts: Vec::new(),
            media_subtype: media_type,
            extension: None,
        });
    }

    lexer.expect_space()?;
    let media_subtype = lexer.read_string()?;
    lexer.expect_space()?;
    let fields = parse_body_fields(lexer)?;

    let upper_type = media_type.to_ascii_uppercase();
    let upper_subtype = media_subtype.to_ascii_uppercase();

    let body = if upper_type == "TEXT" {
        lexer.expect_space()?;
        let lines = lexer.read_number()?;
        let extension = parse_1part_extension(lexer)?;
        BodyStructure::Text {
            media_subtype,
            fields,
            lines,
            extension,
        }
    } else if upper_type == "MESSAGE" && matches!(upper_subtype.as_str(), "RFC822" | "GLOBAL") {
        if lexer.remaining().starts_with(b" (") {
            lexer.expect_space()?;
            let envelope = parse_envelope(lexer)?;
            lexer.expect_space()?;
            let nested = parse_body(lexer)?;
            lexer.expect_space()?;
            let lines = lexer.read_number()?;
            let extension = parse_1part_extension(lexer)?;
            BodyStructure::Message {
                media_subtype,
                fields,
                envelope: Box::new(envelope),
                body: Box::new(nested),
                lines,
                extension,
            }
        } else {
            // Some servers tag plain attachments as message/rfc822; what
            // follows the fields is then md5/extension data, not an
            // envelope.
            tracing::warn!("message/rfc822 without embedded envelope; treating as basic");
            let extension = parse_1part_extension(lexer)?;
            BodyStructure::Basic {
                media_type,
                media_subtype,
                fields,
                extension,
            }
        }
    } else {
        let extension = parse_1part_extension(lexer)?;
        BodyStructure::Basic {
            media_type,
            media_subtype,
            fields,
            extension,
        }
    };

    lexer.expect(Token::RParen)?;
    Ok(body)
}

/// Parses `body-fields`: param, id, description, encoding, size.
fn parse_body_fields(lexer: &mut Lexer<'_>) -> Result<BodyFields> {
    let params = parse_body_fld_param(lexer)?;
    lexer.expect_space()?;
    let id = lexer.read_nstring()?;
    lexer.expect_space()?;
    let description = lexer.read_nstring()?;
    lexer.expect_space()?;
    let encoding = lexer.read_string()?;
    lexer.expect_space()?;
    let size = lexer.read_number()?;

    Ok(BodyFields {
        params,
        id,
        description,
        encoding,
        size,
    })
}

/// Parses `body-fld-param`: NIL or `( (string SP string)+ )`.
fn parse_body_fld_param(lexer: &mut Lexer<'_>) -> Result<Vec<(String, String)>> {
    match lexer.next_token()? {
        Token::Nil => Ok(Vec::new()),
        Token::LParen => {
            let mut params = Vec::new();
            loop {
                match lexer.peek() {
                    Some(b')') => {
                        lexer.advance();
                        break;
                    }
                    Some(b' ') => {
                        lexer.advance();
                    }
                    _ => {
                        let key = lexer.read_string()?;
                        lexer.expect_space()?;
                        let value = lexer.read_string()?;
                        params.push((key, value));
                    }
                }
            }
            Ok(params)
        }
        token => Err(lexer.error(&format!(
            "expected body parameters, found {}",
            token.describe()
        ))),
    }
}

/// Parses `body-fld-dsp`: NIL or `( string SP body-fld-param )`.
fn parse_body_fld_dsp(lexer: &mut Lexer<'_>) -> Result<Option<ContentDisposition>> {
    match lexer.next_token()? {
        Token::Nil => Ok(None),
        Token::LParen => {
            let disposition = lexer.read_string()?;
            lexer.expect_space()?;
            let params = parse_body_fld_param(lexer)?;
            lexer.expect(Token::RParen)?;
            Ok(Some(ContentDisposition {
                disposition,
                params,
            }))
        }
        token => Err(lexer.error(&format!(
            "expected content disposition, found {}",
            token.describe()
        ))),
    }
}

/// Parses `body-fld-lang`: nstring or `( string+ )`.
fn parse_body_fld_lang(lexer: &mut Lexer<'_>) -> Result<Vec<String>> {
    match lexer.next_token()? {
        Token::Nil => Ok(Vec::new()),
        Token::Quoted(s) => Ok(vec![s]),
        Token::Literal(data) => {
            let s = String::from_utf8(data)
                .map_err(|_| lexer.error("invalid UTF-8 in language tag"))?;
            Ok(vec![s])
        }
        Token::LParen => {
            let mut langs = Vec::new();
            loop {
                match lexer.peek() {
                    Some(b')') => {
                        lexer.advance();
                        break;
                    }
                    Some(b' ') => {
                        lexer.advance();
                    }
                    _ => langs.push(lexer.read_string()?),
                }
            }
            Ok(langs)
        }
        token => Err(lexer.error(&format!(
            "expected language data, found {}",
            token.describe()
        ))),
    }
}

/// Parses one `body-extension`: recursively an nstring, a number, or a
/// parenthesized list of extensions.
fn parse_body_extension(lexer: &mut Lexer<'_>) -> Result<BodyExtension> {
    match lexer.next_token()? {
        Token::Nil => Ok(BodyExtension::Str(None)),
        Token::Quoted(s) => Ok(BodyExtension::Str(Some(s))),
        Token::Literal(data) => {
            let s = String::from_utf8(data)
                .map_err(|_| lexer.error("invalid UTF-8 in body extension"))?;
            Ok(BodyExtension::Str(Some(s)))
        }
        Token::Number(n) => Ok(BodyExtension::Number(n)),
        Token::LParen => {
            let mut list = Vec::new();
            loop {
                match lexer.peek() {
                    Some(b')') => {
                        lexer.advance();
                        break;
                    }
                    Some(b' ') => {
                        lexer.advance();
                    }
                    _ => list.push(parse_body_extension(lexer)?),
                }
            }
            Ok(BodyExtension::List(list))
        }
        token => Err(lexer.error(&format!(
            "expected body extension, found {}",
            token.describe()
        ))),
    }
}

/// Consumes `body-ext-1part` when present:
/// `md5 [SP dsp [SP lang [SP loc *(SP extension)]]]`.
fn parse_1part_extension(lexer: &mut Lexer<'_>) -> Result<Option<SinglePartExtension>> {
    if !lexer.accept_space() {
        return Ok(None);
    }
    let mut ext = SinglePartExtension {
        md5: lexer.read_nstring()?,
        ..SinglePartExtension::default()
    };
    if lexer.accept_space() {
        ext.disposition = parse_body_fld_dsp(lexer)?;
        if lexer.accept_space() {
            ext.language = parse_body_fld_lang(lexer)?;
            if lexer.accept_space() {
                ext.location = lexer.read_nstring()?;
                while lexer.accept_space() {
                    ext.extra.push(parse_body_extension(lexer)?);
                }
            }
        }
    }
    Ok(Some(ext))
}

/// Consumes `body-ext-mpart` when present:
/// `param [SP dsp [SP lang [SP loc *(SP extension)]]]`.
fn parse_mpart_extension(lexer: &mut Lexer<'_>) -> Result<Option<MultiPartExtension>> {
    if !lexer.accept_space() {
        return Ok(None);
    }
    let mut ext = MultiPartExtension {
        params: parse_body_fld_param(lexer)?,
        ..MultiPartExtension::default()
    };
    if lexer.accept_space() {
        ext.disposition = parse_body_fld_dsp(lexer)?;
        if lexer.accept_space() {
            ext.language = parse_body_fld_lang(lexer)?;
            if lexer.accept_space() {
                ext.location = lexer.read_nstring()?;
                while lexer.accept_space() {
                    ext.extra.push(parse_body_extension(lexer)?);
                }
            }
        }
    }
    Ok(Some(ext))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::lexer::Mode;

    fn parse(input: &[u8]) -> Result<BodyStructure> {
        let mut lexer = Lexer::new(input);
        lexer.set_mode(Mode::Data);
        parse_body(&mut lexer)
    }

    #[test]
    fn text_part() {
        let body = parse(
            b"(\"TEXT\" \"PLAIN\" (\"CHARSET\" \"US-ASCII\") NIL NIL \"7BIT\" 3028 92)",
        )
        .unwrap();
        match body {
            BodyStructure::Text {
                media_subtype,
                fields,
                lines,
                extension,
            } => {
                assert_eq!(media_subtype, "PLAIN");
                assert_eq!(
                    fields.params,
                    vec![("CHARSET".to_string(), "US-ASCII".to_string())]
                );
                assert_eq!(fields.encoding, "7BIT");
                assert_eq!(fields.size, 3028);
                assert_eq!(lines, 92);
                assert!(extension.is_none());
            }
            other => panic!("expected Text, got {other:?}"),
        }
    }

    #[test]
    fn basic_part_with_extension_data() {
        let body = parse(
            b"(\"APPLICATION\" \"PDF\" (\"NAME\" \"doc.pdf\") NIL NIL \"BASE64\" 102400 \
NIL (\"attachment\" (\"FILENAME\" \"doc.pdf\")) NIL NIL)",
        )
        .unwrap();
        match body {
            BodyStructure::Basic {
                media_type,
                media_subtype,
                fields,
                extension,
            } => {
                assert_eq!(media_type, "APPLICATION");
                assert_eq!(media_subtype, "PDF");
                assert_eq!(fields.size, 102_400);
                let ext = extension.unwrap();
                assert!(ext.md5.is_none());
                let dsp = ext.disposition.unwrap();
                assert_eq!(dsp.disposition, "attachment");
                assert_eq!(
                    dsp.params,
                    vec![("FILENAME".to_string(), "doc.pdf".to_string())]
                );
            }
            other => panic!("expected Basic, got {other:?}"),
        }
    }

    #[test]
    fn multipart_with_two_parts() {
        let body = parse(
            b"((\"TEXT\" \"PLAIN\" NIL NIL NIL \"7BIT\" 100 5)\
(\"TEXT\" \"HTML\" NIL NIL NIL \"QUOTED-PRINTABLE\" 500 20) \"ALTERNATIVE\")",
        )
        .unwrap();
        match body {
            BodyStructure::Multipart {
                parts,
                media_subtype,
                extension,
            } => {
                assert_eq!(parts.len(), 2);
                assert_eq!(media_subtype, "ALTERNATIVE");
                assert!(extension.is_none());
                assert_eq!(parts[0].media_type(), "text/PLAIN");
                assert_eq!(parts[1].media_type(), "text/HTML");
            }
            other => panic!("expected Multipart, got {other:?}"),
        }
    }

    #[test]
    fn multipart_with_extension_data() {
        let body = parse(
            b"((\"TEXT\" \"PLAIN\" NIL NIL NIL \"7BIT\" 10 1) \"MIXED\" \
(\"BOUNDARY\" \"xyz\") NIL NIL)",
        )
        .unwrap();
        match body {
            BodyStructure::Multipart { extension, .. } => {
                let ext = extension.unwrap();
                assert_eq!(
                    ext.params,
                    vec![("BOUNDARY".to_string(), "xyz".to_string())]
                );
                assert!(ext.disposition.is_none());
            }
            other => panic!("expected Multipart, got {other:?}"),
        }
    }

    #[test]
    fn message_rfc822_with_envelope() {
        let body = parse(
            b"(\"MESSAGE\" \"RFC822\" NIL NIL NIL \"7BIT\" 3000 \
(NIL \"fwd\" NIL NIL NIL NIL NIL NIL NIL NIL) \
(\"TEXT\" \"PLAIN\" NIL NIL NIL \"7BIT\" 100 5) 60)",
        )
        .unwrap();
        match body {
            BodyStructure::Message {
                media_subtype,
                envelope,
                body,
                lines,
                ..
            } => {
                assert_eq!(media_subtype, "RFC822");
                assert_eq!(envelope.subject.as_deref(), Some("fwd"));
                assert_eq!(body.media_type(), "text/PLAIN");
                assert_eq!(lines, 60);
            }
            other => panic!("expected Message, got {other:?}"),
        }
    }

    #[test]
    fn message_rfc822_without_envelope_collapses_to_basic() {
        let body = parse(
            b"(\"MESSAGE\" \"RFC822\" NIL NIL NIL \"BASE64\" 4096 \
\"f9a0c4e2\" NIL NIL NIL)",
        )
        .unwrap();
        match body {
            BodyStructure::Basic {
                media_type,
                media_subtype,
                extension,
                ..
            } => {
                assert_eq!(media_type, "MESSAGE");
                assert_eq!(media_subtype, "RFC822");
                assert_eq!(extension.unwrap().md5.as_deref(), Some("f9a0c4e2"));
            }
            other => panic!("expected Basic fallback, got {other:?}"),
        }
    }

    #[test]
    fn malformed_mixed_with_no_parts() {
        let body = parse(b"(\"MIXED\")").unwrap();
        match body {
            BodyStructure::Multipart {
                parts,
                media_subtype,
                extension,
            } => {
                assert!(parts.is_empty());
                assert_eq!(media_subtype, "MIXED");
                assert!(extension.is_none());
            }
            other => panic!("expected Multipart quirk, got {other:?}"),
        }
    }

    #[test]
    fn nested_multipart() {
        let body = parse(
            b"(((\"TEXT\" \"PLAIN\" NIL NIL NIL \"7BIT\" 10 1)\
(\"TEXT\" \"HTML\" NIL NIL NIL \"7BIT\" 20 2) \"ALTERNATIVE\")\
(\"IMAGE\" \"PNG\" NIL NIL NIL \"BASE64\" 4096) \"MIXED\")",
        )
        .unwrap();
        match body {
            BodyStructure::Multipart { parts, .. } => {
                assert_eq!(parts.len(), 2);
                assert!(matches!(parts[0], BodyStructure::Multipart { .. }));
                assert_eq!(parts[1].media_type(), "IMAGE/PNG");
            }
            other => panic!("expected Multipart, got {other:?}"),
        }
    }

    #[test]
    fn body_extension_recursion() {
        let body = parse(
            b"(\"TEXT\" \"PLAIN\" NIL NIL NIL \"7BIT\" 10 1 \
NIL NIL NIL NIL \"x\" 5 (\"a\" (\"b\" 2)))",
        )
        .unwrap();
        match body {
            BodyStructure::Text { extension, .. } => {
                let ext = extension.unwrap();
                assert_eq!(
                    ext.extra,
                    vec![
                        BodyExtension::Str(Some("x".to_string())),
                        BodyExtension::Number(5),
                        BodyExtension::List(vec![
                            BodyExtension::Str(Some("a".to_string())),
                            BodyExtension::List(vec![
                                BodyExtension::Str(Some("b".to_string())),
                                BodyExtension::Number(2),
                            ]),
                        ]),
                    ]
                );
            }
            other => panic!("expected Text, got {other:?}"),
        }
    }
}
