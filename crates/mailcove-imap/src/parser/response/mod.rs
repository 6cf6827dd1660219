//! Response grammar.
//!
//! [`ResponseParser::parse`] turns one complete response line (with any
//! embedded literals) into a [`Response`]. The transport layer owns
//! response-boundary detection; this parser receives the assembled bytes
//! and is a pure function of them.

mod body;
mod fetch;
mod helpers;
mod types;

pub use types::{
    AclEntry, Address, BodyExtension, BodyFields, BodyStructure, ContentDisposition, Envelope,
    EsearchResponse, EsearchReturn, FetchItem, MultiPartExtension, Namespace, Namespaces, Quota,
    QuotaResource, Response, ResponseText, SinglePartExtension, Status, StatusItem,
    UntaggedResponse,
};

use crate::parser::lexer::{Lexer, Token};
use crate::types::{SeqNum, Tag};
use crate::{Error, Result};

use helpers::{
    parse_acl, parse_capabilities, parse_esearch, parse_flag_list, parse_id, parse_list_entry,
    parse_namespaces, parse_quota, parse_quota_root, parse_resp_text, parse_search, parse_status,
};

/// Server response parser.
///
/// Parsing holds no state across calls; every call owns its own lexer, so
/// the parser is freely shared.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses one complete response.
    ///
    /// The input must be the full line including the trailing CRLF, plus
    /// the bytes of any literals embedded in it.
    pub fn parse(input: &[u8]) -> Result<Response> {
        let mut lexer = Lexer::new(input);

        let response = match lexer.next_token()? {
            Token::Plus => Self::parse_continuation(&mut lexer)?,
            Token::Star => Self::parse_untagged(&mut lexer)?,
            Token::Atom(tag) => Self::parse_tagged(&mut lexer, tag)?,
            // An all-digit tag lexes as a number but is still a tag.
            Token::Number(n) => Self::parse_tagged(&mut lexer, &n.to_string())?,
            token => {
                return Err(Error::Parse {
                    position: 0,
                    message: format!("expected '+', '*', or tag, found {}", token.describe()),
                });
            }
        };

        Self::finish(&mut lexer)?;
        Ok(response)
    }

    /// Requires the response to end with exactly one CRLF, tolerating a
    /// trailing-space server quirk before it.
    fn finish(lexer: &mut Lexer<'_>) -> Result<()> {
        if lexer.peek() == Some(b' ') {
            tracing::warn!("trailing space before CRLF");
            lexer.skip_spaces();
        }
        lexer.expect_crlf()?;
        match lexer.next_token()? {
            Token::Eof => Ok(()),
            token => Err(lexer.error(&format!(
                "expected end of response, found {}",
                token.describe()
            ))),
        }
    }

    /// `continue-req`: `+ [SP resp-text] CRLF`. Empty text is permitted.
    fn parse_continuation(lexer: &mut Lexer<'_>) -> Result<Response> {
        let text = if lexer.accept_space() {
            parse_resp_text(lexer)?
        } else {
            ResponseText::default()
        };
        Ok(Response::Continuation { text })
    }

    /// Tagged response: `tag SP ("OK"|"NO"|"BAD") SP resp-text CRLF`.
    fn parse_tagged(lexer: &mut Lexer<'_>, tag: &str) -> Result<Response> {
        lexer.expect_space()?;

        let label = lexer.read_atom_string()?;
        let status = match label.to_ascii_uppercase().as_str() {
            "OK" => Status::Ok,
            "NO" => Status::No,
            "BAD" => Status::Bad,
            _ => {
                return Err(Error::InvalidResponse(format!(
                    "tagged response condition must be OK, NO, or BAD, found {label:?}"
                )));
            }
        };

        let text = if lexer.accept_space() {
            parse_resp_text(lexer)?
        } else {
            ResponseText::default()
        };

        Ok(Response::Tagged {
            tag: Tag::new(tag),
            status,
            text,
        })
    }

    /// Untagged response: `* SP` then dispatch on a label, optionally
    /// preceded by a number (`* 12 FETCH ...`).
    fn parse_untagged(lexer: &mut Lexer<'_>) -> Result<Response> {
        lexer.expect_space()?;

        let data = match lexer.next_token()? {
            Token::Atom(label) => Self::parse_untagged_labeled(lexer, label)?,
            Token::Number(n) => {
                let n = u32::try_from(n)
                    .map_err(|_| lexer.error("message number exceeds 32 bits"))?;
                lexer.expect_space()?;
                let label = lexer.read_atom_string()?;
                Self::parse_untagged_numbered(lexer, n, label)?
            }
            token => {
                return Err(lexer.error(&format!(
                    "expected untagged response label, found {}",
                    token.describe()
                )));
            }
        };

        Ok(Response::Untagged(data))
    }

    fn parse_untagged_labeled(
        lexer: &mut Lexer<'_>,
        label: &str,
    ) -> Result<UntaggedResponse> {
        let upper = label.to_ascii_uppercase();
        match upper.as_str() {
            "OK" | "NO" | "BAD" | "PREAUTH" | "BYE" => {
                let text = if lexer.accept_space() {
                    parse_resp_text(lexer)?
                } else {
                    ResponseText::default()
                };
                Ok(match upper.as_str() {
                    "OK" => UntaggedResponse::Ok(text),
                    "NO" => UntaggedResponse::No(text),
                    "BAD" => UntaggedResponse::Bad(text),
                    "PREAUTH" => UntaggedResponse::PreAuth(text),
                    _ => UntaggedResponse::Bye(text),
                })
            }
            "CAPABILITY" => Ok(UntaggedResponse::Capability(parse_capabilities(lexer)?)),
            "ENABLED" => Ok(UntaggedResponse::Enabled(parse_capabilities(lexer)?)),
            "FLAGS" => {
                lexer.expect_space()?;
                Ok(UntaggedResponse::Flags(parse_flag_list(lexer)?))
            }
            "LIST" | "LSUB" | "XLIST" => {
                lexer.expect_space()?;
                let entry = parse_list_entry(lexer)?;
                Ok(match upper.as_str() {
                    "LIST" => UntaggedResponse::List(entry),
                    "LSUB" => UntaggedResponse::Lsub(entry),
                    _ => UntaggedResponse::XList(entry),
                })
            }
            "SEARCH" => {
                let (numbers, modseq) = parse_search(lexer)?;
                Ok(UntaggedResponse::Search { numbers, modseq })
            }
            "SORT" => {
                let (numbers, modseq) = parse_search(lexer)?;
                Ok(UntaggedResponse::Sort { numbers, modseq })
            }
            "ESEARCH" => Ok(UntaggedResponse::Esearch(parse_esearch(lexer)?)),
            "STATUS" => {
                lexer.expect_space()?;
                let (mailbox, items) = parse_status(lexer)?;
                Ok(UntaggedResponse::Status { mailbox, items })
            }
            "NAMESPACE" => {
                lexer.expect_space()?;
                Ok(UntaggedResponse::Namespace(parse_namespaces(lexer)?))
            }
            "QUOTA" => {
                lexer.expect_space()?;
                Ok(UntaggedResponse::Quota(parse_quota(lexer)?))
            }
            "QUOTAROOT" => {
                lexer.expect_space()?;
                let (mailbox, roots) = parse_quota_root(lexer)?;
                Ok(UntaggedResponse::QuotaRoot { mailbox, roots })
            }
            "ACL" => {
                lexer.expect_space()?;
                let (mailbox, entries) = parse_acl(lexer)?;
                Ok(UntaggedResponse::Acl { mailbox, entries })
            }
            "ID" => {
                lexer.expect_space()?;
                Ok(UntaggedResponse::Id(parse_id(lexer)?))
            }
            _ => Ok(Self::unknown_untagged(lexer, label, None)),
        }
    }

    fn parse_untagged_numbered(
        lexer: &mut Lexer<'_>,
        number: u32,
        label: &str,
    ) -> Result<UntaggedResponse> {
        let nz = |lexer: &Lexer<'_>| {
            SeqNum::new(number).ok_or_else(|| lexer.error("message number must be nonzero"))
        };
        match label.to_ascii_uppercase().as_str() {
            "EXISTS" => Ok(UntaggedResponse::Exists(number)),
            "RECENT" => Ok(UntaggedResponse::Recent(number)),
            "EXPUNGE" => Ok(UntaggedResponse::Expunge(nz(lexer)?)),
            "FETCH" => {
                let seq = nz(lexer)?;
                lexer.expect_space()?;
                let items = fetch::parse_fetch_items(lexer)?;
                Ok(UntaggedResponse::Fetch { seq, items })
            }
            _ => Ok(Self::unknown_untagged(lexer, label, Some(number))),
        }
    }

    /// Keeps an unrecognized untagged response opaque instead of failing:
    /// the label, the optional leading number, and the rest of the line.
    fn unknown_untagged(
        lexer: &mut Lexer<'_>,
        label: &str,
        number: Option<u32>,
    ) -> UntaggedResponse {
        let text = if lexer.accept_space() {
            let rest = lexer.remaining_text();
            if rest.is_empty() {
                None
            } else {
                Some(rest)
            }
        } else {
            None
        };
        UntaggedResponse::Unknown {
            name: label.to_string(),
            number,
            text,
        }
    }
}
