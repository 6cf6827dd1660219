//! End-to-end response parsing over realistic wire lines.

#![allow(clippy::unwrap_used)]

use mailcove_imap::{
    BodyStructure, Capability, EsearchReturn, FetchItem, Flag, MailboxAttribute, Response,
    ResponseCode, ResponseParser, SequenceSet, Status, StatusItem, UntaggedResponse,
};

fn parse(input: &[u8]) -> Response {
    ResponseParser::parse(input).unwrap()
}

fn untagged(input: &[u8]) -> UntaggedResponse {
    match parse(input) {
        Response::Untagged(data) => data,
        other => panic!("expected untagged response, got {other:?}"),
    }
}

#[test]
fn greeting_with_capability_code() {
    let data = untagged(
        b"* OK [CAPABILITY IMAP4rev1 SASL-IR AUTH=PLAIN ID ENABLE IDLE LITERAL+] Dovecot ready.\r\n",
    );
    match data {
        UntaggedResponse::Ok(text) => {
            match text.code {
                Some(ResponseCode::Capability(caps)) => {
                    assert!(caps.contains(&Capability::Imap4Rev1));
                    assert!(caps.contains(&Capability::LiteralPlus));
                    assert!(caps.contains(&Capability::Auth("PLAIN".to_string())));
                }
                other => panic!("expected CAPABILITY code, got {other:?}"),
            }
            assert_eq!(text.text, "Dovecot ready.");
        }
        other => panic!("expected OK, got {other:?}"),
    }
}

#[test]
fn select_conversation() {
    // The untagged responses a SELECT typically produces, in order.
    let lines: &[&[u8]] = &[
        b"* FLAGS (\\Answered \\Flagged \\Deleted \\Seen \\Draft)\r\n",
        b"* OK [PERMANENTFLAGS (\\Deleted \\Seen \\*)] Flags permitted.\r\n",
        b"* 172 EXISTS\r\n",
        b"* 1 RECENT\r\n",
        b"* OK [UNSEEN 12] Message 12 is first unseen\r\n",
        b"* OK [UIDVALIDITY 3857529045] UIDs valid\r\n",
        b"* OK [UIDNEXT 4392] Predicted next UID\r\n",
        b"* OK [HIGHESTMODSEQ 715194045007] Highest\r\n",
        b"A142 OK [READ-WRITE] SELECT completed\r\n",
    ];
    let parsed: Vec<Response> = lines.iter().map(|l| parse(l)).collect();

    assert!(matches!(
        parsed[2],
        Response::Untagged(UntaggedResponse::Exists(172))
    ));
    assert!(matches!(
        parsed[3],
        Response::Untagged(UntaggedResponse::Recent(1))
    ));
    match &parsed[5] {
        Response::Untagged(UntaggedResponse::Ok(text)) => {
            assert!(matches!(
                text.code,
                Some(ResponseCode::UidValidity(v)) if v.get() == 3_857_529_045
            ));
        }
        other => panic!("expected OK, got {other:?}"),
    }
    match &parsed[7] {
        Response::Untagged(UntaggedResponse::Ok(text)) => {
            assert_eq!(text.code, Some(ResponseCode::HighestModSeq(715_194_045_007)));
        }
        other => panic!("expected OK, got {other:?}"),
    }
    match &parsed[8] {
        Response::Tagged { status, text, .. } => {
            assert_eq!(*status, Status::Ok);
            assert_eq!(text.code, Some(ResponseCode::ReadWrite));
        }
        other => panic!("expected tagged OK, got {other:?}"),
    }
}

#[test]
fn fetch_with_nested_bodystructure() {
    let data = untagged(
        b"* 4 FETCH (UID 104 MODSEQ (12121130956) FLAGS (\\Seen $Forwarded) \
INTERNALDATE \"17-Jul-1996 02:44:25 -0700\" RFC822.SIZE 4286 \
BODYSTRUCTURE ((\"TEXT\" \"PLAIN\" (\"CHARSET\" \"UTF-8\") NIL NIL \"7BIT\" 1152 23 \
NIL NIL NIL NIL)(\"TEXT\" \"HTML\" (\"CHARSET\" \"UTF-8\") NIL NIL \"QUOTED-PRINTABLE\" \
3029 62 NIL NIL NIL NIL) \"ALTERNATIVE\" (\"BOUNDARY\" \"d3438gr7324\") NIL NIL NIL))\r\n",
    );
    match data {
        UntaggedResponse::Fetch { seq, items } => {
            assert_eq!(seq.get(), 4);
            assert!(items
                .iter()
                .any(|i| matches!(i, FetchItem::Uid(uid) if uid.get() == 104)));
            assert!(items
                .iter()
                .any(|i| matches!(i, FetchItem::ModSeq(12_121_130_956))));
            assert!(items
                .iter()
                .any(|i| matches!(i, FetchItem::Rfc822Size(4286))));
            let flags = items
                .iter()
                .find_map(|i| match i {
                    FetchItem::Flags(f) => Some(f),
                    _ => None,
                })
                .unwrap();
            assert!(flags.contains(&Flag::Seen));
            assert!(flags.contains(&Flag::Keyword("$Forwarded".to_string())));

            let body = items
                .iter()
                .find_map(|i| match i {
                    FetchItem::BodyStructure(b) => Some(b),
                    _ => None,
                })
                .unwrap();
            match body {
                BodyStructure::Multipart {
                    parts,
                    media_subtype,
                    extension,
                } => {
                    assert_eq!(parts.len(), 2);
                    assert_eq!(media_subtype, "ALTERNATIVE");
                    assert_eq!(
                        extension.as_ref().unwrap().params,
                        vec![("BOUNDARY".to_string(), "d3438gr7324".to_string())]
                    );
                }
                other => panic!("expected multipart, got {other:?}"),
            }
        }
        other => panic!("expected FETCH, got {other:?}"),
    }
}

#[test]
fn fetch_with_literal_body_and_embedded_crlf() {
    let data = untagged(b"* 1 FETCH (BODY[TEXT] {14}\r\nline1\r\nline2\r\n)\r\n");
    match data {
        UntaggedResponse::Fetch { items, .. } => {
            assert_eq!(
                items,
                vec![FetchItem::BodySection {
                    section: Some("TEXT".to_string()),
                    origin: None,
                    data: Some(b"line1\r\nline2\r\n".to_vec()),
                }]
            );
        }
        other => panic!("expected FETCH, got {other:?}"),
    }
}

#[test]
fn esearch_with_sequence_set() {
    let data = untagged(b"* ESEARCH (TAG \"A282\") UID COUNT 17 ALL 4:18,21,28\r\n");
    match data {
        UntaggedResponse::Esearch(es) => {
            assert_eq!(es.tag.as_deref(), Some("A282"));
            assert!(es.uid);
            let all = es
                .returns
                .iter()
                .find_map(|r| match r {
                    EsearchReturn::All(set) => Some(set),
                    _ => None,
                })
                .unwrap();
            assert_eq!(all, &"4:18,21,28".parse::<SequenceSet>().unwrap());
            assert!(es.returns.contains(&EsearchReturn::Count(17)));
        }
        other => panic!("expected ESEARCH, got {other:?}"),
    }
}

#[test]
fn status_with_modern_attributes() {
    let data = untagged(
        b"* STATUS \"Archive/2024\" (MESSAGES 231 SIZE 9414243 DELETED 2 HIGHESTMODSEQ 7011231777)\r\n",
    );
    match data {
        UntaggedResponse::Status { mailbox, items } => {
            assert_eq!(mailbox.as_str(), "Archive/2024");
            assert!(items.contains(&StatusItem::Messages(231)));
            assert!(items.contains(&StatusItem::Size(9_414_243)));
            assert!(items.contains(&StatusItem::Deleted(2)));
            assert!(items.contains(&StatusItem::HighestModSeq(7_011_231_777)));
        }
        other => panic!("expected STATUS, got {other:?}"),
    }
}

#[test]
fn namespace_line() {
    let data = untagged(b"* NAMESPACE ((\"\" \"/\")) NIL ((\"#shared/\" \"/\"))\r\n");
    match data {
        UntaggedResponse::Namespace(ns) => {
            assert_eq!(ns.personal[0].prefix, "");
            assert!(ns.other.is_empty());
            assert_eq!(ns.shared[0].prefix, "#shared/");
        }
        other => panic!("expected NAMESPACE, got {other:?}"),
    }
}

#[test]
fn quota_and_quotaroot() {
    let data = untagged(b"* QUOTAROOT INBOX \"\"\r\n");
    match data {
        UntaggedResponse::QuotaRoot { mailbox, roots } => {
            assert_eq!(mailbox.as_str(), "INBOX");
            assert_eq!(roots, vec![String::new()]);
        }
        other => panic!("expected QUOTAROOT, got {other:?}"),
    }

    let data = untagged(b"* QUOTA \"\" (STORAGE 10 512)\r\n");
    match data {
        UntaggedResponse::Quota(quota) => {
            assert_eq!(quota.root, "");
            assert_eq!(quota.resources[0].name, "STORAGE");
            assert_eq!(quota.resources[0].usage, 10);
            assert_eq!(quota.resources[0].limit, 512);
        }
        other => panic!("expected QUOTA, got {other:?}"),
    }
}

#[test]
fn acl_line() {
    let data = untagged(b"* ACL INBOX fred rwipslda anne lrs\r\n");
    match data {
        UntaggedResponse::Acl { mailbox, entries } => {
            assert_eq!(mailbox.as_str(), "INBOX");
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].identifier, "fred");
            assert_eq!(entries[0].rights, "rwipslda");
            assert_eq!(entries[1].identifier, "anne");
        }
        other => panic!("expected ACL, got {other:?}"),
    }
}

#[test]
fn id_line() {
    let data = untagged(b"* ID (\"name\" \"Cyrus\" \"version\" \"1.5\" \"os\" NIL)\r\n");
    match data {
        UntaggedResponse::Id(Some(fields)) => {
            assert_eq!(fields[0], ("name".to_string(), Some("Cyrus".to_string())));
            assert_eq!(fields[2], ("os".to_string(), None));
        }
        other => panic!("expected ID, got {other:?}"),
    }
}

#[test]
fn lsub_and_xlist_share_the_list_shape() {
    let data = untagged(b"* LSUB (\\Noselect) \"/\" \"Lists/imap\"\r\n");
    match data {
        UntaggedResponse::Lsub(entry) => {
            assert_eq!(entry.attributes, vec![MailboxAttribute::NoSelect]);
        }
        other => panic!("expected LSUB, got {other:?}"),
    }

    let data = untagged(b"* XLIST (\\Sent) \"/\" \"[Gmail]/Sent Mail\"\r\n");
    match data {
        UntaggedResponse::XList(entry) => {
            assert_eq!(entry.attributes, vec![MailboxAttribute::Sent]);
            assert_eq!(entry.mailbox.as_str(), "[Gmail]/Sent Mail");
        }
        other => panic!("expected XLIST, got {other:?}"),
    }
}

#[test]
fn sort_line() {
    let data = untagged(b"* SORT 5 3 4 1 2\r\n");
    match data {
        UntaggedResponse::Sort { numbers, modseq } => {
            assert_eq!(numbers, vec![5, 3, 4, 1, 2]);
            assert!(modseq.is_none());
        }
        other => panic!("expected SORT, got {other:?}"),
    }
}

#[test]
fn copyuid_in_tagged_ok() {
    let response = parse(b"A003 OK [COPYUID 38505 304:310 3955:3961] Done\r\n");
    match response {
        Response::Tagged { text, .. } => match text.code {
            Some(ResponseCode::CopyUid(data)) => {
                assert_eq!(data.validity.get(), 38505);
                assert!(data.source_uids.is_some());
            }
            other => panic!("expected COPYUID, got {other:?}"),
        },
        other => panic!("expected tagged response, got {other:?}"),
    }
}

#[test]
fn preauth_greeting() {
    let data = untagged(b"* PREAUTH IMAP4rev1 server logged in as Smith\r\n");
    assert!(matches!(data, UntaggedResponse::PreAuth(_)));
}

#[test]
fn utf8_quoted_strings_survive() {
    let data = untagged("* LIST () \"/\" \"Entw\u{fc}rfe\"\r\n".as_bytes());
    match data {
        UntaggedResponse::List(entry) => {
            assert_eq!(entry.mailbox.as_str(), "Entw\u{fc}rfe");
        }
        other => panic!("expected LIST, got {other:?}"),
    }
}

#[test]
fn search_with_modseq_suffix() {
    let data = untagged(b"* SEARCH 2 5 6 7 11 12 18 19 20 23 (MODSEQ 917162500)\r\n");
    match data {
        UntaggedResponse::Search { numbers, modseq } => {
            assert_eq!(numbers.len(), 10);
            assert_eq!(modseq, Some(917_162_500));
        }
        other => panic!("expected SEARCH, got {other:?}"),
    }
}

#[test]
fn malformed_lines_report_positions() {
    for line in [
        b"* \x01BAD\r\n".as_slice(),
        b"* LIST (\\Noselect \"/\" foo\r\n".as_slice(),
        b"* 12 FETCH (UID)\r\n".as_slice(),
    ] {
        let err = ResponseParser::parse(line).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("byte"), "error should carry a position: {msg}");
    }
}
