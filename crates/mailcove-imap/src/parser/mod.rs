//! Sans-I/O response parsing.
//!
//! [`lexer`] tokenizes raw bytes; [`response`](self) productions build
//! typed [`Response`] values from the token stream. No I/O happens here:
//! the transport hands over one assembled response at a time.

pub mod lexer;
mod response;

pub use response::{
    AclEntry, Address, BodyExtension, BodyFields, BodyStructure, ContentDisposition, Envelope,
    EsearchResponse, EsearchReturn, FetchItem, MultiPartExtension, Namespace, Namespaces, Quota,
    QuotaResource, Response, ResponseParser, ResponseText, SinglePartExtension, Status,
    StatusItem, UntaggedResponse,
};
