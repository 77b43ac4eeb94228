//! Transport layer: the `clickAPI` XML schema and its form encoding.

mod auth;
mod balance;
mod document;
mod response;
mod send_msg;

pub use document::{encode_document, encode_query_form};
pub use response::{decode_response, response_element};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    #[error("failed to serialize request document: {0}")]
    Serialize(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("<{parent}> is missing <{element}>")]
    MissingElement {
        parent: &'static str,
        element: &'static str,
    },

    #[error("expected {expected} <{element}> records, got {actual}")]
    RecordCount {
        element: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Error for a response that lacks the node the caller asked for.
pub fn missing_node(element: &'static str) -> TransportError {
    TransportError::MissingElement {
        parent: document::ROOT,
        element,
    }
}

/// Error for a response whose record count differs from the request's.
pub fn record_count(element: &'static str, expected: usize, actual: usize) -> TransportError {
    TransportError::RecordCount {
        element,
        expected,
        actual,
    }
}
