use crate::domain::value::{ApiMessageId, Balance, Fault, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of one response node: the success payload or the gateway fault.
pub enum Outcome<T> {
    Ok(T),
    Fault(Fault),
}

impl<T> Outcome<T> {
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Ok(_) => None,
            Self::Fault(fault) => Some(fault),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Typed view of a `clickAPI` response document.
///
/// Only the nodes present in the body are populated; `send_msg` keeps the gateway's
/// record order.
pub struct ParsedResponse {
    pub auth: Option<Outcome<SessionId>>,
    pub balance: Option<Outcome<Balance>>,
    pub send_msg: Vec<Outcome<ApiMessageId>>,
    /// Document-level fault (`xmlErrorResp`), reported when the request itself was rejected.
    pub error: Option<Fault>,
}
