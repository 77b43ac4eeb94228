use serde::Deserialize;

use super::TransportError;
use super::auth::{self, AuthResp};
use super::balance::{self, GetBalanceResp};
use super::send_msg::{self, SendMsgResp};
use crate::domain::{Fault, Outcome, ParsedResponse, ValidationError};

#[derive(Debug, Clone, Default, Deserialize)]
struct ClickApiResponse {
    #[serde(rename = "authResp", default)]
    auth_resp: Option<AuthResp>,
    #[serde(rename = "getBalanceResp", default)]
    get_balance_resp: Option<GetBalanceResp>,
    #[serde(rename = "sendMsgResp", default)]
    send_msg_resp: Vec<SendMsgResp>,
    #[serde(rename = "xmlErrorResp", default)]
    xml_error_resp: Option<XmlErrorResp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct XmlErrorResp {
    #[serde(default)]
    fault: Option<String>,
}

/// Blank or missing `fault` text means "no fault"; anything else (even `"0"`) is a fault.
fn fault_from(text: Option<String>) -> Option<Fault> {
    text.and_then(|it| Fault::new(it).ok())
}

/// Map one response node to its outcome.
///
/// A node carrying neither a fault nor a non-blank success element is malformed.
pub(super) fn node_outcome<T>(
    parent: &'static str,
    fault: Option<String>,
    value: Option<String>,
    element: &'static str,
    build: impl FnOnce(String) -> Result<T, ValidationError>,
) -> Result<Outcome<T>, TransportError> {
    if let Some(fault) = fault_from(fault) {
        return Ok(Outcome::Fault(fault));
    }

    value
        .and_then(|it| build(it).ok())
        .map(Outcome::Ok)
        .ok_or(TransportError::MissingElement { parent, element })
}

/// Parse a gateway response body into its typed form.
pub fn decode_response(xml: &str) -> Result<ParsedResponse, TransportError> {
    let parsed: ClickApiResponse = quick_xml::de::from_str(xml)?;

    Ok(ParsedResponse {
        auth: parsed.auth_resp.map(AuthResp::into_outcome).transpose()?,
        balance: parsed
            .get_balance_resp
            .map(GetBalanceResp::into_outcome)
            .transpose()?,
        send_msg: parsed
            .send_msg_resp
            .into_iter()
            .map(SendMsgResp::into_outcome)
            .collect::<Result<Vec<_>, _>>()?,
        error: parsed.xml_error_resp.and_then(|it| fault_from(it.fault)),
    })
}

/// Response element expected for a request element (`auth` → `authResp`).
pub fn response_element(request: &str) -> &'static str {
    match request {
        auth::REQUEST => auth::RESPONSE,
        balance::REQUEST => balance::RESPONSE,
        send_msg::REQUEST => send_msg::RESPONSE,
        _ => "xmlErrorResp",
    }
}
