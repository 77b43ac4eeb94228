use serde::{Deserialize, Serialize};

use super::TransportError;
use super::auth::AuthRecord;
use super::balance::GetBalanceRecord;
use super::send_msg::SendMsgRecord;
use crate::domain::Document;

pub const ROOT: &str = "clickAPI";
pub const QUERY_FIELD: &str = "data";

const XML_DECLARATION: &str = "<?xml version=\"1.0\"?>\n";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "clickAPI")]
pub struct ClickApiRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthRecord>,
    #[serde(rename = "getBalance", default, skip_serializing_if = "Option::is_none")]
    pub get_balance: Option<GetBalanceRecord>,
    #[serde(rename = "sendMsg", default, skip_serializing_if = "Vec::is_empty")]
    pub send_msg: Vec<SendMsgRecord>,
}

impl From<&Document> for ClickApiRequest {
    fn from(value: &Document) -> Self {
        match value {
            Document::Auth(credentials) => Self {
                auth: Some(credentials.into()),
                ..Default::default()
            },
            Document::GetBalance { session_id } => Self {
                get_balance: Some(GetBalanceRecord {
                    session_id: session_id.as_str().to_owned(),
                }),
                ..Default::default()
            },
            Document::SendMsg(records) => Self {
                send_msg: records.iter().map(SendMsgRecord::from).collect(),
                ..Default::default()
            },
        }
    }
}

/// Serialize a request document to the exact XML string posted to the gateway.
pub fn encode_document(document: &Document) -> Result<String, TransportError> {
    let body = quick_xml::se::to_string(&ClickApiRequest::from(document))
        .map_err(|err| TransportError::Serialize(Box::new(err)))?;
    Ok(format!("{XML_DECLARATION}{body}"))
}

/// Wrap serialized XML into the gateway's single-field form body (`data=<xml>`).
pub fn encode_query_form(xml: &str) -> Vec<(String, String)> {
    vec![(QUERY_FIELD.to_owned(), xml.to_owned())]
}
