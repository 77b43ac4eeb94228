use serde::{Deserialize, Serialize};

use super::TransportError;
use super::response::node_outcome;
use crate::domain::{ApiMessageId, Outcome, SendMessage};

pub const REQUEST: &str = "sendMsg";
pub const RESPONSE: &str = "sendMsgResp";

/// Element order follows the gateway documentation; optional fields are omitted when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMsgRecord {
    pub session_id: String,
    pub to: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliv_time: Option<u32>,
    #[serde(rename = "cliMsgId", default, skip_serializing_if = "Option::is_none")]
    pub cli_msg_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity: Option<u32>,
}

impl From<&SendMessage> for SendMsgRecord {
    fn from(value: &SendMessage) -> Self {
        let options = &value.options;
        Self {
            session_id: value.session_id.as_str().to_owned(),
            to: value.to.as_str().to_owned(),
            text: value.text.as_str().to_owned(),
            from: options.from.as_ref().map(|it| it.as_str().to_owned()),
            deliv_time: options.delay.map(|it| it.value()),
            cli_msg_id: options
                .client_message_id
                .as_ref()
                .map(|it| it.as_str().to_owned()),
            validity: options.validity.map(|it| it.value()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendMsgResp {
    #[serde(default)]
    fault: Option<String>,
    #[serde(rename = "apiMsgId", default)]
    api_msg_id: Option<String>,
}

impl SendMsgResp {
    pub fn into_outcome(self) -> Result<Outcome<ApiMessageId>, TransportError> {
        node_outcome(
            RESPONSE,
            self.fault,
            self.api_msg_id,
            ApiMessageId::FIELD,
            |it| ApiMessageId::new(it),
        )
    }
}
