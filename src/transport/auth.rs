use serde::{Deserialize, Serialize};

use super::TransportError;
use super::response::node_outcome;
use crate::domain::{Credentials, Outcome, SessionId};

pub const REQUEST: &str = "auth";
pub const RESPONSE: &str = "authResp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRecord {
    pub api_id: String,
    pub user: String,
    pub password: String,
}

impl From<&Credentials> for AuthRecord {
    fn from(value: &Credentials) -> Self {
        Self {
            api_id: value.api_id().as_str().to_owned(),
            user: value.user().as_str().to_owned(),
            password: value.password().as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResp {
    #[serde(default)]
    fault: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

impl AuthResp {
    pub fn into_outcome(self) -> Result<Outcome<SessionId>, TransportError> {
        node_outcome(
            RESPONSE,
            self.fault,
            self.session_id,
            SessionId::FIELD,
            |it| SessionId::new(it),
        )
    }
}
