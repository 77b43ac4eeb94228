use serde::{Deserialize, Serialize};

use super::TransportError;
use super::response::node_outcome;
use crate::domain::{Balance, Outcome};

pub const REQUEST: &str = "getBalance";
pub const RESPONSE: &str = "getBalanceResp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBalanceRecord {
    pub session_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetBalanceResp {
    #[serde(default)]
    fault: Option<String>,
    #[serde(default)]
    ok: Option<String>,
}

impl GetBalanceResp {
    pub fn into_outcome(self) -> Result<Outcome<Balance>, TransportError> {
        node_outcome(RESPONSE, self.fault, self.ok, Balance::FIELD, |it| Balance::new(it))
    }
}
