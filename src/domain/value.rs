use std::fmt;

use crate::domain::validation::ValidationError;

fn trimmed_non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Clickatell HTTP/XML API id (`api_id`).
///
/// Invariant: non-empty after trimming.
pub struct ApiId(String);

impl ApiId {
    /// Element name used by the gateway (`api_id`).
    pub const FIELD: &'static str = "api_id";

    /// Create a validated [`ApiId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Clickatell account username (`user`).
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Element name used by the gateway (`user`).
    pub const FIELD: &'static str = "user";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Clickatell account password (`password`).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Element name used by the gateway (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Session identifier returned by a successful `auth` call (`session_id`).
///
/// The gateway decides how long a session lives; the client never refreshes it on its own.
pub struct SessionId(String);

impl SessionId {
    /// Element name used by the gateway (`session_id`).
    pub const FIELD: &'static str = "session_id";

    /// Create a validated [`SessionId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient number as sent to the gateway (`to`).
///
/// Invariant: not blank. The value is kept as given; any normalization is the job of a
/// [`RecipientValidator`](crate::domain::RecipientValidator).
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Element name used by the gateway (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-blank) phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Value as sent to the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`text`).
///
/// Invariant: non-empty after trimming. Whitespace is kept as given.
pub struct MessageText(String);

impl MessageText {
    /// Element name used by the gateway (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id (`from`).
///
/// Invariant: non-empty after trimming. The value must be registered on the Clickatell account.
pub struct SenderId(String);

impl SenderId {
    /// Element name used by the gateway (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Caller-supplied message id (`cliMsgId`), echoed back in delivery callbacks.
pub struct ClientMessageId(String);

impl ClientMessageId {
    /// Element name used by the gateway (`cliMsgId`).
    pub const FIELD: &'static str = "cliMsgId";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delivery delay in minutes (`deliv_time`), relative to when the gateway accepts the message.
pub struct DelayMinutes(u32);

impl DelayMinutes {
    /// Element name used by the gateway (`deliv_time`).
    pub const FIELD: &'static str = "deliv_time";

    /// Create a delay value (no range validation is performed).
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for DelayMinutes {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Validity period in minutes (`validity`).
///
/// A message still queued on the gateway after this period is dropped instead of delivered.
pub struct ValidityMinutes(u32);

impl ValidityMinutes {
    /// Element name used by the gateway (`validity`).
    pub const FIELD: &'static str = "validity";

    /// Create a validity value (no range validation is performed).
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for ValidityMinutes {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Gateway-assigned message id (`apiMsgId`) returned for every accepted `sendMsg` record.
pub struct ApiMessageId(String);

impl ApiMessageId {
    /// Element name used by the gateway (`apiMsgId`).
    pub const FIELD: &'static str = "apiMsgId";

    /// Create a validated [`ApiMessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account credit balance as reported by `getBalance` (`ok`).
///
/// The raw token is preserved to avoid formatting drift (`10.00` stays `"10.00"`).
pub struct Balance(String);

impl Balance {
    /// Element name used by the gateway (`ok`).
    pub const FIELD: &'static str = "ok";

    /// Create a validated [`Balance`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    /// Borrow the balance exactly as the gateway reported it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the balance, if the gateway returned a plain number.
    pub fn amount(&self) -> Option<f64> {
        self.0.parse::<f64>().ok()
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway-reported fault (`fault`), e.g. `"001, Authentication failed"`.
///
/// Invariant: non-empty after trimming. A blank `fault` element is not a fault.
pub struct Fault(String);

impl Fault {
    /// Element name used by the gateway (`fault`).
    pub const FIELD: &'static str = "fault";

    /// Create a validated [`Fault`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(trimmed_non_empty(value.into(), Self::FIELD)?))
    }

    /// Full fault text as returned by the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric error code preceding the first comma, if present (`"001"`).
    pub fn code(&self) -> Option<&str> {
        let (code, _) = self.0.split_once(',')?;
        let code = code.trim();
        if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
            Some(code)
        } else {
            None
        }
    }

    /// Human-readable part of the fault (text after the code, or the whole text).
    pub fn description(&self) -> &str {
        match (self.code(), self.0.split_once(',')) {
            (Some(_), Some((_, rest))) => rest.trim(),
            _ => &self.0,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
