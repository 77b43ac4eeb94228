use crate::domain::validation::ValidationError;
use crate::domain::value::{
    ApiId, ClientMessageId, DelayMinutes, MessageText, Password, PhoneNumber, SenderId, SessionId,
    Username, ValidityMinutes,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account credentials sent in the `auth` request.
pub struct Credentials {
    api_id: ApiId,
    user: Username,
    password: Password,
}

impl Credentials {
    /// Validate and bundle the three values the gateway needs to open a session.
    pub fn new(
        api_id: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_id: ApiId::new(api_id)?,
            user: Username::new(user)?,
            password: Password::new(password)?,
        })
    }

    pub fn api_id(&self) -> &ApiId {
        &self.api_id
    }

    pub fn user(&self) -> &Username {
        &self.user
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Optional per-message fields copied into every `sendMsg` record.
pub struct MessageOptions {
    pub from: Option<SenderId>,
    pub delay: Option<DelayMinutes>,
    pub client_message_id: Option<ClientMessageId>,
    pub validity: Option<ValidityMinutes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One `sendMsg` record: a single recipient of a single message.
pub struct SendMessage {
    pub session_id: SessionId,
    pub to: PhoneNumber,
    pub text: MessageText,
    pub options: MessageOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A `clickAPI` request document.
pub enum Document {
    Auth(Credentials),
    GetBalance { session_id: SessionId },
    SendMsg(Vec<SendMessage>),
}

impl Document {
    /// Build one `sendMsg` record per recipient, preserving recipient order.
    ///
    /// Fails when `recipients` is empty: a document without records would be a no-op send.
    pub fn send_msg(
        session_id: &SessionId,
        recipients: &[PhoneNumber],
        text: &MessageText,
        options: &MessageOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            });
        }

        let records = recipients
            .iter()
            .map(|to| SendMessage {
                session_id: session_id.clone(),
                to: to.clone(),
                text: text.clone(),
                options: options.clone(),
            })
            .collect();
        Ok(Self::SendMsg(records))
    }

    /// Name of the child element under `clickAPI` this document produces.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::GetBalance { .. } => "getBalance",
            Self::SendMsg(_) => "sendMsg",
        }
    }

    /// Number of records in the document (recipients for `sendMsg`, otherwise one).
    pub fn len(&self) -> usize {
        match self {
            Self::SendMsg(records) => records.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
