//! Client layer: session handling, HTTP calls and transport ↔ domain mapping.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    ApiMessageId, Balance, ClientMessageId, Credentials, DelayMinutes, Document, Fault,
    MessageOptions, MessageText, Outcome, ParsedResponse, Permissive, PhoneNumber, RecipientList,
    RecipientValidator, RejectedRecipient, SenderId, SessionId, ValidationError, ValidityMinutes,
};
use crate::transport;

/// Default Clickatell XML API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.clickatell.com/xml/xml";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ClickatellClient`].
///
/// Gateway faults are split by operation; everything that prevents a well-formed
/// answer from reaching the client (network, HTTP status, unreadable body) has its own
/// variant. Nothing is retried.
pub enum ClickatellError {
    /// The gateway answered the `auth` request with a fault.
    #[error("authentication failed: {fault}")]
    AuthenticationFailed { fault: Fault },

    /// At least one `sendMsg` record came back with a fault; the send is treated as failed.
    #[error("send message failed ({failed} of {total} records): {fault}")]
    SendFailed {
        fault: Fault,
        failed: usize,
        total: usize,
    },

    /// The gateway answered the `getBalance` request with a fault.
    #[error("balance query failed: {fault}")]
    BalanceQueryFailed { fault: Fault },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body is not a `clickAPI` document of the expected shape.
    #[error("response parse error: {0}")]
    ResponseParse(#[source] Box<dyn StdError + Send + Sync>),

    /// The request document could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors or preconditions rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Clone)]
/// Builder for [`ClickatellClient`].
///
/// Use this when you need a different endpoint, a timeout, a user-agent, or a
/// recipient validator other than [`Permissive`].
pub struct ClickatellClientBuilder {
    credentials: Credentials,
    api_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    validator: Arc<dyn RecipientValidator>,
}

impl ClickatellClientBuilder {
    /// Create a builder with the default endpoint and the permissive validator.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: None,
            user_agent: None,
            validator: Arc::new(Permissive),
        }
    }

    /// Override the gateway endpoint URL.
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set an HTTP client timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Choose how numbers passed to [`ClickatellClient::add_recipient`] are checked.
    pub fn validator(mut self, validator: impl RecipientValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Build a [`ClickatellClient`].
    ///
    /// Fails with [`ValidationError::InvalidUrl`] unless the endpoint is an `http(s)` URL.
    pub fn build(self) -> Result<ClickatellClient, ClickatellError> {
        let invalid_url = || ValidationError::InvalidUrl {
            input: self.api_url.clone(),
        };
        let parsed = url::Url::parse(&self.api_url).map_err(|_| invalid_url())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid_url().into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| ClickatellError::Transport(Box::new(err)))?;

        Ok(ClickatellClient::with_parts(
            self.credentials,
            self.api_url,
            Arc::new(ReqwestTransport { client }),
            self.validator,
        ))
    }
}

#[derive(Clone)]
/// Clickatell XML gateway client.
///
/// Holds the credentials, the current session, the recipient list and the message to
/// send. Operations that need a session open one on first use. Every call overwrites
/// the last request/response pair kept for inspection.
///
/// Methods that talk to the gateway take `&mut self`, so a client has at most one
/// request in flight. Use one client per logical session.
pub struct ClickatellClient {
    credentials: Credentials,
    api_url: String,
    http: Arc<dyn HttpTransport>,
    validator: Arc<dyn RecipientValidator>,
    session_id: Option<SessionId>,
    recipients: RecipientList,
    message: Option<MessageText>,
    options: MessageOptions,
    balance: Option<Balance>,
    last_request_xml: Option<String>,
    last_response: Option<String>,
}

impl ClickatellClient {
    /// Create a client using the default endpoint and the permissive validator.
    ///
    /// For more customization, use [`ClickatellClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self::with_parts(
            credentials,
            DEFAULT_API_URL.to_owned(),
            Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
            Arc::new(Permissive),
        )
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> ClickatellClientBuilder {
        ClickatellClientBuilder::new(credentials)
    }

    fn with_parts(
        credentials: Credentials,
        api_url: String,
        http: Arc<dyn HttpTransport>,
        validator: Arc<dyn RecipientValidator>,
    ) -> Self {
        Self {
            credentials,
            api_url,
            http,
            validator,
            session_id: None,
            recipients: RecipientList::new(),
            message: None,
            options: MessageOptions::default(),
            balance: None,
            last_request_xml: None,
            last_response: None,
        }
    }

    /// Open a session and keep its id for later requests.
    ///
    /// On a gateway fault the held session (if any) is left untouched.
    pub async fn authenticate(&mut self) -> Result<SessionId, ClickatellError> {
        let document = Document::Auth(self.credentials.clone());
        let parsed = self.send_query(&document).await?;

        match parsed.auth {
            Some(Outcome::Ok(session_id)) => {
                tracing::debug!("gateway session opened");
                self.session_id = Some(session_id.clone());
                Ok(session_id)
            }
            Some(Outcome::Fault(fault)) => Err(fault_error(&document, fault)),
            None => Err(missing_outcome(&document, parsed.error)),
        }
    }

    /// Validate `number` and append it to the recipients (or the rejected list).
    pub fn add_recipient(&mut self, number: impl AsRef<str>) -> &mut Self {
        self.recipients.push(&*self.validator, number.as_ref());
        self
    }

    /// Validate and append several numbers, keeping their order.
    pub fn add_recipients<I>(&mut self, numbers: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for number in numbers {
            self.add_recipient(number);
        }
        self
    }

    /// Drop every accepted and rejected recipient.
    pub fn clear_recipients(&mut self) -> &mut Self {
        self.recipients.clear();
        self
    }

    pub fn set_message(&mut self, text: MessageText) -> &mut Self {
        self.message = Some(text);
        self
    }

    pub fn set_sender(&mut self, sender: SenderId) -> &mut Self {
        self.options.from = Some(sender);
        self
    }

    pub fn set_message_id(&mut self, id: ClientMessageId) -> &mut Self {
        self.options.client_message_id = Some(id);
        self
    }

    /// Ask the gateway to hold the message for `delay` before delivery.
    pub fn set_delay(&mut self, delay: impl Into<DelayMinutes>) -> &mut Self {
        self.options.delay = Some(delay.into());
        self
    }

    /// Drop the message if it is still queued on the gateway after `period`.
    pub fn set_validity_period(&mut self, period: impl Into<ValidityMinutes>) -> &mut Self {
        self.options.validity = Some(period.into());
        self
    }

    /// Build the `sendMsg` document for the current session, recipients and message.
    ///
    /// Requires a held session, message text and at least one accepted recipient.
    pub fn build_send_document(&self) -> Result<Document, ValidationError> {
        let session_id = self.session_id.as_ref().ok_or(ValidationError::Empty {
            field: SessionId::FIELD,
        })?;
        let text = self.message.as_ref().ok_or(ValidationError::Empty {
            field: MessageText::FIELD,
        })?;
        Document::send_msg(session_id, self.recipients.accepted(), text, &self.options)
    }

    /// Send the message to every accepted recipient in one request.
    ///
    /// Authenticates first when no session is held. An empty recipient list or missing
    /// text fails with [`ClickatellError::Validation`] before any request is made. If any
    /// record comes back with a fault the whole send fails with
    /// [`ClickatellError::SendFailed`]; an answer with a different number of records
    /// than were sent fails with [`ClickatellError::ResponseParse`].
    pub async fn send_messages(&mut self) -> Result<Vec<ApiMessageId>, ClickatellError> {
        if self.recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            }
            .into());
        }
        if self.message.is_none() {
            return Err(ValidationError::Empty {
                field: MessageText::FIELD,
            }
            .into());
        }

        self.ensure_session().await?;
        let document = self.build_send_document()?;
        let parsed = self.send_query(&document).await?;

        if parsed.send_msg.is_empty() {
            return Err(missing_outcome(&document, parsed.error));
        }

        let total = parsed.send_msg.len();
        let mut ids = Vec::with_capacity(total);
        let mut faults = Vec::new();
        for outcome in parsed.send_msg {
            match outcome {
                Outcome::Ok(id) => ids.push(id),
                Outcome::Fault(fault) => faults.push(fault),
            }
        }

        let failed = faults.len();
        if let Some(fault) = faults.into_iter().next() {
            tracing::warn!(%fault, failed, total, "gateway rejected sendMsg records");
            return Err(ClickatellError::SendFailed {
                fault,
                failed,
                total,
            });
        }

        if ids.len() != document.len() {
            return Err(ClickatellError::ResponseParse(Box::new(transport::record_count(
                transport::response_element(document.kind()),
                document.len(),
                ids.len(),
            ))));
        }

        tracing::debug!(sent = ids.len(), "messages accepted by gateway");
        Ok(ids)
    }

    /// Query the account balance, authenticating first when no session is held.
    ///
    /// A successful answer replaces the cached [`ClickatellClient::balance`]; a fault
    /// leaves it as it was.
    pub async fn get_balance(&mut self) -> Result<Balance, ClickatellError> {
        let session_id = self.ensure_session().await?;
        let document = Document::GetBalance { session_id };
        let parsed = self.send_query(&document).await?;

        match parsed.balance {
            Some(Outcome::Ok(balance)) => {
                self.balance = Some(balance.clone());
                Ok(balance)
            }
            Some(Outcome::Fault(fault)) => Err(fault_error(&document, fault)),
            None => Err(missing_outcome(&document, parsed.error)),
        }
    }

    /// Post `document` to the gateway and parse the answer.
    ///
    /// Gateway faults are returned inside [`ParsedResponse`], not as errors. The
    /// serialized request and the raw response body are kept for
    /// [`ClickatellClient::last_request_xml`] and [`ClickatellClient::last_response`].
    pub async fn send_query(
        &mut self,
        document: &Document,
    ) -> Result<ParsedResponse, ClickatellError> {
        let xml = transport::encode_document(document)
            .map_err(|err| ClickatellError::Encode(Box::new(err)))?;

        tracing::debug!(
            endpoint = %self.api_url,
            request = document.kind(),
            records = document.len(),
            "sending clickAPI query"
        );

        self.last_request_xml = Some(xml.clone());
        self.last_response = None;

        let response = self
            .http
            .post_form(&self.api_url, transport::encode_query_form(&xml))
            .await
            .map_err(ClickatellError::Transport)?;

        self.last_response = Some(response.body.clone());

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(ClickatellError::HttpStatus {
                status: response.status,
                body,
            });
        }

        transport::decode_response(&response.body)
            .map_err(|err| ClickatellError::ResponseParse(Box::new(err)))
    }

    async fn ensure_session(&mut self) -> Result<SessionId, ClickatellError> {
        if let Some(session_id) = &self.session_id {
            return Ok(session_id.clone());
        }
        self.authenticate().await
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Accepted recipients in dispatch order.
    pub fn recipients(&self) -> &[PhoneNumber] {
        self.recipients.accepted()
    }

    /// Inputs the validator refused, in the order they were added.
    pub fn rejected_recipients(&self) -> &[RejectedRecipient] {
        self.recipients.rejected()
    }

    pub fn message(&self) -> Option<&MessageText> {
        self.message.as_ref()
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }

    /// Balance from the last successful [`ClickatellClient::get_balance`].
    pub fn balance(&self) -> Option<&Balance> {
        self.balance.as_ref()
    }

    /// XML of the last request sent (or attempted).
    pub fn last_request_xml(&self) -> Option<&str> {
        self.last_request_xml.as_deref()
    }

    /// Raw body of the last response; `None` if the last request never got one.
    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

fn fault_error(document: &Document, fault: Fault) -> ClickatellError {
    tracing::warn!(request = document.kind(), %fault, "gateway reported a fault");
    match document {
        Document::Auth(_) => ClickatellError::AuthenticationFailed { fault },
        Document::GetBalance { .. } => ClickatellError::BalanceQueryFailed { fault },
        Document::SendMsg(records) => ClickatellError::SendFailed {
            fault,
            failed: records.len(),
            total: records.len(),
        },
    }
}

/// The expected response node is absent: either the whole request was rejected
/// (`xmlErrorResp`) or the body is not an answer to this request.
fn missing_outcome(document: &Document, error: Option<Fault>) -> ClickatellError {
    match error {
        Some(fault) => fault_error(document, fault),
        None => ClickatellError::ResponseParse(Box::new(transport::missing_node(
            transport::response_element(document.kind()),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::domain::PatternValidator;

    use super::*;

    const AUTH_OK: &str =
        "<?xml version=\"1.0\"?>\n<clickAPI><authResp><session_id>abc123</session_id></authResp></clickAPI>";
    const AUTH_FAULT: &str =
        "<clickAPI><authResp><fault>001, Authentication failed</fault></authResp></clickAPI>";

    #[derive(Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    struct FakeTransportState {
        requests: Vec<(String, Vec<(String, String)>)>,
        responses: VecDeque<(u16, String)>,
    }

    impl FakeTransport {
        fn new(responses: &[(u16, &str)]) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    responses: responses
                        .iter()
                        .map(|(status, body)| (*status, (*body).to_owned()))
                        .collect(),
                })),
            }
        }

        fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.state.lock().unwrap().requests.clone()
        }

        fn sent_xml(&self, index: usize) -> String {
            let requests = self.requests();
            let (_, params) = &requests[index];
            assert_eq!(params.len(), 1, "unexpected form params: {params:?}");
            assert_eq!(params[0].0, "data");
            params[0].1.clone()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let next = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push((url.to_owned(), params));
                    state.responses.pop_front()
                };
                match next {
                    Some((status, body)) => Ok(HttpResponse { status, body }),
                    None => Err("connection refused".into()),
                }
            })
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("1234567", "username", "password").unwrap()
    }

    fn make_client(transport: FakeTransport) -> ClickatellClient {
        ClickatellClient::with_parts(
            credentials(),
            "https://example.invalid/xml/xml".to_owned(),
            Arc::new(transport),
            Arc::new(Permissive),
        )
    }

    #[tokio::test]
    async fn authenticate_stores_session_and_posts_data_form() {
        let transport = FakeTransport::new(&[(200, AUTH_OK)]);
        let mut client = make_client(transport.clone());

        let session = client.authenticate().await.unwrap();
        assert_eq!(session.as_str(), "abc123");
        assert_eq!(client.session_id(), Some(&session));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "https://example.invalid/xml/xml");

        let xml = transport.sent_xml(0);
        assert!(xml.contains(
            "<auth><api_id>1234567</api_id><user>username</user><password>password</password></auth>"
        ));
        assert_eq!(client.last_request_xml(), Some(xml.as_str()));
        assert_eq!(client.last_response(), Some(AUTH_OK));
    }

    #[tokio::test]
    async fn authenticate_fault_leaves_session_unset() {
        let transport = FakeTransport::new(&[(200, AUTH_FAULT)]);
        let mut client = make_client(transport);

        let err = client.authenticate().await.unwrap_err();
        match err {
            ClickatellError::AuthenticationFailed { fault } => {
                assert_eq!(fault.code(), Some("001"));
                assert_eq!(fault.description(), "Authentication failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(client.session_id(), None);
    }

    #[tokio::test]
    async fn send_messages_authenticates_lazily_then_sends_to_all_recipients() {
        let transport = FakeTransport::new(&[
            (200, AUTH_OK),
            (
                200,
                "<clickAPI><sendMsgResp><apiMsgId>id-1</apiMsgId></sendMsgResp>\
                 <sendMsgResp><apiMsgId>id-2</apiMsgId></sendMsgResp></clickAPI>",
            ),
        ]);
        let mut client = make_client(transport.clone());
        client
            .add_recipients(["0412345678", "0498765432"])
            .set_message(MessageText::new("Hello").unwrap())
            .set_sender(SenderId::new("Joe Bloggs").unwrap());

        let ids = client.send_messages().await.unwrap();
        let ids = ids.iter().map(ApiMessageId::as_str).collect::<Vec<_>>();
        assert_eq!(ids, ["id-1", "id-2"]);

        assert_eq!(transport.requests().len(), 2);
        let xml = transport.sent_xml(1);
        assert!(xml.contains(
            "<sendMsg><session_id>abc123</session_id><to>0412345678</to>\
             <text>Hello</text><from>Joe Bloggs</from></sendMsg>\
             <sendMsg><session_id>abc123</session_id><to>0498765432</to>"
        ));
        assert!(!xml.contains("deliv_time"));
        assert_eq!(client.last_request_xml(), Some(xml.as_str()));
    }

    #[tokio::test]
    async fn send_messages_reuses_held_session() {
        let transport = FakeTransport::new(&[
            (200, AUTH_OK),
            (200, "<clickAPI><sendMsgResp><apiMsgId>id-1</apiMsgId></sendMsgResp></clickAPI>"),
            (200, "<clickAPI><sendMsgResp><apiMsgId>id-2</apiMsgId></sendMsgResp></clickAPI>"),
        ]);
        let mut client = make_client(transport.clone());
        client
            .add_recipient("0412345678")
            .set_message(MessageText::new("Hello").unwrap());

        client.authenticate().await.unwrap();
        client.send_messages().await.unwrap();
        let ids = client.send_messages().await.unwrap();

        assert_eq!(ids, vec![ApiMessageId::new("id-2").unwrap()]);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn send_messages_requires_recipients_before_any_request() {
        let transport = FakeTransport::new(&[(200, AUTH_OK)]);
        let mut client = make_client(transport.clone());
        client.set_message(MessageText::new("Hello").unwrap());

        let err = client.send_messages().await.unwrap_err();
        assert!(matches!(
            err,
            ClickatellError::Validation(ValidationError::Empty { field: "to" })
        ));
        assert!(transport.requests().is_empty());
        assert_eq!(client.session_id(), None);
    }

    #[tokio::test]
    async fn send_messages_requires_text() {
        let transport = FakeTransport::new(&[]);
        let mut client = make_client(transport.clone());
        client.add_recipient("0412345678");

        let err = client.send_messages().await.unwrap_err();
        assert!(matches!(
            err,
            ClickatellError::Validation(ValidationError::Empty { field: "text" })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn send_messages_fails_whole_send_on_any_fault() {
        let transport = FakeTransport::new(&[
            (200, AUTH_OK),
            (
                200,
                "<clickAPI><sendMsgResp><apiMsgId>id-1</apiMsgId></sendMsgResp>\
                 <sendMsgResp><fault>105, Invalid Destination Address</fault></sendMsgResp></clickAPI>",
            ),
        ]);
        let mut client = make_client(transport);
        client
            .add_recipients(vec!["0412345678".to_owned(), "nope".to_owned()])
            .set_message(MessageText::new("Hello").unwrap());

        let err = client.send_messages().await.unwrap_err();
        match err {
            ClickatellError::SendFailed {
                fault,
                failed,
                total,
            } => {
                assert_eq!(fault.code(), Some("105"));
                assert_eq!((failed, total), (1, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_messages_rejects_short_answer() {
        let transport = FakeTransport::new(&[
            (200, AUTH_OK),
            (200, "<clickAPI><sendMsgResp><apiMsgId>id-1</apiMsgId></sendMsgResp></clickAPI>"),
        ]);
        let mut client = make_client(transport);
        client
            .add_recipients(["0412345678", "0498765432", "0411111111"])
            .set_message(MessageText::new("Hello").unwrap());

        let err = client.send_messages().await.unwrap_err();
        assert!(matches!(err, ClickatellError::ResponseParse(_)));
        assert_eq!(
            err.to_string(),
            "response parse error: expected 3 <sendMsgResp> records, got 1"
        );
    }

    #[tokio::test]
    async fn send_messages_reports_fault_before_count_mismatch() {
        let transport = FakeTransport::new(&[
            (200, AUTH_OK),
            (
                200,
                "<clickAPI><sendMsgResp><fault>114, Cannot route message</fault></sendMsgResp></clickAPI>",
            ),
        ]);
        let mut client = make_client(transport);
        client
            .add_recipients(["0412345678", "0498765432"])
            .set_message(MessageText::new("Hello").unwrap());

        let err = client.send_messages().await.unwrap_err();
        assert!(matches!(
            err,
            ClickatellError::SendFailed {
                failed: 1,
                total: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn send_messages_propagates_authentication_failure() {
        let transport = FakeTransport::new(&[(200, AUTH_FAULT)]);
        let mut client = make_client(transport.clone());
        client
            .add_recipient("0412345678")
            .set_message(MessageText::new("Hello").unwrap());

        let err = client.send_messages().await.unwrap_err();
        assert!(matches!(err, ClickatellError::AuthenticationFailed { .. }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn get_balance_caches_value_and_fault_keeps_cache() {
        let transport = FakeTransport::new(&[
            (200, AUTH_OK),
            (200, "<clickAPI><getBalanceResp><ok>10.00</ok></getBalanceResp></clickAPI>"),
            (
                200,
                "<clickAPI><getBalanceResp><fault>003, Session ID expired</fault></getBalanceResp></clickAPI>",
            ),
        ]);
        let mut client = make_client(transport.clone());

        let balance = client.get_balance().await.unwrap();
        assert_eq!(balance.as_str(), "10.00");
        assert!(
            transport
                .sent_xml(1)
                .contains("<getBalance><session_id>abc123</session_id></getBalance>")
        );

        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(err, ClickatellError::BalanceQueryFailed { .. }));
        assert_eq!(client.balance().map(Balance::as_str), Some("10.00"));
    }

    #[tokio::test]
    async fn document_level_fault_maps_to_operation_error() {
        let transport = FakeTransport::new(&[(
            200,
            "<clickAPI><xmlErrorResp><fault>Invalid request</fault></xmlErrorResp></clickAPI>",
        )]);
        let mut client = make_client(transport);

        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, ClickatellError::AuthenticationFailed { .. }));
    }

    #[tokio::test]
    async fn malformed_bodies_map_to_response_parse_error() {
        let transport = FakeTransport::new(&[
            (200, "<html><body>Service Unavailable</body></html>"),
            (200, "definitely not xml"),
        ]);
        let mut client = make_client(transport);

        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, ClickatellError::ResponseParse(_)));
        assert_eq!(err.to_string(), "response parse error: <clickAPI> is missing <authResp>");

        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, ClickatellError::ResponseParse(_)));
        assert_eq!(client.last_response(), Some("definitely not xml"));
        assert_eq!(client.session_id(), None);
    }

    #[tokio::test]
    async fn non_success_http_status_is_reported_with_body() {
        let transport = FakeTransport::new(&[(500, "oops"), (503, "   ")]);
        let mut client = make_client(transport);

        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(
            err,
            ClickatellError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
        assert_eq!(client.last_response(), Some("oops"));

        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(
            err,
            ClickatellError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn transport_failure_clears_last_response() {
        let transport = FakeTransport::new(&[(200, AUTH_OK)]);
        let mut client = make_client(transport);

        client.authenticate().await.unwrap();
        assert!(client.last_response().is_some());

        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(err, ClickatellError::Transport(_)));
        assert_eq!(client.last_response(), None);
        assert!(client.last_request_xml().unwrap().contains("<getBalance>"));
    }

    #[test]
    fn strict_validator_splits_accepted_and_rejected() {
        let mut client = make_client(FakeTransport::new(&[]));
        client.validator = Arc::new(PatternValidator::australian_mobile().unwrap());

        client
            .add_recipient("0412345678")
            .add_recipient("+61412 345 678")
            .add_recipient("0212345678");

        let accepted = client
            .recipients()
            .iter()
            .map(PhoneNumber::as_str)
            .collect::<Vec<_>>();
        assert_eq!(accepted, ["0412345678", "61412345678"]);
        assert_eq!(client.rejected_recipients().len(), 1);
        assert_eq!(client.rejected_recipients()[0].input, "0212345678");

        client.clear_recipients();
        assert!(client.recipients().is_empty());
        assert!(client.rejected_recipients().is_empty());
    }

    #[test]
    fn build_send_document_needs_session_and_carries_options() {
        let mut client = make_client(FakeTransport::new(&[]));
        client
            .add_recipient("0412345678")
            .set_message(MessageText::new("Hello").unwrap())
            .set_delay(15)
            .set_validity_period(60)
            .set_message_id(ClientMessageId::new("order-17").unwrap());

        assert_eq!(
            client.build_send_document().unwrap_err(),
            ValidationError::Empty {
                field: SessionId::FIELD
            }
        );

        client.session_id = Some(SessionId::new("abc123").unwrap());
        let Document::SendMsg(records) = client.build_send_document().unwrap() else {
            panic!("expected sendMsg document");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].to.as_str(), "0412345678");
        assert_eq!(records[0].options.delay, Some(DelayMinutes::new(15)));
        assert_eq!(records[0].options.validity, Some(ValidityMinutes::new(60)));
        assert_eq!(
            records[0]
                .options
                .client_message_id
                .as_ref()
                .map(ClientMessageId::as_str),
            Some("order-17")
        );
        assert_eq!(records[0].options.from, None);
    }

    #[test]
    fn builder_validates_and_applies_api_url() {
        let client = ClickatellClient::builder(credentials())
            .api_url("https://example.invalid/xml/xml")
            .timeout(Duration::from_secs(5))
            .user_agent("clickatell-tests")
            .build()
            .unwrap();
        assert_eq!(client.api_url(), "https://example.invalid/xml/xml");

        let client = ClickatellClient::new(credentials());
        assert_eq!(client.api_url(), DEFAULT_API_URL);

        for bad in ["not a url", "ftp://example.invalid/xml"] {
            let err = ClickatellClient::builder(credentials())
                .api_url(bad)
                .build()
                .err()
                .unwrap();
            assert!(matches!(
                err,
                ClickatellError::Validation(ValidationError::InvalidUrl { .. })
            ));
        }
    }

    #[test]
    fn builder_accepts_closure_validator() {
        let mut client = ClickatellClient::builder(credentials())
            .validator(|input: &str| PhoneNumber::new(input.replace(' ', "")))
            .build()
            .unwrap();

        client.add_recipient("0412 345 678");
        assert_eq!(client.recipients()[0].as_str(), "0412345678");
    }
}
