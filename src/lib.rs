//! Typed Rust client for the Clickatell XML SMS gateway API.
//!
//! The crate has three layers: a domain layer of strong types (credentials, numbers,
//! request documents, parsed responses), a transport layer that owns the `clickAPI`
//! XML schema, and a small client layer that keeps the session and talks HTTP.
//!
//! ```rust,no_run
//! use clickatell::{ClickatellClient, Credentials, MessageText, PatternValidator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), clickatell::ClickatellError> {
//!     let credentials = Credentials::new("1234567", "username", "password")?;
//!     let mut client = ClickatellClient::builder(credentials)
//!         .validator(PatternValidator::australian_mobile()?)
//!         .build()?;
//!
//!     client
//!         .add_recipients(["0412345678", "+61412 345 678"])
//!         .set_message(MessageText::new("hello")?);
//!
//!     let ids = client.send_messages().await?;
//!     let balance = client.get_balance().await?;
//!     println!("sent {} message(s), balance {balance}", ids.len());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{ClickatellClient, ClickatellClientBuilder, ClickatellError, DEFAULT_API_URL};
pub use domain::{
    ApiId, ApiMessageId, Balance, ClientMessageId, Credentials, DelayMinutes, Document, Fault,
    MessageOptions, MessageText, Outcome, ParsedResponse, Password, PatternValidator, Permissive,
    PhoneNumber, RecipientList, RecipientValidator, RegionValidator, RejectedRecipient,
    SendMessage, SenderId, SessionId, Username, ValidationError, ValidityMinutes,
};
