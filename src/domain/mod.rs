//! Domain layer: strong types with validation and invariants (no I/O).

mod recipient;
mod request;
mod response;
mod validation;
mod value;

pub use recipient::{
    PatternValidator, Permissive, RecipientList, RecipientValidator, RegionValidator,
    RejectedRecipient,
};
pub use request::{Credentials, Document, MessageOptions, SendMessage};
pub use response::{Outcome, ParsedResponse};
pub use validation::ValidationError;
pub use value::{
    ApiId, ApiMessageId, Balance, ClientMessageId, DelayMinutes, Fault, MessageText, Password,
    PhoneNumber, SenderId, SessionId, Username, ValidityMinutes,
};
