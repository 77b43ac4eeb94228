use regex::Regex;

use crate::domain::validation::ValidationError;
use crate::domain::value::PhoneNumber;

/// Decides whether a caller-supplied number may be sent to, and in which form.
///
/// Implemented for any `Fn(&str) -> Result<PhoneNumber, ValidationError>`, so ad-hoc
/// policies can be plugged in without a new type.
pub trait RecipientValidator: Send + Sync {
    fn validate(&self, input: &str) -> Result<PhoneNumber, ValidationError>;
}

impl<F> RecipientValidator for F
where
    F: Fn(&str) -> Result<PhoneNumber, ValidationError> + Send + Sync,
{
    fn validate(&self, input: &str) -> Result<PhoneNumber, ValidationError> {
        self(input)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Accepts every non-blank number unmodified.
pub struct Permissive;

impl RecipientValidator for Permissive {
    fn validate(&self, input: &str) -> Result<PhoneNumber, ValidationError> {
        PhoneNumber::new(input)
    }
}

#[derive(Debug, Clone)]
/// Strips every non-digit character, then accepts the digits only if they match `pattern`.
pub struct PatternValidator {
    pattern: Regex,
}

impl PatternValidator {
    /// Australian mobile shape: optional `61` or `0`, then `4`, then eight digits.
    pub const AUSTRALIAN_MOBILE: &'static str = r"^(?:61|0)?4\d{8}$";

    /// Build a validator from a regex applied to the digit-only form of each number.
    pub fn new(pattern: &str) -> Result<Self, ValidationError> {
        let pattern = Regex::new(pattern).map_err(|err| ValidationError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: err.to_string(),
        })?;
        Ok(Self { pattern })
    }

    pub fn australian_mobile() -> Result<Self, ValidationError> {
        Self::new(Self::AUSTRALIAN_MOBILE)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl RecipientValidator for PatternValidator {
    fn validate(&self, input: &str) -> Result<PhoneNumber, ValidationError> {
        let digits = input
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();
        if !self.pattern.is_match(&digits) {
            return Err(ValidationError::InvalidPhoneNumber {
                input: input.to_owned(),
            });
        }
        PhoneNumber::new(digits)
    }
}

#[derive(Debug, Clone)]
/// Parses numbers with `phonenumber` against a default region and keeps only valid ones.
///
/// Accepted numbers are normalized to international digits without the leading `+`,
/// which is the form the gateway expects in `to`.
pub struct RegionValidator {
    region: phonenumber::country::Id,
}

impl RegionValidator {
    pub fn new(region: phonenumber::country::Id) -> Self {
        Self { region }
    }
}

impl RecipientValidator for RegionValidator {
    fn validate(&self, input: &str) -> Result<PhoneNumber, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            });
        }

        let invalid = || ValidationError::InvalidPhoneNumber {
            input: input.to_owned(),
        };
        let parsed = phonenumber::parse(Some(self.region), trimmed).map_err(|_| invalid())?;
        if !phonenumber::is_valid(&parsed) {
            return Err(invalid());
        }

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        PhoneNumber::new(e164.trim_start_matches('+'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A number the active validator refused, with the reason.
pub struct RejectedRecipient {
    pub input: String,
    pub reason: ValidationError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered recipients: accepted numbers (dispatch order) and rejected inputs.
pub struct RecipientList {
    accepted: Vec<PhoneNumber>,
    rejected: Vec<RejectedRecipient>,
}

impl RecipientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `input` through `validator` and append it to the accepted or rejected list.
    ///
    /// Returns `true` when the number was accepted.
    pub fn push(&mut self, validator: &dyn RecipientValidator, input: &str) -> bool {
        match validator.validate(input) {
            Ok(number) => {
                self.accepted.push(number);
                true
            }
            Err(reason) => {
                tracing::debug!(%reason, "recipient rejected");
                self.rejected.push(RejectedRecipient {
                    input: input.to_owned(),
                    reason,
                });
                false
            }
        }
    }

    pub fn accepted(&self) -> &[PhoneNumber] {
        &self.accepted
    }

    pub fn rejected(&self) -> &[RejectedRecipient] {
        &self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn clear(&mut self) {
        self.accepted.clear();
        self.rejected.clear();
    }
}
