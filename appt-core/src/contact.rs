//! Contact detail validation.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+$").unwrap());

// Optional leading +, then 7 to 15 digits.
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("invalid email address {0:?}")]
    InvalidEmail(String),
    #[error("invalid phone number {0:?}")]
    InvalidPhone(String),
}

/// A validated phone/email pair, optionally with a name attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: Option<String>,
    pub phone: String,
    pub email: String,
}

impl Contact {
    /// Validates and builds a `Contact`. Surrounding whitespace is trimmed
    /// before validation.
    pub fn new(name: Option<&str>, phone: &str, email: &str) -> Result<Self, ContactError> {
        let phone = phone.trim();
        let email = email.trim();
        if !PHONE.is_match(phone) {
            return Err(ContactError::InvalidPhone(phone.to_string()));
        }
        if !EMAIL.is_match(email) {
            return Err(ContactError::InvalidEmail(email.to_string()));
        }
        Ok(Self {
            name: name.map(|n| n.trim().to_string()),
            phone: phone.to_string(),
            email: email.to_string(),
        })
    }
}
