//! The core `Booker` struct and its associated types, providing the primary API for interaction.

use anyhow::Result;
use chrono::NaiveDate;
use thiserror::Error;

use crate::config::Config;
use crate::contact::{Contact, ContactError};
use crate::resolver::{DateUnresolved, ResolveOptions, resolve};

/// A confirmed appointment: a resolved calendar date plus validated contact
/// details. Carries no time-of-day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub date: NaiveDate,
    pub contact: Contact,
}

/// Why a booking was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error(transparent)]
    Date(#[from] DateUnresolved),
    #[error(transparent)]
    Contact(#[from] ContactError),
}

/// The central struct for all booking operations.
///
/// A `Booker` holds the configuration and threads its accepted input date
/// formats into every resolution.
#[derive(Debug)]
pub struct Booker {
    pub config: Config,
}

impl Booker {
    /// Creates a new `Booker`, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: Config::load()?,
        })
    }

    /// Creates a new `Booker` with a specific `Config`.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Resolves a free-text date expression using the configured input formats.
    ///
    /// # Arguments
    ///
    /// * `text` - the user's date expression (eg 'next friday').
    /// * `anchor` - Optional date to treat as "today"; defaults to the current
    ///   local date.
    pub fn resolve_date(
        &self,
        text: &str,
        anchor: Option<NaiveDate>,
    ) -> Result<NaiveDate, DateUnresolved> {
        let format_strs: Vec<&str> = self
            .config
            .input_date_formats
            .iter()
            .map(AsRef::as_ref)
            .collect();
        let opts = ResolveOptions {
            anchor,
            formats: Some(&format_strs),
        };
        resolve(text, Some(opts))
    }

    /// Books an appointment from a date expression and contact details.
    ///
    /// The date is resolved first, then the contact is validated; the first
    /// failure is returned. Nothing is persisted, the caller owns the result.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::NaiveDate;
    /// # use appt_core::{Booker, Config};
    /// let booker = Booker::with_config(Config::default());
    /// let anchor = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(); // a Friday
    ///
    /// let appointment = booker
    ///     .book("next monday", "7654321", "ada@example.com", Some(anchor))
    ///     .unwrap();
    ///
    /// assert_eq!(appointment.date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    /// ```
    pub fn book(
        &self,
        date_text: &str,
        phone: &str,
        email: &str,
        anchor: Option<NaiveDate>,
    ) -> Result<Appointment, BookingError> {
        let date = self.resolve_date(date_text, anchor)?;
        let contact = Contact::new(None, phone, email)?;
        Ok(Appointment { date, contact })
    }
}
