//! Pure text rendering helpers.
//!
//! Resolved line: `2024-06-14 - Friday, 14 Jun 2024`
//! Confirmation block:
//!   Appointment booked for Friday, 14 Jun 2024 (2024-06-14)
//!
//!   Phone: ...
//!   Email: ...

use chrono::NaiveDate;

use crate::booking::Appointment;

/// The normalized `YYYY-MM-DD` form every resolved date is reported in.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a date according to the user's configuration.
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    date.format(date_format).to_string()
}

/// Render a booked-appointment confirmation block.
pub fn format_confirmation(appointment: &Appointment, date_format: &str) -> String {
    let display = format_date(appointment.date, date_format);
    let iso = format_iso(appointment.date);
    format!(
        "Appointment booked for {display} ({iso})\n\nPhone: {}\nEmail: {}\n",
        appointment.contact.phone, appointment.contact.email
    )
}
