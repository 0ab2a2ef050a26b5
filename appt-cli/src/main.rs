mod render;

use anyhow::{Context, Result};
use appt_core::Booker;
use appt_core::render::{format_date, format_iso};
use clap::Parser;
use render::{ColorMode, RenderOptions, Renderer};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

/// appt — Book appointments from plain-English dates
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Book an appointment instead of only resolving the date.
    /// Requires --phone and --email.
    #[arg(long)]
    book: bool,
    /// Phone number for the booking (7-15 digits, optional leading +).
    #[arg(long, requires = "book")]
    phone: Option<String>,
    /// Email address for the booking.
    #[arg(long, requires = "book")]
    email: Option<String>,
    /// Date treated as "today" when resolving relative expressions.
    /// Accepts anything the resolver does (e.g. `--anchor 2024-06-07`).
    #[arg(long)]
    anchor: Option<String>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, env = "APPT_COLOR", default_value_t = ColorMode::Auto)]
    color: ColorMode,
    /// Free text date expression (e.g., `appt next friday`).
    #[arg(required = true)]
    text: Vec<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("appt: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let booker = Booker::new()?;

    let use_color = match cli.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                false
            } else {
                io::stdout().is_terminal()
            }
        }
    };
    let renderer = Renderer::new(Some(RenderOptions { use_color }));

    let anchor = match cli.anchor.as_deref() {
        Some(text) => Some(booker.resolve_date(text, None)?),
        None => None,
    };
    let text = cli.text.join(" ");

    // Booking mode
    if cli.book {
        let phone = cli.phone.as_deref().context("--book requires --phone")?;
        let email = cli.email.as_deref().context("--book requires --email")?;
        let appointment = booker.book(&text, phone, email, anchor)?;
        let md = format!(
            "# Appointment booked\n\n* Date: **{}** ({})\n* Phone: {}\n* Email: {}\n",
            format_date(appointment.date, &booker.config.date_format),
            format_iso(appointment.date),
            appointment.contact.phone,
            appointment.contact.email,
        );
        renderer.print_block(&md);
        return Ok(());
    }

    // Resolve mode (default)
    let date = booker.resolve_date(&text, anchor)?;
    renderer.print_resolved(&format_iso(date), &format_date(date, &booker.config.date_format));
    Ok(())
}
