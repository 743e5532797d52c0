use colored::Colorize;
use std::fmt;
use std::io::{self, Write};

use cashcast_domain::{AccountSnapshot, ForecastEvent, ForecastResult};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Section,
}

#[derive(Clone, Copy, Debug)]
pub struct OutputPreferences {
    pub color: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self { color: true }
    }
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[ok]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Section => ("INFO", ""),
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => {
            let (label, icon) = build_label(kind);
            format!("{label}: {icon} {text}")
        }
    };

    if !prefs.color {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(
    out: &mut dyn Write,
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> io::Result<()> {
    let formatted = apply_style(kind, message, prefs);
    match kind {
        MessageKind::Section => writeln!(out, "\n{}", formatted),
        _ => writeln!(out, "{}", formatted),
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Writes the per-day balance table, marking days below the buffer.
pub fn render_balances(
    out: &mut dyn Write,
    account: &AccountSnapshot,
    result: &ForecastResult,
    prefs: &OutputPreferences,
) -> io::Result<()> {
    print(
        out,
        MessageKind::Section,
        format!(
            "Forecast for {} ({} to {})",
            account.name, result.today, result.end_date
        ),
        prefs,
    )?;
    writeln!(out, "{:<12}{:>14}", "DATE", "BALANCE")?;
    for (date, balance) in &result.balances {
        let value = format!("{:>14}", format_amount(*balance));
        if *balance < result.buffer_amount {
            let value = if prefs.color {
                value.bright_red().to_string()
            } else {
                value
            };
            writeln!(out, "{:<12}{} [!]", date.to_string(), value)?;
        } else {
            writeln!(out, "{:<12}{}", date.to_string(), value)?;
        }
    }
    if let Some((date, balance)) = result.lowest_balance() {
        print(
            out,
            MessageKind::Info,
            format!("Lowest balance {} on {}", format_amount(balance), date),
            prefs,
        )?;
    }
    Ok(())
}

pub fn render_alerts(
    out: &mut dyn Write,
    result: &ForecastResult,
    prefs: &OutputPreferences,
) -> io::Result<()> {
    if result.alerts.is_empty() {
        return print(
            out,
            MessageKind::Success,
            format!(
                "Balance stays at or above {} through {}",
                format_amount(result.buffer_amount),
                result.end_date
            ),
            prefs,
        );
    }
    print(
        out,
        MessageKind::Warning,
        format!(
            "{} day(s) below buffer {}",
            result.alerts.len(),
            format_amount(result.buffer_amount)
        ),
        prefs,
    )?;
    for date in &result.alerts {
        writeln!(out, "{date}")?;
    }
    Ok(())
}

pub fn render_events(
    out: &mut dyn Write,
    events: &[ForecastEvent],
    prefs: &OutputPreferences,
) -> io::Result<()> {
    print(out, MessageKind::Section, "Scheduled events", prefs)?;
    if events.is_empty() {
        return writeln!(out, "(none)");
    }
    for event in events {
        let note = match (event.skipped, event.overridden) {
            (true, _) => " (skipped)",
            (false, true) => " (overridden)",
            _ => "",
        };
        writeln!(
            out,
            "{:<12}{:<13}{:<24}{:>12}{}",
            event.date.to_string(),
            event.kind.to_string(),
            event.name,
            format_amount(event.amount),
            note
        )?;
    }
    Ok(())
}
