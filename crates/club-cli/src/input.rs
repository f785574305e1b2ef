//! Day-log parsing and validation.
//!
//! Any malformed line aborts the whole run. The error's `Display` is the
//! offending raw line, which the binary prints before exiting non-zero.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chrono::NaiveTime;
use thiserror::Error;

use club_core::types::clock;
use club_core::{ClientName, ConfigError, Event, VenueConfig, code};

/// Fatal input errors (tier-1 of the error model).
#[derive(Debug, Error)]
pub enum InputError {
    /// Header or event line that failed validation; displays verbatim.
    #[error("{0}")]
    Malformed(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A parsed day log: immutable venue header plus time-ordered actions.
#[derive(Debug, Clone)]
pub struct DayLog {
    pub config: VenueConfig,
    pub events: Vec<Event>,
}

/// Reads and validates a day-log file.
pub fn parse_log(path: &Path) -> Result<DayLog, InputError> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

fn parse_reader(reader: impl BufRead) -> Result<DayLog, InputError> {
    let mut lines = reader.lines();

    let tables_line = next_line(&mut lines)?;
    let table_count = tables_line
        .parse::<usize>()
        .map_err(|_| malformed(&tables_line))?;

    let hours_line = next_line(&mut lines)?;
    let (open, close) = parse_hours(&hours_line).ok_or_else(|| malformed(&hours_line))?;

    let price_line = next_line(&mut lines)?;
    let hourly_rate = price_line
        .parse::<i64>()
        .map_err(|_| malformed(&price_line))?;

    let config = VenueConfig::new(table_count, open, close, hourly_rate).map_err(|err| {
        let line = match err {
            ConfigError::NoTables => tables_line,
            ConfigError::ClosesBeforeOpen { .. } => hours_line,
            ConfigError::NegativeRate { .. } => price_line,
        };
        InputError::Malformed(line)
    })?;
    tracing::debug!(
        tables = config.table_count(),
        open = %config.open(),
        close = %config.close(),
        rate = config.hourly_rate(),
        "parsed header"
    );

    let mut events = Vec::new();
    let mut last_time: Option<NaiveTime> = None;
    for line in lines {
        let line = chomp(line?);
        let event = parse_event(&line).ok_or_else(|| malformed(&line))?;
        // Timestamps must be non-decreasing across the whole log.
        if last_time.is_some_and(|prev| event.time < prev) {
            return Err(malformed(&line));
        }
        last_time = Some(event.time);
        events.push(event);
    }
    Ok(DayLog { config, events })
}

/// Parses `HH:MM <code> <client> [args…]`.
///
/// Seat actions additionally require the table argument token. Unknown
/// codes pass through so the dispatcher can diagnose them per-event
/// instead of the whole run aborting.
fn parse_event(line: &str) -> Option<Event> {
    let mut parts = line.split(' ');
    let time = parse_clock(parts.next()?)?;
    let code = parts.next()?.parse::<i32>().ok()?;
    let client = ClientName::new(parts.next()?).ok()?;
    let extra: Vec<String> = parts.map(str::to_string).collect();
    if code == code::SEAT && extra.is_empty() {
        return None;
    }
    Some(Event {
        time,
        code,
        client,
        extra,
    })
}

fn parse_hours(line: &str) -> Option<(NaiveTime, NaiveTime)> {
    let mut parts = line.split_whitespace();
    let open = parse_clock(parts.next()?)?;
    let close = parse_clock(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((open, close))
}

fn parse_clock(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, clock::FORMAT).ok()
}

fn next_line(lines: &mut io::Lines<impl BufRead>) -> Result<String, InputError> {
    match lines.next() {
        Some(line) => Ok(chomp(line?)),
        None => Err(InputError::Malformed(String::new())),
    }
}

/// Tolerates CRLF input the way a line scanner would.
fn chomp(line: String) -> String {
    match line.strip_suffix('\r') {
        Some(stripped) => stripped.to_string(),
        None => line,
    }
}

fn malformed(line: &str) -> InputError {
    InputError::Malformed(line.to_string())
}
