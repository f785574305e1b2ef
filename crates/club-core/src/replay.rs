//! Whole-day replay: the dispatch loop, closure processing, and report.

use std::fmt::Write;

use chrono::NaiveTime;
use serde::Serialize;

use crate::event::{Event, ReportLine};
use crate::types::clock;
use crate::venue::{TableSummary, Venue, VenueConfig};

/// The complete, ordered output of one replayed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(serialize_with = "clock::serialize")]
    pub open: NaiveTime,
    #[serde(serialize_with = "clock::serialize")]
    pub close: NaiveTime,
    /// Echo, diagnostic, promotion, and forced-leave lines in emission order.
    pub log: Vec<ReportLine>,
    pub tables: Vec<TableSummary>,
}

impl Report {
    /// Renders the report in the line-oriented text protocol: open time,
    /// the event log, the close time, then one summary line per table.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.open.format(clock::FORMAT));
        for line in &self.log {
            let _ = writeln!(out, "{line}");
        }
        let _ = writeln!(out, "{}", self.close.format(clock::FORMAT));
        for summary in &self.tables {
            let _ = writeln!(
                out,
                "{} {} {}",
                summary.table, summary.revenue, summary.occupied
            );
        }
        out
    }
}

/// Replays a validated, time-ordered day log against a fresh venue.
#[must_use]
pub fn replay(config: VenueConfig, events: &[Event]) -> Report {
    let mut venue = Venue::new(config);
    let mut log = Vec::new();
    for event in events {
        log.extend(venue.dispatch(event));
    }
    log.extend(venue.close_up());
    Report {
        open: config.open(),
        close: config.close(),
        log,
        tables: venue.summaries(),
    }
}
