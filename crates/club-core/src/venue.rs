//! The club state machine: table ledger, client directory, wait queue.

use std::collections::{BTreeMap, VecDeque};

use chrono::NaiveTime;
use serde::Serialize;
use thiserror::Error;

use crate::billing;
use crate::event::{Event, Rejection, ReportLine, code};
use crate::types::{ClientName, ClockTime};

/// Errors for an impossible venue header.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("table count must be at least 1")]
    NoTables,
    #[error("close time {close} is before open time {open}")]
    ClosesBeforeOpen { open: NaiveTime, close: NaiveTime },
    #[error("hourly rate cannot be negative: {rate}")]
    NegativeRate { rate: i64 },
}

/// Immutable venue header: table count, operating hours, hourly price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VenueConfig {
    table_count: usize,
    open: NaiveTime,
    close: NaiveTime,
    hourly_rate: i64,
}

impl VenueConfig {
    pub fn new(
        table_count: usize,
        open: NaiveTime,
        close: NaiveTime,
        hourly_rate: i64,
    ) -> Result<Self, ConfigError> {
        if table_count == 0 {
            return Err(ConfigError::NoTables);
        }
        if close < open {
            return Err(ConfigError::ClosesBeforeOpen { open, close });
        }
        if hourly_rate < 0 {
            return Err(ConfigError::NegativeRate { rate: hourly_rate });
        }
        Ok(Self {
            table_count,
            open,
            close,
            hourly_rate,
        })
    }

    #[must_use]
    pub const fn table_count(&self) -> usize {
        self.table_count
    }

    #[must_use]
    pub const fn open(&self) -> NaiveTime {
        self.open
    }

    #[must_use]
    pub const fn close(&self) -> NaiveTime {
        self.close
    }

    #[must_use]
    pub const fn hourly_rate(&self) -> i64 {
        self.hourly_rate
    }
}

/// Where a client currently is within the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Inside, not holding a table.
    Unseated,
    /// Holding the given 1-based table.
    Seated(usize),
}

/// An in-progress table occupation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Session {
    client: ClientName,
    since: NaiveTime,
}

/// Per-table ledger record.
#[derive(Debug, Clone, Default)]
struct Table {
    session: Option<Session>,
    revenue: i64,
    occupied_minutes: i64,
}

/// End-of-day totals for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// 1-based table number.
    pub table: usize,
    pub revenue: i64,
    pub occupied: ClockTime,
}

/// The venue's whole mutable state, threaded through every operation.
///
/// Invariants: a table holds at most one client, a client holds at most one
/// table, and queue members are always present and unseated.
#[derive(Debug, Clone)]
pub struct Venue {
    config: VenueConfig,
    tables: Vec<Table>,
    clients: BTreeMap<ClientName, Presence>,
    queue: VecDeque<ClientName>,
}

impl Venue {
    #[must_use]
    pub fn new(config: VenueConfig) -> Self {
        Self {
            config,
            tables: vec![Table::default(); config.table_count()],
            clients: BTreeMap::new(),
            queue: VecDeque::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &VenueConfig {
        &self.config
    }

    /// Applies one input action, returning the lines it produced in order.
    ///
    /// Known codes are echoed before their handler runs; an unknown code
    /// yields only the diagnostic.
    pub fn dispatch(&mut self, event: &Event) -> Vec<ReportLine> {
        let mut log = Vec::new();
        if matches!(
            event.code,
            code::ARRIVE | code::SEAT | code::WAIT | code::LEAVE
        ) {
            log.push(ReportLine::Echo(event.clone()));
        }
        match event.code {
            code::ARRIVE => self.arrive(event, &mut log),
            code::SEAT => self.take_seat(event, &mut log),
            code::WAIT => self.wait(event, &mut log),
            code::LEAVE => self.leave(event, &mut log),
            other => {
                tracing::debug!(code = other, "unknown action code");
                log.push(reject(event.time, Rejection::BadEventCode));
            }
        }
        log
    }

    fn arrive(&mut self, event: &Event, log: &mut Vec<ReportLine>) {
        if self.clients.contains_key(&event.client) {
            log.push(reject(event.time, Rejection::AlreadyInside));
            return;
        }
        if event.time < self.config.open || event.time > self.config.close {
            log.push(reject(event.time, Rejection::NotOpenYet));
            return;
        }
        self.clients.insert(event.client.clone(), Presence::Unseated);
    }

    fn take_seat(&mut self, event: &Event, log: &mut Vec<ReportLine>) {
        let table = event
            .arg()
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|n| (1..=self.tables.len()).contains(n));
        let Some(table) = table else {
            log.push(reject(event.time, Rejection::BadTableNumber));
            return;
        };
        let Some(presence) = self.clients.get(&event.client).copied() else {
            log.push(reject(event.time, Rejection::UnknownClient));
            return;
        };
        // An occupied table is busy even for the client who holds it.
        if self.tables[table - 1].session.is_some() {
            log.push(reject(event.time, Rejection::TableBusy));
            return;
        }
        // Changing tables frees the old one, which can promote a queued
        // client into it.
        if let Presence::Seated(previous) = presence {
            self.vacate(previous, event.time, log);
        }
        self.seat(event.client.clone(), table, event.time);
    }

    fn wait(&mut self, event: &Event, log: &mut Vec<ReportLine>) {
        if !self.clients.contains_key(&event.client) {
            log.push(reject(event.time, Rejection::UnknownClient));
            return;
        }
        if self.tables.iter().any(|table| table.session.is_none()) {
            log.push(reject(event.time, Rejection::NeedlessWait));
            return;
        }
        if self.queue.len() >= self.tables.len() {
            // Full queue: the client is turned away with a forced-leave
            // notice, though their directory entry survives.
            log.push(ReportLine::ForcedOut {
                time: event.time,
                client: event.client.clone(),
            });
            return;
        }
        self.queue.push_back(event.client.clone());
    }

    fn leave(&mut self, event: &Event, log: &mut Vec<ReportLine>) {
        let Some(presence) = self.clients.get(&event.client).copied() else {
            log.push(reject(event.time, Rejection::UnknownClient));
            return;
        };
        if let Presence::Seated(table) = presence {
            self.vacate(table, event.time, log);
        }
        self.clients.remove(&event.client);
    }

    /// Forces every remaining client out at closing time, in name order.
    ///
    /// Directory and queue are empty afterwards; queued clients that never
    /// got a table produce a notice but no billing.
    pub fn close_up(&mut self) -> Vec<ReportLine> {
        let mut log = Vec::new();
        let close = self.config.close;
        for (client, presence) in std::mem::take(&mut self.clients) {
            log.push(ReportLine::ForcedOut {
                time: close,
                client,
            });
            if let Presence::Seated(table) = presence {
                self.vacate(table, close, &mut log);
            }
        }
        self.queue.clear();
        log
    }

    /// Per-table revenue and occupancy totals, in table order.
    #[must_use]
    pub fn summaries(&self) -> Vec<TableSummary> {
        self.tables
            .iter()
            .enumerate()
            .map(|(idx, table)| TableSummary {
                table: idx + 1,
                revenue: table.revenue,
                occupied: ClockTime::from_minutes(table.occupied_minutes),
            })
            .collect()
    }

    fn seat(&mut self, client: ClientName, table: usize, at: NaiveTime) {
        self.clients.insert(client.clone(), Presence::Seated(table));
        self.tables[table - 1].session = Some(Session { client, since: at });
    }

    /// Frees a table, billing the finished session, then offers it to the
    /// queue head.
    fn vacate(&mut self, table: usize, at: NaiveTime, log: &mut Vec<ReportLine>) {
        self.settle(table, at);
        self.promote(table, at, log);
    }

    fn settle(&mut self, table: usize, at: NaiveTime) {
        let slot = &mut self.tables[table - 1];
        let Some(session) = slot.session.take() else {
            return;
        };
        let bill = billing::charge(session.since, at, self.config.hourly_rate);
        slot.revenue += bill.amount;
        slot.occupied_minutes += bill.minutes;
        tracing::debug!(
            table,
            client = %session.client,
            amount = bill.amount,
            minutes = bill.minutes,
            "table settled"
        );
    }

    /// Seats the queue head at a freed table, unless the day is ending.
    ///
    /// The guard is a literal timestamp equality with the close time, so a
    /// departure landing exactly on it also suppresses the promotion.
    /// Entries whose client has since departed are dropped silently.
    fn promote(&mut self, table: usize, at: NaiveTime, log: &mut Vec<ReportLine>) {
        if at == self.config.close {
            return;
        }
        while let Some(next) = self.queue.pop_front() {
            if self.clients.get(&next) != Some(&Presence::Unseated) {
                tracing::debug!(client = %next, "dropping stale queue entry");
                continue;
            }
            log.push(ReportLine::Promoted {
                time: at,
                client: next.clone(),
                table,
            });
            self.seat(next, table, at);
            return;
        }
    }
}

const fn reject(time: NaiveTime, reason: Rejection) -> ReportLine {
    ReportLine::Rejected { time, reason }
}
