//! Billing for a finished table session.

use chrono::NaiveTime;

/// Charge produced when a table is vacated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charge {
    /// Amount due: elapsed time rounded up to whole hours, times the rate.
    pub amount: i64,
    /// Exact whole minutes the table was held.
    pub minutes: i64,
}

/// Bills a session from `start` to `end` at `hourly_rate` per started hour.
///
/// The ceiling is on the duration, not on the minutes: 1h01m bills as two
/// hours, a zero-duration session bills nothing.
#[must_use]
pub fn charge(start: NaiveTime, end: NaiveTime, hourly_rate: i64) -> Charge {
    let minutes = (end - start).num_minutes().max(0);
    let hours = minutes / 60 + i64::from(minutes % 60 != 0);
    Charge {
        amount: hours * hourly_rate,
        minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::clock;

    fn at(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, clock::FORMAT).unwrap()
    }

    #[test]
    fn whole_hours_bill_exactly() {
        let bill = charge(at("09:00"), at("12:00"), 10);
        assert_eq!(bill.amount, 30);
        assert_eq!(bill.minutes, 180);
    }

    #[test]
    fn one_extra_minute_bills_another_hour() {
        let bill = charge(at("09:00"), at("10:01"), 10);
        assert_eq!(bill.amount, 20);
        assert_eq!(bill.minutes, 61);
    }

    #[test]
    fn sub_hour_session_bills_one_hour() {
        let bill = charge(at("09:54"), at("10:00"), 10);
        assert_eq!(bill.amount, 10);
        assert_eq!(bill.minutes, 6);
    }

    #[test]
    fn zero_duration_bills_nothing() {
        let bill = charge(at("12:33"), at("12:33"), 10);
        assert_eq!(bill.amount, 0);
        assert_eq!(bill.minutes, 0);
    }

    #[test]
    fn reference_scenario_charges() {
        // 09:54 -> 12:33 is 2h39m, billed as 3h.
        assert_eq!(charge(at("09:54"), at("12:33"), 10).amount, 30);
        // 12:33 -> 15:52 is 3h19m, billed as 4h.
        assert_eq!(charge(at("12:33"), at("15:52"), 10).amount, 40);
        // 10:59 -> 19:00 is 8h01m, billed as 9h.
        assert_eq!(charge(at("10:59"), at("19:00"), 10).amount, 90);
    }
}
