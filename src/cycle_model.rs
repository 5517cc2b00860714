//! Derived cycle facts over a logged history.
//!
//! Every query is a pure function of the borrowed history, the settings and
//! an explicit date; nothing here reads the wall clock.

use chrono::{Duration, NaiveDate};

use crate::models::{CycleRecord, CycleSummary, FertileWindow, Phase, Settings};

/// Days between the estimated ovulation and the next period start.
const LUTEAL_DAYS: i64 = 14;
/// Width of the ovulation band on either side of mid-cycle.
const OVULATION_BAND: f64 = 3.0;
const FERTILE_DAYS_BEFORE: i64 = 5;
const FERTILE_DAYS_AFTER: i64 = 1;

/// Saturates at the calendar bounds instead of panicking.
pub(crate) fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

#[derive(Debug, Clone, Copy)]
pub struct CycleModel<'a> {
    history: &'a [CycleRecord],
    settings: &'a Settings,
}

impl<'a> CycleModel<'a> {
    pub fn new(history: &'a [CycleRecord], settings: &'a Settings) -> Self {
        Self { history, settings }
    }

    /// Start of the chronologically latest record, whatever its position.
    pub fn last_start(&self) -> Option<NaiveDate> {
        self.history.iter().map(|r| r.start).max()
    }

    pub fn average_cycle_length(&self) -> i64 {
        if self.history.len() < 2 {
            return self.settings.cycle_length;
        }

        let mut starts: Vec<NaiveDate> = self.history.iter().map(|r| r.start).collect();
        starts.sort();

        let total: i64 = starts
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .sum();

        // f64::round rounds half away from zero.
        (total as f64 / (starts.len() - 1) as f64).round() as i64
    }

    /// Day 1 is the start date itself.
    pub fn days_since_last_start(&self, today: NaiveDate) -> Option<i64> {
        self.last_start()
            .map(|last| (today - last).num_days() + 1)
    }

    pub fn current_phase(&self, today: NaiveDate) -> Phase {
        let Some(day) = self.days_since_last_start(today) else {
            return Phase::Follicular;
        };
        let mid = self.average_cycle_length() as f64 / 2.0;
        let day_f = day as f64;

        if day <= self.settings.period_length {
            Phase::Menstrual
        } else if day_f <= mid - OVULATION_BAND {
            Phase::Follicular
        } else if day_f <= mid + OVULATION_BAND {
            Phase::Ovulation
        } else {
            Phase::Luteal
        }
    }

    pub fn predicted_next_start(&self) -> Option<NaiveDate> {
        self.last_start()
            .map(|last| shift(last, self.average_cycle_length()))
    }

    pub fn days_until_next_start(&self, today: NaiveDate) -> Option<i64> {
        self.predicted_next_start()
            .map(|next| (next - today).num_days())
    }

    /// Half-open: `[start, start + length)` for any logged record.
    pub fn is_period_day(&self, date: NaiveDate) -> bool {
        self.history.iter().any(|record| {
            let end = shift(record.start, record.period_length(self.settings));
            record.start <= date && date < end
        })
    }

    pub fn is_predicted_period_day(&self, date: NaiveDate) -> bool {
        match self.predicted_next_start() {
            Some(next) => next <= date && date < shift(next, self.settings.period_length),
            None => false,
        }
    }

    pub fn fertile_window(&self) -> Option<FertileWindow> {
        let last = self.last_start()?;
        let ovulation = shift(last, self.average_cycle_length().saturating_sub(LUTEAL_DAYS));
        Some(FertileWindow {
            start: shift(ovulation, -FERTILE_DAYS_BEFORE),
            ovulation,
            end: shift(ovulation, FERTILE_DAYS_AFTER),
        })
    }

    pub fn is_fertile_window(&self, date: NaiveDate) -> bool {
        self.fertile_window()
            .is_some_and(|window| window.contains(date))
    }

    pub fn summary(&self, today: NaiveDate) -> CycleSummary {
        let phase = self.current_phase(today);
        let average_cycle_length = self.average_cycle_length();
        let current_day = self.days_since_last_start(today);
        let days_until_next = self.days_until_next_start(today);

        CycleSummary {
            current_day,
            phase,
            phase_name: phase.display_name(),
            days_until_next,
            next_period_due: days_until_next.is_some_and(|d| d <= 0),
            predicted_next_start: self.predicted_next_start(),
            average_cycle_length,
            fertile_window: self.fertile_window(),
            cycle_progress: current_day
                .filter(|_| average_cycle_length > 0)
                .map(|d| d as f64 / average_cycle_length as f64),
        }
    }
}
