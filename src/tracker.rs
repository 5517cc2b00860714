use chrono::NaiveDate;
use thiserror::Error;

use crate::cycle_model::{shift, CycleModel};
use crate::models::{CycleRecord, PeriodSpan, Settings};

pub const PERIOD_LENGTH_RANGE: std::ops::RangeInclusive<i64> = 1..=15;
pub const CYCLE_LENGTH_RANGE: std::ops::RangeInclusive<i64> = 15..=90;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("period length must be between 1 and 15 days, got {0}")]
    PeriodLength(i64),

    #[error("cycle length must be between 15 and 90 days, got {0}")]
    CycleLength(i64),

    #[error("period length ({period}) must be shorter than cycle length ({cycle})")]
    PeriodNotShorterThanCycle { period: i64, cycle: i64 },
}

pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if !PERIOD_LENGTH_RANGE.contains(&settings.period_length) {
        return Err(SettingsError::PeriodLength(settings.period_length));
    }
    if !CYCLE_LENGTH_RANGE.contains(&settings.cycle_length) {
        return Err(SettingsError::CycleLength(settings.cycle_length));
    }
    if settings.period_length >= settings.cycle_length {
        return Err(SettingsError::PeriodNotShorterThanCycle {
            period: settings.period_length,
            cycle: settings.cycle_length,
        });
    }
    Ok(())
}

/// One user's logged history and settings. History is kept sorted by start
/// date; overlapping or duplicate records are accepted as logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracker {
    history: Vec<CycleRecord>,
    settings: Settings,
}

impl Tracker {
    pub fn new(mut history: Vec<CycleRecord>, settings: Settings) -> Self {
        history.sort_by_key(|r| r.start);
        Self { history, settings }
    }

    pub fn history(&self) -> &[CycleRecord] {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn model(&self) -> CycleModel<'_> {
        CycleModel::new(&self.history, &self.settings)
    }

    pub fn log_period(&mut self, start: NaiveDate) -> &CycleRecord {
        self.history
            .push(CycleRecord::new(start, self.settings.period_length));
        // stable: a duplicate start keeps its insertion order
        self.history.sort_by_key(|r| r.start);
        tracing::debug!(%start, records = self.history.len(), "logged period");

        let pos = self
            .history
            .iter()
            .rposition(|r| r.start == start)
            .unwrap_or(self.history.len() - 1);
        &self.history[pos]
    }

    pub fn delete_record(&mut self, index: usize) -> Option<CycleRecord> {
        (index < self.history.len()).then(|| self.history.remove(index))
    }

    /// Drops every record whose period span covers `date`. The whole record
    /// goes, not just the one day.
    pub fn remove_day_from_period(&mut self, date: NaiveDate) -> usize {
        let settings = self.settings;
        let before = self.history.len();
        self.history.retain(|record| {
            let end = shift(record.start, record.period_length(&settings));
            !(record.start <= date && date < end)
        });
        before - self.history.len()
    }

    pub fn update_settings(&mut self, settings: Settings) -> Result<(), SettingsError> {
        validate_settings(&settings)?;
        self.settings = settings;
        Ok(())
    }

    pub fn period_spans(&self) -> Vec<PeriodSpan> {
        self.history
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let length = record.period_length(&self.settings);
                PeriodSpan {
                    index,
                    start_date: record.start,
                    end_date: shift(record.start, length.saturating_sub(1)),
                    length,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn logged_start_is_a_period_day() {
        let mut tracker = Tracker::default();
        tracker.log_period(date("2024-03-10"));

        assert!(tracker.model().is_period_day(date("2024-03-10")));
        assert_eq!(tracker.history()[0].length, Some(5));
    }

    #[test]
    fn log_period_keeps_history_sorted() {
        let mut tracker = Tracker::default();
        tracker.log_period(date("2024-03-10"));
        tracker.log_period(date("2024-01-10"));
        let logged = tracker.log_period(date("2024-02-10")).clone();

        assert_eq!(logged.start, date("2024-02-10"));
        let starts: Vec<NaiveDate> = tracker.history().iter().map(|r| r.start).collect();
        assert_eq!(
            starts,
            vec![date("2024-01-10"), date("2024-02-10"), date("2024-03-10")]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let mut tracker = Tracker::default();
        tracker.log_period(date("2024-03-10"));
        tracker.log_period(date("2024-03-10"));

        assert_eq!(tracker.history().len(), 2);
    }

    #[test]
    fn new_sorts_loaded_history() {
        let tracker = Tracker::new(
            vec![
                CycleRecord::new(date("2024-02-01"), 5),
                CycleRecord::new(date("2024-01-01"), 5),
            ],
            Settings::default(),
        );
        assert_eq!(tracker.history()[0].start, date("2024-01-01"));
    }

    #[test]
    fn delete_record_by_position() {
        let mut tracker = Tracker::default();
        tracker.log_period(date("2024-01-01"));
        tracker.log_period(date("2024-02-01"));

        let removed = tracker.delete_record(0).unwrap();
        assert_eq!(removed.start, date("2024-01-01"));
        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.delete_record(5), None);
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn removing_a_day_drops_the_whole_record() {
        let mut tracker = Tracker::default();
        tracker.log_period(date("2024-01-01"));
        tracker.log_period(date("2024-02-01"));

        assert_eq!(tracker.remove_day_from_period(date("2024-01-06")), 0);
        assert_eq!(tracker.remove_day_from_period(date("2024-01-03")), 1);
        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.history()[0].start, date("2024-02-01"));
    }

    #[test]
    fn removing_a_day_drops_every_overlapping_record() {
        let mut tracker = Tracker::default();
        tracker.log_period(date("2024-01-01"));
        tracker.log_period(date("2024-01-03"));
        tracker.log_period(date("2024-02-01"));

        assert_eq!(tracker.remove_day_from_period(date("2024-01-04")), 2);
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn settings_are_validated() {
        let mut tracker = Tracker::default();

        assert_eq!(
            tracker.update_settings(Settings {
                cycle_length: 30,
                period_length: 0,
            }),
            Err(SettingsError::PeriodLength(0))
        );
        assert_eq!(
            tracker.update_settings(Settings {
                cycle_length: 120,
                period_length: 5,
            }),
            Err(SettingsError::CycleLength(120))
        );
        assert_eq!(
            tracker.update_settings(Settings {
                cycle_length: 15,
                period_length: 15,
            }),
            Err(SettingsError::PeriodNotShorterThanCycle {
                period: 15,
                cycle: 15
            })
        );
        assert_eq!(*tracker.settings(), Settings::default());

        let custom = Settings {
            cycle_length: 32,
            period_length: 6,
        };
        tracker.update_settings(custom).unwrap();
        assert_eq!(*tracker.settings(), custom);
    }

    #[test]
    fn new_records_use_current_period_length() {
        let mut tracker = Tracker::default();
        tracker
            .update_settings(Settings {
                cycle_length: 30,
                period_length: 7,
            })
            .unwrap();
        tracker.log_period(date("2024-05-01"));

        let spans = tracker.period_spans();
        assert_eq!(spans[0].length, 7);
        assert_eq!(spans[0].end_date, date("2024-05-07"));
    }
}
