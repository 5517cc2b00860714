use chrono::{Datelike, NaiveDate};

use crate::cycle_model::CycleModel;
use crate::models::{CalendarDay, DayMark};

impl CycleModel<'_> {
    /// Logged period days win over predictions, predictions over the
    /// fertile window.
    pub fn day_mark(&self, date: NaiveDate) -> DayMark {
        if self.is_period_day(date) {
            DayMark::Period
        } else if self.is_predicted_period_day(date) {
            DayMark::Predicted
        } else if self.is_fertile_window(date) {
            DayMark::Fertile
        } else {
            DayMark::None
        }
    }

    /// Annotates every day of the given month; `None` when the month does
    /// not exist.
    pub fn calendar_month(&self, year: i32, month: u32) -> Option<Vec<CalendarDay>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;

        Some(
            first
                .iter_days()
                .take_while(|d| d.month() == month)
                .map(|date| CalendarDay {
                    date,
                    mark: self.day_mark(date),
                })
                .collect(),
        )
    }
}
