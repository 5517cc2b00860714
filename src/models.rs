use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CYCLE_LENGTH: i64 = 28;
pub const DEFAULT_PERIOD_LENGTH: i64 = 5;

/// One logged period start. `length` is the bleeding duration in days;
/// records written before per-record lengths existed omit it and fall
/// back to the settings value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
}

impl CycleRecord {
    pub fn new(start: NaiveDate, length: i64) -> Self {
        Self {
            start,
            length: Some(length),
        }
    }

    pub fn period_length(&self, settings: &Settings) -> i64 {
        self.length.unwrap_or(settings.period_length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub cycle_length: i64,
    pub period_length: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            period_length: DEFAULT_PERIOD_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Menstrual,
        Phase::Follicular,
        Phase::Ovulation,
        Phase::Luteal,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Phase::Menstrual => "Menstrual",
            Phase::Follicular => "Follicular",
            Phase::Ovulation => "Ovulation",
            Phase::Luteal => "Luteal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub ovulation: NaiveDate,
    pub end: NaiveDate,
}

impl FertileWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSummary {
    pub current_day: Option<i64>,
    pub phase: Phase,
    pub phase_name: &'static str,
    pub days_until_next: Option<i64>,
    pub next_period_due: bool,
    pub predicted_next_start: Option<NaiveDate>,
    pub average_cycle_length: i64,
    pub fertile_window: Option<FertileWindow>,
    pub cycle_progress: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleStat {
    pub cycle_number: usize,
    pub start_date: NaiveDate,
    pub period_length: i64,
    pub cycle_length: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleStats {
    pub average_period_length: f64,
    pub average_cycle_length: i64,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    pub cycle_stats: Vec<CycleStat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayMark {
    Period,
    Predicted,
    Fertile,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub mark: DayMark,
}

/// A history entry as shown to clients: the record plus the last day of
/// its period span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSpan {
    pub index: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub length: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodSuggestion {
    pub name: &'static str,
    pub benefit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseGuide {
    pub phase: Phase,
    pub title: &'static str,
    pub description: &'static str,
    pub affirmation: &'static str,
    pub foods: Vec<FoodSuggestion>,
}
