use chrono::NaiveDate;

use crate::storage::TrackerStore;

/// Source of "today". Handlers never read the wall clock directly.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => chrono::Utc::now().naive_utc().date(),
            Clock::Fixed(date) => *date,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: TrackerStore,
    pub clock: Clock,
}

impl AppState {
    pub fn new(store: TrackerStore, clock: Clock) -> Self {
        Self { store, clock }
    }
}
