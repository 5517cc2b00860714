use crate::cycle_model::CycleModel;
use crate::models::{CycleRecord, CycleStat, CycleStats, Settings};

/// Per-cycle table: period length for each record and the gap to the next
/// start. The most recent cycle is still running and has no length yet.
pub fn cycle_stats(history: &[CycleRecord], settings: &Settings) -> CycleStats {
    let mut ordered: Vec<&CycleRecord> = history.iter().collect();
    ordered.sort_by_key(|r| r.start);

    let mut stats = Vec::with_capacity(ordered.len());
    let mut total_period: i64 = 0;

    for (i, record) in ordered.iter().enumerate() {
        let period = record.period_length(settings);
        let cycle_len = ordered
            .get(i + 1)
            .map(|next| (next.start - record.start).num_days());

        total_period = total_period.saturating_add(period);
        stats.push(CycleStat {
            cycle_number: i + 1,
            start_date: record.start,
            period_length: period,
            cycle_length: cycle_len,
        });
    }

    let completed = stats.iter().filter_map(|s| s.cycle_length);

    CycleStats {
        average_period_length: if stats.is_empty() {
            settings.period_length as f64
        } else {
            total_period as f64 / stats.len() as f64
        },
        average_cycle_length: CycleModel::new(history, settings).average_cycle_length(),
        shortest_cycle: completed.clone().min(),
        longest_cycle: completed.max(),
        cycle_stats: stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_history_uses_settings() {
        let settings = Settings::default();
        let stats = cycle_stats(&[], &settings);

        assert!(stats.cycle_stats.is_empty());
        assert_eq!(stats.average_period_length, 5.0);
        assert_eq!(stats.average_cycle_length, 28);
        assert_eq!(stats.shortest_cycle, None);
        assert_eq!(stats.longest_cycle, None);
    }

    #[test]
    fn gaps_are_measured_in_start_order() {
        let settings = Settings::default();
        let history = vec![
            CycleRecord::new(date("2024-02-27"), 4),
            CycleRecord::new(date("2024-01-01"), 6),
            CycleRecord::new(date("2024-01-27"), 5),
        ];
        let stats = cycle_stats(&history, &settings);

        let lengths: Vec<Option<i64>> = stats.cycle_stats.iter().map(|s| s.cycle_length).collect();
        assert_eq!(lengths, vec![Some(26), Some(31), None]);
        assert_eq!(stats.cycle_stats[0].cycle_number, 1);
        assert_eq!(stats.cycle_stats[0].start_date, date("2024-01-01"));
        assert_eq!(stats.cycle_stats[0].period_length, 6);
        assert_eq!(stats.shortest_cycle, Some(26));
        assert_eq!(stats.longest_cycle, Some(31));
        assert_eq!(stats.average_cycle_length, 29);
        assert_eq!(stats.average_period_length, 5.0);
    }
}
