use chrono::{Days, NaiveDate};
use mood_core::db::open_db_in_memory;
use mood_core::{
    EntryDraft, JournalService, MemoryEntryRepository, ScoreBand, SqliteEntryRepository,
    CHART_POINT_LIMIT, RECENT_DEFAULT_LIMIT,
};

fn seed_days<R: mood_core::EntryRepository>(service: &JournalService<R>, start: NaiveDate, days: u64) {
    for offset in 0..days {
        let score = 1.0 + (offset % 10) as f64;
        service
            .save_entry(EntryDraft::new(start + Days::new(offset), score))
            .unwrap();
    }
}

#[test]
fn chart_of_forty_entries_returns_latest_thirty_ascending() {
    let conn = open_db_in_memory().unwrap();
    let service = JournalService::new(SqliteEntryRepository::new(&conn));
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    seed_days(&service, start, 40);

    let points = service.chart_points().unwrap();
    assert_eq!(points.len(), CHART_POINT_LIMIT);
    assert!(points.windows(2).all(|pair| pair[0].date < pair[1].date));
    assert_eq!(points.first().unwrap().date, start + Days::new(10));
    assert_eq!(points.last().unwrap().date, start + Days::new(39));
    assert_eq!(points.last().unwrap().label, "Feb 9");
}

#[test]
fn chart_with_few_entries_returns_all_of_them() {
    let service = JournalService::new(MemoryEntryRepository::new());
    let start = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
    seed_days(&service, start, 3);

    let labels = service
        .chart_points()
        .unwrap()
        .into_iter()
        .map(|point| point.label)
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["Dec 30", "Dec 31", "Jan 1"]);
}

#[test]
fn recent_entries_are_most_recent_first_with_labels() {
    let service = JournalService::new(MemoryEntryRepository::new());
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    seed_days(&service, start, 8);
    let today = start + Days::new(7);

    let recent = service.recent_entries(RECENT_DEFAULT_LIMIT, today).unwrap();
    assert_eq!(recent.len(), RECENT_DEFAULT_LIMIT);
    assert_eq!(recent[0].day_label, "Today");
    assert_eq!(recent[0].band, ScoreBand::High);
    assert_eq!(recent[1].day_label, "Yesterday");
    assert_eq!(recent[2].day_label, "Mar 6, 2024");
}

#[test]
fn deleted_entries_leave_projections() {
    let service = JournalService::new(MemoryEntryRepository::new());
    let date = NaiveDate::from_ymd_opt(2024, 4, 4).unwrap();
    let saved = service.save_entry(EntryDraft::new(date, 5.0)).unwrap();

    assert!(service.delete_entry(saved.id).unwrap());
    assert!(!service.delete_entry(saved.id).unwrap());
    assert!(service.chart_points().unwrap().is_empty());
    assert_eq!(service.entry_for_date(date).unwrap(), None);
}
