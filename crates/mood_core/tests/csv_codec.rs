use chrono::NaiveDate;
use mood_core::db::open_db_in_memory;
use mood_core::{
    export_csv, import_csv, EntryDraft, EntryRepository, JournalService, MemoryEntryRepository,
    SqliteEntryRepository,
};

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

#[test]
fn import_reports_bad_rows_and_keeps_good_ones() {
    let repo = MemoryEntryRepository::new();
    let report = import_csv(
        &repo,
        "Date,Score\n2024-01-01,5\n2024-01-02,11\n2024-01-03,abc",
    );

    assert_eq!(report.success_count, 1);
    assert_eq!(
        report.errors,
        vec![
            "Row 2: Invalid score \"11\" (must be 1-10)".to_string(),
            "Row 3: Invalid score \"abc\" (must be 1-10)".to_string(),
        ]
    );
    assert_eq!(repo.list_all().unwrap().len(), 1);
    assert!(repo.get_by_date(date("2024-01-01")).unwrap().is_some());
}

#[test]
fn header_only_import_reports_no_data_rows() {
    let repo = MemoryEntryRepository::new();
    let report = import_csv(&repo, "Date,Score,Reflection\n\n   \n");

    assert_eq!(report.success_count, 0);
    assert_eq!(report.errors, vec!["Invalid CSV format: no data rows found"]);
    assert!(repo.is_empty());
}

#[test]
fn missing_required_column_aborts_before_any_row() {
    let repo = MemoryEntryRepository::new();
    let report = import_csv(&repo, "Date,Reflection\n2024-01-01,fine\n2024-01-02,ok");

    assert_eq!(report.success_count, 0);
    assert_eq!(report.errors, vec!["Missing required columns: score"]);
    assert!(repo.is_empty());

    let report = import_csv(&repo, "when,how\n2024-01-01,5");
    assert_eq!(report.errors, vec!["Missing required columns: date, score"]);
}

#[test]
fn bad_date_shape_and_impossible_day_are_row_errors() {
    let repo = MemoryEntryRepository::new();
    let report = import_csv(
        &repo,
        "date,score\n01/02/2024,5\n2024-02-30,6\n2024-02-28,7",
    );

    assert_eq!(report.success_count, 1);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(
        report.errors[0],
        "Row 1: Invalid date format \"01/02/2024\" (use YYYY-MM-DD)"
    );
    assert!(report.errors[1].starts_with("Row 2: "));
    assert!(report.errors[1].contains("2024-02-30"));
}

#[test]
fn score_is_checked_before_date() {
    let repo = MemoryEntryRepository::new();
    let report = import_csv(&repo, "date,score\nyesterday,0");

    assert_eq!(
        report.errors,
        vec!["Row 1: Invalid score \"0\" (must be 1-10)"]
    );
}

#[test]
fn blank_lines_do_not_count_as_rows() {
    let repo = MemoryEntryRepository::new();
    let report = import_csv(&repo, "\n date , SCORE \n\n2024-01-01,5\r\n  \n2024-01-02,99\r\n");

    assert_eq!(report.success_count, 1);
    assert_eq!(
        report.errors,
        vec!["Row 2: Invalid score \"99\" (must be 1-10)"]
    );
}

#[test]
fn columns_are_matched_by_name_in_any_order() {
    let repo = MemoryEntryRepository::new();
    let report = import_csv(
        &repo,
        "\"Intention\",\"Score\",\"Date\",\"Reflection\"\n\"stretch\",\"8.5\",\"2024-03-03\",\"sunny\"",
    );

    assert_eq!(report.success_count, 1);
    let entry = repo.get_by_date(date("2024-03-03")).unwrap().unwrap();
    assert_eq!(entry.score, 8.5);
    assert_eq!(entry.reflection, "sunny");
    assert_eq!(entry.intention, "stretch");
}

#[test]
fn import_merges_into_existing_dates() {
    let repo = MemoryEntryRepository::new();
    let original = repo
        .save(EntryDraft::new(date("2024-01-01"), 2.0).with_reflection("rough"))
        .unwrap();

    let report = import_csv(&repo, "date,score\n2024-01-01,6");
    assert_eq!(report.success_count, 1);

    let merged = repo.get_by_date(date("2024-01-01")).unwrap().unwrap();
    assert_eq!(merged.id, original.id);
    assert_eq!(merged.score, 6.0);
    // Missing optional columns import as empty text.
    assert_eq!(merged.reflection, "");
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn export_then_import_roundtrips_field_values() {
    let source = MemoryEntryRepository::new();
    source
        .save(
            EntryDraft::new(date("2024-05-01"), 7.0)
                .with_reflection("long walk")
                .with_intention("read a chapter"),
        )
        .unwrap();
    source
        .save(EntryDraft::new(date("2024-05-02"), 3.5).with_reflection("headache"))
        .unwrap();
    source
        .save(EntryDraft::new(date("2024-05-03"), 10.0))
        .unwrap();

    let csv = export_csv(&source.list_all().unwrap());

    let conn = open_db_in_memory().unwrap();
    let target = SqliteEntryRepository::new(&conn);
    let report = import_csv(&target, &csv);
    assert_eq!(report.success_count, 3);
    assert!(report.errors.is_empty());

    let project = |entries: Vec<mood_core::Entry>| {
        entries
            .into_iter()
            .map(|entry| (entry.date, entry.score, entry.reflection, entry.intention))
            .collect::<Vec<_>>()
    };
    assert_eq!(
        project(target.list_all().unwrap()),
        project(source.list_all().unwrap())
    );
}

#[test]
fn embedded_quotes_lose_their_quote_characters_on_reimport() {
    let source = MemoryEntryRepository::new();
    source
        .save(EntryDraft::new(date("2024-06-01"), 6.0).with_reflection("she said \"go\""))
        .unwrap();

    let csv = export_csv(&source.list_all().unwrap());
    assert!(csv.contains("\"she said \"\"go\"\"\""));

    let target = MemoryEntryRepository::new();
    import_csv(&target, &csv);
    let entry = target.get_by_date(date("2024-06-01")).unwrap().unwrap();
    assert_eq!(entry.reflection, "she said go");
}

#[test]
fn service_import_and_export_use_the_injected_store() {
    let conn = open_db_in_memory().unwrap();
    let service = JournalService::new(SqliteEntryRepository::new(&conn));

    let report = service.import_csv("Date,Score,Reflection,Intention\n2024-07-01,4,meh,nap");
    assert_eq!(report.summary(), "Imported 1 entries.");

    let csv = service.export_csv().unwrap();
    assert_eq!(
        csv,
        "Date,Score,Reflection,Intention\n\"2024-07-01\",\"4\",\"meh\",\"nap\""
    );
}
