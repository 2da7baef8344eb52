use chrono::NaiveDate;
use growth_desk::ingest::{
    demo_rows, format_export_date, normalize, normalize_text, parse_count, parse_date, parse_table, split_line,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn single_row_export_normalizes_to_one_record() {
    let csv = "Date,Impressions,Engagements,New follows\n\"Wed, Feb 11, 2026\",906,14,0";
    let records = normalize_text(csv);

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.date, day(2026, 2, 11));
    assert_eq!(record.impressions, 906);
    assert_eq!(record.engagements, 14);
    assert_eq!(record.new_follows, 0);
    assert_eq!(record.unfollows, 0);
    assert_eq!(record.profile_visits, 0);
}

#[test]
fn leading_byte_order_mark_is_ignored() {
    let records = normalize_text("\u{feff}Date,Impressions,Engagements\n2026-02-11,906,14");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].impressions, 906);
    assert_eq!(records[0].engagements, 14);
}

#[test]
fn split_line_respects_quotes_and_doubled_quotes() {
    let parts = split_line(r#"a, "b, ""c""" ,d"#);
    assert_eq!(parts, vec!["a".to_string(), "b, \"c\"".to_string(), "d".to_string()]);
}

#[test]
fn split_line_keeps_empty_fields() {
    assert_eq!(split_line("a,,b"), vec!["a", "", "b"]);
    assert_eq!(split_line(""), vec![""]);
}

#[test]
fn rows_with_wrong_field_count_are_skipped() {
    let csv = "Date,Impressions\n2026-02-01,10\n2026-02-02,20,30\n2026-02-03\n2026-02-04,40";
    let rows = parse_table(csv);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Impressions"], "10");
    assert_eq!(rows[1]["Impressions"], "40");
}

#[test]
fn unquoted_comma_date_changes_field_count_and_is_dropped() {
    let csv = "Date,Impressions,Engagements,New follows\nWed, Feb 11, 2026,906,14,0";
    assert!(normalize_text(csv).is_empty());
}

#[test]
fn header_only_or_empty_input_yields_nothing() {
    assert!(normalize_text("").is_empty());
    assert!(normalize_text("   \n  ").is_empty());
    assert!(normalize_text("Date,Impressions").is_empty());
}

#[test]
fn output_is_sorted_and_drops_unparseable_dates() {
    let csv = "Date,Impressions\r\n\
               2026-03-05,5\r\n\
               not a date,99\r\n\
               2026-03-01,1\r\n\
               \"Tue, Mar 3, 2026\",3\r\n\
               2026-03-02,2";
    let records = normalize_text(csv);

    assert_eq!(records.len(), 4);
    let impressions: Vec<i64> = records.iter().map(|r| r.impressions).collect();
    assert_eq!(impressions, vec![1, 2, 3, 5]);
    assert!(records.windows(2).all(|pair| pair[0].date <= pair[1].date));
}

#[test]
fn duplicate_dates_are_kept_in_export_order() {
    let csv = "Date,Impressions\n2026-01-02,7\n2026-01-01,1\n2026-01-02,8";
    let records = normalize_text(csv);

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].impressions, 7);
    assert_eq!(records[2].impressions, 8);
}

#[test]
fn known_headers_map_and_unknown_headers_are_ignored() {
    let csv = "Date,Impressions,Engagements,New follows,Unfollows,Profile visits,Likes,Bookmarks,Replies,Reposts,Create Post,Mystery\n\
               2026-01-05,1000,50,4,1,12,30,3,6,2,1,777";
    let records = normalize_text(csv);
    let record = &records[0];

    assert_eq!(record.impressions, 1000);
    assert_eq!(record.engagements, 50);
    assert_eq!(record.new_follows, 4);
    assert_eq!(record.unfollows, 1);
    assert_eq!(record.profile_visits, 12);
    assert_eq!(record.likes, 30);
    assert_eq!(record.bookmarks, 3);
    assert_eq!(record.replies, 6);
    assert_eq!(record.reposts, 2);
    assert_eq!(record.posts_published, 1);
    assert_eq!(record.net_follows(), 3);
}

#[test]
fn header_names_are_case_sensitive() {
    let csv = "Date,impressions\n2026-01-05,1000";
    let records = normalize_text(csv);
    assert_eq!(records[0].impressions, 0);
}

#[test]
fn counts_parse_leniently() {
    assert_eq!(parse_count("1,234"), 1234);
    assert_eq!(parse_count(" 42 "), 42);
    assert_eq!(parse_count("12.9"), 12);
    assert_eq!(parse_count("-5"), -5);
    assert_eq!(parse_count(""), 0);
    assert_eq!(parse_count("n/a"), 0);
    assert_eq!(parse_count("NaN"), 0);
}

#[test]
fn standard_date_forms_parse() {
    assert_eq!(parse_date("2026-02-11"), Some(day(2026, 2, 11)));
    assert_eq!(parse_date("2026-02-11T08:30:00Z"), Some(day(2026, 2, 11)));
    assert_eq!(parse_date("2026-02-11 23:59:59"), Some(day(2026, 2, 11)));
    assert_eq!(parse_date("02/11/2026"), Some(day(2026, 2, 11)));
    assert_eq!(parse_date("Feb 11, 2026"), Some(day(2026, 2, 11)));
    assert_eq!(parse_date("February 11, 2026"), Some(day(2026, 2, 11)));
}

#[test]
fn weekday_form_uses_month_table_and_ignores_weekday() {
    assert_eq!(parse_date("Wed, Feb 11, 2026"), Some(day(2026, 2, 11)));
    assert_eq!(parse_date("Mon, Feb 9, 2026"), Some(day(2026, 2, 9)));
    assert_eq!(parse_date("Fri, Feb 11, 2026"), Some(day(2026, 2, 11)));
}

#[test]
fn invalid_dates_are_rejected() {
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("yesterday"), None);
    assert_eq!(parse_date("Wed, Foo 11, 2026"), None);
    assert_eq!(parse_date("Wed, Feb 30, 2026"), None);
    assert_eq!(parse_date("Wed, Feb 11, 26"), None);
}

#[test]
fn export_date_format_round_trips() {
    let dates = [day(2026, 2, 11), day(2026, 2, 1), day(2024, 2, 29), day(2025, 12, 31)];
    for date in dates {
        let rendered = format_export_date(date);
        assert_eq!(parse_date(&rendered), Some(date), "round trip of {}", rendered);
    }
    assert_eq!(format_export_date(day(2026, 2, 9)), "Mon, Feb 9, 2026");
}

#[test]
fn demo_rows_normalize_oldest_first() {
    let records = normalize(&demo_rows());

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].date, day(2026, 2, 7));
    assert_eq!(records[4].date, day(2026, 2, 11));
    assert_eq!(records[4].impressions, 906);
}
