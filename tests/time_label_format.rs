use crypto_graph_wasm::domain::market_data::CandlePeriod;
use crypto_graph_wasm::time_utils::{format_pointer_date, format_time_label};

#[test]
fn intraday_labels_show_clock_time() {
    assert_eq!(format_time_label("2024-03-05T09:30:00", CandlePeriod::OneMinute), "09:30");
    assert_eq!(format_time_label("2024-03-05T13:00:00", CandlePeriod::FourHours), "13:00");
}

#[test]
fn intraday_label_at_midnight_shows_date() {
    assert_eq!(format_time_label("2024-03-05T00:00:00", CandlePeriod::OneHour), "03/05");
}

#[test]
fn daily_weekly_and_monthly_labels() {
    assert_eq!(format_time_label("2024-03-05T09:00:00", CandlePeriod::OneDay), "03/05");
    assert_eq!(format_time_label("2024-03-04T09:00:00", CandlePeriod::OneWeek), "03/04");
    assert_eq!(format_time_label("2024-03-01T09:00:00", CandlePeriod::OneMonth), "2024-03");
}

#[test]
fn pointer_date_includes_time_only_intraday() {
    assert_eq!(format_pointer_date("2024-03-05T09:30:00", CandlePeriod::FiveMinutes), "2024-03-05 09:30");
    assert_eq!(format_pointer_date("2024-03-05T09:00:00", CandlePeriod::OneDay), "2024-03-05");
}

#[test]
fn periods_parse_from_their_short_names() {
    assert_eq!("1M".parse::<CandlePeriod>(), Ok(CandlePeriod::OneMonth));
    assert_eq!("1m".parse::<CandlePeriod>(), Ok(CandlePeriod::OneMinute));
    assert_eq!(CandlePeriod::FourHours.to_string(), "4h");
    assert_eq!(CandlePeriod::OneHour.api_path(), "minutes/60");
    assert!(CandlePeriod::ThirtyMinutes.is_intraday());
    assert!(!CandlePeriod::OneWeek.is_intraday());
}
