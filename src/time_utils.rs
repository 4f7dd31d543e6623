use crate::domain::market_data::CandlePeriod;

/// Split `YYYY-MM-DDTHH:MM:SS` into its date and `HH:MM` parts.
fn split_kst(kst: &str) -> (&str, &str) {
    let (date, time) = kst.split_once('T').unwrap_or((kst, ""));
    (date, time.get(..5).unwrap_or(time))
}

/// Axis label for a candle from its KST date string.
///
/// - intraday periods -> `HH:MM`, or `MM/DD` on the first candle of a day
/// - days and weeks -> `MM/DD`
/// - months -> `YYYY-MM`
pub fn format_time_label(kst: &str, period: CandlePeriod) -> String {
    let (date, time) = split_kst(kst);
    let month_day = date.get(5..10).map(|md| md.replace('-', "/")).unwrap_or_default();
    match period {
        CandlePeriod::OneMonth => date.get(..7).unwrap_or(date).to_string(),
        CandlePeriod::OneDay | CandlePeriod::OneWeek => month_day,
        _ if time == "00:00" && !month_day.is_empty() => month_day,
        _ => time.to_string(),
    }
}

/// Full date for the pointer label, e.g. `2024-03-01 09:30`
pub fn format_pointer_date(kst: &str, period: CandlePeriod) -> String {
    let (date, time) = split_kst(kst);
    if period.is_intraday() && !time.is_empty() {
        format!("{date} {time}")
    } else {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_on_short_input() {
        assert_eq!(format_time_label("2024", CandlePeriod::OneDay), "");
        assert_eq!(format_time_label("", CandlePeriod::OneMinute), "");
        assert_eq!(format_pointer_date("2024-01-02", CandlePeriod::OneHour), "2024-01-02");
    }
}
