// Weekly bucketing of daily points
use crate::domain::experiment::Point;
use crate::domain::format::{parse_date, DATE_FORMAT};
use chrono::{Datelike, Days};
use std::collections::BTreeMap;

/// Monday of the week containing `date`, as `YYYY-MM-DD`.
/// Dates that do not parse, or whose Monday falls outside the supported
/// calendar range, are returned as-is so they keep their own bucket.
pub fn week_start_key(date: &str) -> String {
    parse_date(date)
        .and_then(|day| {
            let weekday = day.weekday().num_days_from_sunday() as u64;
            day.checked_sub_days(Days::new((weekday + 6) % 7))
        })
        .map(|monday| monday.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| date.to_string())
}

/// Collapses daily points into one point per Monday-start week, summing
/// visits and conversions. Output is ordered by week key.
pub fn aggregate_week(points: &[Point]) -> Vec<Point> {
    let mut weeks: BTreeMap<String, (u64, u64)> = BTreeMap::new();

    for point in points {
        let totals = weeks.entry(week_start_key(&point.date)).or_insert((0, 0));
        totals.0 += point.visits;
        totals.1 += point.conversions;
    }

    weeks
        .into_iter()
        .map(|(date, (visits, conversions))| Point::new(date, visits, conversions))
        .collect()
}
