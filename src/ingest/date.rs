use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static WEEKDAY_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w{3},\s(\w{3})\s(\d{1,2}),\s(\d{4})$").expect("weekday date pattern")
});

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Parses an export date into a calendar day.
///
/// Standard date and date-time forms are tried first, then the
/// `Www, Mon D, YYYY` export form. Anything else is `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    parse_standard(value).or_else(|| parse_weekday_form(value))
}

fn parse_standard(value: &str) -> Option<NaiveDate> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.date_naive());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.date_naive());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

// The weekday is not checked against the resolved date.
fn parse_weekday_form(value: &str) -> Option<NaiveDate> {
    let captures = WEEKDAY_DATE.captures(value)?;
    let month = month_number(&captures[1])?;
    let day = captures[2].parse::<u32>().ok()?;
    let year = captures[3].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(abbrev: &str) -> Option<u32> {
    let month = match abbrev {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Renders a day in the `Www, Mon D, YYYY` export form.
pub fn format_export_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}
