use chrono::{DateTime, TimeZone, Utc};

/// Assemble a UTC timestamp from the station's `RT` (hhmmss) and `RD`
/// (yymmdd) integer responses.
///
/// The onboard clock resets to 1987 on power loss, so a two-digit year
/// above 86 belongs to the 1900s and anything else to the 2000s. That
/// mapping holds until 2086.
pub(crate) fn station_time(time_raw: i64, date_raw: i64) -> Option<DateTime<Utc>> {
    if !(0..=235959).contains(&time_raw) || !(0..=999999).contains(&date_raw) {
        return None;
    }

    let hour = (time_raw / 10000) as u32;
    let minute = (time_raw / 100 % 100) as u32;
    let second = (time_raw % 100) as u32;

    let year = date_raw / 10000;
    let month = (date_raw / 100 % 100) as u32;
    let day = (date_raw % 100) as u32;

    let year = if year > 86 { 1900 + year } else { 2000 + year };

    Utc.with_ymd_and_hms(year as i32, month, day, hour, minute, second)
        .single()
}
