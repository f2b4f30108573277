//! Positional decoders for the station's response lines.
//!
//! The station answers each poll with the value embedded in a fixed-width
//! line, for example:
//!
//! ```text
//! tnnn[C]        indoor temperature      (trailing C marks Celsius)
//! Tnnn[C]        outdoor temperature
//! cTnnn[C]       wind chill
//! hnn / Hnn      indoor / outdoor humidity
//! wnnn[K|L|M]nnnD   wind speed + direction (K knots, L km/h, M mph)
//! Bnnnn[M]       barometer (hundredths of inHg, or whole millibars)
//! Rnnnnn[nC]     rain total (hundredths of an inch, or of a centimeter)
//! RRnnnnn[nC]    rain rate, same payload with one more leading R
//! ```
//!
//! Every decoder converts to US units and returns `None` for a line that
//! does not fit, logging the buffer so a flaky sensor shows up in the logs
//! instead of killing the poll cycle.

use std::ops::Range;

pub const MILE_PER_KNOT: f64 = 1.15078;
pub const MILE_PER_KM: f64 = 0.621371192;
pub const INHG_PER_MBAR: f64 = 0.0295299830714;
pub const CM_PER_INCH: f64 = 2.54;

fn c_to_f(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

fn kph_to_mph(kph: f64) -> f64 {
    kph * MILE_PER_KM
}

/// Pull the digits at `digits` out of `raw`, tolerating the padding the
/// station puts around short values.
fn parse_int(raw: &str, digits: Range<usize>) -> Option<i32> {
    raw.get(digits)?.trim().parse().ok()
}

/// High and low records open with `<` or `>`; the rest of the line reads
/// the same as the plain report.
fn strip_high_low(raw: &str) -> &str {
    raw.strip_prefix(['<', '>']).unwrap_or(raw)
}

/// Decode a temperature line to degrees Fahrenheit.
pub fn temperature(raw: &str) -> Option<f64> {
    let body = raw.strip_prefix('c').unwrap_or(raw);
    let degrees = parse_int(body, 1..4).map(|value| {
        if body.ends_with('C') {
            c_to_f(f64::from(value))
        } else {
            f64::from(value)
        }
    });

    if degrees.is_none() {
        log::error!("Failed to decode temperature from {:?}", raw);
    }
    degrees
}

/// Decode a humidity line to percent.
pub fn humidity(raw: &str) -> Option<f64> {
    let percent = parse_int(raw, 1..3).map(f64::from);
    if percent.is_none() {
        log::error!("Failed to decode humidity from {:?}", raw);
    }
    percent
}

/// Decode the speed half of a wind line to mph.
pub fn wind_speed(raw: &str) -> Option<f64> {
    let body = strip_high_low(raw);
    let mph = decode_speed(body);
    if mph.is_none() {
        log::error!("Failed to decode wind speed from {:?}", raw);
    }
    mph
}

fn decode_speed(body: &str) -> Option<f64> {
    let unit = body.get(4..5)?;
    let value = f64::from(parse_int(body, 1..4)?);

    Some(match unit {
        "K" => value * MILE_PER_KNOT,
        "L" => kph_to_mph(value),
        // M, or any letter the station grows later, is already mph.
        _ => value,
    })
}

/// Decode the direction half of a wind line to degrees.
pub fn wind_direction(raw: &str) -> Option<f64> {
    let body = strip_high_low(raw);
    let degrees = parse_int(body, 5..8).map(f64::from);
    if degrees.is_none() {
        log::error!("Failed to decode wind direction from {:?}", raw);
    }
    degrees
}

/// Decode a barometer line to inches of mercury.
pub fn barometer(raw: &str) -> Option<f64> {
    let value = match parse_int(raw, 1..5) {
        Some(value) => value,
        None => {
            log::error!("Failed to decode barometer from {:?}", raw);
            return None;
        }
    };

    // An all-zero field is a glitched sensor read, not a pressure.
    if value == 0 {
        log::debug!("Discarding zeroed barometer reading {:?}", raw);
        return None;
    }

    Some(if raw.ends_with('M') {
        f64::from(value) * INHG_PER_MBAR
    } else {
        f64::from(value) / 100.0
    })
}

/// Decode a rainfall line (total or rate) to inches.
pub fn rain(raw: &str) -> Option<f64> {
    // Rate lines open with a second R; drop it and the payload parses
    // like a total.
    let body = if raw.get(1..2) == Some("R") {
        &raw[1..]
    } else {
        raw
    };

    let inches = if body.ends_with('C') {
        // Centimeter payloads run one digit wider.
        parse_int(body, 1..7).map(|value| f64::from(value) / 100.0 / CM_PER_INCH)
    } else {
        parse_int(body, 1..6).map(|value| f64::from(value) / 100.0)
    };

    if inches.is_none() {
        log::error!("Failed to decode rainfall from {:?}", raw);
    }
    inches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_fahrenheit() {
        assert_eq!(temperature("t072"), Some(72.0));
        assert_eq!(temperature("T005"), Some(5.0));
        assert_eq!(temperature("T-05"), Some(-5.0));
    }

    #[test]
    fn test_temperature_celsius_converts() {
        assert_eq!(temperature("t100C"), Some(212.0));
        assert_eq!(temperature("T000C"), Some(32.0));
        assert_eq!(temperature("T022C"), Some(c_to_f(22.0)));
    }

    #[test]
    fn test_temperature_wind_chill_prefix() {
        assert_eq!(temperature("cT028"), Some(28.0));
        assert_eq!(temperature("cT010C"), Some(50.0));
    }

    #[test]
    fn test_temperature_rejects_malformed() {
        assert_eq!(temperature(""), None);
        assert_eq!(temperature("T"), None);
        assert_eq!(temperature("T07"), None);
        assert_eq!(temperature("TXXX"), None);
    }

    #[test]
    fn test_humidity() {
        assert_eq!(humidity("h45"), Some(45.0));
        assert_eq!(humidity("H87"), Some(87.0));
        assert_eq!(humidity("H"), None);
        assert_eq!(humidity("Hxx"), None);
    }

    #[test]
    fn test_wind_speed_unit_letters() {
        assert_eq!(wind_speed("W010M270D"), Some(10.0));
        assert_eq!(wind_speed("W010K270D"), Some(10.0 * MILE_PER_KNOT));
        assert_eq!(wind_speed("W010L270D"), Some(kph_to_mph(10.0)));
        // An unrecognized unit letter passes the value through as mph.
        assert_eq!(wind_speed("W010X270D"), Some(10.0));
    }

    #[test]
    fn test_wind_speed_high_low_prefix() {
        assert_eq!(wind_speed("<W015M350D"), Some(15.0));
        assert_eq!(wind_speed(">W015M350D"), Some(15.0));
    }

    #[test]
    fn test_wind_speed_requires_unit_letter() {
        assert_eq!(wind_speed("W010"), None);
        assert_eq!(wind_speed(""), None);
    }

    #[test]
    fn test_wind_direction() {
        assert_eq!(wind_direction("W010K270D"), Some(270.0));
        assert_eq!(wind_direction("<W015M350D"), Some(350.0));
        assert_eq!(wind_direction("W010"), None);
    }

    #[test]
    fn test_barometer_inhg() {
        assert_eq!(barometer("B2992"), Some(29.92));
        assert_eq!(barometer("B3012"), Some(30.12));
    }

    #[test]
    fn test_barometer_millibars() {
        assert_eq!(barometer("B1013M"), Some(1013.0 * INHG_PER_MBAR));
    }

    #[test]
    fn test_barometer_zero_discarded() {
        assert_eq!(barometer("B0000"), None);
        assert_eq!(barometer("B0000M"), None);
    }

    #[test]
    fn test_barometer_rejects_malformed() {
        assert_eq!(barometer(""), None);
        assert_eq!(barometer("B99"), None);
        assert_eq!(barometer("Bxxxx"), None);
    }

    #[test]
    fn test_rain_total() {
        assert_eq!(rain("R00500"), Some(5.0));
        assert_eq!(rain("R00480"), Some(4.8));
        assert_eq!(rain("R00000"), Some(0.0));
    }

    #[test]
    fn test_rain_rate_strips_second_r() {
        assert_eq!(rain("RR00012"), Some(0.12));
        assert_eq!(rain("RR00000"), Some(0.0));
    }

    #[test]
    fn test_rain_metric() {
        assert_eq!(rain("R000508C"), Some(508.0 / 100.0 / CM_PER_INCH));
        assert_eq!(rain("RR000254C"), Some(254.0 / 100.0 / CM_PER_INCH));
    }

    #[test]
    fn test_rain_rejects_malformed() {
        assert_eq!(rain(""), None);
        assert_eq!(rain("R123"), None);
        assert_eq!(rain("Rxxxxx"), None);
    }
}
