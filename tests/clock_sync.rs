//! Station clock reads and writes.

mod common;

use chrono::{TimeZone, Utc};
use common::{MockTransport, Step};
use id5001::Station;

fn init_script() -> Vec<Step> {
    vec![
        Step::Respond(""),
        Step::Respond(""),
        Step::Respond(""),
        Step::Respond(""),
        Step::Respond("R00000"),
    ]
}

#[test]
fn test_get_time_reads_station_clock() {
    let mut script = init_script();
    script.extend([Step::Respond("102335"), Step::Respond("991231")]);
    let transport = MockTransport::new(script);
    let handle = transport.clone();
    let mut station = Station::with_transport(transport).unwrap();

    let timestamp = station.get_time();

    assert_eq!(
        timestamp,
        Utc.with_ymd_and_hms(1999, 12, 31, 10, 23, 35).unwrap()
    );
    assert_eq!(handle.sent()[5..], ["ATRT", "ATRD"]);
}

#[test]
fn test_get_time_falls_back_on_unparseable_response() {
    let mut script = init_script();
    script.push(Step::Respond("garbage"));
    let transport = MockTransport::new(script);
    let handle = transport.clone();
    let mut station = Station::with_transport(transport).unwrap();

    let before = Utc::now();
    let timestamp = station.get_time();
    let after = Utc::now();

    assert!(before <= timestamp && timestamp <= after);
    // The date was never requested once the time failed to parse.
    assert_eq!(handle.sent()[5..], ["ATRT"]);
}

#[test]
fn test_get_time_falls_back_on_impossible_fields() {
    let mut script = init_script();
    script.extend([Step::Respond("106035"), Step::Respond("991231")]);
    let transport = MockTransport::new(script);
    let mut station = Station::with_transport(transport).unwrap();

    let before = Utc::now();
    let timestamp = station.get_time();
    let after = Utc::now();

    assert!(before <= timestamp && timestamp <= after);
}

#[test]
fn test_get_time_falls_back_on_transport_fault() {
    let mut script = init_script();
    script.push(Step::Fail);
    let transport = MockTransport::new(script);
    let mut station = Station::with_transport(transport).unwrap();

    let before = Utc::now();
    let timestamp = station.get_time();
    let after = Utc::now();

    assert!(before <= timestamp && timestamp <= after);
}

#[test]
fn test_set_time_writes_clock_then_date() {
    let transport = MockTransport::new(init_script());
    let handle = transport.clone();
    let mut station = Station::with_transport(transport).unwrap();

    let timestamp = Utc.with_ymd_and_hms(1999, 7, 4, 9, 3, 5).unwrap();
    station.set_time(timestamp).unwrap();

    assert_eq!(handle.sent()[5..], ["ATST090305", "ATSD990704"]);

    station.close();
    assert!(handle.is_closed());
}

#[test]
fn test_set_time_pads_current_century() {
    let transport = MockTransport::new(init_script());
    let handle = transport.clone();
    let mut station = Station::with_transport(transport).unwrap();

    let timestamp = Utc.with_ymd_and_hms(2005, 11, 30, 23, 59, 58).unwrap();
    station.set_time(timestamp).unwrap();

    assert_eq!(handle.sent()[5..], ["ATST235958", "ATSD051130"]);
}
