//! Poll an ID-5001 station and print one loop packet per line as JSON.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;

use id5001::{DriverConfig, Snapshot, Station, DEFAULT_PORT, DRIVER_VERSION};

/// Poll a Heathkit ID-5001 Weather Computer and emit weewx-style loop
/// packets, one JSON object per line.
#[derive(Debug, Parser)]
#[command(name = "id5001", version, about, long_about = None)]
struct Args {
    /// Serial port the station is attached to
    #[arg(short, long, default_value = DEFAULT_PORT)]
    port: String,

    /// Seconds between loop packets
    #[arg(long, default_value_t = 5.0)]
    loop_interval: f64,

    /// Poll attempts before giving up on a cycle
    #[arg(long, default_value_t = 5)]
    max_tries: u32,

    /// Seconds to wait after a failed poll attempt
    #[arg(long, default_value_t = 5)]
    retry_wait: u64,

    /// Set the station clock from system time before polling
    #[arg(long)]
    sync_clock: bool,

    /// Log serial traffic
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.loop_interval.is_finite() || args.loop_interval < 0.0 {
        eprintln!("Error: loop interval must be a non-negative number of seconds");
        std::process::exit(1);
    }

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = DriverConfig {
        port: args.port,
        max_tries: args.max_tries,
        retry_wait: args.retry_wait,
        loop_interval: args.loop_interval,
        ..Default::default()
    };

    log::info!("Driver version is {}", DRIVER_VERSION);
    log::info!(
        "Polling a {} every {} seconds",
        config.model,
        config.loop_interval
    );

    let mut station = Station::open(&config.port)?;

    if args.sync_clock {
        station.set_time(chrono::Utc::now())?;
    }
    log::info!("Station clock reads {}", station.get_time());

    let retry_wait = Duration::from_secs(config.retry_wait);
    let loop_interval = Duration::from_secs_f64(config.loop_interval);
    let mut last_poll = Instant::now();

    loop {
        // Wait out the remainder of the interval before the next cycle.
        let next_cycle = last_poll + loop_interval;
        if let Some(sleep_time) = next_cycle.checked_duration_since(Instant::now()) {
            thread::sleep(sleep_time);
        }

        let readings = match station.poll(config.max_tries, retry_wait) {
            Ok(readings) => readings,
            Err(e) => {
                station.close();
                return Err(e.into());
            }
        };

        // Stamp after the poll so retries do not skew the timestamp.
        last_poll = Instant::now();
        let packet = Snapshot::now(readings);
        println!("{}", serde_json::to_string(&packet)?);
    }
}
