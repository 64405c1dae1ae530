//! `tmr-monitor`: run the clock on a host thread and sample it through the protocol.
//!
//! Usage: `tmr-monitor [config.toml]`
//!
//! ```toml
//! sample_interval_ms = 100
//! samples = 10
//! reset_ms_after = 5        # optional, sample number after which ms-count is cleared
//! reset_decims_after = 7    # optional, same for decims-count
//! log_level = "info"
//! ```

use log::{LevelFilter, Metadata, Record};
use serde::Deserialize;
use std::error::Error;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tmr_clock::{Command, TimerDevice, TimerThread, result_code};

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MonitorConfig {
    sample_interval_ms: u64,
    samples: u32,
    reset_ms_after: Option<u32>,
    reset_decims_after: Option<u32>,
    log_level: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 100,
            samples: 10,
            reset_ms_after: None,
            reset_decims_after: None,
            log_level: "info".into(),
        }
    }
}

/// Stderr logger with an elapsed-seconds prefix.
struct StderrLogger {
    start: Instant,
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

impl log::Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let timestamp = self.start.elapsed().as_secs_f64();
        eprintln!(
            "[{:>10.3}] {:<5}: {}",
            timestamp,
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {}
}

fn init_logger(level: LevelFilter) -> Result<(), String> {
    let logger = LOGGER.get_or_init(|| StderrLogger {
        start: Instant::now(),
    });
    log::set_logger(logger)
        .map(|()| log::set_max_level(level))
        .map_err(|_| "logger already installed".to_string())
}

fn load_config() -> Result<MonitorConfig, Box<dyn Error>> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(MonitorConfig::default());
    };

    let text = std::fs::read_to_string(&path)
        .map_err(|e| format!("cannot read config {}: {}", path, e))?;
    let config = toml::from_str(&text)?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;

    let level: LevelFilter = config
        .log_level
        .parse()
        .map_err(|_| format!("invalid log_level {:?}", config.log_level))?;
    init_logger(level)?;

    log::info!("{} {} starting: {:?}", tmr_clock::NAME, tmr_clock::VERSION, config);

    let device: Arc<TimerDevice> = Arc::new(TimerDevice::new());
    let timer = TimerThread::spawn(Arc::clone(&device))?;
    let session = device.open()?;

    println!("{:>6}  {:>12}  {:>10}  {:>8}", "sample", "ms", "decims", "status");

    for sample in 1..=config.samples {
        std::thread::sleep(Duration::from_millis(config.sample_interval_ms));

        let mut ms = [0u8; 8];
        session.read(8, &mut ms[..])?;

        let mut decims = [0u8; 4];
        session.read(4, &mut decims[..])?;

        let status = result_code(session.read(0, &mut [0u8; 0][..]));

        println!(
            "{:>6}  {:>12}  {:>10}  {:>8}",
            sample,
            u64::from_ne_bytes(ms),
            u32::from_ne_bytes(decims),
            status
        );

        if config.reset_ms_after == Some(sample) {
            session.write(&[Command::ResetMs as u8][..], 1)?;
        }
        if config.reset_decims_after == Some(sample) {
            session.write(&[Command::ResetDecims as u8][..], 1)?;
        }
    }

    session.close();
    timer.stop();

    log::info!("done");
    Ok(())
}
