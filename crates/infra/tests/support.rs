use std::io;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use pumpsync_domain::{SourceTransaction, TransactionRecord};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Fixed clock shared by the fixtures.
pub fn reference_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 20)
        .expect("valid date")
        .and_hms_opt(15, 30, 0)
        .expect("valid time")
}

/// Eligible row for tenant 1, dispensed `minutes_ago` before the reference clock.
pub fn pump_row(id: i64, minutes_ago: i64) -> SourceTransaction {
    let timestamp = reference_now() - TimeDelta::minutes(minutes_ago);
    let record = TransactionRecord {
        transaction_id: id,
        timestamp,
        volume: 25.5,
        unit_price: 5.89,
        total_value: 150.2,
        processed_flag: 0,
        nozzle_label: "GASOLINA COMUM".to_string(),
        nozzle_number: 3,
        company_label: "POSTO ITAJAI".to_string(),
    };
    SourceTransaction::new(record, 1)
}

/// Captures formatted log output for the current thread.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Install as the thread-local default subscriber until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter { buffer: Arc::clone(&self.buffer) }
    }
}
