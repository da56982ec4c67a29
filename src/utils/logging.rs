//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the ExamGuard application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// The returned guard must be held for the lifetime of the process; dropping
/// it stops the background writer and loses buffered file output.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "examguard.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a recorded audit action with structured data
pub fn log_audit_action(user_id: i64, action: &str, exam_id: Option<i64>, status: bool) {
    info!(
        user_id = user_id,
        action = action,
        exam_id = exam_id,
        status = status,
        "Audit action recorded"
    );
}

/// Log an attendance status change
pub fn log_attendance_change(record_id: i64, exam_id: i64, status: &str, is_on_toilet: bool) {
    info!(
        record_id = record_id,
        exam_id = exam_id,
        status = status,
        is_on_toilet = is_on_toilet,
        "Attendance record updated"
    );
}

/// Log the outcome of a CSV import batch
pub fn log_import_summary(batch_id: &str, total_rows: usize, imported: usize, failed: usize) {
    if failed > 0 {
        warn!(
            batch_id = batch_id,
            total_rows = total_rows,
            imported = imported,
            failed = failed,
            "CSV import finished with row errors"
        );
    } else {
        info!(
            batch_id = batch_id,
            total_rows = total_rows,
            imported = imported,
            "CSV import finished"
        );
    }
}

