// Health Log - Core Library
// Exposes all modules for use in the TUI binary and tests

pub mod bmi;
pub mod record;
pub mod store;
pub mod form;
pub mod session;
pub mod series;     // Chart data for the history views
pub mod config;
pub mod cli;
pub mod telemetry;
pub mod errors;

// Re-export commonly used types
pub use bmi::{
    classify, compute_bmi, round_one_decimal,
    BmiReading, BmiStatus, NORMAL_RANGE_LABEL,
};
pub use record::{Bounds, HealthRecord, DIASTOLIC, HEIGHT_CM, SYSTOLIC, WEIGHT_KG};
pub use store::RecordStore;
pub use form::{EntryForm, FieldId, NumericField};
pub use session::{ClearState, Notice, NoticeLevel, Session, EMPTY_STATE_MESSAGE};
pub use series::{series_for, ChartBounds, ChartMetric, Series};
pub use config::{Config, FormDefaults, LoggingConfig};
pub use errors::{AppError, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
