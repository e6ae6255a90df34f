//! Format-wide constants and default values.

use chrono::NaiveDate;

/// Format revision understood by this codec.
pub const SUPPORTED_REVISION: i64 = 1;

/// Default MVA/MW base.
pub const MVA_BASE: f64 = 100.0;

/// Default kV base.
pub const KV_BASE: f64 = 1.0;

/// Default frequency base (Hz).
pub const HZ_BASE: u32 = 50;

/// Date written when a record carries no explicit date.
pub const DEFAULT_DATE: &str = "1900/01/01";

/// `chrono` format string of record dates.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

pub const STATUS_ON: u8 = 1;
pub const STATUS_OFF: u8 = 0;

/// Absolute maximum value of circuit flow.
pub const FLOW_MAX: f64 = 9999.0;

// Transformer control types
pub const XFMR_FIXED_TAP_ANGLE: i64 = 1;
pub const XFMR_FIXED_TAP_VAR_ANGLE: i64 = 2;
pub const XFMR_VAR_TAP_FIXED_ANGLE: i64 = 3;
pub const XFMR_VAR_TAP_ANGLE: i64 = 4;

/// Render a date the way record date columns store it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a record date column. Returns `None` for blank or malformed dates.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}
