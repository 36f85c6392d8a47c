pub mod time_utils;

pub use time_utils::{
    calendar_date_from_utc, format_report_timestamp, Clock, FixedClock, SystemClock,
    DEFAULT_QUOTA_TZ,
};
