/// Storage key of the last persisted, filtered subscription snapshot
pub const SNAPSHOT_KEY: &str = "previousData.json";

/// Storage key of the daily notification counter
pub const QUOTA_STATS_KEY: &str = "emailStats.json";

/// Default number of change reports allowed per calendar day
pub const DEFAULT_DAILY_LIMIT: u32 = 50;

/// Default business unit the watcher cares about (Step In Backcity)
pub const DEFAULT_BUSINESS_UNIT_ID: i64 = 2612;

/// Subject of change-report e-mails
pub const CHANGE_REPORT_SUBJECT: &str = "Step In Subscription Changes Alert";

/// Subject of error-report e-mails
pub const ERROR_REPORT_SUBJECT: &str = "Step In API Error Alert";

/// Minor units per major currency unit, for display
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;
