pub mod ingest {

    /// Used when a check interval phrase cannot be understood (one day).
    pub const DEFAULT_CHECK_INTERVAL_MINUTES: i32 = 1440;

    /// Applied when the request omits `checkInterval`.
    pub const DEFAULT_CHECK_INTERVAL_PHRASE: &str = "1 day";

    pub const UNKNOWN_COMPANY_NAME: &str = "Unknown Company";

    pub const CAREERS_SUFFIX: &str = "/careers";
}

pub mod minutes {

    pub const PER_HOUR: i32 = 60;

    pub const PER_DAY: i32 = 60 * 24;

    pub const PER_WEEK: i32 = 60 * 24 * 7;
}
