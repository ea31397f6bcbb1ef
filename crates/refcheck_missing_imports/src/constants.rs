/// Maximum number of bare specifiers listed in a report
pub const UNVERIFIED_SAMPLE_LIMIT: usize = 50;

/// Process exit status when at least one import is missing
pub const MISSING_EXIT_CODE: i32 = 2;
