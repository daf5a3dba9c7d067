//! Process exit codes

pub const SUCCESS: i32 = 0;
/// At least one module failed to parse or resolve
pub const ANALYSIS_FAILED: i32 = 1;
