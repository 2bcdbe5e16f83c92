//! Process exit codes

/// Everything worked
pub const EXIT_SUCCESS: i32 = 0;
/// The command failed and changed nothing it reported as done
pub const EXIT_ERROR: i32 = 1;
/// The command partly succeeded (e.g. a column kept some leads)
pub const EXIT_WARNING: i32 = 2;
