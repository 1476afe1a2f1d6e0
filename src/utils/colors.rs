/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Balance color:
/// 0 remaining → green (settled)
/// \>0 remaining → red (money still owed)
pub fn color_for_due(due_cents: i64) -> &'static str {
    if due_cents > 0 { RED } else { GREEN }
}
