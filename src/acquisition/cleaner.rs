//! Sensor Log Text Cleaner
//!
//! Strips page boilerplate from exported sensor logs before they are handed
//! to the tabular parser. Exports interleave the comma-separated readings with
//! page markers of the form `<uuid>Page <n>`, e.g.
//!
//! ```text
//! 3f1c2a9e-4b7d-4c1a-9e2f-0a1b2c3d4e5fPage 12
//! ```
//!
//! Cleaning removes every marker (globally, including adjacent ones), trims
//! every line, drops blank lines, and rejoins the survivors with a single
//! `\n`. It never fails: malformed input just yields a shorter blob.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// UUID immediately followed by a page marker. Lower-case hex only.
pub const BOILERPLATE_PATTERN: &str =
    r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}Page \d+";

static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(BOILERPLATE_PATTERN).expect("boilerplate pattern is a valid regex")
});

/// Bookkeeping from a single cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Boilerplate markers removed
    pub boilerplate_removed: usize,
    /// Lines in the raw blob (split on `\n`)
    pub lines_in: usize,
    /// Non-empty lines kept
    pub lines_out: usize,
}

/// Clean a raw sensor log blob.
pub fn clean_log(raw: &str) -> String {
    clean_log_with_stats(raw).0
}

/// Clean a raw sensor log blob and report what was removed.
pub fn clean_log_with_stats(raw: &str) -> (String, CleanStats) {
    let boilerplate_removed = count_boilerplate(raw);
    let stripped = BOILERPLATE_RE.replace_all(raw, "");

    let mut lines_in = 0;
    let kept: Vec<&str> = stripped
        .split('\n')
        .inspect(|_| lines_in += 1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let stats = CleanStats {
        boilerplate_removed,
        lines_in,
        lines_out: kept.len(),
    };

    debug!(
        removed = stats.boilerplate_removed,
        lines_in = stats.lines_in,
        lines_out = stats.lines_out,
        "Cleaned sensor log"
    );

    (kept.join("\n"), stats)
}

/// Number of boilerplate markers present in `text`.
pub fn count_boilerplate(text: &str) -> usize {
    BOILERPLATE_RE.find_iter(text).count()
}
