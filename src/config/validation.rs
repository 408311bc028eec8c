//! Config checks that run before and after deserialization.
//!
//! Unknown keys are found by walking the raw `toml::Value` tree against the
//! list of known dotted paths; each gets a warning, with the nearest known
//! key as a suggestion. Range checks run on the parsed `SurveyConfig`.
//! Unknown keys never fail a load.

use std::collections::BTreeSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path for `SurveyConfig`.
///
/// Maintained by hand to match the structs in survey_config.rs.
pub fn known_config_keys() -> BTreeSet<&'static str> {
    let keys: &[&str] = &[
        // [report]
        "report",
        "report.head_rows",
        "report.top_correlations",
        // [plots]
        "plots",
        "plots.enabled",
        "plots.output_dir",
        "plots.width",
        "plots.height",
        "plots.histogram_columns",
        "plots.histogram_bins",
        "plots.kde_points",
        "plots.time_series_columns",
        "plots.time_series_rows",
        "plots.box_plot_columns",
        "plots.pair_plot_columns",
        "plots.outlier_columns",
        "plots.rolling_columns",
        "plots.rolling_window",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Dotted paths of every key in `value`, parents before children:
/// `{ plots = { width = 1 } }` gives `["plots", "plots.width"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Closest known key within edit distance 3. Ties go to the first key in
/// lexical order.
pub fn suggest_correction(unknown: &str, known: &BTreeSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist <= 3 && best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((k, dist));
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for keys `SurveyConfig` does not know. Unparseable TOML yields
/// none; serde reports it afterwards.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Range checks on a parsed config.
///
/// Returns (errors, warnings): errors are values the chart stage cannot
/// work with; warnings are legal but unusual.
pub fn validate_ranges(config: &super::SurveyConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let p = &config.plots;

    let must_be_positive = [
        ("plots.width", p.width as usize),
        ("plots.height", p.height as usize),
        ("plots.histogram_bins", p.histogram_bins),
        ("plots.kde_points", p.kde_points),
        ("plots.rolling_window", p.rolling_window),
    ];
    for (field, value) in must_be_positive {
        if value == 0 {
            errors.push(format!("{field} = 0 must be > 0"));
        }
    }

    for (field, value) in [("plots.width", p.width), ("plots.height", p.height)] {
        if value > super::defaults::MAX_CANVAS_SIDE {
            errors.push(format!(
                "{field} = {value} exceeds the {} pixel limit",
                super::defaults::MAX_CANVAS_SIDE
            ));
        }
    }

    if p.kde_points == 1 {
        errors.push("plots.kde_points = 1 must be at least 2".to_string());
    }

    if p.width < 200 || p.height < 200 {
        warnings.push(ValidationWarning {
            field: "plots.width".to_string(),
            message: format!(
                "canvas {}x{} is very small, charts may be unreadable",
                p.width, p.height
            ),
            suggestion: None,
        });
    }

    if p.histogram_columns > 9 {
        warnings.push(ValidationWarning {
            field: "plots.histogram_columns".to_string(),
            message: format!(
                "histogram_columns = {} exceeds the 3x3 grid, extra channels are not drawn",
                p.histogram_columns
            ),
            suggestion: None,
        });
    }

    if p.outlier_columns > 6 {
        warnings.push(ValidationWarning {
            field: "plots.outlier_columns".to_string(),
            message: format!(
                "outlier_columns = {} exceeds the 2x3 grid, extra channels are not drawn",
                p.outlier_columns
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("histogram_bin", "histogram_bins"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [plots]
            width = 800
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"plots".to_string()));
        assert!(keys.contains(&"plots.width".to_string()));
    }

    #[test]
    fn test_unknown_key_gets_suggestion() {
        let warnings = validate_unknown_keys("[plots]\nrolling_windw = 10\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "plots.rolling_windw");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("plots.rolling_window"));
        assert!(warnings[0].to_string().contains("did you mean"));
    }

    #[test]
    fn test_far_off_key_has_no_suggestion() {
        let warnings = validate_unknown_keys("[completely_unrelated]\n");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].suggestion.is_none());
    }

    #[test]
    fn test_invalid_toml_yields_no_warnings() {
        assert!(validate_unknown_keys("[[[").is_empty());
    }
}
