//! Environment variable validation with helpful error messages
//!
//! Provides consistent validation for environment variable values with:
//! - Clear warning messages for invalid values
//! - Levenshtein-based typo suggestions
//! - Fallback to "not set" when the value is unusable

use std::io::Write;

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    /// Accepted spellings of a boolean switch
    pub const BOOL_VALUES: &'static [&'static str] =
        &["1", "true", "yes", "on", "0", "false", "no", "off"];

    /// Create a new validator for the given environment variable
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Validator for a boolean switch
    pub fn boolean(var_name: &'a str) -> Self {
        Self::new(var_name, Self::BOOL_VALUES)
    }

    /// Parse a value, returning `None` (with a warning on `writer`) if invalid
    pub fn parse_with_writer<T, F, W>(&self, value: &str, parser: F, writer: &mut W) -> Option<T>
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        let parsed = parser(value);
        if parsed.is_none() {
            let suggestion = self.suggest(value);
            let _ = writeln!(
                writer,
                "Warning: Invalid {} value '{}'{}",
                self.var_name, value, suggestion
            );
            let _ = writeln!(writer, "Valid values: {}", self.valid_values.join(", "));
        }
        parsed
    }

    /// Suggest a valid value based on Levenshtein distance
    fn suggest(&self, value: &str) -> String {
        let input = value.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for &valid in self.valid_values {
            let dist = levenshtein(&input, valid);
            match best {
                None => best = Some((valid, dist)),
                Some((_, best_dist)) if dist < best_dist => best = Some((valid, dist)),
                _ => {}
            }
        }

        match best {
            Some((suggested, dist)) if dist <= 2 && dist > 0 => {
                format!(". Did you mean '{}'?", suggested)
            }
            _ => String::new(),
        }
    }
}

/// Parse a boolean switch value
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let a_len = a_bytes.len();
    let b_len = b_bytes.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
