use memchr::memchr_iter;

use crate::{ConvertOptions, Error, Result};

/// Check that every line holds exactly one `=`.
///
/// Returns the first offending line as an invalid-format error. Blank lines
/// count as offending only in strict mode.
pub fn validate_lines(input: &str, options: &ConvertOptions) -> Result<()> {
    for (idx, line) in input.split(options.line_separator.as_str()).enumerate() {
        let line = line.trim();
        if line.is_empty() && !options.strict {
            continue;
        }
        let count = count_separators(line);
        if count != 1 {
            let message = if count == 0 {
                "expected `key=value`, found no '='".to_string()
            } else {
                format!("expected exactly one '=', found {count}")
            };
            return Err(Error::invalid_format(message).at_line(idx + 1));
        }
    }
    Ok(())
}

pub fn is_valid(input: &str, options: &ConvertOptions) -> bool {
    validate_lines(input, options).is_ok()
}

fn count_separators(line: &str) -> usize {
    memchr_iter(b'=', line.as_bytes()).count()
}
