//! Line-based preamble insertion.

/// Splice `to_insert` into `text` as its own line before the line at
/// zero-based index `line`.
///
/// `line == 0` prefixes `to_insert` as a new first line, leaving the rest of
/// the text untouched. Otherwise the text is split on `\n`, the insertion is
/// emitted just before index `line`, and every emitted line (including the
/// last) is terminated with `\n`. This exact line-ending behavior is part of
/// the external contract: the result feeds the content hash used for cache
/// file naming.
///
/// If `line` is beyond the end of the text, the insertion is dropped and a
/// warning is logged. Dropping (rather than appending) keeps cache file names
/// stable for sites that relied on the historical behavior.
#[must_use]
pub fn insert_after_line(text: &str, line: usize, to_insert: &str) -> String {
    if line == 0 {
        return format!("{to_insert}\n{text}");
    }

    let lines: Vec<&str> = text.split('\n').collect();
    if line >= lines.len() {
        tracing::warn!(
            line,
            line_count = lines.len(),
            "insertion line out of range, directive dropped"
        );
    }

    let mut result = String::with_capacity(text.len() + to_insert.len() + 2);
    for (i, l) in lines.iter().enumerate() {
        if i == line {
            result.push_str(to_insert);
            result.push('\n');
        }
        result.push_str(l);
        result.push('\n');
    }
    result
}
