/// Converts a 1-based line and column, as reported by `serde_json`, into a byte offset
/// into `source`. Out-of-range positions clamp to the end of the text.
pub fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within = column.saturating_sub(1).min(text.len());
            return offset + within;
        }
        offset += text.len();
    }
    source.len()
}

/// Shortens a design-tool variable id to its last two numeric segments.
///
/// `VariableID:4d2f0c/1234:5678` becomes `1234:5678` and `VariableID:12:34` becomes `12:34`.
/// Ids without a `:` are already short.
pub fn short_id(id: &str) -> String {
    let mut parts = id.rsplit(':');
    let (Some(last), Some(middle)) = (parts.next(), parts.next()) else {
        return id.to_string();
    };
    let middle = middle.rsplit('/').next().unwrap_or(middle);
    format!("{middle}:{last}")
}
