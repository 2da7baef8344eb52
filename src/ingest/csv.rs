use std::collections::BTreeMap;

/// One data row keyed by header name, before any typing.
pub type RawRecord = BTreeMap<String, String>;

const SEPARATOR: char = ',';
const QUOTE: char = '"';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parses a header row plus data rows into raw records.
///
/// A leading byte-order mark is ignored. Rows whose field count differs from
/// the header are skipped. Fewer than two lines yields no records.
pub fn parse_table(text: &str) -> Vec<RawRecord> {
    let mut lines = text.trim_start_matches(BYTE_ORDER_MARK).trim().lines();
    let header = match lines.next() {
        Some(line) => split_line(line),
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        let parts = split_line(line);
        if parts.len() != header.len() {
            skipped += 1;
            continue;
        }
        let row: RawRecord = header.iter().cloned().zip(parts).collect();
        rows.push(row);
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped rows with mismatched field count");
    }
    rows
}

/// Splits one line on commas outside double quotes. A doubled quote inside a
/// quoted field decodes to a literal quote; every field is trimmed.
pub fn split_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == QUOTE {
            if in_quotes && chars.peek() == Some(&QUOTE) {
                current.push(QUOTE);
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
            continue;
        }
        if ch == SEPARATOR && !in_quotes {
            out.push(current.trim().to_string());
            current.clear();
            continue;
        }
        current.push(ch);
    }
    out.push(current.trim().to_string());
    out
}
