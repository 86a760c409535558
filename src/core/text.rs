//! Line helpers used to turn a raw fragment body into display text.

/// Empty, or made only of whitespace.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Drop blank lines at both ends. Leading blank lines would otherwise
/// hide the indentation shared by the remaining lines.
pub fn trim_empty_lines<S: AsRef<str>>(lines: &[S]) -> &[S] {
    let start = lines
        .iter()
        .position(|l| !is_blank(l.as_ref()))
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !is_blank(l.as_ref()))
        .map_or(start, |i| i + 1);
    &lines[start..end]
}

/// First `n` characters of `line`, or the whole line when shorter.
fn char_prefix(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

/// True when the first `prefix_len` characters are whitespace and
/// identical across all lines.
pub fn space_section_equals<S: AsRef<str>>(lines: &[S], prefix_len: usize) -> bool {
    let Some(first) = lines.first() else {
        return false;
    };
    let first = first.as_ref();
    if first.chars().count() < prefix_len {
        return false;
    }
    let expected = char_prefix(first, prefix_len);
    if !is_blank(expected) {
        return false;
    }
    lines
        .iter()
        .all(|line| char_prefix(line.as_ref(), prefix_len) == expected)
}

/// Length in characters of the whitespace prefix shared by every
/// non-blank line. Tabs and spaces never match each other.
pub fn common_start_padding<S: AsRef<str>>(lines: &[S]) -> usize {
    let content: Vec<&str> = lines
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| !is_blank(l))
        .collect();

    let mut padding = 0;
    while space_section_equals(&content, padding + 1) {
        padding += 1;
    }
    padding
}

/// Remove the common indentation. Blank lines come out empty.
pub fn clear_indentation<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let padding = common_start_padding(lines);
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            if is_blank(line) {
                String::new()
            } else {
                line[char_prefix(line, padding).len()..].to_string()
            }
        })
        .collect()
}
