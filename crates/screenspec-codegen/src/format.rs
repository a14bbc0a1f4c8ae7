//! Deterministic output formatting.

/// Normalize generated source text.
///
/// Line endings become `\n`, trailing whitespace is stripped, runs of blank
/// lines collapse to one and the text ends with exactly one newline.
pub fn format_output(source: &str) -> String {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(normalized.len() + 1);
    let mut previous_blank = true;

    for line in normalized.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if previous_blank {
                continue;
            }
            previous_blank = true;
        } else {
            previous_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }

    while out.ends_with("\n\n") {
        out.pop();
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}
