/// Lowercases `text` and collapses every run of whitespace into one ASCII space.
///
/// Leading and trailing runs are collapsed like any other run, never trimmed.
/// Lowercasing runs over the whole string so word-final sigma becomes `ς`.
pub fn normalize(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars() {
        if is_separator(c) {
            if !in_whitespace {
                collapsed.push(' ');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            collapsed.push(c);
        }
    }

    collapsed.to_lowercase()
}

/// Unicode whitespace plus the ASCII file, group, record and unit separators,
/// which PDF text layers use between fields.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
