//! Turning a directive's comment block into plain instruction text.
//!
//! This is a post-processing step over [`Directive::tag_text`](crate::Directive);
//! extraction never depends on it.

/// Strip the comment marker and sentinel from each line and drop empty lines
///
/// Per line, in order: leading spaces/tabs, the first of `markers` the line
/// opens with (list longer markers first), leading whitespace, the `sentinel`
/// when it stands alone as a word, then surrounding whitespace.
pub fn prompt_text(tag_text: &str, markers: &[&str], sentinel: &str) -> String {
    tag_text
        .split('\n')
        .map(|line| strip_line(line, markers, sentinel))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line<'a>(line: &'a str, markers: &[&str], sentinel: &str) -> &'a str {
    let line = line.trim_start_matches([' ', '\t']);
    let line = markers
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .unwrap_or(line)
        .trim_start();
    let line = match line.strip_prefix(sentinel) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest,
        _ => line,
    };
    line.trim()
}
