use std::sync::LazyLock;

use regex::Regex;

/// Ordered strip rules. The order matters: fence lines go before inline
/// code, images before links, link bodies before the blockquote sweep.
static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Setext underline glued to the previous line
        (r"\n={2,}", "\n"),
        // Strikethrough markers
        (r"~~", ""),
        // Fenced code block delimiters, with their line
        (r"(?m)^`{3}.*\n?", ""),
        // HTML tags, keeping autolink targets
        (r"<(.*?)>", "${1}"),
        // Setext-style header underlines on their own line
        (r"(?m)^[=\-]{2,}[ \t]*$", ""),
        // Footnote markers and definitions
        (r"(?m)\[\^.+?\](: .*?$)?", ""),
        // Reference-style link definitions
        (r"(?m)^[ \t]{0,2}\[.*?\]: .*?$", ""),
        // Images
        (r"!\[.*?\][\[\(].*?[\]\)]", ""),
        // Inline and reference links, keeping the text
        (r"\[(.*?)\][\[\(].*?[\]\)]", "${1}"),
        // Blockquote markers (any remaining angle bracket)
        (r">", ""),
        // Atx-style headers
        (r"(?m)^#{1,6}[ \t]*([^#\n]*?)[ \t]*#{0,6}[ \t]*$", "${1}"),
        // Emphasis, strongest first
        (r"\*\*\*(\S.*?\S|\S)\*\*\*", "${1}"),
        (r"___(\S.*?\S|\S)___", "${1}"),
        (r"\*\*(\S.*?\S|\S)\*\*", "${1}"),
        (r"__(\S.*?\S|\S)__", "${1}"),
        (r"\*(\S.*?\S|\S)\*", "${1}"),
        (r"_(\S.*?\S|\S)_", "${1}"),
        // Horizontal rules
        (r"(?m)^-{3,}[ \t]*$", ""),
        // Inline code
        (r"`(.+?)`", "${1}"),
        // Collapse runs of blank lines
        (r"\n{3,}", "\n\n"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("valid markdown rule"),
            replacement,
        )
    })
    .collect()
});

/// Reduce markdown to plain text: headers, emphasis, links, images, code,
/// blockquotes, and footnotes are stripped; link text survives.
pub fn strip_markdown(text: &str) -> String {
    let mut out = text.to_string();
    for (re, replacement) in RULES.iter() {
        out = re.replace_all(&out, *replacement).into_owned();
    }
    out
}

/// One-line excerpt for an idea card: markdown stripped, the issue
/// template's "Project description" header dropped, truncated on a char
/// boundary with an ellipsis.
pub fn card_excerpt(body: &str, max_chars: usize) -> String {
    let stripped = strip_markdown(body);
    let trimmed = stripped.trim_start();
    let without_header = trimmed
        .strip_prefix("Project description")
        .map(str::trim_start)
        .unwrap_or(trimmed);

    let mut line: String = without_header
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .take(max_chars)
        .collect();
    if without_header.chars().count() > max_chars {
        line.push('…');
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atx_headers_keep_text() {
        assert_eq!(strip_markdown("# Title\nbody"), "Title\nbody");
        assert_eq!(strip_markdown("### Deep header ###"), "Deep header");
    }

    #[test]
    fn test_emphasis_stripped() {
        assert_eq!(strip_markdown("this is *important* and **bold**"), "this is important and bold");
        assert_eq!(strip_markdown("also _underscored_ and __strong__"), "also underscored and strong");
        assert_eq!(strip_markdown("***both***"), "both");
    }

    #[test]
    fn test_links_keep_text() {
        assert_eq!(
            strip_markdown("see [the docs](https://example.com) for more"),
            "see the docs for more"
        );
    }

    #[test]
    fn test_images_removed_entirely() {
        assert_eq!(strip_markdown("before ![alt text](img.png) after"), "before  after");
    }

    #[test]
    fn test_inline_code_kept_fences_dropped() {
        assert_eq!(strip_markdown("run `cargo test` locally"), "run cargo test locally");
        assert_eq!(strip_markdown("```rust\nfn main() {}\n```\ndone"), "fn main() {}\ndone");
    }

    #[test]
    fn test_blockquotes_and_strikethrough() {
        assert_eq!(strip_markdown("> quoted ~~gone~~ text"), " quoted gone text");
    }

    #[test]
    fn test_html_tags_unwrapped() {
        // The tag name itself survives; autolinks like <https://x> keep the target.
        assert_eq!(strip_markdown("<https://example.com>"), "https://example.com");
    }

    #[test]
    fn test_footnotes_removed() {
        assert_eq!(strip_markdown("claim[^1] stands"), "claim stands");
    }

    #[test]
    fn test_blank_line_runs_collapse() {
        assert_eq!(strip_markdown("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_card_excerpt_drops_template_header() {
        let body = "Project description\nA **tool** for learners.";
        assert_eq!(card_excerpt(body, 80), "A tool for learners.");
    }

    #[test]
    fn test_card_excerpt_truncates_with_ellipsis() {
        let body = "word ".repeat(40);
        let excerpt = card_excerpt(&body, 20);
        assert!(excerpt.ends_with('…'));
        assert!(excerpt.chars().count() <= 21);
    }
}
