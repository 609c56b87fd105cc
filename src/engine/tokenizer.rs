/// Sentence and token splitting for C-Test generation.
///
/// Both splits are lossless: concatenating the returned slices in order
/// reproduces the input byte for byte. The gap generator relies on this to
/// rebuild the source text around its gaps.

/// Split on sentence-terminal punctuation (`.`, `!`, `?`), keeping the
/// terminator run with the preceding sentence. A terminator run with no
/// preceding word (e.g. a text starting with an ellipsis) forms its own
/// segment so nothing is dropped. Text without any terminator is a single
/// sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut in_terminator = false;

    for (i, ch) in text.char_indices() {
        let terminal = matches!(ch, '.' | '!' | '?');
        if in_terminator && !terminal {
            sentences.push(&text[start..i]);
            start = i;
        }
        in_terminator = terminal;
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Split a sentence into maximal runs of whitespace and non-whitespace.
pub fn split_tokens(sentence: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev_is_ws: Option<bool> = None;

    for (i, ch) in sentence.char_indices() {
        let is_ws = ch.is_whitespace();
        if let Some(prev) = prev_is_ws {
            if prev != is_ws {
                parts.push(&sentence[start..i]);
                start = i;
            }
        }
        prev_is_ws = Some(is_ws);
    }
    if start < sentence.len() {
        parts.push(&sentence[start..]);
    }

    parts
}
