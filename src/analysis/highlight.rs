//! Sentence splitting for per-sentence highlighting.

/// Split `text` into sentences.
///
/// A boundary is a whitespace run directly after `.`, `!` or `?`; the
/// punctuation stays with its sentence and the whitespace is dropped. The
/// input is trimmed first, and empty input yields no sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            sentences.push(&text[start..idx]);
            // consume the rest of the whitespace run
            let mut next_start = text.len();
            while let Some(&(i, c)) = chars.peek() {
                if c.is_whitespace() {
                    chars.next();
                } else {
                    next_start = i;
                    break;
                }
            }
            start = next_start;
            prev = None;
            continue;
        }
        prev = Some(ch);
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}
