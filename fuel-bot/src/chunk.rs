//! Splitting text into message-sized pieces.

/// Telegram's limit on the text of a single message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Split `text` into consecutive pieces of at most `max_chars` characters.
///
/// Text that already fits is returned as a single piece, including the
/// empty string. Longer text is cut every `max_chars` characters; only the
/// last piece may be shorter. Cuts fall on `char` boundaries, and the
/// pieces concatenate back to `text` exactly.
///
/// `max_chars` must be greater than zero.
pub fn chunk(text: &str, max_chars: usize) -> Vec<&str> {
    debug_assert!(max_chars > 0, "chunk size must be positive");

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            pieces.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    pieces.push(&text[start..]);

    pieces
}
