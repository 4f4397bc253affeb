//! Sentence-aligned text chunking for translation input.
//!
//! Translation models accept bounded-length input. Long text is split into
//! chunks that never cut a sentence in half: sentences are detected on
//! boundary punctuation (`.`, `!`, `?`) followed by whitespace and greedily
//! packed into chunks up to a configured character limit. A single sentence
//! longer than the limit becomes its own oversized chunk rather than being
//! truncated.

/// Split text into trimmed sentences.
///
/// A sentence ends at `.`, `!` or `?` when the next character is whitespace.
/// Terminator runs like `?!` or `...` stay attached to their sentence.
/// Empty and whitespace-only input yields no sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if matches!(c, '.' | '!' | '?')
            && iter.peek().is_some_and(|&(_, next)| next.is_whitespace())
        {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Split text into sentence-aligned chunks of at most `max_chars` characters.
///
/// Sentences are accumulated greedily; when the next sentence would push the
/// current chunk past the limit, the chunk is sealed and a new one starts
/// with that sentence. The single-space join between sentences counts toward
/// the limit, so every sealed chunk fits in `max_chars` unless it holds one
/// sentence that alone exceeds the limit.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for sentence in split_sentences(text) {
        let sentence_chars = sentence.chars().count();
        let sep = if current.is_empty() { 0 } else { 1 };

        if current_chars + sep + sentence_chars <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);
            current_chars += sep + sentence_chars;
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current = sentence.to_string();
            current_chars = sentence_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::MAX_CHUNK_CHARS;

    fn normalize(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(split_chunks("", MAX_CHUNK_CHARS).is_empty());
    }

    #[test]
    fn whitespace_only_input_yields_no_chunks() {
        assert!(split_chunks("   \t\n  ", MAX_CHUNK_CHARS).is_empty());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = split_chunks("Hello, how are you?", MAX_CHUNK_CHARS);
        assert_eq!(chunks, vec!["Hello, how are you?"]);
    }

    #[test]
    fn sentences_keep_their_punctuation() {
        let sentences = split_sentences("First one. Second one! Third one?");
        assert_eq!(sentences, vec!["First one.", "Second one!", "Third one?"]);
    }

    #[test]
    fn terminator_runs_stay_attached() {
        let sentences = split_sentences("Really?! Yes... Fine.");
        assert_eq!(sentences, vec!["Really?!", "Yes...", "Fine."]);
    }

    #[test]
    fn abbreviation_without_trailing_space_does_not_split() {
        // "3.14" has no whitespace after the period, so no boundary.
        let sentences = split_sentences("Pi is 3.14 roughly. Indeed.");
        assert_eq!(sentences, vec!["Pi is 3.14 roughly.", "Indeed."]);
    }

    #[test]
    fn chunks_respect_the_limit() {
        let text = "One two three. Four five six. Seven eight nine. Ten.";
        let chunks = split_chunks(text, 20);
        for chunk in &chunks {
            assert!(
                chunk.chars().count() <= 20,
                "chunk exceeds limit: {chunk:?}"
            );
        }
        assert!(chunks.len() > 1);
    }

    #[test]
    fn chunk_boundaries_fall_on_sentences() {
        let text = "Alpha beta. Gamma delta. Epsilon zeta.";
        let chunks = split_chunks(text, 25);
        for chunk in &chunks {
            assert!(
                chunk.ends_with('.'),
                "chunk does not end on a sentence: {chunk:?}"
            );
        }
    }

    #[test]
    fn oversized_sentence_becomes_its_own_chunk() {
        let long_sentence = "word ".repeat(50).trim_end().to_string() + ".";
        let text = format!("Short one. {long_sentence} Another short.");
        let chunks = split_chunks(&text, 30);

        assert!(chunks.contains(&long_sentence));
        // Everything except the oversized sentence stays within the limit.
        for chunk in chunks.iter().filter(|c| **c != long_sentence) {
            assert!(chunk.chars().count() <= 30);
        }
    }

    #[test]
    fn concatenation_is_whitespace_equivalent_to_input() {
        let text = "  First sentence.   Second one!\nThird question? Trailing tail";
        let chunks = split_chunks(text, 25);
        assert_eq!(normalize(&chunks.join(" ")), normalize(text));
    }

    #[test]
    fn chunking_is_idempotent() {
        let text = "A few words here. Some more over there! And a question? Then a tail.";
        let first = split_chunks(text, 30);
        let second = split_chunks(&first.join(" "), 30);
        assert_eq!(first, second);
    }

    #[test]
    fn multibyte_text_is_counted_in_characters() {
        // Each sentence is 5 chars + terminator; byte length is much larger.
        let text = "héllö. wörld! ünïtê?";
        let chunks = split_chunks(text, 13);
        assert_eq!(chunks, vec!["héllö. wörld!", "ünïtê?"]);
    }

    #[test]
    fn unterminated_tail_is_kept() {
        let chunks = split_chunks("Done. and then some trailing words", 64);
        assert_eq!(chunks, vec!["Done. and then some trailing words"]);
    }
}
