use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?。！？।]+\s+").expect("sentence pattern is valid"));

/// Split text into batches of at most `max_len` characters.
///
/// Upstream limits count characters, so multibyte scripts get full-size batches.
///
/// Batches break on sentence boundaries where possible. A sentence longer than
/// `max_len` is broken on whitespace, and a single word longer than `max_len`
/// on character boundaries. Batches are trimmed and never empty.
pub fn split_into_batches(text: &str, max_len: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if char_len(text) <= max_len {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();
    let mut last_end = 0;

    let mut sentences: Vec<&str> = SENTENCE_END
        .find_iter(text)
        .map(|mat| {
            let sentence = &text[last_end..mat.end()];
            last_end = mat.end();
            sentence
        })
        .collect();
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }

    for sentence in sentences {
        if char_len(sentence) > max_len {
            flush(&mut batches, &mut current_batch);
            split_long_sentence(sentence, max_len, &mut batches);
            continue;
        }

        if !current_batch.is_empty() && char_len(&current_batch) + char_len(sentence) > max_len {
            flush(&mut batches, &mut current_batch);
        }
        current_batch.push_str(sentence);
    }
    flush(&mut batches, &mut current_batch);

    batches
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn flush(batches: &mut Vec<String>, current_batch: &mut String) {
    let trimmed = current_batch.trim();
    if !trimmed.is_empty() {
        batches.push(trimmed.to_string());
    }
    current_batch.clear();
}

fn split_long_sentence(sentence: &str, max_len: usize, batches: &mut Vec<String>) {
    let mut current = String::new();

    for word in sentence.split_whitespace() {
        if char_len(word) > max_len {
            flush(batches, &mut current);
            split_by_chars(word, max_len, batches);
            continue;
        }

        let separator = usize::from(!current.is_empty());
        if char_len(&current) + separator + char_len(word) > max_len {
            flush(batches, &mut current);
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    flush(batches, &mut current);
}

fn split_by_chars(word: &str, max_len: usize, batches: &mut Vec<String>) {
    let mut chunk = String::new();
    let mut chunk_chars = 0;
    for ch in word.chars() {
        if chunk_chars == max_len {
            batches.push(std::mem::take(&mut chunk));
            chunk_chars = 0;
        }
        chunk.push(ch);
        chunk_chars += 1;
    }
    if !chunk.is_empty() {
        batches.push(chunk);
    }
}
