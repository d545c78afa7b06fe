//! Paragraph splitter.
//!
//! Splits document text on the exact two-character sequence `"\n\n"` and
//! drops pieces that are empty or whitespace-only. Trimming is used only for
//! that test; the returned pieces are the untrimmed originals, in document
//! order. There is no size bound and no overlap.

/// Split text into paragraph chunks.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .filter(|piece| !piece.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_paragraphs() {
        assert_eq!(
            split_paragraphs("Alpha fact.\n\nBeta fact."),
            vec!["Alpha fact.", "Beta fact."]
        );
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("  \n\n\t\n\n").is_empty());
    }

    #[test]
    fn keeps_untrimmed_text() {
        let chunks = split_paragraphs("  one \n\n\ntwo\n");
        assert_eq!(chunks, vec!["  one ", "\ntwo\n"]);
    }

    #[test]
    fn single_newlines_do_not_split() {
        let chunks = split_paragraphs("line one\nline two\n\nnext");
        assert_eq!(chunks, vec!["line one\nline two", "next"]);
    }

    #[test]
    fn every_chunk_non_empty_after_trim() {
        let text = "a\n\n\n\n \n\nb\n\n\n\nc \n\n\t";
        let chunks = split_paragraphs(text);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
    }

    #[test]
    fn order_preserved() {
        let text = (0..20)
            .map(|i| format!("Paragraph {}.", i))
            .collect::<Vec<_>>()
            .join("\n\n");
        let chunks = split_paragraphs(&text);
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c, &format!("Paragraph {}.", i));
        }
    }
}
