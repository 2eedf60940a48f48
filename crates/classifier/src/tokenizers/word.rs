/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

use std::str::CharIndices;

/// Corpus messages start with a `Subject:` header whose keyword must not
/// enter the vocabulary.
pub const HEADER_KEYWORD: &str = "Subject";

pub struct WordTokenizer<'x> {
    text: &'x str,
    iterator: CharIndices<'x>,
}

impl<'x> WordTokenizer<'x> {
    pub fn new(text: &str) -> WordTokenizer<'_> {
        WordTokenizer {
            text,
            iterator: text.char_indices(),
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Parses text into maximal runs of word characters (letters, digits and
/// underscore). No case folding, no stemming; the only excluded token is
/// the literal `Subject` header keyword.
impl<'x> Iterator for WordTokenizer<'x> {
    type Item = &'x str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((token_start, ch)) = self.iterator.next() {
            if is_word_char(ch) {
                let token_end = (&mut self.iterator)
                    .find(|(_, ch)| !is_word_char(*ch))
                    .map(|(pos, _)| pos)
                    .unwrap_or(self.text.len());

                let token = &self.text[token_start..token_end];
                if token != HEADER_KEYWORD {
                    return Some(token);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_tokenizer() {
        let inputs = [
            (
                "Subject: buy now, cheap!!! v1agra_pills",
                vec!["buy", "now", "cheap", "v1agra_pills"],
            ),
            (
                "Subject: meeting at 10\n\nsee the Subject line",
                vec!["meeting", "at", "10", "see", "the", "line"],
            ),
            // Case is preserved and `Subjects` is not the header keyword.
            ("Subjects differ from SUBJECT", vec!["Subjects", "differ", "from", "SUBJECT"]),
            ("...---...", vec![]),
            ("", vec![]),
            ("  spaced\tout\ntokens  ", vec!["spaced", "out", "tokens"]),
        ];

        for (input, expected) in inputs {
            assert_eq!(
                WordTokenizer::new(input).collect::<Vec<_>>(),
                expected,
                "failed for {input:?}"
            );
        }
    }

    #[test]
    fn deterministic() {
        let text = "Subject: one two three 4_5";
        let first = WordTokenizer::new(text).collect::<Vec<_>>();
        let second = WordTokenizer::new(text).collect::<Vec<_>>();
        assert_eq!(first, second);
    }
}
