/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

use crate::{
    corpus::Document,
    error::{Error, Result},
    tokenizers::word::{WordTokenizer, HEADER_KEYWORD},
};

use super::{Category, MessageCounts, Vocabulary, WordCounts};

impl Vocabulary {
    /// Records one occurrence of `term` under `category`. Must be called
    /// once per token occurrence, not once per document. The tokenizer is
    /// contractually unable to produce empty, whitespace-only or header
    /// keyword terms; they are still rejected here rather than silently
    /// skipped.
    pub fn observe(&mut self, term: &str, category: Category) -> Result<()> {
        if term.is_empty() || term.chars().all(char::is_whitespace) || term == HEADER_KEYWORD {
            return Err(Error::InvalidTerm(term.to_string()));
        }

        // Counts are about to change, drop any previous estimates. Records
        // only carry probabilities after an estimation pass, so the scan
        // runs at most once between passes.
        if self.priors.take().is_some() {
            for record in self.words.values_mut() {
                record.probability = None;
            }
        }

        let record = self.words.entry(term.to_string()).or_default();
        match category {
            Category::Spam => record.spam_count += 1,
            Category::Legit => record.legit_count += 1,
        }
        record.total_count += 1;

        Ok(())
    }

    /// Records the document-level tallies once every training document has
    /// been observed.
    pub fn finalize_message_counts(&mut self, total: u64, legit: u64, spam: u64) {
        self.message_counts = MessageCounts { total, legit, spam };
    }

    /// Partitions the vocabulary into spam-only, legit-only and mixed terms
    /// and derives the per-class distinct-term tallies. Mixed terms count
    /// toward both classes (see [`WordCounts`]).
    pub fn compute_word_counts(&mut self) {
        let mut spam_only = 0u64;
        let mut legit_only = 0u64;
        let mut mixed = 0u64;

        for record in self.words.values() {
            match (record.spam_count > 0, record.legit_count > 0) {
                (true, false) => spam_only += 1,
                (false, true) => legit_only += 1,
                (true, true) => mixed += 1,
                // A record is only created on its first observation, so a
                // zero-count term cannot exist.
                (false, false) => {}
            }
        }

        let spam = spam_only + mixed;
        let legit = legit_only + mixed;
        self.word_counts = WordCounts {
            total: spam + legit,
            legit,
            spam,
        };

        tracing::debug!(spam_only, legit_only, mixed, "word count partition");
    }

    /// Builds a vocabulary from a labeled document set: tokenize, observe
    /// every token, tally messages per class, then compute the word counts.
    /// The result depends only on the multiset of documents, not their
    /// order.
    pub fn train<'a, I>(documents: I) -> Result<Vocabulary>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut vocabulary = Vocabulary::new();
        let mut total = 0u64;
        let mut legit = 0u64;
        let mut spam = 0u64;

        for document in documents {
            for token in WordTokenizer::new(&document.text) {
                vocabulary.observe(token, document.category)?;
            }
            total += 1;
            match document.category {
                Category::Spam => spam += 1,
                Category::Legit => legit += 1,
            }
        }

        vocabulary.finalize_message_counts(total, legit, spam);
        vocabulary.compute_word_counts();

        Ok(vocabulary)
    }
}
