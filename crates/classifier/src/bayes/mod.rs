/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

pub mod classify;
pub mod estimate;
pub mod train;

/// Message class. Every public operation takes this enum rather than a bare
/// flag, so an out-of-domain class cannot reach the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spam,
    Legit,
}

/// Per-term statistics. `total_count == spam_count + legit_count` always;
/// `probability` is populated by estimation and cleared whenever the counts
/// change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub spam_count: u64,
    pub legit_count: u64,
    pub total_count: u64,
    pub probability: Option<TermProbability>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermProbability {
    /// P(term): term occurrences over the class-partitioned term total.
    pub evidence: f64,
    /// P(term | spam).
    pub likelihood_spam: f64,
    /// P(term | legit).
    pub likelihood_legit: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCounts {
    pub total: u64,
    pub legit: u64,
    pub spam: u64,
}

/// Distinct-term tallies per class. A term observed in both classes counts
/// toward both tallies, so `total` is `spam + legit` and not the vocabulary
/// size. The reference model divides by this `total` when deriving priors;
/// the duplication is intentional and must not be normalized away.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCounts {
    pub total: u64,
    pub legit: u64,
    pub spam: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Priors {
    pub spam: f64,
    pub legit: f64,
}

/// The trained model state for one cross-validation fold. Exclusively owned
/// by that fold; nothing survives across folds.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub words: AHashMap<String, WordRecord>,
    pub message_counts: MessageCounts,
    pub word_counts: WordCounts,
    pub priors: Option<Priors>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word(&self, term: &str) -> Option<&WordRecord> {
        self.words.get(term)
    }

    /// Number of distinct terms observed during training.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bayes::{Category, Vocabulary},
        corpus::Document,
    };

    #[test]
    fn vocabulary_serde_round_trip() {
        let documents = [
            Document::new("1.txt", "buy now", Category::Spam),
            Document::new("2legit.txt", "buy meeting", Category::Legit),
        ];
        let mut vocabulary = Vocabulary::train(&documents).unwrap();
        vocabulary.estimate();

        let json = serde_json::to_string(&vocabulary).unwrap();
        let decoded = serde_json::from_str::<Vocabulary>(&json).unwrap();
        assert_eq!(decoded, vocabulary);
    }
}
