/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

use super::{Priors, TermProbability, Vocabulary};

impl Vocabulary {
    /// Derives the priors and the per-term evidence and likelihoods from the
    /// current counts:
    ///
    /// ```text
    /// P(spam)         = word_counts.spam  / word_counts.total
    /// P(legit)        = word_counts.legit / word_counts.total
    /// P(term)         = total_count       / word_counts.total
    /// P(term | class) = class_count       / total_count
    /// ```
    ///
    /// A pure function of the counts: estimating twice without an
    /// intervening `observe` yields identical results. Must be re-run after
    /// any mutation; `observe` clears the previous estimates.
    pub fn estimate(&mut self) {
        let total_words = self.word_counts.total as f64;

        self.priors = Some(Priors {
            spam: self.word_counts.spam as f64 / total_words,
            legit: self.word_counts.legit as f64 / total_words,
        });

        for record in self.words.values_mut() {
            // total_count >= 1 for every existing record.
            let total_count = record.total_count as f64;
            record.probability = Some(TermProbability {
                evidence: total_count / total_words,
                likelihood_spam: record.spam_count as f64 / total_count,
                likelihood_legit: record.legit_count as f64 / total_count,
            });
        }
    }
}
