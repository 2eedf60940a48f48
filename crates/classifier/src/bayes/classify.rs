/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    tokenizers::word::WordTokenizer,
};

use super::{Category, Vocabulary};

/// Outcome of classifying one message. The raw scores are unnormalized
/// products seeded with the priors; for long messages both can underflow
/// toward zero. They rank the two classes, they are not calibrated
/// probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub spam_score: f64,
    pub legit_score: f64,
    /// Winning score over the sum of both scores; absent on an exact tie.
    pub confidence: Option<f64>,
}

impl Vocabulary {
    /// Applies Bayes' rule under the naive independence assumption: both
    /// scores start at their priors and every known token multiplies in its
    /// per-class likelihood. Tokens absent from the vocabulary contribute
    /// no evidence and are skipped. An exact tie, including the empty or
    /// all-unknown message, is guessed legit.
    pub fn classify<'x, I>(&self, tokens: I) -> Result<Classification>
    where
        I: IntoIterator<Item = &'x str>,
    {
        let priors = self.priors.ok_or(Error::NotEstimated)?;
        let mut spam_score = priors.spam;
        let mut legit_score = priors.legit;

        for token in tokens {
            if let Some(probability) = self
                .words
                .get(token)
                .and_then(|record| record.probability)
            {
                spam_score *= probability.likelihood_spam;
                legit_score *= probability.likelihood_legit;
            }
        }

        Ok(if spam_score > legit_score {
            Classification {
                category: Category::Spam,
                spam_score,
                legit_score,
                confidence: Some(spam_score / (spam_score + legit_score)),
            }
        } else if legit_score > spam_score {
            Classification {
                category: Category::Legit,
                spam_score,
                legit_score,
                confidence: Some(legit_score / (spam_score + legit_score)),
            }
        } else {
            // Default guess.
            Classification {
                category: Category::Legit,
                spam_score,
                legit_score,
                confidence: None,
            }
        })
    }

    /// Tokenizes `text` and classifies the resulting token sequence.
    pub fn classify_text(&self, text: &str) -> Result<Classification> {
        self.classify(WordTokenizer::new(text))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bayes::{Category, Vocabulary},
        corpus::Document,
        error::Error,
    };

    fn estimated() -> Vocabulary {
        let documents = [
            Document::new("1.txt", "buy now", Category::Spam),
            Document::new("2legit.txt", "buy meeting", Category::Legit),
        ];
        let mut vocabulary = Vocabulary::train(&documents).unwrap();
        vocabulary.estimate();
        vocabulary
    }

    #[test]
    fn spam_only_token_yields_full_confidence() {
        let classification = estimated().classify(["now"]).unwrap();

        assert_eq!(classification.category, Category::Spam);
        assert_eq!(classification.spam_score, 0.5);
        assert_eq!(classification.legit_score, 0.0);
        assert_eq!(classification.confidence, Some(1.0));
    }

    #[test]
    fn legit_only_token() {
        let classification = estimated().classify(["meeting"]).unwrap();

        assert_eq!(classification.category, Category::Legit);
        assert_eq!(classification.spam_score, 0.0);
        assert_eq!(classification.legit_score, 0.5);
        assert_eq!(classification.confidence, Some(1.0));
    }

    #[test]
    fn tie_defaults_to_legit() {
        let vocabulary = estimated();

        // Empty message and all-unknown message leave both scores at their
        // priors.
        for tokens in [vec![], vec!["unseen", "tokens"]] {
            let classification = vocabulary.classify(tokens).unwrap();
            assert_eq!(classification.category, Category::Legit);
            assert_eq!(classification.spam_score, 0.5);
            assert_eq!(classification.legit_score, 0.5);
            assert_eq!(classification.confidence, None);
        }
    }

    #[test]
    fn mixed_token_is_uninformative_here() {
        // `buy` has equal likelihoods, so it scales both scores equally and
        // the tie rule still applies.
        let classification = estimated().classify(["buy"]).unwrap();
        assert_eq!(classification.category, Category::Legit);
        assert_eq!(classification.confidence, None);
    }

    #[test]
    fn classify_text_tokenizes_first() {
        let classification = estimated()
            .classify_text("Subject: now!!!")
            .unwrap();
        assert_eq!(classification.category, Category::Spam);
    }

    #[test]
    fn unestimated_vocabulary_is_rejected() {
        let documents = [Document::new("1.txt", "buy now", Category::Spam)];
        let vocabulary = Vocabulary::train(&documents).unwrap();

        assert!(matches!(
            vocabulary.classify(["now"]),
            Err(Error::NotEstimated)
        ));
    }
}
