/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    bayes::{Category, Vocabulary},
    corpus::Corpus,
    error::{Error, Result},
};

/// Per-fold classification outcome counts, split by predicted and true
/// class.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldOutcomes {
    pub classified_as_spam_is_spam: u64,
    pub classified_as_spam_is_legit: u64,
    pub classified_as_legit_is_legit: u64,
    pub classified_as_legit_is_spam: u64,
}

impl FoldOutcomes {
    fn record(&mut self, predicted: Category, actual: Category) {
        match (predicted, actual) {
            (Category::Spam, Category::Spam) => self.classified_as_spam_is_spam += 1,
            (Category::Spam, Category::Legit) => self.classified_as_spam_is_legit += 1,
            (Category::Legit, Category::Legit) => self.classified_as_legit_is_legit += 1,
            (Category::Legit, Category::Spam) => self.classified_as_legit_is_spam += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.classified_as_spam_is_spam
            + self.classified_as_spam_is_legit
            + self.classified_as_legit_is_legit
            + self.classified_as_legit_is_spam
    }

    pub fn correct(&self) -> u64 {
        self.classified_as_spam_is_spam + self.classified_as_legit_is_legit
    }

    pub fn classified_as_spam(&self) -> u64 {
        self.classified_as_spam_is_spam + self.classified_as_spam_is_legit
    }

    pub fn true_spam(&self) -> u64 {
        self.classified_as_spam_is_spam + self.classified_as_legit_is_spam
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoldResult {
    /// 1-based fold number; the test set is `part{fold}`.
    pub fold: usize,
    pub documents_tested: u64,
    pub vocabulary_size: usize,
    pub outcomes: FoldOutcomes,
    /// `None` when the test partition is empty.
    pub accuracy: Option<f64>,
    /// `None` when nothing was classified as spam this fold.
    pub spam_precision: Option<f64>,
    /// `None` when the test partition holds no spam.
    pub spam_recall: Option<f64>,
    pub training_time: Duration,
    pub testing_time: Duration,
}

/// Arithmetic means of the per-fold metrics. Folds with an undefined metric
/// are excluded from that mean and counted separately; they are never
/// coerced to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    pub mean_accuracy: Option<f64>,
    pub mean_spam_precision: Option<f64>,
    pub mean_spam_recall: Option<f64>,
    pub undefined_accuracy_folds: usize,
    pub undefined_spam_precision_folds: usize,
    pub undefined_spam_recall_folds: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub folds: Vec<FoldResult>,
    pub aggregate: AggregateResult,
    pub elapsed: Duration,
}

/// K-fold cross-validation over a partitioned corpus: every partition is
/// held out once as the test set while the remaining partitions train a
/// fresh vocabulary. Folds own independent vocabularies and run in
/// parallel; results are aggregated only after every fold completes and are
/// reported in fold order.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossValidator {}

impl CrossValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&self, corpus: &Corpus) -> Result<ValidationReport> {
        let k = corpus.partitions.len();
        if k < 2 {
            return Err(Error::NotEnoughPartitions(k));
        }

        let started = Instant::now();
        let folds = (1..=k)
            .into_par_iter()
            .map(|fold| run_fold(corpus, fold))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(folds = k, phase = "aggregating", "cross-validation");
        let aggregate = aggregate(&folds);
        tracing::info!(
            folds = k,
            mean_accuracy = aggregate.mean_accuracy,
            "cross-validation complete"
        );

        Ok(ValidationReport {
            folds,
            aggregate,
            elapsed: started.elapsed(),
        })
    }
}

fn run_fold(corpus: &Corpus, fold: usize) -> Result<FoldResult> {
    tracing::debug!(fold, phase = "training", "cross-validation");
    let training_started = Instant::now();
    let mut vocabulary = Vocabulary::train(
        corpus
            .partitions
            .iter()
            .enumerate()
            .filter(|(idx, _)| idx + 1 != fold)
            .flat_map(|(_, partition)| partition.documents.iter()),
    )?;
    vocabulary.estimate();
    let training_time = training_started.elapsed();

    tracing::debug!(fold, phase = "testing", "cross-validation");
    let testing_started = Instant::now();
    let mut outcomes = FoldOutcomes::default();
    for document in &corpus.partitions[fold - 1].documents {
        let classification = vocabulary.classify_text(&document.text)?;
        outcomes.record(classification.category, document.category);
    }
    let testing_time = testing_started.elapsed();

    let total = outcomes.total();
    Ok(FoldResult {
        fold,
        documents_tested: total,
        vocabulary_size: vocabulary.len(),
        accuracy: ratio(outcomes.correct(), total),
        spam_precision: ratio(outcomes.classified_as_spam_is_spam, outcomes.classified_as_spam()),
        spam_recall: ratio(outcomes.classified_as_spam_is_spam, outcomes.true_spam()),
        outcomes,
        training_time,
        testing_time,
    })
}

/// Division with an explicit undefined marker instead of NaN.
fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    (denominator != 0).then(|| numerator as f64 / denominator as f64)
}

fn aggregate(folds: &[FoldResult]) -> AggregateResult {
    let (mean_accuracy, undefined_accuracy_folds) =
        mean_defined(folds.iter().map(|fold| fold.accuracy));
    let (mean_spam_precision, undefined_spam_precision_folds) =
        mean_defined(folds.iter().map(|fold| fold.spam_precision));
    let (mean_spam_recall, undefined_spam_recall_folds) =
        mean_defined(folds.iter().map(|fold| fold.spam_recall));

    AggregateResult {
        mean_accuracy,
        mean_spam_precision,
        mean_spam_recall,
        undefined_accuracy_folds,
        undefined_spam_precision_folds,
        undefined_spam_recall_folds,
    }
}

/// Mean over the defined values plus the number of undefined ones.
fn mean_defined(values: impl Iterator<Item = Option<f64>>) -> (Option<f64>, usize) {
    let mut sum = 0.0;
    let mut defined = 0usize;
    let mut undefined = 0usize;

    for value in values {
        match value {
            Some(value) => {
                sum += value;
                defined += 1;
            }
            None => undefined += 1,
        }
    }

    (
        (defined > 0).then(|| sum / defined as f64),
        undefined,
    )
}
