/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Training was asked to learn a term the tokenizer must never produce.
    #[error("not a valid term to learn: {0:?}")]
    InvalidTerm(String),

    /// The vocabulary was mutated after the last estimation pass, or never
    /// estimated at all.
    #[error("vocabulary probabilities have not been estimated")]
    NotEstimated,

    #[error("cross-validation requires at least 2 partitions, found {0}")]
    NotEnoughPartitions(usize),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
