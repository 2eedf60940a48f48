/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

pub mod bayes;
pub mod corpus;
pub mod error;
pub mod tokenizers;
pub mod validation;

pub use error::{Error, Result};
