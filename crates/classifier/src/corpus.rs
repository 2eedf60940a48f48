/*
 * SPDX-FileCopyrightText: 2020 Stalwart Labs LLC <hello@stalw.art>
 *
 * SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-SEL
 */

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    bayes::Category,
    error::{Error, Result},
};

/// One plain-text message with its ground-truth label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub text: String,
    pub category: Category,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>, category: Category) -> Self {
        Document {
            name: name.into(),
            text: text.into(),
            category,
        }
    }
}

/// One cross-validation partition, a directory of message files on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub name: String,
    pub documents: Vec<Document>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub partitions: Vec<Partition>,
}

/// Ground truth is encoded in the file name: any name containing the
/// substring `legit` labels the message legit, everything else is spam.
/// This naming convention is the corpus wire format and must be preserved
/// exactly.
pub fn category_for(filename: &str) -> Category {
    if filename.contains("legit") {
        Category::Legit
    } else {
        Category::Spam
    }
}

impl Corpus {
    pub fn from_partitions(partitions: Vec<Partition>) -> Self {
        Corpus { partitions }
    }

    /// Loads partitions `part1` through `part{k}` from `base_dir`. Files
    /// are enumerated in sorted order so runs are reproducible; any
    /// unreadable directory or file fails the whole load.
    pub fn load(base_dir: impl AsRef<Path>, k: usize) -> Result<Corpus> {
        let base_dir = base_dir.as_ref();
        let mut partitions = Vec::with_capacity(k);

        for part in 1..=k {
            let name = format!("part{part}");
            let dir = base_dir.join(&name);

            let mut filenames = Vec::new();
            for entry in fs::read_dir(&dir).map_err(|err| Error::io(&dir, err))? {
                let entry = entry.map_err(|err| Error::io(&dir, err))?;
                if entry
                    .file_type()
                    .map_err(|err| Error::io(entry.path(), err))?
                    .is_file()
                {
                    filenames.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
            filenames.sort_unstable();

            let mut documents = Vec::with_capacity(filenames.len());
            for filename in filenames {
                let path = dir.join(&filename);
                let text = fs::read_to_string(&path).map_err(|err| Error::io(&path, err))?;
                documents.push(Document {
                    category: category_for(&filename),
                    name: filename,
                    text,
                });
            }

            tracing::debug!(partition = name.as_str(), documents = documents.len(), "loaded partition");
            partitions.push(Partition { name, documents });
        }

        Ok(Corpus { partitions })
    }

    /// Total number of documents across all partitions.
    pub fn len(&self) -> usize {
        self.partitions
            .iter()
            .map(|partition| partition.documents.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions
            .iter()
            .all(|partition| partition.documents.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::bayes::Category;

    use super::{category_for, Corpus};

    #[test]
    fn filename_encodes_ground_truth() {
        for (filename, category) in [
            ("3-380msg4.legit.txt", Category::Legit),
            ("legitimate_offer.txt", Category::Legit),
            ("spmsga81.txt", Category::Spam),
            ("9-1msg1.txt", Category::Spam),
        ] {
            assert_eq!(category_for(filename), category, "{filename}");
        }
    }

    #[test]
    fn load_partitioned_corpus() {
        let base = tempfile::tempdir().unwrap();
        for (part, files) in [
            ("part1", vec![("1legit.txt", "Subject: meeting"), ("2.txt", "Subject: buy now")]),
            ("part2", vec![("5legit.txt", "Subject: report")]),
        ] {
            let dir = base.path().join(part);
            fs::create_dir(&dir).unwrap();
            for (name, text) in files {
                fs::write(dir.join(name), text).unwrap();
            }
        }

        let corpus = Corpus::load(base.path(), 2).unwrap();
        assert_eq!(corpus.partitions.len(), 2);
        assert_eq!(corpus.len(), 3);

        let part1 = &corpus.partitions[0];
        assert_eq!(part1.name, "part1");
        // Sorted enumeration.
        assert_eq!(part1.documents[0].name, "1legit.txt");
        assert_eq!(part1.documents[0].category, Category::Legit);
        assert_eq!(part1.documents[1].category, Category::Spam);
        assert_eq!(part1.documents[1].text, "Subject: buy now");

        assert_eq!(corpus.partitions[1].documents[0].category, Category::Legit);
    }

    #[test]
    fn missing_partition_fails_the_load() {
        let base = tempfile::tempdir().unwrap();
        fs::create_dir(base.path().join("part1")).unwrap();

        let err = Corpus::load(base.path(), 2).unwrap_err();
        assert!(err.to_string().contains("part2"));
    }
}
