//! Counting records per description category.

use crate::transaction::Transaction;
use std::fmt;

/// Ordered `(category, count)` pairs.
///
/// Categories appear in the order they were first requested. Repeating the
/// exact same category yields a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    entries: Vec<(String, usize)>,
}

impl CategoryCounts {
    /// Count for `category`, if it was requested.
    pub fn get(&self, category: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for CategoryCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, count) in &self.entries {
            writeln!(f, "{}: {}", name, count)?;
        }
        Ok(())
    }
}

/// Counts, for each non-empty category, the records whose non-empty
/// description contains it (case-insensitive). A record may count towards
/// several categories.
///
/// ```
/// use bank_operations::analytics::count_by_category;
/// use bank_operations::Transaction;
///
/// let counts = count_by_category(&Vec::<Transaction>::new(), ["a", "b"]);
/// assert_eq!(counts.get("a"), Some(0));
/// assert_eq!(counts.get("b"), Some(0));
/// ```
pub fn count_by_category<'a, I, C, S>(records: I, categories: C) -> CategoryCounts
where
    I: IntoIterator<Item = &'a Transaction>,
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // (original, lowercased, count)
    let mut buckets: Vec<(String, String, usize)> = Vec::new();
    for category in categories {
        let category = category.as_ref();
        if category.is_empty() || buckets.iter().any(|(name, _, _)| name == category) {
            continue;
        }
        buckets.push((category.to_string(), category.to_lowercase(), 0));
    }

    if buckets.is_empty() {
        return CategoryCounts::default();
    }

    for tx in records {
        let Some(description) = tx.non_empty_description() else {
            continue;
        };
        let description = description.to_lowercase();
        for (_, needle, count) in buckets.iter_mut() {
            if description.contains(needle.as_str()) {
                *count += 1;
            }
        }
    }

    CategoryCounts {
        entries: buckets
            .into_iter()
            .map(|(name, _, count)| (name, count))
            .collect(),
    }
}
