//! Description search.
//!
//! The pattern is compiled once per call as a case-insensitive regular
//! expression. If it does not compile, the whole call switches to
//! case-insensitive literal substring matching instead of failing.

use crate::transaction::Transaction;
use regex::{Regex, RegexBuilder};

/// Matching strategy chosen for one search call.
#[derive(Debug, Clone)]
pub enum DescriptionMatcher {
    Regex(Regex),
    /// Lowercased needle.
    Literal(String),
}

impl DescriptionMatcher {
    /// Compiles `pattern`, falling back to a literal matcher on syntax errors.
    pub fn new(pattern: &str) -> Self {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => DescriptionMatcher::Regex(re),
            Err(_) => DescriptionMatcher::Literal(pattern.to_lowercase()),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, DescriptionMatcher::Literal(_))
    }

    pub fn is_match(&self, description: &str) -> bool {
        match self {
            DescriptionMatcher::Regex(re) => re.is_match(description),
            DescriptionMatcher::Literal(needle) => description.to_lowercase().contains(needle),
        }
    }

    /// Keeps the records whose non-empty description matches.
    pub fn select<'a, I>(&self, records: I) -> Vec<&'a Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        records
            .into_iter()
            .filter(|tx| tx.non_empty_description().map_or(false, |d| self.is_match(d)))
            .collect()
    }
}

/// Returns the records whose non-empty description matches `pattern`.
///
/// An empty pattern selects nothing. Records without a description never
/// match.
///
/// ```
/// use bank_operations::search::search_descriptions;
/// use bank_operations::Transaction;
///
/// let records = vec![Transaction {
///     description: Some("Перевод организации".into()),
///     ..Default::default()
/// }];
/// assert_eq!(search_descriptions(&records, "перевод").len(), 1);
/// assert_eq!(search_descriptions(&records, "pay(ment").len(), 0);
/// ```
pub fn search_descriptions<'a, I>(records: I, pattern: &str) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    if pattern.is_empty() {
        return Vec::new();
    }

    DescriptionMatcher::new(pattern).select(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i64, description: Option<&str>) -> Transaction {
        Transaction {
            id: Some(id.into()),
            description: description.map(String::from),
            ..Default::default()
        }
    }

    fn ids(records: &[&Transaction]) -> Vec<i64> {
        records.iter().filter_map(|tx| tx.id.as_ref()?.as_i64()).collect()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, Some("Перевод организации")),
            tx(2, Some("Перевод со счета на счет")),
            tx(3, Some("Открытие вклада")),
            tx(4, None),
            tx(5, Some("")),
            tx(6, Some("Payment for groceries")),
            tx(7, Some("Card pay(ment) refund")),
        ]
    }

    #[test]
    fn test_case_insensitive_regex() {
        let data = sample();
        assert_eq!(ids(&search_descriptions(&data, "перевод")), vec![1, 2]);
        assert_eq!(ids(&search_descriptions(&data, "^открытие")), vec![3]);
        assert_eq!(ids(&search_descriptions(&data, "PAYMENT|вклад")), vec![3, 6]);
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_literal() {
        let data = sample();
        assert!(DescriptionMatcher::new("pay(ment").is_literal());
        assert_eq!(ids(&search_descriptions(&data, "pay(ment")), vec![7]);
        assert_eq!(ids(&search_descriptions(&data, "PAY(MENT")), vec![7]);
    }

    #[test]
    fn test_invalid_pattern_without_literal_hits() {
        let data = vec![tx(1, Some("Payment for groceries"))];
        assert!(search_descriptions(&data, "pay(ment").is_empty());
        assert!(search_descriptions(&data, "[unclosed").is_empty());
    }

    #[test]
    fn test_valid_pattern_uses_regex() {
        assert!(!DescriptionMatcher::new("pay.*").is_literal());
        let data = sample();
        assert_eq!(ids(&search_descriptions(&data, "pay.*groc")), vec![6]);
    }

    #[test]
    fn test_matcher_select_reuses_one_strategy() {
        let data = sample();
        let matcher = DescriptionMatcher::new("pay(ment");
        assert!(matcher.is_literal());
        assert_eq!(ids(&matcher.select(&data)), vec![7]);
        assert_eq!(ids(&matcher.select(data.iter().rev())), vec![7]);
    }

    #[test]
    fn test_empty_pattern_and_empty_input() {
        let data = sample();
        assert!(search_descriptions(&data, "").is_empty());
        assert!(search_descriptions(&Vec::<Transaction>::new(), "перевод").is_empty());
    }

    #[test]
    fn test_records_without_description_never_match() {
        let data = sample();
        let all = search_descriptions(&data, ".*");
        assert_eq!(ids(&all), vec![1, 2, 3, 6, 7]);
    }
}
