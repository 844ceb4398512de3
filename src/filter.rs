//! Record selection by state and currency, and description extraction.
//!
//! Filters never fail: a record lacking the inspected field simply does not
//! match. The currency filter and description extraction are lazy iterator
//! adapters, so they are as restartable as the input they wrap.

use crate::transaction::Transaction;

/// State selected when the caller does not ask for another one.
pub const DEFAULT_STATE: &str = "EXECUTED";

/// Keeps records whose `state` equals `state` exactly (case-sensitive),
/// preserving input order.
pub fn filter_by_state<'a, I>(records: I, state: &str) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    records
        .into_iter()
        .filter(|tx| tx.state.as_deref() == Some(state))
        .collect()
}

/// [`filter_by_state`] with [`DEFAULT_STATE`].
pub fn filter_executed<'a, I>(records: I) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    filter_by_state(records, DEFAULT_STATE)
}

/// Lazily yields records whose `operationAmount.currency.code` equals `code`.
pub fn filter_by_currency<'c, I>(records: I, code: &'c str) -> ByCurrency<'c, I::IntoIter>
where
    I: IntoIterator,
{
    ByCurrency {
        inner: records.into_iter(),
        code,
    }
}

/// Iterator returned by [`filter_by_currency`].
#[derive(Debug, Clone)]
pub struct ByCurrency<'c, I> {
    inner: I,
    code: &'c str,
}

impl<'a, 'c, I> Iterator for ByCurrency<'c, I>
where
    I: Iterator<Item = &'a Transaction>,
{
    type Item = &'a Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        let code = self.code;
        self.inner
            .by_ref()
            .find(|tx| tx.currency_code() == Some(code))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Lazily yields each record's description verbatim.
///
/// Absent or `null` descriptions come out as `None`; an empty string stays
/// `Some("")`.
pub fn extract_descriptions<I>(records: I) -> Descriptions<I::IntoIter>
where
    I: IntoIterator,
{
    Descriptions {
        inner: records.into_iter(),
    }
}

/// Iterator returned by [`extract_descriptions`].
#[derive(Debug, Clone)]
pub struct Descriptions<I> {
    inner: I,
}

impl<'a, I> Iterator for Descriptions<I>
where
    I: Iterator<Item = &'a Transaction>,
{
    type Item = Option<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|tx| tx.description.as_deref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
