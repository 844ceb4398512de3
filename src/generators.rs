//! Synthetic card number generation.

use std::iter::FusedIterator;

/// Largest value that fits in a 16-digit card number.
pub const MAX_CARD_NUMBER: u64 = 9_999_999_999_999_999;

/// Lazy, forward-only sequence of formatted card numbers.
///
/// Produced by [`card_number_sequence`]. Once exhausted it stays exhausted;
/// call the constructor again to start over.
#[derive(Debug, Clone)]
pub struct CardNumbers {
    next: u64,
    end: u64,
    done: bool,
}

/// Yields every number in `[start, end]` as `XXXX XXXX XXXX XXXX`,
/// left-padded with zeros.
///
/// `start > end` yields nothing. `end` is clamped to [`MAX_CARD_NUMBER`].
///
/// ```
/// use bank_operations::generators::card_number_sequence;
///
/// let cards: Vec<String> = card_number_sequence(1, 2).collect();
/// assert_eq!(cards, ["0000 0000 0000 0001", "0000 0000 0000 0002"]);
/// ```
pub fn card_number_sequence(start: u64, end: u64) -> CardNumbers {
    let end = end.min(MAX_CARD_NUMBER);
    CardNumbers {
        next: start,
        end,
        done: start > end,
    }
}

/// Renders a number as four space-separated groups of four digits.
pub fn format_card_number(number: u64) -> String {
    let digits = format!("{:016}", number);
    format!(
        "{} {} {} {}",
        &digits[..4],
        &digits[4..8],
        &digits[8..12],
        &digits[12..16]
    )
}

impl Iterator for CardNumbers {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let current = self.next;
        if current == self.end {
            self.done = true;
        } else {
            self.next += 1;
        }
        Some(format_card_number(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        match usize::try_from(self.end - self.next + 1) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for CardNumbers {}
