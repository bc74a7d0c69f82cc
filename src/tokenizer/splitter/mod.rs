// Compound token splitting
// Enumerates the ways a token can be cut into a few contiguous pieces and
// picks the one made of known words, preferring fewer and more even pieces.

#[cfg(test)]
mod tests;

use itertools::Itertools;
use std::collections::BTreeSet;
use std::iter;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSplitter {
    min_subtoken_size: usize,
    max_subtokens: usize,
}

/// `n * Σx² - (Σx)²` over piece lengths. For a fixed piece count this orders
/// splits exactly as their sample variance does.
fn length_spread(pieces: &[String]) -> u128 {
    let n = pieces.len() as u128;
    let (sum, sum_sq) = pieces.iter().fold((0u128, 0u128), |(sum, sum_sq), piece| {
        let len = piece.chars().count() as u128;
        (sum + len, sum_sq + len * len)
    });
    (n * sum_sq).saturating_sub(sum * sum)
}

impl TokenSplitter {
    #[inline]
    pub fn new(min_subtoken_size: usize, max_subtokens: usize) -> Self {
        Self {
            min_subtoken_size: min_subtoken_size.max(1),
            max_subtokens,
        }
    }

    #[inline]
    pub fn min_subtoken_size(&self) -> usize {
        self.min_subtoken_size
    }

    #[inline]
    pub fn max_subtokens(&self) -> usize {
        self.max_subtokens
    }

    /// Every way to cut `token` into 2..=max_subtokens pieces of at least
    /// `min_subtoken_size` characters each
    #[inline]
    pub fn splits(&self, token: &str) -> Vec<Vec<String>> {
        let chars: Vec<char> = token.chars().collect();
        let n = chars.len();
        if n < self.min_subtoken_size {
            return Vec::new();
        }

        let mut splits = Vec::new();
        for cuts in 1..self.max_subtokens {
            for positions in (self.min_subtoken_size..n).combinations(cuts) {
                let bounds: Vec<usize> = iter::once(0)
                    .chain(positions)
                    .chain(iter::once(n))
                    .collect();
                if bounds
                    .windows(2)
                    .any(|w| w[1] - w[0] < self.min_subtoken_size)
                {
                    continue;
                }
                splits.push(
                    bounds
                        .windows(2)
                        .map(|w| chars[w[0]..w[1]].iter().collect())
                        .collect(),
                );
            }
        }
        splits
    }

    /// The single best split of `token` into words from `vocab`.
    ///
    /// Only letters take part in the search. Candidates with the fewest pieces
    /// win, then the most even piece lengths. `None` when nothing splits or
    /// when two candidates are equally good.
    #[inline]
    pub fn best_split(&self, token: &str, vocab: &BTreeSet<String>) -> Option<Vec<String>> {
        let letters: String = token.chars().filter(char::is_ascii_alphabetic).collect();

        let valid: Vec<Vec<String>> = self
            .splits(&letters)
            .into_iter()
            .filter(|split| split.iter().all(|piece| vocab.contains(piece)))
            .collect();

        let fewest = valid.iter().map(Vec::len).min()?;
        let candidates: Vec<&Vec<String>> =
            valid.iter().filter(|split| split.len() == fewest).collect();

        let spreads: Vec<u128> = candidates.iter().map(|split| length_spread(split)).collect();
        let best_spread = spreads.iter().copied().min()?;

        let mut best = candidates
            .iter()
            .zip(&spreads)
            .filter(|(_, spread)| **spread == best_spread)
            .map(|(split, _)| *split);

        match (best.next(), best.next()) {
            (Some(split), None) => Some(split.clone()),
            _ => {
                debug!("Ambiguous split for '{}', leaving it whole", token);
                None
            }
        }
    }
}
