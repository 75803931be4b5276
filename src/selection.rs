//! Winner selection
//!
//! `select` is a pure function of the eligible names and a random source.
//! Reserved names must already be filtered out by the caller.

use crate::error::{CoordinatorError, CoordinatorResult};
use crate::types::TeamName;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of indices for picking a winner
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..len`. Never called with `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

/// `StdRng`-backed source, either seeded for reproducible runs or from the OS
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of indices (wrapped into range). Falls back to 0 once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.picks.pop_front().map(|i| i % len).unwrap_or(0)
    }
}

/// Pick exactly one team uniformly from `eligible`
pub fn select(
    eligible: &[TeamName],
    source: &mut dyn RandomSource,
) -> CoordinatorResult<TeamName> {
    if eligible.is_empty() {
        return Err(CoordinatorError::EmptyRoster);
    }
    let index = source.next_index(eligible.len());
    Ok(eligible[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<TeamName> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_empty_roster() {
        let mut source = SeededRandom::from_seed(1);
        let result = select(&[], &mut source);
        assert_eq!(result, Err(CoordinatorError::EmptyRoster));
    }

    #[test]
    fn test_select_is_reproducible_with_same_seed() {
        let roster = names(&["A", "B", "C"]);

        let first: Vec<_> = {
            let mut source = SeededRandom::from_seed(42);
            (0..10)
                .map(|_| select(&roster, &mut source).unwrap())
                .collect()
        };
        let second: Vec<_> = {
            let mut source = SeededRandom::from_seed(42);
            (0..10)
                .map(|_| select(&roster, &mut source).unwrap())
                .collect()
        };

        assert_eq!(first, second);
        assert!(first.iter().all(|team| roster.contains(team)));
    }

    #[test]
    fn test_select_single_team() {
        let mut source = SeededRandom::from_os_rng();
        assert_eq!(select(&names(&["Only"]), &mut source).unwrap(), "Only");
    }

    #[test]
    fn test_scripted_source_replays_and_wraps() {
        let roster = names(&["Red", "Blue"]);
        let mut source = ScriptedRandom::new([1, 0, 3]);

        assert_eq!(select(&roster, &mut source).unwrap(), "Blue");
        assert_eq!(select(&roster, &mut source).unwrap(), "Red");
        // 3 % 2 == 1
        assert_eq!(select(&roster, &mut source).unwrap(), "Blue");
        // exhausted
        assert_eq!(select(&roster, &mut source).unwrap(), "Red");
    }

    #[test]
    fn test_seeded_source_covers_all_teams() {
        let roster = names(&["A", "B", "C"]);
        let mut source = SeededRandom::from_seed(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(select(&roster, &mut source).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }
}
