use std::collections::HashSet;

use log::trace;

use super::{NormalizeErrorType, PhaseResult};

/// Shape of the namespace fresh nonterminals are drawn from. Names come out
/// as every letter of `alphabet`, then every letter with suffix `1`, and so on
/// up to `max_suffix`.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatorConfig {
    pub alphabet: Vec<char>,
    pub max_suffix: usize,
}

impl AllocatorConfig {
    // Plain `A` to `Z`, nothing else
    pub fn single_letters() -> Self {
        AllocatorConfig {
            max_suffix: 0,
            ..AllocatorConfig::default()
        }
    }

    pub fn capacity(&self) -> usize {
        self.alphabet.len() * (self.max_suffix + 1)
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        AllocatorConfig {
            alphabet: ('A'..='Z').collect(),
            max_suffix: 9,
        }
    }
}

/// Hands out nonterminal names that are not yet in use. Lives for one
/// pipeline run.
#[derive(Debug)]
pub struct SymbolAllocator {
    config: AllocatorConfig,
    in_use: HashSet<String>,
    allocated: Vec<String>,
}

impl SymbolAllocator {
    pub fn new(config: AllocatorConfig, in_use: impl IntoIterator<Item = String>) -> Self {
        SymbolAllocator {
            config,
            in_use: in_use.into_iter().collect(),
            allocated: Vec::new(),
        }
    }

    fn candidates(&self) -> impl Iterator<Item = String> + '_ {
        (0..=self.config.max_suffix).flat_map(move |suffix| {
            self.config.alphabet.iter().map(move |letter| {
                if suffix == 0 {
                    letter.to_string()
                } else {
                    format!("{}{}", letter, suffix)
                }
            })
        })
    }

    pub fn fresh(&mut self) -> PhaseResult<String> {
        let name = self
            .candidates()
            .find(|candidate| !self.in_use.contains(candidate))
            .ok_or(NormalizeErrorType::SymbolSpaceExhausted {
                capacity: self.config.capacity(),
            })?;

        trace!("allocated fresh nonterminal {}", name);
        self.in_use.insert(name.clone());
        self.allocated.push(name.clone());
        Ok(name)
    }

    // Everything handed out so far, in order
    pub fn allocated(&self) -> &[String] {
        &self.allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_use(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn skips_names_in_use() {
        let mut allocator = SymbolAllocator::new(AllocatorConfig::default(), in_use(&["A", "B", "D"]));

        assert_eq!(allocator.fresh(), Ok("C".to_string()));
        assert_eq!(allocator.fresh(), Ok("E".to_string()));
        assert_eq!(allocator.allocated(), &["C".to_string(), "E".to_string()]);
    }

    #[test]
    fn moves_on_to_suffixed_names() {
        let letters: Vec<String> = ('A'..='Z').map(|c| c.to_string()).collect();
        let mut allocator = SymbolAllocator::new(AllocatorConfig::default(), letters);

        assert_eq!(allocator.fresh(), Ok("A1".to_string()));
        assert_eq!(allocator.fresh(), Ok("B1".to_string()));
    }

    #[test]
    fn single_letters_run_out() {
        let mut allocator = SymbolAllocator::new(AllocatorConfig::single_letters(), in_use(&["S"]));

        for _ in 0..25 {
            assert!(allocator.fresh().is_ok());
        }
        assert_eq!(allocator.fresh(), Err(NormalizeErrorType::SymbolSpaceExhausted { capacity: 26 }));
    }

    #[test]
    fn capacity_counts_suffixes() {
        assert_eq!(AllocatorConfig::default().capacity(), 260);
        assert_eq!(AllocatorConfig::single_letters().capacity(), 26);
        assert_eq!(AllocatorConfig { alphabet: vec!['X', 'Y'], max_suffix: 2 }.capacity(), 6);
    }
}
