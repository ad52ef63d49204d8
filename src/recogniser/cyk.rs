use std::collections::BTreeSet;

use crate::grammar::{Grammar, Symbol};

/// CYK membership test. Only the alternatives that are already in Chomsky
/// normal form take part; anything else in the grammar is ignored.
pub fn recognise(grammar: &Grammar, word: &[String]) -> bool {
    if word.is_empty() {
        return grammar.accepts_empty;
    }

    let n = word.len();
    // table[i][len - 1] holds the nonterminals deriving word[i..i + len]
    let mut table: Vec<Vec<BTreeSet<&str>>> = vec![vec![BTreeSet::new(); n]; n];

    for (i, token) in word.iter().enumerate() {
        for (lhs, rewrite) in &grammar.rules {
            let derives = rewrite.iter()
                .any(|alternative| matches!(alternative.as_slice(), [Symbol::Terminal(t)] if t == token));
            if derives {
                table[i][0].insert(lhs.as_str());
            }
        }
    }

    for len in 2..=n {
        for i in 0..=n - len {
            for split in 1..len {
                for (lhs, rewrite) in &grammar.rules {
                    for alternative in rewrite {
                        if let [Symbol::Nonterminal(left), Symbol::Nonterminal(right)] = alternative.as_slice() {
                            if table[i][split - 1].contains(left.as_str())
                                && table[i + split][len - split - 1].contains(right.as_str())
                            {
                                table[i][len - 1].insert(lhs.as_str());
                            }
                        }
                    }
                }
            }
        }
    }

    table[0][n - 1].contains(grammar.start_symbol.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Vec<String> {
        text.chars().map(|c| c.to_string()).collect()
    }

    // a^n b^n for n >= 1
    fn anbn() -> Grammar {
        Grammar::from_literal(
            &["S", "T", "A", "B"],
            &["a", "b"],
            &[("S", &["AB", "AT"]), ("T", &["SB"]), ("A", &["a"]), ("B", &["b"])],
            "S",
        )
    }

    #[test]
    fn recognise_balanced_words() {
        let grammar = anbn();

        for accepted in ["ab", "aabb", "aaabbb"] {
            assert!(recognise(&grammar, &word(accepted)), "{} rejected", accepted);
        }
        for rejected in ["a", "ba", "aab", "abab", ""] {
            assert!(!recognise(&grammar, &word(rejected)), "{} accepted", rejected);
        }
    }

    #[test]
    fn empty_word_follows_flag() {
        let mut grammar = anbn();
        grammar.accepts_empty = true;

        assert!(recognise(&grammar, &[]));
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert!(!recognise(&anbn(), &word("ac")));
    }
}
