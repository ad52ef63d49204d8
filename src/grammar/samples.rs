/*
    Built-in grammars used by the command line and the tests
*/

use super::Grammar;

// The worked example: ε in B, an unreachable C, and S used on right-hand sides
pub fn variant() -> Grammar {
    Grammar::from_literal(
        &["S", "A", "B", "C", "D"],
        &["a", "b"],
        &[
            ("S", &["aB", "bA", "A"]),
            ("A", &["B", "AS", "bBAB", "b"]),
            ("B", &["b", "bS", "aD", "ε"]),
            ("C", &["Ba"]),
            ("D", &["AA"]),
        ],
        "S",
    )
}

pub fn unit_chain() -> Grammar {
    Grammar::from_literal(
        &["A", "B", "C"],
        &["d"],
        &[("A", &["B"]), ("B", &["C"]), ("C", &["d"])],
        "A",
    )
}

pub fn unit_cycle() -> Grammar {
    Grammar::from_literal(
        &["S", "A", "B"],
        &["a", "b", "c"],
        &[("S", &["A", "a"]), ("A", &["B", "b"]), ("B", &["A", "c"])],
        "S",
    )
}

pub fn nullable_middle() -> Grammar {
    Grammar::from_literal(
        &["A", "B"],
        &["a", "b", "c"],
        &[("A", &["aBc"]), ("B", &["b", "ε"])],
        "A",
    )
}

pub fn arithmetic() -> Grammar {
    Grammar::from_literal(
        &["E", "T", "F"],
        &["+", "*", "(", ")", "x"],
        &[
            ("E", &["E+T", "T"]),
            ("T", &["T*F", "F"]),
            ("F", &["(E)", "x"]),
        ],
        "E",
    )
}

pub fn long_production() -> Grammar {
    Grammar::from_literal(
        &["A", "W", "X", "Y", "Z"],
        &["w", "x", "y", "z"],
        &[
            ("A", &["WXYZ"]),
            ("W", &["w"]),
            ("X", &["x"]),
            ("Y", &["y"]),
            ("Z", &["z"]),
        ],
        "A",
    )
}

// The start symbol derives the empty string
pub fn nullable_start() -> Grammar {
    Grammar::from_literal(
        &["S", "A"],
        &["a", "b"],
        &[("S", &["AbA", "A"]), ("A", &["aA", "ε"])],
        "S",
    )
}
