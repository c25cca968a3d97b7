//! Reference sorting routines.
//!
//! Every routine here sorts in place using only `>` between elements, so it
//! works both on ordinary values and on analyzer [`Item`]s.
//!
//! [`Item`]: crate::item::Item

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::analyzer::Analyzer;
use crate::error::AnalyzeError;
use crate::tree::DecisionTree;

pub fn selection_sort<T: PartialOrd>(items: &mut [T]) {
    let n = items.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if items[min] > items[j] {
                min = j;
            }
        }
        items.swap(i, min);
    }
}

pub fn bubble_sort<T: PartialOrd>(items: &mut [T]) {
    let n = items.len();
    for i in 1..n {
        for j in 0..n - i {
            if items[j] > items[j + 1] {
                items.swap(j, j + 1);
            }
        }
    }
}

pub fn insertion_sort<T: PartialOrd>(items: &mut [T]) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && items[j - 1] > items[j] {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

pub fn shell_sort<T: PartialOrd>(items: &mut [T]) {
    let n = items.len();
    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            let mut j = i;
            while j >= gap && items[j - gap] > items[j] {
                items.swap(j, j - gap);
                j -= gap;
            }
        }
        gap /= 2;
    }
}

/// Bidirectional bubble sort, stopping early once a pass makes no swap.
pub fn cocktail_shaker_sort<T: PartialOrd>(items: &mut [T]) {
    if items.len() < 2 {
        return;
    }
    let mut start = 0;
    let mut end = items.len() - 1;
    loop {
        let mut swapped = false;
        for i in start..end {
            if items[i] > items[i + 1] {
                items.swap(i, i + 1);
                swapped = true;
            }
        }
        if !swapped {
            return;
        }
        end -= 1;

        swapped = false;
        for i in (start..end).rev() {
            if items[i] > items[i + 1] {
                items.swap(i, i + 1);
                swapped = true;
            }
        }
        if !swapped {
            return;
        }
        start += 1;
    }
}

/// Built-in routines, selectable by name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Algorithm {
    Selection,
    Bubble,
    Insertion,
    Shell,
    CocktailShaker,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Selection,
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Shell,
        Algorithm::CocktailShaker,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Selection => "selection",
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Shell => "shell",
            Algorithm::CocktailShaker => "cocktail-shaker",
        }
    }

    pub fn run<T: PartialOrd>(self, items: &mut [T]) {
        match self {
            Algorithm::Selection => selection_sort(items),
            Algorithm::Bubble => bubble_sort(items),
            Algorithm::Insertion => insertion_sort(items),
            Algorithm::Shell => shell_sort(items),
            Algorithm::CocktailShaker => cocktail_shaker_sort(items),
        }
    }

    /// Decision tree of this routine on `size` items.
    pub fn analyze(self, size: usize) -> Result<DecisionTree, AnalyzeError> {
        Analyzer::new(size).analyze(|items| self.run(items))
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let name = lower
            .strip_suffix("-sort")
            .or_else(|| lower.strip_suffix("sort"))
            .unwrap_or(&lower);
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == name || a.name().replace('-', "") == name)
            .ok_or_else(|| format!("unknown algorithm '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_sorts_plain_values() {
        let inputs: Vec<Vec<i32>> = vec![
            vec![],
            vec![1],
            vec![2, 1],
            vec![3, 1, 2],
            vec![5, 4, 3, 2, 1],
            vec![4, 9, 1, 7, 3, 8, 2],
        ];
        for algorithm in Algorithm::ALL {
            for input in &inputs {
                let mut v = input.clone();
                algorithm.run(&mut v);
                let mut expected = input.clone();
                expected.sort();
                assert_eq!(v, expected, "{} failed on {:?}", algorithm, input);
            }
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("bubble".parse::<Algorithm>(), Ok(Algorithm::Bubble));
        assert_eq!("Insertion-Sort".parse::<Algorithm>(), Ok(Algorithm::Insertion));
        assert_eq!("cocktail-shaker".parse::<Algorithm>(), Ok(Algorithm::CocktailShaker));
        assert_eq!("cocktailshaker".parse::<Algorithm>(), Ok(Algorithm::CocktailShaker));
        assert!("quick".parse::<Algorithm>().is_err());
        assert_eq!("Quick-Sort".parse::<Algorithm>(), Err("unknown algorithm 'Quick-Sort'".to_string()));
        for a in Algorithm::ALL {
            assert_eq!(a.to_string().parse::<Algorithm>(), Ok(a));
        }
    }
}
