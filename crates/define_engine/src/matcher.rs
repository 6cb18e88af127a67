//! Guess matching for the DEFINE game.
//!
//! A guess is compared to the target word after case folding. When it is not
//! an exact match, a three-tier rule decides whether it still counts as
//! "close": prefix containment, a long shared prefix, or a bounded edit
//! distance. The tiers are evaluated in order and short-circuit.

use tracing::instrument;

/// Minimum edit distance allowed regardless of word length.
const MIN_EDIT_THRESHOLD: usize = 2;

/// Fraction of the longer word's length allowed as edit distance.
const EDIT_RATIO: f64 = 0.3;

/// Shared leading run longer than this counts as fuzzy on its own.
const COMMON_PREFIX_RUN: usize = 4;

/// Classification of a guess against the target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessMatch {
    /// Case-folded equality.
    pub exact: bool,
    /// Close but not exact; always `false` when `exact` is `true`.
    pub fuzzy: bool,
}

/// Compares a guess to the target word.
///
/// Both inputs are case-folded before comparison; no other normalization is
/// applied. The function is total and never panics: an empty guess (or an
/// empty target) is neither exact nor fuzzy.
#[instrument]
pub fn match_guess(guess: &str, target: &str) -> GuessMatch {
    let guess: Vec<char> = guess.to_lowercase().chars().collect();
    let target: Vec<char> = target.to_lowercase().chars().collect();

    if guess.is_empty() || target.is_empty() {
        return GuessMatch {
            exact: false,
            fuzzy: false,
        };
    }

    if guess == target {
        return GuessMatch {
            exact: true,
            fuzzy: false,
        };
    }

    let fuzzy = is_prefix_of_either(&guess, &target)
        || common_prefix_len(&guess, &target) > COMMON_PREFIX_RUN
        || levenshtein(&guess, &target) <= edit_threshold(guess.len().max(target.len()));

    GuessMatch { exact: false, fuzzy }
}

/// Checks whether either string is a prefix of the other.
fn is_prefix_of_either(a: &[char], b: &[char]) -> bool {
    let n = a.len().min(b.len());
    a[..n] == b[..n]
}

/// Length of the shared leading run of identical characters.
fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Edit distance allowed for words of the given (longer) length.
fn edit_threshold(max_len: usize) -> usize {
    ((max_len as f64 * EDIT_RATIO).floor() as usize).max(MIN_EDIT_THRESHOLD)
}

/// Classic Levenshtein distance with unit-cost insert, delete, substitute.
///
/// Two-row dynamic program; O(len(a) × len(b)) time, O(len(b)) space.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
