//! String similarity scoring (0-100).

use crate::element::round_half_up;

/// Classic Levenshtein edit distance over chars
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0usize; n + 1];

    for (i, a_ch) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Similarity of two strings on a 0-100 scale.
///
/// - identical strings score 100
/// - an empty side scores 0
/// - containment scores `min_len / max_len`
/// - anything else scores `(max_len - distance) / max_len`
#[must_use]
pub fn calculate_string_similarity(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b) as f64;

    if a.contains(b) || b.contains(a) {
        let min_len = len_a.min(len_b) as f64;
        return to_score(min_len / max_len * 100.0);
    }

    let distance = levenshtein(a, b) as f64;
    to_score((max_len - distance) / max_len * 100.0)
}

/// Score for `term` appearing inside a longer `field`.
///
/// Biased toward fields the term mostly fills, capped at 95 so that only an
/// exact match reaches 100. Returns `None` when `term` is not a substring.
#[must_use]
pub fn containment_score(term: &str, field: &str) -> Option<u8> {
    if term.is_empty() || field.is_empty() || !field.contains(term) {
        return None;
    }
    let ratio = term.chars().count() as f64 / field.chars().count() as f64;
    Some(to_score((ratio * 80.0 + 20.0).min(95.0)))
}

fn to_score(value: f64) -> u8 {
    round_half_up(value).clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    mod levenshtein_tests {
        use super::*;

        #[test]
        fn test_levenshtein() {
            assert_eq!(levenshtein("", ""), 0);
            assert_eq!(levenshtein("abc", "abc"), 0);
            assert_eq!(levenshtein("abc", "ab"), 1);
            assert_eq!(levenshtein("kitten", "sitting"), 3);
            assert_eq!(levenshtein("", "abc"), 3);
        }

        #[test]
        fn test_levenshtein_counts_chars_not_bytes() {
            assert_eq!(levenshtein("café", "cafe"), 1);
        }
    }

    mod similarity_tests {
        use super::*;

        #[test]
        fn test_exact_match() {
            assert_eq!(calculate_string_similarity("login", "login"), 100);
            assert_eq!(calculate_string_similarity("", ""), 100);
        }

        #[test]
        fn test_empty_side() {
            assert_eq!(calculate_string_similarity("", "x"), 0);
            assert_eq!(calculate_string_similarity("x", ""), 0);
        }

        #[test]
        fn test_containment_ratio() {
            // 5 / 12 = 41.67
            assert_eq!(calculate_string_similarity("login", "login-button"), 42);
            assert_eq!(calculate_string_similarity("login-button", "login"), 42);
        }

        #[test]
        fn test_edit_distance() {
            // kitten/sitting: (7 - 3) / 7 = 57.14
            assert_eq!(calculate_string_similarity("kitten", "sitting"), 57);
            assert_eq!(calculate_string_similarity("abc", "xyz"), 0);
        }

        #[test]
        fn test_case_sensitive() {
            assert!(calculate_string_similarity("Login", "login") < 100);
        }
    }

    mod containment_tests {
        use super::*;

        #[test]
        fn test_containment_score() {
            // 5 / 12 * 80 + 20 = 53.33
            assert_eq!(containment_score("login", "login-button"), Some(53));
            assert_eq!(containment_score("abc", "abc"), Some(95));
            assert_eq!(containment_score("xyz", "login"), None);
            assert_eq!(containment_score("", "login"), None);
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_identity_is_perfect(s in "[a-zA-Z0-9 _-]{1,24}") {
                prop_assert_eq!(calculate_string_similarity(&s, &s), 100);
            }

            #[test]
            fn prop_bounded(a in ".{0,16}", b in ".{0,16}") {
                prop_assert!(calculate_string_similarity(&a, &b) <= 100);
            }

            #[test]
            fn prop_symmetric(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
                prop_assert_eq!(
                    calculate_string_similarity(&a, &b),
                    calculate_string_similarity(&b, &a)
                );
            }

            #[test]
            fn prop_distance_bounded_by_longer(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
                let d = levenshtein(&a, &b);
                prop_assert!(d <= a.len().max(b.len()));
                prop_assert_eq!(d, levenshtein(&b, &a));
            }

            #[test]
            fn prop_containment_capped(term in "[a-z]{1,8}", pad in "[a-z]{0,8}") {
                let field = format!("{pad}{term}");
                let score = containment_score(&term, &field).unwrap_or(0);
                prop_assert!((20..=95).contains(&score));
            }
        }
    }
}
