// Fuzzy name matching.
//
// Decides whether two raw name strings plausibly denote the same player.
// Works on normalized forms and applies a fixed rule ladder; the first rule
// that fires wins. The rules are deliberately permissive about initials and
// dropped first names ("P. Mahomes", "Love") because roster CSVs abbreviate
// freely, while still rejecting names that share nothing but formatting.

use std::collections::HashSet;

use crate::matching::normalize::normalize_name;

/// Whether a normalized token is an initial: a single alphabetic character
/// once trailing periods are stripped.
fn is_initial(token: &str) -> bool {
    let cleaned = token.trim_end_matches('.');
    let mut chars = cleaned.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// Whether two raw names plausibly refer to the same player.
///
/// Rule ladder (first satisfied wins):
/// 1. Normalized forms are equal.
/// 2. One normalized form contains the other.
/// 3. Both names have non-initial tokens and one set is a subset of the
///    other, or their final non-initial tokens (surnames) are equal.
/// 4. Final meaningful tokens are equal and either side has only one
///    meaningful token ("Love" vs "Jordan Love"), or both sides'
///    {first, last} token sets are equal (reordered first/last names).
pub fn names_match(a: &str, b: &str) -> bool {
    let norm_a = normalize_name(a);
    let norm_b = normalize_name(b);

    if norm_a == norm_b {
        return true;
    }

    // Containment handles nicknames and extra words.
    if norm_a.contains(&norm_b) || norm_b.contains(&norm_a) {
        return true;
    }

    let tokens_a: Vec<&str> = norm_a.split_whitespace().collect();
    let tokens_b: Vec<&str> = norm_b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return false;
    }

    let non_initials_a: Vec<&str> = tokens_a.iter().copied().filter(|t| !is_initial(t)).collect();
    let non_initials_b: Vec<&str> = tokens_b.iter().copied().filter(|t| !is_initial(t)).collect();

    if !non_initials_a.is_empty() && !non_initials_b.is_empty() {
        let set_a: HashSet<&str> = non_initials_a.iter().copied().collect();
        let set_b: HashSet<&str> = non_initials_b.iter().copied().collect();
        // "P. Mahomes" vs "Patrick Mahomes": {mahomes} ⊆ {patrick, mahomes}.
        if set_a.is_subset(&set_b) || set_b.is_subset(&set_a) {
            return true;
        }
        // Shared surname is enough once initials are out of the picture.
        if non_initials_a.last() == non_initials_b.last() {
            return true;
        }
    }

    // Fall back to all tokens for names made entirely of initials.
    let meaningful_a = if non_initials_a.is_empty() { &tokens_a } else { &non_initials_a };
    let meaningful_b = if non_initials_b.is_empty() { &tokens_b } else { &non_initials_b };

    if meaningful_a.last() == meaningful_b.last() {
        // A lone surname matches any fuller form of the same surname.
        if meaningful_a.len() == 1 || meaningful_b.len() == 1 {
            return true;
        }
        // Both sides have first and last: require them to agree, in any order.
        let first_last_a: HashSet<&str> =
            [meaningful_a[0], meaningful_a[meaningful_a.len() - 1]].into_iter().collect();
        let first_last_b: HashSet<&str> =
            [meaningful_b[0], meaningful_b[meaningful_b.len() - 1]].into_iter().collect();
        if first_last_a == first_last_b {
            return true;
        }
    }

    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
