// Player name canonicalization.
//
// Roster CSVs and stat feeds disagree on formatting: generational suffixes
// ("Patrick Mahomes Jr."), concatenated initials ("J.Love"), stray periods
// and whitespace. Normalization folds all of these into a single lowercase
// form so the fuzzy matcher can compare names token by token.

/// Generational suffix tokens stripped from the end of a name. Compared
/// case-insensitively after periods have been converted to spaces, so "Jr."
/// and "JR" both match.
const SUFFIX_TOKENS: &[&str] = &["jr", "sr", "ii", "iii", "iv", "v"];

/// Canonicalize a player name for comparison.
///
/// Steps: trim, convert every period to a space (handles concatenated
/// abbreviations like "J.Love"), lowercase, then strip trailing generational
/// suffix tokens ({Jr, Sr, II, III, IV, V}, whitespace-preceded) until none
/// remains.
///
/// The result contains no periods, no surrounding whitespace, and no trailing
/// suffix token, which makes the function idempotent:
/// `normalize_name(normalize_name(x)) == normalize_name(x)` for any input.
pub fn normalize_name(raw: &str) -> String {
    let mut name = raw.trim().replace('.', " ").to_lowercase();
    name.truncate(name.trim_end().len());

    // Stripping repeats so the output is stable under re-normalization even
    // for degenerate inputs like "Smith II II".
    loop {
        let stripped_len = match name.rsplit_once(char::is_whitespace) {
            Some((head, last)) if SUFFIX_TOKENS.contains(&last) => head.trim_end().len(),
            _ => break,
        };
        name.truncate(stripped_len);
    }

    name.trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
