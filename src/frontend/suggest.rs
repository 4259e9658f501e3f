//! "Did you mean" suggestions by edit distance.

use strsim::levenshtein;

/// Largest edit distance still considered a typo.
pub const MAX_DISTANCE: usize = 2;

/// Most suggestions attached to one diagnostic.
pub const MAX_SUGGESTIONS: usize = 5;

/// Return candidates within [`MAX_DISTANCE`] edits of `needle`, closest first.
///
/// A case-sensitive pass runs first; a case-insensitive pass then adds names that only match when
/// case is ignored (`writeline` finds `WriteLine`). The needle itself is never suggested.
pub fn similar_names<'a>(needle: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let needle = needle.trim();
    if needle.is_empty() {
        return vec![];
    }
    let lowered = needle.to_lowercase();

    let mut scored: Vec<(usize, &str)> = Vec::new();
    let mut folded: Vec<(usize, &str)> = Vec::new();
    for candidate in candidates {
        if candidate.is_empty() || candidate == needle {
            continue;
        }
        let distance = levenshtein(needle, candidate);
        if distance <= MAX_DISTANCE {
            scored.push((distance, candidate));
            continue;
        }
        let distance = levenshtein(&lowered, &candidate.to_lowercase());
        if distance <= MAX_DISTANCE {
            folded.push((distance, candidate));
        }
    }

    scored.sort_unstable();
    folded.sort_unstable();
    let mut names: Vec<String> = Vec::new();
    for (_, name) in scored.into_iter().chain(folded) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        if names.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    names
}

/// Format suggestions as a "did you mean" message.
pub fn did_you_mean(names: &[String]) -> Option<String> {
    match names {
        [] => None,
        [one] => Some(format!("did you mean '{one}'?")),
        many => Some(format!(
            "did you mean one of: {}?",
            many.iter().map(|s| format!("'{s}'")).collect::<Vec<_>>().join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_close_names_in_distance_order() {
        let names = similar_names("make", ["make2", "mk", "take", "unrelated"]);
        assert_eq!(names, vec!["make2", "take", "mk"]);
    }

    #[test]
    fn case_insensitive_pass_follows_exact_pass() {
        let names = similar_names("writeline", ["WriteLine", "writelin"]);
        assert_eq!(names, vec!["writelin", "WriteLine"]);
    }

    #[test]
    fn caps_at_five_and_skips_self() {
        let candidates = ["ab", "ac", "ad", "ae", "af", "ag", "aa"];
        let names = similar_names("aa", candidates);
        assert_eq!(names.len(), MAX_SUGGESTIONS);
        assert!(!names.contains(&"aa".to_string()));
    }

    #[test]
    fn message_lists_every_name() {
        assert_eq!(did_you_mean(&[]), None);
        assert_eq!(did_you_mean(&["run".into()]).as_deref(), Some("did you mean 'run'?"));
        assert_eq!(
            did_you_mean(&["run".into(), "ran".into()]).as_deref(),
            Some("did you mean one of: 'run', 'ran'?")
        );
    }
}
