/// Choices offered in the selector. The leading blank entry is the "nothing selected" default.
pub const PRESELECTED_WORDS: [&str; 8] = [
    " ",
    "Ingénieuse",
    "Innovante",
    "Imaginative",
    "Originale",
    "Éblouissante",
    "Impressionnante",
    "Inspirée",
];

/// Trims and lower-cases a selection. Blank selections yield `None`.
pub fn normalize(selection: &str) -> Option<String> {
    let trimmed = selection.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Vote count per distinct word, in order of first appearance.
pub fn count_words<S: AsRef<str>>(words: &[S]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for word in words {
        let word = word.as_ref();
        match counts.iter_mut().find(|(seen, _)| seen == word) {
            Some((_, count)) => *count += 1,
            None => counts.push((word.to_string(), 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_trims() {
        assert_eq!(normalize("  Joyeux ").as_deref(), Some("joyeux"));
        assert_eq!(normalize("Éblouissante").as_deref(), Some("éblouissante"));
    }

    #[test]
    fn normalize_rejects_blank_selection() {
        assert_eq!(normalize(PRESELECTED_WORDS[0]), None);
        assert_eq!(normalize("\t \n"), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn counts_keep_first_appearance_order() {
        let words = ["innovante", "originale", "innovante", "inspirée", "innovante"];
        let counts = count_words(&words);
        assert_eq!(
            counts,
            vec![
                ("innovante".to_string(), 3),
                ("originale".to_string(), 1),
                ("inspirée".to_string(), 1),
            ]
        );
    }

    #[test]
    fn every_real_choice_normalizes() {
        for word in PRESELECTED_WORDS.iter().skip(1) {
            assert!(normalize(word).is_some(), "{word} should be selectable");
        }
    }
}
