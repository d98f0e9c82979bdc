use unicode_normalization::UnicodeNormalization;

/// Normalize Unicode text to NFC form and collapse whitespace runs.
///
/// Roster names arrive with inconsistent composition of Arabic diacritics
/// and stray double spaces; both change the encoded search query.
pub fn normalize_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the image search query for a reciter name.
pub fn build_query(qualifier: Option<&str>, name: &str) -> String {
    let name = normalize_text(name);
    match qualifier.map(normalize_text).filter(|q| !q.is_empty()) {
        Some(q) => format!("{q} {name}"),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nfc() {
        // alef + combining hamza above -> precomposed alef with hamza above
        let decomposed = "\u{0627}\u{0654}";
        assert_eq!(normalize_text(decomposed), "\u{0623}");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(normalize_text("  ماهر   المعيقلي \n"), "ماهر المعيقلي");
    }

    #[test]
    fn test_build_query_with_qualifier() {
        assert_eq!(build_query(Some("القارئ"), "ماهر المعيقلي"), "القارئ ماهر المعيقلي");
    }

    #[test]
    fn test_build_query_without_qualifier() {
        assert_eq!(build_query(None, " Mishary  Alafasy"), "Mishary Alafasy");
        assert_eq!(build_query(Some(" "), "Mishary"), "Mishary");
    }
}
