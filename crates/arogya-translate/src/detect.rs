// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic detection of Gujarati written in Latin script.

/// Common Gujarati words as they are typed on a Latin keyboard.
///
/// Mostly symptom vocabulary: body (sarir), pain (dard), fever (taap),
/// medicine (davayi), weakness (kamjori), cough (khansi).
const GUJARATI_ROMAN_KEYWORDS: &[&str] = &[
    "shu", "thayu", "sarir", "dard", "taap", "kharab", "madad", "davayi", "kamjori", "pet", "vaar",
    "khansi",
];

/// Returns true when the text looks like romanized Gujarati.
///
/// The check is a lowercase substring match against a small keyword list.
/// It is intentionally loose: a false positive only costs one translation
/// round trip, while a miss sends romanized text straight to the model.
pub fn detect_gujarati_roman(text: &str) -> bool {
    let lower = text.to_lowercase();
    GUJARATI_ROMAN_KEYWORDS.iter().any(|word| lower.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_symptom_vocabulary() {
        assert!(detect_gujarati_roman("mane pet ma dard thay che"));
        assert!(detect_gujarati_roman("sarir ma kamjori lage che"));
        assert!(detect_gujarati_roman("taap avyo che"));
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert!(detect_gujarati_roman("Mane DARD thay che"));
        assert!(detect_gujarati_roman("SHU karvu joie?"));
    }

    #[test]
    fn matches_keyword_inside_larger_word() {
        // Substring semantics: "khansi" inside "khansivalo".
        assert!(detect_gujarati_roman("khansivalo avaj"));
    }

    #[test]
    fn plain_english_is_not_flagged() {
        assert!(!detect_gujarati_roman("I have a fever and a headache"));
        assert!(!detect_gujarati_roman(""));
    }
}
