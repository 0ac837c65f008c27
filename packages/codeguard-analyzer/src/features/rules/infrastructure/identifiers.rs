//! Non-Latin identifier check

/// Hebrew block, U+0590..=U+05FF
const HEBREW: std::ops::RangeInclusive<char> = '\u{0590}'..='\u{05FF}';

pub fn contains_hebrew(name: &str) -> bool {
    name.chars().any(|c| HEBREW.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_hebrew() {
        assert!(contains_hebrew("שלום"));
        assert!(contains_hebrew("total_סכום"));
        assert!(contains_hebrew("\u{0590}"));
        assert!(contains_hebrew("\u{05FF}"));
    }

    #[test]
    fn test_other_scripts_pass() {
        assert!(!contains_hebrew("total"));
        assert!(!contains_hebrew("größe"));
        assert!(!contains_hebrew("значение"));
        assert!(!contains_hebrew("قيمة"));
        assert!(!contains_hebrew(""));
    }
}
