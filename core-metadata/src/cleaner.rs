//! Search term cleaning
//!
//! Free-text names coming from streaming services carry diacritics and
//! irregular spacing that make exact-phrase catalog queries miss. Cleaners
//! fold those away before the query and the cache fingerprint are built.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalizes free-text search terms.
///
/// Implementations must be idempotent and must not reorder or drop content
/// other than diacritics and redundant whitespace.
pub trait MetadataCleaner: Send + Sync {
    /// Clean a recording or release title
    fn clean_recording(&self, title: &str) -> String;

    /// Clean an artist name (or a comma-joined list of names)
    fn clean_artist(&self, artist: &str) -> String;
}

/// Cleaner for Latin-script metadata.
///
/// Applies compatibility decomposition, drops combining marks and collapses
/// whitespace runs: `"  Beyoncé   Knowles "` becomes `"Beyonce Knowles"`.
#[derive(Debug, Clone, Default)]
pub struct LatinCleaner;

impl LatinCleaner {
    pub fn new() -> Self {
        Self
    }

    fn fold(text: &str) -> String {
        let stripped: String = text.nfkd().filter(|c| !is_combining_mark(*c)).collect();
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl MetadataCleaner for LatinCleaner {
    fn clean_recording(&self, title: &str) -> String {
        Self::fold(title)
    }

    fn clean_artist(&self, artist: &str) -> String {
        Self::fold(artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics() {
        let cleaner = LatinCleaner::new();
        assert_eq!(cleaner.clean_artist("Beyoncé"), "Beyonce");
        assert_eq!(cleaner.clean_artist("Sigur Rós"), "Sigur Ros");
        assert_eq!(cleaner.clean_recording("Déjà Vu"), "Deja Vu");
    }

    #[test]
    fn test_collapses_whitespace() {
        let cleaner = LatinCleaner::new();
        assert_eq!(
            cleaner.clean_recording("  Bohemian \t Rhapsody  "),
            "Bohemian Rhapsody"
        );
        assert_eq!(cleaner.clean_artist("   "), "");
    }

    #[test]
    fn test_keeps_punctuation_and_order() {
        let cleaner = LatinCleaner::new();
        assert_eq!(cleaner.clean_artist("Simon & Garfunkel"), "Simon & Garfunkel");
        assert_eq!(cleaner.clean_recording("Song (Live)"), "Song (Live)");
        assert_eq!(cleaner.clean_artist("AC/DC, Motörhead"), "AC/DC, Motorhead");
    }

    #[test]
    fn test_idempotent() {
        let cleaner = LatinCleaner::new();
        for input in ["Mötley Crüe", "  Ça   plane pour moi ", "Björk"] {
            let once = cleaner.clean_recording(input);
            assert_eq!(cleaner.clean_recording(&once), once);
        }
    }
}
