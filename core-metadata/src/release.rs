//! Best-release selection
//!
//! A recording usually appears on many releases (original album, singles,
//! compilations, regional pressings). The selector picks one deterministically:
//! the oldest dated release whose title differs from the recording title,
//! preferring worldwide (`XW`) and US editions.

use crate::providers::Release;
use std::cmp::Ordering;
use tracing::debug;

/// Countries whose releases are treated as the reference edition
const PREFERRED_COUNTRIES: [&str; 2] = ["XW", "US"];

/// Dates shorter than a four-digit year sort after every dated release
fn has_valid_date(release: &Release) -> bool {
    release.date.len() >= 4
}

/// Total order: dated first, then date, title and id, all lexicographic
fn release_order(a: &Release, b: &Release) -> Ordering {
    has_valid_date(b)
        .cmp(&has_valid_date(a))
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.id.cmp(&b.id))
}

/// Picks the best release of a recording titled `recording_title`.
///
/// Returns `None` only when `releases` is empty. The input slice is left in
/// its original order.
///
/// Dates are compared as strings, so `"2020" < "2020-01"` but a malformed
/// `"2020-1"` sorts after `"2020-01"`.
pub fn select_best_release<'a>(
    releases: &'a [Release],
    recording_title: &str,
) -> Option<&'a Release> {
    match releases {
        [] => return None,
        [only] => return Some(only),
        _ => {}
    }

    let mut sorted: Vec<&Release> = releases.iter().collect();
    sorted.sort_by(|a, b| release_order(a, b));

    let titled_differently = |release: &&Release| release.title != recording_title;

    if let Some(release) = sorted
        .iter()
        .copied()
        .filter(titled_differently)
        .find(|release| PREFERRED_COUNTRIES.contains(&release.country.as_str()))
    {
        return Some(release);
    }

    if let Some(release) = sorted.iter().copied().find(titled_differently) {
        return Some(release);
    }

    let oldest = sorted[0];
    debug!(
        recording_title,
        release_title = %oldest.title,
        release_id = %oldest.id,
        "No release titled differently from the recording, picking oldest"
    );
    Some(oldest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(id: &str, title: &str, date: &str, country: &str) -> Release {
        Release {
            id: id.to_string(),
            title: title.to_string(),
            status: "Official".to_string(),
            date: date.to_string(),
            country: country.to_string(),
            disambiguation: String::new(),
            track_count: 10,
        }
    }

    #[test]
    fn test_empty_returns_none() {
        assert!(select_best_release(&[], "X").is_none());
    }

    #[test]
    fn test_single_release_returned_unconditionally() {
        let only = release("a", "X", "", "");
        let releases = vec![only.clone()];

        assert_eq!(select_best_release(&releases, "X"), Some(&only));
    }

    #[test]
    fn test_preferred_country_wins() {
        let releases = vec![
            release("a", "Y", "2005", "DE"),
            release("b", "Y", "1990", "US"),
        ];

        let best = select_best_release(&releases, "X").unwrap();
        assert_eq!(best.id, "b");
    }

    #[test]
    fn test_preferred_country_beats_older_foreign_release() {
        let releases = vec![
            release("a", "Y", "1990", "DE"),
            release("b", "Y", "2005", "XW"),
        ];

        let best = select_best_release(&releases, "X").unwrap();
        assert_eq!(best.id, "b");
    }

    #[test]
    fn test_preferred_country_ignored_when_title_matches_recording() {
        let releases = vec![
            release("single", "X", "1990", "US"),
            release("album", "Album", "1995", "GB"),
        ];

        let best = select_best_release(&releases, "X").unwrap();
        assert_eq!(best.id, "album");
    }

    #[test]
    fn test_falls_back_to_oldest_differently_titled() {
        let releases = vec![
            release("late", "Later Comp", "2010", "GB"),
            release("early", "Early Album", "1999", "JP"),
            release("same", "X", "1990", "GB"),
        ];

        let best = select_best_release(&releases, "X").unwrap();
        assert_eq!(best.id, "early");
    }

    #[test]
    fn test_all_titles_match_returns_oldest() {
        let releases = vec![
            release("b", "X", "2001", "US"),
            release("a", "X", "1999-03", "GB"),
            release("c", "X", "", "XW"),
        ];

        let best = select_best_release(&releases, "X").unwrap();
        assert_eq!(best.id, "a");
    }

    #[test]
    fn test_undated_releases_sort_last() {
        let releases = vec![
            release("undated", "Y", "", "US"),
            release("partial", "Y", "199", "US"),
            release("dated", "Y", "2020", "US"),
        ];

        let best = select_best_release(&releases, "X").unwrap();
        assert_eq!(best.id, "dated");
    }

    #[test]
    fn test_dates_compare_lexicographically() {
        let releases = vec![
            release("month", "Y", "2020-01", "US"),
            release("year", "Y", "2020", "US"),
            release("day", "Y", "2020-01-01", "US"),
        ];

        let best = select_best_release(&releases, "X").unwrap();
        assert_eq!(best.id, "year");
    }

    #[test]
    fn test_ties_broken_by_title_then_id() {
        let releases = vec![
            release("z", "B Side", "2000", "US"),
            release("m", "A Side", "2000", "US"),
            release("k", "A Side", "2000", "US"),
        ];

        let best = select_best_release(&releases, "X").unwrap();
        assert_eq!(best.id, "k");
    }

    #[test]
    fn test_input_order_untouched() {
        let releases = vec![
            release("b", "Y", "2005", "US"),
            release("a", "Y", "1990", "US"),
        ];

        let _ = select_best_release(&releases, "X");

        assert_eq!(releases[0].id, "b");
        assert_eq!(releases[1].id, "a");
    }

    #[test]
    fn test_release_order_is_total() {
        let a = release("a", "T", "2000", "US");
        let b = release("b", "T", "2000", "US");

        assert_eq!(release_order(&a, &b), Ordering::Less);
        assert_eq!(release_order(&b, &a), Ordering::Greater);
        assert_eq!(release_order(&a, &a), Ordering::Equal);
    }
}
