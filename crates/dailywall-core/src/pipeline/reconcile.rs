//! Reconciliation: what to do with a candidate given the stored record.
//!
//! `decide` is pure; the updater performs the write it asks for.

use crate::market;
use crate::types::Wallpaper;

/// The action for one candidate, carrying the record to persist.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Never seen before: enrich the candidate, then store it.
    Create(Wallpaper),
    /// Stored record is current: no write.
    Skip,
    /// Stored record lacks a URL-base: store it with only that field filled in.
    Patch(Wallpaper),
    /// Stored record came from a non-English market and an English version
    /// was found: store the candidate, keeping the original date.
    Upgrade(Wallpaper),
}

/// Decide how to reconcile `candidate` against the stored record.
///
/// A market upgrade takes precedence over a URL-base patch. Upgrades do not
/// re-run enrichment; the merge write keeps the stored tags and colors.
pub fn decide(existing: Option<Wallpaper>, candidate: Wallpaper) -> Decision {
    let Some(mut existing) = existing else {
        return Decision::Create(candidate);
    };

    let needs_url_base = existing.url_base.is_empty();
    let needs_upgrade =
        market::is_non_english(&existing.market) && market::is_english(&candidate.market);

    if needs_upgrade {
        let mut upgraded = candidate;
        upgraded.date = existing.date;
        return Decision::Upgrade(upgraded);
    }

    if needs_url_base {
        existing.url_base = candidate.url_base;
        return Decision::Patch(existing);
    }

    Decision::Skip
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn record(market: &str, url_base: &str, date: i64) -> Wallpaper {
        Wallpaper {
            id: "MauiWhale".to_string(),
            title: format!("title from {market}"),
            copyright: "© Flip Nicklin".to_string(),
            date,
            filename: "MauiWhale".to_string(),
            market: market.to_string(),
            url_base: url_base.to_string(),
            full_desc: "caption".to_string(),
            ..Default::default()
        }
    }

    const URL: &str = "https://www.bing.com/th?id=OHR.MauiWhale_EN-US1928366389";

    #[test]
    fn test_no_existing_creates() {
        let candidate = record("fr-FR", URL, 20230219);
        assert_eq!(decide(None, candidate.clone()), Decision::Create(candidate));
    }

    #[test]
    fn test_current_record_same_group_skips() {
        let existing = record("en-GB", URL, 20230219);
        let candidate = record("en-US", URL, 20230220);
        assert_eq!(decide(Some(existing), candidate), Decision::Skip);
    }

    #[test]
    fn test_english_record_with_non_english_candidate_skips() {
        let existing = record("en-GB", URL, 20230219);
        let candidate = record("ja-JP", URL, 20230219);
        assert_eq!(decide(Some(existing), candidate), Decision::Skip);
    }

    #[test]
    fn test_missing_url_base_patches_only_url_base() {
        let mut existing = record("de-DE", "", 20230219);
        existing.tags = IndexMap::from([("whale".to_string(), 0.97)]);
        existing.colors = vec!["#0A0B0C".to_string()];
        let candidate = record("fr-FR", URL, 20990101);

        let Decision::Patch(patched) = decide(Some(existing.clone()), candidate) else {
            panic!("Expected patch");
        };
        assert_eq!(patched.url_base, URL);
        assert_eq!(patched.date, 20230219);
        assert_eq!(
            Wallpaper {
                url_base: String::new(),
                ..patched
            },
            existing
        );
    }

    #[test]
    fn test_non_english_to_english_upgrades_keeping_date() {
        let existing = record("fr-FR", URL, 20230219);
        let candidate = record("en-US", URL, 20230301);

        let Decision::Upgrade(upgraded) = decide(Some(existing), candidate.clone()) else {
            panic!("Expected upgrade");
        };
        assert_eq!(upgraded.date, 20230219);
        assert_eq!(upgraded.market, "en-US");
        assert_eq!(upgraded.title, candidate.title);
    }

    #[test]
    fn test_upgrade_wins_over_patch() {
        let existing = record("zh-CN", "", 20230219);
        let candidate = record("en-AU", URL, 20230301);

        let Decision::Upgrade(upgraded) = decide(Some(existing), candidate) else {
            panic!("Expected upgrade");
        };
        assert_eq!(upgraded.url_base, URL);
        assert_eq!(upgraded.date, 20230219);
    }
}
