//! Static market catalog.
//!
//! Markets are split into an English group and a non-English group. English
//! captions are authoritative, so English markets are always discovered first
//! and an English version of a photo supersedes a stored non-English one.

/// English-language markets, in discovery order.
pub const EN_MARKETS: [&str; 5] = ["en-GB", "en-US", "en-CA", "en-AU", "en-NZ"];

/// Non-English markets, in discovery order.
pub const NON_EN_MARKETS: [&str; 5] = ["fr-FR", "de-DE", "es-ES", "zh-CN", "ja-JP"];

/// The group a market belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketGroup {
    English,
    NonEnglish,
}

/// Classify a market code. Unknown codes belong to neither group.
pub fn group_of(market: &str) -> Option<MarketGroup> {
    if EN_MARKETS.contains(&market) {
        Some(MarketGroup::English)
    } else if NON_EN_MARKETS.contains(&market) {
        Some(MarketGroup::NonEnglish)
    } else {
        None
    }
}

pub fn is_english(market: &str) -> bool {
    group_of(market) == Some(MarketGroup::English)
}

pub fn is_non_english(market: &str) -> bool {
    group_of(market) == Some(MarketGroup::NonEnglish)
}

/// All markets in discovery order: English group first.
pub fn discovery_order() -> Vec<&'static str> {
    EN_MARKETS.iter().chain(NON_EN_MARKETS.iter()).copied().collect()
}
