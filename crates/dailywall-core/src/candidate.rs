//! Candidate building: normalize one feed image into a `Wallpaper`.

use indexmap::IndexMap;

use crate::copyright::parse_caption;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{RawImage, Wallpaper};

/// Path prefix used by older feed URL-bases.
const VENDOR_PREFIX: &str = "/az/hprichbg/rb/";

/// Query prefix in front of the file name in current URL-bases.
const FILENAME_PREFIX: &str = "/th?id=OHR.";

/// Derive the stable wallpaper identifier from a relative URL-base.
///
/// `/th?id=OHR.MauiWhale_EN-US1928366389` and
/// `/th?id=OHR.MauiWhale_FR-FR5517781834` both yield `MauiWhale`, so the same
/// photo gets the same identifier whichever market listed it.
pub fn wallpaper_id(url_base: &str) -> String {
    let name = url_base.replacen(VENDOR_PREFIX, "", 1);
    let name = name.replacen(FILENAME_PREFIX, "", 1);
    match name.split_once('_') {
        Some((id, _)) => id.to_string(),
        None => name,
    }
}

impl Wallpaper {
    /// Build a candidate from a feed image discovered under `market`.
    ///
    /// Fails when the URL-base yields no identifier, the start date is not
    /// an integer or the caption is empty.
    pub fn from_raw(raw: &RawImage, market: &str, base_url: &str) -> PipelineResult<Self> {
        let id = wallpaper_id(&raw.url_base);
        if id.trim().is_empty() {
            return Err(PipelineError::Parse {
                input: raw.url_base.clone(),
                message: format!("no identifier in URL-base of {market} image"),
            });
        }

        let date = raw
            .start_date
            .trim()
            .parse::<i64>()
            .map_err(|e| PipelineError::Parse {
                input: raw.start_date.clone(),
                message: format!("invalid start date for {id}: {e}"),
            })?;

        let (title, copyright) = parse_caption(&raw.copyright)?;

        Ok(Self {
            filename: id.clone(),
            id,
            title,
            copyright,
            date,
            market: market.to_string(),
            url_base: format!("{}{}", base_url.trim_end_matches('/'), raw.url_base),
            full_desc: raw.copyright.clone(),
            tags: IndexMap::new(),
            tags_ordered: Vec::new(),
            colors: Vec::new(),
        })
    }
}
