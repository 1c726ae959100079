//! Base image selection for Windows packages
//!
//! The packager needs one representative image to generate tile and logo
//! assets from. Manifests routinely declare a dozen icons, so the pick is
//! driven by [`ICON_FALLBACK_CHAIN`]: an ordered list of size and type
//! preferences where the first tier with a match wins.
//!
//! ## Matching rules
//!
//! - Only icons whose purpose includes `any` are eligible (absent purpose counts)
//! - An exact `WxH` entry in `sizes` beats a larger image of the same type
//! - A larger image beats a scalable (`sizes: "any"`) one
//! - Tiers with a zero size accept any size and take the first eligible icon
//! - Tiers without a MIME type accept any type, including undeclared ones

use crate::manifest::{IconSize, ManifestIcon};
use std::fmt;

/// PNG MIME type
pub const MIME_PNG: &str = "image/png";

/// JPEG MIME type
pub const MIME_JPEG: &str = "image/jpeg";

/// Only icons with this purpose are considered for the base image
pub const BASE_ICON_PURPOSE: &str = "any";

/// One tier of the base image preference list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconCriteria {
    /// Desired width in pixels, 0 for any size
    pub width: u32,
    /// Desired height in pixels, 0 for any size
    pub height: u32,
    /// Desired MIME type, `None` for any type
    pub mime_type: Option<&'static str>,
}

impl IconCriteria {
    pub const fn new(width: u32, height: u32, mime_type: Option<&'static str>) -> Self {
        Self {
            width,
            height,
            mime_type,
        }
    }

    /// Whether this tier constrains the image size
    pub fn is_sized(&self) -> bool {
        self.width > 0 || self.height > 0
    }

    fn accepts_type(&self, icon: &ManifestIcon) -> bool {
        match self.mime_type {
            None => true,
            Some(wanted) => icon
                .mime_type
                .as_deref()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(wanted)),
        }
    }
}

impl fmt::Display for IconCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sized() {
            write!(f, "{}x{}", self.width, self.height)?;
        } else {
            f.write_str("any size")?;
        }
        write!(f, ", {}", self.mime_type.unwrap_or("any type"))
    }
}

/// Base image preference list, most preferred first
pub const ICON_FALLBACK_CHAIN: &[IconCriteria] = &[
    IconCriteria::new(512, 512, Some(MIME_PNG)),
    IconCriteria::new(192, 192, Some(MIME_PNG)),
    IconCriteria::new(512, 512, Some(MIME_JPEG)),
    IconCriteria::new(192, 192, Some(MIME_JPEG)),
    IconCriteria::new(512, 512, None),
    IconCriteria::new(192, 192, None),
    IconCriteria::new(0, 0, Some(MIME_PNG)),
    IconCriteria::new(0, 0, Some(MIME_JPEG)),
    IconCriteria::new(0, 0, None),
];

/// Find the icon that best satisfies a single tier
pub fn find_suitable_icon<'a>(
    icons: &'a [ManifestIcon],
    purpose: &str,
    criteria: &IconCriteria,
) -> Option<&'a ManifestIcon> {
    let mut candidates = icons
        .iter()
        .filter(|icon| icon.has_purpose(purpose) && criteria.accepts_type(icon));

    if !criteria.is_sized() {
        return candidates.next();
    }

    let candidates: Vec<&ManifestIcon> = candidates.collect();

    if let Some(exact) = candidates
        .iter()
        .copied()
        .find(|icon| icon.has_size(criteria.width, criteria.height))
    {
        return Some(exact);
    }

    // Smallest image that still covers the tier; scalable images rank last
    candidates
        .into_iter()
        .filter_map(|icon| {
            icon.parsed_sizes()
                .into_iter()
                .filter(|size| size.covers(criteria.width, criteria.height))
                .map(|size| match size {
                    IconSize::Fixed { width, height } => u64::from(width) * u64::from(height),
                    IconSize::Any => u64::MAX,
                })
                .min()
                .map(|area| (icon, area))
        })
        .min_by_key(|(_, area)| *area)
        .map(|(icon, _)| icon)
}

/// Walk [`ICON_FALLBACK_CHAIN`] and return the first match
pub fn select_base_icon(icons: &[ManifestIcon]) -> Option<&ManifestIcon> {
    for (tier, criteria) in ICON_FALLBACK_CHAIN.iter().enumerate() {
        if let Some(icon) = find_suitable_icon(icons, BASE_ICON_PURPOSE, criteria) {
            tracing::debug!(
                tier = tier + 1,
                criteria = %criteria,
                src = %icon.src,
                "Selected base image"
            );
            return Some(icon);
        }
    }

    tracing::debug!(icons = icons.len(), "No suitable base image in manifest");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(src: &str, sizes: &str) -> ManifestIcon {
        ManifestIcon::new(src, sizes, Some(MIME_PNG))
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(ICON_FALLBACK_CHAIN.len(), 9);
        assert_eq!(ICON_FALLBACK_CHAIN[0], IconCriteria::new(512, 512, Some(MIME_PNG)));
        assert_eq!(ICON_FALLBACK_CHAIN[3], IconCriteria::new(192, 192, Some(MIME_JPEG)));
        assert_eq!(ICON_FALLBACK_CHAIN[8], IconCriteria::new(0, 0, None));
    }

    #[test]
    fn test_criteria_display() {
        assert_eq!(ICON_FALLBACK_CHAIN[0].to_string(), "512x512, image/png");
        assert_eq!(ICON_FALLBACK_CHAIN[8].to_string(), "any size, any type");
    }

    #[test]
    fn test_exact_match_beats_larger() {
        let icons = vec![png("/1024.png", "1024x1024"), png("/512.png", "512x512")];
        let criteria = IconCriteria::new(512, 512, Some(MIME_PNG));
        assert_eq!(
            find_suitable_icon(&icons, "any", &criteria).unwrap().src,
            "/512.png"
        );
    }

    #[test]
    fn test_smallest_covering_icon() {
        let icons = vec![
            png("/2048.png", "2048x2048"),
            png("/256.png", "256x256"),
            png("/128.png", "128x128"),
        ];
        let criteria = IconCriteria::new(192, 192, Some(MIME_PNG));
        assert_eq!(
            find_suitable_icon(&icons, "any", &criteria).unwrap().src,
            "/256.png"
        );
    }

    #[test]
    fn test_smaller_icon_not_used_for_sized_tier() {
        let icons = vec![png("/128.png", "128x128")];
        let criteria = IconCriteria::new(192, 192, Some(MIME_PNG));
        assert!(find_suitable_icon(&icons, "any", &criteria).is_none());
    }

    #[test]
    fn test_undeclared_type_only_matches_wildcard() {
        let icons = vec![ManifestIcon::new("/icon", "512x512", None)];
        let png_tier = IconCriteria::new(512, 512, Some(MIME_PNG));
        let any_tier = IconCriteria::new(512, 512, None);
        assert!(find_suitable_icon(&icons, "any", &png_tier).is_none());
        assert!(find_suitable_icon(&icons, "any", &any_tier).is_some());
    }

    #[test]
    fn test_maskable_icons_skipped() {
        let mut maskable = png("/mask.png", "512x512");
        maskable.purpose = Some("maskable".to_string());
        let icons = vec![maskable, png("/small.png", "48x48")];
        assert_eq!(select_base_icon(&icons).unwrap().src, "/small.png");
    }

    #[test]
    fn test_empty_icons() {
        assert!(select_base_icon(&[]).is_none());
    }
}
