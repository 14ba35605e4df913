// ABOUTME: Display sort order assignment for nutrients with headline overrides
// ABOUTME: Energy, protein, fat and carbohydrate always lead; other names use a clamped rank hint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Headline nutrients and their fixed positions, checked before any rank hint
pub const HEADLINE_ORDER: [(&str, i32); 4] = [
    ("Energy", 1),
    ("Protein", 2),
    ("Total lipid (fat)", 3),
    ("Carbohydrate, by difference", 4),
];

/// Upper bound applied to rank hints
pub const MAX_SORT_ORDER: i32 = 9999;

/// Bucket for nutrients without a usable rank hint
pub const UNRANKED_SORT_ORDER: i32 = 999;

/// Rank hint as it arrives from a source file or a caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankHint<'a> {
    /// Raw column text, parsed leniently
    Text(&'a str),
    /// Already numeric
    Number(f64),
}

impl RankHint<'_> {
    /// Numeric value of the hint if it is present and finite
    ///
    /// Text is read as a decimal float. Radix-prefixed forms such as `0x10`
    /// are not numbers here and fall back to [`UNRANKED_SORT_ORDER`].
    #[must_use]
    pub fn as_finite(&self) -> Option<f64> {
        let value = match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            Self::Number(value) => *value,
        };
        value.is_finite().then_some(value)
    }
}

/// Assign the display sort order for a nutrient
///
/// Headline names win regardless of the hint. Otherwise a finite hint is
/// rounded to the nearest integer and clamped to [`MAX_SORT_ORDER`]; negative
/// hints pass through. Anything else lands in [`UNRANKED_SORT_ORDER`].
#[must_use]
pub fn assign_sort_order(name: &str, hint: Option<RankHint<'_>>) -> i32 {
    if let Some((_, order)) = HEADLINE_ORDER.iter().find(|(headline, _)| *headline == name) {
        return *order;
    }

    hint.as_ref()
        .and_then(RankHint::as_finite)
        .map_or(UNRANKED_SORT_ORDER, |rank| {
            // Saturating cast; only the upper bound is clamped
            (rank.round() as i32).min(MAX_SORT_ORDER)
        })
}
