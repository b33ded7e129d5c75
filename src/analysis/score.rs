use std::fmt;

use crate::analysis::extract::Metrics;
use crate::analysis::extract::face::FaceSignal;
use crate::analysis::thresholds::*;

/// Label of the contrast finding.
pub const LABEL_CONTRAST: &str = "Text contrast";
/// Label of the headline length finding.
pub const LABEL_BREVITY: &str = "Short headline";
/// Label of the clutter finding.
pub const LABEL_CLUTTER: &str = "Single focal point";
/// Label of the brand color finding.
pub const LABEL_BRAND: &str = "Brand color";
/// Label of the safe margin finding.
pub const LABEL_MARGIN: &str = "Safe margin";
/// Label of the downsampled readability finding.
pub const LABEL_READABILITY: &str = "Readable at thumbnail size";
/// Label of the face proxy finding.
pub const LABEL_FACE: &str = "Face / subject photo";

const NO_TEXT: &str = "no headline text";

/// One labelled verdict shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    /// Human-readable heuristic name.
    pub label: String,
    /// Whether the heuristic passed.
    pub ok: bool,
    /// Measured values behind the verdict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Finding {
    fn new(label: &str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            label: label.to_owned(),
            ok,
            detail: Some(detail.into()),
        }
    }
}

/// Score and findings of one analysis run.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Analysis {
    /// Overall score in `0..=100`.
    pub score: u8,
    /// Findings in fixed order.
    pub findings: Vec<Finding>,
}

/// Traffic-light bucket of a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// 85 and above.
    Good,
    /// 70 to 84.
    Fair,
    /// Below 70.
    Poor,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        })
    }
}

impl Analysis {
    /// Traffic-light bucket of [`Analysis::score`].
    pub fn grade(&self) -> Grade {
        match self.score {
            85.. => Grade::Good,
            70.. => Grade::Fair,
            _ => Grade::Poor,
        }
    }

    /// Finding with `label`, if emitted.
    pub fn finding(&self, label: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.label == label)
    }

    /// Findings that failed.
    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.ok)
    }
}

/// Turn metrics into findings and a score.
///
/// The score starts at 100 and loses the penalty of every failed finding, saturating at 0.
pub fn score(metrics: &Metrics) -> Analysis {
    let mut findings = Vec::with_capacity(7);
    let mut penalty: u32 = 0;
    let mut push = |finding: Finding, cost: u8| {
        if !finding.ok {
            penalty += u32::from(cost);
        }
        findings.push(finding);
    };

    match metrics.contrast {
        Some(ratio) => {
            let ok = ratio >= CONTRAST_MIN_RATIO;
            let detail = format!("contrast {ratio:.2}:1 (min {CONTRAST_MIN_RATIO:.1}:1)");
            push(Finding::new(LABEL_CONTRAST, ok, detail), PENALTY_LOW_CONTRAST);
        }
        None => push(Finding::new(LABEL_CONTRAST, false, NO_TEXT), PENALTY_NO_TEXT),
    }

    let brevity = match metrics.headline_words {
        Some(words) => Finding::new(
            LABEL_BREVITY,
            words <= HEADLINE_MAX_WORDS,
            format!("{words} words (max {HEADLINE_MAX_WORDS})"),
        ),
        None => Finding::new(LABEL_BREVITY, false, NO_TEXT),
    };
    push(brevity, PENALTY_LONG_HEADLINE);

    let n = metrics.clutter_objects;
    push(
        Finding::new(
            LABEL_CLUTTER,
            n <= CLUTTER_MAX_OBJECTS,
            format!("{n} prominent objects (max {CLUTTER_MAX_OBJECTS})"),
        ),
        PENALTY_CLUTTER,
    );

    let coverage = metrics.brand_coverage;
    push(
        Finding::new(
            LABEL_BRAND,
            coverage >= BRAND_MIN_COVERAGE,
            format!(
                "brand color covers {:.1}% (min {:.1}%)",
                coverage * 100.0,
                BRAND_MIN_COVERAGE * 100.0
            ),
        ),
        PENALTY_BRAND,
    );

    let margin = if metrics.margin_violations.is_empty() {
        Finding::new(
            LABEL_MARGIN,
            true,
            format!("text inside {SAFE_MARGIN_PX:.0}px margin"),
        )
    } else {
        Finding::new(
            LABEL_MARGIN,
            false,
            format!(
                "outside {SAFE_MARGIN_PX:.0}px margin: {}",
                metrics.margin_violations.join(", ")
            ),
        )
    };
    push(margin, PENALTY_MARGIN);

    let readability = match metrics.thumbnail_contrast {
        Some(ratio) => Finding::new(
            LABEL_READABILITY,
            ratio >= READABILITY_MIN_RATIO,
            format!(
                "contrast {ratio:.2}:1 at {THUMB_WIDTH}x{THUMB_HEIGHT} (min {READABILITY_MIN_RATIO:.1}:1)"
            ),
        ),
        None => Finding::new(LABEL_READABILITY, false, NO_TEXT),
    };
    push(readability, PENALTY_READABILITY);

    match metrics.face {
        FaceSignal::NoPhotos => {}
        FaceSignal::Skipped => push(
            Finding::new(LABEL_FACE, true, "photo could not be drawn; check skipped"),
            PENALTY_FACE,
        ),
        FaceSignal::SkinFraction(frac) => push(
            Finding::new(
                LABEL_FACE,
                frac >= FACE_MIN_SKIN_FRACTION,
                format!(
                    "skin tone {:.1}% of photo area (min {:.1}%)",
                    frac * 100.0,
                    FACE_MIN_SKIN_FRACTION * 100.0
                ),
            ),
            PENALTY_FACE,
        ),
    }

    let score = 100u32.saturating_sub(penalty) as u8;
    Analysis { score, findings }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/score.rs"]
mod tests;
