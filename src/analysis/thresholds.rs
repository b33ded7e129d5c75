//! Tunable constants of the heuristics. Geometry values are in 1280x720 design pixels.

/// Width of the sampling ring outside a text frame used to estimate its backdrop.
pub const CONTRAST_RING_PX: f64 = 8.0;
/// Quantile of `|L - Lb|` inside the text frame taken as the foreground luminance.
pub const CONTRAST_FOREGROUND_PERCENTILE: f64 = 0.90;
/// Minimum WCAG contrast ratio for text at full size.
pub const CONTRAST_MIN_RATIO: f64 = 4.5;

/// Font size from which a text block counts as a headline.
pub const HEADLINE_MIN_FONT_PX: f64 = 100.0;
/// Maximum words in the longest headline.
pub const HEADLINE_MAX_WORDS: usize = 6;

/// Objects covering no more than this share of the canvas do not count as clutter.
pub const CLUTTER_MIN_AREA_FRACTION: f64 = 0.02;
/// Maximum number of significant objects for a single focal point.
pub const CLUTTER_MAX_OBJECTS: usize = 5;

/// Largest redmean distance at which a pixel still matches the brand color.
pub const BRAND_MAX_DISTANCE: f64 = 48.0;
/// Minimum share of pixels in the brand color (inclusive).
pub const BRAND_MIN_COVERAGE: f64 = 0.02;

/// Inset every text frame must stay within (inclusive).
pub const SAFE_MARGIN_PX: f64 = 24.0;

/// Width of the simulated thumbnail used for the readability check.
pub const THUMB_WIDTH: u32 = 120;
/// Height of the simulated thumbnail used for the readability check.
pub const THUMB_HEIGHT: u32 = 68;
/// Minimum contrast ratio once downsampled.
pub const READABILITY_MIN_RATIO: f64 = 3.0;

/// Minimum share of photo area classified as skin tone.
pub const FACE_MIN_SKIN_FRACTION: f64 = 0.08;

/// Penalty when there is no headline text to measure.
pub const PENALTY_NO_TEXT: u8 = 40;
/// Penalty for low text contrast.
pub const PENALTY_LOW_CONTRAST: u8 = 25;
/// Penalty for a long headline.
pub const PENALTY_LONG_HEADLINE: u8 = 15;
/// Penalty for too many competing objects.
pub const PENALTY_CLUTTER: u8 = 5;
/// Penalty for too little brand color.
pub const PENALTY_BRAND: u8 = 10;
/// Penalty for text outside the safe margin.
pub const PENALTY_MARGIN: u8 = 10;
/// Penalty for text unreadable at thumbnail size.
pub const PENALTY_READABILITY: u8 = 10;
/// Penalty for photos without a visible subject.
pub const PENALTY_FACE: u8 = 8;

/// Highest score an empty (background-only) scene can reach.
pub const EMPTY_SCENE_SCORE_CEILING: u8 = 40;
