//! Asset preparation: photo decoding and text layout.

/// Image decoding and asset path handling.
pub mod decode;
/// Text layout (Parley glyph layout and greeked block layout).
pub mod text;
