//! Image resolution tiers chosen from the viewport width.

use std::fmt;

/// Discrete image resolution tier.
///
/// Chosen once at startup; the carousel never re-evaluates it on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeClass {
    /// Up to 480px wide
    Small,
    /// Up to 1024px wide
    Medium,
    /// Up to 1600px wide
    Large,
    /// Anything wider
    ExtraLarge,
}

impl SizeClass {
    /// Pick the tier for a viewport width. Breakpoints are inclusive.
    pub fn from_viewport_width(width: u32) -> Self {
        match width {
            0..=480 => SizeClass::Small,
            481..=1024 => SizeClass::Medium,
            1025..=1600 => SizeClass::Large,
            _ => SizeClass::ExtraLarge,
        }
    }

    /// Width in pixels of the images served for this tier.
    pub fn pixel_width(&self) -> u32 {
        match self {
            SizeClass::Small => 480,
            SizeClass::Medium => 1024,
            SizeClass::Large => 1600,
            SizeClass::ExtraLarge => 1920,
        }
    }

    /// Get the display name for this tier.
    pub fn name(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
            SizeClass::ExtraLarge => "extra-large",
        }
    }

    /// All tiers from smallest to largest.
    pub fn all() -> &'static [SizeClass] {
        &[
            SizeClass::Small,
            SizeClass::Medium,
            SizeClass::Large,
            SizeClass::ExtraLarge,
        ]
    }
}

/// Renders as the pixel width, which is what image file names use.
impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixel_width())
    }
}
