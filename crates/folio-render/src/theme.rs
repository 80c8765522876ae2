//! Light and dark palettes for the widget painters.

use crate::color::Color;

/// Theme-dependent colors shared by every painter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_alt: Color,
    /// Sky gradient stand-in for the weather scene.
    pub sky: Color,
    pub cloud: Color,
}

impl Theme {
    /// Light theme, warm white background.
    pub const fn light() -> Self {
        Self {
            background: Color::rgb8(0xF5, 0xF5, 0xF7),
            foreground: Color::rgb8(0x1D, 0x1D, 0x1F),
            muted: Color::rgb8(0x86, 0x86, 0x8B),
            accent: Color::rgb8(0x00, 0x71, 0xE3),
            accent_alt: Color::rgb8(0xFF, 0x6B, 0x35),
            sky: Color::rgb8(0xCF, 0xE8, 0xFF),
            cloud: Color::rgb8(0xFF, 0xFF, 0xFF),
        }
    }

    /// Dark theme.
    pub const fn dark() -> Self {
        Self {
            background: Color::rgb8(0x1C, 0x1C, 0x1E),
            foreground: Color::rgb8(0xF5, 0xF5, 0xF7),
            muted: Color::rgb8(0x63, 0x63, 0x66),
            accent: Color::rgb8(0x0A, 0x84, 0xFF),
            accent_alt: Color::rgb8(0xFF, 0x9F, 0x0A),
            sky: Color::rgb8(0x10, 0x1B, 0x33),
            cloud: Color::rgb8(0x98, 0x98, 0x9D),
        }
    }

    pub const fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
