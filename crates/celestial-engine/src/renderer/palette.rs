use crate::renderer::color::Color;

/// Host color theme, resolved from the page's theme identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Fixed colors the backdrop reads at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub star: Color,
    pub line: Color,
}

impl Theme {
    /// `"dark"` selects the dark palette; anything else is light.
    pub fn from_id(id: &str) -> Self {
        if id.trim().eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Color::rgb8(0x05, 0x08, 0x10),
                star: Color::WHITE,
                line: Color::GOLD.with_alpha(0.3),
            },
            Theme::Light => Palette {
                background: Color::rgb8(0x0a, 0x0e, 0x1a),
                star: Color::rgb8(0xe2, 0xe8, 0xf0),
                line: Color::GOLD.with_alpha(0.2),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_theme_ids() {
        assert_eq!(Theme::from_id("dark"), Theme::Dark);
        assert_eq!(Theme::from_id("DARK"), Theme::Dark);
        assert_eq!(Theme::from_id("light"), Theme::Light);
        assert_eq!(Theme::from_id(""), Theme::Light);
    }

    #[test]
    fn palettes_differ() {
        assert_ne!(Theme::Dark.palette().background, Theme::Light.palette().background);
        assert_eq!(Theme::Dark.palette().star, Color::WHITE);
    }
}
