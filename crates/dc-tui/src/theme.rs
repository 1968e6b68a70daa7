//! Terminal color theme
//!
//! Adaptive palette for dark and light terminal backgrounds. Auto-detects via
//! the COLORFGBG env var, with a DC_LIGHT_BG=1 override.

use ratatui::style::Color;

/// Color theme for the terminal UI.
/// UI code should use theme colors instead of hardcoded Color:: values.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (footers, key hints)
    pub text_dim: Color,
    /// Default border color
    pub border: Color,
    /// Menu and overlay border
    pub border_accent: Color,
    /// Death screen and low-timer border
    pub border_danger: Color,
    /// Section headers, slot numbers
    pub accent: Color,
    /// Positive (heals, upgrades)
    pub good: Color,
    /// Negative (damage, stat burn)
    pub bad: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_accent: Color::Cyan,
            border_danger: Color::Red,
            accent: Color::Yellow,
            good: Color::Green,
            bad: Color::Red,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            border_danger: Color::Red,
            accent: Color::Yellow,
            good: Color::Green,
            bad: Color::Red,
        }
    }

    /// Auto-detect terminal background and return the matching theme.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("DC_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg"; light backgrounds have bg index >= 7
        // (excluding 8, which is bright black).
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_text_is_white() {
        assert_eq!(Theme::dark().text, Color::White);
    }

    #[test]
    fn test_light_theme_text_is_black() {
        assert_eq!(Theme::light().text, Color::Black);
    }
}
