//! Display settings and theme colour tables

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// RGB colour with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.478, 1.0);
    pub const CYAN: Rgb = Rgb::new(0.196, 0.678, 0.902);
    pub const GREEN: Rgb = Rgb::new(0.204, 0.780, 0.349);
    pub const MINT: Rgb = Rgb::new(0.0, 0.780, 0.745);
    pub const ORANGE: Rgb = Rgb::new(1.0, 0.584, 0.0);
    pub const YELLOW: Rgb = Rgb::new(1.0, 0.8, 0.0);
    pub const PURPLE: Rgb = Rgb::new(0.686, 0.322, 0.871);
    pub const PINK: Rgb = Rgb::new(1.0, 0.176, 0.333);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Shift every channel by `amount`, clamped to `[0, 1]`
    pub fn brightened(self, amount: f32) -> Self {
        Self {
            r: (self.r + amount).clamp(0.0, 1.0),
            g: (self.g + amount).clamp(0.0, 1.0),
            b: (self.b + amount).clamp(0.0, 1.0),
        }
    }

    /// 8-bit channels
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// 24-bit ANSI foreground escape sequence
    pub fn ansi_fg(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("\x1b[38;2;{};{};{}m", r, g, b)
    }
}

/// Background, text and accent colours of a theme
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            text: Rgb::WHITE,
            accent: Rgb::BLUE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Default,
    Light,
    DarkBlue,
    Forest,
    Sunset,
    PurpleDream,
    /// Keeps whatever palette is currently set
    Custom,
}

impl Theme {
    /// Fixed palette of the theme; `None` for `Custom`
    pub fn palette(&self) -> Option<Palette> {
        let (background, text, accent) = match self {
            Theme::Default => (Rgb::BLACK, Rgb::WHITE, Rgb::BLUE),
            Theme::Light => (Rgb::WHITE, Rgb::BLACK, Rgb::BLUE),
            Theme::DarkBlue => (Rgb::new(0.05, 0.1, 0.2), Rgb::WHITE, Rgb::CYAN),
            Theme::Forest => (Rgb::new(0.1, 0.2, 0.1), Rgb::GREEN, Rgb::MINT),
            Theme::Sunset => (Rgb::new(0.2, 0.1, 0.05), Rgb::ORANGE, Rgb::YELLOW),
            Theme::PurpleDream => (Rgb::new(0.15, 0.05, 0.2), Rgb::PURPLE, Rgb::PINK),
            Theme::Custom => return None,
        };
        Some(Palette {
            background,
            text,
            accent,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Default,
    Rounded,
    Monospaced,
    Serif,
}

/// Appearance and clock-format settings of a screen session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub time_format_24h: bool,
    pub show_seconds: bool,
    pub show_date: bool,
    /// 0.5 is neutral; colours shift by `brightness - 0.5`
    pub brightness: f32,
    pub theme: Theme,
    pub palette: Palette,
    pub font_family: FontFamily,
    /// Multiplier for the base font size
    pub font_scale: f32,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            time_format_24h: false,
            show_seconds: false,
            show_date: false,
            brightness: 0.8,
            theme: Theme::Default,
            palette: Palette::default(),
            font_family: FontFamily::Default,
            font_scale: 1.0,
        }
    }

    /// Switch theme, refreshing the palette unless the theme is `Custom`
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Some(palette) = theme.palette() {
            self.palette = palette;
        }
        tracing::info!("Theme set to {:?}", theme);
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness.clamp(0.0, 1.0);
    }

    /// Text colour with the brightness adjustment applied
    pub fn display_text_color(&self) -> Rgb {
        self.palette.text.brightened(self.brightness - 0.5)
    }

    pub fn display_background_color(&self) -> Rgb {
        self.palette.background.brightened(self.brightness - 0.5)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_refresh_palette() {
        let mut settings = Settings::new();
        settings.set_theme(Theme::Sunset);
        assert_eq!(settings.palette.text, Rgb::ORANGE);
        assert_eq!(settings.palette.background, Rgb::new(0.2, 0.1, 0.05));

        settings.set_theme(Theme::Light);
        assert_eq!(settings.palette.background, Rgb::WHITE);
    }

    #[test]
    fn custom_theme_keeps_current_palette() {
        let mut settings = Settings::new();
        settings.set_theme(Theme::Forest);
        settings.set_theme(Theme::Custom);
        assert_eq!(settings.palette.text, Rgb::GREEN);
        assert_eq!(settings.theme, Theme::Custom);
        assert_eq!(settings.palette, Theme::Forest.palette().unwrap());
    }

    #[test]
    fn brightness_shifts_and_clamps() {
        let mut settings = Settings::new();
        settings.set_brightness(1.5);
        assert_eq!(settings.brightness, 1.0);
        assert_eq!(settings.display_text_color(), Rgb::WHITE);

        settings.set_brightness(0.0);
        assert_eq!(settings.display_text_color(), Rgb::new(0.5, 0.5, 0.5));
        assert_eq!(settings.display_background_color(), Rgb::BLACK);
    }

    #[test]
    fn theme_names_parse_like_the_cli() {
        assert_eq!(Theme::from_str("purple-dream", true), Ok(Theme::PurpleDream));
        assert_eq!(Theme::from_str("Dark-Blue", true), Ok(Theme::DarkBlue));
        assert!(Theme::from_str("neon", true).is_err());
    }

    #[test]
    fn ansi_escape_uses_8bit_channels() {
        assert_eq!(Rgb::WHITE.ansi_fg(), "\x1b[38;2;255;255;255m");
        assert_eq!(Rgb::new(0.5, 0.0, 1.0).to_bytes(), [128, 0, 255]);
    }
}
