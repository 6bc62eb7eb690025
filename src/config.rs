//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    gesture::{ControlKind, DragControl, RangeMapper, RulerMapper},
    state::{settings::FontFamily, Settings, Theme},
};

/// Countdown length a new session starts with, and a long-press resets to
pub const DEFAULT_MINUTES: u64 = 10;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "focus-clock")]
#[command(about = "A full-screen clock with a gesture-driven countdown timer")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Initial countdown duration in minutes (also the long-press reset value)
    #[arg(short, long, default_value_t = DEFAULT_MINUTES)]
    pub minutes: u64,

    /// Upper bound of the slider in minutes
    #[arg(long, default_value = "120")]
    pub max_minutes: u32,

    /// Slider pixels per minute
    #[arg(long, default_value = "20")]
    pub step_width: f64,

    /// Drag surface that sets the countdown
    #[arg(short, long, value_enum, default_value_t = ControlKind::Slider)]
    pub control: ControlKind,

    /// Viewport height used to lay out the ruler
    #[arg(long, default_value = "800")]
    pub viewport_height: f64,

    /// Colour theme
    #[arg(long, value_enum, default_value_t = Theme::Default)]
    pub theme: Theme,

    /// Font family
    #[arg(long, value_enum, default_value_t = FontFamily::Default)]
    pub font: FontFamily,

    /// Font size multiplier
    #[arg(long, default_value = "1.0")]
    pub font_scale: f32,

    /// Display brightness between 0 and 1
    #[arg(long, default_value = "0.8")]
    pub brightness: f32,

    /// Show the clock in 24-hour format
    #[arg(long = "24h")]
    pub format_24h: bool,

    /// Show seconds on the clock
    #[arg(long)]
    pub seconds: bool,

    /// Show the date under the clock
    #[arg(long)]
    pub date: bool,

    /// Print responses as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not ring the terminal bell when a countdown completes
    #[arg(long)]
    pub no_bell: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn default_seconds(&self) -> u64 {
        self.minutes.saturating_mul(60)
    }

    /// Build the configured drag surface, positioned at the initial duration
    pub fn drag_control(&self) -> DragControl {
        match self.control {
            ControlKind::Slider => {
                let hi = i32::try_from(self.max_minutes).unwrap_or(i32::MAX);
                let initial = i32::try_from(self.minutes).unwrap_or(i32::MAX);
                DragControl::Slider(RangeMapper::new(0..=hi, self.step_width, initial))
            }
            ControlKind::Ruler => {
                DragControl::Ruler(RulerMapper::new(self.viewport_height, self.minutes as f64))
            }
        }
    }

    /// Build display settings from the flags
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::new();
        settings.set_theme(self.theme);
        settings.set_brightness(self.brightness);
        settings.font_family = self.font;
        settings.font_scale = self.font_scale;
        settings.time_format_24h = self.format_24h;
        settings.show_seconds = self.seconds;
        settings.show_date = self.date;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_session() {
        let config = Config::try_parse_from(["focus-clock"]).unwrap();
        assert_eq!(config.minutes, 10);
        assert_eq!(config.default_seconds(), 600);
        assert_eq!(config.control, ControlKind::Slider);
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.drag_control().minutes(), 10.0);
        assert_eq!(config.settings().brightness, 0.8);
    }

    #[test]
    fn flags_reach_settings_and_control() {
        let config = Config::try_parse_from([
            "focus-clock",
            "--control",
            "ruler",
            "--theme",
            "forest",
            "--24h",
            "--date",
            "-m",
            "25",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.drag_control().kind(), ControlKind::Ruler);
        assert_eq!(config.drag_control().minutes(), 25.0);
        let settings = config.settings();
        assert_eq!(settings.theme, Theme::Forest);
        assert!(settings.time_format_24h);
        assert!(settings.show_date);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn huge_minutes_saturate() {
        let config = Config::try_parse_from(["focus-clock", "-m", "18446744073709551615"]).unwrap();
        assert_eq!(config.default_seconds(), u64::MAX);
    }
}
