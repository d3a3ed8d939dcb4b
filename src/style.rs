//! Color palette for the status line.
//!
//! Formatting code picks a [`Tone`]; only [`Palette::paint`] knows how a tone maps to
//! escape sequences. With the `colors` feature disabled, or `NO_COLOR` set, every tone
//! renders as plain text.

use std::env;

#[cfg(feature = "colors")]
use owo_colors::{OwoColorize, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Bold red, reserved for a nearly full context window
    Critical,
    Red,
    LightRed,
    Yellow,
    LightYellow,
    Green,
    Cyan,
    Blue,
    /// Dividers and low-key metrics
    Gray,
}

impl Tone {
    #[cfg(feature = "colors")]
    fn style(self) -> Style {
        match self {
            Tone::Critical => Style::new().red().bold(),
            Tone::Red => Style::new().red(),
            Tone::LightRed => Style::new().bright_red(),
            Tone::Yellow => Style::new().yellow(),
            Tone::LightYellow => Style::new().bright_yellow(),
            Tone::Green => Style::new().green(),
            Tone::Cyan => Style::new().bright_cyan(),
            Tone::Blue => Style::new().bright_blue(),
            Tone::Gray => Style::new().bright_black(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Palette that never emits escape sequences
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Colors stay on unless `--no-color` was passed or `NO_COLOR` is set
    pub fn from_env(no_color_flag: bool) -> Self {
        Self::new(!no_color_flag && env::var_os("NO_COLOR").is_none())
    }

    pub fn enabled(&self) -> bool {
        self.enabled && cfg!(feature = "colors")
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        #[cfg(feature = "colors")]
        {
            if self.enabled {
                return text.style(tone.style()).to_string();
            }
        }
        #[cfg(not(feature = "colors"))]
        let _ = tone;
        text.to_string()
    }

    /// The dim `│` separator placed between segments
    pub fn divider(&self) -> String {
        self.paint(Tone::Gray, "│")
    }
}
