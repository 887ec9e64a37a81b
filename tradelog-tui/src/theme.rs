//! Parrot/neon theme tokens for the journal TUI
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights)
//! - **Positive**: Neon green (gains, LONG)
//! - **Negative**: Hot pink (losses, SHORT, errors)
//! - **Warning**: Neon orange (rejected input)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (labels, hints)

use ratatui::style::{Color, Modifier, Style};
use rust_decimal::Decimal;

use tradelog_core::Direction;

/// Parrot/neon theme
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Green for gains, pink for losses, plain for breakeven.
    pub fn pnl_color(&self, pnl: Decimal) -> Color {
        if pnl > Decimal::ZERO {
            self.positive
        } else if pnl < Decimal::ZERO {
            self.negative
        } else {
            self.text_secondary
        }
    }

    pub fn direction_color(&self, direction: Direction) -> Color {
        match direction {
            Direction::Long => self.positive,
            Direction::Short => self.negative,
        }
    }

    /// Win rate as a percentage (0–100).
    pub fn win_rate_color(&self, win_rate: Decimal) -> Color {
        match win_rate {
            w if w >= Decimal::from(70) => self.positive,
            w if w >= Decimal::from(50) => self.accent,
            w if w >= Decimal::from(40) => self.neutral,
            _ => self.warning,
        }
    }
}

const THEME: Theme = Theme::parrot_neon();

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn positive() -> Style {
    Style::default().fg(THEME.positive)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

/// Highlight for the focused form field.
pub fn focused() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

pub fn pnl(value: Decimal) -> Style {
    Style::default().fg(THEME.pnl_color(value))
}

pub fn direction(value: Direction) -> Style {
    Style::default().fg(THEME.direction_color(value))
}

pub fn win_rate(value: Decimal) -> Style {
    Style::default().fg(THEME.win_rate_color(value))
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
