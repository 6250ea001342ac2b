//! Severity-to-color mapping and the [`StyleFn`] wrapper used to compose
//! terminal styling functions (the "template/color layer" of `SPEC_FULL.md` §2).

use std::fmt;
use std::sync::Arc;

use crate::diagnostic::Severity;

/// ANSI SGR codes for the fixed severity/role palette.
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[37m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// A composable terminal-styling function: wraps its input in SGR codes.
///
/// Multiple `StyleFn`s compose by left-fold (see [`StyleFn::compose`]).
#[derive(Clone)]
pub struct StyleFn(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl StyleFn {
    #[must_use]
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        StyleFn(Arc::new(f))
    }

    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        (self.0)(text)
    }

    /// Left-fold a sequence of style functions over `text`.
    #[must_use]
    pub fn compose(fns: &[StyleFn], text: &str) -> String {
        fns.iter().fold(text.to_string(), |acc, f| f.apply(&acc))
    }

    #[must_use]
    pub fn identity() -> Self {
        StyleFn::new(|s: &str| s.to_string())
    }

    fn wrapping(code: &'static str) -> Self {
        StyleFn::new(move |s: &str| format!("{code}{s}{}", ansi::RESET))
    }

    #[must_use]
    pub fn bold() -> Self {
        StyleFn::wrapping(ansi::BOLD)
    }

    #[must_use]
    pub fn red() -> Self {
        StyleFn::wrapping(ansi::RED)
    }

    #[must_use]
    pub fn magenta() -> Self {
        StyleFn::wrapping(ansi::MAGENTA)
    }

    #[must_use]
    pub fn yellow() -> Self {
        StyleFn::wrapping(ansi::YELLOW)
    }

    #[must_use]
    pub fn green() -> Self {
        StyleFn::wrapping(ansi::GREEN)
    }

    #[must_use]
    pub fn cyan() -> Self {
        StyleFn::wrapping(ansi::CYAN)
    }

    #[must_use]
    pub fn white() -> Self {
        StyleFn::wrapping(ansi::WHITE)
    }
}

impl fmt::Debug for StyleFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StyleFn(..)")
    }
}

/// Severity's primary underline / header-tint color, per `SPEC_FULL.md` §6.
#[must_use]
pub fn severity_color(severity: Severity) -> StyleFn {
    match severity {
        Severity::Error => StyleFn::red(),
        Severity::Bug => StyleFn::magenta(),
        Severity::Warning => StyleFn::yellow(),
        Severity::Note => StyleFn::green(),
        Severity::Help => StyleFn::cyan(),
    }
}

/// Default color for secondary labels.
#[must_use]
pub fn secondary_color() -> StyleFn {
    StyleFn::cyan()
}

/// Color used for unstyled code body text (priority-0 base modification).
#[must_use]
pub fn code_color() -> StyleFn {
    StyleFn::identity()
}

/// Color used for line numbers and gutter furniture.
#[must_use]
pub fn line_number_color() -> StyleFn {
    StyleFn::cyan()
}
