//! Computed-colour parsing and the brightness-difference contrast heuristic.

use std::sync::OnceLock;

use regex::Regex;

/// Brightness difference below which colorblind checks flag text.
pub const COLORBLIND_MIN_DIFFERENCE: f64 = 50.0;
/// Brightness difference below which low vision checks flag text.
pub const LOW_VISION_MIN_DIFFERENCE: f64 = 80.0;

fn integer_runs() -> &'static Regex {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    RUNS.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u32,
    pub g: u32,
    pub b: u32,
}

impl Rgb {
    /// Reads the first three integer runs of a computed `rgb()`/`rgba()` value.
    pub fn parse(value: &str) -> Option<Self> {
        let mut channels = integer_runs()
            .find_iter(value)
            .map(|run| run.as_str().parse::<u32>().unwrap_or(u32::MAX));
        let r = channels.next()?;
        let g = channels.next()?;
        let b = channels.next()?;
        Some(Self { r, g, b })
    }

    /// YIQ weighted brightness.
    pub fn brightness(self) -> f64 {
        (299.0 * f64::from(self.r) + 587.0 * f64::from(self.g) + 114.0 * f64::from(self.b))
            / 1000.0
    }
}

/// Backgrounds that let the parent show through carry no contrast information.
pub fn is_transparent(background: &str) -> bool {
    let value = background.trim();
    value.is_empty() || value == "rgba(0, 0, 0, 0)" || value.eq_ignore_ascii_case("transparent")
}

/// Absolute brightness difference between text and an opaque background.
///
/// `None` when the background is transparent or either colour cannot be parsed.
pub fn brightness_difference(color: &str, background: &str) -> Option<f64> {
    if is_transparent(background) {
        return None;
    }
    let text = Rgb::parse(color)?;
    let back = Rgb::parse(background)?;
    Some((text.brightness() - back.brightness()).abs())
}

/// True when the pair is measurable and its difference falls below `minimum`.
pub fn is_low_contrast(color: Option<&str>, background: Option<&str>, minimum: f64) -> bool {
    match (color, background) {
        (Some(color), Some(background)) => brightness_difference(color, background)
            .map(|difference| difference < minimum)
            .unwrap_or(false),
        _ => false,
    }
}
