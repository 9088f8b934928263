//! Number formatting for tick labels: scientific notation and decimal labels.
//!
//! [`scinote`] is the low-level formatter. [`TickFormatter`] wraps it for axis
//! labels and picks between decimal and scientific rendering based on the tick
//! step when left on `Auto`.

use crate::error::{PlotError, Result};

/// Tick steps whose decade is at or beyond this many powers of ten (in either
/// direction) switch `Auto` labels to scientific notation.
pub const AUTO_SCI_DECADES: i32 = 4;

/// Render `n` in scientific notation with `digits` decimal places in the mantissa.
///
/// NaN, the infinities and zero (of either sign) are handled before the general
/// branch, which writes `sign + mantissa + "e" + exponent` with the exponent
/// equal to `floor(log10(|n|))`.
///
/// ```
/// # use plothelper::data::number_format::scinote;
/// assert_eq!(scinote(12345.0, 2).unwrap(), "1.23e4");
/// assert_eq!(scinote(0.005, 2).unwrap(), "5.00e-3");
/// assert_eq!(scinote(-50.0, 0).unwrap(), "-5e1");
/// assert_eq!(scinote(f64::NEG_INFINITY, 3).unwrap(), "-inf");
/// ```
pub fn scinote(n: f64, digits: usize) -> Result<String> {
    if n.is_nan() {
        return Ok("nan".to_string());
    }
    if n == f64::INFINITY {
        return Ok("inf".to_string());
    }
    if n == f64::NEG_INFINITY {
        return Ok("-inf".to_string());
    }
    if n == 0.0 {
        return Ok("0".to_string());
    }

    let sign = if n < 0.0 { "-" } else { "" };
    let (mut mantissa, mut exp) =
        decompose(n.abs()).ok_or(PlotError::UnrepresentableValue(n))?;

    let mut text = format!("{:.*}", digits, mantissa);
    // Rounding can carry 9.99.. up to 10
    if text.starts_with("10") {
        mantissa /= 10.0;
        exp += 1;
        text = format!("{:.*}", digits, mantissa);
    }
    Ok(format!("{sign}{text}e{exp}"))
}

/// Split a positive finite magnitude into `(mantissa, exponent)` with
/// `1 <= mantissa < 10`.
fn decompose(magnitude: f64) -> Option<(f64, i32)> {
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return None;
    }
    let mut exp = magnitude.log10().floor() as i32;
    let mut mantissa = scale_by_pow10(magnitude, -exp);
    // log10 may land one decade off right at a power of ten
    if mantissa >= 10.0 {
        mantissa /= 10.0;
        exp += 1;
    } else if mantissa < 1.0 {
        mantissa *= 10.0;
        exp -= 1;
    }
    if mantissa.is_finite() && (1.0..10.0).contains(&mantissa) {
        Some((mantissa, exp))
    } else {
        None
    }
}

/// `value * 10^power` without overflowing the power of ten for subnormal inputs.
fn scale_by_pow10(value: f64, power: i32) -> f64 {
    if power <= 0 {
        value / 10f64.powi(-power)
    } else if power > 300 {
        value * 10f64.powi(300) * 10f64.powi(power - 300)
    } else {
        value * 10f64.powi(power)
    }
}

/// Number of decimal places needed to tell apart ticks spaced `step` apart.
pub fn decimals_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exp = step.log10().floor() as i32;
    (-exp).clamp(0, 12) as usize
}

fn with_unit(text: String, unit: Option<&str>) -> String {
    match unit {
        Some(u) => format!("{} {}", text, u),
        None => text,
    }
}

/// A plain decimal formatter with optional fixed decimal places.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecimalFormatter {
    /// Fixed number of decimal places, or `None` to derive them from the tick step.
    pub decimal_places: Option<usize>,
    /// Optional unit suffix appended after the number (e.g. `"V"`).
    pub unit: Option<String>,
}

impl DecimalFormatter {
    /// Format `value` with the given fallback decimal-place count.
    pub fn format(&self, value: f64, dec_pl: usize) -> String {
        let places = self.decimal_places.unwrap_or(dec_pl);
        // keep "-0.0" out of labels
        let value = if value == 0.0 { 0.0 } else { value };
        with_unit(format!("{:.*}", places, value), self.unit.as_deref())
    }
}

/// Scientific-notation formatter built on [`scinote`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScientificFormatter {
    /// Digits after the decimal point in the mantissa, or `None` for the
    /// caller-supplied fallback.
    pub mantissa_digits: Option<usize>,
    pub unit: Option<String>,
}

impl ScientificFormatter {
    pub fn format(&self, value: f64, dec_pl: usize) -> String {
        let digits = self.mantissa_digits.unwrap_or(dec_pl);
        let text = scinote(value, digits).unwrap_or_else(|_| format!("{value:e}"));
        with_unit(text, self.unit.as_deref())
    }
}

/// Selects how tick labels on one axis are rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TickFormatter {
    /// Decimal labels with just enough places for the tick step, switching to
    /// scientific notation for very large or very small steps.
    #[default]
    Auto,
    Decimal(DecimalFormatter),
    Scientific(ScientificFormatter),
}

impl TickFormatter {
    pub fn scientific(mantissa_digits: usize) -> Self {
        TickFormatter::Scientific(ScientificFormatter {
            mantissa_digits: Some(mantissa_digits),
            unit: None,
        })
    }

    /// Format a tick at `value` on an axis whose ticks are `step` apart.
    pub fn format_tick(&self, value: f64, step: f64) -> String {
        let value = snap_to_zero(value, step);
        let dec_pl = decimals_for_step(step);
        match self {
            TickFormatter::Auto => format_adaptive(value, step),
            TickFormatter::Decimal(df) => df.format(value, dec_pl),
            TickFormatter::Scientific(sf) => sf.format(value, mantissa_digits_for(value, step)),
        }
    }
}

/// Accumulated float error leaves ticks such as `-1.3e-17` where zero was meant.
fn snap_to_zero(value: f64, step: f64) -> f64 {
    if step.is_finite() && step != 0.0 && value.abs() < step.abs() * 1e-9 {
        0.0
    } else {
        value
    }
}

/// Mantissa digits needed so that neighbouring ticks stay distinguishable.
fn mantissa_digits_for(value: f64, step: f64) -> usize {
    if value == 0.0 || !value.is_finite() || !step.is_finite() || step == 0.0 {
        return 0;
    }
    let value_exp = value.abs().log10().floor() as i32;
    let step_exp = step.abs().log10().floor() as i32;
    (value_exp - step_exp).clamp(0, 6) as usize
}

fn format_adaptive(value: f64, step: f64) -> String {
    let sci = if step.is_finite() && step != 0.0 {
        let exp = step.abs().log10().floor() as i32;
        exp.abs() >= AUTO_SCI_DECADES
    } else {
        false
    };

    if sci {
        ScientificFormatter::default().format(value, mantissa_digits_for(value, step))
    } else {
        DecimalFormatter::default().format(value, decimals_for_step(step))
    }
}
