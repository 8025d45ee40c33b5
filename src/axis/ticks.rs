//! Axis ticks and their labels

/// Upper bound on major ticks generated for one axis
pub(crate) const MAX_MAJOR_TICKS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Major,
    Minor,
}

/// One tick mark: data value, its pixel and a formatted label
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub pixel: f64,
    pub kind: TickKind,
    pub label: String,
}

impl Tick {
    pub fn is_major(&self) -> bool {
        self.kind == TickKind::Major
    }
}

const PREFIXES: [(i32, &str); 10] = [
    (-15, "f"),
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
];

/// Format `value` in engineering notation with `digits` significant digits,
/// e.g. `1500.0` as `"1.5k"` and `0.002` as `"2m"`.
pub fn format_engineering(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let exponent = value.abs().log10().floor() as i32;
    let eng = (exponent.div_euclid(3) * 3).clamp(-15, 12);
    let scaled = value / 10f64.powi(eng);
    let int_digits = (scaled.abs().log10().floor() as i32 + 1).max(1) as usize;
    let decimals = digits.saturating_sub(int_digits);

    let mut text = format!("{:.*}", decimals, scaled);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }

    let prefix = PREFIXES
        .iter()
        .find(|(e, _)| *e == eng)
        .map(|(_, p)| *p)
        .unwrap_or("");
    format!("{}{}", text, prefix)
}

/// Label for a logarithmic decade tick, e.g. `"1E3"`
pub fn format_decade(value: f64) -> String {
    if value <= 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let mantissa_exp = value.log10();
    let exp = mantissa_exp.round();
    if (mantissa_exp - exp).abs() < 1e-9 {
        format!("1E{}", exp as i32)
    } else {
        let exp = mantissa_exp.floor();
        format!("{:.1}E{}", value / 10f64.powf(exp), exp as i32)
    }
}
