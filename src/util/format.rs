use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};

/// How a number is laid out for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberFormat {
    pub decimals: u32,
    pub trim_zeros: bool,
    pub short: bool,
}

impl NumberFormat {
    pub const fn new(decimals: u32) -> Self {
        Self {
            decimals,
            trim_zeros: false,
            short: false,
        }
    }

    /// Drop trailing zero decimals (`1.50` -> `1.5`, `2.00` -> `2`).
    pub const fn trimmed(mut self) -> Self {
        self.trim_zeros = true;
        self
    }

    /// Scale by K/M/B and round the scaled value to `decimals`.
    pub const fn short(mut self) -> Self {
        self.short = true;
        self
    }

    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let (scaled, suffix) = if self.short {
            magnitude(value, self.decimals)
        } else {
            (value, "")
        };
        let mut out = group(&fixed(scaled, self.decimals));
        if self.trim_zeros {
            out = trim_zeros(&out);
        }
        out.push_str(suffix);
        out
    }
}

/// Rounds half away from zero and groups thousands: `1234.5, 0` -> `1,235`.
pub fn format_number(value: f64, decimals: u32) -> String {
    NumberFormat::new(decimals).format(value)
}

/// Magnitude-suffixed form: `1_500_000.0, 1` -> `1.5M`.
pub fn format_short(value: f64, decimals: u32) -> String {
    NumberFormat::new(decimals).short().format(value)
}

/// Upper-cases the first word character of each whitespace-separated word
/// and lower-cases the rest of it.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_whitespace() {
            in_word = false;
            out.push(c);
        } else if in_word {
            out.extend(c.to_lowercase());
        } else if c.is_ascii_alphanumeric() || c == '_' {
            in_word = true;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

const SUFFIXES: [(f64, &str); 4] = [(1.0, ""), (1e3, "K"), (1e6, "M"), (1e9, "B")];

/// Picks the suffix for `value`, moving up a step when rounding the scaled
/// value to `decimals` would reach 1000 (`999_950, 1` -> `1.0M`).
fn magnitude(value: f64, decimals: u32) -> (f64, &'static str) {
    let abs = value.abs();
    let mut idx = SUFFIXES.iter().rposition(|(scale, _)| abs >= *scale).unwrap_or(0);
    while idx + 1 < SUFFIXES.len() && rounds_to_thousand(value / SUFFIXES[idx].0, decimals) {
        idx += 1;
    }
    let (scale, suffix) = SUFFIXES[idx];
    (value / scale, suffix)
}

fn rounds_to_thousand(value: f64, decimals: u32) -> bool {
    Decimal::from_f64(value).is_some_and(|d| {
        d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
            .abs()
            >= Decimal::ONE_THOUSAND
    })
}

fn fixed(value: f64, decimals: u32) -> String {
    match Decimal::from_f64(value) {
        Some(d) => {
            let mut d = d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            d.rescale(decimals);
            d.to_string()
        }
        // Outside Decimal's range; fall back to float formatting.
        None => format!("{:.*}", decimals as usize, value),
    }
}

fn group(fixed: &str) -> String {
    let (sign, rest) = match fixed.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", fixed),
    };
    let (int, frac) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = format!("{sign}{grouped}");
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn trim_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
