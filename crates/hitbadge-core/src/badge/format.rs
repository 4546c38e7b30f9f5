//! Compact number notation, `en` locale, short form.
//!
//! Values below 1000 print as-is. Larger values are scaled to the biggest
//! suffix that fits and rounded half-up: a one-digit mantissa keeps two
//! significant digits (`1.5K`), a wider mantissa is rounded to an integer
//! (`12K`, `150M`). Past `T` the mantissa keeps growing (`1000T`,
//! `10,000T`), grouped only from five integer digits upward.

const SUFFIXES: [&str; 4] = ["K", "M", "B", "T"];

/// Format `n` in compact notation (`999 -> "999"`, `1000 -> "1K"`,
/// `1500000 -> "1.5M"`).
pub fn format_compact(n: u64) -> String {
    if n < 1_000 {
        return n.to_string();
    }

    let n = u128::from(n);
    let exp = exponent(n);
    let sig = significant_digits(exp);
    let unit = 10u128.pow(exp + 1 - sig);
    let rounded = (n + unit / 2) / unit * unit;

    // Rounding may carry into the next power of ten (9999 -> 10000).
    let exp = exponent(rounded);
    let group = suffix_index(exp);
    let divisor = 10u128.pow(3 * (group + 1));
    let int = rounded / divisor;
    let tenth = rounded % divisor / (divisor / 10);

    let mut out = group_digits(int);
    if tenth != 0 {
        out.push('.');
        out.push_str(&tenth.to_string());
    }
    out.push_str(SUFFIXES[group as usize]);
    out
}

/// Index of the highest power of ten not above `n` (`n > 0`).
fn exponent(n: u128) -> u32 {
    n.ilog10()
}

/// Suffix slot for a value whose leading digit sits at `10^exp` (`exp >= 3`).
fn suffix_index(exp: u32) -> u32 {
    (exp / 3 - 1).min(SUFFIXES.len() as u32 - 1)
}

fn significant_digits(exp: u32) -> u32 {
    let mantissa_digits = exp - 3 * (suffix_index(exp) + 1) + 1;
    if mantissa_digits == 1 {
        2
    } else {
        mantissa_digits
    }
}

fn group_digits(int: u128) -> String {
    let raw = int.to_string();
    if raw.len() < 5 {
        return raw;
    }
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
