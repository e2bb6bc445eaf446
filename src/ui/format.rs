//! Display formatting helpers

/// Formats an amount in the smallest currency unit with dots as thousands
/// separators, e.g. `45000` becomes `"45.000"`.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
