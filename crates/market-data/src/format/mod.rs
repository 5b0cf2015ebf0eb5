//! Price display formatting.
//!
//! Sub-cent assets rendered at 2 decimal places all collapse to "$0.00",
//! which tells the user nothing, so anything strictly between zero and one
//! cent gets 8 fractional digits instead.

use rust_decimal::Decimal;

/// Format a USD amount for display.
///
/// `0 < amount < 0.01` renders with 8 fractional digits, everything else
/// with 2. Both forms carry thousands separators and a leading `$`.
/// Exactly `0.01` uses the 2-decimal form.
///
/// Callers must pass a non-negative amount; prices are never negative.
pub fn format_usd(amount: Decimal) -> String {
    debug_assert!(
        !amount.is_sign_negative(),
        "price amounts are non-negative"
    );

    let one_cent = Decimal::new(1, 2);
    let dp: u32 = if amount > Decimal::ZERO && amount < one_cent {
        8
    } else {
        2
    };

    let mut fixed = amount.round_dp(dp);
    fixed.rescale(dp);

    let text = fixed.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("${}.{}", group_thousands(int_part), frac_part)
}

/// Insert a comma before every group of three digits, counted from the
/// right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
