// Number formatting for metric cards and chart axes

/// Insert thousands separators into a run of ASCII digits.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn group_thousands(n: u64) -> String {
    group_digits(&n.to_string())
}

/// "₹14,250,000" for `decimals == 0`, "₹28.9" for `decimals == 1`.
pub fn rupees(amount: f64, decimals: usize) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.*}", decimals, amount.abs());
    match fixed.split_once('.') {
        Some((whole, frac)) => format!("{}₹{}.{}", sign, group_digits(whole), frac),
        None => format!("{}₹{}", sign, group_digits(&fixed)),
    }
}

/// Up to two decimals with trailing zeros dropped: 505.0 -> "505", 499.99 -> "499.99".
pub fn trimmed(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let out = fixed.trim_end_matches('0').trim_end_matches('.');
    if out == "-0" {
        "0".to_string()
    } else {
        out.to_string()
    }
}

pub fn tonnes(quantity: f64) -> String {
    format!("{} MT", trimmed(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupees() {
        assert_eq!(rupees(14_250_000.0, 0), "₹14,250,000");
        assert_eq!(rupees(249_995.0, 0), "₹249,995");
        assert_eq!(rupees(3_438.0, 0), "₹3,438");
        assert_eq!(rupees(999.0, 0), "₹999");
        assert_eq!(rupees(28.9, 1), "₹28.9");
        assert_eq!(rupees(28.7619, 1), "₹28.8");
        assert_eq!(rupees(-124_417.0, 0), "-₹124,417");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(14_615_000), "14,615,000");
    }

    #[test]
    fn test_tonnes() {
        assert_eq!(tonnes(505.0), "505 MT");
        assert_eq!(tonnes(499.99), "499.99 MT");
        assert_eq!(tonnes(105.0 + 292.27 + 102.72 + 49.5 + 74.8), "624.29 MT");
        assert_eq!(tonnes(49.5), "49.5 MT");
        assert_eq!(trimmed(-0.001), "0");
    }
}
