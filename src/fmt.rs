/// Group an integer with thousands separators: 1234567 -> "1,234,567"
pub fn number(val: i64) -> String {
    let digits = val.unsigned_abs().to_string();
    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();
    if val < 0 {
        format!("-{with_commas}")
    } else {
        with_commas
    }
}

/// Format an amount with its currency label: 114,251 Kč
pub fn money(val: i64, currency: &str) -> String {
    if currency.is_empty() {
        number(val)
    } else {
        format!("{} {currency}", number(val))
    }
}

/// Compact axis label: "150k Kč", "1.5M Kč", "800 Kč".
pub fn format_k(val: f64, currency: &str) -> String {
    let body = if val >= 1_000_000.0 {
        let m = val / 1_000_000.0;
        if m == m.floor() {
            format!("{}M", m as u64)
        } else {
            format!("{:.1}M", m)
        }
    } else if val >= 1000.0 {
        let k = val / 1000.0;
        if k == k.floor() {
            format!("{}k", k as u64)
        } else {
            format!("{:.1}k", k)
        }
    } else {
        format!("{}", val.max(0.0) as u64)
    };
    if currency.is_empty() {
        body
    } else {
        format!("{body} {currency}")
    }
}

pub fn percent(val: f64) -> String {
    format!("{val:.1}%")
}
