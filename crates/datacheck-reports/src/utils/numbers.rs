const UNITS: [(usize, &str); 3] = [
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

/// Compact row counts: `4536` -> `4.5K`, `2336123` -> `2.3M`.
pub fn format_numbers(n: usize) -> String {
    UNITS
        .iter()
        .find(|(scale, _)| n >= *scale)
        .map(|(scale, unit)| format!("{:0.1}{}", n as f64 / *scale as f64, unit))
        .unwrap_or_else(|| n.to_string())
}
