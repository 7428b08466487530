//! Field-by-field comparison of two starships.
//!
//! Values are surfaced verbatim. Only fields whose values both coerce to a
//! number get a winner; everything else is marked non-comparable.

use serde_json::Value;
use swapi_client::Starship;

/// The compared fields, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonField {
    Name,
    Model,
    CostInCredits,
    MaxAtmospheringSpeed,
    CargoCapacity,
    Passengers,
}

impl ComparisonField {
    pub const ALL: [ComparisonField; 6] = [
        ComparisonField::Name,
        ComparisonField::Model,
        ComparisonField::CostInCredits,
        ComparisonField::MaxAtmospheringSpeed,
        ComparisonField::CargoCapacity,
        ComparisonField::Passengers,
    ];

    /// Key of the field in the SWAPI starship record.
    pub fn key(self) -> &'static str {
        match self {
            ComparisonField::Name => "name",
            ComparisonField::Model => "model",
            ComparisonField::CostInCredits => "cost_in_credits",
            ComparisonField::MaxAtmospheringSpeed => "max_atmosphering_speed",
            ComparisonField::CargoCapacity => "cargo_capacity",
            ComparisonField::Passengers => "passengers",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComparisonField::Name => "Name",
            ComparisonField::Model => "Model",
            ComparisonField::CostInCredits => "Cost (credits)",
            ComparisonField::MaxAtmospheringSpeed => "Max atmosphering speed",
            ComparisonField::CargoCapacity => "Cargo capacity",
            ComparisonField::Passengers => "Passengers",
        }
    }
}

/// One row of a comparison.
///
/// `left_wins`/`right_wins` are `None` when the row is not numerically
/// comparable, otherwise at most one of them is `Some(true)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub field: ComparisonField,
    pub left_value: Option<Value>,
    pub right_value: Option<Value>,
    pub left_wins: Option<bool>,
    pub right_wins: Option<bool>,
}

impl ComparisonResult {
    pub fn is_comparable(&self) -> bool {
        self.left_wins.is_some()
    }
}

/// Compare two starships over [`ComparisonField::ALL`], preserving its order.
pub fn compare_ships(left: &Starship, right: &Starship) -> Vec<ComparisonResult> {
    ComparisonField::ALL
        .iter()
        .map(|&field| compare_values(field, left.field(field.key()), right.field(field.key())))
        .collect()
}

/// Compare a single pair of raw values.
pub fn compare_values(
    field: ComparisonField,
    left: Option<&Value>,
    right: Option<&Value>,
) -> ComparisonResult {
    let numeric = left
        .and_then(try_parse_numeric)
        .zip(right.and_then(try_parse_numeric));

    let (left_wins, right_wins) = match numeric {
        None => (None, None),
        Some((l, r)) if l == r => (Some(false), Some(false)),
        Some((l, r)) => (Some(l > r), Some(r > l)),
    };

    ComparisonResult {
        field,
        left_value: left.cloned(),
        right_value: right.cloned(),
        left_wins,
        right_wins,
    }
}

/// Coerce a loosely typed value to a number.
///
/// Strings are trimmed; an empty string is zero. Decimal and exponent forms,
/// `0x`/`0o`/`0b` integers and `Infinity` are accepted. Placeholders such as
/// `unknown`, `n/a` or `1,000` are not numbers. `null` is zero and booleans
/// are 0/1. Arrays and objects are never numeric.
pub fn try_parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_radix_digits(digits, radix);
        }
    }

    // f64::from_str also takes "inf"/"nan" spellings, which are not numbers here.
    let decimal = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Unsigned digits after a radix prefix. Signs are rejected and wide
/// literals saturate into `f64` instead of overflowing.
fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(left: Value, right: Value) -> ComparisonResult {
        compare_values(ComparisonField::CostInCredits, Some(&left), Some(&right))
    }

    #[test]
    fn test_equal_numeric_values_have_no_winner() {
        let result = row(json!("25000"), json!("25000"));
        assert_eq!(result.left_wins, Some(false));
        assert_eq!(result.right_wins, Some(false));
        assert_eq!(result.left_value, Some(json!("25000")));
        assert_eq!(result.right_value, Some(json!("25000")));
    }

    #[test]
    fn test_greater_value_wins() {
        let result = row(json!("25000"), json!("50000"));
        assert_eq!(result.left_wins, Some(false));
        assert_eq!(result.right_wins, Some(true));

        let result = row(json!("1200"), json!("950"));
        assert_eq!(result.left_wins, Some(true));
        assert_eq!(result.right_wins, Some(false));
    }

    #[test]
    fn test_placeholder_is_not_comparable() {
        let result = row(json!("unknown"), json!("120"));
        assert_eq!(result.left_wins, None);
        assert_eq!(result.right_wins, None);
        assert_eq!(result.left_value, Some(json!("unknown")));
        assert_eq!(result.right_value, Some(json!("120")));

        // Either side being a placeholder is enough.
        let result = row(json!("120"), json!("n/a"));
        assert!(!result.is_comparable());
        assert_eq!(result.right_wins, None);
    }

    #[test]
    fn test_numeric_comparison_is_not_textual() {
        // "9" > "10" as text, not as numbers.
        let result = row(json!("9"), json!("10"));
        assert_eq!(result.right_wins, Some(true));

        // Same number, different spelling.
        let result = row(json!("1e3"), json!(1000));
        assert_eq!(result.left_wins, Some(false));
        assert_eq!(result.right_wins, Some(false));
    }

    #[test]
    fn test_missing_field_is_not_comparable() {
        let result = compare_values(ComparisonField::Passengers, None, Some(&json!("4")));
        assert_eq!(result.left_value, None);
        assert_eq!(result.left_wins, None);
    }

    #[test]
    fn test_try_parse_numeric() {
        assert_eq!(try_parse_numeric(&json!("3500000")), Some(3_500_000.0));
        assert_eq!(try_parse_numeric(&json!(" 42 ")), Some(42.0));
        assert_eq!(try_parse_numeric(&json!("0.5")), Some(0.5));
        assert_eq!(try_parse_numeric(&json!("")), Some(0.0));
        assert_eq!(try_parse_numeric(&json!("0x1F")), Some(31.0));
        assert_eq!(try_parse_numeric(&json!("Infinity")), Some(f64::INFINITY));
        assert_eq!(try_parse_numeric(&json!(12)), Some(12.0));
        assert_eq!(try_parse_numeric(&json!(null)), Some(0.0));
        assert_eq!(try_parse_numeric(&json!(true)), Some(1.0));

        assert_eq!(try_parse_numeric(&json!("unknown")), None);
        assert_eq!(try_parse_numeric(&json!("n/a")), None);
        assert_eq!(try_parse_numeric(&json!("1,000")), None);
        assert_eq!(try_parse_numeric(&json!("inf")), None);
        assert_eq!(try_parse_numeric(&json!("NaN")), None);
        assert_eq!(try_parse_numeric(&json!("0xZZ")), None);
        assert_eq!(try_parse_numeric(&json!("0x")), None);
        assert_eq!(try_parse_numeric(&json!("[1]")), None);
        assert_eq!(try_parse_numeric(&json!([1])), None);
    }

    #[test]
    fn test_radix_literals() {
        assert_eq!(try_parse_numeric(&json!("0b101")), Some(5.0));
        assert_eq!(try_parse_numeric(&json!("0O17")), Some(15.0));
        assert_eq!(try_parse_numeric(&json!("0x+1")), None);
        assert_eq!(try_parse_numeric(&json!("0x-1")), None);
        assert_eq!(try_parse_numeric(&json!("-0x1")), None);
        assert_eq!(try_parse_numeric(&json!("0b102")), None);

        // Wider than u64: still a finite number.
        let wide = try_parse_numeric(&json!("0x1FFFFFFFFFFFFFFFF")).unwrap();
        assert!(wide.is_finite());
        assert_eq!(wide, 2f64.powi(65) - 1.0);
    }

    #[test]
    fn test_compare_ships_preserves_field_order() {
        let left = Starship::from_value(json!({
            "name": "X-wing",
            "model": "T-65 X-wing",
            "cost_in_credits": "149999",
            "max_atmosphering_speed": "1050",
            "cargo_capacity": "110",
            "passengers": "0",
        }))
        .unwrap();
        let right = Starship::from_value(json!({
            "name": "Y-wing",
            "model": "BTL Y-wing",
            "cost_in_credits": "134999",
            "max_atmosphering_speed": "1000km",
            "cargo_capacity": "110",
            "passengers": "0",
        }))
        .unwrap();

        let rows = compare_ships(&left, &right);
        let fields: Vec<_> = rows.iter().map(|r| r.field).collect();
        assert_eq!(fields, ComparisonField::ALL.to_vec());

        assert!(!rows[0].is_comparable());
        assert!(!rows[1].is_comparable());
        assert_eq!(rows[2].left_wins, Some(true));
        assert!(!rows[3].is_comparable());
        assert_eq!(rows[4].left_wins, Some(false));
        assert_eq!(rows[4].right_wins, Some(false));
    }
}
