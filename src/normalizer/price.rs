use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::currency::CurrencyTracker;

/// `<prefix> <value> <currency>`, e.g. `~price 1.2 exa` or `~b/o 15 chaos`.
/// `value` may be a plain number or an `a/b` fraction.
static BUYOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+\s+([0-9]*[.\/]?[0-9]+)\s+(\w+)").unwrap());

/// A parsed buyout tag before currency-to-chaos conversion.
struct Buyout {
    value: Decimal,
    currency_tag: String,
}

fn parse_tag(raw: &str) -> Option<Buyout> {
    let lowercased = raw.to_lowercase();
    let captures = BUYOUT.captures(&lowercased)?;
    let value_raw = captures.get(1)?.as_str();
    let currency_tag = captures.get(2)?.as_str().to_string();

    let value = if let Some((a, b)) = value_raw.split_once('/') {
        let a: Decimal = a.parse().ok()?;
        let b: Decimal = b.parse().ok()?;
        if b.is_zero() {
            return None;
        }
        a / b
    } else {
        value_raw.parse().ok()?
    };

    Some(Buyout {
        value,
        currency_tag,
    })
}

/// Price in chaos-equivalent value, tried first against `note` and, failing
/// that, `inventory_id` (§4.7). Returns `(0, "")` when neither parses.
pub fn extract_price(note: &str, inventory_id: &str, currency: &CurrencyTracker) -> (Decimal, String) {
    for candidate in [note, inventory_id] {
        if candidate.is_empty() {
            continue;
        }
        if let Some(buyout) = parse_tag(candidate) {
            if let Some((chaos_value, canonical)) = currency.resolve(&buyout.currency_tag) {
                return (buyout.value * chaos_value, canonical);
            }
        }
    }
    (Decimal::ZERO, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_value() {
        let b = parse_tag("~price 15 chaos").unwrap();
        assert_eq!(b.value, Decimal::new(15, 0));
        assert_eq!(b.currency_tag, "chaos");
    }

    #[test]
    fn parses_a_fraction() {
        let b = parse_tag("~b/o 1/9 exa").unwrap();
        assert_eq!(b.value, Decimal::new(1, 0) / Decimal::new(9, 0));
    }

    #[test]
    fn rejects_a_zero_denominator() {
        assert!(parse_tag("~price 1/0 chaos").is_none());
    }

    #[test]
    fn rejects_unparseable_text() {
        assert!(parse_tag("not a price tag").is_none());
    }
}
