use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Property, PropertyValue};

static RANGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)$").unwrap());
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*)").unwrap());

fn sanitize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// A single value tuple that parses as a plain number or a `a-b` range is
/// stored numerically; anything else (including `a/b` fractions, which are
/// NOT treated as ranges) keeps only its leading numeric token, or falls
/// back to the raw text untouched (§4.7).
fn parse_single_value(text: &str) -> PropertyValue {
    if let Some(caps) = RANGE.captures(text) {
        if let (Ok(a), Ok(b)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            return PropertyValue::Number((a + b) / 2.0);
        }
    }

    if let Some(caps) = LEADING_NUMBER.captures(text) {
        if let Ok(n) = caps[1].parse::<f64>() {
            return PropertyValue::Number(n);
        }
    }

    PropertyValue::Text(text.to_string())
}

/// Flattens one property group into `sanitized_name -> value`, skipping any
/// property whose raw name contains a comma (§4.7).
pub fn flatten(properties: &[Property]) -> BTreeMap<String, PropertyValue> {
    let mut out = BTreeMap::new();
    for prop in properties {
        if prop.name.contains(',') {
            continue;
        }
        let name = sanitize_name(&prop.name);

        let value = match prop.values.as_slice() {
            [] => PropertyValue::Text(String::new()),
            [(text, _)] => parse_single_value(text),
            many => PropertyValue::List(many.iter().map(|(text, _)| text.clone()).collect()),
        };

        out.insert(name, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str, values: &[&str]) -> Property {
        Property {
            name: name.to_string(),
            values: values.iter().map(|v| (v.to_string(), 0)).collect(),
            display_mode: 0,
            progress: 0.0,
        }
    }

    #[test]
    fn parses_a_percent_suffixed_number() {
        let flattened = flatten(&[prop("Quality", &["+11%"])]);
        assert_eq!(flattened["quality"], PropertyValue::Number(11.0));
    }

    #[test]
    fn averages_a_range() {
        let flattened = flatten(&[prop("Damage", &["62-130"])]);
        assert_eq!(flattened["damage"], PropertyValue::Number(96.0));
    }

    #[test]
    fn a_fraction_is_not_a_range_and_keeps_only_its_leading_number() {
        let flattened = flatten(&[prop("Charges", &["1/9"])]);
        assert_eq!(flattened["charges"], PropertyValue::Number(1.0));
    }

    #[test]
    fn multi_value_properties_become_a_list_of_first_elements() {
        let flattened = flatten(&[prop("Elemental Damage", &["10-20", "30-40"])]);
        assert_eq!(
            flattened["elemental_damage"],
            PropertyValue::List(vec!["10-20".to_string(), "30-40".to_string()])
        );
    }

    #[test]
    fn skips_properties_whose_name_contains_a_comma() {
        let flattened = flatten(&[prop("Bow, Two Handed", &["1"])]);
        assert!(flattened.is_empty());
    }

    #[test]
    fn sanitizes_spaces_to_underscores_and_lowercases() {
        let flattened = flatten(&[prop("Critical Strike Chance", &["5%"])]);
        assert!(flattened.contains_key("critical_strike_chance"));
    }
}
