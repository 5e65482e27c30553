use std::sync::LazyLock;

use regex::Regex;

use crate::model::ModEntry;

static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d[\d,]*\.?\d*").unwrap());

/// Templates one mod line: every numeric token is replaced by `#` in the
/// order it first appears, the parsed values are collected in that same
/// order, and the mean is recorded only when there's more than one (§4.7).
pub fn template(raw: &str) -> ModEntry {
    let mut values = Vec::new();
    let text = NUMERIC_TOKEN
        .replace_all(raw, |caps: &regex::Captures| {
            let token = &caps[0];
            if let Ok(value) = token.replace(',', "").parse::<f64>() {
                values.push(value);
            }
            "#"
        })
        .into_owned();

    let average = if values.len() > 1 {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    } else {
        None
    };

    ModEntry {
        text,
        values,
        average,
    }
}

/// Templates an entire mod list in order.
pub fn template_all(mods: &[String]) -> Vec<ModEntry> {
    mods.iter().map(|m| template(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_a_single_value() {
        let entry = template("+23 to Dexterity");
        assert_eq!(entry.text, "+# to Dexterity");
        assert_eq!(entry.values, vec![23.0]);
        assert_eq!(entry.average, None);
    }

    #[test]
    fn templates_multiple_values_and_averages_them() {
        let entry = template("Adds 5 to 12 Cold Damage");
        assert_eq!(entry.text, "Adds # to # Cold Damage");
        assert_eq!(entry.values, vec![5.0, 12.0]);
        assert_eq!(entry.average, Some(8.5));
    }

    #[test]
    fn leaves_non_numeric_text_untouched() {
        let entry = template("Can have multiple Crafted Modifiers");
        assert_eq!(entry.text, "Can have multiple Crafted Modifiers");
        assert!(entry.values.is_empty());
        assert_eq!(entry.average, None);
    }
}
