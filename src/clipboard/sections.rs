use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::error::ClipboardError;
use crate::model::{Property, RawItem};

use super::NUMBER;

const REQUIREMENT_ORDER: [&str; 4] = ["Level", "Str", "Dex", "Int"];

/// Accumulates every `Name: value[, value]` row matched anywhere in the
/// cleaned clipboard text, before it gets split into item level,
/// requirements, and the remaining display properties.
pub struct PropertyBag {
    order: Vec<String>,
    values: HashMap<String, Vec<String>>,
    all_names: HashSet<String>,
}

impl PropertyBag {
    pub fn scan(pattern: &Regex, cleaned: &str) -> Self {
        let mut order = Vec::new();
        let mut values: HashMap<String, Vec<String>> = HashMap::new();

        for caps in pattern.captures_iter(cleaned) {
            let name = caps[1].trim().to_string();
            let mut row = Vec::new();
            if let Some(first) = caps.get(2) {
                row.push(first.as_str().to_string());
            }
            if let Some(second) = caps.get(3) {
                if !second.as_str().is_empty() {
                    row.push(second.as_str().to_string());
                }
            }
            if row.is_empty() {
                continue;
            }
            if !values.contains_key(&name) {
                order.push(name.clone());
            }
            values.insert(name, row);
        }

        let all_names = order.iter().cloned().collect();
        Self {
            order,
            values,
            all_names,
        }
    }

    pub fn take_item_level(&mut self) -> Result<i32, ClipboardError> {
        match self.values.remove("Item Level") {
            Some(values) => values
                .first()
                .and_then(|v| v.parse::<i32>().ok())
                .ok_or_else(|| ClipboardError::InvalidItemLevel(values.join(","))),
            None => Err(ClipboardError::InvalidItemLevel(String::new())),
        }
    }

    pub fn take_requirements(&mut self) -> Vec<Property> {
        let mut requirements: Vec<Property> = REQUIREMENT_ORDER
            .iter()
            .filter_map(|name| {
                self.values.remove(*name).map(|values| Property {
                    name: name.to_string(),
                    values: values.into_iter().take(1).map(|v| (v, 0)).collect(),
                    display_mode: 0,
                    progress: 0.0,
                })
            })
            .collect();
        requirements.sort_by(|a, b| a.name.cmp(&b.name));
        requirements
    }

    /// Whatever is left once item level and requirements have been taken,
    /// sorted alphabetically by name to match the client's own display sort.
    pub fn remaining_properties(&self) -> Vec<Property> {
        let mut properties: Vec<Property> = self
            .order
            .iter()
            .filter_map(|name| {
                self.values.get(name).cloned().map(|values| Property {
                    name: name.clone(),
                    values: values.into_iter().map(|v| (v, 0)).collect(),
                    display_mode: 0,
                    progress: 0.0,
                })
            })
            .collect();
        properties.sort_by(|a, b| a.name.cmp(&b.name));
        properties
    }

    /// True if every non-empty line in `section` is already one of the
    /// property/requirement rows this bag captured — i.e. the section is the
    /// properties block itself, not a mod section, and should be ignored.
    fn already_consumed(&self, section: &str) -> bool {
        section
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .all(|line| {
                if line == "Requirements:" {
                    return true;
                }
                match line.split_once(':') {
                    Some((name, _)) => self.all_names.contains(name.trim()),
                    None => false,
                }
            })
    }
}

/// Consumes the trailing sections (after the header) to fill in corruption,
/// explicit/crafted/implicit mods, trimming flavor text off uniques. Mods
/// only ever live in the last one or two sections once corruption and
/// flavor text are peeled away.
pub fn parse_tail(item: &mut RawItem, sections: &[&str], bag: &PropertyBag) {
    let mut remaining: Vec<&str> = sections[1..].to_vec();

    let Some(last) = remaining.last().map(|s| s.trim()) else {
        return;
    };

    if last == "Corrupted" {
        item.corrupted = true;
        remaining.pop();
    }

    let Some(last) = remaining.last().map(|s| s.trim()) else {
        return;
    };
    if bag.already_consumed(last) {
        return;
    }

    if item.frame_type == 3 {
        remaining.pop();
    }

    let Some(last) = remaining.last().map(|s| s.trim()) else {
        return;
    };
    if bag.already_consumed(last) {
        return;
    }

    if last.lines().filter(|l| !l.trim().is_empty()).count() > 1 {
        let mut seen_templates = HashSet::new();
        for line in last.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let template = NUMBER.replace_all(line, "X").to_string();
            if seen_templates.contains(&template) {
                item.crafted_mods.push(line.to_string());
            } else {
                seen_templates.insert(template);
                item.explicit_mods.push(line.to_string());
            }
        }
        remaining.pop();
    }

    let Some(last) = remaining.last().map(|s| s.trim()) else {
        return;
    };
    if bag.already_consumed(last) {
        return;
    }

    item.implicit_mods = last
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
}
