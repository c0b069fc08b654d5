//! Ordered rule cascades: the first rule that matches decides the field.

use regex::Regex;
use tracing::trace;

use super::ExtractionMatch;
use crate::models::statement::Field;

/// One named pattern in a cascade. Group 1 holds the value.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: &'static Regex,
}

impl Rule {
    pub fn new(name: &'static str, pattern: &'static Regex) -> Self {
        Self { name, pattern }
    }

    /// Apply the rule to `text`, normalizing the captured value.
    ///
    /// A capture that normalizes to nothing does not count as a match.
    pub fn apply(&self, text: &str, priority: usize) -> Option<ExtractionMatch<String>> {
        let caps = self.pattern.captures(text)?;
        let group = caps.get(1)?;

        let value = normalize_whitespace(group.as_str());
        if value.is_empty() {
            trace!("Rule {} captured only whitespace", self.name);
            return None;
        }

        Some(
            ExtractionMatch::new(value, self.name, priority, &caps[0])
                .with_position(group.start(), group.end()),
        )
    }
}

/// Ordered list of alternative rules for one field.
#[derive(Debug, Clone)]
pub struct Cascade {
    field: Field,
    rules: Vec<Rule>,
}

impl Cascade {
    pub fn new(field: Field, rules: Vec<Rule>) -> Self {
        Self { field, rules }
    }

    /// Try rules in order and return the first match.
    pub fn first_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let found = self
            .rules
            .iter()
            .enumerate()
            .find_map(|(priority, rule)| rule.apply(text, priority));
        if found.is_none() {
            trace!("{}: all {} rules missed", self.field, self.rules.len());
        }
        found
    }

    /// Every rule's match, in priority order.
    pub fn all_matches(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(priority, rule)| rule.apply(text, priority))
            .collect()
    }
}

/// Collapse whitespace runs to a single space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
