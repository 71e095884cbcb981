//! Directive parser for generated narrative.
//!
//! Maps fixed-syntax macros embedded in backend replies to typed
//! [`Directive`]s. Currently recognised:
//! - `HEALTH_SUBTRACT(<non-negative integer>)`
//!
//! Policy: first match wins. Only the earliest directive in the text is
//! reported; later ones are ignored. Text that does not match a pattern
//! exactly is not a directive and is never an error.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::domain::value_objects::Directive;

static HEALTH_SUBTRACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HEALTH_SUBTRACT\((\d+)\)").expect("valid regex"));

/// One recognised directive syntax
struct DirectiveRule {
    pattern: &'static LazyLock<Regex>,
    build: fn(&str) -> Directive,
}

/// Amounts too large for `u32` saturate rather than being discarded
fn health_subtract(digits: &str) -> Directive {
    Directive::HealthSubtract(digits.parse().unwrap_or(u32::MAX))
}

static RULES: [DirectiveRule; 1] = [DirectiveRule {
    pattern: &HEALTH_SUBTRACT_RE,
    build: health_subtract,
}];

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveParser;

impl DirectiveParser {
    pub fn new() -> Self {
        Self
    }

    /// Return the earliest directive in `text`, if any
    pub fn parse_first(&self, text: &str) -> Option<Directive> {
        RULES
            .iter()
            .filter_map(|rule| {
                let captures = rule.pattern.captures(text)?;
                let whole = captures.get(0)?;
                let argument = captures.get(1)?;
                Some((whole.start(), (rule.build)(argument.as_str())))
            })
            .min_by_key(|(start, _)| *start)
            .map(|(_, directive)| directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_health_subtract() {
        let parser = DirectiveParser::new();
        assert_eq!(
            parser.parse_first("The goblin hits you! HEALTH_SUBTRACT(20)"),
            Some(Directive::HealthSubtract(20))
        );
    }

    #[test]
    fn test_no_directive() {
        let parser = DirectiveParser::new();
        assert_eq!(parser.parse_first("You see a beautiful forest."), None);
    }

    #[test]
    fn test_first_match_wins() {
        let parser = DirectiveParser::new();
        let text = "HEALTH_SUBTRACT(5) then later HEALTH_SUBTRACT(50)";
        assert_eq!(parser.parse_first(text), Some(Directive::HealthSubtract(5)));
    }

    #[test]
    fn test_malformed_directives_are_absent() {
        let parser = DirectiveParser::new();
        for text in [
            "HEALTH_SUBTRACT(-5)",
            "HEALTH_SUBTRACT(five)",
            "HEALTH_SUBTRACT()",
            "HEALTH_SUBTRACT (10)",
            "health_subtract(10)",
            "HEALTH_SUBTRACT(10",
            "HEALTH_SUBTRACT(<amount>)",
        ] {
            assert_eq!(parser.parse_first(text), None, "{text}");
        }
    }

    #[test]
    fn test_malformed_before_valid() {
        let parser = DirectiveParser::new();
        let text = "HEALTH_SUBTRACT(x) ... HEALTH_SUBTRACT(7)";
        assert_eq!(parser.parse_first(text), Some(Directive::HealthSubtract(7)));
    }

    #[test]
    fn test_zero_and_huge_amounts() {
        let parser = DirectiveParser::new();
        assert_eq!(
            parser.parse_first("HEALTH_SUBTRACT(0)"),
            Some(Directive::HealthSubtract(0))
        );
        assert_eq!(
            parser.parse_first("HEALTH_SUBTRACT(99999999999999999999)"),
            Some(Directive::HealthSubtract(u32::MAX))
        );
    }
}
