use regex::Regex;

use crate::{Category, Error};

/// A regular expression paired with the category it assigns.
///
/// Patterns are unanchored, as with [`Regex::is_match`]; use `^` and `$` to
/// match a whole type or column name.
///
/// # Examples
///
/// ```
/// use auto_untaint::PatternRule;
///
/// let rule = PatternRule::new("^(float|double|decimal)", "number").unwrap();
/// assert!(rule.is_match("decimal(10,2)"));
/// assert!(!rule.is_match("int(11)"));
///
/// assert!(PatternRule::new("^(int", "integer").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    category: Category,
}

impl PatternRule {
    /// Compiles a pattern rule.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidPattern` error if `pattern` is not a valid regex.
    pub fn new(pattern: &str, category: impl Into<Category>) -> Result<Self, Error> {
        let pattern =
            Regex::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self {
            pattern,
            category: category.into(),
        })
    }

    /// Returns the source text of the pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the category this rule assigns.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Returns true if the pattern matches anywhere in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.pattern.is_match(haystack)
    }
}

/// An ordered list of pattern rules where the first match wins.
#[derive(Debug, Clone, Default)]
pub struct PatternRules {
    rules: Vec<PatternRule>,
}

impl PatternRules {
    /// Creates an empty rule list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule after all existing rules.
    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    /// Returns the category of the first rule matching `haystack`.
    pub fn first_match(&self, haystack: &str) -> Option<&Category> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(haystack))
            .map(PatternRule::category)
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over rules in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter()
    }
}

impl FromIterator<PatternRule> for PatternRules {
    fn from_iter<I: IntoIterator<Item = PatternRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
