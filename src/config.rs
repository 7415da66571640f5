use std::collections::{BTreeMap, BTreeSet};

use crate::{Category, Error, PatternRule, PatternRules, TypeMap};

/// Configuration for one untaint resolution.
///
/// A configuration is built fresh for each call and dropped afterwards. All
/// settings are optional; [`UntaintConfig::default`] resolves through the
/// standard type table only, warns about columns it cannot categorize and
/// emits no progress diagnostics.
///
/// Rules are consulted in this order, and the first one that applies wins:
///
/// 1. per-column overrides
/// 2. per-type overrides
/// 3. the default type table
/// 4. type patterns, in declared order
/// 5. column-name patterns, in declared order
///
/// Skipped columns bypass all of them.
#[derive(Debug, Clone)]
pub struct UntaintConfig {
    column_overrides: BTreeMap<String, Category>,
    skip: BTreeSet<String>,
    column_patterns: PatternRules,
    type_overrides: BTreeMap<String, Category>,
    type_patterns: PatternRules,
    type_map: TypeMap,
    strict: bool,
    verbosity: u8,
}

impl UntaintConfig {
    /// Starts building a configuration.
    pub fn builder() -> UntaintConfigBuilder {
        UntaintConfigBuilder::new()
    }

    /// Returns the category explicitly assigned to a column, if any.
    pub fn column_override(&self, column: &str) -> Option<&Category> {
        self.column_overrides.get(column)
    }

    /// Returns true if the column is excluded from resolution.
    pub fn is_skipped(&self, column: &str) -> bool {
        self.skip.contains(column)
    }

    /// Returns the category explicitly assigned to a SQL type, if any.
    pub fn type_override(&self, sql_type: &str) -> Option<&Category> {
        self.type_overrides.get(sql_type)
    }

    /// Returns the default type table.
    pub fn type_map(&self) -> &TypeMap {
        &self.type_map
    }

    /// Returns the rules matched against SQL types.
    pub fn type_patterns(&self) -> &PatternRules {
        &self.type_patterns
    }

    /// Returns the rules matched against column names.
    pub fn column_patterns(&self) -> &PatternRules {
        &self.column_patterns
    }

    /// Returns true if an uncategorized column is an error.
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Returns the diagnostic level.
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }
}

impl Default for UntaintConfig {
    fn default() -> Self {
        Self {
            column_overrides: BTreeMap::new(),
            skip: BTreeSet::new(),
            column_patterns: PatternRules::new(),
            type_overrides: BTreeMap::new(),
            type_patterns: PatternRules::new(),
            type_map: TypeMap::standard(),
            strict: false,
            verbosity: 0,
        }
    }
}

/// Builder for [`UntaintConfig`].
///
/// Settings accumulate through chained calls; patterns are compiled in
/// [`build`](Self::build), which reports the first invalid one.
///
/// # Examples
///
/// ```
/// use auto_untaint::{TypeMap, UntaintConfig};
///
/// let mut types = TypeMap::standard();
/// types.insert("float", "number");
///
/// let config = UntaintConfig::builder()
///     .column_override("email", "email")
///     .skip("password_hash")
///     .type_override("tinyint(1)", "boolean")
///     .match_type("^enum", "printable")
///     .match_column("_at$", "date")
///     .type_map(types)
///     .strict(true)
///     .verbosity(1)
///     .build()
///     .expect("patterns are valid");
///
/// assert!(config.is_skipped("password_hash"));
/// assert!(config.strict());
/// ```
#[derive(Debug, Clone, Default)]
pub struct UntaintConfigBuilder {
    column_overrides: BTreeMap<String, Category>,
    skip: BTreeSet<String>,
    column_patterns: Vec<(String, Category)>,
    type_overrides: BTreeMap<String, Category>,
    type_patterns: Vec<(String, Category)>,
    type_map: Option<TypeMap>,
    strict: bool,
    verbosity: u8,
}

impl UntaintConfigBuilder {
    /// Creates a builder with every setting at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a category to a column by exact name.
    ///
    /// A later call for the same column replaces the earlier one.
    pub fn column_override(
        mut self,
        column: impl Into<String>,
        category: impl Into<Category>,
    ) -> Self {
        self.column_overrides.insert(column.into(), category.into());
        self
    }

    /// Excludes a column from resolution entirely.
    pub fn skip(mut self, column: impl Into<String>) -> Self {
        self.skip.insert(column.into());
        self
    }

    /// Excludes several columns from resolution entirely.
    pub fn skip_all<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Assigns a category to a SQL type, by exact type string or family keyword.
    pub fn type_override(
        mut self,
        sql_type: impl Into<String>,
        category: impl Into<Category>,
    ) -> Self {
        self.type_overrides.insert(sql_type.into(), category.into());
        self
    }

    /// Appends a pattern matched against SQL types.
    pub fn match_type(mut self, pattern: impl Into<String>, category: impl Into<Category>) -> Self {
        self.type_patterns.push((pattern.into(), category.into()));
        self
    }

    /// Appends a pattern matched against column names.
    pub fn match_column(
        mut self,
        pattern: impl Into<String>,
        category: impl Into<Category>,
    ) -> Self {
        self.column_patterns.push((pattern.into(), category.into()));
        self
    }

    /// Replaces the default type table, which is [`TypeMap::standard`] otherwise.
    pub fn type_map(mut self, type_map: TypeMap) -> Self {
        self.type_map = Some(type_map);
        self
    }

    /// Makes an uncategorized column an error instead of a warning.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the diagnostic level: 1 names the entity, 2 reports every column.
    pub fn verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Compiles the patterns and produces the configuration.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidPattern` error for the first pattern, type patterns
    /// before column patterns, that is not a valid regex.
    pub fn build(self) -> Result<UntaintConfig, Error> {
        let type_patterns = compile(self.type_patterns)?;
        let column_patterns = compile(self.column_patterns)?;

        Ok(UntaintConfig {
            column_overrides: self.column_overrides,
            skip: self.skip,
            column_patterns,
            type_overrides: self.type_overrides,
            type_patterns,
            type_map: self.type_map.unwrap_or_else(TypeMap::standard),
            strict: self.strict,
            verbosity: self.verbosity,
        })
    }
}

fn compile(patterns: Vec<(String, Category)>) -> Result<PatternRules, Error> {
    patterns
        .into_iter()
        .map(|(pattern, category)| PatternRule::new(&pattern, category))
        .collect()
}
