/// Longest SQL type shown in diagnostics before it is truncated.
const DISPLAY_WIDTH: usize = 25;
const ELLIPSIS: &str = "...";

/// A persisted column of an entity, as reported by introspection.
///
/// Names are case-preserving; `Title` and `title` are different columns.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column {
    name: String,
}

impl Column {
    /// Creates a column with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Returns the family keyword of a SQL type string.
///
/// The family is the leading run of ASCII alphanumerics and underscores,
/// lower-cased: `varchar(255)` is `varchar`, `INT UNSIGNED` is `int`.
/// Leading whitespace is ignored. Returns `None` when the type does not start
/// with a keyword.
///
/// # Examples
///
/// ```
/// use auto_untaint::type_family;
///
/// assert_eq!(type_family("varchar(255)").as_deref(), Some("varchar"));
/// assert_eq!(type_family("BIGINT(20) UNSIGNED").as_deref(), Some("bigint"));
/// assert_eq!(type_family("(weird)"), None);
/// ```
pub fn type_family(sql_type: &str) -> Option<String> {
    let family: String = sql_type
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if family.is_empty() {
        None
    } else {
        Some(family)
    }
}

/// Shortens a SQL type for diagnostic output.
///
/// Types up to 25 characters are returned unchanged; longer ones keep their
/// first 22 characters followed by `...`.
pub(crate) fn truncate_for_display(sql_type: &str) -> String {
    if sql_type.chars().count() <= DISPLAY_WIDTH {
        return sql_type.to_string();
    }

    let keep = DISPLAY_WIDTH - ELLIPSIS.len();
    let mut shown: String = sql_type.chars().take(keep).collect();
    shown.push_str(ELLIPSIS);
    shown
}
