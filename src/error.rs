use std::fmt;

/// Error returned when untaint resolution cannot complete.
///
/// Every error names the entity it was raised for and, where it applies, the
/// column and SQL type involved, so the caller can add an override and retry.
///
/// # Examples
///
/// ```
/// use auto_untaint::{ErrorKind, TableSchema, UntaintConfig, resolve};
///
/// let film = TableSchema::new("Film").column("rating", "enum('G','PG')");
/// let config = UntaintConfig::builder().strict(true).build().unwrap();
///
/// let err = resolve(&film, &config).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::UnresolvedCategory);
/// assert_eq!(err.column(), Some("rating"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    entity: String,
    column: Option<String>,
    sql_type: Option<String>,
    message: String,
}

impl Error {
    /// Creates an error for a column whose SQL type could not be introspected.
    pub fn missing_type(entity: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MissingType,
            entity: entity.into(),
            column: Some(column.into()),
            sql_type: None,
            message: "introspection returned no SQL type".to_string(),
        }
    }

    /// Creates an error for a column that matched no rule in strict mode.
    pub fn unresolved_category(
        entity: impl Into<String>,
        column: impl Into<String>,
        sql_type: impl Into<String>,
    ) -> Self {
        Self {
            kind: ErrorKind::UnresolvedCategory,
            entity: entity.into(),
            column: Some(column.into()),
            sql_type: Some(sql_type.into()),
            message: "no untaint category matches".to_string(),
        }
    }

    /// Creates an error for a pattern rule that failed to compile.
    ///
    /// Pattern errors are raised while building a configuration, before any
    /// entity is involved, so the pattern itself takes the entity slot.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidPattern,
            entity: pattern.into(),
            column: None,
            sql_type: None,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the entity name, or the offending pattern for `InvalidPattern`.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the column the error refers to, if any.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns the column's SQL type, if it was known when the error was raised.
    pub fn sql_type(&self) -> Option<&str> {
        self.sql_type.as_deref()
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.column, &self.sql_type) {
            (ErrorKind::InvalidPattern, _, _) => {
                write!(f, "{} `{}`: {}", self.kind, self.entity, self.message)
            }
            (_, Some(column), Some(sql_type)) => write!(
                f,
                "{} for {}.{} ({}): {}",
                self.kind, self.entity, column, sql_type, self.message
            ),
            (_, Some(column), None) => write!(
                f,
                "{} for {}.{}: {}",
                self.kind, self.entity, column, self.message
            ),
            _ => write!(f, "{} for {}: {}", self.kind, self.entity, self.message),
        }
    }
}

impl std::error::Error for Error {}

/// Kind of resolution error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Introspection returned no SQL type for a column.
    MissingType,
    /// No rule produced a category and strict mode is on.
    UnresolvedCategory,
    /// A type or column pattern is not a valid regular expression.
    InvalidPattern,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingType => write!(f, "missing column type"),
            Self::UnresolvedCategory => write!(f, "unresolved untaint category"),
            Self::InvalidPattern => write!(f, "invalid pattern"),
        }
    }
}
