//! Contracts between the resolver and the host ORM.
//!
//! An entity opts into automatic untainting by implementing
//! [`ColumnIntrospect`] (so its columns and their SQL types can be read) and
//! [`UntaintRegistry`] (so the resolved groups can be recorded). Any type
//! implementing both gets [`AutoUntaint::auto_untaint`] for free.
//!
//! [`TableSchema`] and [`MemoryRegistry`] are in-memory implementations for
//! tests, demos and prototyping a mapping before wiring up a real ORM.

use std::cell::RefCell;

use crate::{resolve, Column, Error, Resolution, UntaintConfig, UntaintGroups};

/// Read access to an entity's persisted columns.
pub trait ColumnIntrospect {
    /// Name identifying the entity in diagnostics and errors.
    fn entity_name(&self) -> &str;

    /// Columns in introspection order.
    fn columns(&self) -> Vec<Column>;

    /// SQL type of a column, or `None` if introspection cannot tell.
    fn column_type(&self, column: &str) -> Option<String>;
}

/// The host ORM's mechanism for recording which columns each untaint
/// category applies to.
pub trait UntaintRegistry {
    /// Records the full category to columns mapping for the entity.
    ///
    /// Called once per resolution, after every column has been resolved,
    /// possibly with an empty mapping.
    fn register_untaint_groups(&mut self, groups: &UntaintGroups);
}

/// Entry point for entities that support both introspection and registration.
///
/// # Examples
///
/// ```
/// use auto_untaint::{AutoUntaint, TableSchema, UntaintConfig};
///
/// let mut film = TableSchema::new("Film")
///     .column("title", "varchar(255)")
///     .column("year", "int(4)");
///
/// film.auto_untaint(&UntaintConfig::default()).unwrap();
///
/// let registered = film.registered().unwrap();
/// assert_eq!(registered.category_of("title").unwrap(), "printable");
/// assert_eq!(registered.category_of("year").unwrap(), "integer");
/// ```
pub trait AutoUntaint: ColumnIntrospect + UntaintRegistry {
    /// Resolves every column's category and registers the groups.
    ///
    /// Registration happens only if resolution succeeds for every column.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`resolve`]; nothing is registered.
    fn auto_untaint(&mut self, config: &UntaintConfig) -> Result<Resolution, Error> {
        let resolution = resolve(&*self, config)?;
        self.register_untaint_groups(resolution.groups());
        Ok(resolution)
    }
}

impl<T: ColumnIntrospect + UntaintRegistry + ?Sized> AutoUntaint for T {}

/// An in-memory entity description.
///
/// Columns keep the order they were added in. A column added with
/// [`untyped_column`](Self::untyped_column) has no SQL type, which models an
/// introspection failure. Registration stores the most recent groups.
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    name: String,
    columns: Vec<(String, Option<String>)>,
    registered: Option<UntaintGroups>,
}

impl TableSchema {
    /// Creates an entity with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a column with a SQL type.
    ///
    /// Redefining an existing column replaces its type in place.
    pub fn column(self, name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        self.define(name.into(), Some(sql_type.into()))
    }

    /// Adds a column whose SQL type introspection cannot report.
    ///
    /// Redefining an existing column clears its type in place.
    pub fn untyped_column(self, name: impl Into<String>) -> Self {
        self.define(name.into(), None)
    }

    fn define(mut self, name: String, sql_type: Option<String>) -> Self {
        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = sql_type,
            None => self.columns.push((name, sql_type)),
        }
        self
    }

    /// Returns the groups from the most recent registration, if any.
    pub fn registered(&self) -> Option<&UntaintGroups> {
        self.registered.as_ref()
    }
}

impl ColumnIntrospect for TableSchema {
    fn entity_name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> Vec<Column> {
        self.columns
            .iter()
            .map(|(name, _)| Column::new(name.as_str()))
            .collect()
    }

    fn column_type(&self, column: &str) -> Option<String> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, sql_type)| sql_type.clone())
    }
}

impl UntaintRegistry for TableSchema {
    fn register_untaint_groups(&mut self, groups: &UntaintGroups) {
        self.registered = Some(groups.clone());
    }
}

/// Registry that records every registration call in order.
///
/// Recording goes through `&self`, so one registry can be shared by
/// reference between the entities that report to it.
///
/// # Examples
///
/// ```
/// use auto_untaint::{MemoryRegistry, UntaintGroups, UntaintRegistry};
///
/// let registry = MemoryRegistry::new();
/// (&registry).register_untaint_groups(&UntaintGroups::new());
///
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    calls: RefCell<Vec<UntaintGroups>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one registration.
    pub fn record(&self, groups: &UntaintGroups) {
        self.calls.borrow_mut().push(groups.clone());
    }

    /// Returns a snapshot of every registration, oldest first.
    pub fn calls(&self) -> Vec<UntaintGroups> {
        self.calls.borrow().clone()
    }

    /// Returns the most recent registration.
    pub fn last(&self) -> Option<UntaintGroups> {
        self.calls.borrow().last().cloned()
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// Forgets every registration.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl UntaintRegistry for MemoryRegistry {
    fn register_untaint_groups(&mut self, groups: &UntaintGroups) {
        self.record(groups);
    }
}

impl UntaintRegistry for &MemoryRegistry {
    fn register_untaint_groups(&mut self, groups: &UntaintGroups) {
        self.record(groups);
    }
}
