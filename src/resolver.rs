use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt;

use crate::logging::ResolveLog;
use crate::{type_family, Category, ColumnIntrospect, Error, UntaintConfig};

/// Columns grouped by the untaint category assigned to them.
///
/// Each column appears under at most one category. Categories and columns are
/// kept sorted, so two resolutions of the same entity compare equal and print
/// identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UntaintGroups {
    groups: BTreeMap<Category, BTreeSet<String>>,
}

impl UntaintGroups {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, category: Category, column: impl Into<String>) {
        self.groups.entry(category).or_default().insert(column.into());
    }

    /// Returns the category a column was assigned to.
    pub fn category_of(&self, column: &str) -> Option<&Category> {
        self.groups
            .iter()
            .find(|(_, columns)| columns.contains(column))
            .map(|(category, _)| category)
    }

    /// Returns the columns assigned to a category.
    pub fn columns(&self, category: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(category)
    }

    /// Iterates over the categories in use.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.groups.keys()
    }

    /// Returns the number of categories in use.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no column was assigned a category.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over categories and their columns.
    pub fn iter(&self) -> btree_map::Iter<'_, Category, BTreeSet<String>> {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for &'a UntaintGroups {
    type Item = (&'a Category, &'a BTreeSet<String>);
    type IntoIter = btree_map::Iter<'a, Category, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl fmt::Display for UntaintGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (category, columns) in &self.groups {
            let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
            writeln!(f, "{}: {}", category, columns.join(", "))?;
        }
        Ok(())
    }
}

/// A column that no rule matched, left out in non-strict mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedColumn {
    /// Column name.
    pub column: String,
    /// SQL type reported by introspection.
    pub sql_type: String,
}

/// Outcome of resolving one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    groups: UntaintGroups,
    unresolved: Vec<UnresolvedColumn>,
    skipped: Vec<String>,
}

impl Resolution {
    /// Returns the category to columns mapping.
    pub fn groups(&self) -> &UntaintGroups {
        &self.groups
    }

    /// Consumes the resolution, returning the mapping.
    pub fn into_groups(self) -> UntaintGroups {
        self.groups
    }

    /// Returns the columns that matched no rule, in introspection order.
    ///
    /// Input for these columns will not be untainted; always empty in strict
    /// mode, since the first such column is an error there.
    pub fn unresolved(&self) -> &[UnresolvedColumn] {
        &self.unresolved
    }

    /// Returns the columns excluded by the skip list, in introspection order.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}

/// Assigns an untaint category to every column of an entity.
///
/// Each column not on the skip list gets the category of the first rule that
/// applies, in the order documented on [`UntaintConfig`]. The result is only
/// computed; use [`AutoUntaint::auto_untaint`](crate::AutoUntaint::auto_untaint)
/// to also register it.
///
/// # Errors
///
/// - `MissingType` if introspection reports no type for a column, whatever
///   the strict setting.
/// - `UnresolvedCategory` if no rule matches a column in strict mode.
///
/// # Examples
///
/// ```
/// use auto_untaint::{resolve, TableSchema, UntaintConfig};
///
/// let film = TableSchema::new("Film")
///     .column("title", "varchar(255)")
///     .column("year", "int(4)");
///
/// let config = UntaintConfig::builder()
///     .column_override("title", "date")
///     .build()
///     .unwrap();
///
/// let resolution = resolve(&film, &config).unwrap();
/// assert_eq!(resolution.groups().category_of("title").unwrap(), "date");
/// assert_eq!(resolution.groups().category_of("year").unwrap(), "integer");
/// ```
pub fn resolve<E>(entity: &E, config: &UntaintConfig) -> Result<Resolution, Error>
where
    E: ColumnIntrospect + ?Sized,
{
    let name = entity.entity_name();
    let log = ResolveLog::new(name, config.verbosity());
    log.start();

    let mut groups = UntaintGroups::new();
    let mut unresolved = Vec::new();
    let mut skipped = Vec::new();

    for column in entity.columns() {
        let column = column.name();

        if config.is_skipped(column) {
            log.skipped(column);
            skipped.push(column.to_string());
            continue;
        }

        let sql_type = entity
            .column_type(column)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::missing_type(name, column))?;

        match category_for(config, column, &sql_type) {
            Some(category) => {
                log.resolved(column, &sql_type, category);
                groups.insert(category.clone(), column);
            }
            None if config.strict() => {
                return Err(Error::unresolved_category(name, column, sql_type));
            }
            None => {
                log.unresolved(column, &sql_type);
                unresolved.push(UnresolvedColumn {
                    column: column.to_string(),
                    sql_type,
                });
            }
        }
    }

    Ok(Resolution {
        groups,
        unresolved,
        skipped,
    })
}

/// Returns the category of the first applicable rule, if any.
///
/// Rules yielding an empty label are passed over.
fn category_for<'c>(
    config: &'c UntaintConfig,
    column: &str,
    sql_type: &str,
) -> Option<&'c Category> {
    let family = type_family(sql_type);
    let family = family.as_deref();

    non_empty(config.column_override(column))
        .or_else(|| non_empty(by_type(sql_type, family, |t| config.type_override(t))))
        .or_else(|| non_empty(by_type(sql_type, family, |t| config.type_map().get(t))))
        .or_else(|| non_empty(config.type_patterns().first_match(sql_type)))
        .or_else(|| non_empty(config.column_patterns().first_match(column)))
}

/// Looks a type up by its exact string, then by its family keyword.
fn by_type<'c>(
    sql_type: &str,
    family: Option<&str>,
    lookup: impl Fn(&str) -> Option<&'c Category>,
) -> Option<&'c Category> {
    lookup(sql_type).or_else(|| family.and_then(|f| lookup(f)))
}

fn non_empty(category: Option<&Category>) -> Option<&Category> {
    category.filter(|c| !c.is_empty())
}
