use std::collections::BTreeMap;

use crate::Category;

const PRINTABLE_TYPES: &[&str] = &[
    "char",
    "varchar",
    "tinytext",
    "text",
    "mediumtext",
    "longtext",
    "tinyblob",
    "blob",
    "mediumblob",
    "longblob",
];

const INTEGER_TYPES: &[&str] = &[
    "tinyint", "smallint", "mediumint", "int", "integer", "bigint", "year",
];

const DATE_TYPES: &[&str] = &["date"];

/// Default table mapping SQL type keywords to untaint categories.
///
/// This is the fallback consulted after per-column and per-type overrides.
/// [`TypeMap::standard`] covers the common character, text, BLOB, integer and
/// date families; callers extend a copy before building their configuration.
///
/// Keys are matched exactly first and then by type family (see
/// [`type_family`](crate::type_family)), so a `varchar` entry covers
/// `varchar(255)`.
///
/// # Examples
///
/// ```
/// use auto_untaint::{Category, TypeMap};
///
/// let mut types = TypeMap::standard();
/// types.insert("decimal", "number");
///
/// assert_eq!(types.get("varchar").map(Category::as_str), Some("printable"));
/// assert_eq!(types.get("decimal").map(Category::as_str), Some("number"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMap {
    entries: BTreeMap<String, Category>,
}

impl TypeMap {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the table of standard mappings.
    pub fn standard() -> Self {
        let groups = [
            (PRINTABLE_TYPES, Category::PRINTABLE),
            (INTEGER_TYPES, Category::INTEGER),
            (DATE_TYPES, Category::DATE),
        ];

        groups
            .iter()
            .flat_map(|(types, category)| types.iter().map(move |t| (*t, *category)))
            .collect()
    }

    /// Adds or replaces a mapping, returning the previous category if any.
    pub fn insert(
        &mut self,
        sql_type: impl Into<String>,
        category: impl Into<Category>,
    ) -> Option<Category> {
        self.entries.insert(sql_type.into(), category.into())
    }

    /// Removes a mapping, returning its category if it was present.
    pub fn remove(&mut self, sql_type: &str) -> Option<Category> {
        self.entries.remove(sql_type)
    }

    /// Returns the category mapped to exactly this key.
    pub fn get(&self, sql_type: &str) -> Option<&Category> {
        self.entries.get(sql_type)
    }

    /// Returns the number of mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no mappings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over mappings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for TypeMap
where
    K: Into<String>,
    V: Into<Category>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for TypeMap
where
    K: Into<String>,
    V: Into<Category>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (sql_type, category) in iter {
            self.insert(sql_type, category);
        }
    }
}
