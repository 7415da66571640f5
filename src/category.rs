use std::borrow::Borrow;
use std::fmt;

/// An untaint category label, such as `printable`, `integer` or `date`.
///
/// The label is opaque: it is handed to the host ORM's registration call
/// unchanged, and this crate never checks that a validator exists for it.
///
/// # Examples
///
/// ```
/// use auto_untaint::Category;
///
/// let category = Category::new("email");
/// assert_eq!(category.as_str(), "email");
/// assert_eq!(Category::PRINTABLE, "printable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(String);

impl Category {
    /// Free-form text without control characters.
    pub const PRINTABLE: &'static str = "printable";
    /// Whole numbers.
    pub const INTEGER: &'static str = "integer";
    /// Calendar dates.
    pub const DATE: &'static str = "date";

    /// Creates a category label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the label is empty, which counts as "no category".
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Category {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Category {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Category> for &str {
    fn eq(&self, other: &Category) -> bool {
        *self == other.0
    }
}
