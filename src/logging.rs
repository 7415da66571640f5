use crate::column::truncate_for_display;
use crate::Category;

/// Verbosity at which the entity being processed is announced.
const ANNOUNCE_LEVEL: u8 = 1;
/// Verbosity at which every resolved column is reported.
const COLUMN_LEVEL: u8 = 2;

/// Diagnostic channel for one resolution.
///
/// `ResolveLog` is scoped to the entity being processed and tags every event
/// with its name. Progress events are gated by the configured verbosity;
/// warnings about dropped columns are always emitted. Nothing logged here
/// affects the resolution result.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolveLog<'a> {
    entity: &'a str,
    verbosity: u8,
}

impl<'a> ResolveLog<'a> {
    pub(crate) fn new(entity: &'a str, verbosity: u8) -> Self {
        Self { entity, verbosity }
    }

    /// Announces the start of a resolution (verbosity 1 only; at higher
    /// levels every column line already names the entity).
    pub(crate) fn start(&self) {
        if self.verbosity == ANNOUNCE_LEVEL {
            tracing::info!(entity = %self.entity, "untainting columns");
        }
    }

    /// Reports a resolved column (verbosity 2 and up).
    pub(crate) fn resolved(&self, column: &str, sql_type: &str, category: &Category) {
        if self.verbosity >= COLUMN_LEVEL {
            tracing::info!(
                entity = %self.entity,
                column,
                sql_type = %truncate_for_display(sql_type),
                category = %category,
                "untaint category resolved"
            );
        }
    }

    /// Reports a column left out because nothing matched it.
    pub(crate) fn unresolved(&self, column: &str, sql_type: &str) {
        tracing::warn!(
            entity = %self.entity,
            column,
            sql_type = %truncate_for_display(sql_type),
            "no untaint category found, column will not be untainted"
        );
    }

    /// Reports a skipped column (verbosity 2 and up).
    pub(crate) fn skipped(&self, column: &str) {
        if self.verbosity >= COLUMN_LEVEL {
            tracing::info!(entity = %self.entity, column, "column skipped");
        }
    }
}
