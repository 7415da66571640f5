//! Shared proptest strategies and log capture for unit tests.

use std::io;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use crate::TableSchema;

/// Column names as an ORM would report them.
pub(crate) fn arb_column_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,15}").unwrap()
}

/// SQL types, some covered by the standard table and some not.
pub(crate) fn arb_sql_type() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u16..=255).prop_map(|n| format!("varchar({})", n)),
        (1u16..=255).prop_map(|n| format!("char({})", n)),
        (1u8..=20).prop_map(|n| format!("int({})", n)),
        (1u8..=20).prop_map(|n| format!("bigint({}) unsigned", n)),
        Just("text".to_string()),
        Just("date".to_string()),
        Just("enum('a','b')".to_string()),
        Just("decimal(10,2)".to_string()),
    ]
}

/// Entities with up to a dozen typed columns and unique names.
pub(crate) fn arb_schema() -> impl Strategy<Value = TableSchema> {
    prop::collection::btree_map(arb_column_name(), arb_sql_type(), 0..12).prop_map(|columns| {
        columns
            .into_iter()
            .fold(TableSchema::new("Generated"), |schema, (name, sql_type)| {
                schema.column(name, sql_type)
            })
    })
}

/// In-memory writer shared between a subscriber and the test reading it.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under an INFO-level subscriber and returns everything it logged.
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
