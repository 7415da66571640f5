//! Untaint categories for a small film catalog.
//!
//! Run with `cargo run --example film_catalog`. Verbosity 2 logs one line
//! per resolved column.

use auto_untaint::{AutoUntaint, Error, TableSchema, TypeMap, UntaintConfig};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut types = TypeMap::standard();
    types.insert("decimal", "number");

    let mut film = TableSchema::new("Film")
        .column("id", "int(11) unsigned")
        .column("title", "varchar(255)")
        .column("year", "year(4)")
        .column("released_on", "date")
        .column("rating", "enum('G','PG','PG-13','R','NC-17')")
        .column("price", "decimal(6,2)")
        .column("contact_email", "varchar(120)")
        .column("internal_notes", "text")
        .column("poster", "geometry");

    let config = UntaintConfig::builder()
        .skip("internal_notes")
        .column_override("contact_email", "email")
        .match_type("^enum", "printable")
        .type_map(types)
        .verbosity(2)
        .build()?;

    let resolution = film.auto_untaint(&config)?;

    print!("{}", resolution.groups());
    for column in resolution.unresolved() {
        println!("not untainted: {} ({})", column.column, column.sql_type);
    }

    Ok(())
}
