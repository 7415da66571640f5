use auto_untaint::{
    resolve, AutoUntaint, Column, ColumnIntrospect, ErrorKind, MemoryRegistry, TableSchema,
    TypeMap, UntaintConfig, UntaintGroups, UntaintRegistry,
};

fn film() -> TableSchema {
    TableSchema::new("Film")
        .column("title", "varchar(255)")
        .column("year", "int(4)")
}

fn columns(groups: &UntaintGroups, category: &str) -> Vec<String> {
    groups
        .columns(category)
        .map(|cols| cols.iter().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn default_config_groups_by_type() {
    let mut film = film();

    film.auto_untaint(&UntaintConfig::default()).unwrap();

    let groups = film.registered().expect("groups were registered");
    assert_eq!(groups.len(), 2);
    assert_eq!(columns(groups, "printable"), vec!["title"]);
    assert_eq!(columns(groups, "integer"), vec!["year"]);
}

#[test]
fn column_override_moves_column() {
    let mut film = film();
    let config = UntaintConfig::builder()
        .column_override("title", "date")
        .build()
        .unwrap();

    film.auto_untaint(&config).unwrap();

    let groups = film.registered().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(columns(groups, "date"), vec!["title"]);
    assert_eq!(columns(groups, "integer"), vec!["year"]);
}

#[test]
fn skipped_column_is_never_registered() {
    let mut notes = TableSchema::new("Note").column("secret_notes", "text");
    let config = UntaintConfig::builder()
        .skip("secret_notes")
        .build()
        .unwrap();

    let resolution = notes.auto_untaint(&config).unwrap();

    let groups = notes.registered().unwrap();
    assert!(groups.iter().all(|(_, cols)| !cols.contains("secret_notes")));
    assert_eq!(resolution.skipped(), ["secret_notes".to_string()]);
}

#[test]
fn unknown_type_is_omitted_when_lenient() {
    let mut form = TableSchema::new("Form").column("custom_field", "enum(...)");

    let resolution = form.auto_untaint(&UntaintConfig::default()).unwrap();

    assert!(form.registered().unwrap().is_empty());
    assert_eq!(resolution.unresolved().len(), 1);
    assert_eq!(resolution.unresolved()[0].column, "custom_field");
    assert_eq!(resolution.unresolved()[0].sql_type, "enum(...)");
}

#[test]
fn unknown_type_fails_when_strict() {
    let mut form = TableSchema::new("Form").column("custom_field", "enum(...)");
    let config = UntaintConfig::builder().strict(true).build().unwrap();

    let err = form.auto_untaint(&config).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnresolvedCategory);
    assert_eq!(err.entity(), "Form");
    assert_eq!(err.column(), Some("custom_field"));
    assert_eq!(err.sql_type(), Some("enum(...)"));
    assert!(form.registered().is_none());
}

#[test]
fn strict_failure_can_be_fixed_with_override() {
    let form = TableSchema::new("Form").column("custom_field", "enum(...)");

    let strict = UntaintConfig::builder().strict(true);
    let err = resolve(&form, &strict.clone().build().unwrap()).unwrap_err();
    let column = err.column().unwrap().to_string();

    let fixed = strict.column_override(column, "printable").build().unwrap();
    let groups = resolve(&form, &fixed).unwrap().into_groups();

    assert_eq!(columns(&groups, "printable"), vec!["custom_field"]);
}

#[test]
fn missing_type_fails_even_when_lenient() {
    let mut film = film().untyped_column("rating");

    let err = film.auto_untaint(&UntaintConfig::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingType);
    assert_eq!(err.column(), Some("rating"));
    assert!(film.registered().is_none());
}

#[test]
fn first_type_pattern_wins() {
    let schema = TableSchema::new("Measurement").column("reading", "decimal(10,2)");
    let config = UntaintConfig::builder()
        .match_type("^dec", "A")
        .match_type("decimal", "B")
        .build()
        .unwrap();

    let groups = resolve(&schema, &config).unwrap().into_groups();

    assert_eq!(columns(&groups, "A"), vec!["reading"]);
    assert!(groups.columns("B").is_none());
}

#[test]
fn extended_type_map_covers_new_family() {
    let mut types = TypeMap::standard();
    types.insert("enum", "printable");

    let schema = TableSchema::new("Form").column("custom_field", "enum('x','y')");
    let config = UntaintConfig::builder().type_map(types).build().unwrap();

    let groups = resolve(&schema, &config).unwrap().into_groups();

    assert_eq!(columns(&groups, "printable"), vec!["custom_field"]);
    // the standard table is untouched
    assert!(TypeMap::standard().get("enum").is_none());
}

#[test]
fn full_priority_chain() {
    let schema = TableSchema::new("Order")
        .column("placed_on", "varchar(10)")
        .column("quantity", "smallint(5)")
        .column("status", "enum('new','paid')")
        .column("shipped_at", "geometry")
        .column("notes", "text")
        .column("payload", "json");
    let config = UntaintConfig::builder()
        .column_override("placed_on", "date")
        .type_override("smallint(5)", "quantity")
        .match_type("^enum", "printable")
        .match_column("_at$", "date")
        .skip("notes")
        .build()
        .unwrap();

    let resolution = resolve(&schema, &config).unwrap();
    let groups = resolution.groups();

    assert_eq!(columns(groups, "date"), vec!["placed_on", "shipped_at"]);
    assert_eq!(columns(groups, "quantity"), vec!["quantity"]);
    assert_eq!(columns(groups, "printable"), vec!["status"]);
    assert_eq!(resolution.skipped(), ["notes".to_string()]);
    assert_eq!(resolution.unresolved()[0].column, "payload");
}

/// An ORM-backed entity that reports into a shared registry.
struct Mapped<'a> {
    table: &'static str,
    columns: Vec<(&'static str, &'static str)>,
    registry: &'a MemoryRegistry,
}

impl ColumnIntrospect for Mapped<'_> {
    fn entity_name(&self) -> &str {
        self.table
    }

    fn columns(&self) -> Vec<Column> {
        self.columns.iter().map(|(name, _)| Column::from(*name)).collect()
    }

    fn column_type(&self, column: &str) -> Option<String> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, sql_type)| sql_type.to_string())
    }
}

impl UntaintRegistry for Mapped<'_> {
    fn register_untaint_groups(&mut self, groups: &UntaintGroups) {
        self.registry.record(groups);
    }
}

#[test]
fn entities_share_a_registry() {
    let registry = MemoryRegistry::new();
    let mut artist = Mapped {
        table: "Artist",
        columns: vec![("name", "varchar(80)"), ("born", "date")],
        registry: &registry,
    };
    let mut album = Mapped {
        table: "Album",
        columns: vec![("title", "varchar(120)"), ("tracks", "tinyint(3)")],
        registry: &registry,
    };

    artist.auto_untaint(&UntaintConfig::default()).unwrap();
    album.auto_untaint(&UntaintConfig::default()).unwrap();

    let calls = registry.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].category_of("born").unwrap(), "date");
    assert_eq!(calls[1].category_of("tracks").unwrap(), "integer");
}

#[test]
fn repeated_registration_is_identical() {
    let registry = MemoryRegistry::new();
    let mut artist = Mapped {
        table: "Artist",
        columns: vec![("name", "varchar(80)"), ("born", "date")],
        registry: &registry,
    };

    artist.auto_untaint(&UntaintConfig::default()).unwrap();
    artist.auto_untaint(&UntaintConfig::default()).unwrap();

    let calls = registry.calls();
    assert_eq!(calls[0], calls[1]);
}
