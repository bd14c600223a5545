use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new("0001_initial_schema")
        // listings - AUTOINCREMENT is sqlite-only syntax
        .operation(RunSql::portable().for_backend(
            "sqlite",
            r#"CREATE TABLE IF NOT EXISTS listings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL,
    title TEXT NOT NULL,
    summary TEXT NOT NULL DEFAULT '',
    destinations TEXT NOT NULL DEFAULT '[]',
    airlines TEXT NOT NULL DEFAULT '[]',
    url TEXT NOT NULL,
    published_at TEXT NOT NULL,
    ingested_at TEXT NOT NULL
)"#,
        ))
        .operation(AddIndex::new(
            "listings",
            Index::new("idx_listings_source_url")
                .column("source")
                .column("url")
                .unique(),
        ))
        .operation(AddIndex::new(
            "listings",
            Index::new("idx_listings_published_at").column_desc("published_at"),
        ))
        // checkpoints
        .operation(
            CreateTable::new("checkpoints")
                .add_field(Field::new("key", FieldType::Text).primary_key())
                .add_field(Field::new("last_updated", FieldType::Text).not_null()),
        )
}
