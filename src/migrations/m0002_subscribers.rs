use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new("0002_subscribers")
        .depends_on(&["0001_initial_schema"])
        .operation(
            CreateTable::new("subscribers")
                .add_field(Field::new("id", FieldType::Text).primary_key())
                .add_field(Field::new("email", FieldType::Text).not_null())
                .add_field(
                    Field::new("notification", FieldType::Text)
                        .not_null()
                        .default("'off'"),
                )
                .add_field(
                    Field::new("destinations", FieldType::Text)
                        .not_null()
                        .default("'[]'"),
                )
                .add_field(
                    Field::new("airlines", FieldType::Text)
                        .not_null()
                        .default("'[]'"),
                )
                .add_field(Field::new("chat_id", FieldType::Text))
                .add_field(Field::new("created_at", FieldType::Text).not_null())
                .add_field(Field::new("updated_at", FieldType::Text).not_null()),
        )
        .operation(AddIndex::new(
            "subscribers",
            Index::new("idx_subscribers_email").column("email").unique(),
        ))
        .operation(AddIndex::new(
            "subscribers",
            Index::new("idx_subscribers_notification").column("notification"),
        ))
}
