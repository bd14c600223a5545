// Diesel schema for the farewatch database.
// Kept in sync with the cetane migrations under src/migrations/.

diesel::table! {
    listings (id) {
        id -> Integer,
        source -> Text,
        title -> Text,
        summary -> Text,
        destinations -> Text,
        airlines -> Text,
        url -> Text,
        published_at -> Text,
        ingested_at -> Text,
    }
}

diesel::table! {
    checkpoints (key) {
        key -> Text,
        last_updated -> Text,
    }
}

diesel::table! {
    subscribers (id) {
        id -> Text,
        email -> Text,
        notification -> Text,
        destinations -> Text,
        airlines -> Text,
        chat_id -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(checkpoints, listings, subscribers);
