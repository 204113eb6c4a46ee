//! Diesel schema for audit entries.

diesel::table! {
    /// Append-only audit log.
    audit_logs (id) {
        id -> Uuid,
        actor_id -> Nullable<Uuid>,
        #[max_length = 100]
        action -> Varchar,
        #[max_length = 50]
        entity_kind -> Varchar,
        entity_id -> Uuid,
        metadata -> Jsonb,
        created_at -> Timestamptz,
    }
}
