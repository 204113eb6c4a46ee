//! Diesel schema for discussion entries.

diesel::table! {
    /// Comments and questions.
    comments (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Listing.
        task_id -> Uuid,
        /// Author.
        author_id -> Uuid,
        /// Text.
        body -> Text,
        /// Privacy flag.
        is_private -> Bool,
        /// Addressee.
        recipient_id -> Nullable<Uuid>,
        /// Meeting details.
        meeting_info -> Nullable<Text>,
        /// Creation time.
        created_at -> Timestamptz,
    }
}
