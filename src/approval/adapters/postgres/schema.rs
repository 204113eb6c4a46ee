//! Diesel schema for credit requests.

diesel::table! {
    /// Credit requests.
    approvals (id) {
        /// Request identifier.
        id -> Uuid,
        /// Listing.
        task_id -> Uuid,
        /// Credit kind.
        #[max_length = 20]
        kind -> Varchar,
        /// Review state.
        #[max_length = 20]
        state -> Varchar,
        /// Requesting student.
        requested_by -> Uuid,
        /// Last reviewer.
        reviewer_id -> Nullable<Uuid>,
        /// Latest comment.
        comment -> Nullable<Text>,
        /// Creation time.
        created_at -> Timestamptz,
        /// Last update time.
        updated_at -> Timestamptz,
    }
}
