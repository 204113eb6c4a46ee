//! Diesel schema for portfolio entries.

diesel::table! {
    /// Generated portfolio entries, one per assignment.
    portfolio_entries (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Owner.
        student_id -> Uuid,
        /// Project.
        task_id -> Uuid,
        /// Source assignment.
        assignment_id -> Uuid,
        /// Rendered summary.
        summary -> Text,
        /// Generation time.
        created_at -> Timestamptz,
    }
}
