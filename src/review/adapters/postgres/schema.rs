//! Diesel schema for reviews.

diesel::table! {
    /// Reviews, at most one per assignment.
    reviews (id) {
        /// Review identifier.
        id -> Uuid,
        /// Reviewed assignment.
        assignment_id -> Uuid,
        /// Reviewed student.
        student_id -> Uuid,
        /// Project.
        task_id -> Uuid,
        /// Reviewer.
        mentor_id -> Uuid,
        /// Star rating.
        rating -> Int2,
        /// Feedback.
        comment -> Nullable<Text>,
        /// Submission time.
        created_at -> Timestamptz,
    }
}
