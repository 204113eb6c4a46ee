//! Diesel schema for student applications.

diesel::table! {
    /// Applications, one per listing and student.
    assignments (id) {
        /// Assignment identifier.
        id -> Uuid,
        /// Listing.
        task_id -> Uuid,
        /// Applicant.
        student_id -> Uuid,
        /// Lifecycle state.
        #[max_length = 20]
        state -> Varchar,
        /// NDA acceptance.
        nda_accepted -> Bool,
        /// Team role.
        #[max_length = 100]
        team_role -> Nullable<Varchar>,
        /// Decision time.
        decision_at -> Nullable<Timestamptz>,
        /// Deciding staff member.
        decision_by -> Nullable<Uuid>,
        /// Decision reason.
        #[max_length = 500]
        decision_reason -> Nullable<Varchar>,
        /// Creation time.
        created_at -> Timestamptz,
        /// Last update time.
        updated_at -> Timestamptz,
    }
}
