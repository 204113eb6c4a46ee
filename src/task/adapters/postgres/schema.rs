//! Diesel schema for project listings.

diesel::table! {
    /// Project listings.
    tasks (id) {
        /// Listing identifier.
        id -> Uuid,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Description.
        description -> Text,
        /// Goal.
        goal -> Nullable<Text>,
        /// Work breakdown.
        key_tasks -> Nullable<Text>,
        /// Novelty statement.
        novelty -> Nullable<Text>,
        /// Required skills.
        skills_required -> Nullable<Text>,
        /// Course alignment.
        course_alignment -> Nullable<Text>,
        /// Diploma flag.
        diploma_possible -> Bool,
        /// Practice flag.
        practice_possible -> Bool,
        /// Course project flag.
        course_project_possible -> Bool,
        /// NDA flag.
        nda_required -> Bool,
        /// Comma-separated tags.
        tags -> Nullable<Text>,
        /// Status name.
        #[max_length = 20]
        status -> Varchar,
        /// Archive flag.
        is_archived -> Bool,
        /// Creator.
        created_by -> Uuid,
        /// Curator.
        curator_id -> Nullable<Uuid>,
        /// Lead mentor.
        mentor_id -> Nullable<Uuid>,
        /// Application deadline.
        deadline -> Nullable<Timestamptz>,
        /// Visibility name.
        #[max_length = 20]
        visibility -> Varchar,
        /// Creation time.
        created_at -> Timestamptz,
        /// Last update time.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Additional mentors linked to listings.
    task_mentors (id) {
        /// Link identifier.
        id -> Uuid,
        /// Listing.
        task_id -> Uuid,
        /// Mentor.
        mentor_id -> Uuid,
    }
}

diesel::joinable!(task_mentors -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_mentors);
