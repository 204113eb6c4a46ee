//! Diesel schema for user accounts.

diesel::table! {
    /// User accounts, soft-deleted rows included.
    users (id) {
        /// Account identifier.
        id -> Uuid,
        /// Unique, lower-case email.
        #[max_length = 255]
        email -> Varchar,
        /// PHC password hash.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Display name.
        #[max_length = 255]
        full_name -> Varchar,
        /// Role name.
        #[max_length = 50]
        role -> Varchar,
        /// Account status.
        #[max_length = 20]
        status -> Varchar,
        /// Avatar URL.
        #[max_length = 500]
        avatar_url -> Nullable<Varchar>,
        /// Faculty.
        #[max_length = 255]
        faculty -> Nullable<Varchar>,
        /// Skills.
        #[max_length = 500]
        skills -> Nullable<Varchar>,
        /// Biography.
        about -> Nullable<Text>,
        /// Course of study.
        #[max_length = 255]
        course -> Nullable<Varchar>,
        /// `LinkedIn` URL.
        #[max_length = 500]
        linkedin_url -> Nullable<Varchar>,
        /// `GitHub` URL.
        #[max_length = 500]
        github_url -> Nullable<Varchar>,
        /// Soft-delete flag.
        is_deleted -> Bool,
        /// Token version.
        token_version -> Int4,
        /// Last sign-in time.
        last_active_at -> Nullable<Timestamptz>,
        /// Creation time.
        created_at -> Timestamptz,
    }
}
