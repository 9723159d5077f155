//! Diesel schema for round catalog persistence.

diesel::table! {
    /// Interview round records scoped to a job.
    rounds (id) {
        /// Round identifier.
        id -> Uuid,
        /// Owning job identifier.
        job_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Sort order within the job.
        sort_order -> Int4,
        /// Assessment type.
        #[max_length = 50]
        round_type -> Varchar,
        /// Scheduling template payload (duration and mode).
        template -> Jsonb,
        /// Archival flag.
        is_archived -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
