//! Diesel schema for application pipeline persistence.

diesel::table! {
    /// Candidate application records.
    applications (id) {
        /// Application identifier.
        id -> Uuid,
        /// Owning job identifier.
        job_id -> Uuid,
        /// Pipeline status.
        #[max_length = 50]
        status -> Varchar,
        /// Current-round pointer, set while under review.
        current_round_id -> Nullable<Uuid>,
        /// Free-text notes.
        notes -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Optimistic-concurrency version.
        version -> Int8,
    }
}
