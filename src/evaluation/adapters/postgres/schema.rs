//! Diesel schema for evaluation persistence.

diesel::table! {
    /// Evaluation records, one per `(application, round)` pair.
    evaluations (id) {
        /// Evaluation identifier.
        id -> Uuid,
        /// Owning application identifier.
        application_id -> Uuid,
        /// Round the attempt belongs to.
        round_id -> Uuid,
        /// Persisted status.
        #[max_length = 50]
        status -> Varchar,
        /// Booked session start, if any.
        scheduled_at -> Nullable<Timestamptz>,
        /// Booked session duration in minutes, if any.
        duration_minutes -> Nullable<Int4>,
        /// Assigned interviewer payload, if any.
        interviewer -> Nullable<Jsonb>,
        /// Session mode payload, if any.
        mode -> Nullable<Jsonb>,
        /// Recorded score, if any.
        score -> Nullable<Int4>,
        /// Recorded feedback, if any.
        feedback -> Nullable<Text>,
        /// Finality flag.
        is_final -> Bool,
        /// Append-only audit trail payload.
        history -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Optimistic-concurrency version.
        version -> Int8,
    }
}
