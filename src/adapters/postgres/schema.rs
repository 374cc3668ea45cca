//! Diesel schema for task collection persistence.

diesel::table! {
    /// Task records in canonical field naming.
    tasks (id) {
        /// Task identifier assigned on creation.
        id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Priority level (`low`, `medium`, `high`).
        #[max_length = 20]
        priority -> Varchar,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Completion timestamp, set while the task is completed.
        completed_at -> Nullable<Timestamptz>,
        /// Display sequence value.
        sort_order -> Int8,
    }
}
