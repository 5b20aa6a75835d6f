//! Diesel schema for task persistence.

diesel::table! {
    /// User-owned task rows.
    todo_task (id) {
        /// Store-generated task identifier.
        id -> Int8,
        /// Owning caller.
        user_id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free text.
        description -> Nullable<Text>,
        /// Start of the task window.
        start_date -> Timestamptz,
        /// End of the task window.
        end_date -> Timestamptz,
        /// Stored state, `IN_PROGRESS` or `COMPLETED`.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_on -> Timestamptz,
    }
}
