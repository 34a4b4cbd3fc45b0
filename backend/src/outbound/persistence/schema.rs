//! Diesel table definitions.
//!
//! Kept in step with `backend/migrations` by hand.

diesel::table! {
    homework_sessions (id) {
        id -> Uuid,
        user_id -> Uuid,
        question_text -> Nullable<Text>,
        question_image_url -> Nullable<Text>,
        solution -> Text,
        created_at -> Timestamptz,
    }
}
