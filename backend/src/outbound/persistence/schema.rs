//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `email` carries a unique constraint.
    users (id) {
        id -> Uuid,
        name -> Text,
        /// Login email, unique as given.
        email -> Text,
        /// bcrypt hash; never leaves the persistence layer except for login.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vehicle listings.
    vehicles (id) {
        id -> Uuid,
        brand -> Text,
        model -> Text,
        year -> Int4,
        color -> Text,
        price -> Float8,
        /// `FOR_SALE` or `SOLD`.
        status -> Text,
        /// Set together with `status = 'SOLD'`.
        buyer_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
