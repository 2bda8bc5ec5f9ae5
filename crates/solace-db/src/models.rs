/// Row of the `users` table. `password` is the PHC hash string and must
/// not leave the auth layer.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

/// `users` row without the hash, as returned by insert and id lookups.
#[derive(Debug, Clone)]
pub struct PublicUserRow {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}
