pub mod categories;
pub mod projects;
pub mod sample_works;
pub mod skills;
pub mod users;

use serde::Deserialize;

/// `?user_id=` on `PUT`/`DELETE /api/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<i32>,
}
