pub mod categories;
pub mod projects;
pub mod sample_works;
pub mod skills;
pub mod users;

use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection, DbErr};

/// Create a SeaORM database connection pool for the given URL.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);
    Database::connect(options).await
}

/// `LOWER(col) LIKE '%needle%' ESCAPE '\'`, the same on Postgres and SQLite.
/// Wildcards in the needle match literally.
pub(crate) fn icontains<C: ColumnTrait + 'static>(col: C, needle: &str) -> Condition {
    let pattern = format!("%{}%", escape_like_pattern(&needle.to_lowercase()));
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\')),
    )
}

fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
