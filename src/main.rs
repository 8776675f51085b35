use actix_cors::Cors;
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use freelance_backend::auth::password::hash_password;
use freelance_backend::config::Config;
use freelance_backend::create_pool;
use freelance_backend::db::users as user_db;
use freelance_backend::handlers;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let db = create_pool(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    tracing::info!("Connected to database");

    if config.run_migrations {
        Migrator::up(&db, None).await.map_err(std::io::Error::other)?;
        tracing::info!("Migrations applied");
    }

    if let Some(seed) = &config.admin {
        let admin = user_db::ensure_admin(&db, seed, hash_password(&seed.password))
            .await
            .map_err(std::io::Error::other)?;
        tracing::info!(user_id = admin.id, username = %admin.username, "Admin account ready");
    }

    let db_data = web::Data::new(db);
    let auth_data = web::Data::new(config.auth.clone());
    let pagination_data = web::Data::new(config.pagination);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(NormalizePath::trim())
            .app_data(db_data.clone())
            .app_data(auth_data.clone())
            .app_data(pagination_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
