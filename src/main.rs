mod config;
mod entities;
mod enrichment;
mod handlers;
mod middleware;
mod models;
mod routes;
mod seeders;
mod services;
mod utils;

use std::net::SocketAddr;

use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use config::{AppState, Config};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let cfg = Config::init();
    println!("🚀 Starting NewsHub Backend...");

    // 1. Database Connection
    println!("📡 Connecting to Database...");
    let db = Database::connect(&cfg.database_url)
        .await
        .expect("🔥 Failed to connect to Database!");
    println!("✅ Database Connected!");

    // 2. Schema Migrations
    println!("🧱 Running Migrations...");
    Migrator::up(&db, None)
        .await
        .expect("🔥 Migrations failed!");

    // 3. Database Seeding
    println!("🌱 Running Seeders...");
    if let Err(e) = seeders::run_seeders(&db).await {
        tracing::error!("❌ Seeding failed: {}", e);
    } else {
        println!("✅ Seeding Successful!");
    }

    // 4. Object Storage Client
    let s3_service = services::s3_service::S3Service::new(cfg.clone()).await;

    // 5. Build App State
    let rate_limiter = std::sync::Arc::new(middleware::rate_limiter::RateLimiter::new(
        100,
        std::time::Duration::from_secs(60),
    ));

    let state = AppState {
        db,
        config: cfg.clone(),
        s3_service,
        rate_limiter,
    };

    // 6. Initialize Router
    let app = routes::create_routes(state.clone()).with_state(state);

    // 7. Start Server
    let addr_str = format!("{}:{}", cfg.server_host, cfg.server_port);
    let addr: SocketAddr = addr_str.parse().expect("Invalid address");

    println!("🎯 Server ready! Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
