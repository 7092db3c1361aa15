//! Example consumer: mounts the meal-forecasting read endpoints from
//! literal resource descriptors.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Or from this directory: `cargo run`

use mirante::{api_routes, common_routes, DateColumnType, MapParam, OrderRule, ResourceConfig};
use tokio::net::TcpListener;

fn resources() -> Vec<(String, ResourceConfig)> {
    vec![
        (
            "/opinion".into(),
            ResourceConfig::new("opinions", "id, created_at, value, question, \"userId\"")
                .date_column("created_at", DateColumnType::Timestamp)
                .default_order(vec![OrderRule::desc("created_at")])
                .map_params(vec![
                    MapParam::new("userId", "userId"),
                    MapParam::new("question", "question"),
                ]),
        ),
        (
            "/presences".into(),
            ResourceConfig::new("rancho_presencas_agregado", "date, unidade, meal, total")
                .date_column("date", DateColumnType::Date)
                .default_order(vec![
                    OrderRule::desc("date"),
                    OrderRule::asc("unidade"),
                    OrderRule::asc("meal"),
                ])
                .map_params(vec![
                    MapParam::new("unidade", "unidade"),
                    MapParam::new("meal", "meal"),
                ]),
        ),
        (
            "/rancho".into(),
            ResourceConfig::new("rancho_agregado", "data, unidade, refeicao, total_vai_comer")
                .date_column("data", DateColumnType::Date)
                .default_order(vec![
                    OrderRule::desc("data"),
                    OrderRule::asc("unidade"),
                    OrderRule::asc("refeicao"),
                ])
                .map_params(vec![
                    MapParam::new("unidade", "unidade"),
                    MapParam::new("refeicao", "refeicao"),
                ]),
        ),
        (
            "/wherewhowhen".into(),
            ResourceConfig::new("rancho_presencas", "user_id, date, unidade")
                .date_column("date", DateColumnType::Date)
                .default_order(vec![
                    OrderRule::desc("date"),
                    OrderRule::asc("unidade"),
                    OrderRule::asc("user_id"),
                ])
                .map_params(vec![
                    MapParam::new("user_id", "user_id"),
                    MapParam::new("unidade", "unidade"),
                    MapParam::new("meal", "meal"),
                ]),
        ),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mirante=info")),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/sisub".into());
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    let app = axum::Router::new()
        .merge(common_routes())
        .nest("/api", api_routes(pool, resources())?);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8787);
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
