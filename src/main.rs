use axum::{
    Router,
    routing::{delete, get, post, put},
    middleware::from_fn_with_state,
};

use std::net::SocketAddr;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod state;
mod db;
mod metrics;

mod models {
    pub mod user;
    pub mod meal;
    pub mod session;
}

mod repositories {
    pub mod user;
    pub mod meal;
}

mod services {
    pub mod users;
    pub mod meals;
}

mod handlers {
    pub mod users;
    pub mod meals;
}

mod middleware_layer {
    pub mod session;
}

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    let app = Router::new()
        .route("/users", post(handlers::users::create_user))
        .route("/users", get(handlers::users::list_users))
        .route("/meals", post(handlers::meals::create_meal))
        .route("/meals", get(handlers::meals::list_meals))
        .route("/meals/metrics", get(handlers::meals::meal_metrics))
        .route("/meals/{meal_id}", get(handlers::meals::get_meal))
        .route("/meals/{meal_id}", put(handlers::meals::update_meal))
        .route("/meals/{meal_id}", delete(handlers::meals::delete_meal))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::session::resolve_session,
        ))
        .with_state(state.clone())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
