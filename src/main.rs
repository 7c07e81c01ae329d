use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use usermanager_api::{
    config::Config,
    controllers::groups::GroupController,
    db,
    middleware::auth::JwtSecret,
    routes::{self, UrlGenerator},
    services::{
        events::BroadcastEventSink,
        groups::PgGroupRepository,
        menu::AdminMenus,
        permissions::PgPermissionRepository,
        users::PgUserRepository,
        view::HtmlShellRenderer,
    },
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    let urls = UrlGenerator::new(config.admin_prefix.clone());
    let controller = GroupController::new(
        Arc::new(PgGroupRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgPermissionRepository::new(pool.clone())),
        Arc::new(BroadcastEventSink::new()),
        Arc::new(AdminMenus::new(&urls)),
        urls,
    );

    let state = AppState {
        controller: Arc::new(controller),
        views: Arc::new(HtmlShellRenderer::new(config.app_name.clone())),
    };

    let app = Router::new()
        .merge(routes::router(state, &config.admin_prefix))
        .merge(routes::health::router(pool))
        .route("/metrics", get(routes::metrics::metrics_handler))
        .layer(axum::Extension(JwtSecret(config.jwt_secret.clone())))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    info!("usermanager admin listening on {}{}", addr, config.admin_prefix);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
