mod pages;
mod routes;
mod services;
mod state;
mod supabase;

use services::access_code::EmptyCodePolicy;
use supabase::{SupabaseConfig, Transport};

#[tokio::main]
async fn main() {
    // A missing .env is normal in deployed environments.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let config = SupabaseConfig::from_env().expect("SUPABASE_URL and SUPABASE_ANON_KEY required");
    tracing::info!(url = %config.url, request_timeout_secs = config.timeouts.request_secs, "backend configured");
    let transport = Transport::new(config).expect("http client init failed");

    let empty_code_policy = EmptyCodePolicy::from_env();
    let cookie_secure = routes::auth::cookie_secure();
    let state = state::AppState::new(transport, empty_code_policy, cookie_secure);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, ?empty_code_policy, cookie_secure, "arena site listening");
    axum::serve(listener, app).await.expect("server failed");
}
