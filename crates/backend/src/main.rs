pub mod routes;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;

    // A misconfigured policy aborts startup here
    let policy = shared::config::build_policy(&config)?;
    tracing::info!(
        "Access policy loaded: matchers {:?}, public root {}",
        policy.matchers(),
        policy.public_root()
    );

    let session = shared::config::session_settings(&config)?;
    tracing::info!("Session cookies last {} days", session.max_age_days);

    let static_dir = shared::config::get_static_dir(&config);
    tracing::info!("Serving frontend from: {}", static_dir.display());

    let state = system::access::AccessState::new(policy, session);
    let app = routes::configure_routes(state, &static_dir);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid [server] host/port")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;
    tracing::info!("Gateway listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
