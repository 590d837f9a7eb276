use tokio::signal;

/// Resolves on Ctrl+C so axum can drain and drop the app state, which tears
/// down every pending toast and loader timer.
pub async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        crate::error::log_error(&e);
        // no handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }

    #[cfg(not(windows))]
    println!();
    tracing::info!("Ctrl+C received, shutting down.");
}
