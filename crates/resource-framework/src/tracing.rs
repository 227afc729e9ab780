/// Initializes the tracing/logging infrastructure for the application.
///
/// This sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG` environment variable
/// - **Span tracking**: `ResourceService` operations open a span carrying the resource name
///
/// # Environment Variables
///
/// - `RUST_LOG=info` - lifecycle outcomes (Created, Updated, Deleted, rejections)
/// - `RUST_LOG=debug` - every request, with payloads
/// - `RUST_LOG=resource_framework=debug` - store actor traffic only
///
/// Calling it twice is harmless; the second call keeps the first subscriber and
/// reports that through it at `warn`.
pub fn setup_tracing() {
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
    {
        tracing::warn!(error = %e, "Tracing already initialized");
    }
}
