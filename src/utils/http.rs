use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client")
});

/// Shared connection pool. Per-request timeouts are set at the call site;
/// this default only bounds calls that forget to.
pub fn get_http_client() -> &'static Client {
    &HTTP_CLIENT
}
