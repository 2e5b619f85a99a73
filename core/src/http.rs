use std::time::Duration;

pub use reqwest::Client as HttpClient;
pub use reqwest::ClientBuilder as HttpClientBuilder;

pub const DEFAULT_USER_AGENT: &str = concat!("potpourri/", env!("CARGO_PKG_VERSION"));

pub fn client_builder(user_agent: &str, timeout: Duration) -> HttpClientBuilder {
    HttpClientBuilder::new()
        .user_agent(user_agent)
        .timeout(timeout)
        .gzip(true)
}
