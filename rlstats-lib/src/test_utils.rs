use std::time::Duration;

use url::Url;

use crate::{Client, ClientBuilder};

#[macro_export]
/// Creates a mock web server, which responds to every request with a
/// predefined status (plus any further `ResponseTemplate` tweaks)
macro_rules! mock_server {
    ($status:expr $(, $func:tt ($($arg:expr),*))*) => {{
        let mock_server = wiremock::MockServer::start().await;
        let response_template = wiremock::ResponseTemplate::new(http::StatusCode::from($status));
        let template = response_template$(.$func($($arg),*))*;
        wiremock::Mock::given(wiremock::matchers::any()).respond_with(template).mount(&mock_server).await;
        mock_server
    }};
}

/// A client pointed at a mock server, with short timings so tests stay
/// fast
pub(crate) fn test_client(api_root: &str) -> Client {
    ClientBuilder::builder()
        .api_key("test-key")
        .api_root(Url::parse(api_root).expect("mock server URI is a valid URL"))
        .timeout(Duration::from_secs(2))
        .min_request_interval(Duration::from_millis(20))
        .build()
        .client()
        .expect("test client builds")
}
