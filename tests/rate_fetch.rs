use fxrate::config::ApiVersion;
use fxrate::currency_provider::CurrencyRateProvider;
use fxrate::error::RateError;
use fxrate::providers::exchange_rate_api::ExchangeRateApiProvider;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(source: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/latest/{source}");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

#[test_log::test(tokio::test)]
async fn v4_flow_against_mock() {
    let mock_response = r#"{
        "base": "GBP",
        "date": "2024-05-01",
        "time_last_updated": 1714521601,
        "rates": {"USD": 1.2512, "EUR": 1.1702, "INR": 104.31}
    }"#;
    let mock_server = test_utils::create_mock_server("GBP", mock_response).await;

    let provider = ExchangeRateApiProvider::with_base_url(&mock_server.uri(), ApiVersion::V4);
    let rate = provider
        .get_rate("GBP", "INR")
        .await
        .expect("rate lookup failed");

    info!(?rate, "Received v4 conversion rate");
    assert_eq!(rate, 104.31);
}

#[test_log::test(tokio::test)]
async fn v6_flow_against_mock() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // The v6 key rides in the URL path, so the mock mounts under the key.
    let mock_server = MockServer::start().await;
    let mock_response = r#"{
        "result": "success",
        "base_code": "EUR",
        "time_last_update_unix": 1714521601,
        "time_last_update_utc": "Wed, 01 May 2024 00:00:01 +0000",
        "time_next_update_unix": 1714608001,
        "time_next_update_utc": "Thu, 02 May 2024 00:00:01 +0000",
        "conversion_rates": {"USD": 1.0812, "GBP": 0.8546}
    }"#;

    Mock::given(method("GET"))
        .and(path("/v6/integration-key/latest/EUR"))
        .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/v6/integration-key", mock_server.uri());
    let provider = ExchangeRateApiProvider::with_base_url(&base_url, ApiVersion::V6);
    let rate = provider
        .get_rate("EUR", "USD")
        .await
        .expect("rate lookup failed");

    info!(?rate, "Received v6 conversion rate");
    assert_eq!(rate, 1.0812);
}

#[test_log::test(tokio::test)]
async fn provider_is_usable_through_the_trait_object() {
    let mock_response = r#"{"base":"GBP","rates":{"USD":1.25}}"#;
    let mock_server = test_utils::create_mock_server("GBP", mock_response).await;

    let provider: Box<dyn CurrencyRateProvider> = Box::new(
        ExchangeRateApiProvider::with_base_url(&mock_server.uri(), ApiVersion::V4),
    );
    let rate = provider
        .get_rate("GBP", "USD")
        .await
        .expect("rate lookup failed");
    assert_eq!(rate, 1.25);
}

#[test_log::test(tokio::test)]
async fn upstream_failure_surfaces_as_a_tagged_error() {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let provider = ExchangeRateApiProvider::with_base_url(&mock_server.uri(), ApiVersion::V4);
    let result = provider.get_rate("GBP", "USD").await;

    assert!(matches!(
        result,
        Err(RateError::UpstreamStatus { status, .. }) if status.as_u16() == 503
    ));
}
