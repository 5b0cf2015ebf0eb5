//! HTTP-level tests for the search resolver and the two price providers,
//! driven through a local mock server. The inline unit tests cover the
//! failover policy at the trait level; these cover the wire formats and
//! the status/malformed-body failure paths.

use std::sync::Arc;
use std::time::Duration;

use coinquote_market_data::{
    AssetRef, AssetResolver, CoinGeckoPrice, CoinGeckoSearch, CryptoComparePrice, LookupError,
    PriceFetcher, PriceSource,
};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bitcoin() -> AssetRef {
    AssetRef {
        id: "bitcoin".to_string(),
        display_name: "Bitcoin".to_string(),
        symbol: "btc".to_string(),
    }
}

#[tokio::test]
async fn resolver_takes_first_search_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "bit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coins": [
                { "id": "bitcoin", "name": "Bitcoin", "symbol": "BTC" },
                { "id": "bitcoin-cash", "name": "Bitcoin Cash", "symbol": "BCH" }
            ]
        })))
        .mount(&server)
        .await;

    let resolver = CoinGeckoSearch::with_base_url(server.uri());
    let asset = resolver.resolve("bit").await.unwrap();

    assert_eq!(asset.id, "bitcoin");
    assert_eq!(asset.display_name, "Bitcoin");
    assert_eq!(asset.ticker(), "BTC");
}

#[tokio::test]
async fn resolver_maps_empty_list_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "coins": [] })))
        .mount(&server)
        .await;

    let resolver = CoinGeckoSearch::with_base_url(server.uri());
    let err = resolver.resolve("zzzznotacoin").await.unwrap_err();

    match err {
        LookupError::NotFound(query) => assert_eq!(query, "zzzznotacoin"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn resolver_maps_server_error_to_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let resolver = CoinGeckoSearch::with_base_url(server.uri());
    let err = resolver.resolve("btc").await.unwrap_err();

    assert!(matches!(err, LookupError::Upstream { .. }));
}

#[tokio::test]
async fn primary_parses_nested_price_map() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "bitcoin"))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bitcoin": { "usd": 43125.5 }
        })))
        .mount(&server)
        .await;

    let provider = CoinGeckoPrice::with_base_url(server.uri());
    let fetcher = PriceFetcher::new(
        Arc::new(provider),
        Arc::new(CryptoComparePrice::with_base_url("http://127.0.0.1:9")),
    );

    let result = fetcher.fetch(&bitcoin()).await.unwrap();

    assert_eq!(result.amount, dec!(43125.5));
    assert_eq!(result.source, PriceSource::Primary);
}

#[tokio::test]
async fn missing_usd_field_falls_back_to_secondary() {
    let server = MockServer::start().await;
    // 200 from the primary, but no usable USD value: still a fallback.
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bitcoin": {} })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/price"))
        .and(query_param("fsym", "BTC"))
        .and(query_param("tsyms", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "USD": 43120.0 })))
        .mount(&server)
        .await;

    let fetcher = PriceFetcher::new(
        Arc::new(CoinGeckoPrice::with_base_url(server.uri())),
        Arc::new(CryptoComparePrice::with_base_url(server.uri())),
    );

    let result = fetcher.fetch(&bitcoin()).await.unwrap();

    assert_eq!(result.amount, dec!(43120));
    assert_eq!(result.source, PriceSource::Secondary);
}

#[tokio::test]
async fn malformed_primary_body_falls_back_to_secondary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "USD": 1.25 })))
        .mount(&server)
        .await;

    let fetcher = PriceFetcher::new(
        Arc::new(CoinGeckoPrice::with_base_url(server.uri())),
        Arc::new(CryptoComparePrice::with_base_url(server.uri())),
    );

    let result = fetcher.fetch(&bitcoin()).await.unwrap();

    assert_eq!(result.source, PriceSource::Secondary);
}

#[tokio::test]
async fn slow_primary_times_out_and_falls_back_to_secondary() {
    let server = MockServer::start().await;
    // Primary answers correctly, but only after the configured timeout
    // has elapsed: the fetcher must not wait for it.
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "bitcoin": { "usd": 43125.5 } })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "USD": 43120.0 })))
        .mount(&server)
        .await;

    let fetcher = PriceFetcher::new(
        Arc::new(CoinGeckoPrice::with_base_url_and_timeout(
            server.uri(),
            Duration::from_millis(50),
        )),
        Arc::new(CryptoComparePrice::with_base_url(server.uri())),
    );

    let result = fetcher.fetch(&bitcoin()).await.unwrap();

    assert_eq!(result.amount, dec!(43120));
    assert_eq!(result.source, PriceSource::Secondary);
}

#[tokio::test]
async fn unknown_symbol_error_envelope_counts_as_secondary_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // CryptoCompare reports unknown symbols as 200 + error envelope.
    Mock::given(method("GET"))
        .and(path("/data/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "Error",
            "Message": "fsym is not a valid symbol"
        })))
        .mount(&server)
        .await;

    let fetcher = PriceFetcher::new(
        Arc::new(CoinGeckoPrice::with_base_url(server.uri())),
        Arc::new(CryptoComparePrice::with_base_url(server.uri())),
    );

    let err = fetcher.fetch(&bitcoin()).await.unwrap_err();

    assert!(matches!(err, LookupError::AllProvidersFailed { .. }));
}
