mod common;

use carrent::error::RentalError;
use carrent::fetch::{ApiClient, FetchOptions};
use carrent::filters::{FilterChange, MultiSelect, SearchFilters, SortBy};
use carrent::session::SearchSession;
use httpmock::prelude::*;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&FetchOptions {
        base_url: server.base_url(),
        timeout: 5,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn trailing_slash_is_trimmed() {
    let client = ApiClient::new(&FetchOptions {
        base_url: "http://127.0.0.1:8000/".into(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(client.base_url(), "http://127.0.0.1:8000");
}

#[tokio::test]
async fn fetch_cars_sends_first_page_by_default() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cars/")
                .query_param("page", "1")
                .query_param("limit", "12");
            then.status(200).json_body(common::cars_json());
        })
        .await;

    let response = client(&server)
        .fetch_cars(&SearchFilters::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.count, 1);
    assert_eq!(response.results[0].car.name, "Jeep Wrangler");
    assert_eq!(response.results[0].car.car_type, "SUV");
    assert_eq!(response.results[0].agency.code, None);
    assert_eq!(response.results[0].price, 1500.0);
}

#[tokio::test]
async fn fetch_cars_sends_active_filters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cars/")
                .query_param("car_type", "SUV,Sedan")
                .query_param("min_price", "0")
                .query_param("unlimited_mileage", "true")
                .query_param("sort_by", "price_desc")
                .query_param("pickup_location", "Luxor Hotel");
            then.status(200).json_body(common::cars_json());
        })
        .await;

    let filters = SearchFilters {
        car_type: vec!["SUV".into(), "Sedan".into()],
        min_price: Some(0.0),
        unlimited_mileage: true,
        sort_by: Some(SortBy::PriceDesc),
        pickup_location: Some("Luxor Hotel".into()),
        ..Default::default()
    };
    client(&server).fetch_cars(&filters).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_cars_accepts_rows_with_null_columns() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/cars/");
            then.status(200).json_body(common::backend_cars_json());
        })
        .await;

    let response = client(&server)
        .fetch_cars(&SearchFilters::default())
        .await
        .unwrap();

    assert_eq!(response.results.len(), 2);
    let spark = &response.results[0];
    assert_eq!(spark.car.image, None);
    assert_eq!(spark.car.sipp.as_deref(), Some("MBMR"));
    assert_eq!(spark.agency.logo, None);
    assert_eq!(spark.provider.logo, None);
    assert_eq!(spark.fuel_policy, None);
    assert_eq!(spark.latitude, Some(36.060839));
    assert_eq!(response.results[1].fuel_policy.as_deref(), Some("Full to Full"));
}

#[tokio::test]
async fn fetch_filters_decodes_vocabulary() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/filters/");
            then.status(200).json_body(common::filters_json());
        })
        .await;

    let vocab = client(&server).fetch_filters().await.unwrap();
    assert_eq!(vocab.car_types, vec!["SUV".to_string(), "Sedan".to_string()]);
    assert_eq!(vocab.agencies[0].code.as_deref(), Some("ZE"));
    assert_eq!(vocab.price_range.min, 900.0);
}

#[tokio::test]
async fn server_error_maps_to_http_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/cars/");
            then.status(500).body("boom");
        })
        .await;

    let err = client(&server)
        .fetch_cars(&SearchFilters::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RentalError::HttpStatus(500)));
}

#[tokio::test]
async fn malformed_body_maps_to_decode() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/filters/");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let err = client(&server).fetch_filters().await.unwrap_err();
    assert!(matches!(err, RentalError::Decode(_)));
}

#[tokio::test]
async fn unreachable_api_is_a_connection_error() {
    let client = ApiClient::new(&FetchOptions {
        base_url: "http://127.0.0.1:9".into(),
        timeout: 5,
        ..Default::default()
    })
    .unwrap();
    let err = client.fetch_filters().await.unwrap_err();
    assert!(matches!(
        err,
        RentalError::ConnectionFailed(_) | RentalError::Timeout
    ));
}

#[tokio::test]
async fn session_load_fetches_vocabulary_then_listings() {
    let server = MockServer::start_async().await;
    let filters_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/filters/");
            then.status(200).json_body(common::filters_json());
        })
        .await;
    let cars_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/cars/").query_param("page", "1");
            then.status(200).json_body(common::cars_json());
        })
        .await;

    let client = client(&server);
    let mut session = SearchSession::new(SearchFilters::default());
    session.load(&client).await.unwrap();

    filters_mock.assert_async().await;
    cars_mock.assert_async().await;
    assert!(session.vocabulary().is_some());
    assert_eq!(session.results().map(|r| r.count), Some(1));

    let ticket = session
        .change(FilterChange::Toggle(MultiSelect::Fuel, "Electric".into()))
        .unwrap();
    assert!(session.run(&client, ticket).await);
}

#[tokio::test]
async fn failed_vocabulary_issues_no_listing_request() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/filters/");
            then.status(503);
        })
        .await;
    let cars_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/cars/");
            then.status(200).json_body(common::cars_json());
        })
        .await;

    let err = carrent::search(&client(&server), SearchFilters::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RentalError::HttpStatus(503)));
    cars_mock.assert_hits_async(0).await;
}
