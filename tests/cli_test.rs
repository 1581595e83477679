mod common;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("carrent"));
    cmd.env_remove("CARRENT_API_URL").env_remove("RUST_LOG");
    cmd
}

fn mock_api() -> MockServer {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/filters/");
        then.status(200).json_body(common::filters_json());
    });
    server.mock(|when, then| {
        when.method(GET).path("/cars/");
        then.status(200).json_body(common::cars_json());
    });
    server
}

#[test]
fn top_level_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Search, filter and book rental cars from the terminal",
        ))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("locations"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn top_level_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("carrent 0.1.0"));
}

#[test]
fn search_help_lists_filters() {
    cmd()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-p, --pickup <LOCATION>"))
        .stdout(predicate::str::contains("--car-type <TYPE,...>"))
        .stdout(predicate::str::contains("--free-cancellation"))
        .stdout(predicate::str::contains("--sort <ORDER>"))
        .stdout(predicate::str::contains("--api-url <URL>"));
}

#[test]
fn search_url_prints_route_without_fetching() {
    cmd()
        .args([
            "search",
            "--pickup",
            "Bellagio Resort",
            "--pickup-date",
            "2026-03-01",
            "--url",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "/search?pickup_location=Bellagio+Resort&pickup_date=2026-03-01&dropoff_date=2026-03-06",
        ));
}

#[test]
fn search_url_merges_flags_over_route() {
    cmd()
        .args([
            "search",
            "--route",
            "/search?pickup_location=Luxor+Hotel&page=3",
            "--fuel",
            "Electric",
            "--url",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "/search?pickup_location=Luxor+Hotel&fuel=Electric",
        ));
}

#[test]
fn missing_pickup_is_rejected() {
    cmd()
        .args(["search", "--url"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Please enter a pickup location"));
}

#[test]
fn unknown_sort_is_rejected() {
    cmd()
        .args(["search", "--pickup", "Luxor Hotel", "--sort", "cheapest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid sort order"));
}

#[test]
fn bad_date_is_rejected() {
    cmd()
        .args(["search", "--pickup", "Luxor Hotel", "--pickup-date", "03/01/2026"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn page_zero_is_rejected() {
    cmd()
        .args(["search", "--pickup", "Luxor Hotel", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid page"));
}

#[test]
fn json_mode_reports_errors_as_json() {
    cmd()
        .args(["search", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"kind\":\"validation_error\""));
}

#[test]
fn locations_are_suggested() {
    cmd()
        .args(["locations", "bellagio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bellagio Resort"));
}

#[test]
fn unknown_location_text() {
    cmd()
        .args(["locations", "zzzz-nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No locations found"));
}

#[test]
fn unreachable_api_exits_with_network_code() {
    cmd()
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "--timeout",
            "5",
            "search",
            "--pickup",
            "Luxor Hotel",
        ])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn search_renders_results_table() {
    let server = mock_api();
    cmd()
        .args(["--api-url", &server.base_url(), "search", "--pickup", "Luxor Hotel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 cars found"))
        .stdout(predicate::str::contains("Jeep Wrangler"))
        .stdout(predicate::str::contains("₹1,500"));
}

#[test]
fn search_json_output() {
    let server = mock_api();
    cmd()
        .args([
            "--api-url",
            &server.base_url(),
            "search",
            "--pickup",
            "Luxor Hotel",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_pages\":1"))
        .stdout(predicate::str::contains("\"name\":\"Jeep Wrangler\""));
}

#[test]
fn filters_command_shows_vocabulary() {
    let server = mock_api();
    cmd()
        .args(["--api-url", &server.base_url(), "filters"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rental Agencies"))
        .stdout(predicate::str::contains("Hertz"));
}

#[test]
fn book_runs_checkout_to_confirmation() {
    let server = mock_api();
    cmd()
        .args([
            "--api-url",
            &server.base_url(),
            "book",
            "--pickup",
            "Luxor Hotel",
            "--pick",
            "1",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--email",
            "ada@example.com",
            "--phone",
            "5550100",
            "--address",
            "1 Main St",
            "--city",
            "Las Vegas",
            "--country",
            "United States",
            "--card-number",
            "4242424242424242",
            "--card-name",
            "Ada Lovelace",
            "--expiry-month",
            "12",
            "--expiry-year",
            "29",
            "--cvv",
            "123",
            "--delay-ms",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rs 7,500"))
        .stdout(predicate::str::contains("Payment Successful!"))
        .stdout(predicate::str::contains("/payment/success?booking_id=BK-"));
}

#[test]
fn book_with_missing_contact_field_fails() {
    let server = mock_api();
    cmd()
        .args([
            "--api-url",
            &server.base_url(),
            "book",
            "--pickup",
            "Luxor Hotel",
            "--pick",
            "1",
            "--first-name",
            "Ada",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("missing required field: last_name"));
}

#[test]
fn book_pick_out_of_range() {
    let server = mock_api();
    cmd()
        .args([
            "--api-url",
            &server.base_url(),
            "book",
            "--pickup",
            "Luxor Hotel",
            "--pick",
            "5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn search_renders_rows_with_null_columns() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/filters/");
        then.status(200).json_body(common::filters_json());
    });
    server.mock(|when, then| {
        when.method(GET).path("/cars/");
        then.status(200).json_body(common::backend_cars_json());
    });
    cmd()
        .args(["--api-url", &server.base_url(), "search", "--pickup", "Gilespie"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chevrolet Spark"))
        .stdout(predicate::str::contains("Tesla Model 3"));
}

#[test]
fn page_past_the_end_reports_invalid_page() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/filters/");
        then.status(200).json_body(common::filters_json());
    });
    server.mock(|when, then| {
        when.method(GET).path("/cars/").query_param("page", "5");
        then.status(200).json_body(serde_json::json!({
            "page": 5,
            "limit": 12,
            "count": 14,
            "total_pages": 2,
            "results": []
        }));
    });
    cmd()
        .args([
            "--api-url",
            &server.base_url(),
            "search",
            "--pickup",
            "Luxor Hotel",
            "--page",
            "5",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid page 5"))
        .stdout(predicate::str::contains("No cars found").not());
}
