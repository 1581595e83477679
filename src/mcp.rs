use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;

use crate::booking::BookingDraft;
use crate::error::RentalError;
use crate::fetch::{ApiClient, FetchOptions};
use crate::filters::{split_list, SearchFilters, SortBy};
use crate::locations;
use crate::route::Route;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
struct SearchArgs {
    #[schemars(description = "Pickup location name or address keywords. Example: Bellagio Resort")]
    pickup_location: Option<String>,
    #[schemars(description = "Dropoff location, if different from pickup")]
    dropoff_location: Option<String>,
    #[schemars(description = "Car types, comma-separated. Example: SUV,Sedan")]
    car_type: Option<String>,
    #[schemars(description = "Categories, comma-separated. Example: Economy,Compact")]
    category: Option<String>,
    #[schemars(description = "Fuel types, comma-separated. Example: Petrol,Electric")]
    fuel: Option<String>,
    #[schemars(description = "Rental agency names, comma-separated. Example: Hertz,Avis")]
    agency: Option<String>,
    #[schemars(description = "Minimum price per day. 0 is a valid bound")]
    min_price: Option<f64>,
    #[schemars(description = "Maximum price per day")]
    max_price: Option<f64>,
    #[schemars(description = "Only offers with free cancellation")]
    free_cancellation: Option<bool>,
    #[schemars(description = "Only offers with unlimited mileage")]
    unlimited_mileage: Option<bool>,
    #[schemars(description = "One of: price_asc, price_desc, rating, name. Omit for recommended")]
    sort_by: Option<String>,
    #[schemars(description = "Results page, 1-based. Default: 1")]
    page: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct LocationArgs {
    #[schemars(description = "Text typed into the location box. Omit to list every location")]
    query: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct BookingArgs {
    #[serde(flatten)]
    search: SearchArgs,
    #[schemars(description = "1-based position of the car in the results page")]
    index: usize,
}

fn build_filters(args: &SearchArgs) -> Result<SearchFilters, RentalError> {
    let sort_by = match args.sort_by.as_deref() {
        Some(s) => SortBy::from_str_loose(s)?,
        None => None,
    };
    let page = args.page.unwrap_or(1);
    if page == 0 {
        return Err(RentalError::InvalidPage {
            page,
            total_pages: 0,
        });
    }

    Ok(SearchFilters {
        car_type: args.car_type.as_deref().map(split_list).unwrap_or_default(),
        category: args.category.as_deref().map(split_list).unwrap_or_default(),
        fuel: args.fuel.as_deref().map(split_list).unwrap_or_default(),
        agency: args.agency.as_deref().map(split_list).unwrap_or_default(),
        min_price: args.min_price,
        max_price: args.max_price,
        free_cancellation: args.free_cancellation.unwrap_or(false),
        unlimited_mileage: args.unlimited_mileage.unwrap_or(false),
        sort_by,
        pickup_location: args.pickup_location.clone().filter(|s| !s.trim().is_empty()),
        dropoff_location: args.dropoff_location.clone().filter(|s| !s.trim().is_empty()),
        page,
        ..Default::default()
    })
}

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    match serde_json::to_string_pretty(value) {
        Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
        Err(e) => tool_error(format!("failed to encode result: {e}")),
    }
}

#[derive(Clone)]
struct RentalMcp {
    client: ApiClient,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RentalMcp {
    fn new(client: ApiClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search rental cars and return one page of results as JSON (page, limit, count, total_pages, results). Filters are optional; multi-value filters are comma-separated. Call rental_filters first to see valid car types, categories, fuel types and agencies."
    )]
    async fn rental_search(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        let filters = match build_filters(&args) {
            Ok(f) => f,
            Err(e) => return tool_error(e.to_string()),
        };
        match crate::search(&self.client, filters).await {
            Ok(session) => match session.results() {
                Some(results) => json_result(results),
                None => tool_error("no results were loaded"),
            },
            Err(e) => tool_error(e.to_string()),
        }
    }

    #[tool(
        description = "List the selectable filter values: car types, fuel types, categories, agencies with ratings, and the price range."
    )]
    async fn rental_filters(&self) -> Result<CallToolResult, McpError> {
        match self.client.fetch_filters().await {
            Ok(filters) => json_result(&filters),
            Err(e) => tool_error(e.to_string()),
        }
    }

    #[tool(
        description = "Suggest pickup/dropoff locations for partially typed text. Matches location names and addresses, case-insensitively."
    )]
    async fn rental_locations(
        &self,
        Parameters(args): Parameters<LocationArgs>,
    ) -> Result<CallToolResult, McpError> {
        let hits = locations::suggest(args.query.as_deref().unwrap_or(""));
        json_result(&hits)
    }

    #[tool(
        description = "Run a search and return the /payment checkout route for the car at position 'index' (1-based) on that results page. The route carries the booking draft: a 5-day rental starting today."
    )]
    async fn rental_booking_route(
        &self,
        Parameters(args): Parameters<BookingArgs>,
    ) -> Result<CallToolResult, McpError> {
        let filters = match build_filters(&args.search) {
            Ok(f) => f,
            Err(e) => return tool_error(e.to_string()),
        };
        let session = match crate::search(&self.client, filters).await {
            Ok(s) => s,
            Err(e) => return tool_error(e.to_string()),
        };
        let picked = session
            .results()
            .and_then(|r| args.index.checked_sub(1).and_then(|i| r.results.get(i)));
        match picked {
            Some(result) => {
                let today = chrono::Local::now().date_naive();
                let route = Route::Payment(BookingDraft::from_result(result, today));
                Ok(CallToolResult::success(vec![Content::text(route.to_string())]))
            }
            None => tool_error(format!("no car at index {} on this page", args.index)),
        }
    }
}

#[tool_handler]
impl ServerHandler for RentalMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "carrent".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Car rental search tool. Workflow: (1) rental_locations to resolve a pickup point. (2) rental_filters for valid filter values. (3) rental_search to list cars. (4) rental_booking_route to get the checkout route for a chosen car.".into(),
            ),
        }
    }
}

pub async fn run(options: FetchOptions) -> Result<(), RentalError> {
    let client = ApiClient::new(&options)?;
    let service = RentalMcp::new(client)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| RentalError::Validation(format!("failed to start MCP server: {e}")))?;
    service
        .waiting()
        .await
        .map_err(|e| RentalError::Validation(format!("MCP server error: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_filters_splits_lists() {
        let args = SearchArgs {
            car_type: Some("SUV, Sedan".into()),
            agency: Some("Hertz".into()),
            min_price: Some(0.0),
            ..Default::default()
        };
        let f = build_filters(&args).unwrap();
        assert_eq!(f.car_type, vec!["SUV".to_string(), "Sedan".to_string()]);
        assert_eq!(f.agency, vec!["Hertz".to_string()]);
        assert_eq!(f.min_price, Some(0.0));
        assert_eq!(f.page, 1);
        assert_eq!(f.limit, 12);
    }

    #[test]
    fn build_filters_rejects_bad_sort() {
        let args = SearchArgs {
            sort_by: Some("cheapest".into()),
            ..Default::default()
        };
        assert!(build_filters(&args).is_err());
    }

    #[test]
    fn build_filters_rejects_page_zero() {
        let args = SearchArgs {
            page: Some(0),
            ..Default::default()
        };
        assert!(build_filters(&args).is_err());
    }

    #[test]
    fn blank_locations_are_dropped() {
        let args = SearchArgs {
            pickup_location: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(build_filters(&args).unwrap().pickup_location, None);
    }
}
