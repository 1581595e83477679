pub mod booking;
pub mod checkout;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod locations;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod pagination;
pub mod query;
pub mod route;
pub mod selector;
pub mod session;
pub mod table;

use error::RentalError;
use fetch::ApiClient;
use filters::SearchFilters;
use session::SearchSession;

/// Loads a search page: the filter vocabulary first, then the listings for `filters`.
pub async fn search(
    client: &ApiClient,
    filters: SearchFilters,
) -> Result<SearchSession, RentalError> {
    let mut session = SearchSession::new(filters);
    session.load(client).await?;
    if let Some(err) = session.take_error() {
        return Err(err);
    }
    Ok(session)
}
