use crate::error::RentalError;
use crate::fetch::ApiClient;
use crate::filters::{FilterChange, FilterUpdate, SearchFilters};
use crate::model::{ApiResponse, Filters};
use crate::pagination;

/// A listing request waiting to be sent, stamped with the generation that issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub filters: SearchFilters,
}

/// State of one search page: active filters, vocabulary and the latest results.
#[derive(Debug, Default)]
pub struct SearchSession {
    filters: SearchFilters,
    vocabulary: Option<Filters>,
    results: Option<ApiResponse>,
    last_error: Option<RentalError>,
    loading: bool,
    generation: u64,
}

impl SearchSession {
    pub fn new(filters: SearchFilters) -> Self {
        Self {
            filters,
            ..Default::default()
        }
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn vocabulary(&self) -> Option<&Filters> {
        self.vocabulary.as_ref()
    }

    pub fn results(&self) -> Option<&ApiResponse> {
        self.results.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The failure of the most recent applied fetch, if it failed.
    pub fn take_error(&mut self) -> Option<RentalError> {
        self.last_error.take()
    }

    /// Listing fetches wait for the vocabulary; the first one is issued here.
    pub fn set_vocabulary(&mut self, vocabulary: Filters) -> Option<FetchTicket> {
        let first = self.vocabulary.is_none();
        self.vocabulary = Some(vocabulary);
        if first {
            self.schedule()
        } else {
            None
        }
    }

    pub fn change(&mut self, change: FilterChange) -> Option<FetchTicket> {
        self.filters = self.filters.apply(change);
        self.schedule()
    }

    pub fn update(&mut self, update: FilterUpdate) -> Option<FetchTicket> {
        self.filters = self.filters.merge(update);
        self.schedule()
    }

    /// Moves to another results page, rejecting pages the last response does not have.
    pub fn go_to_page(&mut self, page: u32) -> Result<Option<FetchTicket>, RentalError> {
        let total_pages = self.results.as_ref().map_or(1, |r| r.total_pages);
        pagination::check_page(page, total_pages)?;
        Ok(self.change(FilterChange::Page(page)))
    }

    fn schedule(&mut self) -> Option<FetchTicket> {
        self.vocabulary.as_ref()?;
        self.generation += 1;
        self.loading = true;
        Some(FetchTicket {
            generation: self.generation,
            filters: self.filters.clone(),
        })
    }

    /// Applies a finished fetch. Returns `false` when a newer request has been
    /// issued since, in which case the outcome is dropped.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<ApiResponse, RentalError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                latest = self.generation,
                "dropping stale listing response"
            );
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(response) => {
                self.results = Some(response);
                self.last_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch cars");
                self.last_error = Some(e);
            }
        }
        true
    }

    /// Sends the ticket's request and applies the outcome.
    pub async fn run(&mut self, client: &ApiClient, ticket: FetchTicket) -> bool {
        let outcome = client.fetch_cars(&ticket.filters).await;
        self.complete(&ticket, outcome)
    }

    /// Loads the vocabulary and, once it is there, the first page of listings.
    pub async fn load(&mut self, client: &ApiClient) -> Result<(), RentalError> {
        let vocabulary = client.fetch_filters().await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to fetch filters");
        })?;
        if let Some(ticket) = self.set_vocabulary(vocabulary) {
            self.run(client, ticket).await;
        }
        Ok(())
    }
}
