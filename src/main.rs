use std::process;
use std::time::Duration;

use clap::Parser;

use carrent::booking::BookingDraft;
use carrent::checkout::{CardDetails, Checkout, ContactDetails, SimulatedGateway};
use carrent::error::RentalError;
use carrent::fetch::{ApiClient, FetchOptions, DEFAULT_API_URL};
use carrent::filters::{split_list, FilterUpdate, SearchFilters, SortBy};
use carrent::locations;
use carrent::model::ApiResponse;
use carrent::pagination;
use carrent::route::{Route, SearchRoute};
use carrent::selector::{self, TripSelection};
use carrent::session::SearchSession;
use carrent::table;

#[derive(Parser)]
#[command(
    name = "carrent",
    about = "Search, filter and book rental cars from the terminal",
    version,
    after_help = "\
Examples:
  carrent locations vegas
  carrent search --pickup \"Bellagio Resort\"
  carrent search --pickup \"MGM Grand Resort\" --car-type SUV,Sedan --sort price_asc
  carrent search --route \"/search?pickup_location=Luxor+Hotel&fuel=Electric\"
  carrent book --pickup \"Luxor Hotel\" --pick 2 --first-name Ada ... --card-number 4242424242424242 ..."
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "CARRENT_API_URL",
        default_value = DEFAULT_API_URL,
        value_name = "URL",
        help = "Base URL of the car-listing API"
    )]
    api_url: String,

    #[arg(long, global = true, value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(long, global = true, default_value = "30", value_name = "SECS", help = "Request timeout")]
    timeout: u64,

    #[arg(short, long, global = true, help = "Verbose logging (RUST_LOG overrides)")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Search for rental cars",
        after_help = "\
Examples:
  Basic:        carrent search --pickup \"Bellagio Resort\"
  Date range:   carrent search --pickup \"Luxor Hotel\" --pickup-date 2026-03-01 --dropoff-date 2026-03-06
  Filters:      carrent search --pickup \"Luxor Hotel\" --car-type SUV --fuel Electric --max-price 5000
  Sorting:      carrent search --pickup \"Luxor Hotel\" --sort rating --page 2
  Route only:   carrent search --pickup \"Luxor Hotel\" --url
  JSON output:  carrent search --pickup \"Luxor Hotel\" --json --pretty"
    )]
    Search(SearchArgs),

    #[command(about = "Show the selectable filter values")]
    Filters(OutputArgs),

    #[command(about = "Suggest pickup/dropoff locations")]
    Locations {
        #[arg(value_name = "TEXT", help = "Partial location name or address")]
        query: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    #[command(
        about = "Book a car from the search results (simulated payment)",
        after_help = "\
Example:
  carrent book --pickup \"Luxor Hotel\" --pick 1 \\
    --first-name Ada --last-name Lovelace --email ada@example.com --phone 5550100 \\
    --address \"1 Main St\" --city \"Las Vegas\" --country \"United States\" \\
    --card-number 4242424242424242 --card-name \"Ada Lovelace\" --expiry-month 12 --expiry-year 29 --cvv 123"
    )]
    Book(BookArgs),

    #[command(about = "Start MCP server for AI agents (stdio transport)")]
    Mcp,
}

#[derive(clap::Args, Clone)]
struct OutputArgs {
    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct SearchArgs {
    #[arg(
        short, long,
        value_name = "LOCATION",
        help = "Pickup location",
        long_help = "Pickup location name or address keywords (see `carrent locations`)."
    )]
    pickup: Option<String>,

    #[arg(long, value_name = "LOCATION", help = "Dropoff location (if different)")]
    dropoff: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Pickup date [default: today]")]
    pickup_date: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Dropoff date [default: pickup + 5 days]")]
    dropoff_date: Option<String>,

    #[arg(long, value_name = "TYPE,...", help = "Car types (comma-separated)")]
    car_type: Option<String>,

    #[arg(long, value_name = "CATEGORY,...", help = "Categories (comma-separated)")]
    category: Option<String>,

    #[arg(long, value_name = "FUEL,...", help = "Fuel types (comma-separated)")]
    fuel: Option<String>,

    #[arg(long, value_name = "AGENCY,...", help = "Rental agencies (comma-separated)")]
    agency: Option<String>,

    #[arg(long, value_name = "AMOUNT", help = "Minimum price per day")]
    min_price: Option<f64>,

    #[arg(long, value_name = "AMOUNT", help = "Maximum price per day")]
    max_price: Option<f64>,

    #[arg(long, help = "Only offers with free cancellation")]
    free_cancellation: bool,

    #[arg(long, help = "Only offers with unlimited mileage")]
    unlimited_mileage: bool,

    #[arg(
        long,
        value_name = "ORDER",
        help = "Sort order [price_asc, price_desc, rating, name]"
    )]
    sort: Option<String>,

    #[arg(long, default_value = "1", value_name = "N", help = "Results page")]
    page: u32,

    #[arg(
        long,
        value_name = "ROUTE",
        help = "Start from a /search route",
        long_help = "Start from a /search?... navigation route. Other flags given \
            alongside are merged on top of it."
    )]
    route: Option<String>,

    #[arg(long, help = "Price alert flag carried in the search route")]
    alert: bool,

    #[arg(long, help = "One-line-per-car output")]
    compact: bool,

    #[arg(long, help = "Print the /search route only, without searching")]
    url: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct BookArgs {
    #[command(flatten)]
    search: SearchArgs,

    #[arg(long, value_name = "N", help = "Position of the car on the results page (1-based)")]
    pick: usize,

    #[arg(long, default_value = "", value_name = "NAME")]
    first_name: String,
    #[arg(long, default_value = "", value_name = "NAME")]
    last_name: String,
    #[arg(long, default_value = "", value_name = "EMAIL")]
    email: String,
    #[arg(long, default_value = "", value_name = "PHONE")]
    phone: String,
    #[arg(long, default_value = "", value_name = "STREET")]
    address: String,
    #[arg(long, default_value = "", value_name = "CITY")]
    city: String,
    #[arg(long, default_value = "", value_name = "COUNTRY")]
    country: String,

    #[arg(long, default_value = "", value_name = "DIGITS")]
    card_number: String,
    #[arg(long, default_value = "", value_name = "NAME")]
    card_name: String,
    #[arg(long, default_value = "", value_name = "MM")]
    expiry_month: String,
    #[arg(long, default_value = "", value_name = "YY")]
    expiry_year: String,
    #[arg(long, default_value = "", value_name = "CVV")]
    cvv: String,

    #[arg(long, default_value = "2500", value_name = "MS", help = "Simulated payment delay")]
    delay_ms: u64,
}

impl BookArgs {
    fn contact(&self) -> ContactDetails {
        ContactDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
        }
    }

    fn card(&self) -> CardDetails {
        CardDetails::from_input(
            &self.card_number,
            &self.card_name,
            &self.expiry_month,
            &self.expiry_year,
            &self.cvv,
        )
    }
}

fn is_json(args: &OutputArgs) -> bool {
    args.json || args.pretty
}

fn error_code(err: &RentalError) -> i32 {
    match err {
        RentalError::InvalidDate(_)
        | RentalError::InvalidPage { .. }
        | RentalError::InvalidRoute(_)
        | RentalError::MissingField(_)
        | RentalError::Validation(_) => 2,
        RentalError::Timeout
        | RentalError::ConnectionFailed(_)
        | RentalError::DnsResolution(_)
        | RentalError::ProxyError(_) => 3,
        RentalError::HttpStatus(_) => 5,
        RentalError::Decode(_) => 6,
    }
}

fn error_kind(err: &RentalError) -> &'static str {
    match err {
        RentalError::InvalidDate(_) => "invalid_date",
        RentalError::InvalidPage { .. } => "invalid_page",
        RentalError::InvalidRoute(_) => "invalid_route",
        RentalError::MissingField(_) => "missing_field",
        RentalError::Validation(_) => "validation_error",
        RentalError::Timeout => "timeout",
        RentalError::ConnectionFailed(_) => "connection_failed",
        RentalError::DnsResolution(_) => "dns_error",
        RentalError::ProxyError(_) => "proxy_error",
        RentalError::HttpStatus(_) => "http_error",
        RentalError::Decode(_) => "decode_error",
    }
}

fn die(err: &RentalError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": err.to_string(),
            }
        });
        println!("{json}");
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn print_json<T: serde::Serialize>(value: &T, output: &OutputArgs) {
    let encoded = if output.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match encoded {
        Ok(json) => println!("{json}"),
        Err(e) => die(&RentalError::Decode(e.to_string()), true),
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Builds the `/search` route from the flags, layered over `--route` when given.
fn build_search_route(args: &SearchArgs) -> Result<SearchRoute, RentalError> {
    let mut base = match args.route.as_deref() {
        Some(raw) => match Route::parse(raw)? {
            Route::Search(search) => search,
            _ => return Err(RentalError::InvalidRoute(raw.to_string())),
        },
        None => SearchRoute {
            filters: SearchFilters::default(),
            pickup_date: None,
            dropoff_date: None,
            price_alert: false,
        },
    };

    if let Some(ref pickup) = args.pickup {
        let mut selection = TripSelection::new(pickup.clone(), today());
        selection.dropoff_location = args.dropoff.clone();
        if let Some(ref date) = args.pickup_date {
            selection.pickup_date = selector::parse_date(date)?;
            selection.dropoff_date =
                selector::add_days(selection.pickup_date, selector::DEFAULT_RANGE_DAYS);
        }
        if let Some(ref date) = args.dropoff_date {
            selection.dropoff_date = selector::parse_date(date)?;
        }
        selection.price_alert = args.alert;

        if locations::find_exact(pickup).is_none() {
            tracing::debug!(pickup = %pickup, "pickup is not a listed location, sending as keywords");
        }

        if let Route::Search(from_selection) = selection.to_route()? {
            base.filters = base.filters.merge(FilterUpdate {
                pickup_location: Some(from_selection.filters.pickup_location),
                dropoff_location: Some(from_selection.filters.dropoff_location),
                ..Default::default()
            });
            base.pickup_date = from_selection.pickup_date;
            base.dropoff_date = from_selection.dropoff_date;
            base.price_alert = from_selection.price_alert;
        }
    } else if args.route.is_none() {
        return Err(RentalError::Validation(
            "Please enter a pickup location (--pickup or --route)".into(),
        ));
    }

    let sort_by = args.sort.as_deref().map(SortBy::from_str_loose).transpose()?;

    base.filters = base.filters.merge(FilterUpdate {
        car_type: args.car_type.as_deref().map(split_list),
        category: args.category.as_deref().map(split_list),
        fuel: args.fuel.as_deref().map(split_list),
        agency: args.agency.as_deref().map(split_list),
        min_price: args.min_price.map(Some),
        max_price: args.max_price.map(Some),
        free_cancellation: args.free_cancellation.then_some(true),
        unlimited_mileage: args.unlimited_mileage.then_some(true),
        sort_by,
        ..Default::default()
    });

    if args.page == 0 {
        return Err(RentalError::InvalidPage {
            page: 0,
            total_pages: 0,
        });
    }
    if args.page != 1 {
        base.filters = base.filters.merge(FilterUpdate {
            page: Some(args.page),
            ..Default::default()
        });
    }

    Ok(base)
}

async fn load_session(
    client: &ApiClient,
    filters: SearchFilters,
    json_mode: bool,
) -> SearchSession {
    match carrent::search(client, filters).await {
        Ok(session) => session,
        Err(e) => die(&e, json_mode),
    }
}

fn print_results(session: &SearchSession, args: &SearchArgs) {
    let Some(response) = session.results() else {
        return;
    };

    if is_json(&args.output) {
        print_json(response, &args.output);
        return;
    }

    // Past the last page: report the page instead of the empty state.
    if response.total_pages > 0 {
        if let Err(e) = pagination::check_page(response.page, response.total_pages) {
            die(&e, false);
        }
    }

    if response.is_empty() {
        println!(
            "{}",
            table::render_empty(session.filters().pickup_location.as_deref())
        );
        return;
    }

    let sort_label = session
        .filters()
        .sort_by
        .map(|s| s.label())
        .unwrap_or("Recommended");
    println!("{}", table::render_header(response, sort_label));

    if args.compact {
        println!("{}", table::render_compact(response));
    } else {
        println!("{}", table::render(response));
    }

    if let Some(window) = pagination::window(response.page, response.total_pages) {
        println!("{}", table::render_pagination(&window));
    }
}

fn pick_result(response: &ApiResponse, pick: usize) -> Result<&carrent::model::CarResult, RentalError> {
    pick.checked_sub(1)
        .and_then(|i| response.results.get(i))
        .ok_or_else(|| {
            RentalError::Validation(format!(
                "--pick {pick} is out of range (this page has {} cars)",
                response.results.len()
            ))
        })
}

fn fetch_options(cli: &Cli) -> FetchOptions {
    FetchOptions {
        base_url: cli.api_url.clone(),
        proxy: cli.proxy.clone(),
        timeout: cli.timeout,
    }
}

fn client_or_die(options: &FetchOptions, json_mode: bool) -> ApiClient {
    match ApiClient::new(options) {
        Ok(c) => c,
        Err(e) => die(&e, json_mode),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    carrent::logging::init(cli.verbose);
    let options = fetch_options(&cli);

    match cli.command {
        Commands::Mcp => {
            if let Err(e) = carrent::mcp::run(options).await {
                die(&e, false);
            }
        }
        Commands::Locations { query, output } => {
            let hits = locations::suggest(query.as_deref().unwrap_or(""));
            if is_json(&output) {
                print_json(&hits, &output);
            } else if hits.is_empty() {
                println!("No locations found");
            } else {
                for loc in hits {
                    println!("{} — {}", loc.name, loc.full_address);
                }
            }
        }
        Commands::Filters(output) => {
            let json_mode = is_json(&output);
            let client = client_or_die(&options, json_mode);
            match client.fetch_filters().await {
                Ok(filters) if json_mode => print_json(&filters, &output),
                Ok(filters) => println!("{}", table::render_vocabulary(&filters)),
                Err(e) => die(&e, json_mode),
            }
        }
        Commands::Search(args) => {
            let json_mode = is_json(&args.output);
            let route = match build_search_route(&args) {
                Ok(r) => r,
                Err(e) => die(&e, json_mode),
            };

            if args.url {
                println!("{}", Route::Search(route));
                return;
            }

            let client = client_or_die(&options, json_mode);
            let session = load_session(&client, route.filters, json_mode).await;
            print_results(&session, &args);
        }
        Commands::Book(args) => {
            let json_mode = is_json(&args.search.output);
            let route = match build_search_route(&args.search) {
                Ok(r) => r,
                Err(e) => die(&e, json_mode),
            };

            let client = client_or_die(&options, json_mode);
            let session = load_session(&client, route.filters, json_mode).await;
            let Some(response) = session.results() else {
                die(&RentalError::Validation("no results were loaded".into()), json_mode);
            };
            let picked = match pick_result(response, args.pick) {
                Ok(r) => r,
                Err(e) => die(&e, json_mode),
            };

            let draft = BookingDraft::from_result(picked, today());
            let payment_route = Route::Payment(draft.clone());
            tracing::info!(route = %payment_route, "starting checkout");

            let mut checkout = Checkout::new(draft);
            if let Err(e) = checkout.submit_details(args.contact()) {
                die(&e, json_mode);
            }

            if !json_mode {
                println!("{}", table::render_summary(checkout.draft()));
                println!("Processing payment...");
            }

            let gateway = SimulatedGateway {
                delay: Duration::from_millis(args.delay_ms),
            };
            let success = match checkout.pay(&gateway, args.card()).await {
                Ok(r) => r,
                Err(e) => die(&e, json_mode),
            };

            if let Route::PaymentSuccess(ref conf) = success {
                if json_mode {
                    let json = serde_json::json!({
                        "route": success.to_string(),
                        "confirmation": conf,
                    });
                    print_json(&json, &args.search.output);
                } else {
                    println!("{}", table::render_confirmation(conf));
                    println!("{success}");
                }
            }
        }
    }
}
