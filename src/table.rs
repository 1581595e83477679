use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::booking::{BookingDraft, Confirmation};
use crate::model::{ApiResponse, CarResult, Filters};
use crate::pagination::PageWindow;

/// Groups the integer part by thousands: `7500.0` becomes `"7,500"`, `49.5` becomes `"49.50"`.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let whole = rounded.trunc().abs() as u64;
    let cents = ((rounded.abs() - whole as f64) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}

/// Daily price as shown on a card.
pub fn format_price(price: f64) -> String {
    format!("₹{}", format_amount(price))
}

/// Amount as shown in the booking summary.
pub fn format_rupees(amount: f64) -> String {
    format!("Rs {}", format_amount(amount))
}

fn perks(result: &CarResult) -> Vec<&'static str> {
    let mut perks = Vec::new();
    if result.unlimited_mileage {
        perks.push("UNLIMITED MILEAGE");
    }
    if result.car.is_electric() {
        perks.push("ELECTRIC");
    }
    if result.free_cancellation {
        perks.push("Free Cancellation");
    }
    perks
}

fn transmission(result: &CarResult) -> &'static str {
    if result.car.is_automatic() {
        "Auto"
    } else {
        "Manual"
    }
}

pub fn render(response: &ApiResponse) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#", "Car", "Type", "Seats", "Bags", "Trans", "Agency", "Perks", "Price/day",
        ]);

    for (i, result) in response.results.iter().enumerate() {
        let car = format!("{}\n{}", result.car.name, result.car.category);
        let kind = format!("{}\n{}", result.car.car_type, result.car.fuel);
        let agency = format!("{}\n★ {}", result.agency.name, result.agency.rating);

        table.add_row(vec![
            (i + 1).to_string(),
            car,
            kind,
            result.car.passengers.to_string(),
            result.car.bags.to_string(),
            transmission(result).to_string(),
            agency,
            perks(result).join("\n"),
            format_price(result.price),
        ]);
    }

    table.to_string()
}

pub fn render_compact(response: &ApiResponse) -> String {
    response
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let perks = perks(r);
            let perks = if perks.is_empty() {
                "—".to_string()
            } else {
                perks.join(",").to_lowercase()
            };
            format!(
                "{} | {} | {} | {} | {} seats | {} | {} ★{} | {}",
                i + 1,
                format_price(r.price),
                r.car.name,
                r.car.car_type,
                r.car.passengers,
                transmission(r),
                r.agency.name,
                r.agency.rating,
                perks
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_header(response: &ApiResponse, sort_label: &str) -> String {
    format!(
        "{} cars found · page {} of {} · sorted by {sort_label}",
        response.count,
        response.page,
        response.total_pages.max(1)
    )
}

pub fn render_pagination(window: &PageWindow) -> String {
    let mut parts = Vec::new();
    parts.push(if window.prev_enabled { "← Previous" } else { "(← Previous)" }.to_string());
    if window.show_first {
        parts.push("1".to_string());
        if window.leading_ellipsis {
            parts.push("...".to_string());
        }
    }
    for page in &window.pages {
        if *page == window.current {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.show_last {
        if window.trailing_ellipsis {
            parts.push("...".to_string());
        }
        parts.push(window.total.to_string());
    }
    parts.push(if window.next_enabled { "Next →" } else { "(Next →)" }.to_string());
    parts.join(" ")
}

pub fn render_empty(pickup_location: Option<&str>) -> String {
    let place = pickup_location.unwrap_or("this location");
    format!(
        "No cars found in this location\n\
         We couldn't find any cars in {place}. Try a different location or adjust your filters.\n\
         Search again: carrent search --pickup <LOCATION>"
    )
}

pub fn render_vocabulary(filters: &Filters) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Filter", "Values"]);

    table.add_row(vec!["Car Type".to_string(), filters.car_types.join(", ")]);
    if !filters.categories.is_empty() {
        table.add_row(vec!["Category".to_string(), filters.categories.join(", ")]);
    }
    table.add_row(vec!["Fuel Type".to_string(), filters.fuel_types.join(", ")]);

    let agencies: Vec<String> = filters
        .agencies
        .iter()
        .map(|a| format!("{} (★ {})", a.name, a.rating))
        .collect();
    table.add_row(vec!["Rental Agencies".to_string(), agencies.join("\n")]);
    table.add_row(vec![
        "Price".to_string(),
        format!(
            "{} – {}",
            format_price(filters.price_range.min),
            format_price(filters.price_range.max)
        ),
    ]);

    table.to_string()
}

pub fn render_summary(draft: &BookingDraft) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Booking Summary".to_string(), String::new()]);

    table.add_row(vec![
        draft.car_name.clone(),
        format!("{} - {}", draft.car_type, draft.agency),
    ]);
    table.add_row(vec!["Pickup".to_string(), draft.pickup_date.to_string()]);
    table.add_row(vec!["Dropoff".to_string(), draft.dropoff_date.to_string()]);
    table.add_row(vec!["Location".to_string(), draft.pickup.clone()]);
    table.add_row(vec![
        format!("{} x {} days", format_rupees(draft.price), draft.days),
        format_rupees(draft.line_item_total()),
    ]);
    table.add_row(vec!["Taxes & Fees".to_string(), format_rupees(draft.fees())]);
    table.add_row(vec!["Total".to_string(), format_rupees(draft.grand_total())]);

    table.to_string()
}

pub fn render_confirmation(conf: &Confirmation) -> String {
    format!(
        "Payment Successful!\n\
         Your booking has been confirmed.\n\
         Booking ID:  {}\n\
         Car:         {}\n\
         Pickup:      {}\n\
         Dropoff:     {}\n\
         Total paid:  {}",
        conf.booking_id,
        conf.car_name,
        conf.pickup_date,
        conf.dropoff_date,
        format_rupees(conf.total)
    )
}
