use serde::Serialize;

use crate::error::RentalError;

pub const MAX_VISIBLE: u32 = 5;

/// The visible part of the pagination control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current: u32,
    pub total: u32,
    pub pages: Vec<u32>,
    pub show_first: bool,
    pub leading_ellipsis: bool,
    pub trailing_ellipsis: bool,
    pub show_last: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Builds a window of at most [`MAX_VISIBLE`] pages centred on `current`.
///
/// Near an edge the window slides to stay full. Returns `None` when there is
/// nothing to paginate or `current` lies outside `1..=total`.
pub fn window(current: u32, total: u32) -> Option<PageWindow> {
    if total <= 1 || current == 0 || current > total {
        return None;
    }

    let half = MAX_VISIBLE / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = start.saturating_add(MAX_VISIBLE - 1).min(total);

    if end - start < MAX_VISIBLE - 1 {
        start = end.saturating_sub(MAX_VISIBLE - 1).max(1);
    }

    Some(PageWindow {
        current,
        total,
        pages: (start..=end).collect(),
        show_first: start > 1,
        leading_ellipsis: start > 2,
        trailing_ellipsis: end.saturating_add(1) < total,
        show_last: end < total,
        prev_enabled: current > 1,
        next_enabled: current < total,
    })
}

/// Rejects page requests outside `1..=total_pages`.
pub fn check_page(page: u32, total_pages: u32) -> Result<(), RentalError> {
    if page == 0 || page > total_pages.max(1) {
        return Err(RentalError::InvalidPage { page, total_pages });
    }
    Ok(())
}
