use serde::Serialize;

/// Number of page links shown around the current page.
pub const WINDOW: i64 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageMarker {
	Page(u32),
	Ellipsis,
}
impl PageMarker {
	pub fn label(&self) -> String {
		match self {
			Self::Page(page) => page.to_string(),
			Self::Ellipsis => "...".to_string(),
		}
	}

	pub fn is_disabled(&self) -> bool {
		matches!(self, Self::Ellipsis)
	}
}

/// Plans the pagination bar for a zero-based `page` out of `total_pages`.
///
/// Page numbers in the result are one-based. The window holds up to nine pages; it starts at
/// page one while `page < 5` and otherwise four pages before `page`. A window clipped by the
/// last page is shifted back, never past page one. Pages beyond the last one are treated as
/// the last page.
pub fn plan(page: u32, total_pages: u32) -> Vec<PageMarker> {
	let total_pages = i64::from(total_pages);
	let page = i64::from(page).min((total_pages - 1).max(0));
	let start = if page < 5 { 1 } else { page - 4 };
	let end = (start + WINDOW - 1).min(total_pages);
	let shortfall = start - end + WINDOW - 1;
	let start = (start - shortfall).max(1);
	let mut markers = Vec::with_capacity(WINDOW as usize + 4);

	if start > 1 {
		markers.push(PageMarker::Page(1));
		markers.push(PageMarker::Ellipsis);
	}

	markers.extend((start..=end).map(|page| PageMarker::Page(page as u32)));

	if end < total_pages {
		markers.push(PageMarker::Ellipsis);
		markers.push(PageMarker::Page(total_pages as u32));
	}

	markers
}

/// Total page count for a result total; there is always at least one page.
pub fn last_page(total: u64, page_size: u32) -> u32 {
	let pages = total / u64::from(page_size.max(1)) + 1;

	u32::try_from(pages).unwrap_or(u32::MAX)
}
