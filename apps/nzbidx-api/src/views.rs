//! Search result page.

use askama::Template;
use reqwest::Url;

use nzbidx_domain::{category::Category, pagination::PageMarker};
use nzbidx_service::{SearchPage, SearchResult, links};

/// Query parameters carried over into pagination links.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
	pub category: Option<Category>,
	pub include_incomplete: bool,
}
impl SearchFilters {
	pub fn category_name(&self) -> &'static str {
		self.category.map(|category| category.title()).unwrap_or("All")
	}
}

#[derive(Debug, Clone)]
pub struct ResultRow {
	pub upload_id: String,
	pub name: String,
	pub subject: String,
	pub poster: String,
	pub size: String,
	pub completion: String,
	pub completion_class: &'static str,
	pub completed_parts: u64,
	pub total_parts: u64,
	pub age: String,
	pub types: Vec<String>,
	pub full_group: String,
	pub group: String,
	pub category: &'static str,
	pub nzb_href: String,
	pub info_href: String,
}
impl ResultRow {
	fn new(result: SearchResult, base: &Url) -> nzbidx_service::Result<Self> {
		let nzb_href = links::download_link(base, &result.upload_id, &result.name)?.to_string();
		let info_href = links::listing_link(base, &result.upload_id)?.to_string();

		Ok(Self {
			upload_id: result.upload_id,
			name: result.name,
			subject: result.subject,
			poster: result.poster,
			size: result.size,
			completion: result.completion,
			completion_class: result.completion_class.unwrap_or_default(),
			completed_parts: result.completed_parts,
			total_parts: result.total_parts,
			age: result.age,
			types: result.types,
			full_group: result.full_group,
			group: result.group,
			category: result.category.slug(),
			nzb_href,
			info_href,
		})
	}
}

#[derive(Debug, Clone)]
pub struct PageLink {
	pub label: String,
	pub href: String,
	pub disabled: bool,
	pub current: bool,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsView {
	pub query: String,
	pub category_name: &'static str,
	pub total: u64,
	/// One-based.
	pub page: u32,
	pub last_page: u32,
	pub prev_href: String,
	pub next_href: String,
	pub has_prev: bool,
	pub has_next: bool,
	pub pages: Vec<PageLink>,
	pub rows: Vec<ResultRow>,
}
impl ResultsView {
	pub fn new(
		page: SearchPage,
		base: &Url,
		filters: &SearchFilters,
	) -> nzbidx_service::Result<Self> {
		let current = page.page + 1;
		let href = |target: u32| page_href(base, &page.query, filters, target);
		let pages = page
			.pagination
			.iter()
			.map(|marker| PageLink {
				label: marker.label(),
				href: match marker {
					PageMarker::Page(target) => href(*target),
					PageMarker::Ellipsis => String::new(),
				},
				disabled: marker.is_disabled(),
				current: *marker == PageMarker::Page(current),
			})
			.collect();
		let prev_href = href(current.saturating_sub(1).max(1));
		let next_href = href(current + 1);
		let rows = page
			.results
			.into_iter()
			.map(|result| ResultRow::new(result, base))
			.collect::<nzbidx_service::Result<Vec<_>>>()?;

		Ok(Self {
			query: page.query,
			category_name: filters.category_name(),
			total: page.total,
			page: current,
			last_page: page.last_page,
			prev_href,
			next_href,
			has_prev: current > 1,
			has_next: current < page.last_page,
			pages,
			rows,
		})
	}
}

/// Search link for a one-based page, keeping the active filters.
fn page_href(base: &Url, query: &str, filters: &SearchFilters, page: u32) -> String {
	let mut url = base.clone();

	url.set_fragment(None);

	{
		let mut pairs = url.query_pairs_mut();

		pairs.clear().append_pair("q", query);

		if let Some(category) = filters.category {
			pairs.append_pair("cat", category.slug());
		}
		if filters.include_incomplete {
			pairs.append_pair("nocomp", "1");
		}

		pairs.append_pair("p", &page.to_string());
	}

	url.to_string()
}
