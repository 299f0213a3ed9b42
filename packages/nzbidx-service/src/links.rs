//! Absolute links under the public root.

use reqwest::Url;

use crate::{Error, Result};

/// `/nzb/{id}`.
pub fn upload_link(base: &Url, upload_id: &str) -> Result<Url> {
	under(base, &["nzb", upload_id])
}

/// `/nzb/{id}/{name}.nzb`, the named download used by feed enclosures and result pages.
pub fn download_link(base: &Url, upload_id: &str, name: &str) -> Result<Url> {
	under(base, &["nzb", upload_id, &format!("{name}.nzb")])
}

/// `/uploads/{id}`.
pub fn listing_link(base: &Url, upload_id: &str) -> Result<Url> {
	under(base, &["uploads", upload_id])
}

/// Appends escaped path segments to `base`, dropping its query and fragment.
pub fn under(base: &Url, segments: &[&str]) -> Result<Url> {
	let mut url = base.clone();

	url.set_query(None);
	url.set_fragment(None);
	url.path_segments_mut()
		.map_err(|_| Error::InvalidRequest { message: format!("{base} cannot carry a path.") })?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escapes_names() {
		let base = Url::parse("http://animezb.example/").expect("base");
		let url = download_link(&base, "u1", "Show 01/v2").expect("link");

		assert_eq!(url.as_str(), "http://animezb.example/nzb/u1/Show%2001%2Fv2.nzb");
	}

	#[test]
	fn keeps_base_path_and_drops_query() {
		let base = Url::parse("http://host.example/mirror/?q=show").expect("base");

		assert_eq!(
			upload_link(&base, "u 1").expect("link").as_str(),
			"http://host.example/mirror/nzb/u%201"
		);
		assert_eq!(
			listing_link(&base, "u1").expect("link").as_str(),
			"http://host.example/mirror/uploads/u1"
		);
	}

	#[test]
	fn rejects_opaque_bases() {
		let base = Url::parse("mailto:someone@example.org").expect("base");

		assert!(matches!(upload_link(&base, "u1"), Err(Error::InvalidRequest { .. })));
	}
}
