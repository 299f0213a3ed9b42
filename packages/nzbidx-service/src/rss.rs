use quick_xml::events::{BytesStart, BytesText, Event};
use reqwest::Url;
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc2822};

use crate::{
	Error, NzbService, Result, SearchResult, links,
	nzb::NZB_MIME,
	xml::{self, XmlWriter},
};

const ATOM_XMLNS: &str = "http://www.w3.org/2005/Atom";
const RSS_MIME: &str = "application/rss+xml";
const MATCH_ALL: &str = "*";

#[derive(Debug, Clone)]
pub struct FeedRequest {
	/// Raw `q` parameter. Blank means every upload.
	pub query: Option<String>,
	/// Raw `max` parameter.
	pub max: Option<String>,
	/// Public root the item links are built under.
	pub base: Url,
	/// Absolute URL of the feed request itself.
	pub self_link: String,
}

#[derive(Debug, Clone)]
pub struct Feed {
	pub title: String,
	pub link: String,
	pub description: String,
	pub language: String,
	pub self_link: String,
	pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone)]
pub struct FeedItem {
	pub title: String,
	pub link: String,
	pub description: String,
	pub category: String,
	pub pub_date: String,
	pub enclosure_url: String,
	pub enclosure_length: u64,
	pub guid: String,
}
impl FeedItem {
	fn from_result(result: &SearchResult, base: &Url) -> Result<Self> {
		let link = links::upload_link(base, &result.upload_id)?;
		let enclosure = links::download_link(base, &result.upload_id, &result.name)?;

		Ok(Self {
			title: result.name.clone(),
			link: link.to_string(),
			description: item_description(result),
			category: result.category.title().to_string(),
			pub_date: pub_date(result.date)?,
			enclosure_url: enclosure.to_string(),
			enclosure_length: result.bytes,
			guid: link.to_string(),
		})
	}
}

impl NzbService {
	/// Newest complete uploads matching the query, capped at the configured item limit.
	pub async fn feed(&self, req: FeedRequest) -> Result<Feed> {
		let query = req
			.query
			.as_deref()
			.map(str::trim)
			.filter(|query| !query.is_empty())
			.unwrap_or(MATCH_ALL);
		let max = feed_max(req.max.as_deref(), &self.cfg.feed);
		let (results, _) = self.search_uploads(query, 0, max, true).await?;
		let items = results
			.iter()
			.take(max as usize)
			.map(|result| FeedItem::from_result(result, &req.base))
			.collect::<Result<Vec<_>>>()?;

		tracing::debug!(query, max, items = items.len(), "Feed assembled.");

		Ok(Feed {
			title: format!("{query} - {}", self.cfg.feed.site_name),
			link: req.base.as_str().trim_end_matches('/').to_string(),
			description: self.cfg.feed.description.clone(),
			language: self.cfg.feed.language.clone(),
			self_link: req.self_link,
			items,
		})
	}
}

/// Item count for a raw `max` parameter. Unparseable or negative values fall back to the
/// default; everything else is capped at `max_items`.
pub fn feed_max(raw: Option<&str>, cfg: &nzbidx_config::Feed) -> u32 {
	let requested = raw
		.and_then(|raw| raw.trim().parse::<i64>().ok())
		.filter(|max| *max >= 0)
		.unwrap_or(i64::from(cfg.default_max));

	requested.min(i64::from(cfg.max_items)) as u32
}

pub fn render_rss(feed: &Feed) -> Result<String> {
	let mut writer = xml::writer_with_declaration()?;

	xml::start(
		&mut writer,
		BytesStart::new("rss").with_attributes([("xmlns:atom", ATOM_XMLNS), ("version", "2.0")]),
	)?;
	xml::start(&mut writer, BytesStart::new("channel"))?;
	xml::text_element(&mut writer, "title", &feed.title)?;
	xml::text_element(&mut writer, "link", &feed.link)?;
	xml::text_element(&mut writer, "description", &feed.description)?;
	xml::text_element(&mut writer, "language", &feed.language)?;
	xml::emit(
		&mut writer,
		Event::Empty(BytesStart::new("atom:link").with_attributes([
			("href", feed.self_link.as_str()),
			("rel", "self"),
			("type", RSS_MIME),
		])),
	)?;

	for item in &feed.items {
		write_item(&mut writer, item)?;
	}

	xml::end(&mut writer, "channel")?;
	xml::end(&mut writer, "rss")?;

	xml::finish(writer)
}

fn write_item(writer: &mut XmlWriter, item: &FeedItem) -> Result<()> {
	let length = item.enclosure_length.to_string();

	xml::start(writer, BytesStart::new("item"))?;
	xml::text_element(writer, "title", &item.title)?;
	xml::text_element(writer, "link", &item.link)?;
	xml::text_element(writer, "description", &item.description)?;
	xml::text_element(writer, "category", &item.category)?;
	xml::text_element(writer, "pubDate", &item.pub_date)?;
	xml::emit(
		writer,
		Event::Empty(BytesStart::new("enclosure").with_attributes([
			("url", item.enclosure_url.as_str()),
			("length", length.as_str()),
			("type", NZB_MIME),
		])),
	)?;
	xml::start(writer, BytesStart::new("guid").with_attributes([("isPermaLink", "false")]))?;
	xml::emit(writer, Event::Text(BytesText::new(&item.guid)))?;
	xml::end(writer, "guid")?;

	xml::end(writer, "item")
}

/// RFC 2822 `pubDate` in UTC.
fn pub_date(date: OffsetDateTime) -> Result<String> {
	date.to_offset(UtcOffset::UTC).format(&Rfc2822).map_err(|err| Error::Render {
		message: format!("Failed to format pubDate {date}: {err}."),
	})
}

fn item_description(result: &SearchResult) -> String {
	format!(
		"<i>Age</i>: {}<br /><i>Size</i>: {}<br /><i>Parts</i>: {}<br /><i>Files</i>: {}<br /><i>Subject</i>: {}",
		result.age, result.size, result.completion, result.ext_types, result.subject
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn feed_cfg() -> nzbidx_config::Feed {
		nzbidx_config::Feed { default_max: 50, max_items: 100, ..Default::default() }
	}

	#[test]
	fn max_falls_back_and_caps() {
		let cfg = feed_cfg();

		assert_eq!(feed_max(None, &cfg), 50);
		assert_eq!(feed_max(Some("ten"), &cfg), 50);
		assert_eq!(feed_max(Some("-1"), &cfg), 50);
		assert_eq!(feed_max(Some("10"), &cfg), 10);
		assert_eq!(feed_max(Some("5000"), &cfg), 100);
	}

	#[test]
	fn pub_dates_are_utc_and_fail_loudly() {
		use time::macros::datetime;

		assert_eq!(
			pub_date(datetime!(2014-03-01 21:00 +09:00)).expect("format"),
			"Sat, 01 Mar 2014 12:00:00 +0000"
		);
		assert!(matches!(
			pub_date(datetime!(1899-12-31 00:00 UTC)),
			Err(Error::Render { .. })
		));
	}

	#[test]
	fn renders_channel_and_items() {
		let feed = Feed {
			title: "show - Animezb".to_string(),
			link: "http://animezb.example".to_string(),
			description: "Usenet Indexer for Japanese Media".to_string(),
			language: "en-us".to_string(),
			self_link: "http://animezb.example/rss?q=show".to_string(),
			items: vec![FeedItem {
				title: "Show & Tell".to_string(),
				link: "http://animezb.example/nzb/u1".to_string(),
				description: "<i>Age</i>: 1d".to_string(),
				category: "Anime".to_string(),
				pub_date: "Sat, 01 Mar 2014 12:00:00 +0000".to_string(),
				enclosure_url: "http://animezb.example/nzb/u1/Show.nzb".to_string(),
				enclosure_length: 1_024,
				guid: "http://animezb.example/nzb/u1".to_string(),
			}],
		};
		let out = render_rss(&feed).expect("render");

		assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
		assert!(out.contains(r#"<rss xmlns:atom="http://www.w3.org/2005/Atom" version="2.0">"#));
		assert!(out.contains(r#"<atom:link href="http://animezb.example/rss?q=show" rel="self" type="application/rss+xml"/>"#));
		assert!(out.contains("<title>Show &amp; Tell</title>"));
		assert!(out.contains("<description>&lt;i&gt;Age&lt;/i&gt;: 1d</description>"));
		assert!(out.contains(r#"<enclosure url="http://animezb.example/nzb/u1/Show.nzb" length="1024" type="application/x-nzb"/>"#));
		assert!(out.contains(r#"<guid isPermaLink="false">http://animezb.example/nzb/u1</guid>"#));
		assert_eq!(out.matches("<item>").count(), 1);
		assert!(out.ends_with("</rss>"));
	}
}
