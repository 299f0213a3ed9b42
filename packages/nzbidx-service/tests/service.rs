use std::sync::Arc;

use reqwest::Url;

use nzbidx_config::{Config, Feed, Search, Service, Store};
use nzbidx_domain::pagination::PageMarker;
use nzbidx_service::{
	DescriptorRequest, Error, FeedRequest, NzbService, SearchRequest, nzb::render_nzb,
	rss::render_rss,
};
use nzbidx_storage::DocType;
use nzbidx_testkit::{
	FakeStore,
	fixtures::{file_hit, segment_hit, upload_hit},
};

fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			html_dir: "html".to_string(),
			base_url: None,
		},
		store: Store {
			url: "http://127.0.0.1:9200".to_string(),
			index: "nzb".to_string(),
			timeout_ms: 1_000,
		},
		search: Search::default(),
		feed: Feed { default_max: 50, max_items: 500, ..Default::default() },
	}
}

fn service(store: FakeStore) -> (NzbService, Arc<FakeStore>) {
	let store = Arc::new(store);

	(NzbService::new(test_config(), store.clone()), store)
}

fn two_file_upload() -> FakeStore {
	let mut store = FakeStore::new()
		.with_upload("u1", "[Group] Show - 01.")
		.with_file("u1", file_hit("f1", "show.part1.rar", r#""show.part1.rar" yEnc (3/5)"#, 5, 5))
		.with_file("u1", file_hit("f2", "show.nfo", r#""show.nfo" yEnc (1/1)"#, 1, 1))
		.with_segment("f2", segment_hit("s6", 1, "<nfo@news.example>"));

	for part in [3, 1, 5, 2, 4] {
		store = store.with_segment(
			"f1",
			segment_hit(&format!("s{part}"), part, &format!("<part{part}of5@news.example>")),
		);
	}

	store
}

#[tokio::test]
async fn descriptor_lists_files_and_segments() {
	let (service, store) = service(two_file_upload());
	let descriptor = service
		.descriptor(DescriptorRequest { uploads: vec!["u1".to_string()], name: None })
		.await
		.expect("descriptor");
	let out = render_nzb(&descriptor).expect("render");

	assert_eq!(descriptor.name, "[Group] Show - 01.nzb");
	assert_eq!(out.matches("<file ").count(), 2);
	assert!(out.contains("(1/5)"));
	assert!(!out.contains("(3/5)"));

	let first_file = &out[out.find("<file ").expect("file")..out.find("</file>").expect("end")];

	assert_eq!(first_file.matches("<segment ").count(), 5);
	assert!(!out.contains("&lt;part"));
	assert!(out.contains(r#"number="1">part1of5@news.example</segment>"#));

	let numbers: Vec<u32> =
		descriptor.files[0].segments.iter().map(|segment| segment.number).collect();

	assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

	let kinds: Vec<DocType> = store.requests().iter().map(|request| request.doc_type).collect();

	assert_eq!(
		kinds,
		vec![DocType::Upload, DocType::File, DocType::Segment, DocType::Segment],
		"Queries must run name lookup, files, then segments per file."
	);
}

#[tokio::test]
async fn explicit_name_skips_the_lookup() {
	let (service, store) = service(two_file_upload());
	let descriptor = service
		.descriptor(DescriptorRequest {
			uploads: vec!["u1".to_string()],
			name: Some("custom.nzb".to_string()),
		})
		.await
		.expect("descriptor");

	assert_eq!(descriptor.name, "custom.nzb");
	assert!(store.requests().iter().all(|request| request.id.is_none()));
}

#[tokio::test]
async fn empty_prefix_falls_back_to_first_file_name() {
	let store = FakeStore::new()
		.with_upload("u2", "")
		.with_file("u2", file_hit("f9", "movie.mkv", r#""movie.mkv" yEnc (1/1)"#, 1, 1));
	let (service, _) = service(store);
	let descriptor = service
		.descriptor(DescriptorRequest { uploads: vec!["u2".to_string()], name: None })
		.await
		.expect("descriptor");

	assert_eq!(descriptor.name, "movie.mkv.nzb");
	assert!(descriptor.files[0].segments.is_empty());
}

#[tokio::test]
async fn batches_keep_upload_order() {
	let store = two_file_upload()
		.with_file("u3", file_hit("f7", "extra.mkv", r#""extra.mkv" yEnc (1/1)"#, 1, 1));
	let (service, _) = service(store);
	let descriptor = service
		.descriptor(DescriptorRequest {
			uploads: vec!["u3".to_string(), "u1".to_string()],
			name: Some("batch".to_string()),
		})
		.await
		.expect("descriptor");
	let ids: Vec<&str> = descriptor.files.iter().map(|file| file.id.as_str()).collect();

	assert_eq!(descriptor.name, "batch.nzb");
	assert_eq!(ids, vec!["f7", "f1", "f2"]);
}

#[tokio::test]
async fn missing_upload_and_empty_batch_are_errors() {
	let (service, _) = service(FakeStore::new());
	let missing = service
		.descriptor(DescriptorRequest { uploads: vec!["nope".to_string()], name: None })
		.await;
	let empty = service.descriptor(DescriptorRequest::default()).await;

	assert!(matches!(missing, Err(Error::NotFound { .. })));
	assert!(matches!(empty, Err(Error::InvalidRequest { .. })));
}

#[tokio::test]
async fn feed_never_exceeds_max() {
	let hits = (0..12)
		.map(|idx| {
			upload_hit(&format!("u{idx}"), &format!("Show {idx:02}"), "2014-03-01T12:00:00Z", 5, 5)
		})
		.collect();
	let (service, store) = service(FakeStore::new().with_upload_hits(hits).with_upload_total(900));
	let feed = service
		.feed(FeedRequest {
			query: None,
			max: Some("10".to_string()),
			base: Url::parse("http://animezb.example/").expect("base"),
			self_link: "http://animezb.example/rss?max=10".to_string(),
		})
		.await
		.expect("feed");
	let out = render_rss(&feed).expect("render");

	assert_eq!(out.matches("<item>").count(), 10);
	assert_eq!(feed.title, "* - Animezb");
	assert_eq!(feed.link, "http://animezb.example");
	assert_eq!(feed.items[0].link, "http://animezb.example/nzb/u0");
	assert_eq!(feed.items[0].enclosure_url, "http://animezb.example/nzb/u0/Show%2000.nzb");
	assert_eq!(feed.items[0].pub_date, "Sat, 01 Mar 2014 12:00:00 +0000");

	let requests = store.requests();
	let body = requests[0].body.as_ref().expect("body");

	assert_eq!(body["size"], 10);
	assert_eq!(body["query"]["query_string"]["query"], "*");
	assert_eq!(body["filter"]["range"]["completion"]["gte"], 0.9);
}

#[tokio::test]
async fn search_pages_and_skips_malformed_hits() {
	let hits = vec![
		upload_hit("u1", "Show 01", "2014-03-01T12:00:00Z", 9, 10),
		serde_json::json!({ "_id": "broken", "fields": {} }),
		upload_hit("u2", "Show 02", "2014-03-01T12:00:00Z", 10, 10),
	];
	let (service, store) =
		service(FakeStore::new().with_upload_hits(hits).with_upload_total(1_000));
	let page = service
		.search(SearchRequest { query: " show ".to_string(), page: 2, only_complete: false })
		.await
		.expect("search");

	assert_eq!(page.query, "show");
	assert_eq!(page.results.len(), 2);
	assert_eq!(page.total, 1_000);
	assert_eq!(page.last_page, 6);
	assert_eq!(page.results[0].completion, "90.00%");
	assert_eq!(page.results[1].completion, "100%");

	let requests = store.requests();
	let body = requests[0].body.as_ref().expect("body");

	assert_eq!(body["from"], 400);
	assert!(body.get("filter").is_none());
}

#[tokio::test]
async fn pages_past_the_end_land_on_the_last_page() {
	let hits = vec![upload_hit("u1", "Show 01", "2014-03-01T12:00:00Z", 10, 10)];
	let (service, store) = service(FakeStore::new().with_upload_hits(hits).with_upload_total(1));
	let page = service
		.search(SearchRequest { query: "show".to_string(), page: 99, only_complete: true })
		.await
		.expect("search");

	assert_eq!(page.page, 0);
	assert_eq!(page.last_page, 1);
	assert!(page.page < page.last_page);
	assert_eq!(page.pagination, vec![PageMarker::Page(1)]);
	assert_eq!(page.results.len(), 1);

	let requests = store.requests();
	let last = requests.last().and_then(|request| request.body.as_ref()).expect("body");

	assert_eq!(requests.len(), 2);
	assert_eq!(last["from"], 0);
}

#[tokio::test]
async fn upload_listing_is_sorted_by_subject() {
	let (service, _) = service(two_file_upload());
	let info = service.upload_info("u1").await.expect("listing");
	let subjects: Vec<&str> = info.files.iter().map(|file| file.subject.as_str()).collect();

	assert_eq!(subjects, vec![r#""show.nfo" yEnc (1/1)"#, r#""show.part1.rar" yEnc (1/5)"#]);
	assert_eq!(info.files[0].date, "2014-03-01");
}

#[tokio::test]
async fn store_failures_propagate() {
	let (service, _) = service(two_file_upload().unavailable());
	let search = service
		.search(SearchRequest { query: "show".to_string(), page: 0, only_complete: true })
		.await;
	let descriptor = service
		.descriptor(DescriptorRequest { uploads: vec!["u1".to_string()], name: None })
		.await;

	assert!(matches!(search, Err(Error::StoreUnavailable { .. })));
	assert!(matches!(descriptor, Err(Error::StoreUnavailable { .. })));
}
