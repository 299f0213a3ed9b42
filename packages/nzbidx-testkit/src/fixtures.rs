use serde_json::Value;

/// File hit as the store returns it under `_source`.
pub fn file_hit(id: &str, filename: &str, subject: &str, complete: u32, length: u32) -> Value {
	serde_json::json!({
		"_id": id,
		"_source": {
			"filename": filename,
			"subject": subject,
			"poster": "poster@example.org (Poster)",
			"date": "2014-03-01T12:00:00Z",
			"group": ["alt.binaries.multimedia.anime", "alt.binaries.anime"],
			"complete": complete,
			"length": length,
			"size": u64::from(complete) * 739_000,
		}
	})
}

pub fn segment_hit(id: &str, part: u32, message_id: &str) -> Value {
	serde_json::json!({
		"_id": id,
		"_source": {
			"bytes": 739_000,
			"part": part,
			"message_id": message_id,
		}
	})
}

/// Upload search hit in the `fields` projection, where every value is an array.
pub fn upload_hit(id: &str, filename: &str, date: &str, complete: u32, length: u32) -> Value {
	let completion = if length == 0 { 0.0 } else { f64::from(complete) / f64::from(length) };

	serde_json::json!({
		"_id": id,
		"fields": {
			"filename": [filename],
			"subject": [format!("[Group] {filename} yEnc (1/{length})")],
			"poster": ["poster@example.org (Poster)"],
			"date": [date],
			"group": ["alt.binaries.multimedia.anime", "alt.binaries.anime"],
			"complete": [complete],
			"length": [length],
			"size": [u64::from(complete) * 1_048_576],
			"completion": [completion],
			"types.mkv": [1.0],
			"types.par2": [3.0],
			"types.nfo": [1.0],
		}
	})
}
