use std::sync::LazyLock;

use regex::Regex;

static PART_MARKER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\((\d+)/(\d+)\)").expect("Part marker pattern must compile."));

/// Padding widths tried, in order, when locating the part marker to rewrite. Zero means
/// unpadded.
const PART_WIDTHS: [usize; 4] = [0, 2, 3, 4];

/// A `(P/N)` part marker extracted from a posting subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartMarker {
	pub part: u64,
	pub total: u64,
}

/// Returns the last `(P/N)` marker in the subject, which is where yEnc posters put the part
/// counter.
pub fn part_marker(subject: &str) -> Option<PartMarker> {
	let captures = PART_MARKER.captures_iter(subject).last()?;
	let part = captures.get(1)?.as_str().parse().ok()?;
	let total = captures.get(2)?.as_str().parse().ok()?;

	Some(PartMarker { part, total })
}

/// Rewrites the part marker so the subject reads as part one of N.
///
/// Download clients refuse to start a multi-part job whose first segment is not numbered one,
/// and some posters count from zero or split with an offset. The marker keeps its digit width:
/// `(005/010)` becomes `(001/010)`. Subjects without a recognizable marker, or already at part
/// one, come back unchanged.
pub fn ensure_first_part(subject: &str) -> String {
	let Some(captures) = PART_MARKER.captures_iter(subject).last() else {
		return subject.to_string();
	};
	let Some(digits) = captures.get(1) else {
		return subject.to_string();
	};
	let Ok(part) = digits.as_str().parse::<u64>() else {
		return subject.to_string();
	};

	if part == 1 {
		return subject.to_string();
	}

	for width in PART_WIDTHS {
		if format!("{part:0width$}") == digits.as_str() {
			let mut normalized = subject.to_string();

			normalized.replace_range(digits.range(), &format!("{:0width$}", 1));

			return normalized;
		}
	}

	subject.to_string()
}
