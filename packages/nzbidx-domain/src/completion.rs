pub const DANGER_CLASS: &str = "text-danger";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
	pub label: String,
	pub incomplete: bool,
}
impl Completion {
	pub fn css_class(&self) -> Option<&'static str> {
		self.incomplete.then_some(DANGER_CLASS)
	}
}

/// Formats completion. A fully present upload is the literal `100%`; anything else renders the
/// store's ratio with two decimals and is flagged incomplete.
pub fn completion(complete: u64, total: u64, ratio: f64) -> Completion {
	if complete == total {
		return Completion { label: "100%".to_string(), incomplete: false };
	}

	Completion { label: format!("{:.2}%", ratio * 100.0), incomplete: true }
}

/// Ratio used when the store did not precompute one.
pub fn ratio(complete: u64, total: u64) -> f64 {
	if total == 0 {
		return 0.0;
	}

	complete as f64 / total as f64
}
