const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Renders the time since posting as `Nm` under 90 minutes, `Nh` under 12 hours, else `Nd`.
/// Values are truncated.
pub fn age_bucket(elapsed_secs: i64) -> String {
	let elapsed = elapsed_secs.max(0);

	if elapsed < 90 * MINUTE {
		format!("{}m", elapsed / MINUTE)
	} else if elapsed < 12 * HOUR {
		format!("{}h", elapsed / HOUR)
	} else {
		format!("{}d", elapsed / DAY)
	}
}
