const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Formats a byte count with binary prefixes and two decimals, e.g. `1.00 KiB`.
pub fn format_bytes(bytes: u64) -> String {
	let mut value = bytes as f64;
	let mut unit = 0;

	while value >= 1024.0 && unit < UNITS.len() - 1 {
		value /= 1024.0;
		unit += 1;
	}

	format!("{value:.2} {}", UNITS[unit])
}
