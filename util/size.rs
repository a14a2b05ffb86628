/// Render a byte count as kibibytes rounded to one decimal, e.g. `"1.5 KB"`.
pub fn kib(bytes: u64) -> String {
	format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[test]
fn test_kib() {
	assert_eq!(kib(0), "0.0 KB");
	assert_eq!(kib(1024), "1.0 KB");
	assert_eq!(kib(1536), "1.5 KB");
	assert_eq!(kib(100), "0.1 KB");
}
