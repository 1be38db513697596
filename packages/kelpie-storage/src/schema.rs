pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_councils.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_councils.sql")),
				"tables/002_suburbs.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_suburbs.sql")),
				"tables/003_businesses.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_businesses.sql")),
				"tables/004_featured_placements.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_featured_placements.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::render_schema;

	#[test]
	fn schema_expands_every_include() {
		let sql = render_schema();

		assert!(!sql.contains("\\ir "), "unexpanded include in schema: {sql}");
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS councils"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS suburbs"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS businesses"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS featured_placements"));
	}
}
