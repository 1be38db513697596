#[derive(Debug)]
pub struct PageSlice<T> {
	pub items: Vec<T>,
	pub total: usize,
	pub has_more: bool,
}

/// Slice a fully filtered result list into one page. Page numbers at or
/// below zero, and pages past the end, yield an empty slice rather than an
/// error; `total` always counts the whole filtered list.
pub fn paginate<T>(items: Vec<T>, page: i64, limit: u32) -> PageSlice<T> {
	let total = items.len();
	let limit_i = i64::from(limit);
	let has_more = page.checked_mul(limit_i).map(|end| end < total as i64).unwrap_or(false);
	let start = match page.checked_sub(1).and_then(|offset| offset.checked_mul(limit_i)) {
		Some(start) if page >= 1 && start < total as i64 => start as usize,
		_ => {
			return PageSlice { items: Vec::new(), total, has_more };
		},
	};
	let items: Vec<T> = items.into_iter().skip(start).take(limit as usize).collect();

	PageSlice { items, total, has_more }
}
