use std::{collections::HashSet, hash::Hash};

/// Combine the three search tiers into one ordered list: featured results in
/// their fetch order, then pro, then basic. Pro and basic are filtered
/// against the set of featured keys built once; the schema guarantees a
/// business cannot hold both tiers at the same time, so no further
/// de-duplication is needed between them.
pub fn merge_tiers<T, K, F>(featured: Vec<T>, pro: Vec<T>, basic: Vec<T>, key_of: F) -> Vec<T>
where
	K: Eq + Hash,
	F: Fn(&T) -> K,
{
	let featured_keys: HashSet<K> = featured.iter().map(&key_of).collect();
	let mut merged = featured;

	merged.extend(pro.into_iter().filter(|item| !featured_keys.contains(&key_of(item))));
	merged.extend(basic.into_iter().filter(|item| !featured_keys.contains(&key_of(item))));

	merged
}
