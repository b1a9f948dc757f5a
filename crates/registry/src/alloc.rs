//! Free-id scanning over the extension id space.

use rustc_hash::FxHashSet;

/// Returns the smallest id `>= floor` (and `<= ceiling`, when set) that is
/// in neither `used` nor `banned`, or `None` when the space is exhausted.
///
/// Deterministic for a fixed `used ∪ banned`: independent processes that
/// load the same claims converge on the same next id.
pub(crate) fn next_available(
	floor: i32,
	used: &FxHashSet<i32>,
	banned: &FxHashSet<i32>,
	ceiling: Option<i32>,
) -> Option<i32> {
	let mut candidate = floor;
	loop {
		if ceiling.is_some_and(|c| candidate > c) {
			return None;
		}
		if !used.contains(&candidate) && !banned.contains(&candidate) {
			return Some(candidate);
		}
		candidate = candidate.checked_add(1)?;
	}
}

/// True if `id` may be (re)issued: inside the floor/ceiling window and in
/// neither set.
///
/// Validates a cache-store hit before reuse, catching persisted ids that
/// have since been claimed by a newly observed native member or another
/// module, or that fell outside a bound the host has since tightened.
pub(crate) fn is_available(
	id: i32,
	floor: i32,
	ceiling: Option<i32>,
	used: &FxHashSet<i32>,
	banned: &FxHashSet<i32>,
) -> bool {
	id >= floor
		&& ceiling.is_none_or(|c| id <= c)
		&& !used.contains(&id)
		&& !banned.contains(&id)
}
