//! Error types for registration and façade lookups.

/// Registration failure. The registry is left untouched; the caller must
/// treat the extension member as unavailable rather than aborting the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
	/// No free id exists between the floor and the enforced bound.
	#[error("id space exhausted for `{store}` (floor {floor}, ceiling {ceiling:?})")]
	IdSpaceExhausted {
		store: String,
		floor: i32,
		ceiling: Option<i32>,
	},
}

/// Lookup miss from `parse`/`to_name`: the query names no native or
/// extension member. Routine control flow, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{query}` is not a member of {enum_name}")]
pub struct NotFound {
	pub enum_name: &'static str,
	pub query: String,
}
