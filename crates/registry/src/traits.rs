//! Enumeration identity and the tagged extended-value type.

/// Identity of a host enumeration that opted into runtime extension.
///
/// Native members conventionally live below [`EXTENSION_FLOOR`]; any native
/// raw at or above the floor is banned from allocation at registry
/// construction, so extensions can never shadow a native member.
///
/// [`EXTENSION_FLOOR`]: ExtensibleEnum::EXTENSION_FLOOR
pub trait ExtensibleEnum: Copy + Eq + std::hash::Hash + Send + Sync + 'static {
	/// Logical name; keys the cache store file and appears in diagnostics.
	const STORE_NAME: &'static str;

	/// Lowest raw value the allocator may issue.
	const EXTENSION_FLOOR: i32;

	/// Inclusive upper bound on issued raws, when the host enforces one
	/// (e.g. a save-format limit). `None` leaves the space open-ended.
	const EXTENSION_CEILING: Option<i32> = None;

	/// Native members as `(name, raw)` pairs, in declaration order.
	fn native_members() -> &'static [(&'static str, i32)];

	/// The member's underlying integer.
	fn raw(self) -> i32;

	/// Converts a raw value back to a native member, if it is one.
	fn from_raw(raw: i32) -> Option<Self>;

	/// Name of the native member with this raw value.
	fn native_name(raw: i32) -> Option<&'static str> {
		Self::native_members()
			.iter()
			.find(|(_, r)| *r == raw)
			.map(|(n, _)| *n)
	}

	/// Exact-match parse over native members. No case folding.
	fn parse_native(name: &str) -> Option<Self> {
		Self::native_members()
			.iter()
			.find(|(n, _)| *n == name)
			.and_then(|(_, r)| Self::from_raw(*r))
	}
}

/// A value of an extensible enumeration: a native member, or an
/// extension-issued raw id.
///
/// Call sites that previously consumed the bare enum consume this instead.
/// The tag keeps extension provenance explicit rather than smuggling
/// out-of-range raws through the native type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extended<E> {
	Native(E),
	Modded(i32),
}

impl<E: ExtensibleEnum> Extended<E> {
	/// Classifies a raw value: native when the host enum defines it, modded
	/// otherwise.
	pub fn from_raw(raw: i32) -> Self {
		match E::from_raw(raw) {
			Some(native) => Extended::Native(native),
			None => Extended::Modded(raw),
		}
	}

	/// The underlying integer, which is what user save data records.
	pub fn raw(self) -> i32 {
		match self {
			Extended::Native(e) => e.raw(),
			Extended::Modded(raw) => raw,
		}
	}

	pub fn is_native(self) -> bool {
		matches!(self, Extended::Native(_))
	}

	pub fn as_native(self) -> Option<E> {
		match self {
			Extended::Native(e) => Some(e),
			Extended::Modded(_) => None,
		}
	}
}
