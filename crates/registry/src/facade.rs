//! Merged native + extension enumeration operations.
//!
//! These are the standard inspection operations the host's own enum API used
//! to answer alone. Each merges the native member table with the matching
//! registry's entries; enumerations nobody extended take the
//! [`RegistryDirectory::try_get`] fast path and see native behavior only.

use crate::directory::RegistryDirectory;
use crate::error::NotFound;
use crate::traits::{Extended, ExtensibleEnum};

impl RegistryDirectory {
	/// All members of `E`: natives in declaration order, then extensions in
	/// registration order. Duplicate-free by construction, since native raws
	/// at or above the floor are banned from allocation.
	pub fn all_values<E: ExtensibleEnum>(&self) -> Vec<Extended<E>> {
		let mut values: Vec<Extended<E>> = E::native_members()
			.iter()
			.filter_map(|(_, raw)| E::from_raw(*raw))
			.map(Extended::Native)
			.collect();
		if let Some(reg) = self.try_get::<E>() {
			values.extend(reg.modded_ids().into_iter().map(Extended::Modded));
		}
		values
	}

	/// All member names of `E`, native then extension.
	pub fn all_names<E: ExtensibleEnum>(&self) -> Vec<String> {
		let mut names: Vec<String> = E::native_members()
			.iter()
			.map(|(name, _)| (*name).to_owned())
			.collect();
		if let Some(reg) = self.try_get::<E>() {
			names.extend(reg.modded_names());
		}
		names
	}

	/// Name → value. Extension entries are consulted before native parsing;
	/// exact match only.
	///
	/// # Errors
	///
	/// [`NotFound`] when the text names neither kind of member — a routine
	/// outcome for callers probing membership.
	pub fn parse<E: ExtensibleEnum>(&self, text: &str) -> Result<Extended<E>, NotFound> {
		if let Some(reg) = self.try_get::<E>()
			&& let Some(id) = reg.resolve_id(text)
		{
			return Ok(Extended::Modded(id));
		}
		E::parse_native(text)
			.map(Extended::Native)
			.ok_or_else(|| NotFound {
				enum_name: E::STORE_NAME,
				query: text.to_owned(),
			})
	}

	/// Value → name, registry first, then the native table.
	///
	/// # Errors
	///
	/// [`NotFound`] when the raw value is neither native nor issued.
	pub fn to_name<E: ExtensibleEnum>(&self, raw: i32) -> Result<String, NotFound> {
		if let Some(reg) = self.try_get::<E>()
			&& let Some(name) = reg.resolve_name(raw)
		{
			return Ok(name);
		}
		E::native_name(raw)
			.map(str::to_owned)
			.ok_or_else(|| NotFound {
				enum_name: E::STORE_NAME,
				query: raw.to_string(),
			})
	}

	/// True when `raw` is a native member or an issued extension id.
	pub fn is_defined<E: ExtensibleEnum>(&self, raw: i32) -> bool {
		E::from_raw(raw).is_some()
			|| self
				.try_get::<E>()
				.is_some_and(|reg| reg.contains_id(raw))
	}
}
