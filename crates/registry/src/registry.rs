//! Per-enumeration registration state.
//!
//! # Invariants
//!
//! - Every issued id is inside the floor/ceiling window and outside the
//!   banned set.
//! - `entries` and `ids` stay bijective; no name or id is ever duplicated,
//!   and no native member name is ever shadowed by an extension entry.
//! - An issued id is never changed for a still-registered name; the only
//!   path that moves a name to a new id is conflict reassignment, which
//!   fires at most once, when the name is first re-registered after its
//!   persisted id became invalid.

use indexmap::IndexMap;
use modenum_store::{CacheEntry, CacheStore, StoreError};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::alloc;
use crate::error::RegisterError;

/// Registration state for one extensible enumeration.
///
/// Holds the bidirectional name↔id maps for extension members, the ids that
/// must never be issued, and the claims loaded from the cache store. One
/// instance per enum type, owned by the
/// [`RegistryDirectory`](crate::RegistryDirectory).
pub struct EnumRegistry {
	store_name: String,
	floor: i32,
	ceiling: Option<i32>,
	banned: FxHashSet<i32>,
	/// Native member names → raws. Registering one of these short-circuits
	/// to the native id so the merged name space never holds a duplicate.
	native: FxHashMap<String, i32>,
	/// name → id, insertion-ordered; doubles as the modded-id sequence.
	entries: IndexMap<String, i32>,
	/// id → name, inverse of `entries`.
	ids: FxHashMap<i32, String>,
	/// Claims loaded from the store, consulted on first registration of each
	/// name this run. Load order preserved so persisting is deterministic.
	cached: IndexMap<String, i32>,
	/// Issued ids plus still-unclaimed cached ids. Fresh allocation avoids
	/// this set so an absent module's persisted claim is never reissued.
	taken: FxHashSet<i32>,
	store: CacheStore,
}

impl EnumRegistry {
	/// Creates a registry and seeds it with previously persisted claims.
	pub fn load(
		store: CacheStore,
		store_name: impl Into<String>,
		floor: i32,
		ceiling: Option<i32>,
		banned: FxHashSet<i32>,
		native: FxHashMap<String, i32>,
	) -> Self {
		let store_name = store_name.into();
		let mut cached: IndexMap<String, i32> = IndexMap::new();
		for entry in store.load(&store_name) {
			if native.contains_key(&entry.name) {
				tracing::warn!(
					store = %store_name,
					name = %entry.name,
					old_id = entry.index,
					"persisted claim now shadows a native member; dropping"
				);
				continue;
			}
			cached.insert(entry.name, entry.index);
		}
		let taken = cached.values().copied().collect();
		Self {
			store_name,
			floor,
			ceiling,
			banned,
			native,
			entries: IndexMap::new(),
			ids: FxHashMap::default(),
			cached,
			taken,
			store,
		}
	}

	pub fn store_name(&self) -> &str {
		&self.store_name
	}

	pub fn floor(&self) -> i32 {
		self.floor
	}

	/// Issues the id for `name`, creating one if needed.
	///
	/// A name the host already defines natively resolves to the native id
	/// without touching registry state, so the merged name space stays
	/// duplicate-free. Re-entry within a run returns the already-issued id
	/// without mutating state. A persisted claim is reused when its id is
	/// still valid; an invalidated claim is reassigned to a fresh id and
	/// logged at warn, since save data recorded under the old raw value
	/// will no longer resolve to this name.
	///
	/// # Errors
	///
	/// [`RegisterError::IdSpaceExhausted`] when no free id remains; the
	/// registry is left untouched.
	pub fn request_or_create(&mut self, name: &str) -> Result<i32, RegisterError> {
		if let Some(&raw) = self.native.get(name) {
			tracing::debug!(
				store = %self.store_name,
				name,
				raw,
				"name is already a native member; returning its id"
			);
			return Ok(raw);
		}

		if let Some(&id) = self.entries.get(name) {
			return Ok(id);
		}

		if let Some(&cached) = self.cached.get(name) {
			// The name's own claim sits in `taken`; validate against the ids
			// actually issued this run.
			let issued: FxHashSet<i32> = self.ids.keys().copied().collect();
			if alloc::is_available(cached, self.floor, self.ceiling, &issued, &self.banned) {
				self.insert(name, cached);
				return Ok(cached);
			}
			tracing::warn!(
				store = %self.store_name,
				name,
				old_id = cached,
				"persisted id no longer available; reassigning"
			);
		}

		let id = alloc::next_available(self.floor, &self.taken, &self.banned, self.ceiling)
			.ok_or_else(|| RegisterError::IdSpaceExhausted {
				store: self.store_name.clone(),
				floor: self.floor,
				ceiling: self.ceiling,
			})?;
		tracing::debug!(store = %self.store_name, name, id, "issued fresh extension id");
		self.insert(name, id);
		Ok(id)
	}

	fn insert(&mut self, name: &str, id: i32) {
		self.entries.insert(name.to_owned(), id);
		self.ids.insert(id, name.to_owned());
		self.taken.insert(id);
	}

	pub fn contains_id(&self, id: i32) -> bool {
		self.ids.contains_key(&id)
	}

	pub fn contains_name(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Exact-match name of an issued extension id.
	pub fn resolve_name(&self, id: i32) -> Option<&str> {
		self.ids.get(&id).map(String::as_str)
	}

	/// Exact-match id of a registered extension name.
	pub fn resolve_id(&self, name: &str) -> Option<i32> {
		self.entries.get(name).copied()
	}

	/// Issued ids in registration order.
	pub fn modded_ids(&self) -> impl Iterator<Item = i32> + '_ {
		self.entries.values().copied()
	}

	/// Registered names in registration order.
	pub fn modded_names(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries as they would be persisted: issued claims in registration
	/// order, then still-valid claims from modules that did not load this
	/// run. Keeping the latter means an absent module's save data stays
	/// resolvable when it returns.
	pub fn entries_snapshot(&self) -> Vec<CacheEntry> {
		let mut out: Vec<CacheEntry> = self
			.entries
			.iter()
			.map(|(name, &id)| CacheEntry::new(name.clone(), id))
			.collect();
		for (name, &id) in &self.cached {
			if self.entries.contains_key(name) {
				continue;
			}
			if id < self.floor || self.banned.contains(&id) || self.ids.contains_key(&id) {
				continue;
			}
			out.push(CacheEntry::new(name.clone(), id));
		}
		out
	}

	/// Serializes current entries through the cache store.
	///
	/// # Errors
	///
	/// Returns [`StoreError`] if the write fails; in-memory state is
	/// untouched so the host can retry on its next save.
	pub fn persist(&self) -> Result<(), StoreError> {
		self.store.save(&self.store_name, &self.entries_snapshot())
	}
}
