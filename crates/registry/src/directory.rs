//! Process-wide lookup from enumeration identity to its registry.
//!
//! Registries are created lazily, on first registration or first directory
//! lookup for a type; the map is read-mostly once module loading completes.
//! Generic call sites ask "is this type extensible, and by which registry"
//! here instead of hardcoding per-type state.

use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use modenum_store::{CacheStore, StoreError};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::RegisterError;
use crate::registry::EnumRegistry;
use crate::traits::ExtensibleEnum;

type Shared = Arc<RwLock<EnumRegistry>>;

/// Map from enumeration identity to its [`EnumRegistry`], plus the cache
/// store every registry loads from and persists to.
pub struct RegistryDirectory {
	store: CacheStore,
	map: RwLock<FxHashMap<TypeId, Shared>>,
}

impl RegistryDirectory {
	pub fn new(store: CacheStore) -> Self {
		Self {
			store,
			map: RwLock::new(FxHashMap::default()),
		}
	}

	pub fn store(&self) -> &CacheStore {
		&self.store
	}

	/// Returns the registry for `E`, creating and seeding it on first use.
	pub fn get_or_create<E: ExtensibleEnum>(&self) -> RegistryHandle<E> {
		self.get_or_create_with::<E>(&[])
	}

	/// Like [`get_or_create`](Self::get_or_create), additionally banning ids
	/// claimed by other tenants of the same numeric space. Extra bans take
	/// effect only on the call that creates the registry.
	pub fn get_or_create_with<E: ExtensibleEnum>(&self, extra_banned: &[i32]) -> RegistryHandle<E> {
		let key = TypeId::of::<E>();
		if let Some(shared) = self.map.read().get(&key) {
			return RegistryHandle::new(shared.clone());
		}

		let mut map = self.map.write();
		let shared = map
			.entry(key)
			.or_insert_with(|| {
				tracing::debug!(
					store = E::STORE_NAME,
					floor = E::EXTENSION_FLOOR,
					"creating enum registry"
				);
				let mut banned: FxHashSet<i32> = E::native_members()
					.iter()
					.map(|(_, raw)| *raw)
					.filter(|raw| *raw >= E::EXTENSION_FLOOR)
					.collect();
				banned.extend(extra_banned.iter().copied());
				let native: FxHashMap<String, i32> = E::native_members()
					.iter()
					.map(|(name, raw)| ((*name).to_owned(), *raw))
					.collect();
				Arc::new(RwLock::new(EnumRegistry::load(
					self.store.clone(),
					E::STORE_NAME,
					E::EXTENSION_FLOOR,
					E::EXTENSION_CEILING,
					banned,
					native,
				)))
			})
			.clone();
		RegistryHandle::new(shared)
	}

	/// Non-creating lookup. Enumerations nobody extended stay out of the map,
	/// so the façade's fast path costs one read-locked hash probe.
	pub fn try_get<E: ExtensibleEnum>(&self) -> Option<RegistryHandle<E>> {
		self.map
			.read()
			.get(&TypeId::of::<E>())
			.cloned()
			.map(RegistryHandle::new)
	}

	/// Registers `name` as an extension member of `E` and returns its id.
	///
	/// # Errors
	///
	/// [`RegisterError::IdSpaceExhausted`] when `E`'s id space has no free
	/// slot left; the member is then simply unavailable.
	pub fn register<E: ExtensibleEnum>(&self, name: &str) -> Result<i32, RegisterError> {
		self.get_or_create::<E>().register(name)
	}

	/// Persists every registry. This is the host's "persist now" hook,
	/// typically wired to the user save action; it blocks on file I/O.
	///
	/// # Errors
	///
	/// Returns the first [`StoreError`] encountered. Registries persisted
	/// before the failure stay persisted; in-memory state is untouched
	/// everywhere, so the host can retry.
	pub fn persist_all(&self) -> Result<(), StoreError> {
		let registries: Vec<Shared> = self.map.read().values().cloned().collect();
		for shared in registries {
			shared.write().persist()?;
		}
		Ok(())
	}
}

/// Typed handle to one enumeration's registry.
///
/// Cheap to clone; all methods lock internally, so lookups may run
/// concurrently with late registrations.
pub struct RegistryHandle<E> {
	shared: Shared,
	_enum: PhantomData<fn() -> E>,
}

impl<E> Clone for RegistryHandle<E> {
	fn clone(&self) -> Self {
		Self {
			shared: self.shared.clone(),
			_enum: PhantomData,
		}
	}
}

impl<E: ExtensibleEnum> RegistryHandle<E> {
	fn new(shared: Shared) -> Self {
		Self {
			shared,
			_enum: PhantomData,
		}
	}

	/// Issues (or re-issues) the id for `name`. Idempotent within a run;
	/// stable across runs while the persisted id stays available.
	pub fn register(&self, name: &str) -> Result<i32, RegisterError> {
		self.shared.write().request_or_create(name)
	}

	pub fn resolve_id(&self, name: &str) -> Option<i32> {
		self.shared.read().resolve_id(name)
	}

	pub fn resolve_name(&self, id: i32) -> Option<String> {
		self.shared.read().resolve_name(id).map(str::to_owned)
	}

	pub fn contains_id(&self, id: i32) -> bool {
		self.shared.read().contains_id(id)
	}

	pub fn contains_name(&self, name: &str) -> bool {
		self.shared.read().contains_name(name)
	}

	/// Snapshot of issued ids, in registration order.
	pub fn modded_ids(&self) -> Vec<i32> {
		self.shared.read().modded_ids().collect()
	}

	/// Snapshot of registered names, in registration order.
	pub fn modded_names(&self) -> Vec<String> {
		self.shared.read().modded_names().map(str::to_owned).collect()
	}

	pub fn len(&self) -> usize {
		self.shared.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.shared.read().is_empty()
	}

	/// Serializes this registry's entries through the cache store. Takes the
	/// write lock, so persists of one registry never overlap.
	pub fn persist(&self) -> Result<(), StoreError> {
		self.shared.write().persist()
	}
}

static DIRECTORY: OnceLock<RegistryDirectory> = OnceLock::new();

/// Installs the process-wide directory with a host-chosen store. Returns
/// false (and changes nothing) if a directory is already installed.
pub fn init(store: CacheStore) -> bool {
	DIRECTORY.set(RegistryDirectory::new(store)).is_ok()
}

/// The process-wide directory. When [`init`] was not called first, the store
/// defaults to a `modenum` folder under the platform data directory.
pub fn directory() -> &'static RegistryDirectory {
	DIRECTORY.get_or_init(|| {
		let root = dirs::data_dir()
			.unwrap_or_else(std::env::temp_dir)
			.join("modenum");
		tracing::debug!(root = %root.display(), "using default cache store root");
		RegistryDirectory::new(CacheStore::new(root))
	})
}
