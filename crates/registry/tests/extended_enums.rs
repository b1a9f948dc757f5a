//! End-to-end behavior of the directory, façade, and persistence layers,
//! driven through host-style enum types.

use modenum_registry::{
	CacheEntry, CacheStore, Extended, ExtensibleEnum, NotFound, RegistryDirectory,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

/// Host enum with natives straddling the extension floor: 0–2 are ordinary
/// members, 11–13 were added by the host later and sit inside the extension
/// range, so they get banned from allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
enum PingKind {
	Ship = 0,
	Lifepod = 1,
	Signal = 2,
	Beacon = 11,
	Camera = 12,
	Sunbeam = 13,
}

impl ExtensibleEnum for PingKind {
	const STORE_NAME: &'static str = "PingKind";
	const EXTENSION_FLOOR: i32 = 11;

	fn native_members() -> &'static [(&'static str, i32)] {
		&[
			("Ship", 0),
			("Lifepod", 1),
			("Signal", 2),
			("Beacon", 11),
			("Camera", 12),
			("Sunbeam", 13),
		]
	}

	fn raw(self) -> i32 {
		self as i32
	}

	fn from_raw(raw: i32) -> Option<Self> {
		Some(match raw {
			0 => Self::Ship,
			1 => Self::Lifepod,
			2 => Self::Signal,
			11 => Self::Beacon,
			12 => Self::Camera,
			13 => Self::Sunbeam,
			_ => return None,
		})
	}
}

/// Never extended in these tests; exercises the native-only fast path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CraftKind {
	Basic,
	Advanced,
}

impl ExtensibleEnum for CraftKind {
	const STORE_NAME: &'static str = "CraftKind";
	const EXTENSION_FLOOR: i32 = 2;

	fn native_members() -> &'static [(&'static str, i32)] {
		&[("Basic", 0), ("Advanced", 1)]
	}

	fn raw(self) -> i32 {
		self as i32
	}

	fn from_raw(raw: i32) -> Option<Self> {
		Some(match raw {
			0 => Self::Basic,
			1 => Self::Advanced,
			_ => return None,
		})
	}
}

#[test]
fn natives_above_floor_are_skipped() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));

	assert_eq!(dir.register::<PingKind>("Foo").unwrap(), 14);
	assert_eq!(dir.register::<PingKind>("Bar").unwrap(), 15);
}

#[test]
fn ids_survive_a_restart() {
	let root = tempdir().unwrap();
	let store = CacheStore::new(root.path());

	// Run 1: register, persist on the host save hook.
	let run1 = RegistryDirectory::new(store.clone());
	let foo = run1.register::<PingKind>("Foo").unwrap();
	let bar = run1.register::<PingKind>("Bar").unwrap();
	run1.persist_all().unwrap();
	drop(run1);

	// Run 2: fresh process, same store, reverse registration order.
	let run2 = RegistryDirectory::new(store);
	assert_eq!(run2.register::<PingKind>("Bar").unwrap(), bar);
	assert_eq!(run2.register::<PingKind>("Foo").unwrap(), foo);
}

#[test]
fn registration_is_idempotent_through_the_directory() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));

	let first = dir.register::<PingKind>("Foo").unwrap();
	let second = dir.register::<PingKind>("Foo").unwrap();
	assert_eq!(first, second);
	assert_eq!(dir.get_or_create::<PingKind>().len(), 1);
}

#[test]
fn union_has_all_members_and_no_duplicates() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));
	dir.register::<PingKind>("Foo").unwrap();
	dir.register::<PingKind>("Bar").unwrap();

	let values = dir.all_values::<PingKind>();
	assert_eq!(values.len(), PingKind::native_members().len() + 2);

	let mut raws: Vec<i32> = values.iter().map(|v| v.raw()).collect();
	raws.sort_unstable();
	raws.dedup();
	assert_eq!(raws.len(), values.len());

	let names = dir.all_names::<PingKind>();
	assert_eq!(
		names,
		vec!["Ship", "Lifepod", "Signal", "Beacon", "Camera", "Sunbeam", "Foo", "Bar"]
	);
}

#[test]
fn parse_covers_native_extension_and_miss() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));
	let foo = dir.register::<PingKind>("Foo").unwrap();

	assert_eq!(
		dir.parse::<PingKind>("Beacon").unwrap(),
		Extended::Native(PingKind::Beacon)
	);
	assert_eq!(dir.parse::<PingKind>("Foo").unwrap(), Extended::Modded(foo));
	assert_eq!(
		dir.parse::<PingKind>("beacon").unwrap_err(),
		NotFound {
			enum_name: "PingKind",
			query: "beacon".into(),
		}
	);
}

#[test]
fn to_name_covers_native_extension_and_miss() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));
	let foo = dir.register::<PingKind>("Foo").unwrap();

	assert_eq!(dir.to_name::<PingKind>(12).unwrap(), "Camera");
	assert_eq!(dir.to_name::<PingKind>(foo).unwrap(), "Foo");
	assert!(dir.to_name::<PingKind>(999).is_err());
}

#[test]
fn is_defined_spans_both_member_kinds() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));
	let foo = dir.register::<PingKind>("Foo").unwrap();

	assert!(dir.is_defined::<PingKind>(0));
	assert!(dir.is_defined::<PingKind>(13));
	assert!(dir.is_defined::<PingKind>(foo));
	assert!(!dir.is_defined::<PingKind>(foo + 1));
}

#[test]
fn unextended_enum_stays_native_only() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));

	assert!(dir.try_get::<CraftKind>().is_none());
	assert_eq!(
		dir.all_values::<CraftKind>(),
		vec![
			Extended::Native(CraftKind::Basic),
			Extended::Native(CraftKind::Advanced),
		]
	);
	assert_eq!(
		dir.parse::<CraftKind>("Advanced").unwrap(),
		Extended::Native(CraftKind::Advanced)
	);
	assert!(!dir.is_defined::<CraftKind>(7));
	// Probing must not have created a registry.
	assert!(dir.try_get::<CraftKind>().is_none());
}

#[test]
fn native_names_cannot_be_shadowed() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));

	// Registering a name the host already defines resolves to the native id
	// and leaves the registry empty.
	assert_eq!(dir.register::<PingKind>("Beacon").unwrap(), 11);
	assert!(dir.get_or_create::<PingKind>().is_empty());

	dir.register::<PingKind>("Foo").unwrap();

	let names = dir.all_names::<PingKind>();
	let mut deduped = names.clone();
	deduped.sort();
	deduped.dedup();
	assert_eq!(deduped.len(), names.len());

	assert_eq!(
		dir.parse::<PingKind>("Beacon").unwrap(),
		Extended::Native(PingKind::Beacon)
	);
}

#[test]
fn extra_bans_shift_allocation() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));

	// Another module sharing the numeric space already claimed 14 and 15.
	let reg = dir.get_or_create_with::<PingKind>(&[14, 15]);
	assert_eq!(reg.register("Foo").unwrap(), 16);
}

#[test]
fn conflicting_persisted_id_is_reassigned_once() {
	let root = tempdir().unwrap();
	let store = CacheStore::new(root.path());
	// A claim from an earlier host version, now shadowed by native Sunbeam=13.
	store
		.save("PingKind", &[CacheEntry::new("Foo", 13)])
		.unwrap();

	let dir = RegistryDirectory::new(store);
	let reassigned = dir.register::<PingKind>("Foo").unwrap();
	assert_eq!(reassigned, 14);
	// Idempotent after the one-time reassignment.
	assert_eq!(dir.register::<PingKind>("Foo").unwrap(), reassigned);
	assert_eq!(dir.to_name::<PingKind>(13).unwrap(), "Sunbeam");
}

#[test]
fn persist_all_writes_every_extended_enum() {
	let root = tempdir().unwrap();
	let store = CacheStore::new(root.path());
	let dir = RegistryDirectory::new(store.clone());
	dir.register::<PingKind>("Foo").unwrap();
	dir.register::<CraftKind>("Improvised").unwrap();
	dir.persist_all().unwrap();

	assert_eq!(store.load("PingKind"), vec![CacheEntry::new("Foo", 14)]);
	assert_eq!(store.load("CraftKind"), vec![CacheEntry::new("Improvised", 2)]);
}

#[test]
fn handles_share_one_registry() {
	let root = tempdir().unwrap();
	let dir = RegistryDirectory::new(CacheStore::new(root.path()));

	let a = dir.get_or_create::<PingKind>();
	let b = dir.get_or_create::<PingKind>();
	let id = a.register("Foo").unwrap();
	assert_eq!(b.resolve_id("Foo"), Some(id));
	assert_eq!(b.resolve_name(id), Some("Foo".to_owned()));
	assert_eq!(b.modded_ids(), vec![id]);
	assert_eq!(b.modded_names(), vec!["Foo".to_owned()]);
}
