//! Runtime-extensible enumerations.
//!
//! Hosts define closed, integer-backed enumerations; independently loaded
//! extension modules add members at runtime through a per-enum
//! [`EnumRegistry`], discovered via the process-wide [`RegistryDirectory`].
//! Issued ids stay stable across restarts through the file-backed
//! [`CacheStore`] and never collide with native members or with other
//! modules' claims.
//!
//! Extension members are explicit, not spoofed: code that needs the merged
//! member set calls the directory's façade operations
//! ([`RegistryDirectory::all_values`], [`RegistryDirectory::parse`],
//! [`RegistryDirectory::to_name`], [`RegistryDirectory::is_defined`]) and
//! receives [`Extended`] values tagged native or modded.
//!
//! A host enum opts in by implementing [`ExtensibleEnum`]; registration is a
//! single call:
//!
//! - `directory().register::<MyEnum>("SomeModdedMember")` issues an id,
//! - `directory().persist_all()` from the host's save hook makes it durable.

mod alloc;
mod directory;
mod error;
mod facade;
mod registry;
mod traits;

pub use directory::{RegistryDirectory, RegistryHandle, directory, init};
pub use error::{NotFound, RegisterError};
pub use modenum_store::{CacheEntry, CacheStore, StoreError};
pub use registry::EnumRegistry;
pub use traits::{Extended, ExtensibleEnum};
