//! FFI Module for nativecall
//!
//! Loads a native shared library at runtime and calls its exports through
//! bindings whose signatures are declared up front.
//!
//! # Architecture
//!
//! ```text
//! (name, dir, platform)
//!       │
//!       ▼
//! Platform Resolver  ──► build/libmylib.so
//!       │
//!       ▼
//! Dynamic Loader (libloading)  ──► DynamicLibrary
//!       │
//!       ▼
//! bind::<F>(declaration)  ──► FunctionBinding<'lib, F>
//!       │
//!       ▼
//! Native Function Call
//! ```
//!
//! # Example
//!
//! ```no_run
//! use nativecall::ffi::{FfiSignature, LibraryLoader};
//!
//! let library = LibraryLoader::new("build", "mylib")?.load()?;
//! let sig = FfiSignature::parse("int twice_int(int x)").unwrap();
//! let twice = library.bind::<unsafe extern "C" fn(i32) -> i32>(&sig)?;
//! assert_eq!(unsafe { twice.call(21) }, 42);
//! # Ok::<(), nativecall::ffi::FfiError>(())
//! ```

mod args;
mod binding;
mod error;
mod loader;
mod platform;
mod types;

pub use args::{c_string, FloatBuffer};
pub use binding::FunctionBinding;
pub use error::{FfiError, FfiResult};
pub use loader::{DynamicLibrary, LibraryLoader};
pub use platform::{resolve_library_path, Platform};
pub use types::{FfiSignature, FfiType, NativeFn, NativeReturn, NativeType};
