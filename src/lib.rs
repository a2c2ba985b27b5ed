//! nativecall - typed calls into native shared libraries
//!
//! Locates a platform-specific shared library, binds its exports with
//! explicitly declared signatures, and calls them with scalars, C strings
//! and borrowed float buffers.
//!
//! # Example
//!
//! ```no_run
//! use nativecall::exports::MyLib;
//! use nativecall::ffi::LibraryLoader;
//!
//! let library = LibraryLoader::new("build", "mylib")?.load()?;
//! let lib = MyLib::bind(&library)?;
//!
//! lib.say_hello();
//! assert_eq!(lib.twice_int(21), 42);
//!
//! let mut data = vec![0.5f32; 16];
//! lib.test_array(&mut data);
//! # Ok::<(), nativecall::ffi::FfiError>(())
//! ```

pub mod config;
pub mod demo;
pub mod exports;
pub mod ffi;
pub mod logging;

pub use config::{ConfigError, NativecallConfig};
pub use exports::MyLib;
pub use ffi::{DynamicLibrary, FfiError, FfiResult, LibraryLoader, Platform};
