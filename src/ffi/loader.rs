//! Dynamic Library Loader
//!
//! Safe wrapper around libloading for loading shared libraries.

use std::ffi::CString;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::{debug, info};

use super::binding::FunctionBinding;
use super::platform::Platform;
use super::types::{FfiSignature, NativeFn};
use super::{FfiError, FfiResult};

/// A dynamically loaded library
#[derive(Debug)]
pub struct DynamicLibrary {
    /// Path to the library
    path: PathBuf,
    /// The loaded library handle
    library: Library,
}

impl DynamicLibrary {
    /// Load a library from the given path
    pub fn load(path: impl AsRef<Path>) -> FfiResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(FfiError::LoadError {
                path,
                reason: "no such file".to_string(),
            });
        }

        // Safety: loading runs the library's initializers. We trust the
        // configured path to point at the intended library.
        let library = unsafe {
            Library::new(&path).map_err(|e| FfiError::LoadError {
                path: path.clone(),
                reason: e.to_string(),
            })?
        };

        info!(path = %path.display(), "loaded shared library");
        Ok(Self { path, library })
    }

    /// Load a library by file name through the system loader's search
    /// path (`LD_LIBRARY_PATH`, `ld.so.cache`, `PATH` on Windows, ...)
    pub fn load_system(filename: &str) -> FfiResult<Self> {
        let path = PathBuf::from(filename);

        // Safety: as in `load`; the system loader picks the file.
        let library = unsafe {
            Library::new(filename).map_err(|e| FfiError::LoadError {
                path: path.clone(),
                reason: e.to_string(),
            })?
        };

        info!(name = filename, "loaded system library");
        Ok(Self { path, library })
    }

    /// Get the path to this library
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `name` is in the library's export table
    pub fn contains(&self, name: &str) -> bool {
        let Ok(c_name) = CString::new(name) else {
            return false;
        };
        // Safety: the symbol is looked up as an opaque address and never called.
        unsafe {
            self.library
                .get::<*const ()>(c_name.as_bytes_with_nul())
                .is_ok()
        }
    }

    /// Bind `signature.name` as a function of type `F`.
    ///
    /// The declaration must describe the same shape as `F`; this is checked
    /// before the export table is consulted. Whether the native code really
    /// has that shape cannot be checked at all.
    pub fn bind<F: NativeFn>(
        &self,
        signature: &FfiSignature,
    ) -> FfiResult<FunctionBinding<'_, F>> {
        if !signature.matches::<F>() {
            return Err(FfiError::SignatureMismatch {
                symbol: signature.name.clone(),
                declared: signature.to_string(),
                bound: F::signature(&signature.name).to_string(),
            });
        }

        let c_name = CString::new(signature.name.as_str())
            .map_err(|_| FfiError::InvalidSymbol(signature.name.clone()))?;

        // Safety: the Rust type was checked against the declaration above;
        // the declaration itself is trusted to match the native code.
        let symbol: Symbol<'_, F> = unsafe {
            self.library
                .get(c_name.as_bytes_with_nul())
                .map_err(|e| FfiError::SymbolNotFound {
                    symbol: signature.name.clone(),
                    library: self.path.clone(),
                    reason: e.to_string(),
                })?
        };

        debug!(signature = %signature, "bound symbol");
        Ok(FunctionBinding::new(signature.clone(), symbol))
    }

    /// Unload the library now instead of at drop
    pub fn close(self) -> FfiResult<()> {
        let path = self.path;
        self.library.close().map_err(|e| FfiError::UnloadError {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "unloaded shared library");
        Ok(())
    }
}

/// Library loader for one logical library in one directory
#[derive(Debug, Clone)]
pub struct LibraryLoader {
    /// Directory holding the library
    dir: PathBuf,
    /// Logical name (`mylib` for `libmylib.so`)
    name: String,
    /// Naming convention to apply
    platform: Platform,
}

impl LibraryLoader {
    /// Create a loader for the platform this binary runs on
    pub fn new(dir: impl AsRef<Path>, name: impl Into<String>) -> FfiResult<Self> {
        Ok(Self::for_platform(dir, name, Platform::current()?))
    }

    /// Create a loader for an explicit platform
    pub fn for_platform(
        dir: impl AsRef<Path>,
        name: impl Into<String>,
        platform: Platform,
    ) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            name: name.into(),
            platform,
        }
    }

    /// Platform whose naming convention is used
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Path the library is expected at
    pub fn resolve(&self) -> PathBuf {
        self.platform.library_path(&self.dir, &self.name)
    }

    /// Resolve and load the library
    pub fn load(&self) -> FfiResult<DynamicLibrary> {
        let path = self.resolve();
        debug!(
            name = %self.name,
            platform = %self.platform,
            path = %path.display(),
            "resolved library path"
        );
        DynamicLibrary::load(path)
    }
}
