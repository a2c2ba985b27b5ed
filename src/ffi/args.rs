//! Borrowed call arguments
//!
//! Memory handed to native code is only ever lent for a single call. The
//! helpers here make that scope visible in the types.

use std::ffi::{c_void, CString};

use super::{FfiError, FfiResult};

/// Copy `bytes` into a NUL-terminated string for a `const char*` parameter.
///
/// Fails when `bytes` already contains a NUL, which would silently truncate
/// the string on the native side.
pub fn c_string(bytes: impl Into<Vec<u8>>) -> FfiResult<CString> {
    CString::new(bytes).map_err(|e| {
        FfiError::InvalidString(format!("interior NUL byte at offset {}", e.nul_position()))
    })
}

/// A caller-owned run of `f32` lent to native code.
///
/// The raw address is handed out inside [`FloatBuffer::with_raw`], and the
/// mutable borrow of the slice ends when that closure returns. The address
/// itself is a plain pointer: using it after the closure is on the caller.
#[derive(Debug)]
pub struct FloatBuffer<'a> {
    data: &'a mut [f32],
}

impl<'a> FloatBuffer<'a> {
    /// Lend `data` for one native call
    pub fn new(data: &'a mut [f32]) -> Self {
        Self { data }
    }

    /// Element count
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer has no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes the callee may read or write starting at the base address
    pub fn byte_len(&self) -> usize {
        std::mem::size_of_val(self.data)
    }

    /// Run `f` with the base address and element count. The callee may
    /// touch exactly [`byte_len`](Self::byte_len) bytes from that address.
    pub fn with_raw<T>(&mut self, f: impl FnOnce(*mut c_void, usize) -> T) -> T {
        let len = self.data.len();
        f(self.data.as_mut_ptr().cast(), len)
    }
}
