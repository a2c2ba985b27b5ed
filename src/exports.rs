//! Typed facade over the `mylib` export table.

use std::ffi::{c_char, c_void, CStr};

use tracing::trace;

use crate::ffi::{DynamicLibrary, FfiError, FfiResult, FfiSignature, FloatBuffer, FunctionBinding};

/// C prototypes of every export, as they appear in the library's header.
pub const DECLARATIONS: [&str; 5] = [
    "void say_hello(void)",
    "int twice_int(int x)",
    "float twice_float(float x)",
    "void print_str(const char* s)",
    "void test_array(void* data, size_t len)",
];

type SayHelloFn = unsafe extern "C" fn();
type TwiceIntFn = unsafe extern "C" fn(i32) -> i32;
type TwiceFloatFn = unsafe extern "C" fn(f32) -> f32;
type PrintStrFn = unsafe extern "C" fn(*const c_char);
type TestArrayFn = unsafe extern "C" fn(*mut c_void, usize);

/// Parse [`DECLARATIONS`] into signatures.
pub fn export_table() -> FfiResult<Vec<FfiSignature>> {
    DECLARATIONS
        .iter()
        .map(|decl| {
            FfiSignature::parse(decl).ok_or_else(|| FfiError::InvalidSignature(decl.to_string()))
        })
        .collect()
}

fn declared<'t>(table: &'t [FfiSignature], name: &str) -> FfiResult<&'t FfiSignature> {
    table
        .iter()
        .find(|sig| sig.name == name)
        .ok_or_else(|| FfiError::InvalidSignature(format!("no declaration for {}", name)))
}

/// Every `mylib` export, bound and ready to call.
///
/// The methods are safe: each binding was checked against its declaration,
/// and the argument types enforce the pointer contracts.
#[derive(Debug)]
pub struct MyLib<'lib> {
    say_hello: FunctionBinding<'lib, SayHelloFn>,
    twice_int: FunctionBinding<'lib, TwiceIntFn>,
    twice_float: FunctionBinding<'lib, TwiceFloatFn>,
    print_str: FunctionBinding<'lib, PrintStrFn>,
    test_array: FunctionBinding<'lib, TestArrayFn>,
}

impl<'lib> MyLib<'lib> {
    /// Bind all exports; fails on the first missing or mismatched symbol.
    pub fn bind(library: &'lib DynamicLibrary) -> FfiResult<Self> {
        let table = export_table()?;
        Ok(Self {
            say_hello: library.bind(declared(&table, "say_hello")?)?,
            twice_int: library.bind(declared(&table, "twice_int")?)?,
            twice_float: library.bind(declared(&table, "twice_float")?)?,
            print_str: library.bind(declared(&table, "print_str")?)?,
            test_array: library.bind(declared(&table, "test_array")?)?,
        })
    }

    pub fn say_hello(&self) {
        // SAFETY: `void say_hello(void)`
        unsafe { self.say_hello.call() }
    }

    pub fn twice_int(&self, x: i32) -> i32 {
        // SAFETY: `int twice_int(int)`, plain value in and out
        unsafe { self.twice_int.call(x) }
    }

    pub fn twice_float(&self, x: f32) -> f32 {
        // SAFETY: `float twice_float(float)`, plain value in and out
        unsafe { self.twice_float.call(x) }
    }

    /// Print `s` from native code. `s` outlives the call.
    pub fn print_str(&self, s: &CStr) {
        // SAFETY: `s` is NUL-terminated and borrowed for the whole call
        unsafe { self.print_str.call(s.as_ptr()) }
    }

    /// Lend `data` to `test_array` for one call.
    pub fn test_array(&self, data: &mut [f32]) {
        let mut buffer = FloatBuffer::new(data);
        trace!(len = buffer.len(), bytes = buffer.byte_len(), "lending float buffer");
        buffer.with_raw(|ptr, len| {
            // SAFETY: `ptr` addresses exactly `len` initialized floats that
            // nothing else can touch until the closure returns
            unsafe { self.test_array.call(ptr, len) }
        })
    }
}
