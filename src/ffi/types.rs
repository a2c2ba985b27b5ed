//! FFI Type System
//!
//! Declared signatures on one side, Rust function-pointer types on the
//! other. A binding is only created when the two describe the same shape.

use std::ffi::{c_char, c_void};
use std::fmt;

use serde::Serialize;

/// Value types supported for parameters and return values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FfiType {
    /// Void (no value)
    Void,
    /// 32-bit signed integer
    I32,
    /// 32-bit floating point
    F32,
    /// Null-terminated C string (const char*)
    CStr,
    /// Raw memory address
    Ptr,
    /// Unsigned size (size_t)
    USize,
}

impl FfiType {
    /// Parse a C or Rust type spelling.
    ///
    /// Whitespace is normalized first, so `const char *` and `const char*`
    /// are the same type.
    pub fn from_c_name(s: &str) -> Option<Self> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace(" *", "*")
            .to_lowercase();
        match normalized.as_str() {
            "void" => Some(FfiType::Void),
            "i32" | "int" | "int32_t" => Some(FfiType::I32),
            "f32" | "float" => Some(FfiType::F32),
            "cstr" | "char*" | "const char*" => Some(FfiType::CStr),
            "ptr" | "void*" | "const void*" | "float*" | "const float*" => Some(FfiType::Ptr),
            "usize" | "size_t" => Some(FfiType::USize),
            _ => None,
        }
    }
}

impl fmt::Display for FfiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiType::Void => write!(f, "void"),
            FfiType::I32 => write!(f, "int"),
            FfiType::F32 => write!(f, "float"),
            FfiType::CStr => write!(f, "const char*"),
            FfiType::Ptr => write!(f, "void*"),
            FfiType::USize => write!(f, "size_t"),
        }
    }
}

/// Function signature for FFI calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FfiSignature {
    /// Function name
    pub name: String,
    /// Parameter types
    pub params: Vec<FfiType>,
    /// Return type
    pub return_type: FfiType,
}

impl FfiSignature {
    /// Create a new function signature
    pub fn new(name: impl Into<String>, params: Vec<FfiType>, return_type: FfiType) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
        }
    }

    /// Whether this declaration has the same shape as the Rust type `F`
    pub fn matches<F: NativeFn>(&self) -> bool {
        self.return_type == F::RETURN && self.params == F::params()
    }

    /// Parse from a C-style prototype
    /// Format: "return_type function_name(param1_type [name], ...)"
    ///
    /// `void` is only accepted as the return type or as the lone `(void)`
    /// parameter list.
    pub fn parse(signature: &str) -> Option<Self> {
        let signature = signature.trim().trim_end_matches(';').trim_end();

        let paren_pos = signature.find('(')?;
        let before_paren = signature[..paren_pos].trim();
        let after_paren = signature[paren_pos + 1..].strip_suffix(')')?.trim();

        let (return_part, name) = split_trailing_ident(before_paren);
        if name.is_empty() {
            return None;
        }
        let return_type = FfiType::from_c_name(return_part)?;

        let mut params = Vec::new();
        if !(after_paren.is_empty() || after_paren == "void") {
            for param in after_paren.split(',') {
                match parse_param(param.trim())? {
                    FfiType::Void => return None,
                    ty => params.push(ty),
                }
            }
        }

        Some(Self::new(name, params, return_type))
    }
}

impl fmt::Display for FfiSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}

/// Split `"const char* name"` into `("const char*", "name")`.
fn split_trailing_ident(s: &str) -> (&str, &str) {
    let start = s
        .trim_end_matches(|c: char| c.is_ascii_alphanumeric() || c == '_')
        .len();
    (s[..start].trim(), &s[start..])
}

fn parse_param(param: &str) -> Option<FfiType> {
    if let Some(ty) = FfiType::from_c_name(param) {
        return Some(ty);
    }
    // Named parameter: drop the trailing identifier
    let (ty, name) = split_trailing_ident(param);
    if name.is_empty() || ty.is_empty() {
        return None;
    }
    FfiType::from_c_name(ty)
}

/// A Rust type that crosses the C ABI unchanged as an argument
///
/// `()` is only a return type, so a `void` parameter cannot be bound:
///
/// ```compile_fail
/// use nativecall::ffi::{FfiSignature, NativeFn};
///
/// let sig = FfiSignature::parse("int f(int a)").unwrap();
/// sig.matches::<unsafe extern "C" fn(i32, ()) -> i32>();
/// ```
pub trait NativeType: Copy {
    /// The declared type this Rust type stands for
    const FFI_TYPE: FfiType;
}

/// A Rust type a native function may return. Adds `()` for `void`.
pub trait NativeReturn: Copy {
    /// The declared return type
    const FFI_TYPE: FfiType;
}

impl NativeReturn for () {
    const FFI_TYPE: FfiType = FfiType::Void;
}

macro_rules! impl_native_type {
    ($($ty:ty => $ffi:ident),* $(,)?) => {
        $(
            impl NativeType for $ty {
                const FFI_TYPE: FfiType = FfiType::$ffi;
            }

            impl NativeReturn for $ty {
                const FFI_TYPE: FfiType = FfiType::$ffi;
            }
        )*
    };
}

impl_native_type! {
    i32 => I32,
    f32 => F32,
    *const c_char => CStr,
    *const c_void => Ptr,
    *mut c_void => Ptr,
    *const f32 => Ptr,
    *mut f32 => Ptr,
    usize => USize,
}

/// An `unsafe extern "C"` function pointer type whose shape is known
pub trait NativeFn: Copy {
    /// Return type
    const RETURN: FfiType;

    /// Parameter types in order
    fn params() -> Vec<FfiType>;

    /// The signature this type implies for a symbol called `name`
    fn signature(name: &str) -> FfiSignature {
        FfiSignature::new(name, Self::params(), Self::RETURN)
    }
}

macro_rules! impl_native_fn {
    ($($arg:ident),*) => {
        impl<R: NativeReturn $(, $arg: NativeType)*> NativeFn
            for unsafe extern "C" fn($($arg),*) -> R
        {
            const RETURN: FfiType = <R as NativeReturn>::FFI_TYPE;

            fn params() -> Vec<FfiType> {
                vec![$(<$arg as NativeType>::FFI_TYPE),*]
            }
        }
    };
}

impl_native_fn!();
impl_native_fn!(A);
impl_native_fn!(A, B);
impl_native_fn!(A, B, C);
