//! Function Bindings
//!
//! A [`FunctionBinding`] pairs a resolved symbol with the declaration it was
//! checked against. It borrows the library it came from, so it can never be
//! called after the library is unloaded.

use libloading::Symbol;
use tracing::trace;

use super::types::{FfiSignature, NativeFn, NativeReturn, NativeType};

/// A symbol bound with an explicit signature
pub struct FunctionBinding<'lib, F: NativeFn> {
    signature: FfiSignature,
    symbol: Symbol<'lib, F>,
}

impl<'lib, F: NativeFn> FunctionBinding<'lib, F> {
    pub(crate) fn new(signature: FfiSignature, symbol: Symbol<'lib, F>) -> Self {
        Self { signature, symbol }
    }

    /// Symbol name
    pub fn name(&self) -> &str {
        &self.signature.name
    }

    /// The declaration this binding was validated against
    pub fn signature(&self) -> &FfiSignature {
        &self.signature
    }
}

impl<F: NativeFn> std::fmt::Debug for FunctionBinding<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionBinding")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

// One inherent `call` per arity. Fn pointers of different arity never unify,
// so these impls cannot overlap.
macro_rules! impl_call {
    ($($arg:ident: $ty:ident),*) => {
        impl<'lib, R: NativeReturn $(, $ty: NativeType)*>
            FunctionBinding<'lib, unsafe extern "C" fn($($ty),*) -> R>
        {
            /// Invoke the native function.
            ///
            /// # Safety
            ///
            /// The native symbol must really have the declared signature, and
            /// every pointer argument must stay valid for the whole call.
            pub unsafe fn call(&self $(, $arg: $ty)*) -> R {
                trace!(symbol = %self.signature.name, "native call");
                let f = *self.symbol;
                unsafe { f($($arg),*) }
            }
        }
    };
}

impl_call!();
impl_call!(a: A);
impl_call!(a: A, b: B);
impl_call!(a: A, b: B, c: C);
