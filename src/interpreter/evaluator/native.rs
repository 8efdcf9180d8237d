use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, frame::Frame},
        value::{
            core::Value,
            function::{Arity, Function, NativeFn},
        },
    },
};

/// Output natives: `print`, `println` and `format`.
pub mod print;

/// Sequence natives: `len`, `get`, `set`, `push` and `repeat`.
pub mod list;

/// Defines native functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the parameter names shown when the function is displayed,
/// - an arity specification,
/// - a function pointer implementing the native.
///
/// The macro produces:
/// - `NativeDef` (internal metadata),
/// - `NATIVE_TABLE` (static table for lookup),
/// - `NATIVE_FUNCTIONS` (public list of native names).
macro_rules! native_functions {
    (
        $(
            $name:literal ( $($param:literal),* ) => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct NativeDef {
            name:   &'static str,
            params: &'static [&'static str],
            arity:  Arity,
            func:   NativeFn,
        }
        static NATIVE_TABLE: &[NativeDef] = &[
            $(
                NativeDef { name: $name, params: &[$($param),*], arity: $arity, func: $func },
            )*
        ];
        /// Names bound in the outermost frame of every context.
        pub const NATIVE_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

native_functions! {
    "print"   ("arg")                  => { arity: Arity::Exact(1),       func: print::print },
    "println" ("arg")                  => { arity: Arity::OneOf(&[0, 1]), func: print::println },
    "format"  ("template", "args")     => { arity: Arity::AtLeast(1),     func: print::format },
    "len"     ("list")                 => { arity: Arity::Exact(1),       func: list::len },
    "get"     ("list", "idx")          => { arity: Arity::Exact(2),       func: list::get },
    "set"     ("list", "idx", "value") => { arity: Arity::Exact(3),       func: list::set },
    "push"    ("list", "value")        => { arity: Arity::Exact(2),       func: list::push },
    "repeat"  ("count", "value")       => { arity: Arity::OneOf(&[1, 2]), func: list::repeat },
}

/// Builds the outermost frame: every native bound under its name.
///
/// # Example
/// ```
/// use lumen::interpreter::evaluator::native::{NATIVE_FUNCTIONS, native_frame};
///
/// let frame = native_frame();
///
/// assert_eq!(frame.len(), NATIVE_FUNCTIONS.len());
/// assert_eq!(frame["get"].to_string(), "get(list, idx)");
/// ```
#[must_use]
pub fn native_frame() -> Frame {
    NATIVE_TABLE.iter()
                .map(|def| {
                    let function = Function::native(def.name, def.params, def.arity, def.func);
                    (def.name.to_string(), function.into())
                })
                .collect()
}

/// Destructures the arguments of a native with a fixed arity.
///
/// Natives are normally reached through a call that already checked the
/// count; this keeps direct calls from panicking.
///
/// # Errors
/// `ArgumentCountMismatch` if `args` does not hold exactly `N` values.
pub(crate) fn fixed_args<'a, const N: usize>(name: &str,
                                             args: &'a [Value],
                                             line: usize)
                                             -> EvalResult<&'a [Value; N]> {
    <&[Value; N]>::try_from(args).map_err(|_| argument_count_mismatch(name, args.len(), line))
}

/// Builds the arity error of the native called `name`.
pub(crate) fn argument_count_mismatch(name: &str, found: usize, line: usize) -> RuntimeError {
    let expected = NATIVE_TABLE.iter()
                               .find(|def| def.name == name)
                               .map_or_else(String::new, |def| def.arity.to_string());

    RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                          expected,
                                          found,
                                          line }
}
