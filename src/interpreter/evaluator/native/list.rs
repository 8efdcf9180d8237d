use std::io::Write;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            native::{argument_count_mismatch, fixed_args},
        },
        value::core::Value,
    },
    util::num::{f64_to_index, usize_to_f64_checked},
};

/// Returns the number of elements of a list, or of characters of a string.
///
/// # Example
/// ```
/// use lumen::interpreter::{evaluator::native::list::len, value::core::Value};
///
/// let list = Value::from(vec![Value::Nil, Value::Nil]);
///
/// assert_eq!(len(&[list], &mut std::io::sink(), 1).unwrap(), Value::Number(2.0));
/// assert_eq!(len(&["abc".into()], &mut std::io::sink(), 1).unwrap(), Value::Number(3.0));
/// ```
pub fn len(args: &[Value], _out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    let [sequence] = fixed_args::<1>("len", args, line)?;

    let count = match sequence {
        Value::List(list) => list.borrow().len(),
        Value::Str(s) => s.chars().count(),
        other => {
            return Err(RuntimeError::ExpectedList { found: other.to_string(),
                                                    line });
        },
    };

    Ok(Value::Number(usize_to_f64_checked(count, line)?))
}

/// Returns the element at an index of a list, or the character at an index
/// of a string.
///
/// # Errors
/// - `InvalidIndex` for negative, fractional or non-finite indices.
/// - `IndexOutOfBounds` past the end.
pub fn get(args: &[Value], _out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    let [sequence, index] = fixed_args::<2>("get", args, line)?;
    let index = f64_to_index(index.as_number(line)?, line)?;

    match sequence {
        Value::List(list) => {
            let list = list.borrow();
            list.get(index)
                .cloned()
                .ok_or(RuntimeError::IndexOutOfBounds { len: list.len(),
                                                        found: index,
                                                        line })
        },
        Value::Str(s) => s.chars()
                          .nth(index)
                          .map(|c| Value::Str(c.to_string()))
                          .ok_or_else(|| RuntimeError::IndexOutOfBounds { len: s.chars().count(),
                                                                          found: index,
                                                                          line }),
        other => Err(RuntimeError::ExpectedList { found: other.to_string(),
                                                  line }),
    }
}

/// Replaces the element at an index of a list in place.
///
/// Every alias of the list observes the change.
///
/// # Returns
/// The assigned value.
pub fn set(args: &[Value], _out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    let [list, index, value] = fixed_args::<3>("set", args, line)?;
    let index = f64_to_index(index.as_number(line)?, line)?;
    let mut list = list.as_list(line)?.borrow_mut();

    let len = list.len();
    let slot = list.get_mut(index)
                   .ok_or(RuntimeError::IndexOutOfBounds { len,
                                                           found: index,
                                                           line })?;
    *slot = value.clone();

    Ok(value.clone())
}

/// Appends a value to a list in place.
///
/// # Returns
/// The same list, so calls can be chained.
///
/// # Example
/// ```
/// use lumen::interpreter::{evaluator::native::list::push, value::core::Value};
///
/// let list = Value::from(Vec::new());
/// let same = push(&[list.clone(), Value::Number(4.0)], &mut std::io::sink(), 1).unwrap();
///
/// assert_eq!(list.to_string(), "[ 4 ]");
/// assert_eq!(same.to_string(), "[ 4 ]");
/// ```
pub fn push(args: &[Value], _out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    let [list, value] = fixed_args::<2>("push", args, line)?;

    list.as_list(line)?.borrow_mut().push(value.clone());
    Ok(list.clone())
}

/// Builds a new list holding `count` copies of a value, or of `null` when no
/// value is given.
///
/// The copies are shallow: repeating a list yields `count` aliases of it.
///
/// # Errors
/// `InvalidArgument` if memory for `count` elements cannot be reserved.
pub fn repeat(args: &[Value], _out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    let (count, value) = match args {
        [count] => (count, Value::Nil),
        [count, value] => (count, value.clone()),
        _ => return Err(argument_count_mismatch("repeat", args.len(), line)),
    };
    let count = f64_to_index(count.as_number(line)?, line)?;

    let mut list: Vec<Value> = Vec::new();
    list.try_reserve_exact(count)
        .map_err(|e| RuntimeError::InvalidArgument { details: format!("cannot repeat a value {count} times: {e}"),
                                                     line })?;
    list.resize(count, value);

    Ok(list.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(native: crate::interpreter::value::function::NativeFn,
            args: &[Value])
            -> EvalResult<Value> {
        native(args, &mut std::io::sink(), 1)
    }

    #[test]
    fn get_checks_index_domain() {
        let list = Value::from(vec![Value::Number(10.0), Value::Number(20.0)]);

        assert_eq!(call(get, &[list.clone(), 1.0.into()]).unwrap(), Value::Number(20.0));
        assert!(matches!(call(get, &[list.clone(), 2.0.into()]),
                         Err(RuntimeError::IndexOutOfBounds { len: 2, found: 2, .. })));
        assert!(matches!(call(get, &[list.clone(), (-1.0).into()]),
                         Err(RuntimeError::InvalidIndex { .. })));
        assert!(matches!(call(get, &[list, 0.5.into()]), Err(RuntimeError::InvalidIndex { .. })));
    }

    #[test]
    fn set_mutates_every_alias() {
        let list = Value::from(vec![Value::Number(1.0)]);
        let alias = list.clone();

        assert_eq!(call(set, &[list, 0.0.into(), "x".into()]).unwrap(), Value::from("x"));
        assert_eq!(alias.to_string(), "[ x ]");
    }

    #[test]
    fn set_on_a_string_is_rejected() {
        assert!(matches!(call(set, &["abc".into(), 0.0.into(), "x".into()]),
                         Err(RuntimeError::ExpectedList { .. })));
    }

    #[test]
    fn repeat_shares_the_value() {
        let inner = Value::from(Vec::new());
        let outer = call(repeat, &[2.0.into(), inner.clone()]).unwrap();

        call(push, &[inner, 7.0.into()]).unwrap();
        assert_eq!(outer.to_string(), "[ [ 7 ], [ 7 ] ]");
        assert_eq!(call(repeat, &[3.0.into()]).unwrap().to_string(), "[ null, null, null ]");
    }

    #[test]
    fn repeat_reports_counts_too_large_to_allocate() {
        assert!(matches!(call(repeat, &[1e15.into()]),
                         Err(RuntimeError::InvalidArgument { line: 1, .. })));
    }

    #[test]
    fn natives_reject_wrong_counts_when_called_directly() {
        assert!(matches!(call(len, &[]), Err(RuntimeError::ArgumentCountMismatch { .. })));
        assert!(matches!(call(repeat, &[]), Err(RuntimeError::ArgumentCountMismatch { .. })));
    }
}
