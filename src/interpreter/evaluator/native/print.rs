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
};

/// Writes the display form of a value, without a trailing newline.
///
/// # Returns
/// `null`.
///
/// # Example
/// ```
/// use lumen::interpreter::{evaluator::native::print::print, value::core::Value};
///
/// let mut out: Vec<u8> = Vec::new();
/// print(&[Value::from("hi")], &mut out, 1).unwrap();
///
/// assert_eq!(out, b"hi");
/// ```
pub fn print(args: &[Value], out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    let [value] = fixed_args::<1>("print", args, line)?;

    write!(out, "{value}").map_err(|e| output_error(&e, line))?;
    Ok(Value::Nil)
}

/// Writes the display form of a value followed by a newline. Without an
/// argument only the newline is written.
pub fn println(args: &[Value], out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    let written = match args {
        [] => writeln!(out),
        [value] => writeln!(out, "{value}"),
        _ => return Err(argument_count_mismatch("println", args.len(), line)),
    };
    written.map_err(|e| output_error(&e, line))?;

    Ok(Value::Nil)
}

/// Substitutes positional placeholders in a template string.
///
/// `{0}` is replaced by the display form of the first argument after the
/// template, `{1}` by the second, and so on. `{{` and `}}` produce literal
/// braces.
///
/// # Errors
/// `InvalidArgument` if the template is not a string, a placeholder is
/// malformed, or it refers to a missing argument.
///
/// # Example
/// ```
/// use lumen::interpreter::{evaluator::native::print::format, value::core::Value};
///
/// let args = [Value::from("{1}{{{0}}}"), Value::Number(1.0), Value::from("x")];
/// let result = format(&args, &mut std::io::sink(), 1).unwrap();
///
/// assert_eq!(result, Value::from("x{1}"));
/// ```
pub fn format(args: &[Value], _out: &mut dyn Write, line: usize) -> EvalResult<Value> {
    let Some((template, values)) = args.split_first() else {
        return Err(argument_count_mismatch("format", 0, line));
    };
    let Value::Str(template) = template else {
        return Err(RuntimeError::InvalidArgument { details: format!("format expects a template string, found {template}"),
                                                   line });
    };

    render_template(template, values, line).map(Value::Str)
}

fn render_template(template: &str, values: &[Value], line: usize) -> EvalResult<String> {
    let invalid = |details: String| RuntimeError::InvalidArgument { details, line };
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                result.push('{');
            },
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                result.push('}');
            },
            '{' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        _ => return Err(invalid(format!("malformed placeholder in '{template}'"))),
                    }
                }
                let index: usize =
                    digits.parse()
                          .map_err(|_| invalid(format!("empty placeholder in '{template}'")))?;
                let value = values.get(index).ok_or_else(|| {
                                                  invalid(format!("placeholder {{{index}}} has no matching argument"))
                                              })?;
                result.push_str(&value.to_string());
            },
            '}' => return Err(invalid(format!("unmatched '}}' in '{template}'"))),
            other => result.push(other),
        }
    }

    Ok(result)
}

fn output_error(error: &std::io::Error, line: usize) -> RuntimeError {
    RuntimeError::Output { details: error.to_string(),
                           line }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn println_without_argument_writes_newline() {
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(println(&[], &mut out, 1).unwrap(), Value::Nil);
        assert_eq!(out, b"\n");
    }

    #[test]
    fn format_rejects_missing_arguments() {
        let args = [Value::from("{0} {1}"), Value::Number(1.0)];
        let err = format(&args, &mut std::io::sink(), 4).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidArgument { line: 4, .. }));
    }

    #[test]
    fn format_rejects_unbalanced_braces() {
        for template in ["{", "{x}", "a}b", "{}"] {
            let args = [Value::from(template)];
            assert!(format(&args, &mut std::io::sink(), 1).is_err(), "{template}");
        }
    }

    #[test]
    fn format_renders_lists_with_display_form() {
        let list = Value::from(vec![Value::Number(1.0), Value::Number(2.0)]);
        let args = [Value::from("list: {0}"), list];
        assert_eq!(format(&args, &mut std::io::sink(), 1).unwrap(),
                   Value::from("list: [ 1, 2 ]"));
    }
}
