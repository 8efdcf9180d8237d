use std::{collections::HashMap, io::Write};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// One scope level: a mapping from identifier to value.
pub type Frame = HashMap<String, Value>;

impl<W: Write> Context<W> {
    /// Runs `body` with `frame` pushed on top of the stack.
    ///
    /// The frame is popped afterwards whether `body` succeeded, failed, or
    /// returned early.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use lumen::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let mut context = Context::new(Vec::<u8>::new());
    /// let before = context.frames.len();
    ///
    /// let inner = context.in_frame(HashMap::from([("x".to_string(), Value::Number(1.0))]),
    ///                              |ctx| ctx.lookup("x", 1));
    ///
    /// assert_eq!(inner.unwrap(), Value::Number(1.0));
    /// assert_eq!(context.frames.len(), before);
    /// assert!(context.lookup("x", 1).is_err());
    /// ```
    pub fn in_frame<T>(&mut self,
                       frame: Frame,
                       body: impl FnOnce(&mut Self) -> EvalResult<T>)
                       -> EvalResult<T> {
        self.frames.push(frame);
        let result = body(self);
        self.frames.pop();
        result
    }

    /// Resolves a name, searching from the innermost frame outwards.
    ///
    /// # Errors
    /// `UnknownVariable` if no frame binds `name`.
    pub fn lookup(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Binds a new name in the innermost frame.
    ///
    /// # Errors
    /// `AlreadyDefined` if the innermost frame already binds `name`. Bindings
    /// in outer frames may be shadowed freely.
    pub fn declare(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let Some(frame) = self.frames.last_mut() else {
            self.frames.push(HashMap::from([(name.to_string(), value)]));
            return Ok(());
        };

        if frame.contains_key(name) {
            return Err(RuntimeError::AlreadyDefined { name: name.to_string(),
                                                      line });
        }
        frame.insert(name.to_string(), value);
        Ok(())
    }

    /// Re-binds `name` in the nearest frame that already contains it.
    ///
    /// # Errors
    /// `UnknownVariable` if `name` was never declared.
    pub fn assign_nearest(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        match self.frames
                  .iter_mut()
                  .rev()
                  .find_map(|frame| frame.get_mut(name))
        {
            Some(slot) => {
                *slot = value;
                Ok(())
            },
            None => Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                        line }),
        }
    }

    /// Removes `name` from the innermost frame, if bound there.
    pub(crate) fn forget(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.remove(name);
        }
    }
}
