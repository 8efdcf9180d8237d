use std::io::Write;

use crate::{
    ast::{Expr, Statement},
    interpreter::evaluator::core::{Context, EvalResult, Status},
};

impl<W: Write> Context<W> {
    /// Executes `loop (condition) body`.
    ///
    /// The condition is re-evaluated before every pass and must be a boolean.
    /// A `return` in the body ends the loop and propagates.
    pub(crate) fn execute_loop(&mut self, condition: &Expr, body: &Statement) -> EvalResult<Status> {
        while self.eval_condition(condition)? {
            if let returning @ Status::Returning(_) = self.execute(body)? {
                return Ok(returning);
            }
        }

        Ok(Status::Ok)
    }

    /// Executes `for (let iterator : sequence) body`.
    ///
    /// The sequence is evaluated once and its elements are copied before the
    /// first pass, so the body may mutate the list without affecting the
    /// iteration. The iterator is declared in the current frame for the first
    /// element and re-assigned for each following one. It is removed again
    /// once the loop completes without `return`.
    ///
    /// # Errors
    /// - `NotIterable` unless the sequence is a list or string.
    /// - `AlreadyDefined` if the iterator name is already bound in the current
    ///   frame.
    pub(crate) fn execute_iteration(&mut self,
                                    iterator: &str,
                                    sequence: &Expr,
                                    body: &Statement,
                                    line: usize)
                                    -> EvalResult<Status> {
        let elements = self.eval(sequence)?.elements(line)?;
        let declared = !elements.is_empty();

        for (index, element) in elements.into_iter().enumerate() {
            if index == 0 {
                self.declare(iterator, element, line)?;
            } else {
                self.assign_nearest(iterator, element, line)?;
            }

            if let returning @ Status::Returning(_) = self.execute(body)? {
                return Ok(returning);
            }
        }

        if declared {
            self.forget(iterator);
        }
        Ok(Status::Ok)
    }
}
