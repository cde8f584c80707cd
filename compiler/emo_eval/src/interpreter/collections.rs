//! Arrays, hashes and indexing.

use std::rc::Rc;

use emo_ir::{ArrayLiteral, Expr, HashLiteral, IndexExpr};

use super::Interpreter;
use crate::errors::{cannot_index, index_out_of_bounds, unhashable_key};
use crate::{Environment, EvalError, EvalResult, HashKey, HashValue, Value};

impl Interpreter {
    /// Evaluate `exprs` left to right, stopping at the first failure.
    pub(super) fn eval_expressions(
        &mut self,
        exprs: &[Expr],
        env: &Environment,
    ) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|expr| self.eval_expr(expr, env)).collect()
    }

    pub(super) fn eval_array(&mut self, array: &ArrayLiteral, env: &Environment) -> EvalResult {
        let elements = self.eval_expressions(&array.elements, env)?;
        Ok(Value::Array(Rc::new(elements)))
    }

    pub(super) fn eval_hash(&mut self, hash: &HashLiteral, env: &Environment) -> EvalResult {
        let mut entries = HashValue::new();
        for (key, value) in &hash.pairs {
            let key = hash_key(&self.eval_expr(key, env)?)?;
            let value = self.eval_expr(value, env)?;
            entries.insert(key, value);
        }
        Ok(Value::Hash(Rc::new(entries)))
    }

    pub(super) fn eval_index(&mut self, index: &IndexExpr, env: &Environment) -> EvalResult {
        let left = self.eval_expr(&index.left, env)?;
        let position = self.eval_expr(&index.index, env)?;

        match (&left, &position) {
            (Value::Array(elements), Value::Integer(i)) => usize::try_from(*i)
                .ok()
                .and_then(|slot| elements.get(slot))
                .cloned()
                .ok_or_else(|| index_out_of_bounds(*i, elements.len()).into()),
            (Value::Hash(entries), _) => {
                let key = hash_key(&position)?;
                Ok(entries.get(&key).cloned().unwrap_or(Value::Null))
            }
            _ => Err(cannot_index(left.type_name(), position.type_name()).into()),
        }
    }
}

fn hash_key(value: &Value) -> Result<HashKey, EvalError> {
    HashKey::from_value(value).ok_or_else(|| unhashable_key(value.type_name()))
}
