//! Classes, instantiation and member access.
//!
//! An instance's fields live in its own environment, which encloses the
//! environment the class was declared in. A method is looked up on the
//! class and bound on access: the resulting function captures a fresh
//! scope, enclosed by the instance environment, that binds `self`.
//!
//! Private members are reachable only through `self.member`.

use std::rc::Rc;

use emo_ir::{ClassExpr, DotExpr, Expr, NewExpr};
use tracing::debug;

use super::{bind, Interpreter};
use crate::errors::{
    cannot_assign_immutable, invalid_field_key, invalid_initializer, method_assignment,
    not_a_class, not_an_instance, private_member, undefined_member, undefined_variable,
    unknown_field,
};
use crate::{
    ClassValue, Environment, EvalError, EvalResult, FunctionValue, HashKey, InstanceValue,
    Mutability, Value,
};

impl Interpreter {
    /// Bind the class name in `env` and return the class.
    pub(super) fn eval_class(&mut self, class: &ClassExpr, env: &Environment) -> EvalResult {
        let name = class.name.as_str();
        let value = Value::Class(Rc::new(ClassValue {
            name: name.to_string(),
            fields: class.fields.clone(),
            methods: class.methods.clone(),
            env: env.clone(),
        }));
        bind(env, name, value.clone(), Mutability::Mutable)?;
        debug!(
            class = name,
            fields = class.fields.len(),
            methods = class.methods.len(),
            "class declared"
        );
        Ok(value)
    }

    /// `new(Class)` or `new(Class, {"field": value, ...})`.
    pub(super) fn eval_new(&mut self, new: &NewExpr, env: &Environment) -> EvalResult {
        let name = new.class.as_str();
        let class = match env.lookup(name) {
            Some(Value::Class(class)) => class,
            Some(other) => return Err(not_a_class(other.type_name()).into()),
            None => return Err(undefined_variable(name).into()),
        };
        let data = match &new.data {
            Some(data) => Some(self.eval_expr(data, env)?),
            None => None,
        };

        let instance_env = Environment::new_enclosed(&class.env);
        for field in &class.fields {
            bind(&instance_env, field.name(), Value::Null, Mutability::Mutable)?;
        }

        if let Some(data) = data {
            let Value::Hash(entries) = &data else {
                return Err(invalid_initializer(data.type_name()).into());
            };
            for (key, value) in entries.iter() {
                let HashKey::Str(field) = key else {
                    return Err(invalid_field_key(key.type_name()).into());
                };
                if class.field(field).is_none() {
                    return Err(unknown_field(field, &class.name).into());
                }
                instance_env
                    .set_own(field, value.clone())
                    .map_err(|_| cannot_assign_immutable(field))?;
            }
        }

        debug!(class = %class.name, "instantiated");
        Ok(Value::Instance(Rc::new(InstanceValue {
            class,
            env: instance_env,
        })))
    }

    /// `receiver.member`: fields first, then methods.
    pub(super) fn eval_member(&mut self, dot: &DotExpr, env: &Environment) -> EvalResult {
        let receiver = self.eval_expr(&dot.left, env)?;
        let Value::Instance(instance) = &receiver else {
            return Err(not_an_instance(receiver.type_name()).into());
        };
        let class = &instance.class;
        let member = member_name(dot, class)?;

        if let Some(field) = class.field(member) {
            check_visibility(field.public, dot, member, class)?;
            return Ok(instance.env.get_own(member).unwrap_or(Value::Null));
        }

        if let Some(method) = class.method(member) {
            check_visibility(method.public, dot, member, class)?;
            let method_env = Environment::new_enclosed(&instance.env);
            bind(&method_env, "self", receiver.clone(), Mutability::Immutable)?;
            return Ok(Value::Function(Rc::new(FunctionValue {
                name: Some(member.to_string()),
                decl: Rc::clone(&method.function.decl),
                env: method_env,
            })));
        }

        Err(undefined_member(member, &class.name).into())
    }

    /// `receiver.field = value`. Only declared fields can be written.
    pub(super) fn eval_member_assign(
        &mut self,
        dot: &DotExpr,
        value: &Expr,
        env: &Environment,
    ) -> EvalResult {
        let receiver = self.eval_expr(&dot.left, env)?;
        let Value::Instance(instance) = &receiver else {
            return Err(not_an_instance(receiver.type_name()).into());
        };
        let class = &instance.class;
        let member = member_name(dot, class)?;

        let Some(field) = class.field(member) else {
            if class.method(member).is_some() {
                return Err(method_assignment(member, &class.name).into());
            }
            return Err(undefined_member(member, &class.name).into());
        };
        check_visibility(field.public, dot, member, class)?;

        let value = self.eval_expr(value, env)?;
        instance
            .env
            .set_own(member, value.clone())
            .map_err(|_| cannot_assign_immutable(member))?;
        Ok(value)
    }
}

fn member_name<'a>(dot: &'a DotExpr, class: &ClassValue) -> Result<&'a str, EvalError> {
    dot.member()
        .map(|ident| ident.as_str())
        .ok_or_else(|| undefined_member(&dot.right.to_string(), &class.name))
}

fn check_visibility(
    public: bool,
    dot: &DotExpr,
    member: &str,
    class: &ClassValue,
) -> Result<(), EvalError> {
    if public || dot.is_self_access() {
        Ok(())
    } else {
        Err(private_member(member, &class.name))
    }
}
