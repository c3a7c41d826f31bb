use crate::ast::{Block, Expression, InfixOperator, PrefixOperator, Statement};
use crate::builtins;
use crate::environment::Environment;
use crate::object::{HashPair, Object};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// Tree-walking evaluator. Runtime failures are `Object::Error` values
/// that short-circuit outward; nothing here panics on user input.
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Interpreter
    }

    /// Evaluates a whole program. A `ReturnValue` reaching this boundary
    /// is unwrapped once; an `Error` surfaces as-is.
    pub fn eval_program(
        &self,
        program: &[Statement],
        env: &Rc<RefCell<Environment>>,
    ) -> Object {
        let mut result = NULL;
        for statement in program {
            result = self.eval_statement(statement, env);
            match result {
                Object::ReturnValue(value) => return *value,
                Object::Error(_) => return result,
                _ => {}
            }
        }
        result
    }

    fn eval_block(&self, block: &Block, env: &Rc<RefCell<Environment>>) -> Object {
        let mut result = NULL;
        for statement in &block.statements {
            result = self.eval_statement(statement, env);
            // Unlike the program boundary, a block hands ReturnValue back
            // still wrapped so it keeps unwinding through nested blocks.
            if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
                return result;
            }
        }
        result
    }

    fn eval_statement(&self, statement: &Statement, env: &Rc<RefCell<Environment>>) -> Object {
        match statement {
            Statement::Expression(expression) => self.eval_expression(expression, env),
            Statement::Let { name, value } => {
                let value = self.eval_expression(value, env);
                if value.is_error() {
                    return value;
                }
                env.borrow_mut().set(name.clone(), value);
                NULL
            }
            Statement::Return(expression) => {
                let value = self.eval_expression(expression, env);
                if value.is_error() {
                    return value;
                }
                Object::ReturnValue(Box::new(value))
            }
        }
    }

    fn eval_expression(&self, expression: &Expression, env: &Rc<RefCell<Environment>>) -> Object {
        match expression {
            Expression::Integer(value) => Object::Integer(*value),
            Expression::String(value) => Object::String(value.clone()),
            Expression::Boolean(value) => native_bool(*value),
            Expression::Identifier(name) => self.eval_identifier(name, env),
            Expression::Prefix { operator, right } => {
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_prefix_expression(*operator, right)
            }
            Expression::Infix { left, operator, right } => {
                let left = self.eval_expression(left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_infix_expression(*operator, left, right)
            }
            Expression::If { condition, consequence, alternative } => {
                let condition = self.eval_expression(condition, env);
                if condition.is_error() {
                    return condition;
                }
                if is_truthy(&condition) {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    NULL
                }
            }
            Expression::Function { params, body } => Object::Function {
                params: params.clone(),
                body: body.clone(),
                env: Rc::clone(env),
            },
            Expression::Call { function, arguments } => {
                let function = self.eval_expression(function, env);
                if function.is_error() {
                    return function;
                }
                let arguments = match self.eval_expressions(arguments, env) {
                    Ok(values) => values,
                    Err(error) => return error,
                };
                self.apply_function(function, arguments)
            }
            Expression::Array(elements) => match self.eval_expressions(elements, env) {
                Ok(values) => Object::Array(values),
                Err(error) => error,
            },
            Expression::Index { object, index } => {
                let object = self.eval_expression(object, env);
                if object.is_error() {
                    return object;
                }
                let index = self.eval_expression(index, env);
                if index.is_error() {
                    return index;
                }
                eval_index_expression(object, index)
            }
            Expression::Hash(pairs) => self.eval_hash_literal(pairs, env),
        }
    }

    fn eval_identifier(&self, name: &str, env: &Rc<RefCell<Environment>>) -> Object {
        if let Some(value) = env.borrow().get(name) {
            return value;
        }
        if let Some(builtin) = builtins::lookup(name) {
            return builtin;
        }
        Object::Error(format!("identifier not found: {}", name))
    }

    /// Evaluates a list of expressions left to right, stopping at the
    /// first error without touching the remaining expressions.
    fn eval_expressions(
        &self,
        expressions: &[Expression],
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Vec<Object>, Object> {
        let mut values = Vec::with_capacity(expressions.len());
        for expression in expressions {
            let value = self.eval_expression(expression, env);
            if value.is_error() {
                return Err(value);
            }
            values.push(value);
        }
        Ok(values)
    }

    fn apply_function(&self, function: Object, arguments: Vec<Object>) -> Object {
        match function {
            Object::Function { params, body, env } => {
                // The call frame extends the function's defining
                // environment, not the caller's.
                let mut call_env = Environment::new_enclosed(Rc::clone(&env));
                for (param, argument) in params.iter().zip(arguments) {
                    call_env.set(param.clone(), argument);
                }
                let result = self.eval_block(&body, &Rc::new(RefCell::new(call_env)));
                match result {
                    Object::ReturnValue(value) => *value,
                    other => other,
                }
            }
            Object::Builtin(builtin) => builtin(arguments),
            other => Object::Error(format!("not a function: {}", other.type_name())),
        }
    }

    fn eval_hash_literal(
        &self,
        pairs: &[(Expression, Expression)],
        env: &Rc<RefCell<Environment>>,
    ) -> Object {
        let mut map = HashMap::new();
        for (key_expression, value_expression) in pairs {
            let key = self.eval_expression(key_expression, env);
            if key.is_error() {
                return key;
            }
            let hash = match key.hash_key() {
                Some(hash) => hash,
                None => {
                    return Object::Error(format!(
                        "unusable as hash key: {}",
                        key.type_name()
                    ))
                }
            };
            let value = self.eval_expression(value_expression, env);
            if value.is_error() {
                return value;
            }
            map.insert(hash, HashPair { key, value });
        }
        Object::Hash(map)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

fn native_bool(value: bool) -> Object {
    if value {
        TRUE
    } else {
        FALSE
    }
}

fn is_truthy(value: &Object) -> bool {
    !matches!(value, Object::Boolean(false) | Object::Null)
}

fn eval_prefix_expression(operator: PrefixOperator, right: Object) -> Object {
    match operator {
        PrefixOperator::Bang => eval_bang_operator(right),
        PrefixOperator::Minus => match right {
            Object::Integer(value) => Object::Integer(-value),
            other => Object::Error(format!("unknown operator: -{}", other.type_name())),
        },
    }
}

fn eval_bang_operator(right: Object) -> Object {
    match right {
        Object::Boolean(true) => FALSE,
        Object::Boolean(false) => TRUE,
        Object::Null => TRUE,
        _ => FALSE,
    }
}

fn eval_infix_expression(operator: InfixOperator, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => {
            eval_integer_infix_expression(operator, l, r)
        }
        (Object::String(l), Object::String(r)) => {
            eval_string_infix_expression(operator, l, r)
        }
        (Object::Boolean(l), Object::Boolean(r)) => match operator {
            InfixOperator::Equal => native_bool(l == r),
            InfixOperator::NotEqual => native_bool(l != r),
            _ => Object::Error(format!(
                "unknown operator: BOOLEAN {} BOOLEAN",
                operator
            )),
        },
        (l, r) if l.type_name() != r.type_name() => Object::Error(format!(
            "type mismatch: {} {} {}",
            l.type_name(),
            operator,
            r.type_name()
        )),
        (l, r) => Object::Error(format!(
            "unknown operator: {} {} {}",
            l.type_name(),
            operator,
            r.type_name()
        )),
    }
}

fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64) -> Object {
    match operator {
        InfixOperator::Plus => Object::Integer(left + right),
        InfixOperator::Minus => Object::Integer(left - right),
        InfixOperator::Multiply => Object::Integer(left * right),
        InfixOperator::Divide => Object::Integer(left / right),
        InfixOperator::LessThan => native_bool(left < right),
        InfixOperator::GreaterThan => native_bool(left > right),
        InfixOperator::Equal => native_bool(left == right),
        InfixOperator::NotEqual => native_bool(left != right),
    }
}

fn eval_string_infix_expression(operator: InfixOperator, left: String, right: String) -> Object {
    match operator {
        InfixOperator::Plus => Object::String(left + &right),
        _ => Object::Error(format!("unknown operator: STRING {} STRING", operator)),
    }
}

fn eval_index_expression(object: Object, index: Object) -> Object {
    match (object, index) {
        (Object::Array(elements), Object::Integer(i)) => {
            if i < 0 || i >= elements.len() as i64 {
                NULL
            } else {
                elements[i as usize].clone()
            }
        }
        (Object::Hash(pairs), key) => match key.hash_key() {
            Some(hash) => pairs
                .get(&hash)
                .map(|pair| pair.value.clone())
                .unwrap_or(NULL),
            None => Object::Error(format!("unusable as hash key: {}", key.type_name())),
        },
        (other, _) => Object::Error(format!(
            "index operator not supported: {}",
            other.type_name()
        )),
    }
}
