use std::collections::BTreeMap;

use gc::Gc;
use tracing::debug;

use crate::builtins;
use crate::environment::Environment;
use crate::object::{EvaluationError, Function, HashPair, Object, ObjectType, QuickReturn};
use monkey_lang_core::ast;
use monkey_lang_core::ast::Expression;

/// Evaluates every statement of `program` in `environment`. A `return` at the
/// top level stops evaluation; runtime errors come back as `Object::Error`.
pub fn eval_program(program: &ast::Program, environment: &mut Environment) -> Gc<Object> {
    let mut output = Object::null();
    for statement in &program.statements {
        let result = eval_statement(statement, environment);

        match result {
            Err(QuickReturn::Return(value)) => return value,
            Err(QuickReturn::Error(error)) => {
                debug!(%error, "evaluation failed");
                return Object::error(error);
            }
            Ok(object) => output = object,
        };
    }
    output
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Let(statement) => eval_let_statement(statement, environment),
    }
}

fn eval_let_statement(
    statement: &ast::LetStatement,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    environment.set(statement.identifier.name.clone(), value);
    Ok(Object::null())
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    Err(QuickReturn::Return(value))
}

fn eval_expression(
    expression: &Expression,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    match expression {
        Expression::IntegerLiteral(value) => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::StringLiteral(value) => Ok(Object::string(value.clone())),
        Expression::ArrayLiteral(array) => Ok(Object::array(eval_expressions(array, environment)?)),
        Expression::HashLiteral(literal) => eval_hash_literal(literal, environment),
        Expression::Identifier(identifier) => eval_identifier(identifier, environment),
        Expression::PrefixOperation(kind, expression) => {
            let right = eval_expression(expression, environment)?;
            eval_prefix_operation(*kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            eval_infix_operation(*kind, left, right)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if condition.is_truthy() {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            environment.clone(),
        )),
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let function = eval_expression(function, environment)?;
            let arguments = eval_expressions(arguments, environment)?;
            match function.as_ref() {
                Object::Function(function) => apply_function(function, arguments),
                Object::Builtin(builtin) => {
                    debug!(name = builtin.name, arguments = arguments.len(), "builtin call");
                    Ok((builtin.func)(arguments)?)
                }
                other => Err(EvaluationError::CallNonFunction(other.object_type()).into()),
            }
        }
        Expression::IndexExpression { left, index } => {
            let left = eval_expression(left, environment)?;
            let index = eval_expression(index, environment)?;
            eval_index_expression(&left, &index)
        }
    }
}

fn eval_identifier(
    identifier: &ast::Identifier,
    environment: &Environment,
) -> Result<Gc<Object>, QuickReturn> {
    if let Some(value) = environment.get(&identifier.name) {
        return Ok(value);
    }
    builtins::lookup(&identifier.name)
        .map(Object::builtin)
        .ok_or_else(|| EvaluationError::UnknownIdentifier(identifier.name.clone()).into())
}

fn eval_hash_literal(
    literal: &[(Expression, Expression)],
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    let mut hash = BTreeMap::new();
    for (key, value) in literal {
        let key = eval_expression(key, environment)?;
        let hashed_key = key.hash_key()?;
        let value = eval_expression(value, environment)?;
        hash.insert(hashed_key, HashPair { key, value });
    }
    Ok(Object::hash(hash))
}

fn eval_index_expression(left: &Gc<Object>, index: &Gc<Object>) -> Result<Gc<Object>, QuickReturn> {
    match (left.as_ref(), index.as_ref()) {
        (Object::Array(array), Object::Integer(index)) => Ok(usize::try_from(*index)
            .ok()
            .and_then(|index| array.get(index))
            .cloned()
            .unwrap_or_else(Object::null)),
        (Object::Hash(hash), _) => {
            let hashed_index = index.hash_key()?;
            Ok(hash
                .get(&hashed_index)
                .map(|pair| pair.value.clone())
                .unwrap_or_else(Object::null))
        }
        _ => Err(EvaluationError::IndexNotSupported(left.object_type()).into()),
    }
}

fn eval_expressions(
    arguments: &[Expression],
    environment: &mut Environment,
) -> Result<Vec<Gc<Object>>, QuickReturn> {
    let mut result = Vec::with_capacity(arguments.len());
    for argument in arguments {
        result.push(eval_expression(argument, environment)?);
    }
    Ok(result)
}

fn apply_function(
    function: &Function,
    arguments: Vec<Gc<Object>>,
) -> Result<Gc<Object>, QuickReturn> {
    if function.parameters.len() != arguments.len() {
        return Err(EvaluationError::WrongArgumentCount {
            expected: function.parameters.len(),
            actual: arguments.len(),
        }
        .into());
    }
    debug!(arguments = arguments.len(), "function call");

    let mut new_environment = Environment::new_enclosed(function.env.clone());
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        new_environment.set(parameter.name.clone(), argument);
    }
    match eval_block_statement(&function.body, &mut new_environment) {
        Ok(object) => Ok(object),
        Err(QuickReturn::Return(value)) => Ok(value),
        Err(error) => Err(error),
    }
}

fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    let mut result = Object::null();
    for statement in &block.statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

fn eval_prefix_operation(
    kind: ast::PrefixOperationKind,
    right: Gc<Object>,
) -> Result<Gc<Object>, QuickReturn> {
    match (kind, right.as_ref()) {
        (ast::PrefixOperationKind::Bang, _) => Ok(Object::boolean(!right.is_truthy())),
        (ast::PrefixOperationKind::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        _ => Err(EvaluationError::UnknownPrefixOperator {
            right: right.object_type(),
            operation: kind,
        }
        .into()),
    }
}

fn eval_infix_operation(
    kind: ast::InfixOperationKind,
    left: Gc<Object>,
    right: Gc<Object>,
) -> Result<Gc<Object>, QuickReturn> {
    use ast::InfixOperationKind;

    let (left_type, right_type) = (left.object_type(), right.object_type());
    if left_type != right_type {
        return Err(EvaluationError::TypeMismatch {
            left: left_type,
            right: right_type,
            operation: kind,
        }
        .into());
    }

    match (kind, left.as_ref(), right.as_ref()) {
        (_, Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_operation(kind, *left, *right)
        }
        (InfixOperationKind::Plus, Object::String(left), Object::String(right)) => {
            Ok(Object::string(format!("{}{}", left, right)))
        }
        (InfixOperationKind::Equal, Object::String(left), Object::String(right)) => {
            Ok(Object::boolean(left == right))
        }
        (InfixOperationKind::NotEqual, Object::String(left), Object::String(right)) => {
            Ok(Object::boolean(left != right))
        }
        // Booleans and null are singletons, so identity is value equality.
        (InfixOperationKind::Equal, _, _) if is_singleton(left_type) => {
            Ok(Object::boolean(Gc::ptr_eq(&left, &right)))
        }
        (InfixOperationKind::NotEqual, _, _) if is_singleton(left_type) => {
            Ok(Object::boolean(!Gc::ptr_eq(&left, &right)))
        }
        _ => Err(EvaluationError::UnknownInfixOperator {
            left: left_type,
            right: right_type,
            operation: kind,
        }
        .into()),
    }
}

fn is_singleton(object_type: ObjectType) -> bool {
    matches!(object_type, ObjectType::Boolean | ObjectType::Null)
}

fn eval_integer_infix_operation(
    kind: ast::InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Gc<Object>, QuickReturn> {
    use ast::InfixOperationKind;

    let result = match kind {
        InfixOperationKind::Plus => Object::integer(left.wrapping_add(right)),
        InfixOperationKind::Minus => Object::integer(left.wrapping_sub(right)),
        InfixOperationKind::Multiply => Object::integer(left.wrapping_mul(right)),
        InfixOperationKind::Divide => {
            if right == 0 {
                return Err(EvaluationError::DivisionByZero.into());
            }
            Object::integer(left.wrapping_div(right))
        }
        InfixOperationKind::LessThan => Object::boolean(left < right),
        InfixOperationKind::GreaterThan => Object::boolean(left > right),
        InfixOperationKind::Equal => Object::boolean(left == right),
        InfixOperationKind::NotEqual => Object::boolean(left != right),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use gc::Gc;

    use crate::environment::Environment;
    use crate::object::{EvaluationError, Object, ObjectType};
    use monkey_lang_core::ast::InfixOperationKind;
    use monkey_lang_core::lexer::Tokenizer;
    use monkey_lang_core::parser::Parser;

    fn evaluate(input: &str) -> Gc<Object> {
        let tokenizer = Tokenizer::new(input);
        let mut parser = Parser::new(tokenizer);
        let ast = parser.parse_program().unwrap();
        super::eval_program(&ast, &mut Environment::new())
    }

    fn test_evaluation(inputs: Vec<(&str, Gc<Object>)>) {
        for (input, output) in inputs {
            assert_eq!(evaluate(input), output, "input: {}", input);
        }
    }

    fn test_inspect(inputs: Vec<(&str, &str)>) {
        for (input, output) in inputs {
            assert_eq!(evaluate(input).to_string(), output, "input: {}", input);
        }
    }

    #[test]
    fn test_literal() {
        let inputs = vec![
            ("5;", Object::integer(5)),
            ("true;", Object::boolean(true)),
            ("false;", Object::boolean(false)),
            ("\"hello\";", Object::string("hello".to_owned())),
            ("", Object::null()),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_integer_arithmetic() {
        let inputs = vec![
            ("--5;", Object::integer(5)),
            ("-10;", Object::integer(-10)),
            ("5 + 5 + 5 + 5 - 10", Object::integer(10)),
            ("2 * 2 * 2 * 2 * 2", Object::integer(32)),
            ("-50 + 100 + -50", Object::integer(0)),
            ("20 + 2 * -10", Object::integer(0)),
            ("50 / 2 * 2 + 10", Object::integer(60)),
            ("3 * (3 * 3) + 10", Object::integer(37)),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", Object::integer(50)),
            ("7 / 2", Object::integer(3)),
            ("-7 / 2", Object::integer(-3)),
            ("9223372036854775807 + 1", Object::integer(i64::MIN)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_boolean_expressions() {
        let inputs = vec![
            ("!false;", Object::boolean(true)),
            ("!!true;", Object::boolean(true)),
            ("!5", Object::boolean(false)),
            ("!!5", Object::boolean(true)),
            ("1 < 2", Object::boolean(true)),
            ("1 > 2", Object::boolean(false)),
            ("1 == 1", Object::boolean(true)),
            ("1 != 1", Object::boolean(false)),
            ("true == true", Object::boolean(true)),
            ("true != false", Object::boolean(true)),
            ("(1 < 2) == true", Object::boolean(true)),
            ("(1 > 2) == true", Object::boolean(false)),
            ("\"a\" == \"a\"", Object::boolean(true)),
            ("\"a\" != \"b\"", Object::boolean(true)),
            ("if (false) { 1 } == if (false) { 2 }", Object::boolean(true)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_conditionals() {
        let inputs = vec![
            ("if (true) { 10 }", Object::integer(10)),
            ("if (false) { 10 }", Object::null()),
            ("if (1) { 10 }", Object::integer(10)),
            ("if (1 < 2) { 10 } else { 20 }", Object::integer(10)),
            ("if (1 > 2) { 10 } else { 20 }", Object::integer(20)),
            ("if 0 { 10 }", Object::integer(10)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_return_statements() {
        let inputs = vec![
            ("return 10; 9;", Object::integer(10)),
            ("9; return 2 * 5; 9;", Object::integer(10)),
            (
                "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
                Object::integer(10),
            ),
            ("let f = fn() { return 1; 2 }; f() + 10", Object::integer(11)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_let_statements() {
        let inputs = vec![
            ("let a = 5; a;", Object::integer(5)),
            ("let a = 5 * 5; a;", Object::integer(25)),
            ("let a = 5; let b = a; b;", Object::integer(5)),
            (
                "let a = 5; let b = a; let c = a + b + 5; c;",
                Object::integer(15),
            ),
            ("let a = 5;", Object::null()),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_function_application() {
        let inputs = vec![
            ("let identity = fn(x) { x }; identity(5)", Object::integer(5)),
            (
                "let identity = fn(x) { return x }; identity(5)",
                Object::integer(5),
            ),
            ("let double = fn(x) { x * 2 }; double(5)", Object::integer(10)),
            (
                "let add = fn(x, y) { x + y }; add(5 + 5, add(5, 5))",
                Object::integer(20),
            ),
            ("fn(x) { x }(5)", Object::integer(5)),
            (
                "
                let factorial = fn(n) {
                    if n < 2 {1}
                    else {factorial(n - 1) * n}
                };
                factorial(5)",
                Object::integer(120),
            ),
            (
                "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3);",
                Object::integer(5),
            ),
            ("let f = fn() { }; f()", Object::null()),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_closure() {
        let inputs = vec![
            (
                r#"
            let fa = fn() {
                let x = 5;
                let fb = fn() {
                    fn() { x }
                };
                fb
            };
            let temp = fa();
            let temp_ = temp();
            temp_()"#,
                Object::integer(5),
            ),
            (
                r#"
            let fa = fn() {
                let is_even = fn(x) {
                    if x == 0 { true } else { is_odd(x - 1) }
                };
                let is_odd = fn(x) {
                    if x == 0 { false } else { is_even(x - 1) }
                };
                is_even
            };
            let temp = fa();
            temp(3);"#,
                Object::boolean(false),
            ),
            (
                "let x = 1; let f = fn() { let x = 2; x }; f() + x",
                Object::integer(3),
            ),
        ];

        test_evaluation(inputs)
    }

    #[test]
    fn test_strings() {
        let inputs = vec![
            (
                r#""Hello" + " " + "World!""#,
                Object::string("Hello World!".to_owned()),
            ),
            (r#"len("four")"#, Object::integer(4)),
            (r#"len("")"#, Object::integer(0)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_arrays() {
        test_inspect(vec![
            ("[1, 2 * 2, 3 + 3]", "[1, 4, 6]"),
            ("[1, 2, 3][0]", "1"),
            ("let i = 0; [1][i];", "1"),
            ("[1, 2, 3][1 + 1];", "3"),
            ("let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];", "6"),
            ("[1, 2, 3][3]", "null"),
            ("[1, 2, 3][-1]", "null"),
            ("let a = [1, 2, 3]; let b = push(a, 4); [a, b]", "[[1, 2, 3], [1, 2, 3, 4]]"),
            ("rest(rest([1, 2, 3]))", "[3]"),
            ("first([]) == last([])", "true"),
            (
                "let map = fn(arr, f) { if (len(arr) == 0) { [] } else { push(map(rest(arr), f), f(first(arr))) } }; map([1, 2, 3], fn(x) { x * 2 })",
                "[6, 4, 2]",
            ),
        ]);
    }

    #[test]
    fn test_hashes() {
        test_inspect(vec![
            (
                r#"let two = "two"; {"one": 10 - 9, two: 1 + 1, "thr" + "ee": 6 / 2, 4: 4, true: 5, false: 6}["three"]"#,
                "3",
            ),
            (r#"{"foo": 5}["foo"]"#, "5"),
            (r#"{"foo": 5}["bar"]"#, "null"),
            (r#"let key = "foo"; {"foo": 5}[key]"#, "5"),
            (r#"{}["foo"]"#, "null"),
            ("{5: 5}[5]", "5"),
            ("{true: 5}[true]", "5"),
            ("{1: 1, 1: 2}[1]", "2"),
            (r#"{"a": 1}"#, "{a: 1}"),
        ]);
    }

    #[test]
    fn test_builtin_values() {
        test_inspect(vec![
            ("len", "builtin function len"),
            ("let len = fn(x) { 0 }; len([1, 2])", "0"),
            ("puts(1, 2)", "null"),
            ("fn(x, y) { x + y }", "fn(x, y) { (x + y) }"),
        ]);
    }

    #[test]
    fn test_error_handling() {
        let type_mismatch = |left, operation, right| {
            Object::error(EvaluationError::TypeMismatch {
                left,
                right,
                operation,
            })
        };
        let inputs = vec![
            (
                "5 + true;",
                type_mismatch(ObjectType::Integer, InfixOperationKind::Plus, ObjectType::Boolean),
            ),
            (
                "5 + true; 5;",
                type_mismatch(ObjectType::Integer, InfixOperationKind::Plus, ObjectType::Boolean),
            ),
            (
                "true == 1",
                type_mismatch(ObjectType::Boolean, InfixOperationKind::Equal, ObjectType::Integer),
            ),
            (
                "foobar",
                Object::error(EvaluationError::UnknownIdentifier("foobar".into())),
            ),
            ("5 / 0", Object::error(EvaluationError::DivisionByZero)),
        ];

        test_evaluation(inputs);

        test_inspect(vec![
            ("-true", "ERROR: unknown operator: -BOOLEAN"),
            ("true + false;", "ERROR: unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; 5 }",
                "ERROR: unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "ERROR: unknown operator: BOOLEAN + BOOLEAN",
            ),
            (r#""Hello" - "World""#, "ERROR: unknown operator: STRING - STRING"),
            (
                r#"{"name": "Monkey"}[fn(x) { x }];"#,
                "ERROR: unusable as hash key: FUNCTION",
            ),
            (r#"{[1]: 2}"#, "ERROR: unusable as hash key: ARRAY"),
            ("1[0]", "ERROR: index operator not supported: INTEGER"),
            ("5(1)", "ERROR: not a function: INTEGER"),
            (
                "let f = fn(x, y) { x + y }; f(1);",
                "ERROR: wrong number of arguments: expected 2, got 1",
            ),
            ("len(1)", "ERROR: argument to `len` not supported, got INTEGER"),
            (r#"len("one", "two")"#, "ERROR: wrong number of arguments. got=2, want=1"),
            ("push(1, 1)", "ERROR: argument to `push` must be ARRAY, got INTEGER"),
            ("[1, foo, 3]", "ERROR: identifier not found: foo"),
        ]);
    }
}
