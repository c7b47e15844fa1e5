use gc::Gc;

use crate::object::{Builtin, BuiltinResult, EvaluationError, Object, ObjectType};

fn check_argument_count(args: &[Gc<Object>], expected: usize) -> Result<(), EvaluationError> {
    if args.len() != expected {
        return Err(EvaluationError::BuiltinArgumentCount {
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn expect_array<'a>(
    builtin: &'static str,
    arg: &'a Gc<Object>,
) -> Result<&'a [Gc<Object>], EvaluationError> {
    match arg.as_ref() {
        Object::Array(arr) => Ok(arr.as_slice()),
        other => Err(EvaluationError::UnexpectedArgumentType {
            builtin,
            expected: ObjectType::Array,
            got: other.object_type(),
        }),
    }
}

fn builtin_len(args: Vec<Gc<Object>>) -> BuiltinResult {
    check_argument_count(&args, 1)?;
    match args[0].as_ref() {
        Object::String(s) => Ok(Object::integer(s.len() as i64)),
        Object::Array(arr) => Ok(Object::integer(arr.len() as i64)),
        other => Err(EvaluationError::UnsupportedArgument {
            builtin: "len",
            got: other.object_type(),
        }),
    }
}

fn builtin_first(args: Vec<Gc<Object>>) -> BuiltinResult {
    check_argument_count(&args, 1)?;
    let arr = expect_array("first", &args[0])?;
    Ok(arr.first().cloned().unwrap_or_else(Object::null))
}

fn builtin_last(args: Vec<Gc<Object>>) -> BuiltinResult {
    check_argument_count(&args, 1)?;
    let arr = expect_array("last", &args[0])?;
    Ok(arr.last().cloned().unwrap_or_else(Object::null))
}

fn builtin_rest(args: Vec<Gc<Object>>) -> BuiltinResult {
    check_argument_count(&args, 1)?;
    let arr = expect_array("rest", &args[0])?;
    if arr.is_empty() {
        return Ok(Object::null());
    }
    Ok(Object::array(arr[1..].to_vec()))
}

fn builtin_push(args: Vec<Gc<Object>>) -> BuiltinResult {
    check_argument_count(&args, 2)?;
    let arr = expect_array("push", &args[0])?;
    let mut new_arr = arr.to_vec();
    new_arr.push(args[1].clone());
    Ok(Object::array(new_arr))
}

fn builtin_puts(args: Vec<Gc<Object>>) -> BuiltinResult {
    for arg in &args {
        println!("{}", arg);
    }
    Ok(Object::null())
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: builtin_len,
    },
    Builtin {
        name: "first",
        func: builtin_first,
    },
    Builtin {
        name: "last",
        func: builtin_last,
    },
    Builtin {
        name: "rest",
        func: builtin_rest,
    },
    Builtin {
        name: "push",
        func: builtin_push,
    },
    Builtin {
        name: "puts",
        func: builtin_puts,
    },
];

pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name).copied()
}
