use std::fmt::Display;
use std::rc::Rc;

/// Behaviour shared by every syntax tree node besides its `Display` rendering.
pub trait Node: Display {
    /// Text of the token the node starts with.
    fn token_literal(&self) -> String;
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub struct LetStatement {
    pub identifier: Identifier,
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ReturnStatement {
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    StringLiteral(String),
    BooleanLiteral(bool),
    ArrayLiteral(Vec<Expression>),
    HashLiteral(Vec<(Expression, Expression)>),
    PrefixOperation(PrefixOperationKind, Box<Expression>),
    InfixOperation(InfixOperationKind, Box<Expression>, Box<Expression>),
    IfExpression {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        parameters: Rc<[Identifier]>,
        body: Rc<BlockStatement>,
    },
    CallExpression {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    IndexExpression {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperationKind {
    Plus,
    Minus,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
    Multiply,
    Divide,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperationKind {
    Minus,
    Bang,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier {
    pub name: Rc<str>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

// Expression statements need a `;` when another statement follows, otherwise
// `(a)` followed by `(b)` would read back as a call.
fn write_statements(f: &mut std::fmt::Formatter<'_>, statements: &[Statement]) -> std::fmt::Result {
    for (i, statement) in statements.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", statement)?;
        if matches!(statement, Statement::Expression(_)) && i + 1 < statements.len() {
            write!(f, ";")?;
        }
    }
    Ok(())
}

fn write_list<T: Display>(f: &mut std::fmt::Formatter<'_>, items: &[T]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for LetStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "let {} = {};", self.identifier, self.value)
    }
}

impl Display for ReturnStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "return {};", self.value)
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{ ")?;
        write_statements(f, &self.statements)?;
        write!(f, " }}")
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(ident) => write!(f, "{}", ident),
            IntegerLiteral(val) => write!(f, "{}", val),
            StringLiteral(val) => write!(f, "\"{}\"", val),
            BooleanLiteral(val) => write!(f, "{}", val),
            ArrayLiteral(arr) => {
                write!(f, "[")?;
                write_list(f, &arr[..])?;
                write!(f, "]")
            }
            HashLiteral(hash) => {
                write!(f, "{{")?;
                for (i, (key, value)) in hash.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            PrefixOperation(kind, expr) => write!(f, "({}{})", kind, expr),
            InfixOperation(kind, left, right) => write!(f, "({} {} {})", left, kind, right),
            IfExpression {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            FunctionLiteral { parameters, body } => {
                write!(f, "fn(")?;
                write_list(f, &parameters[..])?;
                write!(f, ") {}", body)
            }
            CallExpression {
                function,
                arguments,
            } => {
                write!(f, "{}(", function)?;
                write_list(f, &arguments[..])?;
                write!(f, ")")
            }
            IndexExpression { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            Let(statement) => write!(f, "{}", statement),
            Return(statement) => write!(f, "{}", statement),
            Expression(expression) => write!(f, "{}", expression),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_statements(f, &self.statements)
    }
}

impl Display for PrefixOperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl Display for InfixOperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl PrefixOperationKind {
    pub fn to_str(&self) -> &'static str {
        use PrefixOperationKind::*;
        match self {
            Minus => "-",
            Bang => "!",
        }
    }
}

impl InfixOperationKind {
    pub fn to_str(&self) -> &'static str {
        use InfixOperationKind::*;
        match self {
            Plus => "+",
            Minus => "-",
            LessThan => "<",
            GreaterThan => ">",
            Equal => "==",
            NotEqual => "!=",
            Multiply => "*",
            Divide => "/",
        }
    }
}

impl Node for Program {
    fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(|statement| statement.token_literal())
            .unwrap_or_default()
    }
}

impl Node for Statement {
    fn token_literal(&self) -> String {
        match self {
            Statement::Let(_) => "let".to_owned(),
            Statement::Return(_) => "return".to_owned(),
            Statement::Expression(expression) => expression.token_literal(),
        }
    }
}

impl Node for BlockStatement {
    fn token_literal(&self) -> String {
        "{".to_owned()
    }
}

impl Node for Identifier {
    fn token_literal(&self) -> String {
        self.name.to_string()
    }
}

impl Node for Expression {
    fn token_literal(&self) -> String {
        use Expression::*;
        match self {
            Identifier(ident) => ident.token_literal(),
            IntegerLiteral(val) => val.to_string(),
            StringLiteral(val) => val.clone(),
            BooleanLiteral(val) => val.to_string(),
            ArrayLiteral(_) => "[".to_owned(),
            HashLiteral(_) => "{".to_owned(),
            PrefixOperation(kind, _) => kind.to_str().to_owned(),
            InfixOperation(kind, _, _) => kind.to_str().to_owned(),
            IfExpression { .. } => "if".to_owned(),
            FunctionLiteral { .. } => "fn".to_owned(),
            CallExpression { .. } => "(".to_owned(),
            IndexExpression { .. } => "[".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier { name: name.into() }
    }

    #[test]
    fn test_let_rendering() {
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                identifier: ident("myVar"),
                value: Expression::Identifier(ident("anotherVar")),
            })],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
        assert_eq!(program.token_literal(), "let");
    }

    #[test]
    fn test_statement_sequence() {
        let program = Program {
            statements: vec![
                Statement::Expression(Expression::IntegerLiteral(1)),
                Statement::Return(ReturnStatement {
                    value: Expression::IntegerLiteral(2),
                }),
                Statement::Expression(Expression::IntegerLiteral(3)),
            ],
        };

        assert_eq!(program.to_string(), "1; return 2; 3");
    }

    #[test]
    fn test_function_rendering() {
        let body = BlockStatement {
            statements: vec![Statement::Expression(Expression::InfixOperation(
                InfixOperationKind::Plus,
                Box::new(Expression::Identifier(ident("x"))),
                Box::new(Expression::Identifier(ident("y"))),
            ))],
        };
        let function = Expression::FunctionLiteral {
            parameters: vec![ident("x"), ident("y")].into(),
            body: Rc::new(body),
        };

        assert_eq!(function.to_string(), "fn(x, y) { (x + y) }");
        assert_eq!(function.token_literal(), "fn");

        let empty = Expression::FunctionLiteral {
            parameters: Vec::new().into(),
            body: Rc::new(BlockStatement { statements: vec![] }),
        };
        assert_eq!(empty.to_string(), "fn() {}");
    }

    #[test]
    fn test_collections_rendering() {
        let hash = Expression::HashLiteral(vec![
            (
                Expression::StringLiteral("one".to_owned()),
                Expression::IntegerLiteral(1),
            ),
            (
                Expression::BooleanLiteral(true),
                Expression::ArrayLiteral(vec![
                    Expression::IntegerLiteral(1),
                    Expression::IntegerLiteral(2),
                ]),
            ),
        ]);

        assert_eq!(hash.to_string(), "{\"one\": 1, true: [1, 2]}");
        assert_eq!(hash.token_literal(), "{");
        assert_eq!(Expression::HashLiteral(vec![]).to_string(), "{}");
    }

    #[test]
    fn test_token_literals() {
        let tests = vec![
            (Expression::Identifier(ident("foo")), "foo"),
            (Expression::IntegerLiteral(5), "5"),
            (Expression::StringLiteral("bar".to_owned()), "bar"),
            (Expression::BooleanLiteral(false), "false"),
            (
                Expression::PrefixOperation(
                    PrefixOperationKind::Bang,
                    Box::new(Expression::BooleanLiteral(true)),
                ),
                "!",
            ),
            (
                Expression::InfixOperation(
                    InfixOperationKind::NotEqual,
                    Box::new(Expression::IntegerLiteral(1)),
                    Box::new(Expression::IntegerLiteral(2)),
                ),
                "!=",
            ),
        ];

        for (expression, expected) in tests {
            assert_eq!(expression.token_literal(), expected);
        }
        assert_eq!(Program { statements: vec![] }.token_literal(), "");
    }
}
