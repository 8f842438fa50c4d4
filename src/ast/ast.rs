use std::{fmt::Display, slice::Iter};

use super::{
    expressions::{
        ArrayLiteral, BooleanLiteral, CallExpr, FunctionLiteral, HashLiteral, Identifier, IfExpr,
        IndexExpr, InfixExpr, IntegerLiteral, PrefixExpr, StringLiteral,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Shared by every statement and expression. `Display` yields the
/// canonical, fully parenthesized source form.
pub trait Node: Display {
    /// Text of the token that introduced the node, for diagnostics.
    fn leading_literal(&self) -> &str;
    /// Canonical re-printed source form.
    fn print(&self) -> String {
        self.to_string()
    }
}

/// A unit appearing in a program or block body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Node for Statement {
    fn leading_literal(&self) -> &str {
        match self {
            Statement::Let(stmt) => stmt.leading_literal(),
            Statement::Return(stmt) => stmt.leading_literal(),
            Statement::Expression(stmt) => stmt.leading_literal(),
            Statement::Block(stmt) => stmt.leading_literal(),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Let(stmt) => Display::fmt(stmt, f),
            Statement::Return(stmt) => Display::fmt(stmt, f),
            Statement::Expression(stmt) => Display::fmt(stmt, f),
            Statement::Block(stmt) => Display::fmt(stmt, f),
        }
    }
}

/// A unit that yields a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionLiteral),
    Call(CallExpr),
    Array(ArrayLiteral),
    Index(IndexExpr),
    Hash(HashLiteral),
}

impl Expression {
    fn as_node(&self) -> &dyn Node {
        match self {
            Expression::Identifier(expr) => expr,
            Expression::Integer(expr) => expr,
            Expression::String(expr) => expr,
            Expression::Boolean(expr) => expr,
            Expression::Prefix(expr) => expr,
            Expression::Infix(expr) => expr,
            Expression::If(expr) => expr,
            Expression::Function(expr) => expr,
            Expression::Call(expr) => expr,
            Expression::Array(expr) => expr,
            Expression::Index(expr) => expr,
            Expression::Hash(expr) => expr,
        }
    }
}

impl Node for Expression {
    fn leading_literal(&self) -> &str {
        self.as_node().leading_literal()
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.as_node(), f)
    }
}

/// Root of the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program {
    fn leading_literal(&self) -> &str {
        self.statements
            .first()
            .map(|stmt| stmt.leading_literal())
            .unwrap_or("")
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Writes `items` separated by `", "`.
pub(crate) fn write_joined<T: Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: &[T],
) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
