use std::borrow::Cow;
use std::fmt;

use crate::{ArrayOperand, Constant};

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub name: String,
    pub slot: Option<(u32, u32)>, // (depth_diff, index)
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: None,
        }
    }
}

/// A value node consumed by the optimizer.
///
/// The set of operand kinds is closed: a new kind is a new variant, and
/// every folding pass matching on `Operand` has to handle it.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Nil,
    Literal(Literal),
    Variable(Variable),
    Array(ArrayOperand),
}

impl Operand {
    pub const NIL: Operand = Operand::Nil;

    pub fn int(v: i64) -> Self {
        Operand::Literal(Literal::Int(v))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Operand::Literal(Literal::Str(s.into()))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Operand::Variable(Variable::new(name))
    }

    pub fn array(elements: Vec<Operand>) -> Self {
        Operand::Array(ArrayOperand::new(elements))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Operand::Nil)
    }

    pub fn is_constant(&self) -> bool {
        match self {
            Operand::Nil | Operand::Literal(_) => true,
            Operand::Variable(_) => false,
            Operand::Array(a) => a.is_constant(),
        }
    }

    pub fn as_array(&self) -> Option<&ArrayOperand> {
        match self {
            Operand::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Array form of this operand. Arrays are returned as-is; `nil` splats
    /// to nothing and any other operand to a single element.
    pub fn to_array(&self) -> Cow<'_, ArrayOperand> {
        match self {
            Operand::Array(a) => Cow::Borrowed(a.to_array()),
            Operand::Nil => Cow::Owned(ArrayOperand::default()),
            other => Cow::Owned(ArrayOperand::from_slice(std::slice::from_ref(other))),
        }
    }

    /// `None` when the operand is not an array and there is nothing to fold.
    pub fn fetch_compile_time_array_element(&self, index: i64, splat: bool) -> Option<Operand> {
        self.as_array()
            .map(|a| a.fetch_compile_time_array_element(index, splat))
    }

    /// Folds `self[index]` when both sides are known at compile time.
    pub fn fold_index(&self, index: &Operand, splat: bool) -> Option<Operand> {
        match index {
            Operand::Literal(Literal::Int(i)) => self.fetch_compile_time_array_element(*i, splat),
            _ => None,
        }
    }

    pub fn to_constant(&self) -> Option<Constant> {
        match self {
            Operand::Nil => Some(Constant::Nil),
            Operand::Literal(lit) => Some(match lit {
                Literal::Bool(b) => Constant::Bool(*b),
                Literal::Int(i) => Constant::Int(*i),
                Literal::Float(f) => Constant::Float(*f),
                Literal::Str(s) => Constant::Str(s.clone()),
                Literal::Symbol(s) => Constant::Symbol(s.clone()),
            }),
            Operand::Variable(_) => None,
            Operand::Array(a) => a
                .elements()
                .iter()
                .map(Operand::to_constant)
                .collect::<Option<Vec<_>>>()
                .map(|items| Constant::Array(items.into_boxed_slice())),
        }
    }
}

impl From<Literal> for Operand {
    fn from(lit: Literal) -> Self {
        Operand::Literal(lit)
    }
}

impl From<ArrayOperand> for Operand {
    fn from(a: ArrayOperand) -> Self {
        Operand::Array(a)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => write!(f, "{x:?}"),
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::Symbol(s) => write!(f, ":{s}"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Nil => f.write_str("nil"),
            Operand::Literal(lit) => lit.fmt(f),
            Operand::Variable(v) => write!(f, "%{}", v.name),
            Operand::Array(a) => a.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_constness() {
        assert!(Operand::Nil.is_constant());
        assert!(Operand::int(3).is_constant());
        assert!(Operand::Literal(Literal::Symbol("a".into())).is_constant());
        assert!(!Operand::var("x").is_constant());
    }

    #[test]
    fn to_array_splats_leaves() {
        assert!(Operand::Nil.to_array().is_blank());
        let seven = Operand::int(7);
        let one = seven.to_array();
        assert_eq!(one.elements(), &[Operand::int(7)]);
    }

    #[test]
    fn to_array_borrows_arrays() {
        let op = Operand::array(vec![Operand::int(1)]);
        let Operand::Array(inner) = &op else {
            unreachable!()
        };
        match op.to_array() {
            Cow::Borrowed(a) => assert!(std::ptr::eq(a, inner)),
            Cow::Owned(_) => panic!("array operand was copied"),
        }
    }

    #[test]
    fn fold_index_needs_int_literal() {
        let op = Operand::array(vec![Operand::int(1), Operand::str("b")]);
        assert_eq!(op.fold_index(&Operand::int(1), false), Some(Operand::str("b")));
        assert_eq!(op.fold_index(&Operand::var("i"), false), None);
        assert_eq!(Operand::int(5).fold_index(&Operand::int(0), false), None);
    }

    #[test]
    fn constant_of_variable_array_is_none() {
        let op = Operand::array(vec![Operand::int(1), Operand::var("x")]);
        assert_eq!(op.to_constant(), None);
    }

    #[test]
    fn display_forms() {
        assert_eq!(Operand::var("x").to_string(), "%x");
        assert_eq!(Operand::str("a").to_string(), "\"a\"");
        assert_eq!(Operand::Nil.to_string(), "nil");
    }
}
