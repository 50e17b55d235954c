//! Folded constants and the pool they are lowered into.

use crate::Operand;

#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
    Array(Box<[Constant]>),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantPool {
    pub constants: Vec<Constant>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowers a constant operand into the pool and returns its index.
    /// Identical constants share one slot; floats are identical when their
    /// bits are, so `-0.0` and `0.0` differ and every `NaN` payload has one
    /// slot. `None` if the operand is not constant.
    pub fn intern(&mut self, operand: &Operand) -> Option<u32> {
        let constant = operand.to_constant()?;
        if let Some(idx) = self
            .constants
            .iter()
            .position(|c| same_constant(c, &constant))
        {
            return Some(idx as u32);
        }
        self.constants.push(constant);
        Some((self.constants.len() - 1) as u32)
    }

    pub fn get(&self, idx: u32) -> Option<&Constant> {
        self.constants.get(idx as usize)
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

fn same_constant(a: &Constant, b: &Constant) -> bool {
    match (a, b) {
        (Constant::Float(x), Constant::Float(y)) => x.to_bits() == y.to_bits(),
        (Constant::Array(xs), Constant::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| same_constant(x, y))
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Literal;

    #[test]
    fn intern_dedups_equal_constants() {
        let mut pool = ConstantPool::new();
        let a = Operand::array(vec![Operand::int(1), Operand::str("x")]);
        let b = Operand::array(vec![Operand::int(1), Operand::str("x")]);
        assert_eq!(pool.intern(&a), Some(0));
        assert_eq!(pool.intern(&Operand::Nil), Some(1));
        assert_eq!(pool.intern(&b), Some(0));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn intern_keeps_float_bit_patterns_apart() {
        let mut pool = ConstantPool::new();
        let float = |x: f64| Operand::Literal(Literal::Float(x));
        assert_eq!(pool.intern(&float(0.0)), Some(0));
        assert_eq!(pool.intern(&float(-0.0)), Some(1));
        match pool.get(1) {
            Some(Constant::Float(x)) => assert!(x.is_sign_negative()),
            other => panic!("unexpected slot {other:?}"),
        }
        assert_eq!(pool.intern(&float(f64::NAN)), Some(2));
        assert_eq!(pool.intern(&float(f64::NAN)), Some(2));
        assert_eq!(pool.len(), 3);

        let nested = |x: f64| Operand::array(vec![Operand::int(1), float(x)]);
        assert_eq!(pool.intern(&nested(0.0)), Some(3));
        assert_eq!(pool.intern(&nested(-0.0)), Some(4));
        assert_eq!(pool.intern(&nested(f64::NAN)), Some(5));
        assert_eq!(pool.intern(&nested(f64::NAN)), Some(5));
    }

    #[test]
    fn intern_rejects_variables() {
        let mut pool = ConstantPool::new();
        let op = Operand::array(vec![Operand::var("v")]);
        assert_eq!(pool.intern(&op), None);
        assert!(pool.is_empty());
    }

    #[test]
    fn nested_arrays_lower_structurally() {
        let mut pool = ConstantPool::new();
        let op = Operand::array(vec![
            Operand::Literal(Literal::Symbol("k".into())),
            Operand::array(vec![Operand::Literal(Literal::Bool(true))]),
        ]);
        let idx = pool.intern(&op).unwrap_or(u32::MAX);
        assert_eq!(
            pool.get(idx),
            Some(&Constant::Array(
                vec![
                    Constant::Symbol("k".into()),
                    Constant::Array(vec![Constant::Bool(true)].into_boxed_slice()),
                ]
                .into_boxed_slice()
            ))
        );
    }
}
