//! Array operand: `[_, _, .., _]` before it is lowered into calls that
//! actually build an array object.

use std::fmt;

use crate::Operand;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrayOperand {
    elements: Box<[Operand]>,
}

impl ArrayOperand {
    pub fn new(elements: Vec<Operand>) -> Self {
        Self {
            elements: elements.into_boxed_slice(),
        }
    }

    pub fn from_slice(elements: &[Operand]) -> Self {
        Self {
            elements: elements.into(),
        }
    }

    pub fn elements(&self) -> &[Operand] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_blank(&self) -> bool {
        self.elements.is_empty()
    }

    /// Constant iff every element is. Blank arrays are constant.
    pub fn is_constant(&self) -> bool {
        self.elements.iter().all(Operand::is_constant)
    }

    /// Compile-time `self[index]` (or `self[index..]` when `splat`).
    ///
    /// Out of range is not an error: a single fetch yields `nil`, a splat
    /// yields the blank array. Negative indices count as out of range.
    pub fn fetch_compile_time_array_element(&self, index: i64, splat: bool) -> Operand {
        let start = usize::try_from(index).ok();
        if !splat {
            return start
                .and_then(|i| self.elements.get(i))
                .cloned()
                .unwrap_or(Operand::NIL);
        }
        match start.and_then(|i| self.elements.get(i..)) {
            Some(rest) => Operand::Array(ArrayOperand::from_slice(rest)),
            None => Operand::Array(ArrayOperand::default()),
        }
    }

    pub fn to_array(&self) -> &Self {
        self
    }
}

impl From<Option<Vec<Operand>>> for ArrayOperand {
    fn from(elements: Option<Vec<Operand>>) -> Self {
        Self::new(elements.unwrap_or_default())
    }
}

impl FromIterator<Operand> for ArrayOperand {
    fn from_iter<I: IntoIterator<Item = Operand>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ArrayOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Array:")?;
        if self.is_blank() {
            return Ok(());
        }
        f.write_str("[")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        f.write_str("]")
    }
}
