//! Position-preserving text-show arrays
//! Created: 2026-10-16 14:55:18 UTC
//!
//! Mirrors the operand of a `TJ` operator: literal strings interleaved with
//! horizontal adjustments in thousandths of a text space unit.

use lopdf::{Object, StringFormat};

/// Operand array for a `TJ` operator
#[derive(Debug, Clone, Default)]
pub struct TextArray {
    items: Vec<Object>,
}

impl TextArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends shown text, merging with a preceding string
    pub fn add_string(&mut self, codes: &[u8]) {
        if codes.is_empty() {
            return;
        }
        if let Some(Object::String(previous, _)) = self.items.last_mut() {
            previous.extend_from_slice(codes);
            return;
        }
        self.items.push(Object::String(codes.to_vec(), StringFormat::Literal));
    }

    /// Appends an adjustment, summing with a preceding number
    pub fn add_number(&mut self, value: f64) {
        if value == 0.0 || !value.is_finite() {
            return;
        }
        if let Some(previous) = self.items.last().and_then(number_value) {
            let sum = previous + value;
            self.items.pop();
            if sum != 0.0 {
                self.items.push(real(sum));
            }
            return;
        }
        self.items.push(real(value));
    }

    pub fn items(&self) -> &[Object] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_objects(self) -> Vec<Object> {
        self.items
    }

    /// The array as a single `TJ` operand
    pub fn to_operand(&self) -> Object {
        Object::Array(self.items.clone())
    }
}

/// Numeric value of an integer or real object
pub fn number_value(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn real(value: f64) -> Object {
    Object::Real(value as _)
}
