//! Output contract: where translated assignments go.

use serde::Serialize;

use crate::value::PasteValue;

/// Receives the result of a paste, one callback per destination position.
pub trait PasteSink {
    /// Place `value` at destination `(row, col)`.
    fn on_value(&mut self, row: usize, col: usize, value: PasteValue);

    /// Clear destination `(row, col)`: inside the copied rectangle but not
    /// populated by this paste.
    fn on_clear(&mut self, row: usize, col: usize);
}

impl<S: PasteSink + ?Sized> PasteSink for &mut S {
    fn on_value(&mut self, row: usize, col: usize, value: PasteValue) {
        (**self).on_value(row, col, value)
    }

    fn on_clear(&mut self, row: usize, col: usize) {
        (**self).on_clear(row, col)
    }
}

/// Sink built from two closures.
pub struct FnSink<V, C> {
    on_value: V,
    on_clear: C,
}

impl<V, C> FnSink<V, C>
where
    V: FnMut(usize, usize, PasteValue),
    C: FnMut(usize, usize),
{
    pub fn new(on_value: V, on_clear: C) -> Self {
        Self { on_value, on_clear }
    }
}

impl<V, C> PasteSink for FnSink<V, C>
where
    V: FnMut(usize, usize, PasteValue),
    C: FnMut(usize, usize),
{
    fn on_value(&mut self, row: usize, col: usize, value: PasteValue) {
        (self.on_value)(row, col, value)
    }

    fn on_clear(&mut self, row: usize, col: usize) {
        (self.on_clear)(row, col)
    }
}

/// One recorded callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PasteOp {
    Set { row: usize, col: usize, value: PasteValue },
    Clear { row: usize, col: usize },
}

impl PasteOp {
    pub fn position(&self) -> (usize, usize) {
        match self {
            PasteOp::Set { row, col, .. } | PasteOp::Clear { row, col } => (*row, *col),
        }
    }
}

/// Sink that records every callback in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PasteOps {
    ops: Vec<PasteOp>,
}

impl PasteOps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[PasteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<PasteOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// `(row, col, value)` for every `Set`, in order.
    pub fn values(&self) -> Vec<(usize, usize, &PasteValue)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PasteOp::Set { row, col, value } => Some((*row, *col, value)),
                PasteOp::Clear { .. } => None,
            })
            .collect()
    }

    /// `(row, col)` for every `Clear`, in order.
    pub fn clears(&self) -> Vec<(usize, usize)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PasteOp::Clear { row, col } => Some((*row, *col)),
                PasteOp::Set { .. } => None,
            })
            .collect()
    }

    /// Last value set at `(row, col)`, if any.
    pub fn value_at(&self, row: usize, col: usize) -> Option<&PasteValue> {
        self.ops.iter().rev().find_map(|op| match op {
            PasteOp::Set { row: r, col: c, value } if *r == row && *c == col => Some(value),
            _ => None,
        })
    }
}

impl PasteSink for PasteOps {
    fn on_value(&mut self, row: usize, col: usize, value: PasteValue) {
        self.ops.push(PasteOp::Set { row, col, value });
    }

    fn on_clear(&mut self, row: usize, col: usize) {
        self.ops.push(PasteOp::Clear { row, col });
    }
}
