//! Value stack
//!
//! A LIFO of `i64`. Popping an empty stack is not an error: it yields `0` and
//! the stack stays empty. Programs rely on this to get free zeros.

/// The engine's value stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    pub fn push(&mut self, value: i64) {
        self.values.push(value);
    }

    /// Remove and return the top value, or 0 when empty
    pub fn pop(&mut self) -> i64 {
        self.values.pop().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().rev().copied()
    }

    /// Copy of the values, top first
    pub fn snapshot(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_pop_yields_zero() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn snapshot_is_top_first() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.snapshot(), vec![3, 2, 1]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(i64),
        Pop,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![any::<i64>().prop_map(Op::Push), Just(Op::Pop)]
    }

    proptest! {
        #[test]
        fn pops_never_underflow(ops in prop::collection::vec(op(), 0..200)) {
            let mut stack = Stack::new();
            let mut model: Vec<i64> = Vec::new();
            for op in ops {
                match op {
                    Op::Push(v) => {
                        stack.push(v);
                        model.push(v);
                    }
                    Op::Pop => {
                        prop_assert_eq!(stack.pop(), model.pop().unwrap_or(0));
                    }
                }
                prop_assert_eq!(stack.len(), model.len());
            }
        }
    }
}
