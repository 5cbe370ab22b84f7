#![allow(dead_code)]
use smallvec::SmallVec;

/// Operand storage for the VM.
///
/// Conditions rarely nest deeper than a handful of operands, so the first
/// `INLINE` entries live inline and only deeper patterns spill to the heap.
///
/// # Examples
///
/// ```ignore
/// use condcfg_core::vm::Stack;
///
/// let mut stack = Stack::with_capacity(4);
/// stack.push(42);
/// stack.push(17);
/// assert_eq!(stack.pop(), Some(17));
/// assert_eq!(stack.peek(), Some(&42));
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Stack<T> {
    items: SmallVec<[T; INLINE]>,
}

const INLINE: usize = 16;

impl<T> Stack<T> {
    /// Creates an empty stack able to hold `capacity` values without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: SmallVec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Removes and returns the top value, or `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns a reference to the top value without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all values, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
