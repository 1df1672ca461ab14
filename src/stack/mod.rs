//! Stack implementations
//!
//! This module provides two interchangeable sequential stacks: an
//! array-based `ArrayStack`, which keeps its elements in one contiguous
//! buffer that grows geometrically, and a linked-list-based `ListStack`,
//! which keeps a chain of boxed nodes. The `ListStack` is based on
//! [this blog post](http://cglab.ca/~abeinges/blah/too-many-lists/book/).
//!
//! Both implement the `Stack<T>` trait and, driven by the same sequence of
//! operations, both report the same sizes and iterate the same elements in
//! the same order.
//!
//! # Iteration and mutation
//!
//! Iteration always runs from the most recently pushed element down to the
//! oldest. An iterator borrows the stack for as long as it lives, so a push
//! (which may reallocate an `ArrayStack`) or a pop while iterating is
//! rejected at compile time instead of being undefined:
//!
//! ```compile_fail
//! use lifo::stack::{ArrayStack, Stack};
//!
//! let mut stack = ArrayStack::new();
//! stack.push(1);
//! for x in stack.iter() {
//!   stack.push(*x);
//! }
//! ```
//!
//! ```compile_fail
//! use lifo::stack::{ListStack, Stack};
//!
//! let mut stack = ListStack::new();
//! stack.push(1);
//! let mut it = stack.iter();
//! stack.pop();
//! it.next();
//! ```

mod array;
mod list;

pub use self::array::{ArrayStack, Iter as ArrayIter, IterMut as ArrayIterMut};
pub use self::list::{ListStack, Iter as ListIter, IterMut as ListIterMut};

use alloc::alloc::handle_alloc_error;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::error::{PushError, StackError};

/// The `Stack<T>` abstract data type.
pub trait Stack<T> {
  /// Borrowing iterator, top to bottom.
  type Iter<'a>: Iterator<Item = &'a T> + ExactSizeIterator + Clone
  where Self: 'a, T: 'a;

  /// Mutably borrowing iterator, top to bottom.
  type IterMut<'a>: Iterator<Item = &'a mut T> + ExactSizeIterator
  where Self: 'a, T: 'a;

  /// Creates a new, empty `Stack<T>`. Allocates nothing.
  fn new() -> Self;

  /// Pushes an element onto the stack.
  ///
  /// Aborts through `handle_alloc_error` if storage for the element cannot
  /// be allocated.
  fn push(&mut self, elem: T) {
    if let Err(e) = self.try_push(elem) {
      handle_alloc_error(e.layout())
    }
  }

  /// Pushes an element onto the stack, handing it back if the allocation
  /// fails. On failure the stack is unchanged.
  fn try_push(&mut self, elem: T) -> Result<(), PushError<T>>;

  /// Pops an element from the stack, if there is one. Popping an empty
  /// stack does nothing.
  fn pop(&mut self) -> Option<T>;

  /// Returns the most recently pushed element.
  fn top(&self) -> Result<&T, StackError>;

  /// Returns the most recently pushed element, mutably.
  fn top_mut(&mut self) -> Result<&mut T, StackError>;

  /// Predicate that tests if the stack is empty.
  fn is_empty(&self) -> bool;

  /// Returns the number of elements in the stack.
  fn size(&self) -> usize;

  /// Iterates from the top of the stack to the bottom.
  fn iter(&self) -> Self::Iter<'_>;

  /// Iterates mutably from the top of the stack to the bottom.
  fn iter_mut(&mut self) -> Self::IterMut<'_>;

  /// Pops and drops every element.
  fn clear(&mut self) {
    while self.pop().is_some() {}
  }
}

/// An owning iterator over any `Stack<T>`, yielding elements from top to
/// bottom by popping them.
pub struct IntoIter<S, T> {
  stack: S,
  elem: PhantomData<T>,
}

impl<S, T> IntoIter<S, T>
where S: Stack<T> {
  pub(crate) fn new(stack: S) -> Self {
    Self {
      stack: stack,
      elem: PhantomData,
    }
  }
}

impl<S, T> Iterator for IntoIter<S, T>
where S: Stack<T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    self.stack.pop()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let n = self.stack.size();
    (n, Some(n))
  }
}

impl<S, T> ExactSizeIterator for IntoIter<S, T>
where S: Stack<T> {}

impl<S, T> FusedIterator for IntoIter<S, T>
where S: Stack<T> {}
