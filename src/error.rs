//! Errors reported by `Stack<T>` implementations
//!
//! Exactly one condition is recoverable in normal use: reading the top of an
//! empty stack. Allocation failure is fatal for `push`, and is only handed
//! back to the caller by `try_push`.
//!
//! Popping an empty stack is *not* an error. `pop` simply returns `None`.

use alloc::alloc::Layout;
use core::fmt;

/// The error type for stack accesses.
#[derive(Debug)]
#[derive(Clone, Copy)]
#[derive(PartialEq, Eq)]
pub enum StackError {
  /// `top` or `top_mut` was called on a stack holding zero elements.
  EmptyContainerAccess,
  /// The allocator could not satisfy a request for the given layout.
  AllocationFailure(Layout),
}

impl fmt::Display for StackError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StackError::EmptyContainerAccess => write!(f, "stack is empty"),
      StackError::AllocationFailure(layout) => write!(
        f,
        "memory allocation of {} bytes (align {}) failed",
        layout.size(),
        layout.align()),
    }
  }
}

#[cfg(feature="std")]
impl std::error::Error for StackError {}

/// Returned by `try_push` when storage for the new element could not be
/// allocated. The stack is unchanged and the element is handed back.
pub struct PushError<T> {
  elem: T,
  layout: Layout,
}

impl<T> PushError<T> {
  pub(crate) fn new(elem: T, layout: Layout) -> Self {
    Self {
      elem: elem,
      layout: layout,
    }
  }

  /// The layout the allocator refused.
  pub fn layout(&self) -> Layout {
    self.layout
  }

  /// Recovers the element that could not be pushed.
  pub fn into_inner(self) -> T {
    self.elem
  }
}

// Manual impl so that `T` does not have to be `Debug` to unwrap a result.
impl<T> fmt::Debug for PushError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PushError")
      .field("layout", &self.layout)
      .finish_non_exhaustive()
  }
}

impl<T> fmt::Display for PushError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&StackError::AllocationFailure(self.layout), f)
  }
}

#[cfg(feature="std")]
impl<T> std::error::Error for PushError<T> {}

impl<T> From<PushError<T>> for StackError {
  fn from(e: PushError<T>) -> Self {
    StackError::AllocationFailure(e.layout)
  }
}


#[cfg(test)]
mod error_tests {
  use super::*;

  #[test]
  fn display_messages() {
    assert_eq!(StackError::EmptyContainerAccess.to_string(), "stack is empty");

    let layout = Layout::new::<u64>();
    assert_eq!(
      StackError::AllocationFailure(layout).to_string(),
      "memory allocation of 8 bytes (align 8) failed");
  }

  #[test]
  fn push_error_returns_element() {
    let layout = Layout::new::<[u32; 4]>();
    let e = PushError::new(7, layout);

    assert_eq!(e.layout(), layout);
    assert_eq!(e.to_string(), StackError::AllocationFailure(layout).to_string());
    assert_eq!(StackError::from(PushError::new(1, layout)),
               StackError::AllocationFailure(layout));
    assert_eq!(e.into_inner(), 7);
  }
}
