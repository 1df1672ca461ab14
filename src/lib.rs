//! Last-in-first-out containers
//!
//! Two interchangeable implementations of the `Stack<T>` abstract data type:
//! `ArrayStack`, backed by one geometrically growing buffer, and `ListStack`,
//! backed by a chain of owned nodes. See the `stack` module.
//!
//! ```
//! use lifo::stack::{ArrayStack, ListStack, Stack};
//! use lifo::StackError;
//!
//! let mut array = ArrayStack::new();
//! let mut list = ListStack::new();
//! for i in 1..=3 {
//!   array.push(i);
//!   list.push(i);
//! }
//!
//! array.pop();
//! list.pop();
//!
//! assert_eq!(array.top(), Ok(&2));
//! assert!(array.iter().eq(list.iter()));
//!
//! array.clear();
//! assert_eq!(array.pop(), None);
//! assert_eq!(array.top(), Err(StackError::EmptyContainerAccess));
//! ```

#![cfg_attr(all(not(feature="std"), not(test)), no_std)]

extern crate alloc;

pub mod error;
pub mod stack;

#[cfg(test)]
mod testing;

pub use self::error::{PushError, StackError};
