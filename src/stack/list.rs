use alloc::alloc::{alloc, Layout};
use alloc::boxed::Box;
use core::fmt;
use core::iter::FusedIterator;
use core::ptr;

use super::*;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
  elem: T,
  next: Link<T>,
}

/// A list-based `Stack<T>`.
///
/// The head node is the top of the stack, and every node owns the one
/// pushed before it.
pub struct ListStack<T> {
  head: Link<T>,
  count: usize,
}

impl<T> Stack<T> for ListStack<T> {
  type Iter<'a> = Iter<'a, T> where Self: 'a, T: 'a;
  type IterMut<'a> = IterMut<'a, T> where Self: 'a, T: 'a;

  fn new() -> Self {
    Self {
      head: None,
      count: 0,
    }
  }

  fn try_push(&mut self, elem: T) -> Result<(), PushError<T>> {
    let layout = Layout::new::<Node<T>>();
    let raw = unsafe { alloc(layout) } as *mut Node<T>;
    if raw.is_null() {
      return Err(PushError::new(elem, layout));
    }

    // `raw` came from the global allocator with the layout of a `Node<T>`,
    // which is what `Box` expects to free it with.
    let new_node = unsafe {
      ptr::write(raw, Node {
        elem: elem,
        next: self.head.take(),
      });
      Box::from_raw(raw)
    };

    self.head = Some(new_node);
    self.count += 1;
    Ok(())
  }

  fn pop(&mut self) -> Option<T> {
    self.head.take().map(|node| {
      let node = *node;
      self.head = node.next;
      self.count -= 1;
      node.elem
    })
  }

  fn top(&self) -> Result<&T, StackError> {
    self.head.as_ref()
      .map(|node| &node.elem)
      .ok_or(StackError::EmptyContainerAccess)
  }

  fn top_mut(&mut self) -> Result<&mut T, StackError> {
    self.head.as_mut()
      .map(|node| &mut node.elem)
      .ok_or(StackError::EmptyContainerAccess)
  }

  fn is_empty(&self) -> bool {
    self.head.is_none()
  }

  fn size(&self) -> usize {
    self.count
  }

  fn iter(&self) -> Iter<'_, T> {
    Iter {
      next: self.head.as_deref(),
      remaining: self.count,
    }
  }

  fn iter_mut(&mut self) -> IterMut<'_, T> {
    IterMut {
      next: self.head.as_deref_mut(),
      remaining: self.count,
    }
  }

  fn clear(&mut self) {
    let mut link = self.head.take();
    self.count = 0;
    while let Some(mut node) = link {
      link = node.next.take();
    }
  }
}

// Unlink nodes one at a time; the default drop would recurse once per node.
impl<T> Drop for ListStack<T> {
  fn drop(&mut self) {
    self.clear();
  }
}

impl<T> Default for ListStack<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Clone for ListStack<T>
where T: Clone {
  fn clone(&self) -> Self {
    let mut reversed = Self::new();
    for elem in self.iter() {
      reversed.push(elem.clone());
    }
    reversed.into_iter().collect()
  }
}

impl<T> PartialEq for ListStack<T>
where T: PartialEq {
  fn eq(&self, other: &Self) -> bool {
    self.count == other.count && self.iter().eq(other.iter())
  }
}

impl<T> Eq for ListStack<T>
where T: Eq {}

impl<T> fmt::Debug for ListStack<T>
where T: fmt::Debug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<T> FromIterator<T> for ListStack<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut stack = Self::new();
    stack.extend(iter);
    stack
  }
}

impl<T> Extend<T> for ListStack<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for elem in iter {
      self.push(elem);
    }
  }
}

impl<T> IntoIterator for ListStack<T> {
  type Item = T;
  type IntoIter = IntoIter<Self, T>;

  fn into_iter(self) -> Self::IntoIter {
    IntoIter::new(self)
  }
}

impl<'a, T> IntoIterator for &'a ListStack<T> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut ListStack<T> {
  type Item = &'a mut T;
  type IntoIter = IterMut<'a, T>;

  fn into_iter(self) -> IterMut<'a, T> {
    self.iter_mut()
  }
}


//////////////////////////////////////////////////////////////////////////////
//// Iterators
//////////////////////////////////////////////////////////////////////////////

/// Iterates a `ListStack` from the head (top) to the tail (bottom).
pub struct Iter<'a, T> {
  next: Option<&'a Node<T>>,
  remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  fn next(&mut self) -> Option<&'a T> {
    self.next.map(|node| {
      self.next = node.next.as_deref();
      self.remaining -= 1;
      &node.elem
    })
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
  fn clone(&self) -> Self {
    Self {
      next: self.next,
      remaining: self.remaining,
    }
  }
}

/// Mutably iterates a `ListStack` from the head (top) to the tail (bottom).
pub struct IterMut<'a, T> {
  next: Option<&'a mut Node<T>>,
  remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
  type Item = &'a mut T;

  fn next(&mut self) -> Option<&'a mut T> {
    self.next.take().map(|node| {
      self.next = node.next.as_deref_mut();
      self.remaining -= 1;
      &mut node.elem
    })
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}
