use alloc::alloc::{alloc, dealloc, Layout};
use core::iter::{self, FusedIterator};
use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use core::{cmp, fmt, mem, slice};

use super::*;

/// Capacity of the first buffer allocated by a push.
const MIN_CAPACITY: usize = 4;

/// An array-based `Stack<T>`.
///
/// Elements live in a single contiguous buffer, bottom at index 0. The buffer
/// is allocated on the first push and replaced by one twice as large whenever
/// a push finds it full. It never shrinks.
pub struct ArrayStack<T> {
  buf: NonNull<T>,
  cap: usize,
  len: usize,
  elems: PhantomData<T>,
}

impl<T> ArrayStack<T> {
  /// Returns the number of elements the current buffer can hold.
  pub fn capacity(&self) -> usize {
    self.cap
  }

  fn as_slice(&self) -> &[T] {
    // `[0, len)` is always initialized, and `buf` is dangling only when
    // `len == 0` or `T` is zero-sized.
    unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
  }

  fn as_mut_slice(&mut self) -> &mut [T] {
    unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
  }

  /// Replaces the buffer with one of capacity `max(4, 2 * cap)`, moving the
  /// live elements over in order. On failure nothing changes and the refused
  /// layout is returned.
  fn grow(&mut self) -> Result<(), Layout> {
    let new_cap = match self.cap.checked_mul(2) {
      Some(c) => cmp::max(MIN_CAPACITY, c),
      None => capacity_overflow(),
    };

    if mem::size_of::<T>() == 0 {
      self.cap = new_cap;
      return Ok(());
    }

    let new_layout = match Layout::array::<T>(new_cap) {
      Ok(layout) => layout,
      Err(_) => capacity_overflow(),
    };
    let new_buf = NonNull::new(unsafe { alloc(new_layout) } as *mut T)
      .ok_or(new_layout)?;

    unsafe {
      ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_ptr(), self.len);
      self.release();
    }

    self.buf = new_buf;
    self.cap = new_cap;
    Ok(())
  }

  /// Frees the buffer without touching the elements in it.
  ///
  /// Safety: the elements must already have been moved out or dropped, and
  /// `buf` must not be used again before it is reassigned.
  unsafe fn release(&mut self) {
    if self.cap != 0 && mem::size_of::<T>() != 0 {
      let layout = Layout::array::<T>(self.cap)
        .unwrap_or_else(|_| capacity_overflow());
      dealloc(self.buf.as_ptr() as *mut u8, layout);
    }
  }
}

#[cold]
fn capacity_overflow() -> ! {
  panic!("capacity overflow")
}

impl<T> Stack<T> for ArrayStack<T> {
  type Iter<'a> = Iter<'a, T> where Self: 'a, T: 'a;
  type IterMut<'a> = IterMut<'a, T> where Self: 'a, T: 'a;

  fn new() -> Self {
    Self {
      buf: NonNull::dangling(),
      cap: 0,
      len: 0,
      elems: PhantomData,
    }
  }

  fn try_push(&mut self, elem: T) -> Result<(), PushError<T>> {
    if self.len == self.cap {
      if let Err(layout) = self.grow() {
        return Err(PushError::new(elem, layout));
      }
    }

    unsafe {
      ptr::write(self.buf.as_ptr().add(self.len), elem);
    }
    self.len += 1;
    Ok(())
  }

  fn pop(&mut self) -> Option<T> {
    if self.len == 0 {
      None
    } else {
      self.len -= 1;
      unsafe { Some(ptr::read(self.buf.as_ptr().add(self.len))) }
    }
  }

  fn top(&self) -> Result<&T, StackError> {
    self.as_slice().last().ok_or(StackError::EmptyContainerAccess)
  }

  fn top_mut(&mut self) -> Result<&mut T, StackError> {
    self.as_mut_slice().last_mut().ok_or(StackError::EmptyContainerAccess)
  }

  fn is_empty(&self) -> bool {
    self.len == 0
  }

  fn size(&self) -> usize {
    self.len
  }

  fn iter(&self) -> Iter<'_, T> {
    Iter {
      inner: self.as_slice().iter().rev(),
    }
  }

  fn iter_mut(&mut self) -> IterMut<'_, T> {
    IterMut {
      inner: self.as_mut_slice().iter_mut().rev(),
    }
  }

  fn clear(&mut self) {
    let elems: *mut [T] = self.as_mut_slice();
    // A panicking destructor must not lead to a double drop.
    self.len = 0;
    unsafe { ptr::drop_in_place(elems) }
  }
}

impl<T> Drop for ArrayStack<T> {
  fn drop(&mut self) {
    // Frees the buffer even if an element's destructor panics.
    struct Release<'a, T>(&'a mut ArrayStack<T>);

    impl<'a, T> Drop for Release<'a, T> {
      fn drop(&mut self) {
        unsafe { self.0.release() }
      }
    }

    let elems: *mut [T] = self.as_mut_slice();
    self.len = 0;
    let _release = Release(self);
    unsafe { ptr::drop_in_place(elems) }
  }
}

// The buffer is uniquely owned, like a `Vec<T>`.
unsafe impl<T: Send> Send for ArrayStack<T> {}
unsafe impl<T: Sync> Sync for ArrayStack<T> {}

impl<T> Default for ArrayStack<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Clone for ArrayStack<T>
where T: Clone {
  fn clone(&self) -> Self {
    self.as_slice().iter().cloned().collect()
  }
}

impl<T> PartialEq for ArrayStack<T>
where T: PartialEq {
  fn eq(&self, other: &Self) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl<T> Eq for ArrayStack<T>
where T: Eq {}

impl<T> fmt::Debug for ArrayStack<T>
where T: fmt::Debug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<T> FromIterator<T> for ArrayStack<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut stack = Self::new();
    stack.extend(iter);
    stack
  }
}

impl<T> Extend<T> for ArrayStack<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for elem in iter {
      self.push(elem);
    }
  }
}

impl<T> IntoIterator for ArrayStack<T> {
  type Item = T;
  type IntoIter = IntoIter<Self, T>;

  fn into_iter(self) -> Self::IntoIter {
    IntoIter::new(self)
  }
}

impl<'a, T> IntoIterator for &'a ArrayStack<T> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut ArrayStack<T> {
  type Item = &'a mut T;
  type IntoIter = IterMut<'a, T>;

  fn into_iter(self) -> IterMut<'a, T> {
    self.iter_mut()
  }
}


//////////////////////////////////////////////////////////////////////////////
//// Iterators
//////////////////////////////////////////////////////////////////////////////

/// Iterates an `ArrayStack` from the top of the stack to the bottom.
pub struct Iter<'a, T> {
  inner: iter::Rev<slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  fn next(&mut self) -> Option<&'a T> {
    self.inner.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone(),
    }
  }
}

/// Mutably iterates an `ArrayStack` from the top of the stack to the bottom.
pub struct IterMut<'a, T> {
  inner: iter::Rev<slice::IterMut<'a, T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
  type Item = &'a mut T;

  fn next(&mut self) -> Option<&'a mut T> {
    self.inner.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}
