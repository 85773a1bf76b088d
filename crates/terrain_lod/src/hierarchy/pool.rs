//! Fixed-capacity node pool.
//!
//! Pools are sized exactly once from the grid dimensions. Running past the
//! capacity means the sizing math is wrong.

use crate::error::InvariantViolation;

/// Append-only arena with a hard capacity.
#[derive(Clone, Debug)]
pub struct Pool<T> {
  name: &'static str,
  items: Vec<T>,
  capacity: usize,
}

impl<T> Pool<T> {
  pub fn with_capacity(name: &'static str, capacity: usize) -> Self {
    Self {
      name,
      items: Vec::with_capacity(capacity),
      capacity,
    }
  }

  /// Store `item`, returning its index.
  pub fn alloc(&mut self, item: T) -> Result<u32, InvariantViolation> {
    if self.items.len() >= self.capacity {
      return Err(InvariantViolation::PoolExhausted {
        pool: self.name,
        capacity: self.capacity,
      });
    }
    let index = self.items.len() as u32;
    self.items.push(item);
    Ok(index)
  }

  #[inline]
  pub fn get(&self, index: u32) -> &T {
    &self.items[index as usize]
  }

  #[inline]
  pub fn get_mut(&mut self, index: u32) -> &mut T {
    &mut self.items[index as usize]
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// True once every slot has been allocated.
  pub fn is_full(&self) -> bool {
    self.items.len() == self.capacity
  }

  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.items.iter()
  }

  pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
    self.items.iter_mut()
  }
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod pool_test;
