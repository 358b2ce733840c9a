//! Homogeneously-typed attribute arrays.

use std::ops::{Index, IndexMut};

use pdata_common::WrapIndex;

use crate::Element;

pub mod dynamic;

pub use dynamic::*;

/// A resizable sequence of elements of a single [Element] type.
///
/// Element access wraps: any index is reduced modulo the array's length, so scripts walking a
/// closed curve may overrun the end (or step below zero) and land back on a valid element. This
/// also means a genuinely out-of-range index is never reported. The only access which fails is
/// access into an empty array, which has nowhere to wrap to.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedArray<T: Element> {
    elements: Vec<T>,
}

impl<T: Element> Default for TypedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> TypedArray<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Construct an array of `len` elements, each set to [Element::initial].
    pub fn with_len(len: usize) -> Self {
        Self {
            elements: vec![T::initial(); len],
        }
    }

    #[inline]
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self { elements }
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the element at `index` modulo `self.len()`.
    ///
    /// Returns `None` only if `self` is empty.
    #[inline]
    pub fn get(&self, index: impl WrapIndex) -> Option<T> {
        index.wrap(self.len()).map(|i| self.elements[i])
    }

    /// Get a mutable reference to the element at `index` modulo `self.len()`.
    #[inline]
    pub fn get_mut(&mut self, index: impl WrapIndex) -> Option<&mut T> {
        let i = index.wrap(self.len())?;
        Some(&mut self.elements[i])
    }

    /// Overwrite the element at `index` modulo `self.len()`, returning the wrapped index written.
    ///
    /// Returns `None`, and writes nothing, if `self` is empty.
    #[inline]
    pub fn set(&mut self, index: impl WrapIndex, value: T) -> Option<usize> {
        let i = index.wrap(self.len())?;
        self.elements[i] = value;
        Some(i)
    }

    /// Grow with [Element::initial] values, or truncate, to exactly `len` elements.
    pub fn resize(&mut self, len: usize) {
        self.elements.resize(len, T::initial());
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }

    /// Replace every element of `self` with those of `other`, taking `other`'s length.
    pub fn copy_from(&mut self, other: &Self) {
        self.elements.clear();
        self.elements.extend_from_slice(&other.elements);
    }
}

impl<T: Element> FromIterator<T> for TypedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T: Element> From<Vec<T>> for TypedArray<T> {
    fn from(value: Vec<T>) -> Self {
        Self::from_vec(value)
    }
}

impl<'a, T: Element> IntoIterator for &'a TypedArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Plain indexing doesn't wrap; it's for native code which already knows its bounds.
impl<T: Element> Index<usize> for TypedArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<T: Element> IndexMut<usize> for TypedArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.elements[index]
    }
}
