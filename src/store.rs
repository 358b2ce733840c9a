//! Per-primitive registries of named attribute arrays.

use std::collections::HashMap;

use nalgebra::vector;

use crate::{
    array::{AttributeArray, DynamicArray, TypedArray},
    Colour, Element, ElementType, Error, Result, Vector,
};

/// Name of the array whose length is the element count of its primitive; conventionally positions.
pub const CANONICAL: &str = "p";

/// The set of named attribute arrays belonging to a single primitive.
///
/// # Invariants
///
/// * names are unique
/// * an array's element type never changes once it has been added
/// * every per-element array has the same length as the [canonical](CANONICAL) array; callers
///   which violate this get wrapping (modulo) reads rather than errors
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    arrays: HashMap<String, AttributeArray>,
}

impl AttributeStore {
    /// Construct a store with no arrays, not even a canonical one.
    pub fn new() -> Self {
        Self::default()
    }

    /// The arrays of a polygon primitive: positions `p`, normals `n`, colours `c`, and texture
    /// coordinates `t`.
    pub fn polygon(len: usize) -> Self {
        Self::from_layout(
            len,
            &[
                ("p", ElementType::Vector),
                ("n", ElementType::Vector),
                ("c", ElementType::Colour),
                ("t", ElementType::Vector),
            ],
        )
    }

    /// The arrays of a particle primitive: positions `p`, colours `c`, and sizes `s`.
    pub fn particles(len: usize) -> Self {
        let mut store =
            Self::from_layout(len, &[("p", ElementType::Vector), ("c", ElementType::Colour)]);
        store.arrays.insert(
            "s".to_owned(),
            TypedArray::<Vector>::from_vec(vec![vector![0.1, 0.1, 0.1]; len]).into(),
        );
        store
    }

    /// The arrays of a pixel primitive: pixel centres `p` within the unit square, and pixel values
    /// `c`, one per pixel.
    ///
    /// Pixels are ordered row-major starting from the bottom row, which is how flipped texture
    /// buffers are laid out.
    pub fn pixels(width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        let p: TypedArray<Vector> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| vector![(x as f32 + 0.5) / w, (y as f32 + 0.5) / h, 0.0])
            .collect();
        let mut store = Self::new();
        store.arrays.insert("c".to_owned(), TypedArray::<Colour>::with_len(p.len()).into());
        store.arrays.insert(CANONICAL.to_owned(), p.into());
        store
    }

    fn from_layout(len: usize, layout: &[(&str, ElementType)]) -> Self {
        Self {
            arrays: layout
                .iter()
                .map(|&(name, ty)| (name.to_owned(), AttributeArray::new(ty, len)))
                .collect(),
        }
    }

    /// Number of arrays in this store.
    #[inline]
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.arrays.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeArray)> {
        self.arrays.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Length of the canonical array; i.e. the number of elements in this primitive.
    pub fn size(&self) -> Result<usize> {
        self.get_raw(CANONICAL).map(DynamicArray::len)
    }

    /// The length new arrays are created with: that of the canonical array, or 0 without one.
    #[inline]
    fn canonical_len(&self) -> usize {
        self.size().unwrap_or(0)
    }

    /// Add a new array of type `ty`, sized to match the canonical array.
    ///
    /// Fails, changing nothing, if an array called `name` already exists.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn add(&mut self, name: &str, ty: ElementType) -> Result<()> {
        let len = self.canonical_len();
        self.insert(name, AttributeArray::new(ty, len))
    }

    /// Add a pre-built array.
    ///
    /// Fails, changing nothing, if an array called `name` already exists. The array's length is
    /// not checked against the canonical array.
    pub fn insert(&mut self, name: &str, array: impl Into<AttributeArray>) -> Result<()> {
        use std::collections::hash_map::Entry;
        match self.arrays.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(Error::DuplicateName(name.to_owned())),
            Entry::Vacant(slot) => {
                let array = slot.insert(array.into());
                tracing::debug!(name, ty = %array.ty(), len = array.len(), "added pdata");
                Ok(())
            }
        }
    }

    /// Remove and return an array.
    ///
    /// Not available to scripts; for embedding code tearing down or rebuilding a primitive.
    pub fn remove(&mut self, name: &str) -> Result<AttributeArray> {
        self.arrays
            .remove(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    /// Resize every array in the store, for when the primitive changes its element count.
    pub fn resize_all(&mut self, len: usize) {
        for array in self.arrays.values_mut() {
            array.resize(len);
        }
    }

    /// The element type and length of an array.
    pub fn get_info(&self, name: &str) -> Result<(ElementType, usize)> {
        self.get_raw(name).map(|a| (a.ty(), a.len()))
    }

    pub fn get_raw(&self, name: &str) -> Result<&AttributeArray> {
        self.arrays
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    pub fn get_raw_mut(&mut self, name: &str) -> Result<&mut AttributeArray> {
        self.arrays
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    /// Borrow an array as its concrete type.
    ///
    /// [Error::NotFound] if there's no array called `name`; [Error::TypeMismatch] if there is, but
    /// it doesn't hold `T`.
    pub fn get<T: Element>(&self, name: &str) -> Result<&TypedArray<T>> {
        self.get_raw(name)?.try_borrow()
    }

    pub fn get_mut<T: Element>(&mut self, name: &str) -> Result<&mut TypedArray<T>> {
        self.get_raw_mut(name)?.try_borrow_mut()
    }

    /// Overwrite `dest` with the contents of `source`, resizing `dest` to match.
    ///
    /// Both arrays must exist and have the same element type; otherwise nothing changes.
    pub fn copy(&mut self, source: &str, dest: &str) -> Result<()> {
        // resolve both names up front so a missing source reports before a missing dest
        let (src_ty, _) = self.get_info(source)?;
        let (dest_ty, _) = self.get_info(dest)?;
        if src_ty != dest_ty {
            return Err(Error::TypeMismatch {
                expected: dest_ty,
                found: src_ty.into(),
            });
        }
        if source == dest {
            return Ok(());
        }
        let src = self.get_raw(source)?.clone();
        self.get_raw_mut(dest)?.copy_from(&src)?;
        tracing::trace!(source, dest, len = src.len(), "copied pdata");
        Ok(())
    }
}
