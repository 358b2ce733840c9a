use pdata_common::WrapIndex;

use crate::{
    array::TypedArray, error::Found, Colour, Element, ElementType, Error, Float, Matrix, Result,
    Value, Vector,
};

/// Common interface of attribute arrays, whether or not their element type is known statically.
pub trait DynamicArray {
    fn len(&self) -> usize;
    fn ty(&self) -> ElementType;
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn resize(&mut self, len: usize);
}

impl<T: Element> DynamicArray for TypedArray<T> {
    #[inline]
    fn len(&self) -> usize {
        TypedArray::len(self)
    }

    #[inline]
    fn ty(&self) -> ElementType {
        T::TYPE
    }

    #[inline]
    fn resize(&mut self, len: usize) {
        TypedArray::resize(self, len)
    }
}

/// An attribute array of any element type.
///
/// The variant is fixed when the array is created; nothing converts an array between types.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeArray {
    Float(TypedArray<Float>),
    Vector(TypedArray<Vector>),
    Colour(TypedArray<Colour>),
    Matrix(TypedArray<Matrix>),
}

/// Evaluate `$body` with `$a` bound to the [TypedArray] inside an [AttributeArray], whatever its
/// element type.
macro_rules! with_typed {
    ($array:expr, |$a:ident| $body:expr) => {
        match $array {
            AttributeArray::Float($a) => $body,
            AttributeArray::Vector($a) => $body,
            AttributeArray::Colour($a) => $body,
            AttributeArray::Matrix($a) => $body,
        }
    };
}

impl AttributeArray {
    /// Construct an array of `len` initial elements of type `ty`.
    pub fn new(ty: ElementType, len: usize) -> Self {
        match ty {
            ElementType::Float => AttributeArray::Float(TypedArray::with_len(len)),
            ElementType::Vector => AttributeArray::Vector(TypedArray::with_len(len)),
            ElementType::Colour => AttributeArray::Colour(TypedArray::with_len(len)),
            ElementType::Matrix => AttributeArray::Matrix(TypedArray::with_len(len)),
        }
    }

    /// Borrow `self` as a `TypedArray<T>`.
    #[inline]
    pub fn try_borrow<T: Element>(&self) -> Result<&TypedArray<T>> {
        let found = Found::Element(self.ty());
        T::array_ref(self).ok_or(Error::TypeMismatch {
            expected: T::TYPE,
            found,
        })
    }

    #[inline]
    pub fn try_borrow_mut<T: Element>(&mut self) -> Result<&mut TypedArray<T>> {
        let found = Found::Element(self.ty());
        T::array_mut(self).ok_or(Error::TypeMismatch {
            expected: T::TYPE,
            found,
        })
    }

    /// Get the element at `index` modulo `self.len()`, or `None` if `self` is empty.
    pub fn get(&self, index: impl WrapIndex) -> Option<Value> {
        with_typed!(self, |a| a.get(index).map(Element::into_value))
    }

    /// Overwrite the element at `index` modulo `self.len()`.
    ///
    /// Returns the wrapped index written, or `Ok(None)` if `self` is empty. Fails without writing
    /// if `value` is not of this array's type.
    pub fn set(&mut self, index: impl WrapIndex, value: Value) -> Result<Option<usize>> {
        let found = Found::Element(value.ty());
        match (self, value) {
            (AttributeArray::Float(a), Value::Float(v)) => Ok(a.set(index, v)),
            (AttributeArray::Vector(a), Value::Vector(v)) => Ok(a.set(index, v)),
            (AttributeArray::Colour(a), Value::Colour(v)) => Ok(a.set(index, v)),
            (AttributeArray::Matrix(a), Value::Matrix(v)) => Ok(a.set(index, v)),
            (a, _) => Err(Error::TypeMismatch {
                expected: a.ty(),
                found,
            }),
        }
    }

    /// Replace the contents of `self` with those of `other`, which must be of the same type.
    pub fn copy_from(&mut self, other: &AttributeArray) -> Result<()> {
        match (self, other) {
            (AttributeArray::Float(d), AttributeArray::Float(s)) => d.copy_from(s),
            (AttributeArray::Vector(d), AttributeArray::Vector(s)) => d.copy_from(s),
            (AttributeArray::Colour(d), AttributeArray::Colour(s)) => d.copy_from(s),
            (AttributeArray::Matrix(d), AttributeArray::Matrix(s)) => d.copy_from(s),
            (d, s) => {
                return Err(Error::TypeMismatch {
                    expected: d.ty(),
                    found: s.ty().into(),
                })
            }
        }
        Ok(())
    }

    /// Iterate over every element as a [Value].
    pub fn values(&self) -> Box<dyn Iterator<Item = Value> + '_> {
        with_typed!(self, |a| Box::new(a.iter().map(|e| e.into_value())))
    }
}

impl DynamicArray for AttributeArray {
    #[inline]
    fn len(&self) -> usize {
        with_typed!(self, |a| a.len())
    }

    #[inline]
    fn ty(&self) -> ElementType {
        match self {
            AttributeArray::Float(_) => ElementType::Float,
            AttributeArray::Vector(_) => ElementType::Vector,
            AttributeArray::Colour(_) => ElementType::Colour,
            AttributeArray::Matrix(_) => ElementType::Matrix,
        }
    }

    #[inline]
    fn resize(&mut self, len: usize) {
        with_typed!(self, |a| a.resize(len))
    }
}

impl<T: Element> From<TypedArray<T>> for AttributeArray {
    fn from(value: TypedArray<T>) -> Self {
        T::wrap_array(value)
    }
}
