//! The element kinds which can be stored in an [AttributeArray](crate::AttributeArray).

use std::fmt;

use nalgebra::{Matrix4, Vector3, Vector4};
use pdata_common::{impl_add_sub, impl_mul_div};

use crate::{array::TypedArray, AttributeArray, Error, Result};

/// Scalar element.
pub type Float = f32;
/// Three-component vector element; positions, normals, texture coordinates, etc.
pub type Vector = Vector3<f32>;
/// 4x4 matrix element, stored column-major.
pub type Matrix = Matrix4<f32>;

/// RGBA colour element.
///
/// Arithmetic on colours is componentwise, including multiplication and division.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour(pub Vector4<f32>);

impl Colour {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(Vector4::new(r, g, b, a))
    }

    /// An opaque colour.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Vector4<f32>> for Colour {
    fn from(value: Vector4<f32>) -> Self {
        Self(value)
    }
}

impl From<Colour> for Vector4<f32> {
    fn from(value: Colour) -> Self {
        value.0
    }
}

impl_add_sub!(self: Colour, rhs: Colour;
    self.0 += rhs.0;
    self.0 -= rhs.0);
impl_mul_div!(self: Colour, rhs: Colour;
    self.0.component_mul_assign(&rhs.0);
    self.0.component_div_assign(&rhs.0));
impl_add_sub!(self: Colour, rhs: f32;
    self.0.add_scalar_mut(rhs);
    self.0.add_scalar_mut(-rhs));
impl_mul_div!(self: Colour, rhs: f32;
    self.0 *= rhs;
    self.0 /= rhs);

// flattening relies on each kind being a dense run of f32s
static_assertions::assert_eq_size!(Vector, [f32; 3]);
static_assertions::assert_eq_size!(Colour, [f32; 4]);
static_assertions::assert_eq_size!(Matrix, [f32; 16]);

/// Runtime tag for the kind of element held by an array or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Float,
    Vector,
    Colour,
    Matrix,
}

impl ElementType {
    pub const ALL: [Self; 4] = [Self::Float, Self::Vector, Self::Colour, Self::Matrix];

    /// The single-character code by which scripts name this type.
    pub const fn code(self) -> char {
        match self {
            ElementType::Float => 'f',
            ElementType::Vector => 'v',
            ElementType::Colour => 'c',
            ElementType::Matrix => 'm',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'f' => Some(ElementType::Float),
            'v' => Some(ElementType::Vector),
            'c' => Some(ElementType::Colour),
            'm' => Some(ElementType::Matrix),
            _ => None,
        }
    }

    /// Number of f32 components in one element.
    pub const fn arity(self) -> usize {
        match self {
            ElementType::Float => 1,
            ElementType::Vector => 3,
            ElementType::Colour => 4,
            ElementType::Matrix => 16,
        }
    }

    /// The tuple type with `arity` components, if there is exactly one.
    ///
    /// Arity 1 is a bare number rather than a tuple, so it isn't matched here.
    pub const fn from_arity(arity: usize) -> Option<Self> {
        match arity {
            3 => Some(ElementType::Vector),
            4 => Some(ElementType::Colour),
            16 => Some(ElementType::Matrix),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Float => f.write_str("float"),
            ElementType::Vector => f.write_str("vector"),
            ElementType::Colour => f.write_str("colour"),
            ElementType::Matrix => f.write_str("matrix"),
        }
    }
}

/// Trait for types which can be stored in a [TypedArray].
///
/// Implemented only for [Float], [Vector], [Colour], and [Matrix]; the set of element kinds is
/// closed, and every implementor has a matching [AttributeArray] variant.
pub trait Element: Copy + PartialEq + fmt::Debug + Sized + 'static {
    const TYPE: ElementType;

    /// The value of a freshly allocated element.
    fn initial() -> Self;

    /// Components of `self`, in storage order.
    fn components(&self) -> &[f32];

    /// Construct an element from exactly `Self::TYPE.arity()` components.
    fn from_components(c: &[f32]) -> Option<Self>;

    fn into_value(self) -> Value;
    fn from_value(value: Value) -> Option<Self>;

    fn wrap_array(array: TypedArray<Self>) -> AttributeArray;
    fn array_ref(array: &AttributeArray) -> Option<&TypedArray<Self>>;
    fn array_mut(array: &mut AttributeArray) -> Option<&mut TypedArray<Self>>;
}

macro_rules! impl_element {
    ($Target:ty: $Variant:ident, $initial:expr,
     |$s:ident| $components:expr, |$c:ident| $from:expr) => {
        impl Element for $Target {
            const TYPE: ElementType = ElementType::$Variant;

            #[inline]
            fn initial() -> Self {
                $initial
            }

            #[inline]
            fn components(&self) -> &[f32] {
                let $s = self;
                $components
            }

            #[inline]
            fn from_components($c: &[f32]) -> Option<Self> {
                if $c.len() != ElementType::$Variant.arity() {
                    return None;
                }
                Some($from)
            }

            #[inline]
            fn into_value(self) -> Value {
                Value::$Variant(self)
            }

            #[inline]
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$Variant(v) => Some(v),
                    _ => None,
                }
            }

            #[inline]
            fn wrap_array(array: TypedArray<Self>) -> AttributeArray {
                AttributeArray::$Variant(array)
            }

            #[inline]
            fn array_ref(array: &AttributeArray) -> Option<&TypedArray<Self>> {
                match array {
                    AttributeArray::$Variant(a) => Some(a),
                    _ => None,
                }
            }

            #[inline]
            fn array_mut(array: &mut AttributeArray) -> Option<&mut TypedArray<Self>> {
                match array {
                    AttributeArray::$Variant(a) => Some(a),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(Float: Float, 0.0, |s| std::slice::from_ref(s), |c| c[0]);
impl_element!(Vector: Vector, Vector::zeros(), |s| s.as_slice(), |c| Vector::from_column_slice(c));
impl_element!(Colour: Colour, Colour::WHITE,
    |s| s.0.as_slice(), |c| Colour(Vector4::from_column_slice(c)));
impl_element!(Matrix: Matrix, Matrix::identity(),
    |s| s.as_slice(), |c| Matrix::from_column_slice(c));

/// A single element of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(Float),
    Vector(Vector),
    Colour(Colour),
    Matrix(Matrix),
}

impl Value {
    #[inline]
    pub fn ty(&self) -> ElementType {
        match self {
            Value::Float(_) => ElementType::Float,
            Value::Vector(_) => ElementType::Vector,
            Value::Colour(_) => ElementType::Colour,
            Value::Matrix(_) => ElementType::Matrix,
        }
    }

    /// The initial value of an element of type `ty`.
    pub fn initial(ty: ElementType) -> Self {
        match ty {
            ElementType::Float => Value::Float(Float::initial()),
            ElementType::Vector => Value::Vector(Vector::initial()),
            ElementType::Colour => Value::Colour(Colour::initial()),
            ElementType::Matrix => Value::Matrix(Matrix::initial()),
        }
    }

    /// Components of this value, in storage order (column-major for matrices).
    pub fn components(&self) -> &[f32] {
        match self {
            Value::Float(v) => v.components(),
            Value::Vector(v) => v.components(),
            Value::Colour(v) => v.components(),
            Value::Matrix(v) => v.components(),
        }
    }

    /// Interpret a flat list of components as a tuple value, picking the type by arity.
    ///
    /// Only arities 3, 4, and 16 are accepted; anything else is [Error::InvalidArity].
    pub fn from_tuple(c: &[f32]) -> Result<Self> {
        let ty = ElementType::from_arity(c.len()).ok_or(Error::InvalidArity(c.len()))?;
        Self::from_components(ty, c)
    }

    /// Build a value of type `ty` from exactly `ty.arity()` components.
    pub fn from_components(ty: ElementType, c: &[f32]) -> Result<Self> {
        let v = match ty {
            ElementType::Float => Float::from_components(c).map(Value::Float),
            ElementType::Vector => Vector::from_components(c).map(Value::Vector),
            ElementType::Colour => Colour::from_components(c).map(Value::Colour),
            ElementType::Matrix => Matrix::from_components(c).map(Value::Matrix),
        };
        v.ok_or(Error::InvalidArity(c.len()))
    }

    pub fn get<T: Element>(self) -> Option<T> {
        T::from_value(self)
    }
}

impl From<Float> for Value {
    fn from(value: Float) -> Self {
        Value::Float(value)
    }
}

impl From<Vector> for Value {
    fn from(value: Vector) -> Self {
        Value::Vector(value)
    }
}

impl From<Colour> for Value {
    fn from(value: Colour) -> Self {
        Value::Colour(value)
    }
}

impl From<Matrix> for Value {
    fn from(value: Matrix) -> Self {
        Value::Matrix(value)
    }
}
