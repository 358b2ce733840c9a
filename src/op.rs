//! Elementwise operators over whole attribute arrays.
//!
//! Looping over an array from a script is slow, since the interpreter does all the work. An
//! operator applies the same computation to every element of a named array within a single call:
//!
//! ```
//! # use pdata::{op::{self, Operand, Operator}, AttributeStore, Value};
//! # use nalgebra::vector;
//! let mut store = AttributeStore::polygon(3);
//! // add a vector to every position
//! let up = Operand::Tuple(Value::Vector(vector![1.0, 2.0, 3.0]));
//! op::apply(&mut store, Operator::Add, "p", &up)?;
//! // double every position, element for element
//! op::apply(&mut store, Operator::Add, "p", &Operand::Array("p"))?;
//! // find the position closest to a point
//! let far = Operand::Tuple(Value::Vector(vector![100.0, 0.0, 0.0]));
//! let closest = op::apply(&mut store, Operator::Closest, "p", &far)?;
//! assert_eq!(closest.value(), Some(Value::Vector(vector![2.0, 4.0, 6.0])));
//! # Ok::<(), pdata::Error>(())
//! ```

use std::{fmt, str::FromStr};

use crate::{
    array::{AttributeArray, DynamicArray, TypedArray},
    AttributeStore, ElementType, Error, Float, Result, Value, Vector,
};

mod kernel;

/// The operators understood by [apply].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `sin`: write the sine of each element of the named array into the operand array.
    Sin,
    /// `cos`: write the cosine of each element of the named array into the operand array.
    Cos,
    /// `closest`: the element of a vector array nearest to a point.
    Closest,
}

impl Operator {
    pub const ALL: [Self; 7] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Sin,
        Self::Cos,
        Self::Closest,
    ];

    /// The name by which scripts refer to this operator.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
            Operator::Closest => "closest",
        }
    }

    /// Whether this operator produces a value rather than writing into an array.
    pub const fn is_reduction(self) -> bool {
        matches!(self, Operator::Closest)
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| Error::UnknownOperator(s.to_owned()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The second argument of an operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    /// A bare number.
    Scalar(Float),
    /// A vector, colour, or matrix literal.
    ///
    /// A [Value::Float] behaves as a [Scalar](Operand::Scalar); script lists never produce
    /// one, but native callers may.
    Tuple(Value),
    /// Another array in the same store, by name.
    Array(&'a str),
}

impl<'a> Operand<'a> {
    /// A tuple literal from its flattened components; see [Value::from_tuple].
    pub fn from_floats(components: &[f32]) -> Result<Self> {
        Value::from_tuple(components).map(Operand::Tuple)
    }

    /// Short description of the operand, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "scalar",
            Operand::Tuple(v) => match v.ty() {
                ElementType::Float => "scalar",
                ElementType::Vector => "vector",
                ElementType::Colour => "colour",
                ElementType::Matrix => "matrix",
            },
            Operand::Array(_) => "array",
        }
    }
}

/// What an operator produced.
#[derive(Debug, Clone, PartialEq)]
pub enum OpOutput {
    /// An array was written in place.
    Mutated,
    /// A reduction's result, as a single-element array.
    Reduced(AttributeArray),
}

impl OpOutput {
    /// The reduced value, if this is a reduction.
    pub fn value(&self) -> Option<Value> {
        match self {
            OpOutput::Mutated => None,
            OpOutput::Reduced(a) => a.get(0),
        }
    }
}

/// Parse `op` and [apply] it.
pub fn apply_named(
    store: &mut AttributeStore,
    op: &str,
    name: &str,
    operand: &Operand<'_>,
) -> Result<OpOutput> {
    apply(store, op.parse()?, name, operand)
}

/// Apply `op` to the array called `name`, with `operand` as the second argument.
///
/// Arithmetic operators (`+ - * /`) write into `name` in place. With an array operand they work
/// element for element, reading the operand modulo its length; with a scalar or tuple operand,
/// the operand is combined with every element. `sin` and `cos` read `name` and write into the
/// operand array. `closest` writes nothing and returns its result.
///
/// # Errors
///
/// * [Error::NotFound] if `name`, or an array operand, doesn't exist
/// * [Error::TypeMismatch] if an array or tuple operand isn't of the same type as `name`; the
///   exception is `*` of a vector array by a matrix literal
/// * [Error::Unsupported] if `op` isn't defined for this array type and operand
/// * [Error::EmptyArray] if an array which must be read from is empty
///
/// All of these are detected before anything is written.
pub fn apply(
    store: &mut AttributeStore,
    op: Operator,
    name: &str,
    operand: &Operand<'_>,
) -> Result<OpOutput> {
    let (ty, _) = store.get_info(name)?;
    if let Operand::Array(other) = operand {
        let (other_ty, _) = store.get_info(other)?;
        if other_ty != ty {
            return Err(Error::TypeMismatch {
                expected: ty,
                found: other_ty.into(),
            });
        }
    }
    tracing::debug!(%op, name, %ty, operand = operand.kind(), "applying pdata op");

    let unsupported = || Error::Unsupported {
        op: op.symbol(),
        ty,
        operand: operand.kind(),
    };

    match op {
        Operator::Add | Operator::Sub | Operator::Mul | Operator::Div => {
            let rhs = match operand {
                Operand::Scalar(s) => kernel::Rhs::Scalar(*s),
                Operand::Tuple(Value::Float(s)) => kernel::Rhs::Scalar(*s),
                Operand::Tuple(v) => {
                    check_tuple(op, ty, v)?;
                    kernel::Rhs::Value(*v)
                }
                Operand::Array(other) => {
                    // cloned so that an array may be combined with itself
                    let other_array = store.get_raw(other)?.clone();
                    if other_array.is_empty() {
                        return Err(Error::EmptyArray((*other).to_owned()));
                    }
                    let target = store.get_raw_mut(name)?;
                    kernel::arithmetic(op, target, kernel::Rhs::Array(&other_array))
                        .ok_or_else(unsupported)?;
                    return Ok(OpOutput::Mutated);
                }
            };
            kernel::arithmetic(op, store.get_raw_mut(name)?, rhs).ok_or_else(unsupported)?;
            Ok(OpOutput::Mutated)
        }
        Operator::Sin | Operator::Cos => {
            let dest = match operand {
                Operand::Array(dest) if ty == ElementType::Float => *dest,
                _ => return Err(unsupported()),
            };
            let f: fn(f32) -> f32 = match op {
                Operator::Sin => f32::sin,
                _ => f32::cos,
            };
            let src: TypedArray<Float> = store.get::<Float>(name)?.clone();
            let dest_array = store.get_mut::<Float>(dest)?;
            if src.is_empty() && !dest_array.is_empty() {
                return Err(Error::EmptyArray(name.to_owned()));
            }
            for (i, d) in dest_array.iter_mut().enumerate() {
                *d = f(src[i % src.len()]);
            }
            Ok(OpOutput::Mutated)
        }
        Operator::Closest => {
            let point = match operand {
                _ if ty != ElementType::Vector => return Err(unsupported()),
                Operand::Tuple(Value::Vector(p)) => *p,
                Operand::Tuple(v) => {
                    return Err(Error::TypeMismatch {
                        expected: ty,
                        found: v.ty().into(),
                    })
                }
                _ => return Err(unsupported()),
            };
            let closest = closest(store.get::<Vector>(name)?, &point)
                .ok_or_else(|| Error::EmptyArray(name.to_owned()))?;
            Ok(OpOutput::Reduced(TypedArray::from_vec(vec![closest]).into()))
        }
    }
}

/// A tuple operand of an arithmetic operator must share the array's type, except for the matrix
/// literal a vector array may be transformed by.
fn check_tuple(op: Operator, ty: ElementType, value: &Value) -> Result<()> {
    match (op, ty, value.ty()) {
        (_, ty, found) if ty == found => Ok(()),
        (Operator::Mul, ElementType::Vector, ElementType::Matrix) => Ok(()),
        (_, expected, found) => Err(Error::TypeMismatch {
            expected,
            found: found.into(),
        }),
    }
}

/// The element of `points` nearest to `target` by Euclidean distance.
///
/// Of several equally near elements, the first in storage order is returned. Returns `None` only
/// if `points` is empty.
pub fn closest(points: &TypedArray<Vector>, target: &Vector) -> Option<Vector> {
    let mut best: Option<(f32, Vector)> = None;
    for p in points {
        // NaN components compare as infinitely far away
        let d = match (p - target).norm_squared() {
            d if d.is_nan() => f32::INFINITY,
            d => d,
        };
        match best {
            Some((best_d, _)) if !(d < best_d) => {}
            _ => best = Some((d, *p)),
        }
    }
    best.map(|(_, p)| p)
}
