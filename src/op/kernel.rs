//! Per-type arithmetic kernels.
//!
//! A kernel is picked for the whole array before any element is touched, so an unsupported
//! combination never writes anything.

use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use nalgebra::Point3;

use super::Operator;
use crate::{AttributeArray as A, Colour, Element, Matrix, TypedArray, Value, Vector};

/// The right-hand side of an arithmetic operator, after operand resolution.
pub(super) enum Rhs<'a> {
    Scalar(f32),
    Value(Value),
    Array(&'a A),
}

type Kernel<T, R> = fn(&mut T, R);

/// Combine every element of `target` with `rhs`.
///
/// Returns `None`, having written nothing, if `op` has no kernel for this pairing.
pub(super) fn arithmetic(op: Operator, target: &mut A, rhs: Rhs<'_>) -> Option<()> {
    match (target, rhs) {
        (A::Float(t), Rhs::Scalar(s)) => broadcast(t, s, assigning::<f32, f32>(op)?),
        (A::Float(t), Rhs::Array(A::Float(r))) => pairwise(t, r, assigning::<f32, f32>(op)?),

        (A::Vector(t), Rhs::Scalar(s)) => broadcast(t, s, vector_scalar(op)?),
        (A::Vector(t), Rhs::Value(Value::Vector(v))) => broadcast(t, v, vector_vector(op)?),
        (A::Vector(t), Rhs::Value(Value::Matrix(m))) => broadcast(t, m, vector_matrix(op)?),
        (A::Vector(t), Rhs::Array(A::Vector(r))) => pairwise(t, r, vector_vector(op)?),

        (A::Colour(t), Rhs::Scalar(s)) => broadcast(t, s, assigning::<Colour, f32>(op)?),
        (A::Colour(t), Rhs::Value(Value::Colour(c))) => {
            broadcast(t, c, assigning::<Colour, Colour>(op)?)
        }
        (A::Colour(t), Rhs::Array(A::Colour(r))) => {
            pairwise(t, r, assigning::<Colour, Colour>(op)?)
        }

        (A::Matrix(t), Rhs::Scalar(s)) => broadcast(t, s, matrix_scalar(op)?),
        (A::Matrix(t), Rhs::Value(Value::Matrix(m))) => broadcast(t, m, matrix_matrix(op)?),
        (A::Matrix(t), Rhs::Array(A::Matrix(r))) => pairwise(t, r, matrix_matrix(op)?),

        _ => return None,
    }
    Some(())
}

#[inline]
fn broadcast<T: Element, R: Copy>(target: &mut TypedArray<T>, rhs: R, k: Kernel<T, R>) {
    for e in target.iter_mut() {
        k(e, rhs);
    }
}

/// Element for element; `rhs` wraps if it's shorter than `target`.
#[inline]
fn pairwise<T: Element, R: Element>(
    target: &mut TypedArray<T>,
    rhs: &TypedArray<R>,
    k: Kernel<T, R>,
) {
    for (i, e) in target.iter_mut().enumerate() {
        let Some(r) = rhs.get(i) else { return };
        k(e, r);
    }
}

/// Kernels for types whose std::ops implementations already mean the elementwise operation.
fn assigning<T, R>(op: Operator) -> Option<Kernel<T, R>>
where
    T: AddAssign<R> + SubAssign<R> + MulAssign<R> + DivAssign<R>,
{
    let k: Kernel<T, R> = match op {
        Operator::Add => |a: &mut T, b: R| *a += b,
        Operator::Sub => |a: &mut T, b: R| *a -= b,
        Operator::Mul => |a: &mut T, b: R| *a *= b,
        Operator::Div => |a: &mut T, b: R| *a /= b,
        _ => return None,
    };
    Some(k)
}

fn vector_scalar(op: Operator) -> Option<Kernel<Vector, f32>> {
    let k: Kernel<Vector, f32> = match op {
        Operator::Add => |a: &mut Vector, b: f32| a.add_scalar_mut(b),
        Operator::Sub => |a: &mut Vector, b: f32| a.add_scalar_mut(-b),
        Operator::Mul => |a: &mut Vector, b: f32| *a *= b,
        Operator::Div => |a: &mut Vector, b: f32| *a /= b,
        _ => return None,
    };
    Some(k)
}

/// Vector products are componentwise.
fn vector_vector(op: Operator) -> Option<Kernel<Vector, Vector>> {
    let k: Kernel<Vector, Vector> = match op {
        Operator::Add => |a: &mut Vector, b: Vector| *a += b,
        Operator::Sub => |a: &mut Vector, b: Vector| *a -= b,
        Operator::Mul => |a: &mut Vector, b: Vector| a.component_mul_assign(&b),
        Operator::Div => |a: &mut Vector, b: Vector| a.component_div_assign(&b),
        _ => return None,
    };
    Some(k)
}

/// Only `*`, which transforms each vector as a point by the matrix.
fn vector_matrix(op: Operator) -> Option<Kernel<Vector, Matrix>> {
    let k: Kernel<Vector, Matrix> = match op {
        Operator::Mul => |a: &mut Vector, m: Matrix| {
            *a = m.transform_point(&Point3::from(*a)).coords
        },
        _ => return None,
    };
    Some(k)
}

fn matrix_scalar(op: Operator) -> Option<Kernel<Matrix, f32>> {
    let k: Kernel<Matrix, f32> = match op {
        Operator::Add => |a: &mut Matrix, b: f32| a.add_scalar_mut(b),
        Operator::Sub => |a: &mut Matrix, b: f32| a.add_scalar_mut(-b),
        Operator::Mul => |a: &mut Matrix, b: f32| *a *= b,
        Operator::Div => |a: &mut Matrix, b: f32| *a /= b,
        _ => return None,
    };
    Some(k)
}

/// `*` is the matrix product `a * b`; there's no matrix division.
fn matrix_matrix(op: Operator) -> Option<Kernel<Matrix, Matrix>> {
    let k: Kernel<Matrix, Matrix> = match op {
        Operator::Add => |a: &mut Matrix, b: Matrix| *a += b,
        Operator::Sub => |a: &mut Matrix, b: Matrix| *a -= b,
        Operator::Mul => |a: &mut Matrix, b: Matrix| *a *= b,
        _ => return None,
    };
    Some(k)
}
