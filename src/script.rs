//! The calls a scripting host makes into pdata, in terms of loosely-typed script values.
//!
//! Every call takes the store it operates on explicitly; choosing which primitive's store that is
//! (e.g. the currently "grabbed" primitive) is up to the host. Calls return [Result]s; a host
//! which must not fail should pass them through [recover], or use [dispatch], which does so.

use crate::{
    op::{self, OpOutput, Operand},
    AttributeStore, Colour, ElementType, Error, Found, Result, Value,
};

/// A value as seen by the scripting host.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Void,
    Number(f64),
    Integer(i64),
    Str(String),
    /// A vector, colour, or matrix, flattened into its components.
    Floats(Vec<f64>),
}

impl ScriptValue {
    /// Short description of the kind of value, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptValue::Void => "void",
            ScriptValue::Number(_) | ScriptValue::Integer(_) => "number",
            ScriptValue::Str(_) => "string",
            ScriptValue::Floats(_) => "list",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ScriptValue::Number(n) => Some(*n),
            ScriptValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn floats(&self) -> Option<Vec<f32>> {
        match self {
            ScriptValue::Floats(f) => Some(f.iter().map(|&c| c as f32).collect()),
            _ => None,
        }
    }

    /// Convert to an element of type `ty`.
    ///
    /// Colours may be given three components, in which case they're opaque. Anything which doesn't
    /// fit `ty` is [Error::TypeMismatch].
    pub fn to_element(&self, ty: ElementType) -> Result<Value> {
        if let Some(n) = self.as_number() {
            return match ty {
                ElementType::Float => Ok(Value::Float(n as f32)),
                expected => Err(Error::TypeMismatch {
                    expected,
                    found: Found::Element(ElementType::Float),
                }),
            };
        }
        let Some(c) = self.floats() else {
            return Err(Error::TypeMismatch {
                expected: ty,
                found: Found::Other(self.kind()),
            });
        };
        match (ty, c.len()) {
            (ElementType::Colour, 3) => Ok(Value::Colour(Colour::rgb(c[0], c[1], c[2]))),
            (ty, n) if n == ty.arity() => Value::from_components(ty, &c),
            (expected, n) => Err(Error::TypeMismatch {
                expected,
                found: ElementType::from_arity(n).map_or(Found::Tuple(n), Found::Element),
            }),
        }
    }
}

impl std::fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptValue::Void => Ok(()),
            ScriptValue::Number(n) => write!(f, "{n}"),
            ScriptValue::Integer(i) => write!(f, "{i}"),
            ScriptValue::Str(s) => write!(f, "{s:?}"),
            ScriptValue::Floats(c) => {
                f.write_str("(")?;
                for (i, c) in c.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<Value> for ScriptValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Float(f) => ScriptValue::Number(f as f64),
            v => ScriptValue::Floats(v.components().iter().map(|&c| c as f64).collect()),
        }
    }
}

/// `pdata-ref`: the element of `name` at `index`, wrapping.
pub fn pdata_ref(store: &AttributeStore, name: &str, index: i64) -> Result<ScriptValue> {
    let array = store.get_raw(name)?;
    array
        .get(index)
        .map(ScriptValue::from)
        .ok_or_else(|| Error::EmptyArray(name.to_owned()))
}

/// `pdata-set!`: overwrite the element of `name` at `index`, wrapping.
pub fn pdata_set(
    store: &mut AttributeStore,
    name: &str,
    index: i64,
    value: &ScriptValue,
) -> Result<()> {
    let (ty, _) = store.get_info(name)?;
    let value = value.to_element(ty)?;
    store
        .get_raw_mut(name)?
        .set(index, value)?
        .ok_or_else(|| Error::EmptyArray(name.to_owned()))?;
    Ok(())
}

/// `pdata-add`: declare a new array, with type given by the first character of `type_code`
/// (`f`, `v`, `c`, or `m`).
pub fn pdata_add(store: &mut AttributeStore, name: &str, type_code: &str) -> Result<()> {
    let ty = type_code
        .chars()
        .next()
        .and_then(ElementType::from_code)
        .ok_or_else(|| Error::UnknownType(type_code.to_owned()))?;
    store.add(name, ty)
}

/// `pdata-op`: apply an operator; see [op::apply].
///
/// A number operand is a scalar, a list is a tuple literal, and a string names another array.
/// Returns [ScriptValue::Void] unless the operator is a reduction.
pub fn pdata_op(
    store: &mut AttributeStore,
    op: &str,
    name: &str,
    operand: &ScriptValue,
) -> Result<ScriptValue> {
    let (ty, _) = store.get_info(name)?;
    let operand = match operand {
        ScriptValue::Str(other) => Operand::Array(other.as_str()),
        ScriptValue::Floats(_) => Operand::from_floats(&operand.floats().unwrap_or_default())?,
        v => match v.as_number() {
            Some(n) => Operand::Scalar(n as f32),
            None => {
                return Err(Error::TypeMismatch {
                    expected: ty,
                    found: Found::Other(v.kind()),
                })
            }
        },
    };
    Ok(match op::apply_named(store, op, name, &operand)? {
        OpOutput::Mutated => ScriptValue::Void,
        reduced => reduced.value().map_or(ScriptValue::Void, ScriptValue::from),
    })
}

/// `pdata-copy`: overwrite `dest` with the contents of `source`.
pub fn pdata_copy(store: &mut AttributeStore, source: &str, dest: &str) -> Result<()> {
    store.copy(source, dest)
}

/// `pdata-size`: the element count of the primitive.
pub fn pdata_size(store: &AttributeStore) -> Result<ScriptValue> {
    store.size().map(|n| ScriptValue::Integer(n as i64))
}

/// Turn a failed call into a diagnostic and a fallback value, so the script keeps running.
pub fn recover(call: &str, result: Result<ScriptValue>, fallback: ScriptValue) -> ScriptValue {
    match result {
        Ok(v) => v,
        Err(error) => {
            tracing::warn!(call, %error, "pdata call failed");
            fallback
        }
    }
}

/// A single script call, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Ref {
        name: String,
        index: i64,
    },
    Set {
        name: String,
        index: i64,
        value: ScriptValue,
    },
    Add {
        name: String,
        type_code: String,
    },
    Op {
        op: String,
        name: String,
        operand: ScriptValue,
    },
    Copy {
        source: String,
        dest: String,
    },
    Size,
}

impl Call {
    /// The name by which scripts make this call.
    pub const fn script_name(&self) -> &'static str {
        match self {
            Call::Ref { .. } => "pdata-ref",
            Call::Set { .. } => "pdata-set!",
            Call::Add { .. } => "pdata-add",
            Call::Op { .. } => "pdata-op",
            Call::Copy { .. } => "pdata-copy",
            Call::Size => "pdata-size",
        }
    }

    /// Run this call against `store`, returning the raw result.
    pub fn run(&self, store: &mut AttributeStore) -> Result<ScriptValue> {
        match self {
            Call::Ref { name, index } => pdata_ref(store, name, *index),
            Call::Set { name, index, value } => {
                pdata_set(store, name, *index, value).map(|_| ScriptValue::Void)
            }
            Call::Add { name, type_code } => {
                pdata_add(store, name, type_code).map(|_| ScriptValue::Void)
            }
            Call::Op { op, name, operand } => pdata_op(store, op, name, operand),
            Call::Copy { source, dest } => {
                pdata_copy(store, source, dest).map(|_| ScriptValue::Void)
            }
            Call::Size => pdata_size(store),
        }
    }

    /// The value returned to the script when this call fails.
    pub fn fallback(&self) -> ScriptValue {
        match self {
            Call::Ref { .. } => ScriptValue::Number(0.0),
            _ => ScriptValue::Void,
        }
    }
}

/// Run `call`, reporting any failure as a diagnostic and returning the call's fallback value.
pub fn dispatch(store: &mut AttributeStore, call: &Call) -> ScriptValue {
    recover(call.script_name(), call.run(store), call.fallback())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn colour_accepts_three_components() {
        let v = ScriptValue::Floats(vec![0.5, 0.25, 0.0]);
        assert_eq!(
            v.to_element(ElementType::Colour),
            Ok(Value::Colour(Colour::rgb(0.5, 0.25, 0.0)))
        );
        assert_eq!(
            v.to_element(ElementType::Vector),
            Ok(Value::Vector(nalgebra::vector![0.5, 0.25, 0.0]))
        );
    }

    #[test]
    fn conversion_failures() {
        assert_eq!(
            ScriptValue::Integer(2).to_element(ElementType::Matrix),
            Err(Error::TypeMismatch {
                expected: ElementType::Matrix,
                found: Found::Element(ElementType::Float)
            })
        );
        assert_eq!(
            ScriptValue::Floats(vec![0.0; 4]).to_element(ElementType::Vector),
            Err(Error::TypeMismatch {
                expected: ElementType::Vector,
                found: Found::Element(ElementType::Colour)
            })
        );
        assert_eq!(
            ScriptValue::Floats(vec![0.0; 7]).to_element(ElementType::Matrix),
            Err(Error::TypeMismatch {
                expected: ElementType::Matrix,
                found: Found::Tuple(7)
            })
        );
        assert_eq!(
            ScriptValue::Str("p".to_owned()).to_element(ElementType::Float),
            Err(Error::TypeMismatch {
                expected: ElementType::Float,
                found: Found::Other("string")
            })
        );
        assert_eq!(
            ScriptValue::Void.to_element(ElementType::Colour),
            Err(Error::TypeMismatch {
                expected: ElementType::Colour,
                found: Found::Other("void")
            })
        );
    }

    #[test]
    fn set_rejects_by_type_only() {
        let mut store = AttributeStore::polygon(2);
        let before = store.get_raw("p").unwrap().clone();
        for value in [
            ScriptValue::Floats(vec![1.0; 5]),
            ScriptValue::Str("x".to_owned()),
            ScriptValue::Number(1.0),
        ] {
            assert!(
                matches!(
                    pdata_set(&mut store, "p", 0, &value),
                    Err(Error::TypeMismatch {
                        expected: ElementType::Vector,
                        ..
                    })
                ),
                "{value:?}"
            );
        }
        assert_eq!(store.get_raw("p").unwrap(), &before);
    }

    #[test]
    fn values_flatten() {
        assert_eq!(ScriptValue::from(Value::Float(1.5)), ScriptValue::Number(1.5));
        assert_eq!(
            ScriptValue::from(Value::Colour(Colour::WHITE)),
            ScriptValue::Floats(vec![1.0; 4])
        );
        match ScriptValue::from(Value::Matrix(crate::Matrix::identity())) {
            ScriptValue::Floats(f) => {
                assert_eq!(f.len(), 16);
                assert_eq!(f[0], 1.0);
                assert_eq!(f[1], 0.0);
                assert_eq!(f[5], 1.0);
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn display() {
        assert_eq!(ScriptValue::Void.to_string(), "");
        assert_eq!(ScriptValue::Integer(-3).to_string(), "-3");
        assert_eq!(ScriptValue::Number(0.5).to_string(), "0.5");
        assert_eq!(ScriptValue::Str("p".to_owned()).to_string(), "\"p\"");
        assert_eq!(ScriptValue::Floats(vec![1.0, 0.5, 0.0]).to_string(), "(1 0.5 0)");
    }

    #[test]
    fn failed_ref_falls_back_to_zero() {
        let mut store = AttributeStore::new();
        let call = Call::Ref {
            name: "p".to_owned(),
            index: 0,
        };
        assert_eq!(dispatch(&mut store, &call), ScriptValue::Number(0.0));
        assert_eq!(dispatch(&mut store, &Call::Size), ScriptValue::Void);
    }
}
