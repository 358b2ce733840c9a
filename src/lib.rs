//! Primitive data ("pdata"): the named, typed, per-element attribute arrays of a renderable
//! primitive, and the elementwise operators scripts use to deform and generate them.
//!
//! Every primitive owns an [AttributeStore]. Its arrays hold one of four element kinds
//! ([Float], [Vector], [Colour], [Matrix]), and all of the per-vertex (or per-particle, or
//! per-pixel) arrays in a store share the length of the canonical position array, `"p"`.
//!
//! ```
//! use pdata::{op, AttributeStore, ElementType, Value};
//! use nalgebra::vector;
//!
//! let mut store = AttributeStore::polygon(4);
//! store.add("offset", ElementType::Vector)?;
//! store.get_mut::<pdata::Vector>("offset")?.set(1, vector![0.0, 1.0, 0.0]);
//! op::apply_named(&mut store, "+", "p", &op::Operand::Array("offset"))?;
//! assert_eq!(store.get_raw("p")?.get(5), Some(Value::Vector(vector![0.0, 1.0, 0.0])));
//! # Ok::<(), pdata::Error>(())
//! ```
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod array;
mod element;
pub mod error;
pub mod op;
pub mod script;
pub mod store;

pub use array::{AttributeArray, DynamicArray, TypedArray};
pub use element::*;
pub use error::{Error, Found, Result};
pub use store::AttributeStore;
