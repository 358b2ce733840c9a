use nalgebra::vector;
use pdata::{
    op::{self, OpOutput, Operand, Operator},
    AttributeStore, Colour, ElementType, Error, Found, TypedArray, Value, Vector,
};
use quickcheck_macros::quickcheck;

fn store_with(points: &[Vector]) -> AttributeStore {
    let mut store = AttributeStore::new();
    store.insert("p", TypedArray::from_vec(points.to_vec())).unwrap();
    store
}

fn finite(v: &[(f32, f32, f32)]) -> Vec<Vector> {
    v.iter()
        .map(|&(x, y, z)| vector![x, y, z])
        .filter(|p| p.iter().all(|c| c.is_finite() && c.abs() < 1e6))
        .collect()
}

#[test]
fn closest_finds_nearest() {
    let points = [
        vector![0.0, 0.0, 0.0],
        vector![10.0, 0.0, 0.0],
        vector![0.0, 10.0, 0.0],
    ];
    let mut store = store_with(&points);
    let out = op::apply(
        &mut store,
        Operator::Closest,
        "p",
        &Operand::Tuple(Value::Vector(vector![9.0, 1.0, 0.0])),
    )
    .unwrap();
    assert_eq!(out.value(), Some(Value::Vector(points[1])));
    // reductions write nothing
    assert_eq!(store.get::<Vector>("p").unwrap().as_slice(), &points);
}

#[test]
fn closest_tie_is_first() {
    let mut store = store_with(&[vector![1.0, 0.0, 0.0], vector![-1.0, 0.0, 0.0]]);
    let out = op::apply_named(
        &mut store,
        "closest",
        "p",
        &Operand::Tuple(Value::Vector(Vector::zeros())),
    )
    .unwrap();
    assert_eq!(out.value(), Some(Value::Vector(vector![1.0, 0.0, 0.0])));
}

#[quickcheck]
fn add_then_sub_restores(points: Vec<(f32, f32, f32)>, offset: (f32, f32, f32)) -> bool {
    let points = finite(&points);
    let Some(&offset) = finite(&[offset]).first() else {
        return true;
    };
    let mut store = store_with(&points);
    let tuple = Operand::Tuple(Value::Vector(offset));
    let scalar = Operand::Scalar(offset.x);
    for operand in [&tuple, &scalar] {
        op::apply(&mut store, Operator::Add, "p", operand).unwrap();
    }
    for operand in [&scalar, &tuple] {
        op::apply(&mut store, Operator::Sub, "p", operand).unwrap();
    }
    store
        .get::<Vector>("p")
        .unwrap()
        .iter()
        .zip(&points)
        .all(|(after, before)| {
            (after - before).norm() <= 1e-6 * (1.0 + before.norm() + 3.0 * offset.norm())
        })
}

#[quickcheck]
fn scalar_add_then_sub_restores(values: Vec<f32>, offset: f32) -> bool {
    let values: Vec<f32> = values
        .into_iter()
        .filter(|v| v.is_finite() && v.abs() < 1e6)
        .collect();
    if !offset.is_finite() || offset.abs() >= 1e6 {
        return true;
    }
    let mut store = AttributeStore::new();
    store.insert("f", TypedArray::from_vec(values.clone())).unwrap();
    op::apply(&mut store, Operator::Add, "f", &Operand::Scalar(offset)).unwrap();
    op::apply(&mut store, Operator::Sub, "f", &Operand::Scalar(offset)).unwrap();
    store
        .get::<f32>("f")
        .unwrap()
        .iter()
        .zip(&values)
        .all(|(after, before)| {
            (after - before).abs() <= 1e-6 * (1.0 + before.abs() + offset.abs())
        })
}

#[test]
fn array_operand_wraps() {
    let mut store = AttributeStore::polygon(4);
    store
        .insert("step", TypedArray::from_vec(vec![Vector::x(), Vector::y()]))
        .unwrap();
    op::apply(&mut store, Operator::Add, "p", &Operand::Array("step")).unwrap();
    assert_eq!(
        store.get::<Vector>("p").unwrap().as_slice(),
        &[Vector::x(), Vector::y(), Vector::x(), Vector::y()]
    );
}

#[test]
fn mismatched_array_operand_changes_nothing() {
    let mut store = AttributeStore::polygon(3);
    let p = store.get_raw("p").unwrap().clone();
    let c = store.get_raw("c").unwrap().clone();
    assert_eq!(
        op::apply(&mut store, Operator::Add, "p", &Operand::Array("c")),
        Err(Error::TypeMismatch {
            expected: ElementType::Vector,
            found: Found::Element(ElementType::Colour)
        })
    );
    assert_eq!(store.get_raw("p").unwrap(), &p);
    assert_eq!(store.get_raw("c").unwrap(), &c);
}

#[test]
fn unknown_operator_changes_nothing() {
    let mut store = AttributeStore::polygon(3);
    let before = store.clone();
    assert_eq!(
        op::apply_named(&mut store, "atan2", "p", &Operand::Scalar(1.0)),
        Err(Error::UnknownOperator("atan2".to_owned()))
    );
    assert!(store.iter().all(|(name, a)| before.get_raw(name) == Ok(a)));
}

#[test]
fn unsupported_combinations() {
    let mut store = AttributeStore::polygon(2);
    store.add("m", ElementType::Matrix).unwrap();
    store.add("f", ElementType::Float).unwrap();
    let before = store.clone();
    let m = Value::Matrix(pdata::Matrix::identity());
    for (op, name, operand) in [
        (Operator::Div, "m", Operand::Tuple(m)),
        (Operator::Sin, "f", Operand::Scalar(1.0)),
        (Operator::Sin, "p", Operand::Array("p")),
        (Operator::Closest, "c", Operand::Tuple(Value::Vector(Vector::zeros()))),
    ] {
        assert!(
            matches!(op::apply(&mut store, op, name, &operand), Err(Error::Unsupported { .. })),
            "{op} {name}"
        );
    }
    assert!(store.iter().all(|(name, a)| before.get_raw(name) == Ok(a)));
}

#[test]
fn tuple_of_other_type_mismatches() {
    let mut store = AttributeStore::polygon(3);
    store.add("f", ElementType::Float).unwrap();
    let before = store.clone();
    let white = Value::Colour(Colour::WHITE);
    let up = Value::Vector(Vector::y());
    let m = Value::Matrix(pdata::Matrix::identity());
    for (op, name, operand, expected, found) in [
        (Operator::Add, "p", white, ElementType::Vector, ElementType::Colour),
        (Operator::Add, "p", m, ElementType::Vector, ElementType::Matrix),
        (Operator::Mul, "c", up, ElementType::Colour, ElementType::Vector),
        (Operator::Sub, "f", up, ElementType::Float, ElementType::Vector),
        (Operator::Closest, "p", white, ElementType::Vector, ElementType::Colour),
    ] {
        assert_eq!(
            op::apply(&mut store, op, name, &Operand::Tuple(operand)),
            Err(Error::TypeMismatch {
                expected,
                found: Found::Element(found)
            }),
            "{op} {name}"
        );
    }
    assert!(store.iter().all(|(name, a)| before.get_raw(name) == Ok(a)));

    // the matrix literal a vector array is transformed by is the one cross-type tuple
    op::apply(&mut store, Operator::Mul, "p", &Operand::Tuple(m)).unwrap();
}

#[test]
fn sin_and_cos_write_operand_array() {
    let mut store = AttributeStore::new();
    let angles = vec![0.0f32, std::f32::consts::FRAC_PI_2];
    store.insert("p", TypedArray::from_vec(vec![Vector::zeros(); 2])).unwrap();
    store.insert("a", TypedArray::from_vec(angles.clone())).unwrap();
    store.add("s", ElementType::Float).unwrap();
    store.add("c", ElementType::Float).unwrap();

    assert_eq!(
        op::apply(&mut store, Operator::Sin, "a", &Operand::Array("s")),
        Ok(OpOutput::Mutated)
    );
    op::apply(&mut store, Operator::Cos, "a", &Operand::Array("c")).unwrap();

    let s = store.get::<f32>("s").unwrap();
    let c = store.get::<f32>("c").unwrap();
    assert!((s[0] - 0.0).abs() < 1e-6 && (s[1] - 1.0).abs() < 1e-6);
    assert!((c[0] - 1.0).abs() < 1e-6 && c[1].abs() < 1e-6);
    assert_eq!(store.get::<f32>("a").unwrap().as_slice(), &angles[..]);
}

#[test]
fn empty_operand_array() {
    let mut store = AttributeStore::polygon(2);
    store.insert("none", TypedArray::<Vector>::new()).unwrap();
    assert_eq!(
        op::apply(&mut store, Operator::Mul, "p", &Operand::Array("none")),
        Err(Error::EmptyArray("none".to_owned()))
    );
}
