use nalgebra::vector;
use pdata::{
    script::{self, Call, ScriptValue},
    AttributeStore, Colour, ElementType, Error, Found, Matrix,
};
use quickcheck_macros::quickcheck;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("pdata=trace")
        .try_init();
}

fn s(v: &str) -> String {
    v.to_owned()
}

#[test]
fn walk_a_closed_curve() {
    init_tracing();
    let mut store = AttributeStore::polygon(3);
    for i in 0..3 {
        let x = ScriptValue::Floats(vec![i as f64, 0.0, 0.0]);
        script::pdata_set(&mut store, "p", i, &x).unwrap();
    }
    assert_eq!(script::pdata_size(&store), Ok(ScriptValue::Integer(3)));
    assert_eq!(
        script::pdata_ref(&store, "p", 3),
        script::pdata_ref(&store, "p", 0)
    );
    assert_eq!(
        script::pdata_ref(&store, "p", -1),
        Ok(ScriptValue::Floats(vec![2.0, 0.0, 0.0]))
    );
}

#[quickcheck]
fn set_then_ref_every_type(code: u8, index: i64, seed: Vec<f32>) -> bool {
    let ty = ElementType::ALL[usize::from(code) % ElementType::ALL.len()];
    let components: Vec<f64> = (0..ty.arity())
        .map(|i| {
            let c = seed.get(i).copied().filter(|c| c.is_finite());
            f64::from(c.unwrap_or(i as f32))
        })
        .collect();
    let value = match ty {
        ElementType::Float => ScriptValue::Number(components[0]),
        _ => ScriptValue::Floats(components),
    };
    let mut store = AttributeStore::polygon(5);
    script::pdata_add(&mut store, "x", &ty.code().to_string()).unwrap();
    script::pdata_set(&mut store, "x", index, &value).unwrap();
    script::pdata_ref(&store, "x", index) == Ok(value)
}

#[test]
fn colours_and_matrices_from_lists() {
    init_tracing();
    let mut store = AttributeStore::polygon(2);
    script::pdata_set(&mut store, "c", 1, &ScriptValue::Floats(vec![0.5, 0.25, 0.0])).unwrap();
    assert_eq!(
        script::pdata_ref(&store, "c", 1),
        Ok(ScriptValue::Floats(vec![0.5, 0.25, 0.0, 1.0]))
    );
    assert_eq!(store.get::<Colour>("c").unwrap()[1], Colour::rgb(0.5, 0.25, 0.0));

    // column-major: the translation is the last column
    let mut translation = vec![0.0; 16];
    for i in [0, 5, 10, 15] {
        translation[i] = 1.0;
    }
    translation[12..15].copy_from_slice(&[1.0, 2.0, 3.0]);
    script::pdata_add(&mut store, "m", "m").unwrap();
    let list = ScriptValue::Floats(translation);
    script::pdata_set(&mut store, "m", 0, &list).unwrap();
    assert_eq!(
        store.get::<Matrix>("m").unwrap()[0],
        Matrix::new_translation(&vector![1.0, 2.0, 3.0])
    );
    assert_eq!(script::pdata_ref(&store, "m", 2), Ok(list));
}

#[test]
fn tuple_of_other_type_mismatches() {
    init_tracing();
    let mut store = AttributeStore::polygon(3);
    let before = store.clone();
    assert_eq!(
        script::pdata_op(&mut store, "+", "p", &ScriptValue::Floats(vec![1.0; 4])),
        Err(Error::TypeMismatch {
            expected: ElementType::Vector,
            found: Found::Element(ElementType::Colour)
        })
    );
    assert!(store.iter().all(|(name, a)| before.get_raw(name) == Ok(a)));
}

#[test]
fn ops_from_script_values() {
    init_tracing();
    let mut store = AttributeStore::polygon(2);
    script::pdata_add(&mut store, "w", "float").unwrap();
    script::pdata_op(&mut store, "+", "w", &ScriptValue::Integer(2)).unwrap();
    script::pdata_op(&mut store, "*", "w", &ScriptValue::Str(s("w"))).unwrap();
    assert_eq!(script::pdata_ref(&store, "w", 1), Ok(ScriptValue::Number(4.0)));

    script::pdata_op(&mut store, "*", "c", &ScriptValue::Floats(vec![0.5, 0.5, 0.5, 1.0])).unwrap();
    assert_eq!(
        script::pdata_ref(&store, "c", 0),
        Ok(ScriptValue::Floats(vec![0.5, 0.5, 0.5, 1.0]))
    );

    let target = ScriptValue::Floats(vec![1.0, 1.0, 1.0]);
    let closest = script::pdata_op(&mut store, "closest", "p", &target);
    assert_eq!(closest, Ok(ScriptValue::Floats(vec![0.0, 0.0, 0.0])));
}

#[test]
fn rejected_calls_leave_store() {
    init_tracing();
    let mut store = AttributeStore::polygon(2);
    let before = store.clone();
    assert_eq!(
        script::pdata_add(&mut store, "q", "z"),
        Err(Error::UnknownType(s("z")))
    );
    assert_eq!(
        script::pdata_op(&mut store, "+", "p", &ScriptValue::Floats(vec![1.0; 5])),
        Err(Error::InvalidArity(5))
    );
    assert!(script::pdata_set(&mut store, "p", 0, &ScriptValue::Str(s("up"))).is_err());
    assert!(script::pdata_copy(&mut store, "p", "c").is_err());
    assert_eq!(store.len(), before.len());
    assert!(store.iter().all(|(name, a)| before.get_raw(name) == Ok(a)));
}

#[test]
fn dispatch_recovers() {
    init_tracing();
    let mut store = AttributeStore::new();
    let calls = [
        Call::Size,
        Call::Ref {
            name: s("p"),
            index: 0,
        },
        Call::Add {
            name: s("p"),
            type_code: s("v"),
        },
        Call::Add {
            name: s("p"),
            type_code: s("v"),
        },
        Call::Size,
        Call::Copy {
            source: s("p"),
            dest: s("p"),
        },
        Call::Op {
            op: s("-"),
            name: s("p"),
            operand: ScriptValue::Number(1.0),
        },
    ];
    let results: Vec<_> = calls.iter().map(|c| script::dispatch(&mut store, c)).collect();
    assert_eq!(
        results,
        vec![
            ScriptValue::Void,
            ScriptValue::Number(0.0),
            ScriptValue::Void,
            ScriptValue::Void,
            ScriptValue::Integer(0),
            ScriptValue::Void,
            ScriptValue::Void,
        ]
    );
}
