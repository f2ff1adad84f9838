//! Tests for the Hyperparam descriptor

use hyperparam_rs::error::HyperparamError;
use hyperparam_rs::hyperparam::{Bounds, Hyperparam, Kind, Value, ValueError};
use proptest::prelude::*;

fn max_iter() -> Hyperparam {
    Hyperparam::new("max_iter", Kind::Int)
        .with_range(Bounds::new(1, 30).unwrap())
        .unwrap()
}

fn kernel() -> Hyperparam {
    Hyperparam::new("kernel", Kind::Str)
        .with_choices(vec!["radial".into(), "linear".into()])
        .unwrap()
}

#[test]
fn test_equality() {
    let h1 = Hyperparam::new("C", Kind::Float).with_doc("somedoc");
    let h2 = Hyperparam::new("C", Kind::Float).with_doc("somedoc");
    assert_eq!(h1, h2);

    let h3 = Hyperparam::new("C", Kind::Int).with_doc("somedoc");
    assert_ne!(h1, h3);

    let h4 = Hyperparam::new("C", Kind::Int).with_doc("somedoc").with_value(2).unwrap();
    let h5 = Hyperparam::new("C", Kind::Int).with_doc("somedoc").with_value(2).unwrap();
    assert_ne!(h3, h4);
    assert_eq!(h4, h5);

    let h6 = Hyperparam::new("C2", Kind::Int).with_doc("somedoc").with_value(2).unwrap();
    assert_ne!(h5, h6);
}

#[test]
fn test_kind_is_strict() {
    let mut c = Hyperparam::new("C", Kind::Float);
    let err = c.set_value(3).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Wrong type 'int', expecting 'float' for hyperparameter 'C'"
    );
    c.set_value(3.0).unwrap();
    assert_eq!(c.value(), &Value::Float(3.0));

    let mut flag = Hyperparam::new("copy_x", Kind::Bool);
    assert!(flag.set_value(1).is_err());
    assert!(flag.set_value("true").is_err());
    flag.set_value(false).unwrap();
}

#[test]
fn test_choices() {
    let mut k = kernel();
    k.set_value("linear").unwrap();
    let err = k.set_value("nada").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown choice 'nada', expecting one of: 'linear', 'radial'"
    );
    assert!(matches!(err, ValueError::UnknownChoice { .. }));
    assert_eq!(k.value(), &Value::from("linear"));
}

#[test]
fn test_range_is_inclusive() {
    let mut m = max_iter();
    m.set_value(1).unwrap();
    m.set_value(30).unwrap();
    assert_eq!(
        m.set_value(0).unwrap_err().to_string(),
        "Out of range value '0' not in [1, 30]"
    );
    assert_eq!(
        m.set_value(31).unwrap_err().to_string(),
        "Out of range value '31' not in [1, 30]"
    );
    assert_eq!(m.value(), &Value::Int(30));
}

#[test]
fn test_null_clears() {
    let mut m = max_iter().with_value(20).unwrap();
    m.set_value(Value::Null).unwrap();
    assert!(m.value().is_null());

    let mut m = max_iter().with_value(20).unwrap();
    m.clear();
    assert!(m.value().is_null());
}

#[test]
fn test_invalid_constraints() {
    let err = Hyperparam::new("copy_x", Kind::Bool)
        .with_choices(vec![true.into()])
        .unwrap_err();
    assert!(matches!(err, HyperparamError::InvalidConstraint { .. }));

    let err = Hyperparam::new("kernel", Kind::Str)
        .with_range(Bounds::new(1, 2).unwrap())
        .unwrap_err();
    assert!(matches!(err, HyperparamError::InvalidConstraint { .. }));

    let err = Hyperparam::new("kernel", Kind::Str)
        .with_choices(vec!["radial".into(), 3.into()])
        .unwrap_err();
    assert!(matches!(err, HyperparamError::Value(ValueError::WrongType { .. })));
}

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-10i64..50).prop_map(Value::Int),
        (-10.0f64..50.0).prop_map(Value::Float),
        prop::sample::select(vec!["radial", "linear", "nada"]).prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn prop_range_validation(value in any_value()) {
        let expected = match &value {
            Value::Null => true,
            Value::Int(i) => (1..=30).contains(i),
            _ => false,
        };
        prop_assert_eq!(max_iter().validate(&value).is_ok(), expected);
    }

    #[test]
    fn prop_choice_validation(value in any_value()) {
        let expected = match &value {
            Value::Null => true,
            Value::Str(s) => s == "radial" || s == "linear",
            _ => false,
        };
        prop_assert_eq!(kernel().validate(&value).is_ok(), expected);
    }

    #[test]
    fn prop_failed_assignment_keeps_value(value in any_value()) {
        let mut m = max_iter().with_value(20).unwrap();
        if m.set_value(value.clone()).is_ok() {
            prop_assert_eq!(m.value(), &value);
        } else {
            prop_assert_eq!(m.value(), &Value::Int(20));
        }
    }
}
