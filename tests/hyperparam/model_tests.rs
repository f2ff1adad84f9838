//! Tests for the HyperparamModel collection

use crate::test_helpers::load_svm;
use hyperparam_rs::error::HyperparamError;
use hyperparam_rs::hyperparam::{FlatMap, Hyperparam, HyperparamModel, Kind, Member, Value};

#[test]
fn test_member_access() {
    let set = load_svm();
    let svm = set.get("svm").unwrap();
    assert_eq!(svm.name(), "svm");
    assert_eq!(svm.desc(), "svm");
    assert_eq!(svm.doc(), Some("Support vector machine."));
    assert_eq!(
        svm.names().cloned().collect::<Vec<_>>(),
        vec!["kernel", "C", "max_iter"]
    );

    assert_eq!(svm.param("C").unwrap().kind(), Kind::Float);
    assert!(svm.value("C").unwrap().is_null());
    assert_eq!(svm.value("max_iter").unwrap(), &Value::Int(20));
    assert!(matches!(svm.get("C").unwrap(), Member::Param(_)));

    let err = svm.get("gamma").unwrap_err();
    assert_eq!(err.to_string(), "Key not found: 'gamma'");
}

#[test]
fn test_set_value() {
    let mut set = load_svm();
    let svm = set.get_mut("svm").unwrap();

    svm.set_value("C", 3.0).unwrap();
    assert_eq!(svm.value("C").unwrap(), &Value::Float(3.0));
    assert_eq!(svm.param("C").unwrap().value(), &Value::Float(3.0));

    let err = svm.set_value("C", 3).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Wrong type 'int', expecting 'float' for hyperparameter 'C'"
    );

    svm.set_value("C", Value::Null).unwrap();
    assert!(svm.value("C").unwrap().is_null());

    svm.set_value("kernel", "linear").unwrap();
    let err = svm.set_value("kernel", 3).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Wrong type 'int', expecting 'str' for hyperparameter 'kernel'"
    );
    assert_eq!(svm.value("kernel").unwrap(), &Value::from("linear"));
}

#[test]
fn test_replace_container_values() {
    let mut set = load_svm();
    let k_means = set.get_mut("k_means").unwrap();

    k_means.set_value("strata", vec![6, 7, 8]).unwrap();
    assert_eq!(k_means.value("strata").unwrap(), &Value::from(vec![6, 7, 8]));

    let mut kwargs = FlatMap::new();
    kwargs.insert("animal".to_string(), Value::from("cat"));
    k_means.set_value("kwargs", kwargs.clone()).unwrap();
    assert_eq!(k_means.value("kwargs").unwrap(), &Value::Dict(kwargs));
}

#[test]
fn test_flatten_and_update() {
    let set1 = load_svm();
    let set2 = load_svm();
    let mut hm1 = set1.get("svm").unwrap().clone();
    let mut hm2 = set2.get("svm").unwrap().clone();
    assert_eq!(hm1, hm2);

    let mut should = FlatMap::new();
    should.insert("kernel".to_string(), Value::Null);
    should.insert("C".to_string(), Value::Null);
    should.insert("max_iter".to_string(), Value::Int(20));
    assert_eq!(hm1.flatten(), should);

    let mut should2 = should.clone();
    should2.insert("C".to_string(), Value::Float(123.0));
    hm1.update(&should2).unwrap();
    assert_eq!(hm1.flatten(), should2);
    assert_ne!(hm1, hm2);

    hm2.update(&hm1).unwrap();
    assert_eq!(hm1, hm2);
}

#[test]
fn test_update_is_fail_fast() {
    let set = load_svm();
    let mut svm = set.get("svm").unwrap().clone();

    let mut updates = FlatMap::new();
    updates.insert("C".to_string(), Value::Float(1.0));
    updates.insert("max_iter".to_string(), Value::Int(99));
    updates.insert("kernel".to_string(), Value::from("linear"));

    assert!(svm.update(&updates).is_err());
    assert_eq!(svm.value("C").unwrap(), &Value::Float(1.0));
    assert_eq!(svm.value("max_iter").unwrap(), &Value::Int(20));
    assert!(svm.value("kernel").unwrap().is_null());
}

#[test]
fn test_build_programmatically() {
    let mut model = HyperparamModel::new("rf").with_desc("random forest");
    model
        .add_param(Hyperparam::new("n_estimators", Kind::Int).with_value(100).unwrap())
        .unwrap();

    let mut tree = HyperparamModel::new("tree");
    tree.add(Hyperparam::new("max_depth", Kind::Int)).unwrap();
    model.add_model(tree).unwrap();

    assert_eq!(
        model.flatten().keys().cloned().collect::<Vec<_>>(),
        vec!["n_estimators", "tree.max_depth"]
    );

    let err = model.add(Hyperparam::new("tree", Kind::Int)).unwrap_err();
    assert!(matches!(err, HyperparamError::DuplicateName { .. }));

    let err = model.add(Hyperparam::new("max-depth", Kind::Int)).unwrap_err();
    assert_eq!(err.to_string(), "Illegal name, must be an identifier: max-depth");

    let err = model.set_value("tree", 1).unwrap_err();
    assert_eq!(err.to_string(), "Cannot assign a value to 'tree'");
}
