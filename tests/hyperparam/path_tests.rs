//! Tests for dotted path access

use crate::test_helpers::load_svm;
use hyperparam_rs::error::HyperparamError;
use hyperparam_rs::hyperparam::{PathError, Resolved, Value};

#[test]
fn test_resolve_values() {
    let set = load_svm();
    assert_eq!(
        set.resolve("svm.max_iter").unwrap().as_value(),
        Some(&Value::Int(20))
    );
    assert_eq!(
        set.resolve("k_means.strata.0").unwrap().as_value(),
        Some(&Value::Int(1))
    );
    assert_eq!(
        set.resolve("k_means.kwargs.learning_rate").unwrap().as_value(),
        Some(&Value::Float(0.01))
    );
    assert_eq!(
        set.resolve("k_means.strata").unwrap(),
        Resolved::Value(&Value::from(vec![1, 2]))
    );
}

#[test]
fn test_node_accessor() {
    let set = load_svm();

    let model = set.resolve("svm.node()").unwrap();
    assert_eq!(model.as_model().unwrap().name(), "svm");

    let model = set.resolve("svm").unwrap();
    assert_eq!(model.as_model().unwrap().name(), "svm");

    let param = set.resolve("svm.max_iter.node()").unwrap();
    let param = param.as_param().unwrap();
    assert_eq!(param.name(), "max_iter");
    assert_eq!(param.range().unwrap().to_string(), "[1, 30]");

    let svm = set.get("svm").unwrap();
    assert_eq!(
        svm.resolve("kernel.node()").unwrap().as_param().unwrap().name(),
        "kernel"
    );
}

#[test]
fn test_list_index_errors() {
    let set = load_svm();

    let err = set.resolve("k_means.strata.5").unwrap_err();
    assert!(matches!(
        err,
        HyperparamError::Path(PathError::IndexOutOfRange { index: 5, len: 2 })
    ));

    let err = set.resolve("k_means.strata.k").unwrap_err();
    assert_eq!(err.to_string(), "List indices must be integers, not 'k'");
}

#[test]
fn test_indexing_scalar() {
    let set = load_svm();
    let err = set.resolve("svm.max_iter.a.b").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Trying to index 'int' with remaining path: ['a', 'b']"
    );
}

#[test]
fn test_missing_keys() {
    let set = load_svm();
    assert!(matches!(
        set.resolve("nada.C").unwrap_err(),
        HyperparamError::KeyNotFound { .. }
    ));
    assert!(matches!(
        set.resolve("svm.nada").unwrap_err(),
        HyperparamError::KeyNotFound { .. }
    ));
    assert!(matches!(
        set.resolve("k_means.kwargs.nada").unwrap_err(),
        HyperparamError::KeyNotFound { .. }
    ));
    assert!(matches!(
        set.resolve("svm..C").unwrap_err(),
        HyperparamError::Path(PathError::InvalidPath(_))
    ));
}

#[test]
fn test_assign_through_paths() {
    let mut set = load_svm();

    set.set("svm.C", 2.0).unwrap();
    assert_eq!(set.get("svm").unwrap().value("C").unwrap(), &Value::Float(2.0));

    set.set("k_means.strata.0", 5).unwrap();
    assert_eq!(set.resolve("k_means.strata.0").unwrap().as_value(), Some(&Value::Int(5)));

    set.set("k_means.kwargs.more", 10).unwrap();
    assert_eq!(
        set.resolve("k_means.kwargs.more").unwrap().as_value(),
        Some(&Value::Int(10))
    );

    let err = set.set("k_means.strata.2", 1).unwrap_err();
    assert!(matches!(
        err,
        HyperparamError::Path(PathError::IndexOutOfRange { index: 2, len: 2 })
    ));

    let err = set.set("svm.max_iter", 31).unwrap_err();
    assert_eq!(err.to_string(), "Out of range value '31' not in [1, 30]");
    assert_eq!(set.resolve("svm.max_iter").unwrap().as_value(), Some(&Value::Int(20)));

    let err = set.set("svm.max_iter.node()", 3).unwrap_err();
    assert!(matches!(err, HyperparamError::Path(PathError::NotAssignable(_))));
}
