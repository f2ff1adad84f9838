//! Tests for the Sphinx dataclass format

use crate::test_helpers::load_svm;
use hyperparam_rs::render::sphinx::write_sphinx_class;
use hyperparam_rs::render::{render_to_string, OutputFormat, WriteOptions};

const SVM_FIELDS: &str = "    svm: HyperparamModel = field()
    \"\"\"Support vector machine.

    Hyperparameters::

        :param kernel: maps the observations into some feature space
        :type kernel: str; one of: radial, linear

        :param C: regularization parameter
        :type C: float

        :param max_iter: number of iterations, must be in the interval [1, 30]
        :type max_iter: int
    \"\"\"

    k_means: HyperparamModel = field()
    \"\"\"K-means clustering.

    Hyperparameters::

        :param n_clusters: number of clusters
        :type n_clusters: int

        :param copy_x: when pre-computing distances it is more numerically accurate to center the data first
        :type copy_x: bool

        :param strata: an array of stratified hyperparameters
        :type strata: list

        :param kwargs: model keyword arguments
        :type kwargs: dict
    \"\"\"
";

#[test]
fn test_sphinx() {
    let set = load_svm();
    let out = render_to_string(&set, OutputFormat::Sphinx, &WriteOptions::default()).unwrap();
    let expected = format!(
        "\
from dataclasses import dataclass, field
from zensols.datdesc import HyperparamModel


@dataclass
class Hyperparams(object):
    \"\"\"Hyperparameters for models ``svm``, ``k-means``.

    \"\"\"
{}",
        SVM_FIELDS
    );
    assert_eq!(out, expected);
}

#[test]
fn test_sphinx_class_name() {
    let set = load_svm();
    let mut out = Vec::new();
    write_sphinx_class(&set, "SvmHyperparams", &mut out, &WriteOptions::default()).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("@dataclass\nclass SvmHyperparams(object):\n"));
    assert!(out.ends_with(SVM_FIELDS));
}
