pub(crate) use super::*;

struct Polynomial {
    degree: usize,
    prior: IsotropicGaussian,
}

impl Polynomial {
    fn new(degree: usize) -> Self {
        Self {
            degree,
            prior: IsotropicGaussian::new(Vector::zeros(degree + 1), 1.0)
                .expect("unit variance factor is valid"),
        }
    }
}

impl Hypothesis for Polynomial {
    fn dimension(&self) -> usize {
        self.degree + 1
    }

    fn design_row(&self, x: f64) -> Vector<f64> {
        let mut row = Vec::with_capacity(self.degree + 1);
        let mut power = 1.0;
        for _ in 0..=self.degree {
            row.push(power);
            power *= x;
        }
        Vector::from_vec(row)
    }

    fn weight_prior(&self) -> &IsotropicGaussian {
        &self.prior
    }
}

/// Reports dimension 3 but produces rows of width 2.
struct Inconsistent {
    prior: IsotropicGaussian,
}

impl Hypothesis for Inconsistent {
    fn dimension(&self) -> usize {
        3
    }

    fn design_row(&self, x: f64) -> Vector<f64> {
        Vector::from_slice(&[1.0, x])
    }

    fn weight_prior(&self) -> &IsotropicGaussian {
        &self.prior
    }
}

#[test]
fn test_design_row_polynomial() {
    let hyp = Polynomial::new(2);
    let row = hyp.design_row(3.0);
    assert_eq!(row.len(), 3);
    assert!((row[0] - 1.0).abs() < 1e-12);
    assert!((row[1] - 3.0).abs() < 1e-12);
    assert!((row[2] - 9.0).abs() < 1e-12);
}

#[test]
fn test_design_matrix_stacks_rows() {
    let hyp = Polynomial::new(1);
    let design = hyp
        .design_matrix(&[0.0, 1.0, 2.0])
        .expect("rows have declared width");
    assert_eq!(design.shape(), (3, 2));
    assert!((design.get(2, 1) - 2.0).abs() < 1e-12);
}

#[test]
fn test_design_matrix_rejects_inconsistent_width() {
    let hyp = Inconsistent {
        prior: IsotropicGaussian::new(Vector::zeros(3), 1.0).expect("valid factor"),
    };
    let result = hyp.design_matrix(&[1.0]);
    assert!(matches!(
        result,
        Err(ElegirError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_collection_uniform_prior() {
    let collection = HypothesisCollection::with_uniform_prior(vec![
        Box::new(Polynomial::new(0)),
        Box::new(Polynomial::new(1)),
        Box::new(Polynomial::new(2)),
    ])
    .expect("non-empty collection");
    assert_eq!(collection.len(), 3);
    for k in 0..3 {
        assert!((collection.prior(k) - 1.0 / 3.0).abs() < 1e-12);
    }
}

#[test]
fn test_collection_explicit_prior() {
    let collection = HypothesisCollection::new(
        vec![Box::new(Polynomial::new(0)), Box::new(Polynomial::new(1))],
        vec![0.3, 0.7],
    )
    .expect("masses sum to 1");
    assert!((collection.prior(1) - 0.7).abs() < 1e-12);
    assert_eq!(collection.get(1).dimension(), 2);
}

#[test]
fn test_collection_rejects_empty() {
    assert!(HypothesisCollection::with_uniform_prior(vec![]).is_err());
    assert!(HypothesisCollection::new(vec![], vec![]).is_err());
}

#[test]
fn test_collection_rejects_bad_masses() {
    let make = || -> Vec<Box<dyn Hypothesis>> {
        vec![Box::new(Polynomial::new(0)), Box::new(Polynomial::new(1))]
    };
    // wrong count
    assert!(HypothesisCollection::new(make(), vec![1.0]).is_err());
    // doesn't sum to 1
    assert!(HypothesisCollection::new(make(), vec![0.3, 0.3]).is_err());
    // negative
    assert!(HypothesisCollection::new(make(), vec![1.5, -0.5]).is_err());
    // non-finite
    assert!(HypothesisCollection::new(make(), vec![f64::NAN, 1.0]).is_err());
}

#[test]
fn test_iter_preserves_order() {
    let collection = HypothesisCollection::with_uniform_prior(vec![
        Box::new(Polynomial::new(0)),
        Box::new(Polynomial::new(4)),
    ])
    .expect("non-empty collection");
    let dims: Vec<usize> = collection.iter().map(Hypothesis::dimension).collect();
    assert_eq!(dims, vec![1, 5]);
}
