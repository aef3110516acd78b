pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m = Matrix::<f64>::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-12);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn test_zeros_empty_accumulator() {
    let m = Matrix::zeros(0, 4);
    assert_eq!(m.shape(), (0, 4));
    assert!(m.as_slice().is_empty());
}

#[test]
fn test_eye() {
    let m = Matrix::eye(3);
    assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((m.get(1, 1) - 1.0).abs() < 1e-12);
    assert!((m.get(2, 2) - 1.0).abs() < 1e-12);
    assert!((m.get(0, 1) - 0.0).abs() < 1e-12);
}

#[test]
fn test_transpose() {
    let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let t = m.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert!((t.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((t.get(0, 1) - 4.0).abs() < 1e-12);
    assert!((t.get(2, 1) - 6.0).abs() < 1e-12);
}

#[test]
fn test_row() {
    let m = Matrix::<f64>::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let row = m.row(1);
    assert_eq!(row.len(), 3);
    assert!((row[0] - 4.0).abs() < 1e-12);
    assert!((row[2] - 6.0).abs() < 1e-12);
}

#[test]
fn test_column() {
    let m = Matrix::<f64>::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let col = m.column(1);
    assert_eq!(col.len(), 2);
    assert!((col[0] - 2.0).abs() < 1e-12);
    assert!((col[1] - 5.0).abs() < 1e-12);
}

#[test]
fn test_push_row() {
    let mut m = Matrix::zeros(0, 2);
    m.push_row(&Vector::from_slice(&[1.0, 2.0]))
        .expect("row width matches column count");
    m.push_row(&Vector::from_slice(&[3.0, 4.0]))
        .expect("row width matches column count");
    assert_eq!(m.shape(), (2, 2));
    assert!((m.get(1, 0) - 3.0).abs() < 1e-12);
}

#[test]
fn test_push_row_width_mismatch() {
    let mut m = Matrix::zeros(0, 2);
    assert!(m.push_row(&Vector::from_slice(&[1.0, 2.0, 3.0])).is_err());
    assert_eq!(m.n_rows(), 0);
}

#[test]
fn test_matmul() {
    // 2x3 * 3x2 = 2x2
    let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let b = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0])
        .expect("test data has correct dimensions: 3*2=6 elements");
    let c = a
        .matmul(&b)
        .expect("matrix dimensions are compatible for multiplication: 2x3 * 3x2");

    assert_eq!(c.shape(), (2, 2));
    // c[0,0] = 1*7 + 2*9 + 3*11 = 58
    assert!((c.get(0, 0) - 58.0).abs() < 1e-12);
    // c[0,1] = 1*8 + 2*10 + 3*12 = 64
    assert!((c.get(0, 1) - 64.0).abs() < 1e-12);
}

#[test]
fn test_matmul_dimension_error() {
    let a = Matrix::from_vec(2, 3, vec![1.0; 6]).expect("test data has correct dimensions");
    let b = Matrix::from_vec(2, 2, vec![1.0; 4]).expect("test data has correct dimensions");
    assert!(a.matmul(&b).is_err());
}

#[test]
fn test_matvec() {
    let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let result = m
        .matvec(&v)
        .expect("matrix columns match vector length: both 3");
    assert_eq!(result.len(), 2);
    // [1+4+9, 4+10+18] = [14, 32]
    assert!((result[0] - 14.0).abs() < 1e-12);
    assert!((result[1] - 32.0).abs() < 1e-12);
}

#[test]
fn test_add_sub_mul_scalar() {
    let a = Matrix::eye(2);
    let b = Matrix::eye(2).mul_scalar(2.0);
    let sum = a.add(&b).expect("shapes match");
    assert!((sum.get(0, 0) - 3.0).abs() < 1e-12);
    let diff = b.sub(&a).expect("shapes match");
    assert!((diff.get(1, 1) - 1.0).abs() < 1e-12);
}

#[test]
fn test_cholesky_solve() {
    // A = [[4, 2], [2, 3]], b = [6, 5] -> x = [1, 1]
    let a = Matrix::from_vec(2, 2, vec![4.0, 2.0, 2.0, 3.0])
        .expect("test data has correct dimensions");
    let b = Vector::from_slice(&[6.0, 5.0]);
    let x = a.cholesky_solve(&b).expect("matrix is positive definite");
    assert!((x[0] - 1.0).abs() < 1e-10);
    assert!((x[1] - 1.0).abs() < 1e-10);
}

#[test]
fn test_cholesky_not_positive_definite() {
    let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 2.0, 1.0])
        .expect("test data has correct dimensions");
    assert!(a.cholesky_factor().is_err());
}

#[test]
fn test_cholesky_rejects_nan() {
    let a = Matrix::from_vec(2, 2, vec![f64::NAN, 0.0, 0.0, 1.0])
        .expect("test data has correct dimensions");
    assert!(a.cholesky_factor().is_err());
}

#[test]
fn test_cholesky_inverse() {
    let a = Matrix::from_vec(2, 2, vec![4.0, 2.0, 2.0, 3.0])
        .expect("test data has correct dimensions");
    let inv = a.cholesky_inverse().expect("matrix is positive definite");
    let prod = a.matmul(&inv).expect("shapes match");
    assert!((prod.get(0, 0) - 1.0).abs() < 1e-10);
    assert!((prod.get(0, 1)).abs() < 1e-10);
    assert!((prod.get(1, 0)).abs() < 1e-10);
    assert!((prod.get(1, 1) - 1.0).abs() < 1e-10);
}

#[test]
fn test_log_det_spd() {
    // det([[4, 2], [2, 3]]) = 8
    let a = Matrix::from_vec(2, 2, vec![4.0, 2.0, 2.0, 3.0])
        .expect("test data has correct dimensions");
    let log_det = a.log_det_spd().expect("matrix is positive definite");
    assert!((log_det - 8.0_f64.ln()).abs() < 1e-10);
}

#[test]
fn test_log_det_identity_is_zero() {
    let log_det = Matrix::eye(5).log_det_spd().expect("identity is SPD");
    assert!(log_det.abs() < 1e-12);
}
