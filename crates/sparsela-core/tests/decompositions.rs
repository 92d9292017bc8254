//! Randomized checks of the LU and QR contracts on both storages.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparsela_core::prelude::*;

const TOL: f64 = 1e-9;
const STORAGES: [Storage; 2] = [Storage::Dense, Storage::Sparse];

fn random_matrix(rng: &mut StdRng, m: usize, n: usize, storage: Storage) -> Matrix<f64> {
    Matrix::from_fn(m, n, storage, |_, _| rng.gen_range(-10.0..10.0))
}

/// Random matrix where roughly `density` of the entries are non-zero,
/// plus a dominant diagonal so the square case stays well conditioned.
fn random_sparse(rng: &mut StdRng, n: usize, density: f64, storage: Storage) -> Matrix<f64> {
    Matrix::from_fn(n, n, storage, |i, j| {
        if i == j {
            20.0 + rng.gen_range(0.0..1.0)
        } else if rng.gen_bool(density) {
            rng.gen_range(-1.0..1.0)
        } else {
            0.0
        }
    })
}

fn max_abs_diff(a: &Matrix<f64>, b: &Matrix<f64>) -> f64 {
    assert_eq!(a.shape(), b.shape());
    a.to_arrays()
        .iter()
        .flatten()
        .zip(b.to_arrays().iter().flatten())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn permute_rows(a: &Matrix<f64>, piv: &[usize]) -> Matrix<f64> {
    let rows = a.to_arrays();
    Matrix::from_rows(piv.iter().map(|&p| rows[p].clone()).collect()).unwrap()
}

fn check_lu(a: &Matrix<f64>, pivot: bool) {
    let lu = LuDecomposition::new(a, pivot);
    let (l, u) = (lu.l(), lu.u());
    let (m, n) = a.shape();

    for i in 0..m {
        if i < n {
            assert_eq!(l.get(i, i), 1.0, "L[{i},{i}] not unit");
        }
        for j in (i + 1)..n {
            assert_eq!(l.get(i, j), 0.0, "L[{i},{j}] above diagonal");
        }
    }
    for i in 0..n {
        for j in 0..i {
            assert_eq!(u.get(i, j), 0.0, "U[{i},{j}] below diagonal");
        }
    }

    let mut seen = lu.pivots().to_vec();
    seen.sort_unstable();
    assert_eq!(seen, (0..m).collect::<Vec<_>>(), "pivots are a permutation");

    let err = max_abs_diff(&permute_rows(a, lu.pivots()), &l.matmul(&u).unwrap());
    assert!(err < TOL, "A[piv,:] - LU = {err}");
}

fn check_qr(a: &Matrix<f64>) {
    let qr = QrDecomposition::new(a);
    let (q, r) = (qr.q(), qr.r());
    let n = a.ncols();

    let qtq = q.transpose().matmul(&q).unwrap();
    let err = max_abs_diff(&qtq, &Matrix::identity(n, Storage::Dense));
    assert!(err < TOL, "Q^T Q - I = {err}");

    let err = max_abs_diff(&q.matmul(&r).unwrap(), a);
    assert!(err < TOL, "QR - A = {err}");

    for i in 0..n {
        assert_eq!(r.get(i, i), qr.r_diag()[i]);
        for j in 0..i {
            assert_eq!(r.get(i, j), 0.0);
        }
    }
}

#[test]
fn lu_random_square() {
    let mut rng = StdRng::seed_from_u64(3856);
    for _ in 0..50 {
        for storage in STORAGES {
            let a = random_matrix(&mut rng, 4, 4, storage);
            check_lu(&a, true);
        }
    }
}

#[test]
fn lu_random_without_pivoting() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..20 {
        for storage in STORAGES {
            // diagonally dominant, so no zero pivot appears
            let a = random_sparse(&mut rng, 6, 0.5, storage);
            check_lu(&a, false);
            assert_eq!(LuDecomposition::new(&a, false).pivot_sign(), 1);
        }
    }
}

#[test]
fn lu_random_tall() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        for storage in STORAGES {
            let a = random_matrix(&mut rng, 6, 3, storage);
            check_lu(&a, true);
        }
    }
}

#[test]
fn qr_random_square_and_tall() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        for storage in STORAGES {
            check_qr(&random_matrix(&mut rng, 4, 4, storage));
            check_qr(&random_matrix(&mut rng, 7, 3, storage));
        }
    }
}

#[test]
fn dense_and_sparse_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let dense = random_sparse(&mut rng, 12, 0.2, Storage::Dense);
        let sparse = dense.to_storage(Storage::Sparse);

        let lu_d = LuDecomposition::new(&dense, true);
        let lu_s = LuDecomposition::new(&sparse, true);
        assert_eq!(lu_d.pivots(), lu_s.pivots());
        assert!(max_abs_diff(&lu_d.u(), &lu_s.u()) < 1e-12);
        assert!(max_abs_diff(&lu_d.l(), &lu_s.l()) < 1e-12);

        let qr_d = QrDecomposition::new(&dense);
        let qr_s = QrDecomposition::new(&sparse);
        assert!(max_abs_diff(&qr_d.q(), &qr_s.q()) < 1e-12);
        assert!(max_abs_diff(&qr_d.r(), &qr_s.r()) < 1e-12);
    }
}

#[test]
fn sparse_lu_stores_fewer_slots_for_banded_input() {
    let n = 40;
    let banded = Matrix::from_fn(n, n, Storage::Sparse, |i, j| match i.abs_diff(j) {
        0 => 4.0,
        1 => -1.0,
        _ => 0.0,
    });
    let lu = LuDecomposition::new(&banded, true);
    // a tridiagonal, diagonally dominant matrix factors without fill-in
    assert!(lu.packed().nnz() <= 3 * n);
    check_lu(&banded, true);
}

#[test]
fn singular_inputs_never_fail() {
    for storage in STORAGES {
        // zero row
        let a = Matrix::from_rows(vec![
            vec![1.0, 2.0, 3.0],
            vec![0.0, 0.0, 0.0],
            vec![4.0, 5.0, 6.0],
        ])
        .unwrap()
        .to_storage(storage);
        let u = LuDecomposition::new(&a, true).u();
        assert!((0..3).any(|i| u.get(i, i) == 0.0));

        // zero column
        let b = Matrix::from_rows(vec![
            vec![1.0, 0.0, 2.0],
            vec![3.0, 0.0, 4.0],
            vec![5.0, 0.0, 7.0],
        ])
        .unwrap()
        .to_storage(storage);
        let u = LuDecomposition::new(&b, true).u();
        assert!((0..3).any(|i| u.get(i, i) == 0.0));
        assert!(QrDecomposition::new(&b).r_diag().iter().any(|&d| d == 0.0));
    }
}

#[test]
fn determinant_matches_closed_form() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let a = random_matrix(&mut rng, 3, 3, Storage::Dense);
        let closed = sparsela_core::array::det(&a.to_arrays()).unwrap();
        let via_lu = sparsela_core::linalg::det(&a).unwrap();
        assert!((closed - via_lu).abs() < 1e-8 * closed.abs().max(1.0));
    }
}
