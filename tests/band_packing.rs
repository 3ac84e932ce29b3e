use num_complex::Complex64;
use rand::{rngs::StdRng, Rng, SeedableRng};
use strided_band::{
    BandMatrix, BandMatrixDescriptor, ErrorKind, Layout, Matrix, MatrixDescriptor, Scalar,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_random(rows: usize, cols: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..rows * cols).map(|_| rng.gen::<f64>()).collect()
}

fn make_random_complex(rows: usize, cols: usize, seed: u64) -> Vec<Complex64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..rows * cols)
        .map(|_| Complex64::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect()
}

fn assert_band_eq<T: Scalar>(a: &BandMatrix<'_, T>, b: &BandMatrix<'_, T>) {
    assert_eq!(a.rows(), b.rows());
    assert_eq!(a.columns(), b.columns());
    for i in 0..a.rows() {
        for j in 0..a.columns() {
            assert_eq!(a.get(i, j), b.get(i, j), "mismatch at ({}, {})", i, j);
        }
    }
}

#[test]
fn test_matrix3_fixture() {
    init_logging();
    let data = vec![
        1.1, 1.2, 1.3, 1.4, 1.5, //
        1.6, 1.7, 1.8, 1.9, 2.1, //
        2.2, 2.3, 2.4, 2.5, 2.6, //
        2.7, 2.8, 2.9, 3.1, 3.2,
    ];
    let m = Matrix::new(MatrixDescriptor::packed(4, 5, Layout::RowMajor).unwrap(), &data, 0)
        .unwrap();
    let band = BandMatrix::from_matrix(&m, 2, 1).unwrap();

    let expected = BandMatrixDescriptor::new(4, 5, 2, 1, 4, Layout::RowMajor).unwrap();
    assert_eq!(band.descriptor(), expected);

    let rows: Vec<&[f64]> = band.data().chunks(4).collect();
    assert_eq!(&rows[0][1..], &[1.1, 1.2, 1.3]);
    assert_eq!(rows[1], &[1.6, 1.7, 1.8, 1.9]);
    assert_eq!(rows[2], &[2.3, 2.4, 2.5, 2.6]);
    assert_eq!(&rows[3][..3], &[2.9, 3.1, 3.2]);

    // dropped entries read back as zero
    assert_eq!(band.get(0, 3), 0.0);
    assert_eq!(band.get(3, 0), 0.0);
    assert_eq!(band.get(2, 1), 2.3);
}

#[test]
fn test_layout_invariance_random() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(7);
    for seed in 0..20u64 {
        let rows = rng.gen_range(1..8);
        let cols = rng.gen_range(1..8);
        let ku = rng.gen_range(0..cols);
        let kl = rng.gen_range(0..rows);

        let data = make_random(rows, cols, seed);
        let row = Matrix::new(
            MatrixDescriptor::packed(rows, cols, Layout::RowMajor).unwrap(),
            &data,
            0,
        )
        .unwrap();
        let col_data = row.to_vec(Layout::ColumnMajor);
        let col = Matrix::new(
            MatrixDescriptor::packed(rows, cols, Layout::ColumnMajor).unwrap(),
            &col_data,
            0,
        )
        .unwrap();

        let from_row = BandMatrix::from_matrix(&row, ku, kl).unwrap();
        let from_col = BandMatrix::from_matrix(&col, ku, kl).unwrap();
        assert_eq!(from_row.layout(), Layout::RowMajor);
        assert_eq!(from_col.layout(), Layout::ColumnMajor);
        assert_band_eq(&from_row, &from_col);
    }
}

#[test]
fn test_transpose_of_packed_equals_packed_of_transpose() {
    let (rows, cols, ku, kl) = (6, 4, 1, 3);
    let data = make_random_complex(rows, cols, 11);
    let m = Matrix::new(
        MatrixDescriptor::packed(rows, cols, Layout::RowMajor).unwrap(),
        &data,
        0,
    )
    .unwrap();

    let packed = BandMatrix::from_matrix(&m, ku, kl).unwrap();
    let transposed_packed = packed.transpose();
    let packed_transposed = BandMatrix::from_matrix(&m.transpose(), kl, ku).unwrap();

    assert_eq!(
        transposed_packed.descriptor(),
        packed_transposed.descriptor()
    );
    assert_band_eq(&transposed_packed, &packed_transposed);
}

#[test]
fn test_packed_band_round_trips_through_dense() {
    let (rows, cols) = (5, 7);
    let data = make_random(rows, cols, 3);
    for layout in [Layout::RowMajor, Layout::ColumnMajor] {
        let dense = Matrix::new(MatrixDescriptor::packed(rows, cols, Layout::RowMajor).unwrap(), &data, 0)
            .unwrap()
            .to_vec(layout);
        let m = Matrix::new(MatrixDescriptor::packed(rows, cols, layout).unwrap(), &dense, 0)
            .unwrap();
        let band = BandMatrix::from_matrix(&m, 2, 1).unwrap();
        let unpacked = band.to_dense(layout);
        let u = Matrix::new(MatrixDescriptor::packed(rows, cols, layout).unwrap(), &unpacked, 0)
            .unwrap();
        for i in 0..rows {
            for j in 0..cols {
                let expected = if j + 1 >= i && j <= i + 2 {
                    m.get(i, j)
                } else {
                    0.0
                };
                assert_eq!(u.get(i, j), expected, "({}, {}) {:?}", i, j, layout);
            }
        }
    }
}

#[test]
fn test_packing_does_not_alias_input() {
    let mut data = vec![1.0, 2.0, 3.0, 4.0];
    let band = {
        let m = Matrix::new(MatrixDescriptor::packed(2, 2, Layout::RowMajor).unwrap(), &data, 0)
            .unwrap();
        BandMatrix::from_matrix(&m, 1, 1).unwrap()
    };
    data[0] = 100.0;
    assert_eq!(band.get(0, 0), 1.0);
    assert!(band.is_owned());
}

#[test]
fn test_packing_non_square_wide_and_tall() {
    // wide: 2x6 with ku=5 keeps each full row
    let wide = make_random(2, 6, 21);
    let m = Matrix::new(MatrixDescriptor::packed(2, 6, Layout::RowMajor).unwrap(), &wide, 0)
        .unwrap();
    let band = BandMatrix::from_matrix(&m, 5, 1).unwrap();
    assert_eq!(band.stride(), 7);
    assert_eq!(band.to_dense(Layout::RowMajor), wide);

    // tall: 6x2 column-major with kl=5
    let tall = make_random(6, 2, 22);
    let m = Matrix::new(MatrixDescriptor::packed(6, 2, Layout::ColumnMajor).unwrap(), &tall, 0)
        .unwrap();
    let band = BandMatrix::from_matrix(&m, 1, 5).unwrap();
    assert_eq!(band.to_dense(Layout::ColumnMajor), tall);

    let err = BandMatrix::from_matrix(&m, 2, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_packing_rows_outside_column_range() {
    init_logging();
    // 5x2 row-major diagonal: working rows 2..5 are pure padding
    let tall = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let m = Matrix::new(MatrixDescriptor::packed(5, 2, Layout::RowMajor).unwrap(), &tall, 0)
        .unwrap();
    let band = BandMatrix::from_matrix(&m, 0, 0).unwrap();
    assert_eq!(band.data(), &[1.0, 4.0, 0.0, 0.0, 0.0]);
    assert_eq!(
        band.to_dense(Layout::RowMajor),
        vec![1.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
    );

    // 2x5 column-major diagonal: flipped into a 5x2 working frame
    let wide = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let m = Matrix::new(MatrixDescriptor::packed(2, 5, Layout::ColumnMajor).unwrap(), &wide, 0)
        .unwrap();
    let band = BandMatrix::from_matrix(&m, 0, 0).unwrap();
    assert_eq!(band.layout(), Layout::ColumnMajor);
    assert_eq!((band.rows(), band.columns()), (2, 5));
    assert_eq!(band.data(), &[1.0, 4.0, 0.0, 0.0, 0.0]);
    assert_eq!(
        band.to_dense(Layout::ColumnMajor),
        vec![1.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
    );
    assert_eq!(band.get(1, 1), 4.0);
    assert_eq!(band.get(1, 3), 0.0);
}
