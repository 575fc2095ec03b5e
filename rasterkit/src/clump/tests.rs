//! Tests for connected component labeling.

use rand::prelude::*;

use super::*;

fn all_valid(width: usize, height: usize) -> Buffer2<bool> {
    Buffer2::new_filled(width, height, true)
}

/// Reference labeling: union-find over 4-adjacent valid equal-valued pixels.
/// Returns a root per pixel (`usize::MAX` for invalid pixels).
fn reference_components(input: &Buffer2<i32>, valid: &Buffer2<bool>) -> Vec<usize> {
    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    let (width, height) = (input.width(), input.height());
    let mut parent: Vec<usize> = (0..width * height).collect();
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if !valid[idx] {
                continue;
            }
            let mut join = |other: usize| {
                if valid[other] && input[other] == input[idx] {
                    let a = find(&mut parent, idx);
                    let b = find(&mut parent, other);
                    parent[a] = b;
                }
            };
            if x + 1 < width {
                join(idx + 1);
            }
            if y + 1 < height {
                join(idx + width);
            }
        }
    }

    (0..width * height)
        .map(|i| {
            if valid[i] {
                find(&mut parent, i)
            } else {
                usize::MAX
            }
        })
        .collect()
}

#[test]
fn test_three_regions_keep_their_values_as_ids() {
    let input = Buffer2::from_rows(&[[1, 1, 2, 2], [1, 2, 2, 3], [1, 1, 3, 3]]);
    let clumps = label(&input, &all_valid(4, 3), 1).unwrap();

    let expected: Buffer2<u32> = Buffer2::from_rows(&[[1, 1, 2, 2], [1, 2, 2, 3], [1, 1, 3, 3]]);
    assert_eq!(clumps.labels(), &expected);
    assert_eq!(clumps.next_id(), 4);
    assert_eq!(clumps.num_clumps(), 3);
}

#[test]
fn test_invalid_pixels_stay_zero() {
    let input = Buffer2::from_rows(&[[5u8, 5, 5], [5, 5, 5]]);
    let valid = Buffer2::from_rows(&[[true, false, true], [true, false, true]]);
    let clumps = label(&input, &valid, 1).unwrap();

    // the invalid column splits the value-5 area in two
    let expected: Buffer2<u32> = Buffer2::from_rows(&[[1, 0, 2], [1, 0, 2]]);
    assert_eq!(clumps.labels(), &expected);
    assert_eq!(clumps.next_id(), 3);
}

#[test]
fn test_diagonal_neighbours_are_not_connected() {
    let input = Buffer2::from_rows(&[[1, 0], [0, 1]]);
    let clumps = label(&input, &all_valid(2, 2), 1).unwrap();

    let expected: Buffer2<u32> = Buffer2::from_rows(&[[1, 2], [3, 4]]);
    assert_eq!(clumps.labels(), &expected);
    assert_eq!(clumps.next_id(), 5);
}

#[test]
fn test_equal_values_in_separate_regions_get_distinct_ids() {
    let input = Buffer2::from_rows(&[[7, 7, 0, 7], [0, 0, 0, 7]]);
    let clumps = label(&input, &all_valid(4, 2), 1).unwrap();

    let expected: Buffer2<u32> = Buffer2::from_rows(&[[1, 1, 2, 3], [2, 2, 2, 3]]);
    assert_eq!(clumps.labels(), &expected);
}

#[test]
fn test_spiral_is_one_clump() {
    // a single 1-valued path that winds back on itself
    let input = Buffer2::from_rows(&[
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ]);
    let clumps = label(&input, &all_valid(5, 5), 1).unwrap();

    let ones: Vec<u32> = input
        .iter()
        .zip(clumps.labels().iter())
        .filter(|&(&v, _)| v == 1)
        .map(|(_, &l)| l)
        .collect();
    assert!(ones.iter().all(|&l| l == 1));

    // the zeros form one region fenced in by the spiral
    let zeros: Vec<u32> = input
        .iter()
        .zip(clumps.labels().iter())
        .filter(|&(&v, _)| v == 0)
        .map(|(_, &l)| l)
        .collect();
    assert!(zeros.iter().all(|&l| l == 2));
    assert_eq!(clumps.next_id(), 3);
}

#[test]
fn test_start_id_offsets_all_labels() {
    let input = Buffer2::from_rows(&[[1, 2], [1, 2]]);
    let clumps = label(&input, &all_valid(2, 2), 100).unwrap();

    let expected: Buffer2<u32> = Buffer2::from_rows(&[[100, 101], [100, 101]]);
    assert_eq!(clumps.labels(), &expected);
    assert_eq!(clumps.start_id(), 100);
    assert_eq!(clumps.next_id(), 102);
    assert_eq!(clumps.num_clumps(), 2);
}

#[test]
fn test_chained_calls_keep_ids_unique() {
    let first = label(&Buffer2::from_rows(&[[1, 2]]), &all_valid(2, 1), 1).unwrap();
    let second = label(
        &Buffer2::from_rows(&[[3, 3]]),
        &all_valid(2, 1),
        first.next_id(),
    )
    .unwrap();

    assert_eq!(first.labels().pixels(), &[1, 2]);
    assert_eq!(second.labels().pixels(), &[3, 3]);
    assert_eq!(second.next_id(), 4);
}

#[test]
fn test_nothing_valid_returns_start_id() {
    let input = Buffer2::new_filled(4, 4, 9i64);
    let valid = Buffer2::new_filled(4, 4, false);
    let clumps = label(&input, &valid, 5).unwrap();

    assert!(clumps.labels().iter().all(|&l| l == 0));
    assert_eq!(clumps.next_id(), 5);
    assert_eq!(clumps.num_clumps(), 0);
}

#[test]
fn test_empty_raster() {
    let input: Buffer2<u16> = Buffer2::new_default(0, 0);
    let clumps = label(&input, &Buffer2::new_default(0, 0), 1).unwrap();
    assert!(clumps.labels().is_empty());
    assert_eq!(clumps.next_id(), 1);
}

#[test]
fn test_single_row_and_single_column() {
    let row = Buffer2::new(5, 1, vec![1, 1, 2, 2, 1]);
    let clumps = label(&row, &all_valid(5, 1), 1).unwrap();
    assert_eq!(clumps.labels().pixels(), &[1, 1, 2, 2, 3]);

    let column = Buffer2::new(1, 5, vec![1, 1, 2, 2, 1]);
    let clumps = label(&column, &all_valid(1, 5), 1).unwrap();
    assert_eq!(clumps.labels().pixels(), &[1, 1, 2, 2, 3]);
}

#[test]
fn test_shape_mismatch_is_rejected() {
    let input = Buffer2::new_filled(4, 3, 1u8);
    let valid = Buffer2::new_filled(3, 4, true);
    let err = label(&input, &valid, 1).unwrap_err();
    assert_eq!(
        err,
        Error::ShapeMismatch {
            context: "validity mask",
            expected: vec![3, 4],
            actual: vec![4, 3],
        }
    );
}

#[test]
fn test_zero_start_id_is_rejected() {
    let input = Buffer2::new_filled(2, 2, 1u8);
    let err = label(&input, &all_valid(2, 2), 0).unwrap_err();
    assert_eq!(err, Error::InvalidClumpId(0));
}

#[test]
fn test_id_space_exhaustion() {
    let input = Buffer2::from_rows(&[[1, 2]]);

    let last = label(&input.map(|_| 1), &all_valid(2, 1), u32::MAX - 1).unwrap();
    assert_eq!(last.next_id(), u32::MAX);

    let err = label(&input, &all_valid(2, 1), u32::MAX - 1).unwrap_err();
    assert_eq!(
        err,
        Error::ClumpIdOverflow {
            start_id: u32::MAX - 1
        }
    );
}

#[test]
fn test_label_raster_matches_typed_label() {
    let input = Buffer2::from_rows(&[[1i32, 1, 2], [3, 1, 2]]);
    let valid = Buffer2::from_rows(&[[true, true, true], [true, true, false]]);

    let typed = label(&input, &valid, 1).unwrap();
    let dynamic = label_raster(
        &Raster::I32(input.clone().into()),
        &valid.clone().into(),
        1,
    )
    .unwrap();
    assert_eq!(typed, dynamic);
}

#[test]
fn test_label_raster_rejects_non_images() {
    let cube = Raster::U8(BufferN::new_filled(&[2, 2, 2], 0));
    let err = label_raster(&cube, &BufferN::new_filled(&[2, 2, 2], true), 1).unwrap_err();
    assert_eq!(
        err,
        Error::NotImage {
            context: "clump input",
            shape: vec![2, 2, 2],
        }
    );

    let image = Raster::U8(BufferN::new_filled(&[2, 2], 0));
    let err = label_raster(&image, &BufferN::new_filled(&[4], true), 1).unwrap_err();
    assert!(matches!(err, Error::NotImage { context: "validity mask", .. }));

    let err = label_raster(&image, &BufferN::new_filled(&[1, 4], true), 1).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}

#[test]
fn test_label_raster_rejects_floats() {
    let image = Raster::F32(BufferN::new_filled(&[2, 2], 1.0));
    let err = label_raster(&image, &BufferN::new_filled(&[2, 2], true), 1).unwrap_err();
    assert_eq!(
        err,
        Error::NonIntegerType {
            sample_type: crate::sample::SampleType::F32
        }
    );
}

#[test]
fn test_random_rasters_match_reference_components() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let width = rng.random_range(1..24usize);
        let height = rng.random_range(1..24usize);
        let classes = rng.random_range(1..4i32);
        let input = Buffer2::new(
            width,
            height,
            (0..width * height)
                .map(|_| rng.random_range(0..classes))
                .collect(),
        );
        let valid = Buffer2::new(
            width,
            height,
            (0..width * height).map(|_| rng.random_bool(0.8)).collect(),
        );

        let clumps = label(&input, &valid, 1).unwrap();
        let labels = clumps.labels();
        let roots = reference_components(&input, &valid);

        // coverage
        for i in 0..width * height {
            assert_eq!(labels[i] == 0, !valid[i], "pixel {i} coverage");
        }

        // soundness: same reference component <=> same label
        for i in 0..width * height {
            for j in i + 1..width * height {
                if valid[i] && valid[j] {
                    assert_eq!(
                        roots[i] == roots[j],
                        labels[i] == labels[j],
                        "pixels {i} and {j}"
                    );
                }
            }
        }

        // ids appear in increasing order of first occurrence
        let mut expected_next = 1;
        for &l in labels.iter() {
            if l != 0 && l >= expected_next {
                assert_eq!(l, expected_next);
                expected_next += 1;
            }
        }
        assert_eq!(clumps.next_id(), expected_next);
    }
}

#[test]
fn test_clump_sizes_count_pixels_per_label() {
    let input = Buffer2::from_rows(&[[1, 1, 2, 2], [1, 2, 2, 3], [1, 1, 3, 3]]);
    let clumps = label(&input, &all_valid(4, 3), 1).unwrap();

    assert_eq!(clump_sizes(clumps.labels(), 0), vec![0, 5, 4, 3]);
}

#[test]
fn test_clump_sizes_force_null_label_to_zero() {
    let labels: Buffer2<u32> = Buffer2::from_rows(&[[0, 0, 1], [0, 2, 2]]);

    assert_eq!(clump_sizes(&labels, 0), vec![0, 1, 2]);
    assert_eq!(clump_sizes(&labels, 2), vec![3, 1, 0]);
    // a null label outside the table changes nothing
    assert_eq!(clump_sizes(&labels, 10), vec![3, 1, 2]);
}

#[test]
fn test_clump_sizes_table_spans_up_to_highest_id() {
    let input = Buffer2::from_rows(&[[1, 1, 2]]);
    let clumps = label(&input, &all_valid(3, 1), 1000).unwrap();

    let sizes = clump_sizes(clumps.labels(), 0);
    assert_eq!(sizes.len(), 1002);
    assert_eq!(sizes[1000], 2);
    assert_eq!(sizes[1001], 1);
    assert_eq!(sizes.iter().sum::<u64>(), 3);

    // the same counts without the sparse table
    let labels: BufferN<u32> = clumps.labels().clone().into();
    let index = crate::ValueIndex::build(&labels, &[0]).unwrap();
    assert_eq!(index.values(), &[1000, 1001]);
    assert_eq!(index.counts(), &[2, 1]);
}

#[test]
fn test_clump_size_image() {
    let input = Buffer2::from_rows(&[[4, 4, 8], [4, 8, 8]]);
    let valid = Buffer2::from_rows(&[[true, true, true], [false, true, true]]);
    let clumps = label(&input, &valid, 1).unwrap();

    let sizes = clump_size_image(clumps.labels(), 0);
    let expected: Buffer2<u64> = Buffer2::from_rows(&[[2, 2, 3], [0, 3, 3]]);
    assert_eq!(sizes, expected);
}
