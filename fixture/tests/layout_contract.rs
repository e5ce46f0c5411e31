use std::fs;

use fixture::{encode_parties, run, FixtureError, ParamError, RawShape, ScenarioParams, ValueRange};
use proptest::prelude::*;
use textrow::parse_rows;

fn encode(
    shape: RawShape,
    bits: i64,
    signed: Option<bool>,
    seed: i64,
) -> (ValueRange, Vec<Vec<u8>>) {
    let mut params = ScenarioParams::new(shape);
    params.bits = bits;
    params.signed = signed;
    params.seed = seed;
    let config = params.validate().unwrap();
    (config.range(), encode_parties(&config).unwrap())
}

#[test]
fn ltz_is_one_value_per_line() {
    let (range, files) = encode(RawShape::Ltz { len: 100 }, 16, None, 42);
    assert_eq!(files.len(), 1);
    let parsed = parse_rows(&files[0]).unwrap();
    assert_eq!(parsed.rows.len(), 100);
    assert_eq!(parsed.uniform_width(), Some(1));
    assert!(parsed.trailing_newline);
    assert_eq!(range, ValueRange { lo: -32_768, hi: 32_767 });
    assert!(parsed.values().any(|v| v < 0), "sign test needs negatives");
}

#[test]
fn conv_shape_fidelity() {
    let (_, files) = encode(
        RawShape::Conv {
            a_rows: 6,
            a_cols: 9,
            w_dim: 3,
        },
        16,
        None,
        5,
    );
    let a = parse_rows(&files[0]).unwrap();
    let w = parse_rows(&files[1]).unwrap();
    assert_eq!(a.rows.len(), 6);
    assert_eq!(a.uniform_width(), Some(9));
    assert_eq!(w.rows.len(), 3);
    assert_eq!(w.uniform_width(), Some(3));
}

#[test]
fn linear_shape_fidelity() {
    let n = 7;
    let (_, files) = encode(RawShape::Linear { n }, 16, None, 11);
    let x = parse_rows(&files[0]).unwrap();
    assert_eq!(x.row_widths(), vec![7]);

    let wb = parse_rows(&files[1]).unwrap();
    assert_eq!(wb.rows.len(), 8);
    assert_eq!(wb.uniform_width(), Some(7));
}

#[test]
fn lines_have_single_spaces_and_newline_endings() {
    let (_, files) = encode(RawShape::Linear { n: 4 }, 16, Some(true), 8);
    for bytes in &files {
        let text = std::str::from_utf8(bytes).unwrap();
        assert!(text.ends_with('\n'));
        assert!(!text.contains('\r'));
        for line in text.lines() {
            assert!(!line.starts_with(' '));
            assert!(!line.ends_with(' '));
            assert!(!line.contains("  "));
        }
    }
}

#[test]
fn invalid_kernel_leaves_existing_files_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let p0 = tmp.path().join("Input-P0-0");
    let p1 = tmp.path().join("Input-P1-0");
    fs::write(&p0, b"keep me\n").unwrap();

    let mut params = ScenarioParams::new(RawShape::Conv {
        a_rows: 4,
        a_cols: 4,
        w_dim: 5,
    });
    params.output.dir = tmp.path().to_path_buf();

    let err = run(&params).unwrap_err();
    assert!(matches!(
        err,
        FixtureError::InvalidParameter(ParamError::KernelExceedsInput {
            w_dim: 5,
            a_rows: 4,
            a_cols: 4
        })
    ));
    assert_eq!(fs::read(&p0).unwrap(), b"keep me\n");
    assert!(!p1.exists());
}

#[test]
fn aliased_party_files_are_rejected_before_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let mut params = ScenarioParams::new(RawShape::Linear { n: 3 });
    params.output.dir = tmp.path().to_path_buf();
    params.output.p0_file = "Input".to_string();
    params.output.p1_file = Some("./Input".to_string());

    let err = run(&params).unwrap_err();
    assert!(matches!(
        err,
        FixtureError::InvalidParameter(ParamError::DuplicateOutputPath { .. })
    ));
    assert!(!tmp.path().join("Input").exists());
}

#[test]
fn invalid_bits_creates_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("Player-Data");
    let mut params = ScenarioParams::new(RawShape::Ltz { len: 10 });
    params.output.dir = out.clone();
    params.bits = 32;

    assert!(run(&params).is_err());
    assert!(!out.exists());
}

fn shape_strategy() -> impl Strategy<Value = RawShape> {
    prop_oneof![
        (1i64..64).prop_map(|len| RawShape::Ltz { len }),
        (1i64..12, 1i64..12, 1i64..12).prop_map(|(a_rows, a_cols, k)| RawShape::Conv {
            a_rows,
            a_cols,
            w_dim: 1 + (k - 1) % a_rows.min(a_cols),
        }),
        (1i64..12).prop_map(|n| RawShape::Linear { n }),
    ]
}

proptest! {
    #[test]
    fn prop_values_stay_in_range(
        shape in shape_strategy(),
        bits in 1i64..=31,
        signed in any::<bool>(),
        seed in any::<i64>(),
    ) {
        let (range, files) = encode(shape, bits, Some(signed), seed);
        for bytes in &files {
            let parsed = parse_rows(bytes).unwrap();
            for value in parsed.values() {
                prop_assert!(range.contains(value), "{} outside {}", value, range);
            }
        }
    }

    #[test]
    fn prop_encoding_is_deterministic(
        shape in shape_strategy(),
        bits in 1i64..=31,
        seed in any::<i64>(),
    ) {
        let (_, first) = encode(shape, bits, None, seed);
        let (_, second) = encode(shape, bits, None, seed);
        prop_assert_eq!(first, second);
    }
}
