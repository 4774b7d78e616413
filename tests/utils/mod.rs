use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use optional::Optioned;
use serde_json::Value;

#[allow(dead_code)] // False alarm
pub mod property_tests;

#[allow(unused_macros)] // False alarm
macro_rules! test_file {
    ($test_mod_name:ident, $fname:expr) => {
        mod $test_mod_name {
            use crate::utils::{self, property_tests};

            fn load_data() -> serde_json::Value {
                utils::load_test_file($fname)
            }

            #[test]
            fn complete_after_extraction() {
                property_tests::test_completeness(&load_data());
            }

            #[test]
            fn normalization_idempotent() {
                property_tests::test_normalize_idempotent(&load_data());
            }

            #[test]
            fn derived_profiles() {
                property_tests::test_derived_profiles(&load_data());
            }

            #[test]
            fn sorted_by_direction() {
                property_tests::test_sorted(&load_data());
            }

            #[test]
            fn fixed_levels_removed() {
                property_tests::test_fixed_levels_removed(&load_data());
            }
        }
    };
}

pub fn load_test_file(fname: &str) -> Value {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);

    let mut f = File::open(&test_path).expect(&format!("Error opening file: {:#?}", test_path));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:#?}", test_path));

    serde_json::from_str(&contents).expect(&format!("Error parsing file: {:#?}", test_path))
}

#[allow(dead_code)] // False alarm
pub fn approx_equal(val1: f64, val2: f64, eps: f64) -> bool {
    assert!(eps > 0.0);

    (val1 - val2).abs() < eps
}

#[allow(dead_code)] // False alarm
pub fn check_profile(vals: &[Optioned<f64>], expected: &[Option<f64>], eps: f64) {
    assert_eq!(vals.len(), expected.len());

    for (i, (val, exp)) in vals.iter().zip(expected).enumerate() {
        match (val.into_option(), *exp) {
            (Some(val), Some(exp)) => assert!(
                approx_equal(val, exp, eps),
                "row {}: {} != {}",
                i,
                val,
                exp
            ),
            (None, None) => {}
            (val, exp) => panic!("row {}: {:?} != {:?}", i, val, exp),
        }
    }
}
