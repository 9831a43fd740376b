//! Property-based tests for the analysis pipeline
//!
//! Invariants that should hold for ALL inputs:
//! - Order-independence: any permutation of the files yields the same result
//! - Idempotence: analyzing the same input twice is byte-identical
//! - Nesting: nested qualified names never collide across enclosing types
//! - Duplicates: every multiply-declared name yields exactly one error

mod common;

use common::*;
use javagraph_ir::{analyze, DiagnosticKind, EdgeTarget, SourceFile};
use proptest::prelude::*;

fn type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,8}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_result_is_order_independent(files in Just(conflicting_source_set()).prop_shuffle()) {
        let baseline = analyze(&conflicting_source_set(), &sequential_config()).unwrap();
        let shuffled = analyze(&files, &sequential_config()).unwrap();
        prop_assert_eq!(&baseline.edges, &shuffled.edges);
        prop_assert_eq!(&baseline.diagnostics, &shuffled.diagnostics);
        prop_assert_eq!(baseline.to_json().unwrap(), shuffled.to_json().unwrap());
    }

    #[test]
    fn prop_parallel_run_matches_sequential(files in Just(food_source_set()).prop_shuffle()) {
        let sequential = analyze(&files, &sequential_config()).unwrap();
        let parallel = analyze(&files, &javagraph_ir::AnalysisConfig::default()).unwrap();
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn prop_nested_names_do_not_collide(
        (first, second, inner) in (type_name(), type_name(), type_name())
            .prop_filter("distinct names", |(a, b, c)| a != b && a != c && b != c)
    ) {
        let text = format!(
            "package nest;\nclass {first} {{ class {inner} {{}} }}\nclass {second} {{ static class {inner} {{}} }}\n"
        );
        let result = analyze(&[SourceFile::new("nest/Nest.java", text)], &sequential_config()).unwrap();

        let a = format!("nest.{first}.{inner}");
        let b = format!("nest.{second}.{inner}");
        prop_assert!(result.symbols.contains_key(&a));
        prop_assert!(result.symbols.contains_key(&b));
        let expected_enclosing = format!("nest.{first}");
        prop_assert_eq!(result.symbols[&a].enclosing.as_deref(), Some(expected_enclosing.as_str()));
        prop_assert!(result.conflicts.is_empty());
    }

    #[test]
    fn prop_generic_parameters_never_resolve(param in type_name()) {
        let files = vec![
            SourceFile::new(
                "box/Box.java",
                format!("package box;\nclass Box<{param}> {{ {param} item; }}\n"),
            ),
            SourceFile::new(
                format!("box/{param}.java"),
                format!("package box;\nclass {param} {{}}\n"),
            ),
        ];
        let result = analyze(&files, &sequential_config()).unwrap();
        let from_box: Vec<_> = result.edges_from("box.Box").collect();
        prop_assert_eq!(from_box.len(), 1);
        prop_assert_eq!(&from_box[0].to, &EdgeTarget::TypeVariable(param.clone()));
    }

    #[test]
    fn prop_one_error_per_duplicate_name(copies in 2usize..5) {
        let files: Vec<SourceFile> = (0..copies)
            .map(|i| SourceFile::new(format!("copy{i}/Food.java"), "package food;\npublic class Food {}\n"))
            .collect();
        let result = analyze(&files, &sequential_config()).unwrap();
        let duplicates: Vec<_> = result
            .diagnostics_of_kind(DiagnosticKind::DuplicateDeclaration)
            .collect();
        prop_assert_eq!(duplicates.len(), 1);
        prop_assert_eq!(duplicates[0].locations.len(), copies);
        prop_assert!(result.symbols.is_empty());
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let first = analyze(&food_source_set(), &sequential_config()).unwrap();
    let second = analyze(&food_source_set(), &sequential_config()).unwrap();
    assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
}
