//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate distinct `KEY=VALUE` make variables the pipeline does not own
    pub fn make_variables() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::btree_map("X_[A-Z0-9_]{1,8}", "[a-z0-9._-]{0,8}", 0..6).prop_map(
            |vars| {
                vars.into_iter()
                    .map(|(key, value)| format!("{key}={value}"))
                    .collect()
            },
        )
    }

    /// Generate a compiler flag string with irregular spacing
    pub fn cflags() -> impl Strategy<Value = String> {
        proptest::collection::vec("-[DOIgf][A-Za-z0-9_=]{0,10}", 0..4)
            .prop_map(|flags| format!("  {}  ", flags.join("   ")))
    }

    /// Generate a board identifier
    pub fn board_name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9_]{0,15}"
    }

    /// Generate a valid display or input driver name
    pub fn driver_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,15}"
    }

    /// Generate a manifest statement
    ///
    /// Single-line calls, calls split over several lines, and indented
    /// blocks, all of which a hand-written manifest may contain.
    pub fn manifest_entry() -> impl Strategy<Value = String> {
        let name = "[a-z][a-z0-9_]{0,10}";
        prop_oneof![
            name.prop_map(|name| format!("module(\"{name}.py\")")),
            proptest::collection::vec(name, 1..4).prop_map(|names| {
                let args: String = names.iter().map(|n| format!("    \"{n}\",\n")).collect();
                format!("freeze(\n{args})")
            }),
            name.prop_map(|name| format!("if True:\n    require(\"{name}\")")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_make_variables_are_distinct(vars in make_variables()) {
            let mut keys: Vec<_> = vars.iter().map(|v| v.split('=').next().unwrap()).collect();
            let before = keys.len();
            keys.dedup();
            prop_assert_eq!(before, keys.len());
        }

        #[test]
        fn test_manifest_entry_is_not_blank(entry in manifest_entry()) {
            prop_assert!(!entry.trim().is_empty());
        }

        #[test]
        fn test_driver_name_is_identifier(name in driver_name()) {
            prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }
}
