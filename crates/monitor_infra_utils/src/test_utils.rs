use assert_json_diff::{assert_json_matches_no_panic, CompareMode, Config};
use serde::Serialize;

/// Compare two JSON values for an exact match.
///
/// Extends the functionality of [`assert_json_diff::assert_json_eq`] by also adding a customizable
/// error message print. Uses [`assert_json_matches_no_panic`].
pub fn assert_json_eq<Lhs, Rhs>(lhs: &Lhs, rhs: &Rhs, message: String)
where
    Lhs: Serialize,
    Rhs: Serialize,
{
    if let Err(error) = assert_json_matches_no_panic(lhs, rhs, Config::new(CompareMode::Strict)) {
        let printed_error = format!("\n\n{}\n{}\n\n", message, error);
        panic!("{}", printed_error);
    }
}

/// Like [`assert_json_eq`], but only the fields present in `expected` are compared.
pub fn assert_json_includes<Actual, Expected>(actual: &Actual, expected: &Expected, message: String)
where
    Actual: Serialize,
    Expected: Serialize,
{
    if let Err(error) =
        assert_json_matches_no_panic(actual, expected, Config::new(CompareMode::Inclusive))
    {
        let printed_error = format!("\n\n{}\n{}\n\n", message, error);
        panic!("{}", printed_error);
    }
}
