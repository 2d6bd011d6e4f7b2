//! Closed-form cross-check for computed sums

use serde::Serialize;

use crate::reducer::Range;

/// `(b(b+1) - (a-1)a) / 2`, the exact sum of `[a, b]`
pub fn closed_form_sum(range: Range) -> i128 {
    let a = i128::from(range.from());
    let b = i128::from(range.to());
    (b * (b + 1) - (a - 1) * a) / 2
}

/// Outcome of comparing a computed sum against the closed form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub from: i64,
    pub to: i64,
    #[serde(serialize_with = "as_string")]
    pub computed: i128,
    #[serde(serialize_with = "as_string")]
    pub expected: i128,
    pub matches: bool,
}

impl Verification {
    pub fn check(range: Range, computed: i128) -> Self {
        let expected = closed_form_sum(range);
        Self {
            from: range.from(),
            to: range.to(),
            computed,
            expected,
            matches: computed == expected,
        }
    }
}

// serde_json::Value cannot hold integers wider than 64 bits
fn as_string<S: serde::Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
