//! Order identifiers.
//!
//! Two independent schemes exist:
//!
//! | Code            | Example              | Persisted | Shown on receipt |
//! |-----------------|----------------------|-----------|------------------|
//! | order code      | `ORD-1718000000000-42` | yes     | no               |
//! | display number  | `BB-48213`           | no        | yes              |
//!
//! Neither is checked for collisions.

use rand::Rng;

/// `"ORD-" + unix millis + "-" + 0..=999`.
pub fn generate_order_code<R: Rng + ?Sized>(now_millis: i64, rng: &mut R) -> String {
    format!("ORD-{}-{}", now_millis, rng.gen_range(0..=999))
}

/// `"BB-" + 10000..=99999`.
pub fn generate_display_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("BB-{}", rng.gen_range(10_000..=99_999))
}
