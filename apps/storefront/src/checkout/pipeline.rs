//! # Line Stage Pipeline
//!
//! Runs one operation over every cart line, strictly in cart order.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Stage (per line)                               │
//! │                                                                         │
//! │  lines: [A, B, C]                                                       │
//! │                                                                         │
//! │  A ──► stage.apply(A) ── Ok ──► applied                                 │
//! │  B ──► stage.apply(B) ── Err ─┬─ SkipAndContinue ─► skipped, go on to C │
//! │                               └─ AbortAll ────────► stop, aborted=true  │
//! │  C ──► stage.apply(C) ── Ok ──► applied                                 │
//! │                                                                         │
//! │  Nothing already applied is undone.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dailydose_core::{CartItem, ProductId, ValidationError};
use dailydose_db::{DbError, DbResult};

use super::store::OrderStore;

// =============================================================================
// Line Policy
// =============================================================================

/// What the stage does when one line fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinePolicy {
    /// Log the failure, leave that line untouched, keep going.
    #[default]
    SkipAndContinue,
    /// Stop at the first failure.
    AbortAll,
}

impl LinePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LinePolicy::SkipAndContinue => "skip-and-continue",
            LinePolicy::AbortAll => "abort-all",
        }
    }
}

impl fmt::Display for LinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip-and-continue" => Ok(LinePolicy::SkipAndContinue),
            "abort-all" => Ok(LinePolicy::AbortAll),
            _ => Err(ValidationError::NotAllowed {
                field: "line policy".to_string(),
                allowed: vec![
                    LinePolicy::SkipAndContinue.to_string(),
                    LinePolicy::AbortAll.to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Stage
// =============================================================================

/// An operation applied to one cart line.
#[async_trait]
pub trait LineStage: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn apply(&self, line: &CartItem) -> DbResult<()>;
}

/// A line the stage did not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLine {
    pub item_id: ProductId,
    pub reason: String,
}

/// Outcome of running a stage over a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
    pub applied: Vec<ProductId>,
    pub skipped: Vec<SkippedLine>,
    /// Set when [`LinePolicy::AbortAll`] stopped the run.
    pub aborted: bool,
}

impl StageReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && !self.aborted
    }
}

/// Applies `stage` to each line in order under `policy`.
pub async fn run_stage<S>(stage: &S, lines: &[CartItem], policy: LinePolicy) -> StageReport
where
    S: LineStage + ?Sized,
{
    let mut report = StageReport::default();

    for line in lines {
        match stage.apply(line).await {
            Ok(()) => report.applied.push(line.id),
            Err(e) => {
                warn!(
                    stage = stage.name(),
                    item_id = line.id,
                    error = %e,
                    policy = %policy,
                    "Line failed"
                );
                report.skipped.push(SkippedLine {
                    item_id: line.id,
                    reason: e.to_string(),
                });
                if policy == LinePolicy::AbortAll {
                    report.aborted = true;
                    break;
                }
            }
        }
    }

    report
}

// =============================================================================
// Stock Decrement
// =============================================================================

/// Reads a product's stock and writes back `stock - quantity`.
///
/// No floor: stock may go negative. The read and the write are separate
/// calls with no isolation between concurrent checkouts. A result outside
/// the `i64` range fails the line instead of wrapping.
pub struct StockDecrement<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: OrderStore + ?Sized> StockDecrement<'a, S> {
    pub fn new(store: &'a S) -> Self {
        StockDecrement { store }
    }
}

#[async_trait]
impl<S: OrderStore + ?Sized> LineStage for StockDecrement<'_, S> {
    fn name(&self) -> &'static str {
        "stock-decrement"
    }

    async fn apply(&self, line: &CartItem) -> DbResult<()> {
        let stock = self.store.fetch_stock(line.id).await?;
        let remaining = stock.checked_sub(line.quantity).ok_or_else(|| {
            DbError::Internal(format!(
                "stock {} - {} overflows for item {}",
                stock, line.quantity, line.id
            ))
        })?;

        debug!(item_id = line.id, stock, remaining, "Decrementing stock");
        self.store.write_stock(line.id, remaining).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailydose_core::Money;
    use std::sync::Mutex;

    fn line(id: ProductId) -> CartItem {
        CartItem {
            id,
            name: format!("Drink {}", id),
            price: Money::from_minor(500),
            image: String::new(),
            quantity: 1,
        }
    }

    /// Records every call, fails for the ids in `fail`.
    struct Recording {
        fail: Vec<ProductId>,
        seen: Mutex<Vec<ProductId>>,
    }

    impl Recording {
        fn failing(fail: &[ProductId]) -> Self {
            Recording {
                fail: fail.to_vec(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<ProductId> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LineStage for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn apply(&self, line: &CartItem) -> DbResult<()> {
            self.seen.lock().unwrap().push(line.id);
            if self.fail.contains(&line.id) {
                return Err(DbError::Internal(format!("item {}: injected", line.id)));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_skip_and_continue_visits_every_line() {
        let stage = Recording::failing(&[2]);
        let lines = [line(1), line(2), line(3)];

        let report = run_stage(&stage, &lines, LinePolicy::SkipAndContinue).await;

        assert_eq!(stage.seen(), vec![1, 2, 3]);
        assert_eq!(report.applied, vec![1, 3]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].item_id, 2);
        assert!(!report.aborted);
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn test_abort_all_stops_at_first_failure() {
        let stage = Recording::failing(&[2]);
        let lines = [line(1), line(2), line(3)];

        let report = run_stage(&stage, &lines, LinePolicy::AbortAll).await;

        assert_eq!(stage.seen(), vec![1, 2]);
        assert_eq!(report.applied, vec![1]);
        assert!(report.aborted);
    }

    #[tokio::test]
    async fn test_clean_run() {
        let stage = Recording::failing(&[]);
        let report = run_stage(&stage, &[line(4)], LinePolicy::AbortAll).await;

        assert!(report.is_clean());
        assert_eq!(report.applied, vec![4]);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("abort-all".parse::<LinePolicy>().unwrap(), LinePolicy::AbortAll);
        assert_eq!(
            " Skip-And-Continue ".parse::<LinePolicy>().unwrap(),
            LinePolicy::SkipAndContinue
        );
        assert!("retry".parse::<LinePolicy>().is_err());
        assert_eq!(LinePolicy::default(), LinePolicy::SkipAndContinue);
    }
}
