//! Static catalog of membership plans.
//!
//! The catalog is a fixed table known at compile time; the only place a plan
//! string is allowed to miss is the renewal-price fallback used by the
//! statistics aggregator.

/// Plan value marking a member who enrolled but has not paid their first
/// recurring fee.
pub const ADMISSION_PENDING_PLAN: &str = "Admission Fee Pending";

/// The base recurring plan an admission payment promotes a member into.
pub const BASE_PLAN: &str = "1 Month";

/// What an admission payment actually charges. Deliberately distinct from the
/// 600-rupee sticker price on the "Admission Fee Pending" catalog entry:
/// product rule, confirmed against the original fee schedule.
pub const ADMISSION_FEE: i64 = 800;

/// One row of the plan catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntry {
    /// Plan identifier as stored on members and payments.
    pub value: &'static str,
    /// Whole months added to coverage when this plan is paid for.
    pub duration_months: u32,
    /// Price in whole rupees.
    pub amount: i64,
}

/// Every plan the gym sells, the admission-pending sentinel included.
pub const PLAN_CATALOG: &[PlanEntry] = &[
    PlanEntry { value: ADMISSION_PENDING_PLAN, duration_months: 0, amount: 600 },
    PlanEntry { value: "1 Month", duration_months: 1, amount: 600 },
    PlanEntry { value: "2 Months", duration_months: 2, amount: 1200 },
    PlanEntry { value: "3 Months", duration_months: 3, amount: 1800 },
    PlanEntry { value: "3+2 Months", duration_months: 5, amount: 2999 },
    PlanEntry { value: "6+3 Months", duration_months: 9, amount: 3999 },
    PlanEntry { value: "9+3 Months", duration_months: 12, amount: 5499 },
];

/// Look up a catalog entry by its plan value.
pub fn lookup(value: &str) -> Option<&'static PlanEntry> {
    PLAN_CATALOG.iter().find(|entry| entry.value == value)
}

/// True for the admission-pending sentinel value.
pub fn is_admission_pending(value: &str) -> bool {
    value == ADMISSION_PENDING_PLAN
}

/// The recurring plans a paying member can renew into (everything except the
/// admission-pending sentinel).
pub fn recurring_plans() -> impl Iterator<Item = &'static PlanEntry> {
    PLAN_CATALOG
        .iter()
        .filter(|entry| entry.duration_months > 0)
}

/// Expected renewal price for a member's current plan.
///
/// Unrecognized plan strings (hand-edited data, imports) fall back to the
/// "1 Month" price rather than failing the whole statistics fold.
pub fn renewal_price(plan: &str) -> i64 {
    match lookup(plan) {
        Some(entry) if entry.duration_months > 0 => entry.amount,
        _ => lookup(BASE_PLAN)
            .map(|entry| entry.amount)
            .unwrap_or(600),
    }
}
