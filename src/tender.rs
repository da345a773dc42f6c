// 🏷️ Tender Classification - Rules as Data
// Ordered keyword rules that turn a pay-method description into tender flags.
//
// Rules are evaluated in list order and every matching rule applies, so a
// later rule can override fields set by an earlier one
// ("Cash Debit" ends up with kind = Debit but keeps the cash flags).

use crate::reconcile::{truncate, TENDER_DESCRIPTION_MAX};
use crate::target::{Tender, TenderKind};

// ============================================================================
// EXISTING FLAGS
// ============================================================================

/// Which one-per-system flags are already held by a tender on the target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldFlags {
    pub given_as_change: bool,
    pub primary_currency: bool,
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

pub struct TenderRule {
    /// Case-insensitive substring to look for in the description
    pub keyword: &'static str,

    /// Effect on the candidate tender
    pub apply: fn(&mut Tender, HeldFlags),
}

impl TenderRule {
    pub fn matches(&self, description: &str) -> bool {
        description.to_lowercase().contains(self.keyword)
    }
}

fn apply_cash(tender: &mut Tender, held: HeldFlags) {
    tender.allow_payouts = true;
    tender.allow_change = true;
    tender.currency_symbol = Some("$".to_string());
    tender.opens_cash_drawer = true;
    tender.kind = TenderKind::Cash;
    // first cash-like tender created wins
    tender.given_as_change = !held.given_as_change;
    tender.is_primary_currency = !held.primary_currency;
}

fn apply_debit(tender: &mut Tender, _held: HeldFlags) {
    tender.allow_cashback = true;
    tender.kind = TenderKind::Debit;
}

fn apply_credit(tender: &mut Tender, _held: HeldFlags) {
    tender.require_signature = true;
    tender.kind = TenderKind::Credit;
}

fn apply_check(tender: &mut Tender, _held: HeldFlags) {
    tender.kind = TenderKind::Check;
}

fn apply_gift(tender: &mut Tender, _held: HeldFlags) {
    tender.kind = TenderKind::Gift;
}

// ============================================================================
// CLASSIFIER
// ============================================================================

pub struct TenderClassifier {
    rules: Vec<TenderRule>,
}

impl TenderClassifier {
    /// Standard rule order: cash, debit, credit, check, gift
    pub fn new() -> Self {
        TenderClassifier {
            rules: vec![
                TenderRule { keyword: "cash", apply: apply_cash },
                TenderRule { keyword: "debit", apply: apply_debit },
                TenderRule { keyword: "credit", apply: apply_credit },
                TenderRule { keyword: "check", apply: apply_check },
                TenderRule { keyword: "gift", apply: apply_gift },
            ],
        }
    }

    /// Build the candidate tender for a pay-method description.
    /// The stored description is cut to the target's field length.
    pub fn classify(&self, description: &str, held: HeldFlags) -> Tender {
        let mut tender = Tender {
            description: truncate(description, TENDER_DESCRIPTION_MAX),
            kind: TenderKind::General,
            ..Default::default()
        };

        for rule in &self.rules {
            if rule.matches(description) {
                (rule.apply)(&mut tender, held);
            }
        }

        tender
    }

    /// Keywords of every rule that fires, in evaluation order
    pub fn matched_keywords(&self, description: &str) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(description))
            .map(|rule| rule.keyword)
            .collect()
    }
}

impl Default for TenderClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
