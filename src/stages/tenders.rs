//! Tender stage: classify each pay method, reconcile by (truncated)
//! description, and attach it to the manual payment profile.

use tracing::{debug, info};

use crate::error::{MigrationError, Result};
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::SourceCatalog;
use crate::target::{PaymentProfile, PaymentProfileTender, TargetClient, Tender};
use crate::tender::{HeldFlags, TenderClassifier};

/// Payment profile every migrated tender is attached to
pub const MANUAL_PROFILE: &str = "Manual";

pub fn migrate_tenders<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    let profile = engine
        .lookup(&engine.query().search(MANUAL_PROFILE), |p: &PaymentProfile| {
            p.name.eq_ignore_ascii_case(MANUAL_PROFILE)
        })?
        .ok_or_else(|| MigrationError::MissingPaymentProfile(MANUAL_PROFILE.to_string()))?;
    let profile_id = profile
        .id
        .clone()
        .ok_or_else(|| MigrationError::MissingIdentifier {
            kind: "PaymentProfile".to_string(),
        })?;

    let classifier = TenderClassifier::new();

    for pay_method in &source.pay_methods {
        let held = held_flags(engine)?;
        let candidate = classifier.classify(&pay_method.description, held);
        debug!(
            description = %pay_method.description,
            rules = ?classifier.matched_keywords(&pay_method.description),
            kind = ?candidate.kind,
            "Tender classified"
        );

        let query = engine.query().search(&candidate.description);
        let tender = engine.find_or_create(&mut ctx.counters, &query, candidate)?;
        let tender_id = tender.id()?;

        engine.find_or_create(
            &mut ctx.counters,
            &engine.query().filter("tender_id", &tender_id),
            PaymentProfileTender {
                id: None,
                payment_profile_id: profile_id.clone(),
                tender_id: tender_id.clone(),
            },
        )?;

        ctx.xref.tenders.insert(&pay_method.id, tender_id)?;
    }

    info!(count = source.pay_methods.len(), "Tenders migrated");
    Ok(())
}

/// Ask the live target which one-per-system flags are already taken
fn held_flags<C: TargetClient>(engine: &ReconciliationEngine<'_, C>) -> Result<HeldFlags> {
    let change: Vec<Tender> = engine
        .client()
        .query(&engine.query().filter("given_as_change", true))?;
    let primary: Vec<Tender> = engine
        .client()
        .query(&engine.query().filter("is_primary_currency", true))?;

    Ok(HeldFlags {
        given_as_change: !change.is_empty(),
        primary_currency: !primary.is_empty(),
    })
}
