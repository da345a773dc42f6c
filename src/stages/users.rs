//! User stage: employees keyed by the source user id, plus their contact
//! details and job code assignments.

use tracing::info;

use crate::error::Result;
use crate::orchestrator::MigrationContext;
use crate::reconcile::ReconciliationEngine;
use crate::source::{SourceCatalog, User};
use crate::stages::Stage;
use crate::target::{Employee, EmployeeEmail, EmployeeJobcode, EmployeePhoneNumber, TargetClient};
use crate::xref::Resolution;

pub fn migrate_users<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    source: &SourceCatalog,
    ctx: &mut MigrationContext,
) -> Result<()> {
    for user in &source.users {
        let employee = engine.find_or_create(
            &mut ctx.counters,
            &engine.query().filter("external_id", &user.id),
            Employee {
                id: None,
                external_id: user.id.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
            },
        )?;
        let employee_id = employee.id()?;

        migrate_contacts(engine, user, &employee_id, ctx)?;
        migrate_assignments(engine, user, &employee_id, ctx)?;

        ctx.xref.employees.insert(&user.id, employee_id)?;
    }

    info!(count = source.users.len(), "Users migrated");
    Ok(())
}

fn migrate_contacts<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    user: &User,
    employee_id: &str,
    ctx: &mut MigrationContext,
) -> Result<()> {
    if let Some(email) = user.email.as_deref().filter(|e| !e.is_empty()) {
        engine.find_or_create(
            &mut ctx.counters,
            &engine.query().filter("employee_id", employee_id),
            EmployeeEmail {
                id: None,
                employee_id: employee_id.to_string(),
                email: email.to_string(),
            },
        )?;
    }

    if let Some(phone) = user.phone.as_deref().filter(|p| !p.is_empty()) {
        engine.find_or_create(
            &mut ctx.counters,
            &engine.query().filter("employee_id", employee_id),
            EmployeePhoneNumber {
                id: None,
                employee_id: employee_id.to_string(),
                number: phone.to_string(),
            },
        )?;
    }

    Ok(())
}

fn migrate_assignments<C: TargetClient>(
    engine: &ReconciliationEngine<'_, C>,
    user: &User,
    employee_id: &str,
    ctx: &mut MigrationContext,
) -> Result<()> {
    for assignment in &user.job_codes {
        let jobcode_id = match ctx
            .xref
            .jobcodes
            .resolve(Some(assignment.job_code_id.as_str()))
            .cloned()
        {
            Resolution::Found(id) => id,
            Resolution::Absent => {
                ctx.warn(
                    Stage::Users,
                    &user.id,
                    format!("job code '{}' was not migrated", assignment.job_code_id),
                );
                continue;
            }
        };

        engine.find_or_create(
            &mut ctx.counters,
            &engine.query().filter("employee_id", employee_id),
            EmployeeJobcode {
                id: None,
                employee_id: employee_id.to_string(),
                jobcode_id,
                pay_rate: assignment.pay_rate,
            },
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::JobCodeAssignment;
    use crate::target::{EntityKind, MemoryTargetClient};
    use rust_decimal::Decimal;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            first_name: "Dana".to_string(),
            last_name: "Reyes".to_string(),
            email: Some("dana@example.com".to_string()),
            phone: Some("".to_string()),
            job_codes: vec![
                JobCodeAssignment {
                    job_code_id: "j1".to_string(),
                    pay_rate: Some(Decimal::new(1550, 2)),
                },
                JobCodeAssignment {
                    job_code_id: "ghost".to_string(),
                    pay_rate: None,
                },
            ],
        }
    }

    #[test]
    fn test_user_with_contacts_and_assignments() {
        let target = MemoryTargetClient::new();
        let engine = ReconciliationEngine::new(&target, 100);
        let mut ctx = MigrationContext::new();
        ctx.xref.jobcodes.insert("j1", "jc-1".to_string()).unwrap();
        let source = SourceCatalog {
            users: vec![user()],
            ..Default::default()
        };

        migrate_users(&engine, &source, &mut ctx).unwrap();

        assert_eq!(ctx.counters.get(EntityKind::Employee), 1);
        assert_eq!(ctx.counters.get(EntityKind::EmployeeEmail), 1);
        assert_eq!(ctx.counters.get(EntityKind::EmployeePhoneNumber), 0);
        assert_eq!(ctx.counters.get(EntityKind::EmployeeJobcode), 1);
        assert_eq!(ctx.warnings.len(), 1);
        assert_eq!(ctx.warnings[0].source_id, "u1");

        let links: Vec<EmployeeJobcode> = target.records();
        assert_eq!(links[0].jobcode_id, "jc-1");
        assert_eq!(links[0].pay_rate, Some(Decimal::new(1550, 2)));
    }

    #[test]
    fn test_employee_matched_by_external_id() {
        let target = MemoryTargetClient::new();
        let engine = ReconciliationEngine::new(&target, 100);
        let source = SourceCatalog {
            users: vec![user()],
            ..Default::default()
        };

        let mut first = MigrationContext::new();
        migrate_users(&engine, &source, &mut first).unwrap();

        let mut renamed = source.clone();
        renamed.users[0].first_name = "Danielle".to_string();
        let mut second = MigrationContext::new();
        migrate_users(&engine, &renamed, &mut second).unwrap();

        assert_eq!(target.count(EntityKind::Employee), 1);
        assert_eq!(second.counters.get(EntityKind::Employee), 0);
    }
}
