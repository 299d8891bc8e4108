// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use betbuddies::SubmissionPlan;
use betbuddies_audit::{AuditEvent, SUBMIT_CARD_ACTION};
use betbuddies_domain::{CardScope, Event};

use crate::tests::{
    create_test_event, create_test_league, create_test_persistence, create_test_scope,
    home_moneyline, plan_submission, test_now,
};
use crate::{Persistence, PersistenceError, SubmissionOutcome};

#[test]
fn test_submission_writes_activity_record() {
    let mut persistence: Persistence = create_test_persistence();
    let league_id: i64 = create_test_league(&mut persistence).league_id().unwrap();
    let event: Event = create_test_event("g1", 5);
    persistence.upsert_events(&[event.clone()]).unwrap();
    let scope: CardScope = create_test_scope(league_id);

    let plan: SubmissionPlan =
        plan_submission(&mut persistence, &scope, vec![home_moneyline(&event)], test_now());
    let outcome: SubmissionOutcome = persistence.submit_card(&plan, test_now()).unwrap();

    let stored: AuditEvent = persistence.get_audit_event(outcome.audit_event_id).unwrap();

    assert_eq!(stored.event_id, Some(outcome.audit_event_id));
    assert_eq!(stored.action.name, SUBMIT_CARD_ACTION);
    assert_eq!(stored.actor.id, "member-1");
    assert_eq!(stored.scope.league_id, league_id);
    assert_eq!(stored.scope.week_number, 2);
    assert_eq!(stored.created_at, test_now());
    assert_eq!(stored.before, plan.audit_event.before);
    assert_eq!(stored.after, plan.audit_event.after);
}

#[test]
fn test_recent_activity_newest_first_and_limited() {
    let mut persistence: Persistence = create_test_persistence();
    let league_id: i64 = create_test_league(&mut persistence).league_id().unwrap();
    let event: Event = create_test_event("g1", 5);
    persistence.upsert_events(&[event.clone()]).unwrap();
    let scope: CardScope = create_test_scope(league_id);

    let mut ids: Vec<i64> = Vec::new();
    for _ in 0..3 {
        let plan: SubmissionPlan =
            plan_submission(&mut persistence, &scope, vec![home_moneyline(&event)], test_now());
        ids.push(
            persistence
                .submit_card(&plan, test_now())
                .unwrap()
                .audit_event_id,
        );
    }

    let recent: Vec<AuditEvent> = persistence.get_recent_activity(league_id, 2).unwrap();
    let recent_ids: Vec<Option<i64>> = recent.iter().map(|event| event.event_id).collect();

    assert_eq!(recent_ids, vec![Some(ids[2]), Some(ids[1])]);
}

#[test]
fn test_get_missing_audit_event() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<AuditEvent, PersistenceError> = persistence.get_audit_event(7);

    assert!(matches!(result, Err(PersistenceError::AuditEventNotFound(7))));
}
