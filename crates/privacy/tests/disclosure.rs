//! End-to-end disclosure behaviour as seen by a display collaborator:
//! check the hierarchy first, then ask the guard for displayable fields.

use chrono::NaiveDate;
use edudash_auth::{DEFAULT_ROLE_FALLBACK, Feature, Role, RoleClaim, RoleFallback, RoleHierarchy};
use edudash_core::{MarkId, SubjectId};
use edudash_privacy::seed::demo_guard;
use edudash_privacy::{FieldName, PrivacyError, PrivacyMark, ProtectionType, SeverityLevel};

fn field(name: &str) -> FieldName {
    name.parse().unwrap()
}

#[test]
fn protected_student_first_name_by_role() {
    let guard = demo_guard().unwrap();
    let id = SubjectId::new(2);

    assert_eq!(guard.resolve_field(id, field("firstName"), &RoleClaim::parse("municipal_admin")), "Fatima");
    assert_eq!(guard.resolve_field(id, field("firstName"), &RoleClaim::parse("teacher")), "F****");
}

#[test]
fn unknown_student_is_not_protected() {
    let guard = demo_guard().unwrap();
    let id = SubjectId::new(999);

    assert!(!guard.is_protected(id));
    assert_eq!(guard.resolve_field(id, field("firstName"), &RoleClaim::parse("principal")), "");
}

#[test]
fn dashboard_request_flow() {
    let hierarchy = RoleHierarchy::standard();
    let guard = demo_guard().unwrap();

    // A signed-in user with no role falls back explicitly at the call site.
    let caller = DEFAULT_ROLE_FALLBACK.resolve(None);
    assert_eq!(caller, RoleClaim::Known(Role::RegionalAdmin));
    assert!(Feature::PrivacyMarks.is_accessible(&hierarchy, &caller));

    // Hierarchy access does not imply disclosure.
    let view = guard.resolve_subject(SubjectId::new(5), &caller).unwrap();
    assert!(!view.revealed);
    assert_eq!(view.fields.get(FieldName::PersonalNumber), Some("201006-****"));

    // With the deny fallback the same request gets nothing from the hierarchy
    // and masked data from the guard.
    let anonymous = RoleFallback::Deny.resolve(None);
    assert!(Feature::accessible(&hierarchy, &anonymous).is_empty());
    assert_eq!(guard.resolve_field(SubjectId::new(5), FieldName::FirstName, &anonymous), "E****");
}

#[test]
fn administrative_mark_lifecycle() {
    let guard = demo_guard().unwrap();
    let id = SubjectId::new(31);
    let mark = PrivacyMark {
        id: MarkId::new(),
        subject_id: id,
        protection: ProtectionType::WitnessProtection,
        level: SeverityLevel::High,
        reason: "Witness in ongoing case".to_string(),
        effective_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        expiry_date: NaiveDate::from_ymd_opt(2027, 2, 1),
        authorized_by: "Prosecution authority".to_string(),
        notes: None,
    };

    guard.add_privacy_mark(id, mark.clone()).unwrap();
    assert_eq!(guard.privacy_mark(id), Some(mark.clone()));
    assert!(guard.protected_ids().contains(&id));

    assert!(matches!(guard.add_privacy_mark(id, mark), Err(PrivacyError::DuplicateMark(_))));

    assert!(guard.remove_privacy_mark(id).unwrap());
    assert!(!guard.remove_privacy_mark(id).unwrap());
    assert!(!guard.is_protected(id));
}

#[test]
fn masked_accessor_ignores_clearance_for_every_seeded_subject() {
    let guard = demo_guard().unwrap();
    for id in guard.protected_ids() {
        let subject = guard.protected_subject(id).unwrap();
        for (name, value) in subject.unmasked.iter() {
            assert_ne!(guard.masked_field(id, name), value, "subject {} field {}", id, name);
        }
    }
}
