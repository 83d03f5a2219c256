//! Property-based tests for the session, record and lookup stores.
//!
//! Every case runs against a fresh in-memory store with latency disabled.

use proptest::prelude::*;

use verolix::application::{AppState, RECENT_PATIENTS_LIMIT};
use verolix::domain::{Credentials, PatientProfile, RecordDraft, RecordType, Role};
use verolix::tui::Route;
use verolix::VerolixError;

fn fresh_state() -> AppState<verolix::adapters::sqlite::SqliteStore> {
    AppState::in_memory().expect("Should create state")
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Patient), Just(Role::Doctor)]
}

fn kind_strategy() -> impl Strategy<Value = RecordType> {
    prop::sample::select(RecordType::ALL.to_vec())
}

fn email_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}@[a-z]{1,8}\\.[a-z]{2,4}"
}

fn draft_strategy() -> impl Strategy<Value = RecordDraft> {
    (
        kind_strategy(),
        "[A-Za-z][A-Za-z ]{0,19}",
        "20[0-2][0-9]-0[1-9]-[12][0-8]",
        "([A-Za-z. ]{0,12})",
        "([a-z ]{0,24})",
        "[a-z]{1,8}\\.(pdf|png|jpg)",
    )
        .prop_map(|(kind, title, date, doctor, details, file)| RecordDraft {
            kind,
            title,
            date,
            doctor,
            details,
            file_name: Some(file),
        })
}

proptest! {
    /// Any well-formed credentials log in under the chosen role.
    #[test]
    fn login_role_matches_tab(
        email in email_strategy(),
        password in "[A-Za-z0-9]{6,16}",
        role in role_strategy()
    ) {
        let state = fresh_state();
        let user = state.sessions.login(role, &Credentials::new(email.clone(), password))
            .expect("Valid credentials should log in");

        prop_assert_eq!(user.role, role);
        prop_assert_eq!(user.patient_id.is_some(), role == Role::Patient);
        prop_assert_eq!(Some(user), state.sessions.current().expect("Should read"));
    }

    /// Emails without an `@` never create a session.
    #[test]
    fn malformed_email_rejected(
        email in "[a-z.]{1,12}",
        password in "[A-Za-z0-9]{6,16}",
        role in role_strategy()
    ) {
        let state = fresh_state();
        let result = state.sessions.login(role, &Credentials::new(email, password));

        prop_assert!(matches!(result, Err(VerolixError::Validation(_))));
        prop_assert!(state.sessions.current().expect("Should read").is_none());
    }

    /// An accepted upload lands at the end of the list.
    #[test]
    fn add_appends_to_list(drafts in proptest::collection::vec(draft_strategy(), 1..6)) {
        let state = fresh_state();
        state.records.ensure_seeded().expect("Should seed");

        for draft in drafts {
            let before = state.records.count().expect("Should count");
            let added = state.records.add(draft.clone()).expect("Should add");
            let after = state.records.list().expect("Should list");

            prop_assert_eq!(after.len(), before + 1);
            prop_assert_eq!(after.last(), Some(&added));
            prop_assert_eq!(&added.title, &draft.title);
            prop_assert_eq!(added.doctor.is_none(), draft.doctor.is_empty());
        }
    }

    /// Search results are a subset of the list and every hit matches.
    #[test]
    fn search_is_filtering_subset(
        drafts in proptest::collection::vec(draft_strategy(), 0..5),
        term in "[A-Za-z]{0,4}"
    ) {
        let state = fresh_state();
        state.records.ensure_seeded().expect("Should seed");
        for draft in drafts {
            state.records.add(draft).expect("Should add");
        }

        let all = state.records.list().expect("Should list");
        prop_assert_eq!(&state.records.search("").expect("Should search"), &all);

        let hits = state.records.search(&term).expect("Should search");
        prop_assert!(hits.iter().all(|r| all.contains(r)));
        prop_assert!(hits.iter().all(|r| r.matches(&term)));
        prop_assert_eq!(
            hits.len(),
            all.iter().filter(|r| r.matches(&term)).count()
        );
    }

    /// Ids without the patient prefix are never found.
    #[test]
    fn unprefixed_lookup_not_found(raw in "[0-9A-Za-z][0-9A-Za-z-]{0,10}") {
        prop_assume!(!raw.starts_with("PID-"));
        let state = fresh_state();

        let result = state.lookup.find_patient(&raw);
        prop_assert!(matches!(result, Err(VerolixError::PatientNotFound(_))));
        prop_assert!(state.lookup.recent().expect("Should read").is_empty());
    }

    /// The recent cache is bounded, duplicate-free and most recent first.
    #[test]
    fn recent_cache_bounded_and_ordered(
        suffixes in proptest::collection::vec(10000u32..10010, 1..20)
    ) {
        let state = fresh_state();
        let mut expected: Vec<String> = Vec::new();

        for suffix in suffixes {
            let id = format!("PID-{suffix}");
            state.lookup.find_patient(&id).expect("Prefixed id should resolve");
            if !expected.contains(&id) {
                expected.insert(0, id);
                expected.truncate(RECENT_PATIENTS_LIMIT);
            }
        }

        let recent: Vec<String> = state
            .lookup
            .recent()
            .expect("Should read")
            .iter()
            .map(|p| p.patient_id.to_string())
            .collect();

        prop_assert!(recent.len() <= RECENT_PATIENTS_LIMIT);
        let mut deduped = recent.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), recent.len());
        prop_assert_eq!(recent, expected);
    }

    /// After logout every dashboard redirects home.
    #[test]
    fn logout_then_guard_redirects(
        email in email_strategy(),
        role in role_strategy()
    ) {
        let state = fresh_state();
        state.sessions.login(role, &Credentials::new(email, "secret1")).expect("Should log in");

        let session = state.sessions.current().expect("Should read");
        prop_assert_eq!(
            Route::dashboard_for(role).guard(session.as_ref()),
            Route::dashboard_for(role)
        );

        state.sessions.logout().expect("Should log out");
        let session = state.sessions.current().expect("Should read");
        prop_assert_eq!(Route::PatientDashboard.guard(session.as_ref()), Route::Home);
        prop_assert_eq!(Route::DoctorDashboard.guard(session.as_ref()), Route::Home);
    }

    /// A saved profile loads back unchanged, email excepted.
    #[test]
    fn profile_round_trip(
        full_name in "[A-Za-z ]{0,20}",
        phone in "[0-9+ -]{0,14}",
        date_of_birth in "(19[0-9]{2}-0[1-9]-1[0-9])?",
        allergies in "[a-z, ]{0,30}",
        email_override in email_strategy()
    ) {
        let state = fresh_state();
        let user = state
            .sessions
            .login(Role::Patient, &Credentials::new("jane@clinic.org", "secret1"))
            .expect("Should log in");

        let profile = PatientProfile {
            full_name,
            email: email_override,
            phone,
            date_of_birth,
            allergies,
            ..PatientProfile::default()
        };
        state.profiles.save(&user, profile.clone()).expect("Should save");

        let loaded = state.profiles.load(&user).expect("Should load");
        prop_assert_eq!(&loaded.email, "jane@clinic.org");
        prop_assert_eq!(loaded, PatientProfile { email: "jane@clinic.org".to_string(), ..profile });
    }
}
