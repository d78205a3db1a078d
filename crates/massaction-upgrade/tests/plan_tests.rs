use massaction_test_utils::{init_tracing, standard_registry, store_with_formats, stored_formats, version_key};
use massaction_upgrade::{
    ConfigStore, FormatReconciler, InMemoryConfigStore, UpgradeError, UpgradePlan, UpgradeStep,
};
use pretty_assertions::assert_eq;

fn plan() -> UpgradePlan {
    UpgradePlan::new(vec![
        UpgradeStep::add(2022100700, "weeks"),
        UpgradeStep::remove(2023050100, "social"),
        UpgradeStep::add(2023050200, "social"),
    ])
    .unwrap()
}

#[test]
fn test_run_applies_steps_in_order() {
    init_tracing();
    let registry = standard_registry();
    let store = store_with_formats("topics,social");
    let reconciler = FormatReconciler::new(&registry, &store);

    let outcome = plan().run(0, &reconciler).unwrap();

    assert_eq!(outcome.applied, vec![2022100700, 2023050100, 2023050200]);
    assert_eq!(outcome.version, 2023050200);
    assert_eq!(stored_formats(&store).as_deref(), Some("topics,weeks,social"));
    assert_eq!(store.value(&version_key()).as_deref(), Some("2023050200"));
}

#[test]
fn test_run_skips_completed_steps() {
    let registry = standard_registry();
    let store = store_with_formats("topics,social");
    let reconciler = FormatReconciler::new(&registry, &store);

    let outcome = plan().run(2023050100, &reconciler).unwrap();

    assert_eq!(outcome.from_version, 2023050100);
    assert_eq!(outcome.applied, vec![2023050200]);
    assert_eq!(stored_formats(&store).as_deref(), Some("topics,social"));
}

#[test]
fn test_run_up_to_date_is_noop() {
    let registry = standard_registry();
    let store = store_with_formats("topics");
    let reconciler = FormatReconciler::new(&registry, &store);

    let outcome = plan().run(2023050200, &reconciler).unwrap();
    assert!(outcome.is_noop());
    assert_eq!(outcome.version, 2023050200);
    assert!(store.value(&version_key()).is_none());
}

#[test]
fn test_run_from_store_resumes_after_savepoint() {
    let registry = standard_registry();
    let store = store_with_formats("topics");
    store.set(&version_key(), "2022100700").unwrap();
    let reconciler = FormatReconciler::new(&registry, &store);

    let outcome = plan().run_from_store(&reconciler).unwrap();
    assert_eq!(outcome.applied, vec![2023050100, 2023050200]);
    assert_eq!(stored_formats(&store).as_deref(), Some("topics,social"));
}

#[test]
fn test_run_from_store_without_savepoint_starts_at_zero() {
    let registry = standard_registry();
    let store = store_with_formats("");
    let reconciler = FormatReconciler::new(&registry, &store);

    let outcome = plan().run_from_store(&reconciler).unwrap();
    assert_eq!(outcome.from_version, 0);
    assert_eq!(outcome.applied.len(), 3);
}

#[test]
fn test_invalid_savepoint_rejected() {
    let registry = standard_registry();
    let store = store_with_formats("");
    store.set(&version_key(), "not-a-version").unwrap();
    let reconciler = FormatReconciler::new(&registry, &store);

    let err = plan().run_from_store(&reconciler).unwrap_err();
    assert!(matches!(err, UpgradeError::InvalidVersion(ref v) if v == "not-a-version"));
}

#[test]
fn test_missing_setting_aborts_first_step() {
    let registry = standard_registry();
    let store = InMemoryConfigStore::new();
    let reconciler = FormatReconciler::new(&registry, &store);

    let err = plan().run(0, &reconciler).unwrap_err();

    assert!(err.is_configuration_missing());
    assert!(matches!(err, UpgradeError::StepFailed { version: 2022100700, .. }));
    assert!(store.value(&version_key()).is_none());
}
