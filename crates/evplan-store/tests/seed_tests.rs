// Demo contractor seeding

mod common;

use common::{add_category, add_contractor, add_user, memory_store};
use evplan_core::model::{Contractor, ContractorCategory, Filter};
use evplan_store::seed::{seed_demo_contractors, DEMO_CONTRACTORS};

#[test]
fn test_seed_adds_demo_contractors_once() {
    let store = memory_store();
    let owner = add_user(&store, 1200, "Демо");

    let first = seed_demo_contractors(&store, owner.id).unwrap();
    assert_eq!(first.added.len(), DEMO_CONTRACTORS.len());
    assert!(first.skipped.is_empty());

    let second = seed_demo_contractors(&store, owner.id).unwrap();
    assert!(second.added.is_empty());
    assert_eq!(second.skipped.len(), DEMO_CONTRACTORS.len());

    let owned = Filter::new().eq("owner_id", owner.id);
    assert_eq!(store.count::<Contractor>(&owned).unwrap(), 5);
    // Фотографы, Кейтеринг, Ведущие
    assert_eq!(store.count::<ContractorCategory>(&owned).unwrap(), 3);
}

#[test]
fn test_seed_reuses_existing_category_and_skips_existing_contractor() {
    let store = memory_store();
    let owner = add_user(&store, 1201, "Частично");
    let photographers = add_category(&store, owner.id, "Фотографы");
    add_contractor(&store, owner.id, photographers.id, "Иван Петров", "@ivan_photo");

    let report = seed_demo_contractors(&store, owner.id).unwrap();

    assert_eq!(report.skipped, vec!["Иван Петров".to_string()]);
    assert_eq!(report.added.len(), 4);
    let anna = store
        .find_one::<Contractor>(&Filter::new().eq("name", "Анна Смирнова"))
        .unwrap()
        .unwrap();
    assert_eq!(anna.category_id, photographers.id);
}

#[test]
fn test_seed_for_unknown_owner_adds_nothing() {
    let store = memory_store();

    assert!(seed_demo_contractors(&store, 999).is_err());
    assert_eq!(store.count::<ContractorCategory>(&Filter::new()).unwrap(), 0);
}
