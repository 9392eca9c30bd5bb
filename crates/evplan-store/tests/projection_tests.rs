// Composed read projections and the checklist helpers

mod common;

use common::{
    add_category, add_checklist, add_contractor, add_event, add_user, date, memory_store,
};
use evplan_core::errors::ExErrorKind;
use evplan_core::model::{
    ChecklistItem, CompletedChecklistItem, EventChecklist, EventContractor, EventProjection,
    EventRelation, Fields, Filter, Task,
};

#[test]
fn test_user_with_events_by_date() {
    let store = memory_store();
    let owner = add_user(&store, 900, "Елена");
    let other = add_user(&store, 901, "Чужой");
    let autumn = add_event(&store, owner.id, "Осень", date(2025, 10, 1));
    let spring = add_event(&store, owner.id, "Весна", date(2025, 4, 1));
    add_event(&store, other.id, "Не моё", date(2025, 1, 1));

    let loaded = store.users().find_with_events(900).unwrap().unwrap();

    assert_eq!(loaded.user, owner);
    let ids: Vec<i64> = loaded.events.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![spring.id, autumn.id]);
}

#[test]
fn test_user_with_events_absent_user() {
    let store = memory_store();
    assert!(store.users().find_with_events(12345).unwrap().is_none());
}

#[test]
fn test_events_by_owner_and_on_date() {
    let store = memory_store();
    let owner = add_user(&store, 902, "Глеб");
    let a = add_event(&store, owner.id, "Б", date(2025, 6, 1));
    let b = add_event(&store, owner.id, "А", date(2025, 6, 1));
    let c = add_event(&store, owner.id, "Раньше", date(2025, 5, 1));

    let summaries = store.events().by_owner(owner.id).unwrap();
    let ids: Vec<i64> = summaries.iter().map(|e| e.id).collect();
    // Same date keeps insertion order
    assert_eq!(ids, vec![c.id, a.id, b.id]);
    assert_eq!(summaries[0].title, "Раньше");

    let on_june_first = store.events().on_date(date(2025, 6, 1)).unwrap();
    assert_eq!(on_june_first, vec![a, b]);
    assert!(store.events().on_date(date(2030, 1, 1)).unwrap().is_empty());
}

#[test]
fn test_details_honour_projection() {
    // Given: An event with one task, contractor, checklist and completion
    let store = memory_store();
    let owner = add_user(&store, 903, "Вика");
    let event = add_event(&store, owner.id, "Свадьба", date(2025, 8, 16));
    store
        .add::<Task>(
            &Fields::new()
                .with("event_id", event.id)
                .with("title", "Выбрать платье")
                .with("date", date(2025, 7, 1)),
        )
        .unwrap();
    let category = add_category(&store, owner.id, "Фотографы");
    let photographer = add_contractor(&store, owner.id, category.id, "Иван Петров", "@ivan_photo");
    store
        .add::<EventContractor>(
            &Fields::new()
                .with("event_id", event.id)
                .with("contractor_id", photographer.id)
                .with("cost", "40000"),
        )
        .unwrap();
    let (checklist, items) = add_checklist(&store, owner.id, "Банкет", &["Меню", "Рассадка"]);
    store
        .add::<EventChecklist>(
            &Fields::new()
                .with("event_id", event.id)
                .with("checklist_id", checklist.id)
                .with("is_completed", false),
        )
        .unwrap();
    store
        .checklists()
        .mark_item_completed_on(event.id, items[0].id, owner.id, date(2025, 8, 1))
        .unwrap();

    // When: Only tasks and contractors are requested
    let projection: EventProjection = [EventRelation::Tasks, EventRelation::Contractors]
        .into_iter()
        .collect();
    let details = store
        .events()
        .with_details(event.id, &projection)
        .unwrap()
        .unwrap();

    // Then: Exactly those collections are loaded
    assert_eq!(details.event, event);
    assert_eq!(details.tasks.as_ref().map(Vec::len), Some(1));
    let contractors = details.contractors.unwrap();
    assert_eq!(contractors.len(), 1);
    assert_eq!(contractors[0].name, "Иван Петров");
    assert_eq!(contractors[0].cost.as_deref(), Some("40000"));
    assert!(details.checklists.is_none());
    assert!(details.completed_items.is_none());

    // When: Everything is requested
    let full = store
        .events()
        .with_details(event.id, &EventProjection::all())
        .unwrap()
        .unwrap();
    let checklists = full.checklists.unwrap();
    assert_eq!(checklists.len(), 1);
    assert_eq!(checklists[0].title, "Банкет");
    assert!(!checklists[0].is_completed);
    let completed = full.completed_items.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].title, "Меню");
    assert_eq!(completed[0].completed_at, Some(date(2025, 8, 1)));
}

#[test]
fn test_details_absent_event() {
    let store = memory_store();
    let details = store
        .events()
        .with_details(77, &EventProjection::all())
        .unwrap();
    assert!(details.is_none());
}

#[test]
fn test_projections_empty_when_no_related_rows() {
    let store = memory_store();
    let owner = add_user(&store, 904, "Пустой");
    let event = add_event(&store, owner.id, "Тихий вечер", date(2025, 2, 14));

    assert!(store.tasks().for_event(event.id).unwrap().is_empty());
    assert!(store.contractors().for_event(event.id).unwrap().is_empty());
    assert!(store.checklists().for_event(event.id).unwrap().is_empty());
    assert!(store.checklists().completed_items(event.id).unwrap().is_empty());
    assert!(store.contractors().by_owner(owner.id).unwrap().is_empty());
    assert!(store
        .contractors()
        .categories_by_owner(owner.id)
        .unwrap()
        .is_empty());

    let details = store
        .events()
        .with_details(event.id, &EventProjection::all())
        .unwrap()
        .unwrap();
    assert_eq!(details.tasks, Some(Vec::new()));
    assert_eq!(details.contractors, Some(Vec::new()));
}

#[test]
fn test_contractors_by_owner_joined_with_category() {
    let store = memory_store();
    let owner = add_user(&store, 905, "Марк");
    let catering = add_category(&store, owner.id, "Кейтеринг");
    let hosts = add_category(&store, owner.id, "Ведущие");
    add_contractor(&store, owner.id, catering.id, "Вкусный Праздник", "vkusno@email.com");
    add_contractor(&store, owner.id, hosts.id, "Дмитрий Афанасьев", "@haderen");
    add_contractor(&store, owner.id, catering.id, "Food Masters", "+79169876543");

    let contractors = store.contractors().by_owner(owner.id).unwrap();
    let names: Vec<&str> = contractors.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Food Masters", "Вкусный Праздник", "Дмитрий Афанасьев"]);
    assert_eq!(contractors[0].category, "Кейтеринг");
    assert_eq!(contractors[2].category, "Ведущие");

    let categories = store.contractors().categories_by_owner(owner.id).unwrap();
    let titles: Vec<&str> = categories.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Кейтеринг", "Ведущие"]);
}

#[test]
fn test_tasks_for_event_by_date() {
    let store = memory_store();
    let owner = add_user(&store, 906, "Зоя");
    let event = add_event(&store, owner.id, "Переезд", date(2025, 9, 30));
    for (title, day) in [("Коробки", 20), ("Грузчики", 10), ("Ключи", 29)] {
        store
            .add::<Task>(
                &Fields::new()
                    .with("event_id", event.id)
                    .with("title", title)
                    .with("date", date(2025, 9, day)),
            )
            .unwrap();
    }

    let titles: Vec<String> = store
        .tasks()
        .for_event(event.id)
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["Грузчики", "Коробки", "Ключи"]);
}

#[test]
fn test_mark_item_completed_overwrites_existing_mark() {
    let store = memory_store();
    let owner = add_user(&store, 907, "Анна");
    let helper = add_user(&store, 908, "Борис");
    let event = add_event(&store, owner.id, "Праздник", date(2025, 12, 31));
    let (_, items) = add_checklist(&store, owner.id, "Ёлка", &["Гирлянды"]);

    store
        .add::<CompletedChecklistItem>(
            &Fields::new()
                .with("event_id", event.id)
                .with("item_id", items[0].id)
                .with("is_completed", false),
        )
        .unwrap();

    let mark = store
        .checklists()
        .mark_item_completed_on(event.id, items[0].id, helper.id, date(2025, 12, 30))
        .unwrap();

    assert!(mark.is_completed);
    assert_eq!(mark.completed_by, Some(helper.id));
    assert_eq!(mark.completed_at, Some(date(2025, 12, 30)));
    assert_eq!(
        store
            .count::<CompletedChecklistItem>(&Filter::new().eq("event_id", event.id))
            .unwrap(),
        1
    );
}

#[test]
fn test_mark_unknown_item_is_constraint_violation() {
    let store = memory_store();
    let owner = add_user(&store, 909, "Ян");
    let event = add_event(&store, owner.id, "Встреча", date(2025, 5, 5));

    let err = store
        .checklists()
        .mark_item_completed(event.id, 4242, owner.id)
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(err.op(), Some("mark_item_completed"));
}

#[test]
fn test_delete_items_removes_items_and_their_marks() {
    let store = memory_store();
    let owner = add_user(&store, 910, "Ольга");
    let event = add_event(&store, owner.id, "Поход", date(2025, 7, 12));
    let (checklist, items) = add_checklist(&store, owner.id, "Снаряжение", &["Палатка", "Котелок"]);
    let (other, _) = add_checklist(&store, owner.id, "Еда", &["Крупа"]);
    store
        .checklists()
        .mark_item_completed(event.id, items[1].id, owner.id)
        .unwrap();

    let removed = store.checklists().delete_items(checklist.id).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(
        store
            .count::<ChecklistItem>(&Filter::new().eq("checklist_id", checklist.id))
            .unwrap(),
        0
    );
    assert_eq!(
        store
            .count::<ChecklistItem>(&Filter::new().eq("checklist_id", other.id))
            .unwrap(),
        1
    );
    assert!(store.checklists().completed_items(event.id).unwrap().is_empty());
    assert_eq!(store.checklists().delete_items(checklist.id).unwrap(), 0);
}
