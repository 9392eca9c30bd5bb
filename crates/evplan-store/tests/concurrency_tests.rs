// Concurrent units of work against one database file

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{add_checklist, add_event, add_user, date, file_store};
use evplan_core::model::{CompletedChecklistItem, Event, Fields, Filter};

#[test]
fn test_update_racing_delete_is_all_or_nothing() {
    for round in 0..10 {
        // Given: One event, an updater and a deleter released together
        let (_dir, store) = file_store();
        let owner = add_user(&store, 700 + round, "Гонщик");
        let event = add_event(&store, owner.id, "Исходное", date(2025, 1, 10));
        let store = Arc::new(store);
        let barrier = Arc::new(Barrier::new(2));

        let updater = {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store
                    .update::<Event>(
                        event.id,
                        &Fields::new()
                            .with("title", "Обновлено")
                            .with("location", "Сочи"),
                    )
                    .unwrap()
            })
        };
        let deleter = {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.delete::<Event>(event.id).unwrap()
            })
        };

        let updated = updater.join().unwrap();
        let deleted = deleter.join().unwrap();

        // Then: The delete always wins in the end and the row is gone
        assert!(deleted);
        assert!(store.find_by_id::<Event>(event.id).unwrap().is_none());

        // And: An update that did run saw the whole change applied
        if let Some(updated) = updated {
            assert_eq!(updated.title, "Обновлено");
            assert_eq!(updated.location.as_deref(), Some("Сочи"));
        }
    }
}

#[test]
fn test_concurrent_marks_leave_one_completion_record() {
    let (_dir, store) = file_store();
    let owner = add_user(&store, 800, "Координатор");
    let helper = add_user(&store, 801, "Помощник");
    let event = add_event(&store, owner.id, "Выставка", date(2025, 3, 15));
    let (_, items) = add_checklist(&store, owner.id, "Подготовка", &["Стенды"]);
    let item_id = items[0].id;

    let store = Arc::new(store);
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = [owner.id, helper.id, owner.id, helper.id]
        .into_iter()
        .map(|user_id| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store
                    .checklists()
                    .mark_item_completed(event.id, item_id, user_id)
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        let mark = handle.join().unwrap();
        assert!(mark.is_completed);
    }

    let marks = store
        .find_all::<CompletedChecklistItem>(
            &Filter::new().eq("event_id", event.id).eq("item_id", item_id),
        )
        .unwrap();
    assert_eq!(marks.len(), 1);
    assert!(marks[0].is_completed);
    assert!(marks[0].completed_at.is_some());
    assert!(matches!(marks[0].completed_by, Some(id) if id == owner.id || id == helper.id));
}
