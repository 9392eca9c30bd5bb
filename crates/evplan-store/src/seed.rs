//! Demo data
//!
//! Seeds a fixed set of contractors (with their categories) for one owner.

use evplan_core::model::{Contractor, ContractorCategory, Fields, Filter};
use serde::Serialize;

use crate::errors::Result;
use crate::repo::tx::{add_tx, find_one_tx};
use crate::repo::RecordStore;

/// (name, category, contact)
pub const DEMO_CONTRACTORS: &[(&str, &str, &str)] = &[
    ("Иван Петров", "Фотографы", "@ivan_photo"),
    ("Анна Смирнова", "Фотографы", "+79261234567"),
    ("Вкусный Праздник", "Кейтеринг", "vkusno@email.com"),
    ("Food Masters", "Кейтеринг", "+79169876543"),
    ("Дмитрий Афанасьев", "Ведущие", "@haderen"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}

/// Add the demo contractors for `owner_id`
///
/// Categories are created on first use. A contractor that already exists
/// under the same name and category is skipped, so seeding twice adds
/// nothing. Runs as one write transaction.
pub fn seed_demo_contractors(store: &RecordStore, owner_id: i64) -> Result<SeedReport> {
    store.write(|tx| {
        let mut report = SeedReport::default();

        for (name, category, contact) in DEMO_CONTRACTORS {
            let category_filter = Filter::new()
                .eq("owner_id", owner_id)
                .eq("title", *category);
            let category = match find_one_tx::<ContractorCategory>(tx, &category_filter)? {
                Some(existing) => existing,
                None => add_tx::<ContractorCategory>(
                    tx,
                    &Fields::new()
                        .with("owner_id", owner_id)
                        .with("title", *category),
                )?,
            };

            let contractor_filter = Filter::new()
                .eq("owner_id", owner_id)
                .eq("category_id", category.id)
                .eq("name", *name);
            if find_one_tx::<Contractor>(tx, &contractor_filter)?.is_some() {
                tracing::debug!(name, "Skipped existing contractor");
                report.skipped.push(name.to_string());
                continue;
            }

            add_tx::<Contractor>(
                tx,
                &Fields::new()
                    .with("owner_id", owner_id)
                    .with("category_id", category.id)
                    .with("name", *name)
                    .with("contact", *contact),
            )?;
            tracing::debug!(name, category = %category.title, "Added contractor");
            report.added.push(name.to_string());
        }

        Ok(report)
    })
}
