use std::time::Instant;

use evplan_core::log_op_start;
use evplan_core::model::{Filter, Kind, User, UserWithEvents};

use crate::errors::Result;
use crate::queries::events::by_owner_tx;
use crate::repo::record_store::{finish, Outcome};
use crate::repo::tx::find_one_tx;
use crate::repo::RecordStore;

pub struct UserQueries<'a> {
    store: &'a RecordStore,
}

impl<'a> UserQueries<'a> {
    pub(crate) fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// User by chat account id, together with the events they own (by date)
    pub fn find_with_events(&self, telegram_id: i64) -> Result<Option<UserWithEvents>> {
        let started = Instant::now();
        log_op_start!("find_with_events", kind = User::NAME);
        let result = self.store.read(|tx| {
            let filter = Filter::new().eq("telegram_id", telegram_id);
            match find_one_tx::<User>(tx, &filter)? {
                Some(user) => {
                    let events = by_owner_tx(tx, user.id)?;
                    Ok(Some(UserWithEvents { user, events }))
                }
                None => Ok(None),
            }
        });
        finish("find_with_events", User::NAME, started, result, |r| {
            Outcome::Found(r.is_some())
        })
    }
}
