use crate::{Necessity, NewNecessity, ResultStore, document::remove_owned};

use super::{Store, with_read, with_write};

impl Store {
    pub async fn insert_necessity(&self, new: NewNecessity) -> ResultStore<u64> {
        let created_at = self.now();
        let ids = self.id_strategy();
        with_write!(self, |doc| {
            let id = ids.next_id(&doc.necessities);
            doc.necessities.push(new.into_necessity(id, created_at));
            (id, true)
        })
    }

    pub async fn necessities(&self, user_id: u64) -> ResultStore<Vec<Necessity>> {
        with_read!(self, |doc| {
            doc.necessities
                .into_iter()
                .filter(|n| n.user_id == user_id)
                .collect()
        })
    }

    pub async fn delete_necessity(&self, id: u64, user_id: u64) -> ResultStore<usize> {
        with_write!(self, |doc| {
            let removed = remove_owned(&mut doc.necessities, id, user_id);
            (removed, removed > 0)
        })
    }
}
