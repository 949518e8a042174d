use crate::{NewWishlistItem, ResultStore, WishlistItem, document::remove_owned};

use super::{Store, with_read, with_write};

impl Store {
    pub async fn insert_wishlist_item(&self, new: NewWishlistItem) -> ResultStore<u64> {
        let created_at = self.now();
        let ids = self.id_strategy();
        with_write!(self, |doc| {
            let id = ids.next_id(&doc.wishlist);
            doc.wishlist.push(new.into_item(id, created_at));
            (id, true)
        })
    }

    /// The user's wishlist in insertion order.
    pub async fn wishlist(&self, user_id: u64) -> ResultStore<Vec<WishlistItem>> {
        with_read!(self, |doc| {
            doc.wishlist
                .into_iter()
                .filter(|i| i.user_id == user_id)
                .collect()
        })
    }

    pub async fn delete_wishlist_item(&self, id: u64, user_id: u64) -> ResultStore<usize> {
        with_write!(self, |doc| {
            let removed = remove_owned(&mut doc.wishlist, id, user_id);
            (removed, removed > 0)
        })
    }
}
