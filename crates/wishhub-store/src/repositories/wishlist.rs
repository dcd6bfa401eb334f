//! Wishlist repository with the system-wide unique invite-code index.

use dashmap::DashMap;

use wishhub_core::error::AppError;
use wishhub_core::result::AppResult;
use wishhub_core::types::WishlistId;
use wishhub_entity::wishlist::{InviteCode, Wishlist};

use crate::collection::DocumentCollection;

/// Stores wishlist documents and maintains the invite-code index.
///
/// The index maps each code to at most one wishlist. The wishlist
/// document is the source of truth for which code is current: lookups
/// verify the document still carries the queried code, so a rotated-out
/// code stops resolving the moment the document swap commits.
#[derive(Debug, Default)]
pub struct WishlistRepository {
    docs: DocumentCollection<WishlistId, Wishlist>,
    invite_index: DashMap<String, WishlistId>,
}

impl WishlistRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            docs: DocumentCollection::new(),
            invite_index: DashMap::new(),
        }
    }

    /// Inserts a new wishlist, claiming its invite code in the index.
    ///
    /// Fails with `Conflict` when the code is already taken; the caller
    /// regenerates and retries.
    pub fn insert(&self, wishlist: Wishlist) -> AppResult<Wishlist> {
        let code = wishlist
            .invite_code
            .as_ref()
            .ok_or_else(|| AppError::internal("New wishlist is missing an invite code"))?;
        self.claim_code(code, wishlist.id)?;
        self.docs.insert(wishlist.id, wishlist.clone());
        Ok(wishlist)
    }

    /// Finds a wishlist by id.
    pub fn find_by_id(&self, id: WishlistId) -> AppResult<Wishlist> {
        self.docs
            .get(&id)
            .ok_or_else(|| AppError::not_found("Wishlist not found"))
    }

    /// Resolves an invite code to its wishlist.
    ///
    /// A stale index entry (left over from an in-flight rotation) is
    /// treated as unresolved.
    pub fn find_by_invite_code(&self, code: &InviteCode) -> AppResult<Wishlist> {
        let id = self
            .invite_index
            .get(code.as_str())
            .map(|entry| *entry.value())
            .ok_or_else(|| AppError::not_found("Invalid invite code"))?;

        let wishlist = self.find_by_id(id)?;
        if wishlist.invite_code.as_ref() != Some(code) {
            return Err(AppError::not_found("Invalid invite code"));
        }
        Ok(wishlist)
    }

    /// Applies a mutation to the wishlist document under its entry lock.
    pub fn update<F>(&self, id: WishlistId, mutate: F) -> AppResult<Wishlist>
    where
        F: FnOnce(&mut Wishlist),
    {
        self.docs
            .update(&id, mutate)
            .map_err(|_| AppError::not_found("Wishlist not found"))
    }

    /// Applies a fallible mutation to the wishlist document under its
    /// entry lock.
    pub fn try_update<F, T>(&self, id: WishlistId, mutate: F) -> AppResult<T>
    where
        F: FnOnce(&mut Wishlist) -> AppResult<T>,
    {
        if !self.docs.contains(&id) {
            return Err(AppError::not_found("Wishlist not found"));
        }
        self.docs.try_update(&id, mutate)
    }

    /// Rotates the wishlist's invite code to `new_code`.
    ///
    /// Claims the new code first, swaps the document (the commit point),
    /// then releases the old code's index entry. Idempotent with respect
    /// to lookups: the old code stops verifying as soon as the swap lands.
    pub fn rotate_invite_code(&self, id: WishlistId, new_code: InviteCode) -> AppResult<Wishlist> {
        self.claim_code(&new_code, id)?;

        let old_code = match self.docs.try_update(&id, |wishlist| {
            Ok(wishlist.invite_code.replace(new_code.clone()))
        }) {
            Ok(old) => old,
            Err(_) => {
                self.release_code(&new_code);
                return Err(AppError::not_found("Wishlist not found"));
            }
        };

        if let Some(old) = old_code {
            self.release_code(&old);
        }
        self.find_by_id(id)
    }

    /// Removes a wishlist document and its invite-code index entry.
    ///
    /// Idempotent: deleting an absent wishlist is a no-op.
    pub fn delete(&self, id: WishlistId) -> AppResult<()> {
        if let Some(wishlist) = self.docs.remove(&id) {
            if let Some(code) = wishlist.invite_code {
                self.release_code(&code);
            }
        }
        Ok(())
    }

    /// Returns the wishlists with the given ids, in the order given,
    /// skipping any that no longer exist.
    pub fn find_by_ids(&self, ids: &[WishlistId]) -> Vec<Wishlist> {
        ids.iter().filter_map(|id| self.docs.get(id)).collect()
    }

    /// Returns the total wishlist count.
    pub fn count(&self) -> usize {
        self.docs.len()
    }

    fn claim_code(&self, code: &InviteCode, id: WishlistId) -> AppResult<()> {
        use dashmap::mapref::entry::Entry;
        match self.invite_index.entry(code.as_str().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
            Entry::Occupied(existing) if *existing.get() == id => Ok(()),
            Entry::Occupied(_) => Err(AppError::conflict("Invite code already in use")),
        }
    }

    fn release_code(&self, code: &InviteCode) {
        self.invite_index.remove(code.as_str());
    }
}
