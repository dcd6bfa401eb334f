//! Wishlist mutation service.

use std::sync::Arc;

use tracing::{info, warn};

use wishhub_auth::guard;
use wishhub_core::error::AppError;
use wishhub_core::result::AppResult;
use wishhub_core::types::{UserId, WishlistId};
use wishhub_entity::wishlist::{
    CreateWishlist, InviteCode, UpdateWishlistFields, Wishlist, WishlistDetail, WishlistView,
};
use wishhub_realtime::EventBridge;
use wishhub_store::{
    DeletionSaga, DeletionSagaLog, DeletionStep, MembershipIndex, ProductRepository,
    WishlistRepository,
};

use crate::context::RequestContext;
use crate::resolve::ViewResolver;

/// Bounded retries when allocating a unique invite code.
const MAX_INVITE_ATTEMPTS: usize = 5;

/// Implements every wishlist-level mutation.
#[derive(Debug)]
pub struct WishlistService {
    wishlists: Arc<WishlistRepository>,
    products: Arc<ProductRepository>,
    membership: Arc<MembershipIndex>,
    sagas: Arc<DeletionSagaLog>,
    resolver: ViewResolver,
    bridge: Arc<EventBridge>,
}

impl WishlistService {
    /// Creates a new wishlist service.
    pub fn new(
        wishlists: Arc<WishlistRepository>,
        products: Arc<ProductRepository>,
        membership: Arc<MembershipIndex>,
        sagas: Arc<DeletionSagaLog>,
        resolver: ViewResolver,
        bridge: Arc<EventBridge>,
    ) -> Self {
        Self {
            wishlists,
            products,
            membership,
            sagas,
            resolver,
            bridge,
        }
    }

    /// Creates a new wishlist owned by the caller, with a fresh unique
    /// invite code.
    pub fn create(&self, ctx: &RequestContext, fields: CreateWishlist) -> AppResult<WishlistView> {
        if fields.name.trim().is_empty() {
            return Err(AppError::validation("Wishlist name must not be empty"));
        }

        let mut attempt = 0;
        let wishlist = loop {
            let candidate = Wishlist::new(ctx.user_id, fields.clone(), InviteCode::generate());
            match self.wishlists.insert(candidate) {
                Ok(wishlist) => break wishlist,
                Err(e) if e.kind == wishhub_core::error::ErrorKind::Conflict => {
                    attempt += 1;
                    if attempt >= MAX_INVITE_ATTEMPTS {
                        warn!("Exhausted invite-code allocation attempts");
                        return Err(AppError::conflict(
                            "Could not allocate a unique invite code",
                        ));
                    }
                }
                Err(e) => return Err(e),
            }
        };

        self.membership.add(ctx.user_id, wishlist.id);

        let view = self.resolver.wishlist_view(&wishlist);
        self.bridge.on_wishlist_created(&view);

        info!(user_id = %ctx.user_id, wishlist_id = %wishlist.id, "Wishlist created");
        Ok(view)
    }

    /// Lists wishlists the caller owns or collaborates on, in join order.
    pub fn list_mine(&self, ctx: &RequestContext) -> Vec<WishlistView> {
        let ids = self.membership.wishlists_for(ctx.user_id);
        self.wishlists
            .find_by_ids(&ids)
            .iter()
            .map(|w| self.resolver.wishlist_view(w))
            .collect()
    }

    /// Fetches a wishlist with products, owner, and collaborators
    /// populated.
    pub fn get(&self, ctx: &RequestContext, id: WishlistId) -> AppResult<WishlistDetail> {
        let wishlist = self.wishlists.find_by_id(id)?;
        guard::ensure_read(&wishlist, ctx.user_id)?;

        let products = self.products.find_by_ids(&wishlist.products);
        Ok(self.resolver.wishlist_detail(&wishlist, &products))
    }

    /// Updates a wishlist's scalar fields. Owner only.
    pub fn update(
        &self,
        ctx: &RequestContext,
        id: WishlistId,
        fields: UpdateWishlistFields,
    ) -> AppResult<WishlistView> {
        let wishlist = self.wishlists.find_by_id(id)?;
        guard::ensure_manage(&wishlist, ctx.user_id)?;

        if let Some(name) = &fields.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Wishlist name must not be empty"));
            }
        }

        let updated = self.wishlists.update(id, |w| w.apply(fields))?;
        let view = self.resolver.wishlist_view(&updated);
        self.bridge.on_wishlist_updated(&view);

        info!(user_id = %ctx.user_id, wishlist_id = %id, "Wishlist updated");
        Ok(view)
    }

    /// Deletes a wishlist, cascading to its products and unlinking every
    /// member. Owner only.
    ///
    /// Runs as a saga of idempotent steps with per-step completion
    /// markers; a crash mid-sequence is repaired by
    /// [`Self::recover_incomplete_deletes`] on the next startup.
    pub fn delete(&self, ctx: &RequestContext, id: WishlistId) -> AppResult<()> {
        let wishlist = self.wishlists.find_by_id(id)?;
        guard::ensure_manage(&wishlist, ctx.user_id)?;

        let mut members = vec![wishlist.owner];
        members.extend(wishlist.collaborators.iter().copied());

        let saga = self.sagas.begin(id, members);
        self.run_deletion(&saga)?;

        self.bridge.on_wishlist_deleted(id);
        info!(user_id = %ctx.user_id, wishlist_id = %id, "Wishlist deleted");
        Ok(())
    }

    /// Replays deletions that did not finish before a crash.
    pub fn recover_incomplete_deletes(&self) -> AppResult<usize> {
        let open = self.sagas.incomplete();
        let count = open.len();
        for saga in open {
            warn!(wishlist_id = %saga.wishlist_id, "Replaying incomplete deletion");
            self.run_deletion(&saga)?;
        }
        Ok(count)
    }

    fn run_deletion(&self, saga: &DeletionSaga) -> AppResult<()> {
        for step in DeletionStep::ORDER {
            if saga.is_done(step) {
                continue;
            }
            match step {
                DeletionStep::DetachProducts => {
                    self.products.delete_by_wishlist(saga.wishlist_id);
                }
                DeletionStep::DetachMembers => {
                    self.membership
                        .remove_for_all(&saga.members, saga.wishlist_id);
                }
                DeletionStep::DeleteWishlist => {
                    self.wishlists.delete(saga.wishlist_id)?;
                }
            }
            self.sagas.mark(saga.wishlist_id, step);
        }
        self.sagas.finish(saga.wishlist_id);
        Ok(())
    }

    /// Joins the caller to the wishlist behind an invite code.
    pub fn join_by_code(&self, ctx: &RequestContext, raw_code: &str) -> AppResult<WishlistView> {
        let code = InviteCode::parse(raw_code)
            .ok_or_else(|| AppError::not_found("Invalid invite code"))?;

        let wishlist = self.wishlists.find_by_invite_code(&code)?;

        if wishlist.is_owner(ctx.user_id) {
            return Err(AppError::conflict("You are the owner of this wishlist"));
        }

        // Membership is re-checked inside the entry lock so two racing
        // joins from one user cannot both append.
        let updated = self.wishlists.try_update(wishlist.id, |w| {
            if !w.add_collaborator(ctx.user_id) {
                return Err(AppError::conflict("You are already a collaborator"));
            }
            Ok(w.clone())
        })?;

        self.membership.add(ctx.user_id, updated.id);
        self.bridge
            .on_collaborator_added(updated.id, &ctx.actor_summary());

        info!(user_id = %ctx.user_id, wishlist_id = %updated.id, "Collaborator joined");
        Ok(self.resolver.wishlist_view(&updated))
    }

    /// Removes a collaborator. Allowed to the owner, or to the
    /// collaborator removing themselves.
    pub fn remove_collaborator(
        &self,
        ctx: &RequestContext,
        id: WishlistId,
        target: UserId,
    ) -> AppResult<()> {
        let wishlist = self.wishlists.find_by_id(id)?;
        if !guard::can_manage(&wishlist, ctx.user_id) && ctx.user_id != target {
            return Err(AppError::access_denied("Not authorized"));
        }

        self.wishlists.try_update(id, |w| {
            if !w.remove_collaborator(target) {
                return Err(AppError::not_found("User is not a collaborator"));
            }
            Ok(())
        })?;

        self.membership.remove(target, id);
        self.bridge.on_collaborator_removed(id, target);

        info!(user_id = %ctx.user_id, wishlist_id = %id, target = %target, "Collaborator removed");
        Ok(())
    }

    /// Replaces the invite code with a freshly generated unique one.
    /// Owner only. The old code stops resolving immediately; no broadcast
    /// — only the owner needs the new code.
    pub fn rotate_invite_code(
        &self,
        ctx: &RequestContext,
        id: WishlistId,
    ) -> AppResult<InviteCode> {
        let wishlist = self.wishlists.find_by_id(id)?;
        guard::ensure_manage(&wishlist, ctx.user_id)?;

        let mut attempt = 0;
        loop {
            let candidate = InviteCode::generate();
            match self.wishlists.rotate_invite_code(id, candidate.clone()) {
                Ok(_) => {
                    info!(user_id = %ctx.user_id, wishlist_id = %id, "Invite code rotated");
                    return Ok(candidate);
                }
                Err(e) if e.kind == wishhub_core::error::ErrorKind::Conflict => {
                    attempt += 1;
                    if attempt >= MAX_INVITE_ATTEMPTS {
                        warn!("Exhausted invite-code rotation attempts");
                        return Err(AppError::conflict(
                            "Could not allocate a unique invite code",
                        ));
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishhub_core::error::ErrorKind;
    use wishhub_realtime::RoomRouter;
    use wishhub_store::UserDirectory;

    struct Fixture {
        service: WishlistService,
        products: Arc<ProductRepository>,
        membership: Arc<MembershipIndex>,
        sagas: Arc<DeletionSagaLog>,
        wishlists: Arc<WishlistRepository>,
    }

    fn fixture() -> Fixture {
        let wishlists = Arc::new(WishlistRepository::new());
        let products = Arc::new(ProductRepository::new());
        let membership = Arc::new(MembershipIndex::new());
        let sagas = Arc::new(DeletionSagaLog::new());
        let users = Arc::new(UserDirectory::new());
        let bridge = Arc::new(EventBridge::new(Arc::new(RoomRouter::new())));

        let service = WishlistService::new(
            Arc::clone(&wishlists),
            Arc::clone(&products),
            Arc::clone(&membership),
            Arc::clone(&sagas),
            ViewResolver::new(users),
            bridge,
        );
        Fixture {
            service,
            products,
            membership,
            sagas,
            wishlists,
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new(UserId::new(), "Owner", "owner@example.com")
    }

    fn create_fields() -> CreateWishlist {
        CreateWishlist {
            name: "Birthday".to_string(),
            description: None,
            is_private: Some(true),
        }
    }

    #[test]
    fn create_indexes_owner_membership() {
        let f = fixture();
        let owner = ctx();
        let view = f.service.create(&owner, create_fields()).expect("create");
        assert_eq!(f.membership.wishlists_for(owner.user_id), vec![view.id]);
        assert!(view.invite_code.is_some());
    }

    #[test]
    fn join_rejects_owner_and_double_join() {
        let f = fixture();
        let owner = ctx();
        let view = f.service.create(&owner, create_fields()).expect("create");
        let code = view.invite_code.clone().expect("code");

        let err = f.service.join_by_code(&owner, code.as_str()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let member = RequestContext::new(UserId::new(), "B", "b@example.com");
        f.service.join_by_code(&member, code.as_str()).expect("join");
        let err = f.service.join_by_code(&member, code.as_str()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn join_with_unknown_code_is_not_found() {
        let f = fixture();
        let err = f.service.join_by_code(&ctx(), "ZZZZZZ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn rotation_invalidates_the_old_code() {
        let f = fixture();
        let owner = ctx();
        let view = f.service.create(&owner, create_fields()).expect("create");
        let old = view.invite_code.clone().expect("code");

        let fresh = f
            .service
            .rotate_invite_code(&owner, view.id)
            .expect("rotate");
        assert_ne!(old, fresh);

        let member = RequestContext::new(UserId::new(), "B", "b@example.com");
        let err = f.service.join_by_code(&member, old.as_str()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        f.service
            .join_by_code(&member, fresh.as_str())
            .expect("new code joins");
    }

    #[test]
    fn delete_cascades_and_unlinks_members() {
        let f = fixture();
        let owner = ctx();
        let member = RequestContext::new(UserId::new(), "B", "b@example.com");
        let view = f.service.create(&owner, create_fields()).expect("create");
        let code = view.invite_code.clone().expect("code");
        f.service.join_by_code(&member, code.as_str()).expect("join");

        let product = f.products.insert(wishhub_entity::product::Product::new(
            member.user_id,
            wishhub_entity::product::CreateProduct {
                name: "Kettle".to_string(),
                price: 29.99,
                description: None,
                image_url: None,
                wishlist_id: view.id,
            },
        ));
        f.wishlists
            .update(view.id, |w| w.products.push(product.id))
            .expect("link product");

        f.service.delete(&owner, view.id).expect("delete");

        assert_eq!(f.products.count(), 0);
        assert!(f.membership.wishlists_for(owner.user_id).is_empty());
        assert!(f.membership.wishlists_for(member.user_id).is_empty());
        assert!(f.wishlists.find_by_id(view.id).is_err());
        assert!(f.sagas.incomplete().is_empty());
    }

    #[test]
    fn interrupted_delete_is_replayed_at_startup() {
        let f = fixture();
        let owner = ctx();
        let view = f.service.create(&owner, create_fields()).expect("create");

        // Simulate a crash after only the first step ran.
        let saga = f.sagas.begin(view.id, vec![owner.user_id]);
        f.products.delete_by_wishlist(saga.wishlist_id);
        f.sagas.mark(view.id, DeletionStep::DetachProducts);

        let replayed = f.service.recover_incomplete_deletes().expect("recover");
        assert_eq!(replayed, 1);
        assert!(f.wishlists.find_by_id(view.id).is_err());
        assert!(f.membership.wishlists_for(owner.user_id).is_empty());
        assert!(f.sagas.incomplete().is_empty());
    }

    #[test]
    fn only_owner_or_self_can_remove_collaborators() {
        let f = fixture();
        let owner = ctx();
        let b = RequestContext::new(UserId::new(), "B", "b@example.com");
        let c = RequestContext::new(UserId::new(), "C", "c@example.com");
        let view = f.service.create(&owner, create_fields()).expect("create");
        let code = view.invite_code.clone().expect("code");
        f.service.join_by_code(&b, code.as_str()).expect("join b");
        f.service.join_by_code(&c, code.as_str()).expect("join c");

        // B may not remove C.
        let err = f
            .service
            .remove_collaborator(&b, view.id, c.user_id)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::AccessDenied);

        // C may leave on their own.
        f.service
            .remove_collaborator(&c, view.id, c.user_id)
            .expect("self removal");

        // The owner may remove B.
        f.service
            .remove_collaborator(&owner, view.id, b.user_id)
            .expect("owner removal");
        assert!(f.membership.wishlists_for(b.user_id).is_empty());
    }
}
