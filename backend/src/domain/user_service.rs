//! User service implementing the user driving ports.
//!
//! Reads go cache first, fall through to the store on any cache error, and
//! repopulate the cache afterwards. Writes go to the store first; cache
//! updates are best effort and never fail the operation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CacheKey, CreateUserRequest, UserCache, UserStore, UsersCommand, UsersQuery,
};
use crate::domain::service_support::{
    duplicate_field, invalid_field, log_cache_fallthrough, log_cache_write_failure,
    map_store_error,
};
use crate::domain::{Email, Error, User, UserId};

const ENTITY: &str = "user";

/// Cache-aside service over a user store and cache.
///
/// `S` and `C` may be trait objects so adapters can be chosen at runtime.
pub struct UserService<S: ?Sized, C: ?Sized> {
    store: Arc<S>,
    cache: Arc<C>,
}

impl<S: ?Sized, C: ?Sized> UserService<S, C> {
    /// Create a new service over the given store and cache.
    pub fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        Self { store, cache }
    }
}

impl<S: ?Sized, C: ?Sized> Clone for UserService<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S, C> UserService<S, C>
where
    S: UserStore + ?Sized,
    C: UserCache + ?Sized,
{
    async fn ensure_unique(&self, user: &User) -> Result<(), Error> {
        match self.store.get_user(user.id()).await {
            Ok(_) => return Err(duplicate_field(ENTITY, "id", user.id().as_str())),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(map_store_error(ENTITY, &format!("id={}", user.id()), err)),
        }
        match self.store.get_user_by_email(user.email()).await {
            Ok(_) => Err(duplicate_field(ENTITY, "email", user.email().as_str())),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(map_store_error(
                ENTITY,
                &format!("email={}", user.email()),
                err,
            )),
        }
    }

    /// Best-effort lookup of the record behind `id`, used only to find the
    /// email key to evict. Failures never block the delete.
    async fn known_user(&self, id: &UserId) -> Option<User> {
        if let Ok(user) = self.cache.get_user(id).await {
            return Some(user);
        }
        match self.store.get_user(id).await {
            Ok(user) => Some(user),
            Err(err) => {
                debug!(%id, %err, "user record unavailable before delete");
                None
            }
        }
    }

    async fn cache_user(&self, user: &User) {
        if let Err(err) = self.cache.set_user(user).await {
            log_cache_write_failure("set_user", CacheKey::user_id(user.id()).as_str(), &err);
        }
    }
}

#[async_trait]
impl<S, C> UsersCommand for UserService<S, C>
where
    S: UserStore + ?Sized,
    C: UserCache + ?Sized,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let CreateUserRequest {
            id,
            username,
            email,
        } = request;
        let user = User::try_from_strings(id, username, email)
            .map_err(|err| invalid_field(err.field(), err.to_string()))?;

        self.ensure_unique(&user).await?;
        self.store
            .insert_user(&user)
            .await
            .map_err(|err| map_store_error(ENTITY, &format!("id={}", user.id()), err))?;
        self.cache_user(&user).await;
        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let known = self.known_user(id).await;
        self.store
            .delete_user(id)
            .await
            .map_err(|err| map_store_error(ENTITY, &format!("id={id}"), err))?;
        let evicted = match &known {
            Some(user) => self.cache.clear_user(user).await,
            None => self.cache.clear_user_id(id).await,
        };
        if let Err(err) = evicted {
            log_cache_write_failure("clear_user", CacheKey::user_id(id).as_str(), &err);
        }
        Ok(())
    }
}

#[async_trait]
impl<S, C> UsersQuery for UserService<S, C>
where
    S: UserStore + ?Sized,
    C: UserCache + ?Sized,
{
    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        match self.cache.get_user(id).await {
            Ok(user) => return Ok(user),
            Err(err) => log_cache_fallthrough(CacheKey::user_id(id).as_str(), &err),
        }
        let user = self
            .store
            .get_user(id)
            .await
            .map_err(|err| map_store_error(ENTITY, &format!("id={id}"), err))?;
        self.cache_user(&user).await;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, Error> {
        match self.cache.get_user_by_email(email).await {
            Ok(user) => return Ok(user),
            Err(err) => log_cache_fallthrough(CacheKey::user_email(email).as_str(), &err),
        }
        let user = self
            .store
            .get_user_by_email(email)
            .await
            .map_err(|err| map_store_error(ENTITY, &format!("email={email}"), err))?;
        self.cache_user(&user).await;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.store
            .list_users()
            .await
            .map_err(|err| map_store_error(ENTITY, "all", err))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
