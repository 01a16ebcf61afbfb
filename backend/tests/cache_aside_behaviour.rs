//! Behavioural tests for the cache-aside services over the in-memory adapters.
//!
//! The store is wrapped in a counting decorator so each scenario can assert
//! whether a read was served by the cache or fell through to the store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use proptest::prelude::*;
use rstest::{fixture, rstest};

use unhash::domain::ports::{
    CreateHashJobRequest, CreateUserRequest, HashJobStore, HashJobsCommand, HashJobsQuery,
    PersistenceError, UserCache, UserStore, UsersCommand, UsersQuery,
};
use unhash::domain::{
    Email, ErrorCode, HashJob, HashJobService, HashJobStatus, User, UserId, UserService,
};
use unhash::outbound::cache::CacheTtl;
use unhash::outbound::memory::MemoryCache;
use unhash::test_support::clock::MutableClock;
use unhash::test_support::counting::CountingStore;

const TTL_SECS: u64 = 60;

struct World {
    store: Arc<CountingStore>,
    cache: Arc<MemoryCache>,
    clock: Arc<MutableClock>,
    users: UserService<CountingStore, MemoryCache>,
    hash_jobs: HashJobService<CountingStore, MemoryCache>,
}

#[fixture]
fn world() -> World {
    let store = Arc::new(CountingStore::new());
    let clock = Arc::new(MutableClock::new(Utc::now()));
    let cache = Arc::new(MemoryCache::new(
        CacheTtl::new(Duration::from_secs(TTL_SECS)),
        clock.clone(),
    ));
    World {
        users: UserService::new(store.clone(), cache.clone()),
        hash_jobs: HashJobService::new(store.clone(), cache.clone()),
        store,
        cache,
        clock,
    }
}

fn request(id: &str, username: &str, email: &str) -> CreateUserRequest {
    CreateUserRequest {
        id: id.to_owned(),
        username: username.to_owned(),
        email: email.to_owned(),
    }
}

fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid id")
}

#[rstest]
#[tokio::test]
async fn created_user_is_returned_with_identical_fields(world: World) {
    let created = world
        .users
        .create_user(request("u-1", "ada", "ada@example.com"))
        .await
        .expect("create");

    let fetched = world.users.get_user(&user_id("u-1")).await.expect("get");

    assert_eq!(fetched, created);
    assert_eq!(fetched.username().as_str(), "ada");
    assert_eq!(fetched.email().as_str(), "ada@example.com");
}

#[rstest]
#[tokio::test]
async fn duplicate_email_conflicts_and_keeps_one_row(world: World) {
    world
        .users
        .create_user(request("u-1", "ada", "ada@example.com"))
        .await
        .expect("first create");

    let err = world
        .users
        .create_user(request("u-2", "lovelace", "ada@example.com"))
        .await
        .expect_err("duplicate email");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(world.store.list_users().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn duplicate_username_conflicts(world: World) {
    world
        .users
        .create_user(request("u-1", "ada", "ada@example.com"))
        .await
        .expect("first create");

    let err = world
        .users
        .create_user(request("u-2", "ada", "other@example.com"))
        .await
        .expect_err("duplicate username");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn repeated_reads_are_served_from_the_cache(world: World) {
    let ada = User::try_from_strings("u-1", "ada", "ada@example.com").expect("user");
    world.store.insert_user(&ada).await.expect("seed");
    world.store.reset();

    let first = world.users.get_user(ada.id()).await.expect("first read");
    assert_eq!(world.store.user_reads(), 1);

    let second = world.users.get_user(ada.id()).await.expect("second read");
    assert_eq!(world.store.user_reads(), 1);
    assert_eq!(first, second);

    let by_email = world
        .users
        .get_user_by_email(ada.email())
        .await
        .expect("email read");
    assert_eq!(by_email, ada);
    assert_eq!(world.store.user_reads(), 1);
}

#[rstest]
#[tokio::test]
async fn cold_cache_read_falls_through_and_populates(world: World) {
    let ada = User::try_from_strings("u-1", "ada", "ada@example.com").expect("user");
    world.store.insert_user(&ada).await.expect("seed");
    assert!(UserCache::get_user(&*world.cache, ada.id()).await.is_err());

    let fetched = world.users.get_user(ada.id()).await.expect("read");

    assert_eq!(fetched, ada);
    assert_eq!(
        UserCache::get_user(&*world.cache, ada.id())
            .await
            .expect("cache populated"),
        ada
    );
}

#[rstest]
#[tokio::test]
async fn expired_entries_are_reloaded_from_the_store(world: World) {
    world
        .users
        .create_user(request("u-1", "ada", "ada@example.com"))
        .await
        .expect("create");
    world.store.reset();

    world.users.get_user(&user_id("u-1")).await.expect("cached");
    assert_eq!(world.store.user_reads(), 0);

    world.clock.advance_seconds(i64::try_from(TTL_SECS).expect("ttl fits"));
    world.users.get_user(&user_id("u-1")).await.expect("reloaded");
    assert_eq!(world.store.user_reads(), 1);
}

#[rstest]
#[tokio::test]
async fn deleted_user_is_gone_from_store_and_cache(world: World) {
    let created = world
        .users
        .create_user(request("u-1", "ada", "ada@example.com"))
        .await
        .expect("create");
    world.users.get_user(created.id()).await.expect("warm cache");

    world.users.delete_user(created.id()).await.expect("delete");

    let err = world
        .users
        .get_user(created.id())
        .await
        .expect_err("deleted");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(
        UserCache::get_user_by_email(&*world.cache, created.email())
            .await
            .expect_err("email key cleared")
            .is_not_found()
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_missing_user_is_not_found(world: World) {
    let err = world
        .users
        .delete_user(&user_id("ghost"))
        .await
        .expect_err("absent");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn hash_job_without_hashes_is_rejected(world: World) {
    let owner = world
        .users
        .create_user(request("u-1", "ada", "ada@example.com"))
        .await
        .expect("owner");
    world.store.reset();

    let err = world
        .hash_jobs
        .create_hash_job(CreateHashJobRequest {
            hashes: Vec::new(),
            owner: Some(owner),
        })
        .await
        .expect_err("empty hashes");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(world.store.inserts(), 0);
}

#[rstest]
#[tokio::test]
async fn hash_job_without_owner_is_rejected_before_any_write(world: World) {
    let err = world
        .hash_jobs
        .create_hash_job(CreateHashJobRequest {
            hashes: vec!["5f4dcc3b5aa765d61d8327deb882cf99".into()],
            owner: None,
        })
        .await
        .expect_err("missing owner");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(world.store.inserts(), 0);
}

#[rstest]
#[tokio::test]
async fn hash_jobs_round_trip_through_store_and_cache(world: World) {
    let owner = world
        .users
        .create_user(request("u-1", "ada", "ada@example.com"))
        .await
        .expect("owner");
    let job = world
        .hash_jobs
        .create_hash_job(CreateHashJobRequest {
            hashes: vec!["b".into(), "a".into(), "c".into()],
            owner: Some(owner.clone()),
        })
        .await
        .expect("create job");
    assert_eq!(job.status(), HashJobStatus::Pending);
    assert_eq!(job.owner_id(), owner.id());
    world.store.reset();

    let fetched = world.hash_jobs.get_hash_job(job.id()).await.expect("get");
    assert_eq!(fetched, job);
    assert_eq!(fetched.hashes(), ["b", "a", "c"]);
    assert_eq!(world.store.hash_job_reads(), 0);

    world.hash_jobs.delete_hash_job(job.id()).await.expect("delete");
    let err = world
        .hash_jobs
        .get_hash_job(job.id())
        .await
        .expect_err("deleted");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(
        HashJobStore::get_hash_job(&*world.store, job.id())
            .await
            .expect_err("row gone")
            .is_not_found()
    );
}

/// Cache whose backend is permanently unreachable.
struct UnreachableCache;

fn unreachable() -> PersistenceError {
    PersistenceError::connection("connection refused")
}

#[async_trait]
impl UserCache for UnreachableCache {
    async fn get_user(&self, _id: &UserId) -> Result<User, PersistenceError> {
        Err(unreachable())
    }

    async fn get_user_by_email(&self, _email: &Email) -> Result<User, PersistenceError> {
        Err(unreachable())
    }

    async fn set_user(&self, _user: &User) -> Result<(), PersistenceError> {
        Err(unreachable())
    }

    async fn clear_user(&self, _user: &User) -> Result<(), PersistenceError> {
        Err(unreachable())
    }

    async fn clear_user_id(&self, _id: &UserId) -> Result<(), PersistenceError> {
        Err(unreachable())
    }
}

#[rstest]
#[tokio::test]
async fn cache_outage_never_fails_an_operation() {
    let store = Arc::new(CountingStore::new());
    let users = UserService::new(store.clone(), Arc::new(UnreachableCache));

    let created = users
        .create_user(request("u-1", "ada", "ada@example.com"))
        .await
        .expect("create despite cache outage");
    assert_eq!(users.get_user(created.id()).await.expect("get"), created);
    assert_eq!(
        users
            .get_user_by_email(created.email())
            .await
            .expect("by email"),
        created
    );
    users.delete_user(created.id()).await.expect("delete");
    assert_eq!(store.list_users().await.expect("list").len(), 0);
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(future)
}

proptest! {
    #[test]
    fn any_valid_user_reads_back_unchanged(
        id in "[a-z0-9-]{1,36}",
        username in "[A-Za-z][A-Za-z0-9_]{0,31}",
        local in "[a-z0-9.]{1,20}",
        domain in "[a-z]{1,12}\\.[a-z]{2,6}",
    ) {
        let email = format!("{local}@{domain}");
        let world = world();
        let (created, fetched) = block_on(async {
            let created = world
                .users
                .create_user(request(&id, &username, &email))
                .await
                .expect("create");
            let fetched = world.users.get_user(&user_id(&id)).await.expect("get");
            (created, fetched)
        });

        prop_assert_eq!(&fetched, &created);
        prop_assert_eq!(fetched.id().as_str(), id.as_str());
        prop_assert_eq!(fetched.username().as_str(), username.as_str());
        prop_assert_eq!(fetched.email().as_str(), email.as_str());
    }

    #[test]
    fn hash_jobs_keep_their_hash_order(
        hashes in prop::collection::vec("[0-9a-f]{32}", 1..16),
    ) {
        let owner_id = UserId::random();
        let job = HashJob::pending(owner_id, hashes.clone()).expect("job");
        let json = serde_json::to_string(&job).expect("serialise");
        let decoded: HashJob = serde_json::from_str(&json).expect("deserialise");

        prop_assert_eq!(decoded.hashes(), hashes.as_slice());
        prop_assert_eq!(decoded, job);
    }
}
