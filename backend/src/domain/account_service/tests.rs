//! Behaviour of registration and login against mocked ports.

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockTokenIssuer, MockUserRepository, TokenError};
use crate::domain::{EmailAddress, ErrorCode, PasswordHash, UserAccount, UserName};
use crate::test_support::FixtureClock;
use chrono::{DateTime, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

#[fixture]
fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

#[fixture]
fn details() -> RegistrationDetails {
    RegistrationDetails::try_from_parts("Ada", "ada@example.com", "s3cret").expect("valid details")
}

#[fixture]
fn account() -> UserAccount {
    UserAccount {
        user: User {
            id: UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("uuid"),
            name: UserName::new("Ada").expect("name"),
            email: EmailAddress::new("ada@example.com").expect("email"),
        },
        password_hash: PasswordHash::new("$2b$10$stored"),
    }
}

fn service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
    issuer: MockTokenIssuer,
    now: DateTime<Utc>,
) -> AccountService<MockUserRepository, MockPasswordHasher, MockTokenIssuer> {
    AccountService::new(
        Arc::new(users),
        Arc::new(hasher),
        Arc::new(issuer),
        Arc::new(FixtureClock::at(now)),
    )
}

fn hasher_returning(hash: &'static str) -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .with(eq("s3cret"))
        .times(1)
        .returning(move |_| Ok(PasswordHash::new(hash)));
    hasher
}

#[rstest]
#[tokio::test]
async fn register_stores_hash_not_password(details: RegistrationDetails, now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|new_user| {
            new_user.password_hash.as_str() == "$2b$10$hashed"
                && new_user.email.as_ref() == "ada@example.com"
        })
        .times(1)
        .returning(|new_user| {
            Ok(User {
                id: new_user.id,
                name: new_user.name.clone(),
                email: new_user.email.clone(),
            })
        });

    let service = service(
        users,
        hasher_returning("$2b$10$hashed"),
        MockTokenIssuer::new(),
        now,
    );
    let user = service.register(&details).await.expect("registered");

    assert_eq!(user.name.as_ref(), "Ada");
    assert_eq!(user.email.as_ref(), "ada@example.com");
}

#[rstest]
#[case(UserPersistenceError::duplicate_email("ada@example.com"), ErrorCode::Conflict)]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
#[tokio::test]
async fn register_maps_store_failures(
    details: RegistrationDetails,
    now: DateTime<Utc>,
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .times(1)
        .returning(move |_| Err(failure.clone()));

    let service = service(users, hasher_returning("h"), MockTokenIssuer::new(), now);
    let err = service.register(&details).await.expect_err("store failure");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn duplicate_email_reports_conflict_message(
    details: RegistrationDetails,
    now: DateTime<Utc>,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .returning(|user| Err(UserPersistenceError::duplicate_email(user.email.to_string())));

    let service = service(users, hasher_returning("h"), MockTokenIssuer::new(), now);
    let err = service.register(&details).await.expect_err("duplicate");

    assert_eq!(err.message(), DUPLICATE_EMAIL_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn login_issues_token_for_matching_password(account: UserAccount, now: DateTime<Utc>) {
    let expected_id = account.user.id;
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .returning(move |_| Ok(Some(account.clone())));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(1).returning(|_, _| Ok(true));
    let mut issuer = MockTokenIssuer::new();
    issuer
        .expect_issue()
        .withf(move |claims| {
            claims.user_id == Some(expected_id)
                && claims.email.as_deref() == Some("ada@example.com")
                && claims.issued_at == now
                && claims.expires_at == now + chrono::Duration::hours(1)
        })
        .times(1)
        .returning(|_| Ok(AccessToken::new("signed.token.value")));

    let service = service(users, hasher, issuer, now);
    let creds = LoginCredentials::try_from_parts("ada@example.com", "s3cret").expect("creds");
    let token = service.login(&creds).await.expect("login succeeds");

    assert_eq!(token.as_str(), "signed.token.value");
}

#[rstest]
#[tokio::test]
async fn login_unknown_email_is_not_found(now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(0);

    let service = service(users, hasher, MockTokenIssuer::new(), now);
    let creds = LoginCredentials::try_from_parts("nobody@example.com", "pw").expect("creds");
    let err = service.login(&creds).await.expect_err("unknown user");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn login_wrong_password_is_unauthorized(account: UserAccount, now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(account.clone())));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(false));
    let mut issuer = MockTokenIssuer::new();
    issuer.expect_issue().times(0);

    let service = service(users, hasher, issuer, now);
    let creds = LoginCredentials::try_from_parts("ada@example.com", "wrong").expect("creds");
    let err = service.login(&creds).await.expect_err("bad password");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn signing_failure_is_internal(account: UserAccount, now: DateTime<Utc>) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(account.clone())));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| Ok(true));
    let mut issuer = MockTokenIssuer::new();
    issuer
        .expect_issue()
        .returning(|_| Err(TokenError::encoding("bad key")));

    let service = service(users, hasher, issuer, now);
    let creds = LoginCredentials::try_from_parts("ada@example.com", "s3cret").expect("creds");
    let err = service.login(&creds).await.expect_err("signing failed");

    assert_eq!(err.code(), ErrorCode::InternalError);
}
