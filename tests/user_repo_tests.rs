mod common;

use campus_market_lib::data::repos::implementors::user_repo::UserRepo;
use campus_market_lib::data::repos::traits::repository::Repository;
use campus_market_lib::security::auth::AuthService;
use common::{PASSWORD, TestApp};

#[tokio::test]
async fn test_lookup_by_username_and_login() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register_user("lookup_me").await;
    let repo = UserRepo::new(&app.db);

    let user = repo
        .get_by_username("lookup_me")
        .await
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(user.id, user_id);
    assert_ne!(user.password_hash, PASSWORD);
    assert!(
        AuthService::new()
            .verify_password(PASSWORD, &user.password_hash)
            .await
            .expect("Verification failed")
    );

    let by_email = repo
        .get_by_login("lookup_me@st.knust.edu.gh")
        .await
        .expect("Query failed");
    assert_eq!(by_email.map(|u| u.id), Some(user_id));

    assert!(repo.get_by_username("nobody").await.expect("Query failed").is_none());
}

#[tokio::test]
async fn test_soft_deleted_user_keeps_identity() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register_user("soft_gone").await;
    let repo = UserRepo::new(&app.db);

    assert_eq!(repo.delete(user_id).await.expect("Delete failed"), 1);

    assert!(repo.get_by_id(user_id).await.expect("Query failed").is_none());
    assert!(repo.get_by_username("soft_gone").await.expect("Query failed").is_none());
    assert!(repo.get_all().await.expect("Query failed").is_none());

    assert!(
        repo.exists_with_identity("soft_gone", "other@st.knust.edu.gh", "99999999")
            .await
            .expect("Query failed")
    );
    assert!(
        !repo
            .exists_with_identity("fresh", "fresh@st.knust.edu.gh", "99999999")
            .await
            .expect("Query failed")
    );
}
