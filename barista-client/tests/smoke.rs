use std::time::{SystemTime, UNIX_EPOCH};

use barista_client::{BackendClient, BackendError, Credentials, Timeouts, UsernameLookup};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

fn backend() -> BackendClient {
    let base_url =
        std::env::var("BACKEND_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    BackendClient::new(base_url, Timeouts::default()).expect("client must build")
}

#[tokio::test]
#[ignore = "requires running backend API"]
async fn backend_smoke_flow() {
    let client = backend();

    let username = format!("smoke_user_{}", unique_suffix());
    let credentials = Credentials {
        username: &username,
        password: "password123",
    };

    let before = client
        .find_user_by_username(&username)
        .await
        .expect("lookup must succeed");
    assert_eq!(before, UsernameLookup::Available);

    client
        .register(credentials)
        .await
        .expect("register must succeed");

    let after = client
        .find_user_by_username(&username)
        .await
        .expect("lookup must succeed");
    assert!(matches!(after, UsernameLookup::Taken { .. }));

    let token = client.login(credentials).await.expect("login must succeed");
    assert!(!token.is_empty());

    let blogs = client.list_blogs().await.expect("list_blogs must succeed");
    if let Some(first) = blogs.first() {
        let fetched = client
            .get_blog(first.id)
            .await
            .expect("get_blog must succeed");
        assert_eq!(fetched.id, first.id);
    }

    let missing = client.get_blog(i64::MAX).await;
    assert!(matches!(missing, Err(BackendError::NotFound)));
}
