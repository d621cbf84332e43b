mod common;

use anyhow::Result;

use notes_api_rust::client::{ApiClient, ClientError, FailureKind, Session};
use notes_api_rust::types::{CreateNoteRequest, Credentials, UpdateNoteRequest};

#[tokio::test]
async fn client_walks_through_a_session() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = ApiClient::new(&server.base_url)?;

    let health = client.health().await?;
    assert_eq!(health["status"], "ok");

    let alice = Credentials::new("alice", "pw1");
    let message = client.register(&alice).await?;
    assert_eq!(message, "User registered successfully");

    let err = client.register(&alice).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Rejected);

    let session = client.login(&alice).await?;
    assert_eq!(session.username, "alice");

    let note = client
        .create_note(
            &session,
            &CreateNoteRequest {
                title: "Groceries".into(),
                content: "milk".into(),
                image: None,
            },
        )
        .await?;

    let notes = client.list_notes(&session).await?;
    assert_eq!(notes, vec![note.clone()]);

    let updated = client
        .update_note(
            &session,
            note.id,
            &UpdateNoteRequest {
                content: Some("milk, eggs".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.content, "milk, eggs");

    // another user cannot touch it
    client.register(&Credentials::new("bob", "pw2")).await?;
    let bob = client.login(&Credentials::new("bob", "pw2")).await?;
    assert!(client.list_notes(&bob).await?.is_empty());
    let err = client.delete_note(&bob, note.id).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);

    client.delete_note(&session, note.id).await?;
    assert!(client.list_notes(&session).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn client_reports_auth_failures() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = ApiClient::new(&server.base_url)?;

    let forged = Session {
        username: "mallory".into(),
        token: "forged".into(),
    };
    let err = client.list_notes(&forged).await.unwrap_err();

    assert!(matches!(err, ClientError::Api { .. }));
    assert_eq!(err.kind(), FailureKind::Auth);
    assert_eq!(err.user_message(), "Auth error, please login again");

    let err = client
        .login(&Credentials::new("alice", "pw"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Rejected);

    Ok(())
}
