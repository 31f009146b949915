//! Session lifecycle: connect, disconnect, failures and remote ends.

use session_client::{ClientError, SessionState};
use session_test_utils::{
    spawn_controller, wait_for_state, wait_until, MockSdk, MockTokenSource, RecordingView,
    TestParticipant,
};

#[tokio::test]
async fn test_connect_and_disconnect() -> Result<(), anyhow::Error> {
    // Arrange
    let sdk = MockSdk::accepting();
    let tokens = MockTokenSource::returning("token-alice");
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, tokens.clone(), &view).await;
    assert_eq!(handle.state(), SessionState::Idle);

    // Act
    handle.connect("alice", "demo").await?;

    // Assert
    assert_eq!(handle.state(), SessionState::Connected);
    assert_eq!(tokens.requests(), vec!["alice"]);

    let calls = sdk.connect_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].token, "token-alice");
    assert_eq!(calls[0].name, "demo");
    assert_eq!(calls[0].log_level, "debug");
    assert_eq!(calls[0].media_tracks, 2);
    assert_eq!(calls[0].data_track, "pointer");

    handle.disconnect().await?;
    assert_eq!(handle.state(), SessionState::Idle);
    assert_eq!(sdk.session_disconnects(), 1);
    view.assert_consistent();

    Ok(())
}

#[tokio::test]
async fn test_controls_follow_state_transitions() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;

    handle.connect("alice", "demo").await?;
    handle.disconnect().await?;

    let expected: Vec<_> = [
        SessionState::Idle,
        SessionState::Connecting,
        SessionState::Connected,
        SessionState::Disconnecting,
        SessionState::Idle,
    ]
    .iter()
    .map(|state| state.controls())
    .collect();
    assert_eq!(view.controls_history(), expected);
    assert_eq!(
        view.state_history(),
        vec![
            SessionState::Idle,
            SessionState::Connecting,
            SessionState::Connected,
            SessionState::Disconnecting,
            SessionState::Idle,
        ]
    );

    let idle = view.last_controls().unwrap();
    assert!(idle.identity_enabled);
    assert!(idle.name_enabled);
    assert!(idle.connect_enabled);
    assert!(!idle.disconnect_enabled);

    Ok(())
}

#[tokio::test]
async fn test_connect_while_connected_is_rejected() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;

    handle.connect("alice", "demo").await?;
    let result = handle.connect("alice", "other").await;

    assert_eq!(
        result,
        Err(ClientError::AlreadyActive(SessionState::Connected))
    );
    assert_eq!(handle.state(), SessionState::Connected);
    assert_eq!(sdk.connect_calls().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_token_failure_returns_to_idle() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(
        &sdk,
        MockTokenSource::failing("token server unreachable"),
        &view,
    )
    .await;

    let result = handle.connect("alice", "demo").await;

    assert_eq!(
        result,
        Err(ClientError::Network("token server unreachable".to_string()))
    );
    assert_eq!(handle.state(), SessionState::Idle);
    assert!(sdk.connect_calls().is_empty());
    assert_eq!(
        view.last_controls(),
        Some(SessionState::Idle.controls())
    );

    Ok(())
}

#[tokio::test]
async fn test_join_failure_returns_to_idle() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::builder().failing_join("room not found").build();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;

    let result = handle.connect("alice", "missing").await;

    assert_eq!(
        result,
        Err(ClientError::SessionJoin("room not found".to_string()))
    );
    assert_eq!(handle.state(), SessionState::Idle);

    // A failed attempt does not block the next one
    let result = handle.connect("alice", "missing").await;
    assert!(matches!(result, Err(ClientError::SessionJoin(_))));
    assert_eq!(sdk.connect_calls().len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_disconnect_cancels_pending_join() -> Result<(), anyhow::Error> {
    // Arrange
    let sdk = MockSdk::builder()
        .gated_join()
        .with_participant(TestParticipant::new("PA1").with_default_tracks().build())
        .build();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;
    let mut states = handle.subscribe();

    let connecting = handle.clone();
    let connect = tokio::spawn(async move { connecting.connect("alice", "demo").await });
    wait_for_state(&mut states, SessionState::Connecting).await;
    wait_until("join reaches the SDK", || !sdk.connect_calls().is_empty()).await;

    // Act
    handle.disconnect().await?;

    // Assert
    assert_eq!(connect.await?, Err(ClientError::Cancelled));
    assert_eq!(handle.state(), SessionState::Idle);
    assert!(sdk.connect_calls()[0].cancel.is_cancelled());

    // Releasing the gate afterwards has no effect on the view
    sdk.release_join();
    tokio::task::yield_now().await;
    assert_eq!(handle.state(), SessionState::Idle);
    assert!(view.elements().is_empty());
    assert_eq!(
        view.state_history(),
        vec![
            SessionState::Idle,
            SessionState::Connecting,
            SessionState::Disconnecting,
            SessionState::Idle,
        ]
    );
    assert_eq!(sdk.session_disconnects(), 0);
    view.assert_consistent();

    Ok(())
}

#[tokio::test]
async fn test_disconnect_cancels_pending_token_fetch() -> Result<(), anyhow::Error> {
    // Arrange
    let sdk = MockSdk::accepting();
    let tokens = MockTokenSource::unresponsive();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, tokens.clone(), &view).await;

    let connecting = handle.clone();
    let connect = tokio::spawn(async move { connecting.connect("alice", "demo").await });
    wait_until("token requested", || !tokens.requests().is_empty()).await;
    assert_eq!(handle.state(), SessionState::Connecting);

    // Act
    handle.disconnect().await?;

    // Assert
    assert_eq!(connect.await?, Err(ClientError::Cancelled));
    assert_eq!(handle.state(), SessionState::Idle);
    assert!(sdk.connect_calls().is_empty());
    assert!(!view.state_history().contains(&SessionState::Connected));
    view.assert_consistent();

    Ok(())
}

#[tokio::test]
async fn test_gated_join_completes_when_released() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::builder().gated_join().build();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;
    let mut states = handle.subscribe();

    let connecting = handle.clone();
    let connect = tokio::spawn(async move { connecting.connect("alice", "demo").await });
    wait_until("join reaches the SDK", || !sdk.connect_calls().is_empty()).await;
    assert_eq!(handle.state(), SessionState::Connecting);

    sdk.release_join();

    assert_eq!(connect.await?, Ok(()));
    wait_for_state(&mut states, SessionState::Connected).await;

    Ok(())
}

#[tokio::test]
async fn test_remote_disconnect_clears_participants() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;
    let mut states = handle.subscribe();

    handle.connect("alice", "demo").await?;
    sdk.send_event(TestParticipant::new("PA1").with_default_tracks().connected())
        .await;
    sdk.send_event(TestParticipant::new("PA2").with_default_tracks().connected())
        .await;
    wait_until("participants rendered", || view.elements().len() == 2).await;

    sdk.send_event(session_client::SessionEvent::Disconnected {
        reason: Some("room completed".to_string()),
    })
    .await;

    wait_for_state(&mut states, SessionState::Idle).await;
    assert!(view.elements().is_empty());
    assert!(view.attachments("PA1").is_empty());
    view.assert_consistent();

    // The session already ended; nothing to leave
    handle.disconnect().await?;
    assert_eq!(sdk.session_disconnects(), 0);

    Ok(())
}

#[tokio::test]
async fn test_closed_event_stream_ends_session() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;
    let mut states = handle.subscribe();

    handle.connect("alice", "demo").await?;
    sdk.send_event(TestParticipant::new("PA1").with_default_tracks().connected())
        .await;
    wait_until("participant rendered", || view.elements().len() == 1).await;

    sdk.drop_session();

    wait_for_state(&mut states, SessionState::Idle).await;
    assert!(view.elements().is_empty());
    view.assert_consistent();

    // Reconnecting starts a fresh session
    handle.connect("alice", "demo").await?;
    assert_eq!(handle.state(), SessionState::Connected);
    assert!(view.elements().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_cancel_leaves_session_and_stops() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;

    handle.connect("alice", "demo").await?;
    handle.cancel();
    task.await?;

    assert!(handle.is_cancelled());
    assert_eq!(handle.state(), SessionState::Idle);
    assert_eq!(sdk.session_disconnects(), 1);
    assert_eq!(
        handle.connect("alice", "demo").await,
        Err(ClientError::ControllerGone)
    );

    Ok(())
}

#[tokio::test]
async fn test_local_media_failure_is_reported() {
    let sdk = MockSdk::builder()
        .failing_local_media("camera permission denied")
        .build();
    let mut view = RecordingView::new();

    let result = session_client::prepare_local_tracks(&sdk, &mut view).await;

    assert!(matches!(result, Err(ClientError::LocalMedia(msg)) if msg == "camera permission denied"));
    assert!(view.local_tracks().is_empty());
}

#[tokio::test]
async fn test_local_tracks_are_previewed() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let mut view = RecordingView::new();

    let tracks = session_client::prepare_local_tracks(&sdk, &mut view).await?;

    assert_eq!(tracks.media.len(), 2);
    let previewed: Vec<_> = view.local_tracks().into_iter().map(|t| t.name).collect();
    assert_eq!(previewed, vec!["microphone", "camera"]);

    Ok(())
}
