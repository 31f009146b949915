//! Participant and track rendering while connected.

use session_test_utils::{
    audio_track, spawn_controller, video_track, wait_until, MockSdk, MockTokenSource,
    RecordingView, TestParticipant,
};

#[tokio::test]
async fn test_one_element_per_connected_participant() -> Result<(), anyhow::Error> {
    // Arrange
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;
    handle.connect("alice", "demo").await?;

    let bob = TestParticipant::new("PA1").with_identity("bob");
    let carol = TestParticipant::new("PA2").with_identity("carol");
    let dave = TestParticipant::new("PA3").with_identity("dave");

    // Act
    for participant in [&bob, &carol, &dave] {
        sdk.send_event(participant.clone().with_default_tracks().connected())
            .await;
    }
    sdk.send_event(carol.disconnected()).await;

    // Assert
    wait_until("carol removed", || view.elements() == vec!["PA1", "PA3"]).await;
    assert_eq!(view.identity_of("PA1").as_deref(), Some("bob"));
    assert_eq!(view.identity_of("PA3").as_deref(), Some("dave"));
    assert_eq!(view.identity_of("PA2"), None);
    view.assert_consistent();

    Ok(())
}

#[tokio::test]
async fn test_participants_present_at_join_are_rendered() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::builder()
        .with_participant(TestParticipant::new("PA1").with_default_tracks().build())
        .with_participant(TestParticipant::new("PA2").build())
        .build();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;

    handle.connect("alice", "demo").await?;

    assert_eq!(view.elements(), vec!["PA1", "PA2"]);
    assert_eq!(view.attachments("PA1"), vec!["PA1-audio", "PA1-video"]);
    assert!(view.attachments("PA2").is_empty());
    view.assert_consistent();

    Ok(())
}

#[tokio::test]
async fn test_duplicate_events_do_not_duplicate_rendering() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;
    handle.connect("alice", "demo").await?;

    let bob = TestParticipant::new("PA1");
    let camera = video_track("TR-cam");

    sdk.send_event(bob.connected()).await;
    sdk.send_event(bob.track_added(camera.clone())).await;
    sdk.send_event(bob.connected()).await;
    sdk.send_event(bob.track_added(camera.clone())).await;
    sdk.send_event(bob.track_added(audio_track("TR-mic"))).await;

    wait_until("microphone attached", || view.attach_calls() == 2).await;
    assert_eq!(view.attachments("PA1"), vec!["TR-cam", "TR-mic"]);
    assert_eq!(view.elements(), vec!["PA1"]);
    view.assert_consistent();

    Ok(())
}

#[tokio::test]
async fn test_track_removed_detaches_media() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;
    handle.connect("alice", "demo").await?;

    let bob = TestParticipant::new("PA1").with_default_tracks();
    sdk.send_event(bob.connected()).await;
    sdk.send_event(bob.track_removed(video_track("PA1-video"))).await;

    wait_until("camera detached", || {
        view.attachments("PA1") == vec!["PA1-audio"]
    })
    .await;

    // Removing it again is a no-op
    sdk.send_event(bob.track_removed(video_track("PA1-video"))).await;
    sdk.send_event(bob.disconnected()).await;
    wait_until("bob removed", || view.elements().is_empty()).await;
    view.assert_consistent();

    Ok(())
}

#[tokio::test]
async fn test_events_for_unknown_participants_are_ignored() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;
    handle.connect("alice", "demo").await?;

    let ghost = TestParticipant::new("PA-ghost");
    sdk.send_event(ghost.track_added(video_track("TR-ghost"))).await;
    sdk.send_event(ghost.disconnected()).await;

    // A known participant afterwards proves the events above were processed
    sdk.send_event(TestParticipant::new("PA1").connected()).await;
    wait_until("PA1 rendered", || view.elements() == vec!["PA1"]).await;
    assert_eq!(view.attach_calls(), 0);
    view.assert_consistent();

    Ok(())
}

#[tokio::test]
async fn test_disconnect_clears_every_participant() -> Result<(), anyhow::Error> {
    let sdk = MockSdk::accepting();
    let view = RecordingView::new();
    let (handle, _task) = spawn_controller(&sdk, MockTokenSource::returning("t"), &view).await;
    handle.connect("alice", "demo").await?;

    for sid in ["PA1", "PA2", "PA3"] {
        sdk.send_event(TestParticipant::new(sid).with_default_tracks().connected())
            .await;
    }
    wait_until("participants rendered", || view.elements().len() == 3).await;

    handle.disconnect().await?;

    assert!(view.elements().is_empty());
    for sid in ["PA1", "PA2", "PA3"] {
        assert!(view.attachments(sid).is_empty());
    }
    view.assert_consistent();

    Ok(())
}
