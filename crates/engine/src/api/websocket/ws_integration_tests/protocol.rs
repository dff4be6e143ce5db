use super::*;

#[tokio::test]
async fn ping_is_answered_with_pong_and_request_id() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut ws = ws_connect(addr).await;

    ws_send_client(
        &mut ws,
        &ClientMessage::Ping {
            request_id: Some("p1".to_string()),
        },
    )
    .await;

    let msg = ws_expect_message(&mut ws, WAIT, |m| matches!(m, ServerMessage::Pong { .. })).await;
    assert_eq!(
        msg,
        ServerMessage::Pong {
            request_id: Some("p1".to_string())
        }
    );

    server.abort();
}

#[tokio::test]
async fn malformed_frame_gets_parse_error_and_connection_survives() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut ws = ws_connect(addr).await;

    ws.send(tokio_tungstenite::tungstenite::Message::Text("{not json".into()))
        .await
        .unwrap();

    match ws_expect_message(&mut ws, WAIT, |m| matches!(m, ServerMessage::Error { .. })).await {
        ServerMessage::Error { code, .. } => assert_eq!(code, "PARSE_ERROR"),
        other => panic!("unexpected message: {other:?}"),
    }

    ws_send_client(&mut ws, &ClientMessage::Ping { request_id: None }).await;
    ws_expect_message(&mut ws, WAIT, |m| matches!(m, ServerMessage::Pong { .. })).await;

    server.abort();
}

#[tokio::test]
async fn unknown_event_is_ignored() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut ws = ws_connect(addr).await;

    ws_send_json(&mut ws, json!({"type": "summon_dragon", "size": "huge"})).await;

    ws_expect_no_message_matching(&mut ws, QUIET, |_| true).await;

    server.abort();
}

#[tokio::test]
async fn connections_are_tracked_until_close() {
    let state = build_test_state();
    let (addr, server) = spawn_ws_server(state.clone()).await;
    let mut ws = ws_connect(addr).await;

    ws_send_client(&mut ws, &ClientMessage::Ping { request_id: None }).await;
    ws_expect_message(&mut ws, WAIT, |m| matches!(m, ServerMessage::Pong { .. })).await;
    assert_eq!(state.connections.len(), 1);

    ws.close(None).await.unwrap();
    tokio::time::timeout(WAIT, async {
        while !state.connections.is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    server.abort();
}

#[tokio::test]
async fn join_with_numeric_session_id_fails_as_not_found() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut ws = ws_connect(addr).await;

    ws_send_json(
        &mut ws,
        json!({"type": "join_session", "requestId": "j1", "sessionId": 42, "playerData": {"name": "Ada"}}),
    )
    .await;

    let msg = ws_expect_message(&mut ws, WAIT, |m| {
        matches!(m, ServerMessage::SessionJoinFailed { .. } | ServerMessage::Error { .. })
    })
    .await;
    assert_eq!(
        msg,
        ServerMessage::session_join_failed(Some("j1".into()), tavern_shared::JoinError::SessionNotFound)
    );

    server.abort();
}

#[tokio::test]
async fn numeric_request_id_is_echoed_as_string() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut ws = ws_connect(addr).await;

    ws_send_json(&mut ws, json!({"type": "create_session", "requestId": 1})).await;
    match ws_expect_message(&mut ws, WAIT, |m| {
        matches!(m, ServerMessage::SessionCreated { .. } | ServerMessage::Error { .. })
    })
    .await
    {
        ServerMessage::SessionCreated {
            request_id,
            success,
            ..
        } => {
            assert_eq!(request_id.as_deref(), Some("1"));
            assert!(success);
        }
        other => panic!("unexpected message: {other:?}"),
    }

    ws_send_json(
        &mut ws,
        json!({"type": "join_session", "requestId": 7, "sessionId": "ucronie-nope00", "playerData": {}}),
    )
    .await;
    let msg = ws_expect_message(&mut ws, WAIT, |m| {
        matches!(m, ServerMessage::SessionJoinFailed { .. } | ServerMessage::Error { .. })
    })
    .await;
    assert_eq!(
        msg,
        ServerMessage::session_join_failed(Some("7".into()), tavern_shared::JoinError::SessionNotFound)
    );

    server.abort();
}
