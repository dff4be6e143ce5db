use super::*;

#[tokio::test]
async fn game_message_reaches_whole_session_including_sender() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut a = ws_connect(addr).await;
    let mut b = ws_connect(addr).await;

    let session_id = create_session(&mut a).await;
    join_session(&mut a, &session_id, json!({"name": "Ada"})).await;
    join_session(&mut b, &session_id, json!({"name": "Bo"})).await;

    ws_send_json(
        &mut a,
        json!({"type": "game_message", "author": "Ada", "text": "I roll", "dice": [4, 6], "timestamp": 5}),
    )
    .await;

    for ws in [&mut a, &mut b] {
        match ws_expect_message(ws, WAIT, |m| matches!(m, ServerMessage::GameMessage(_))).await {
            ServerMessage::GameMessage(entry) => {
                assert_eq!(entry.author(), Some("Ada"));
                assert_eq!(entry.text(), Some("I roll"));
                assert_eq!(entry.fields().get("dice"), Some(&json!([4, 6])));
                assert!(entry.timestamp().timestamp_millis() > 5);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    server.abort();
}

#[tokio::test]
async fn game_messages_arrive_in_send_order() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut a = ws_connect(addr).await;
    let mut b = ws_connect(addr).await;

    let session_id = create_session(&mut a).await;
    join_session(&mut a, &session_id, json!({})).await;
    join_session(&mut b, &session_id, json!({})).await;

    for i in 0..5 {
        ws_send_json(&mut a, json!({"type": "game_message", "text": format!("m{i}")})).await;
    }

    let mut seen = Vec::new();
    while seen.len() < 5 {
        if let ServerMessage::GameMessage(entry) =
            ws_expect_message(&mut b, WAIT, |m| matches!(m, ServerMessage::GameMessage(_))).await
        {
            seen.push(entry.text().map(str::to_string));
        }
    }
    let expected: Vec<_> = (0..5).map(|i| Some(format!("m{i}"))).collect();
    assert_eq!(seen, expected);

    server.abort();
}

#[tokio::test]
async fn update_player_is_sent_to_others_but_not_sender() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut a = ws_connect(addr).await;
    let mut b = ws_connect(addr).await;

    let session_id = create_session(&mut a).await;
    join_session(&mut a, &session_id, json!({"name": "Ada", "hp": 10})).await;
    join_session(&mut b, &session_id, json!({"name": "Bo"})).await;

    ws_send_json(&mut a, json!({"type": "update_player", "hp": 4, "isMaster": true})).await;

    match ws_expect_message(&mut b, WAIT, |m| matches!(m, ServerMessage::PlayerUpdated { .. })).await {
        ServerMessage::PlayerUpdated {
            player_id,
            player_data,
        } => {
            assert_eq!(player_data.id(), player_id);
            assert_eq!(player_data.name(), Some("Ada"));
            assert_eq!(player_data.attributes().get("hp"), Some(&json!(4)));
            assert!(!player_data.is_master());
        }
        other => panic!("unexpected message: {other:?}"),
    }

    ws_expect_no_message_matching(&mut a, QUIET, |m| {
        matches!(m, ServerMessage::PlayerUpdated { .. })
    })
    .await;

    server.abort();
}

#[tokio::test]
async fn sessions_are_isolated_from_each_other() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut a = ws_connect(addr).await;
    let mut b = ws_connect(addr).await;

    let first = create_session(&mut a).await;
    let second = create_session(&mut b).await;
    assert_ne!(first, second);
    join_session(&mut a, &first, json!({"name": "Ada"})).await;
    join_session(&mut b, &second, json!({"name": "Bo"})).await;

    ws_send_json(&mut a, json!({"type": "game_message", "text": "only for the first table"})).await;
    ws_expect_message(&mut a, WAIT, |m| matches!(m, ServerMessage::GameMessage(_))).await;

    ws_expect_no_message_matching(&mut b, QUIET, |m| {
        matches!(m, ServerMessage::GameMessage(_))
    })
    .await;

    server.abort();
}

#[tokio::test]
async fn messages_before_joining_are_dropped() {
    let state = build_test_state();
    let (addr, server) = spawn_ws_server(state.clone()).await;
    let mut a = ws_connect(addr).await;

    let session_id = create_session(&mut a).await;
    ws_send_json(&mut a, json!({"type": "game_message", "text": "nobody hears"})).await;
    ws_send_json(&mut a, json!({"type": "update_player", "hp": 1})).await;

    ws_expect_no_message_matching(&mut a, QUIET, |m| {
        matches!(m, ServerMessage::GameMessage(_) | ServerMessage::PlayerUpdated { .. })
    })
    .await;

    let registry = state.app.registry.lock().await;
    let session = registry
        .sessions()
        .get(&tavern_domain::SessionId::from(session_id.as_str()))
        .unwrap();
    assert_eq!(session.game_log().len(), 1);
    drop(registry);

    server.abort();
}
