use super::*;

use tavern_domain::SessionId;
use tavern_shared::JoinError;

#[tokio::test]
async fn when_client_creates_session_then_ack_echoes_request_id() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut ws = ws_connect(addr).await;

    ws_send_json(&mut ws, json!({"type": "create_session", "requestId": "abc"})).await;

    match ws_expect_message(&mut ws, WAIT, |m| matches!(m, ServerMessage::SessionCreated { .. })).await {
        ServerMessage::SessionCreated {
            request_id,
            success,
            session_id,
        } => {
            assert_eq!(request_id.as_deref(), Some("abc"));
            assert!(success);
            assert!(session_id.as_str().starts_with("ucronie-"));
        }
        other => panic!("unexpected message: {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn when_players_join_then_master_goes_to_first_claimant() {
    let state = build_test_state();
    let (addr, server) = spawn_ws_server(state.clone()).await;
    let mut gm = ws_connect(addr).await;
    let mut pc = ws_connect(addr).await;

    let session_id = create_session(&mut gm).await;

    let gm_ack = join_session(&mut gm, &session_id, json!({"name": "Mara", "wantsToBeMaster": true})).await;
    let gm_id = match gm_ack {
        ServerMessage::SessionJoined { success, session, .. } => {
            assert!(success);
            assert_eq!(session.players.len(), 1);
            assert!(session.players[0].is_master());
            assert_eq!(session.master_id, Some(session.players[0].id()));
            assert_eq!(session.game_log.len(), 1);
            session.players[0].id()
        }
        other => panic!("unexpected message: {other:?}"),
    };

    let pc_ack = join_session(&mut pc, &session_id, json!({"name": "Tib", "wantsToBeMaster": true})).await;
    match pc_ack {
        ServerMessage::SessionJoined { session, .. } => {
            assert_eq!(session.players.len(), 2);
            assert_eq!(session.master_id, Some(gm_id));
            assert!(!session.players[1].is_master());
            assert_eq!(session.players[1].name(), Some("Tib"));
        }
        other => panic!("unexpected message: {other:?}"),
    }

    match ws_expect_message(&mut gm, WAIT, |m| matches!(m, ServerMessage::PlayerJoined { .. })).await {
        ServerMessage::PlayerJoined { player } => {
            assert_eq!(player.name(), Some("Tib"));
            assert!(player.is_online());
            assert!(!player.is_master());
        }
        other => panic!("unexpected message: {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn when_joining_unknown_session_then_join_fails() {
    let (addr, server) = spawn_ws_server(build_test_state()).await;
    let mut ws = ws_connect(addr).await;

    ws_send_json(
        &mut ws,
        json!({"type": "join_session", "requestId": "j1", "sessionId": "ucronie-zzzzzz", "playerData": {"name": "Lost"}}),
    )
    .await;

    let msg = ws_expect_message(&mut ws, WAIT, |m| matches!(m, ServerMessage::SessionJoinFailed { .. })).await;
    assert_eq!(
        msg,
        ServerMessage::session_join_failed(Some("j1".into()), JoinError::SessionNotFound)
    );

    server.abort();
}

#[tokio::test]
async fn when_client_disconnects_then_others_are_told_and_record_stays() {
    let state = build_test_state();
    let (addr, server) = spawn_ws_server(state.clone()).await;
    let mut a = ws_connect(addr).await;
    let mut b = ws_connect(addr).await;

    let session_id = create_session(&mut a).await;
    join_session(&mut a, &session_id, json!({"name": "Ada"})).await;
    join_session(&mut b, &session_id, json!({"name": "Bo"})).await;

    b.close(None).await.unwrap();

    match ws_expect_message(&mut a, WAIT, |m| matches!(m, ServerMessage::PlayerDisconnected { .. })).await {
        ServerMessage::PlayerDisconnected { player_name, .. } => {
            assert_eq!(player_name.as_deref(), Some("Bo"));
        }
        other => panic!("unexpected message: {other:?}"),
    }

    let registry = state.app.registry.lock().await;
    let session = registry
        .sessions()
        .get(&SessionId::from(session_id.as_str()))
        .unwrap();
    assert_eq!(session.players().len(), 2);
    assert_eq!(session.players().iter().filter(|p| p.is_online()).count(), 1);
    drop(registry);

    server.abort();
}

#[tokio::test]
async fn when_client_rejoins_on_new_connection_then_a_new_player_is_added() {
    let state = build_test_state();
    let (addr, server) = spawn_ws_server(state.clone()).await;
    let mut host = ws_connect(addr).await;
    let session_id = create_session(&mut host).await;
    join_session(&mut host, &session_id, json!({"name": "Host"})).await;

    let mut first = ws_connect(addr).await;
    join_session(&mut first, &session_id, json!({"name": "Ada"})).await;
    first.close(None).await.unwrap();
    ws_expect_message(&mut host, WAIT, |m| matches!(m, ServerMessage::PlayerDisconnected { .. })).await;

    let mut second = ws_connect(addr).await;
    match join_session(&mut second, &session_id, json!({"name": "Ada"})).await {
        ServerMessage::SessionJoined { session, .. } => {
            let adas: Vec<_> = session
                .players
                .iter()
                .filter(|p| p.name() == Some("Ada"))
                .collect();
            assert_eq!(adas.len(), 2);
            assert!(!adas[0].is_online());
            assert!(adas[1].is_online());
        }
        other => panic!("unexpected message: {other:?}"),
    }

    server.abort();
}
