/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! End-to-end flows through the public API: configuration feeding the
//! poller, the distance calculator and the REST server.

use std::sync::Arc;
use std::time::Duration;

use tickwait::config::ConfigManager;
use tickwait::data::{InMemoryPersonStore, PersonStore};
use tickwait::distance::EditDistance;
use tickwait::logging::MemoryLogger;
use tickwait::poll::{PollError, PollState, Poller, SuccessPolicy};
use tickwait::server::Server;
use tickwait::shutdown::{Shutdown, ShutdownSignal};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const CONFIG: &str = r#"
listen_address: "127.0.0.1:0"
poll:
  recheck_interval_ms: 10
  deadline_ms: 100
  policy: stop_on_success
distance:
  empty_input_policy: zero_on_empty
people:
  - { id: 7, name: "grace" }
"#;

#[test]
fn configured_distance_policy_applies() {
    let cfg = ConfigManager::parse(CONFIG).unwrap();
    let ed = EditDistance::new(cfg.empty_input_policy);
    assert_eq!(ed.distance_str("", "abc"), 0);
    assert_eq!(ed.distance_str("flaw", "lawn"), 2);
}

#[tokio::test(start_paused = true)]
async fn configured_poller_times_out_on_false_probe() {
    let cfg = ConfigManager::parse(CONFIG).unwrap();
    assert_eq!(cfg.poll.policy, SuccessPolicy::StopOnSuccess);

    let poller = Poller::new(cfg.poll, Arc::new(MemoryLogger::new()));
    let err = poller
        .run(&mut || false, &ShutdownSignal::never())
        .await
        .unwrap_err();

    match err {
        PollError::TimedOut { deadline, attempts } => {
            assert_eq!(deadline, Duration::from_millis(100));
            assert_eq!(attempts, 9);
        }
        other => panic!("expected TimedOut, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn configured_poller_succeeds_on_ready_probe() {
    let cfg = ConfigManager::parse(CONFIG).unwrap();
    let poller = Poller::new(cfg.poll, Arc::new(MemoryLogger::new()));

    let mut ready_after = 4;
    let report = poller
        .run(
            &mut || {
                ready_after -= 1;
                ready_after == 0
            },
            &ShutdownSignal::never(),
        )
        .await
        .unwrap();
    assert_eq!(report.state, PollState::Succeeded);
    assert_eq!(report.attempts, 4);
}

#[tokio::test]
async fn configured_server_serves_seeded_people() {
    let cfg = ConfigManager::parse(CONFIG).unwrap();
    let store = Arc::new(InMemoryPersonStore::with_people(cfg.people.clone()));
    assert!(store.find_by_id(7).is_ok());

    let server = Server::bind(&cfg.listen_address, store, Arc::new(MemoryLogger::new()))
        .await
        .unwrap();
    let addr = server.local_addr();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.listen(shutdown.signal()));

    for (path, status, needle) in [
        ("/people/7", "200", r#""name":"grace""#),
        ("/people/8", "404", "not found"),
    ] {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with(&format!("HTTP/1.1 {status}")), "{response}");
        assert!(response.contains(needle), "{response}");
    }

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop")
        .unwrap()
        .unwrap();
}
