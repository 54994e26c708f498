use crate::core_error::FtpClientError;
use crate::core_url::Credentials;
use crate::dispatcher::{self, Plan};
use crate::mock_server::{MockOptions, MockServer, PASSWORD, USER};
use crate::session::{Direction, Operation, Outcome, Session, SessionState};
use std::net::Ipv4Addr;
use tokio_util::sync::CancellationToken;

fn alice() -> Credentials {
    Credentials {
        username: USER.to_string(),
        password: PASSWORD.to_string(),
    }
}

async fn ready_session(server: &MockServer) -> Session {
    Session::open(&server.config(), &alice(), CancellationToken::new())
        .await
        .unwrap()
}

fn sample_payload() -> Vec<u8> {
    // Spans several transfer buffers
    (0..10_000u32).map(|i| (i % 251) as u8).collect()
}

#[tokio::test]
async fn test_handshake_order() {
    let server = MockServer::start().await;
    let session = ready_session(&server).await;

    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.greeting().code, 220);
    assert_eq!(session.greeting().lines.len(), 2);
    assert_eq!(
        server.commands().await,
        vec!["USER alice", "PASS secret", "TYPE I", "MODE S", "STRU F"]
    );
}

#[tokio::test]
async fn test_preliminary_greeting_waits_for_ready() {
    let server = MockServer::start_with(MockOptions {
        delayed_greeting: true,
        ..MockOptions::default()
    })
    .await;
    let session = ready_session(&server).await;

    assert_eq!(session.greeting().code, 220);
    assert_eq!(session.state(), SessionState::Ready);
}

#[tokio::test]
async fn test_operation_before_negotiation_is_refused() {
    let server = MockServer::start().await;
    let mut session = Session::connect(&server.config(), CancellationToken::new())
        .await
        .unwrap();

    let err = session.make_directory("/early").await.unwrap_err();
    assert!(matches!(err, FtpClientError::Protocol(_)));
    assert!(server.commands().await.is_empty());
}

#[tokio::test]
async fn test_bad_password_is_an_authentication_error() {
    let server = MockServer::start().await;
    let credentials = Credentials {
        username: USER.to_string(),
        password: "wrong".to_string(),
    };
    let err = Session::open(&server.config(), &credentials, CancellationToken::new())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, FtpClientError::Authentication { code: 530, .. }));
    assert!(err.control_usable());
}

#[tokio::test]
async fn test_lenient_login_carries_on() {
    let server = MockServer::start().await;
    let mut config = server.config();
    config.strict_login = false;
    let credentials = Credentials {
        username: "mallory".to_string(),
        password: "guess".to_string(),
    };
    let session = Session::open(&config, &credentials, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(session.state(), SessionState::Ready);
}

#[tokio::test]
async fn test_make_and_remove_directory() {
    let server = MockServer::start().await;
    let mut session = ready_session(&server).await;

    let created = session.make_directory("/reports").await.unwrap();
    assert_eq!(created.code, 257);
    assert!(server.has_dir("/reports").await);

    let removed = session.remove_directory("/reports").await.unwrap();
    assert_eq!(removed.code, 250);
    assert!(!server.has_dir("/reports").await);

    let err = session.remove_directory("/reports").await.unwrap_err();
    assert!(matches!(err, FtpClientError::Rejected { code: 550, .. }));
}

#[tokio::test]
async fn test_delete_missing_file_keeps_session_usable() {
    let server = MockServer::start().await;
    let mut session = ready_session(&server).await;

    let err = session.delete("/nope.txt").await.unwrap_err();
    assert!(matches!(err, FtpClientError::Rejected { code: 550, .. }));

    assert_eq!(session.state(), SessionState::Ready);
    let bye = session.quit().await.unwrap();
    assert_eq!(bye.code, 221);
    assert_eq!(session.state(), SessionState::Disconnected);
}

#[tokio::test]
async fn test_list_returns_listing() {
    let server = MockServer::start().await;
    server.put_file("/pub/readme.txt", b"hello").await;
    let mut session = ready_session(&server).await;

    let listing = session.list(Some("/pub")).await.unwrap();
    assert!(listing.contains("readme.txt"));
    assert!(listing.contains(" 5 "));

    let commands = server.commands().await;
    assert_eq!(&commands[commands.len() - 2..], ["PASV", "LIST /pub"]);
}

#[tokio::test]
async fn test_unspecified_pasv_address_uses_control_peer() {
    let server = MockServer::start_with(MockOptions {
        pasv_address: Ipv4Addr::UNSPECIFIED,
        ..MockOptions::default()
    })
    .await;
    server.put_file("/a.txt", b"abc").await;
    let mut session = ready_session(&server).await;

    let listing = session.list(Some("/")).await.unwrap();
    assert!(listing.contains("a.txt"));
}

#[tokio::test]
async fn test_upload_then_download_round_trip() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("payload.bin");
    let target = dir.path().join("copy.bin");
    std::fs::write(&source, sample_payload()).unwrap();

    let mut session = ready_session(&server).await;
    let sent = session.upload(&source, "/payload.bin").await.unwrap();
    assert_eq!(sent, 10_000);
    assert_eq!(server.file("/payload.bin").await.unwrap(), sample_payload());

    let received = session.download("/payload.bin", &target).await.unwrap();
    assert_eq!(received, 10_000);
    assert_eq!(std::fs::read(&target).unwrap(), sample_payload());
}

#[tokio::test]
async fn test_upload_of_missing_file_sends_no_pasv() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = ready_session(&server).await;

    let err = session
        .upload(&dir.path().join("absent.bin"), "/absent.bin")
        .await
        .unwrap_err();
    assert!(matches!(err, FtpClientError::Filesystem { .. }));
    assert!(!server.commands().await.iter().any(|c| c == "PASV"));
}

#[tokio::test]
async fn test_refused_download_creates_no_local_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing.bin");
    let mut session = ready_session(&server).await;

    let err = session.download("/missing.bin", &target).await.unwrap_err();
    assert!(matches!(err, FtpClientError::Rejected { code: 550, .. }));
    assert!(!target.exists());

    // A fresh data connection works afterwards
    server.put_file("/later.txt", b"x").await;
    assert!(session.list(None).await.is_ok());
}

#[tokio::test]
async fn test_data_connection_closed_when_stor_is_refused() {
    let server = MockServer::start_with(MockOptions {
        reject_transfers_after_accept: true,
        ..MockOptions::default()
    })
    .await;
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("refused.bin");
    std::fs::write(&source, b"never sent").unwrap();
    let mut session = ready_session(&server).await;

    let err = session.upload(&source, "/refused.bin").await.unwrap_err();
    assert!(matches!(err, FtpClientError::Rejected { code: 550, .. }));

    // The server handles commands in order, so this reply means the close check is done
    session.make_directory("/after").await.unwrap();
    assert_eq!(
        server.refused_transfers().await,
        vec![("STOR".to_string(), true)]
    );
    assert!(server.file("/refused.bin").await.is_none());
}

#[tokio::test]
async fn test_data_connection_closed_when_retr_is_refused() {
    let server = MockServer::start_with(MockOptions {
        reject_transfers_after_accept: true,
        ..MockOptions::default()
    })
    .await;
    server.put_file("/guarded.bin", b"secret bytes").await;
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("guarded.bin");
    let mut session = ready_session(&server).await;

    let err = session.download("/guarded.bin", &target).await.unwrap_err();
    assert!(matches!(err, FtpClientError::Rejected { code: 550, .. }));
    assert!(!target.exists());

    session.make_directory("/after").await.unwrap();
    assert_eq!(
        server.refused_transfers().await,
        vec![("RETR".to_string(), true)]
    );
}

#[tokio::test]
async fn test_copy_picks_direction_from_url() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("notes.txt");
    std::fs::write(&local, b"some notes").unwrap();
    let local_arg = local.display().to_string();

    let mut session = ready_session(&server).await;
    let transfer = session
        .copy(&local_arg, "ftp://alice:secret/notes.txt")
        .await
        .unwrap();
    assert_eq!(transfer.direction, Direction::Upload);
    assert_eq!(transfer.remote, "/notes.txt");
    assert!(local.exists());
    assert_eq!(server.file("/notes.txt").await.unwrap(), b"some notes");
}

#[tokio::test]
async fn test_move_upload_removes_local_source() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("draft.txt");
    std::fs::write(&local, b"draft").unwrap();
    let local_arg = local.display().to_string();

    let mut session = ready_session(&server).await;
    let transfer = session
        .move_file(&local_arg, "ftp://alice:secret/draft.txt")
        .await
        .unwrap();
    assert_eq!(transfer.bytes, 5);
    assert!(!local.exists());
    assert_eq!(server.file("/draft.txt").await.unwrap(), b"draft");
}

#[tokio::test]
async fn test_move_download_deletes_remote_source() {
    let server = MockServer::start().await;
    server.put_file("/inbox/mail.txt", b"hi").await;
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("mail.txt");

    let mut session = ready_session(&server).await;
    session
        .move_file("ftp://alice:secret/inbox/mail.txt", &local.display().to_string())
        .await
        .unwrap();
    assert_eq!(std::fs::read(&local).unwrap(), b"hi");
    assert!(server.file("/inbox/mail.txt").await.is_none());

    let commands = server.commands().await;
    assert_eq!(commands.last().map(String::as_str), Some("DELE /inbox/mail.txt"));
}

#[tokio::test]
async fn test_move_keeps_copy_when_delete_fails() {
    let server = MockServer::start_with(MockOptions {
        deny_delete: true,
        ..MockOptions::default()
    })
    .await;
    server.put_file("/locked.txt", b"keep me").await;
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("locked.txt");

    let mut session = ready_session(&server).await;
    let err = session
        .move_file("ftp://alice:secret/locked.txt", &local.display().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, FtpClientError::Rejected { code: 550, .. }));
    assert_eq!(std::fs::read(&local).unwrap(), b"keep me");
    assert!(server.file("/locked.txt").await.is_some());
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let server = MockServer::start_with(MockOptions {
        silent: true,
        ..MockOptions::default()
    })
    .await;
    let mut config = server.config();
    config.io_timeout_secs = 1;

    let err = Session::connect(&config, CancellationToken::new())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, FtpClientError::Timeout(_)));
    assert!(!err.control_usable());
}

#[tokio::test]
async fn test_cancelled_before_connect() {
    let server = MockServer::start().await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = Session::connect(&server.config(), cancel).await.err().unwrap();
    assert!(matches!(err, FtpClientError::Cancelled));
}

#[tokio::test]
async fn test_run_sends_quit_after_rejected_operation() {
    let server = MockServer::start().await;
    let plan = Plan {
        operation: Operation::Delete {
            path: "/ghost".to_string(),
        },
        credentials: alice(),
        host: None,
        port: None,
    };

    let err = dispatcher::run(&server.config(), &plan, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, FtpClientError::Rejected { code: 550, .. }));

    let commands = server.commands().await;
    assert_eq!(&commands[commands.len() - 2..], ["DELE /ghost", "QUIT"]);
}

#[tokio::test]
async fn test_run_mkdir_succeeds() {
    let server = MockServer::start().await;
    let plan = Plan {
        operation: Operation::MakeDirectory {
            path: "/fresh".to_string(),
        },
        credentials: alice(),
        host: None,
        port: None,
    };

    let outcome = dispatcher::run(&server.config(), &plan, CancellationToken::new())
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Reply(ref r) if r.code == 257));
    assert!(server.has_dir("/fresh").await);
    assert_eq!(server.commands().await.last().map(String::as_str), Some("QUIT"));
}
