use std::io::Write;

use tiny::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.name, "Tiny Web Server");
    assert_eq!(cfg.content.doc_root, ".");
    assert_eq!(cfg.content.default_document, "home.html");
    assert_eq!(cfg.content.cgi_marker, "cgi-bin");
    assert!(!cfg.content.strict_root);
    assert_eq!(cfg.limits.max_line_length, 8192);
    assert_eq!(cfg.limits.max_body_length, 1048576);
}

#[tokio::test]
async fn test_config_load_without_file_takes_port() {
    let cfg = Config::load(8080, None).await.unwrap();

    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.listen_addr(), "0.0.0.0:8080");
}

#[test]
fn test_config_partial_yaml_keeps_other_defaults() {
    let cfg = Config::from_yaml(
        "server:\n  host: 127.0.0.1\ncontent:\n  doc_root: /srv/www\n  strict_root: true\n",
    )
    .unwrap();

    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.server.name, "Tiny Web Server");
    assert_eq!(cfg.content.doc_root, "/srv/www");
    assert_eq!(cfg.content.default_document, "home.html");
    assert!(cfg.content.strict_root);
    assert_eq!(cfg.limits.max_line_length, 8192);
}

#[test]
fn test_config_port_in_yaml_is_ignored() {
    let cfg = Config::from_yaml("server:\n  name: Other\n").unwrap();

    assert_eq!(cfg.server.port, 0);
    assert_eq!(cfg.server.name, "Other");
}

#[tokio::test]
async fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "limits:\n  max_line_length: 1024\n  max_body_length: 4096").unwrap();

    let cfg = Config::load(3000, Some(file.path())).await.unwrap();

    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.limits.max_line_length, 1024);
    assert_eq!(cfg.limits.max_body_length, 4096);
}

#[tokio::test]
async fn test_config_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = Config::load(80, Some(dir.path().join("absent.yaml").as_path()))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("absent.yaml"));
}

#[test]
fn test_config_invalid_yaml_is_an_error() {
    assert!(Config::from_yaml("limits:\n  max_line_length: lots\n").is_err());
}

#[tokio::test]
async fn test_config_clone() {
    let cfg1 = Config::load(9000, None).await.unwrap();
    let cfg2 = cfg1.clone();

    assert_eq!(cfg1.listen_addr(), cfg2.listen_addr());
}
