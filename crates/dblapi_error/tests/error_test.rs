use dblapi_error::{
    ConfigError, DblError, DblErrorKind, DirectoryError, DirectoryErrorKind, VoteLockError,
    VoteLockErrorKind,
};

#[test]
fn test_status_mapping() {
    assert!(DirectoryError::from_status(200, "/bots/1").is_none());
    assert!(DirectoryError::from_status(204, "/bots/1").is_none());

    let cases = [
        (401, DirectoryErrorKind::Unauthorized),
        (403, DirectoryErrorKind::Forbidden("/bots/1".into())),
        (404, DirectoryErrorKind::NotFound("/bots/1".into())),
        (400, DirectoryErrorKind::BadRequest("/bots/1".into())),
        (500, DirectoryErrorKind::RequestFailed(500)),
        (429, DirectoryErrorKind::RequestFailed(429)),
    ];

    for (status, expected) in cases {
        let err = DirectoryError::from_status(status, "/bots/1").unwrap();
        assert_eq!(err.kind(), &expected, "status {}", status);
    }
}

#[test]
fn test_unauthorized_detection() {
    let err: DblError = DirectoryError::new(DirectoryErrorKind::Unauthorized).into();
    assert!(err.is_unauthorized());
    assert_eq!(err.directory_kind(), Some(&DirectoryErrorKind::Unauthorized));

    let err: DblError = DirectoryError::new(DirectoryErrorKind::RequestFailed(502)).into();
    assert!(!err.is_unauthorized());

    let err: DblError = ConfigError::new("Missing required parameter: token").into();
    assert!(!err.is_unauthorized());
    assert!(err.directory_kind().is_none());
}

#[test]
fn test_location_is_captured() {
    let err = ConfigError::new("Delay can not be less than 15 minutes");
    assert!(err.file.ends_with("error_test.rs"));
    assert!(err.line > 0);
}

#[test]
fn test_lock_error_wraps() {
    let err: DblError = VoteLockError::new(VoteLockErrorKind::Disabled).into();
    assert!(matches!(err.kind(), DblErrorKind::VoteLock(_)));
    assert!(format!("{}", err).contains("disabled"));
}
