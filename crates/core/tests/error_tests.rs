// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use spending_stats_core::errors::{CoreError, FOREIGN_CATEGORIES_MESSAGE};

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_argument() {
        let err = CoreError::InvalidArgument("Spend currency is required".into());
        assert_eq!(err.to_string(), "Invalid argument: Spend currency is required");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("amount must not be negative".into());
        assert_eq!(err.to_string(), "Validation failed: amount must not be negative");
    }

    #[test]
    fn access_denied_is_the_bare_message() {
        let err = CoreError::AccessDenied(FOREIGN_CATEGORIES_MESSAGE.into());
        assert_eq!(err.to_string(), "Can`t query categories for another user");
    }

    #[test]
    fn depth_limit_names_the_limit() {
        assert_eq!(
            CoreError::DepthLimitExceeded(2).to_string(),
            "Can`t fetch over 2 friends sub-queries"
        );
        assert_eq!(
            CoreError::DepthLimitExceeded(5).to_string(),
            "Can`t fetch over 5 friends sub-queries"
        );
    }

    #[test]
    fn user_not_found() {
        let err = CoreError::UserNotFound("ghost".into());
        assert_eq!(err.to_string(), "User not found: ghost");
    }

    #[test]
    fn category_not_found() {
        let err = CoreError::CategoryNotFound("Taxi".into());
        assert_eq!(err.to_string(), "Category not found: Taxi");
    }

    #[test]
    fn rate_not_available() {
        let err = CoreError::RateNotAvailable("KZT".into());
        assert_eq!(err.to_string(), "Rate not available for KZT");
    }

    #[test]
    fn rate_provider() {
        let err = CoreError::RateProvider {
            provider: "Json".into(),
            message: "expected value".into(),
        };
        assert_eq!(err.to_string(), "Rate provider error (Json): expected value");
    }

    #[test]
    fn unsupported_version() {
        let err = CoreError::UnsupportedVersion(99);
        assert_eq!(err.to_string(), "Unsupported file version: 99");
    }

    #[test]
    fn invalid_file_format() {
        let err = CoreError::InvalidFileFormat("bad tag".into());
        assert_eq!(err.to_string(), "Invalid file format: bad tag");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn io_error_becomes_file_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("missing")));
    }

    #[test]
    fn serde_json_error_becomes_deserialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates() {
        fn read() -> Result<(), CoreError> {
            std::fs::read("/definitely/not/here/ledger.json")?;
            Ok(())
        }
        assert!(matches!(read(), Err(CoreError::FileIO(_))));
    }
}
