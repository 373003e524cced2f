use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error code for unique index violations
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether a write was rejected by a unique index
pub fn is_duplicate_key_error(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mongodb::options::ClientOptions;

    #[tokio::test]
    async fn test_other_errors_are_not_duplicates() {
        let err = ClientOptions::parse("not-a-mongo-url").await.unwrap_err();
        assert!(!is_duplicate_key_error(&err));
    }
}
