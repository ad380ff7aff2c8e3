//! Data model shared by the PassWeaver crates.

pub mod error;
pub mod ids;
pub mod profile;
pub mod session;

pub use error::{ModelError, PwvError, Result};
pub use ids::{EPHEMERAL_PREFIX, SessionId};
pub use profile::{Constraints, DEFAULT_MIN_LENGTH, InputProfile};
pub use session::{Cursor, SessionRecord, SessionState, now_timestamp};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_rejects_blank() {
        assert!(SessionId::new("   ").is_err());
        assert_eq!(SessionId::new(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn generated_ids_are_short_hex() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), 12);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!id.is_ephemeral());
        assert!(SessionId::ephemeral().is_ephemeral());
    }

    #[test]
    fn state_follows_cursor() {
        let mut record = SessionRecord::new(
            SessionId::generate(),
            InputProfile::default(),
            Constraints::default(),
        );
        assert_eq!(record.state(3), SessionState::New);
        record.cursor = Cursor::new(1, 4);
        assert_eq!(record.state(3), SessionState::InProgress);
        record.cursor = Cursor::new(3, 0);
        assert_eq!(record.state(3), SessionState::Completed);
        assert_eq!(record.state(5), SessionState::InProgress);
    }
}
