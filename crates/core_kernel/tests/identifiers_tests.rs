//! Unit tests for the identifier newtypes
//!
//! Covers creation, parsing with and without prefix, conversion, and
//! serde transparency.

use core_kernel::{ClientId, UserId, FileId, HistoryEntryId};
use uuid::Uuid;

mod client_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ClientId::new();
        let id2 = ClientId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ClientId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ClientId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ClientId::prefix(), "CLI");
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = ClientId::new();
        let parsed: ClientId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: ClientId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("CLI-not-a-uuid".parse::<ClientId>().is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = ClientId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}

mod other_id_tests {
    use super::*;

    #[test]
    fn test_prefixes_are_distinct() {
        let prefixes = [
            ClientId::prefix(),
            UserId::prefix(),
            FileId::prefix(),
            HistoryEntryId::prefix(),
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in prefixes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_user_id_display() {
        assert!(UserId::new().to_string().starts_with("USR-"));
    }

    #[test]
    fn test_file_id_round_trip_through_uuid() {
        let id = FileId::new();
        let uuid: Uuid = id.into();
        assert_eq!(FileId::from(uuid), id);
    }

    #[test]
    fn test_default_is_random() {
        assert_ne!(HistoryEntryId::default(), HistoryEntryId::default());
    }
}
