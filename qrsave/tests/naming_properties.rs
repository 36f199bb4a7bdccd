//! Property tests for derived file names

use proptest::prelude::*;
use qrsave::qr::naming::{content_slug, derive_filename, derive_filename_at, metadata_filename};

proptest! {
    #[test]
    fn test_slug_only_contains_safe_characters(content in "\\PC{0,60}") {
        let slug = content_slug(&content);
        prop_assert!(slug.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_'));
        prop_assert!(slug.chars().count() <= 20);
    }

    #[test]
    fn test_custom_name_always_wins(content in "\\PC{0,40}", custom in "[a-z][a-z0-9_]{0,20}", id in "[a-z0-9]{0,8}") {
        prop_assert_eq!(derive_filename(&content, &custom, &id), custom);
    }

    #[test]
    fn test_id_name_is_prefixed(content in "\\PC{0,40}", id in "[a-z0-9_]{1,12}") {
        prop_assert_eq!(derive_filename(&content, "", &id), format!("qr_{id}"));
    }

    #[test]
    fn test_derived_names_have_timestamp_layout(content in "[a-zA-Z0-9 ]{0,30}", secs in 0u32..86_400) {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(secs / 3600, (secs / 60) % 60, secs % 60)
            .unwrap();
        let name = derive_filename_at(&content, "", "", now);
        prop_assert!(name.starts_with("qr_20240229_"));
        prop_assert_eq!(name.len(), "qr_20240229_000000_".len() + content_slug(&content).len());
    }

    #[test]
    fn test_sidecar_name_tracks_image_name(base in "qr_[a-zA-Z0-9_-]{0,30}") {
        let image = format!("{base}.png");
        prop_assert_eq!(metadata_filename(&image), Some(format!("{base}_metadata.json")));
    }
}
