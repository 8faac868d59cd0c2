//! Mapping of raw feed records into the canonical catalog shape. This stage
//! deliberately does not validate: absent fields pass through as NULL/empty
//! so a sparse feed entry still lands in storage.

use crate::catalog::NewGame;

use super::feeds::RawFeedRecord;

pub const PLATFORM_ANDROID: &str = "android";
pub const PLATFORM_IOS: &str = "ios";

/// Build a canonical record from a raw feed entry. `platform` is the tag of
/// the feed the record came from, never derived from the record itself.
pub fn normalize(raw: RawFeedRecord, platform: &str) -> NewGame {
    NewGame {
        publisher_id: raw.publisher_id,
        name: raw.name,
        platform: platform.to_string(),
        // The feeds occasionally omit appId; the empty string keeps the
        // record insertable under the (store_id, platform) key.
        store_id: raw.app_id.unwrap_or_default(),
        bundle_id: raw.bundle_id,
        app_version: raw.version,
        is_published: raw
            .publisher_profile_url
            .as_deref()
            .is_some_and(|url| !url.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_field_from_a_complete_record() {
        let raw = RawFeedRecord {
            publisher_id: Some("p1".into()),
            name: Some("G".into()),
            app_id: Some("a1".into()),
            bundle_id: Some("b1".into()),
            version: Some("1.0".into()),
            publisher_profile_url: Some("http://x".into()),
        };
        let game = normalize(raw, PLATFORM_ANDROID);
        assert_eq!(
            game,
            NewGame {
                publisher_id: Some("p1".into()),
                name: Some("G".into()),
                platform: "android".into(),
                store_id: "a1".into(),
                bundle_id: Some("b1".into()),
                app_version: Some("1.0".into()),
                is_published: true,
            }
        );
    }

    #[test]
    fn missing_app_id_becomes_empty_store_id() {
        let game = normalize(RawFeedRecord::default(), PLATFORM_IOS);
        assert_eq!(game.store_id, "");
        assert_eq!(game.platform, "ios");
        assert_eq!(game.publisher_id, None);
        assert_eq!(game.name, None);
    }

    #[test]
    fn published_tracks_profile_url_presence() {
        let with_url = RawFeedRecord {
            publisher_profile_url: Some("https://publisher.example".into()),
            ..Default::default()
        };
        assert!(normalize(with_url, PLATFORM_IOS).is_published);

        let empty_url = RawFeedRecord {
            publisher_profile_url: Some(String::new()),
            ..Default::default()
        };
        assert!(!normalize(empty_url, PLATFORM_IOS).is_published);

        assert!(!normalize(RawFeedRecord::default(), PLATFORM_IOS).is_published);
    }
}
