use media_api::domain::media::{
    bucket::Bucket,
    errors::ValidationError,
    value_objects::{AvatarKey, ImageReference, UserId},
};

#[test]
fn avatar_key_has_one_object_per_user_and_extension() {
    let first = AvatarKey::derive("u1", "holiday.png").expect("valid");
    let second = AvatarKey::derive("u1", "portrait.PNG").expect("valid");
    assert_eq!(first.to_string(), "u1/avatar.png");
    assert_eq!(first, second);
}

#[test]
fn avatar_key_rejects_unknown_extensions() {
    assert!(matches!(
        AvatarKey::derive("u1", "payload.html"),
        Err(ValidationError::UnsupportedExtension { .. })
    ));
}

#[test]
fn user_id_accepts_uuid_and_short_ids() {
    assert!(UserId::new("u1").is_ok());
    assert!(UserId::new("0194f123-4567-7abc-8def-0123456789ab").is_ok());
    assert!(UserId::new("a/b").is_err());
}

#[test]
fn only_store_backed_references_need_an_object_name() {
    assert_eq!(ImageReference::parse(Some("public/foo.png")).object_name(), Some("foo.png"));
    assert_eq!(ImageReference::parse(Some("foo.png")).object_name(), Some("foo.png"));
    assert_eq!(ImageReference::parse(Some("/foo.png")).object_name(), None);
    assert_eq!(ImageReference::parse(Some("https://x.test/foo.png")).object_name(), None);
    assert_eq!(ImageReference::parse(None).object_name(), None);
}

#[test]
fn bucket_names_round_trip() {
    for bucket in [Bucket::Avatars, Bucket::CourseImages] {
        assert_eq!(bucket.as_str().parse::<Bucket>(), Ok(bucket));
    }
    assert!("public".parse::<Bucket>().is_err());
}
