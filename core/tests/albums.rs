//! Album scenarios against the fixture server.

mod common;

use placeholder_core::{Album, BelongsTo, Photo, Resource, TestDataGenerator};

use common::{service, start_server, MISSING_ID};

#[test]
fn get_all_returns_100_albums() {
    let base = start_server();
    let env = service::<Album>(&base).get_all().unwrap();
    env.assert_status(200).unwrap();
    assert_eq!(env.data_or_err().unwrap().len(), 100);
}

#[test]
fn get_by_id_returns_requested_album() {
    let base = start_server();
    let albums = service::<Album>(&base);
    for id in [1, 50, 100] {
        let env = albums.get_by_id(id).unwrap();
        env.assert_status(200).unwrap();
        let album = env.data_or_err().unwrap();
        assert_eq!(album.id(), id);
        assert!(!album.title.is_empty());
    }
}

#[test]
fn missing_album_is_404_without_data() {
    let base = start_server();
    let env = service::<Album>(&base).get_by_id(MISSING_ID).unwrap();
    env.assert_status(404).unwrap();
    assert!(env.data.is_none());
}

#[test]
fn albums_by_user_belong_to_that_user() {
    let base = start_server();
    let albums = service::<Album>(&base);
    for user_id in [1, 5] {
        let env = albums.get_by_relation(user_id).unwrap();
        env.assert_status(200).unwrap();
        let data = env.data_or_err().unwrap();
        assert!(!data.is_empty());
        assert!(data.iter().all(|a| a.foreign_id() == user_id));
    }
}

#[test]
fn photos_for_album_are_nested() {
    let base = start_server();
    let albums = service::<Album>(&base);
    for album_id in [1, 5] {
        let env = albums.get_related::<Photo>(album_id).unwrap();
        env.assert_status(200).unwrap();
        let photos = env.data_or_err().unwrap();
        assert!(!photos.is_empty());
        assert!(photos.iter().all(|p| p.foreign_id() == album_id));
    }
}

#[test]
fn create_assigns_an_id() {
    let base = start_server();
    let new_album = TestDataGenerator::seeded(41).album();
    let env = service::<Album>(&base).create(&new_album).unwrap();
    env.assert_status(201).unwrap();
    let created = env.data_or_err().unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title, new_album.title);
}

#[test]
fn update_returns_200() {
    let base = start_server();
    let mut updated = TestDataGenerator::seeded(42).album();
    updated.id = 1;
    let env = service::<Album>(&base).update(1, &updated).unwrap();
    env.assert_status(200).unwrap();
    assert_eq!(env.data_or_err().unwrap().id, 1);
}

#[test]
fn delete_returns_200() {
    let base = start_server();
    service::<Album>(&base).delete_by_id(1).unwrap().assert_status(200).unwrap();
}
