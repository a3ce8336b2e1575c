use super::BubbleList;
use crate::config::Config;
use crate::config::ConfigKey;
use crate::domain::models::Author;
use crate::domain::models::Message;

#[test]
fn it_has_no_cached_lines() {
    let bubble_list = BubbleList::new();

    assert_eq!(bubble_list.cache.len(), 0);
}

#[test]
fn it_caches_lines() {
    Config::set(ConfigKey::Username, "testuser");

    let messages = vec![
        Message::new(Author::Model, "Hi there!"),
        Message::new(Author::User, "Hello!"),
    ];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.cache.len(), 2);
}

#[test]
fn it_returns_correct_length() {
    Config::set(ConfigKey::Username, "testuser");

    let messages = vec![
        Message::new(Author::Model, "Hi there!"),
        Message::new(Author::User, "Hello!"),
    ];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.len(), 6);
}

#[test]
fn it_invalidates_the_cache_on_width_changes() {
    Config::set(ConfigKey::Username, "testuser");

    let messages = vec![Message::new(
        Author::Model,
        "Taking a few deep breaths can help you feel grounded when things get heavy.",
    )];

    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&messages, 50);
    let wide_lines = bubble_list.len();

    bubble_list.set_messages(&messages, 30);

    assert!(bubble_list.len() > wide_lines);
}
