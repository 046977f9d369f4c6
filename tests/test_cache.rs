#![cfg(feature = "cache")]

use gateway_model::cache::{Cache, CacheQuery, Settings};
use gateway_model::json::{json, Value};
use gateway_model::model::prelude::*;

fn decode(name: &str, payload: Value) -> Event {
    Event::decode_named(name, payload).unwrap()
}

fn guild_create() -> Event {
    let f = std::fs::File::open("./tests/resources/guild_create_1.json").unwrap();
    decode("GUILD_CREATE", serde_json::from_reader(f).unwrap())
}

fn message(id: &str, channel_id: &str) -> Value {
    json!({
        "id": id,
        "channel_id": channel_id,
        "guild_id": "41771983423143937",
        "author": {"id": "53908232506183680", "username": "Mason"},
        "content": format!("message {id}"),
        "timestamp": "2017-07-11T17:27:07.299000+00:00",
    })
}

#[test]
fn test_cache_messages() {
    let mut settings = Settings::default();
    settings.max_messages = 2;
    let cache = Cache::new_with_settings(settings);

    for id in ["3", "4", "5"] {
        decode("MESSAGE_CREATE", message(id, "2")).apply_cache_effect(&cache);
    }

    // The oldest message was evicted to stay within the limit.
    let ids: Vec<_> = cache.channel_messages(ChannelId::new(2)).iter().map(|m| m.id).collect();
    assert_eq!(ids, [MessageId::new(4), MessageId::new(5)]);
    assert!(cache.message(MessageId::new(3)).is_none());

    let mut edit = message("5", "2");
    edit["content"] = json!("edited");
    decode("MESSAGE_UPDATE", edit).apply_cache_effect(&cache);
    assert_eq!(cache.message(MessageId::new(5)).unwrap().content, "edited");

    decode("MESSAGE_DELETE", json!({"id": "5", "channel_id": "2"})).apply_cache_effect(&cache);
    assert!(cache.message(MessageId::new(5)).is_none());
    assert_eq!(cache.channel_messages(ChannelId::new(2)).len(), 1);
}

#[test]
fn message_delete_accessors() {
    let cache = Cache::new();
    guild_create().apply_cache_effect(&cache);
    decode("MESSAGE_CREATE", message("9", "41771983423143937")).apply_cache_effect(&cache);

    let event = decode(
        "MESSAGE_DELETE",
        json!({"id": "9", "channel_id": "41771983423143937", "guild_id": "41771983423143937"}),
    );
    let Event::MessageDelete(delete) = &event else { panic!("expected message delete") };

    // Before the effect is applied the deleted message can still be looked up.
    assert_eq!(delete.message(&cache).unwrap().content, "message 9");
    assert_eq!(delete.channel(&cache).unwrap().name.as_deref(), Some("general"));
    assert_eq!(delete.guild(&cache).unwrap().name, "Discord Developers");

    event.apply_cache_effect(&cache);
    assert!(delete.message(&cache).is_none());
}

#[test]
fn message_delete_without_guild_has_no_guild() {
    let cache = Cache::new();
    guild_create().apply_cache_effect(&cache);

    let event = decode("MESSAGE_DELETE", json!({"id": "1", "channel_id": "2"}));
    let Event::MessageDelete(delete) = event else { panic!("expected message delete") };

    assert!(delete.guild(&cache).is_none());
    assert!(delete.channel(&cache).is_none());
    assert_eq!(delete.channel_id, Snowflake::new(2));
}

#[test]
fn guild_lifecycle() {
    let cache = Cache::new();
    guild_create().apply_cache_effect(&cache);

    let guild_id = GuildId::new(41771983423143937);
    assert_eq!(cache.guilds(), [guild_id]);
    assert_eq!(cache.unknown_members(), 2);

    decode(
        "GUILD_MEMBER_ADD",
        json!({"guild_id": "41771983423143937", "user": {"id": "5", "username": "new"}}),
    )
    .apply_cache_effect(&cache);
    assert_eq!(cache.guild(guild_id).unwrap().members.len(), 2);
    assert_eq!(cache.user(UserId::new(5)).unwrap().name, "new");

    let event = decode(
        "GUILD_MEMBER_REMOVE",
        json!({"guild_id": "41771983423143937", "user": {"id": "5", "username": "new"}}),
    );
    let Event::GuildMemberRemove(remove) = &event else { panic!("expected member remove") };
    assert_eq!(remove.member(&cache).unwrap().user.name, "new");
    event.apply_cache_effect(&cache);
    assert!(cache.member(guild_id, UserId::new(5)).is_none());

    let event = decode("GUILD_DELETE", json!({"id": "41771983423143937", "unavailable": true}));
    let Event::GuildDelete(delete) = &event else { panic!("expected guild delete") };
    assert_eq!(delete.full(&cache).unwrap().name, "Discord Developers");
    event.apply_cache_effect(&cache);

    assert!(cache.guild(guild_id).is_none());
    assert!(cache.channel(ChannelId::new(41771983423143939)).is_none());
    assert!(cache.role(RoleId::new(41771983423143938)).is_none());
    assert!(cache.emoji(EmojiId::new(41771983429993937)).is_none());
}

#[test]
fn role_update_exposes_original() {
    let cache = Cache::new();
    guild_create().apply_cache_effect(&cache);

    let f = std::fs::File::open("./tests/resources/guild_role_update_1.json").unwrap();
    let event = decode("GUILD_ROLE_UPDATE", serde_json::from_reader(f).unwrap());
    let Event::GuildRoleUpdate(update) = &event else { panic!("expected role update") };

    assert_eq!(update.original(&cache).unwrap().name, "Moderators");
    assert_eq!(update.guild(&cache).unwrap().id, update.guild_id);

    event.apply_cache_effect(&cache);
    assert_eq!(update.original(&cache).unwrap().name, "Admins");
    let guild = cache.guild(update.guild_id).unwrap();
    assert_eq!(guild.role(update.role.id).unwrap().name, "Admins");
}

#[test]
fn channel_update_and_delete() {
    let cache = Cache::new();
    guild_create().apply_cache_effect(&cache);

    let mut channel = json!({
        "id": "41771983423143937",
        "guild_id": "41771983423143937",
        "type": 0,
        "name": "general-2",
    });
    let event = decode("CHANNEL_UPDATE", channel.clone());
    let Event::ChannelUpdate(update) = &event else { panic!("expected channel update") };
    assert_eq!(update.original(&cache).unwrap().name.as_deref(), Some("general"));
    event.apply_cache_effect(&cache);

    let guild = cache.guild(GuildId::new(41771983423143937)).unwrap();
    assert_eq!(guild.channels.len(), 2);
    assert_eq!(
        guild.channel(ChannelId::new(41771983423143937)).unwrap().name.as_deref(),
        Some("general-2")
    );

    channel["name"] = json!("gone");
    decode("CHANNEL_DELETE", channel).apply_cache_effect(&cache);
    assert!(cache.channel(ChannelId::new(41771983423143937)).is_none());
    assert_eq!(cache.guild(GuildId::new(41771983423143937)).unwrap().channels.len(), 1);
}

#[test]
fn emojis_update() {
    let cache = Cache::new();
    guild_create().apply_cache_effect(&cache);

    decode(
        "GUILD_EMOJIS_UPDATE",
        json!({
            "guild_id": "41771983423143937",
            "emojis": [
                {"id": "41771983429993937", "name": "LUL2"},
                {"id": "41771983429993938", "name": "POG"},
            ],
        }),
    )
    .apply_cache_effect(&cache);

    assert_eq!(cache.emoji(EmojiId::new(41771983429993937)).unwrap().name, "LUL2");
    let emoji = cache.emoji(EmojiId::new(41771983429993938)).unwrap();
    assert_eq!(emoji.guild_id, GuildId::new(41771983423143937));
    assert_eq!(cache.guild(emoji.guild_id).unwrap().emojis.len(), 2);
}

#[test]
fn ready_caches_current_user() {
    let cache = Cache::new();
    let f = std::fs::File::open("./tests/resources/ready_1.json").unwrap();
    decode("READY", serde_json::from_reader(f).unwrap()).apply_cache_effect(&cache);

    assert_eq!(cache.user(UserId::new(80351110224678912)).unwrap().name, "Nelly");
    assert_eq!(cache.users().len(), 1);
}

#[test]
fn guild_update_keeps_creation_fields() {
    let cache = Cache::new();
    guild_create().apply_cache_effect(&cache);

    decode(
        "GUILD_UPDATE",
        json!({"id": "41771983423143937", "name": "Discord Devs", "owner_id": "80351110224678912"}),
    )
    .apply_cache_effect(&cache);

    let guild = cache.guild(GuildId::new(41771983423143937)).unwrap();
    assert_eq!(guild.name, "Discord Devs");
    assert_eq!(guild.member_count, Some(3));
    assert_eq!(guild.joined_at, Some(Timestamp::parse("2021-04-12T17:19:21.152000+00:00").unwrap()));
    assert_eq!(guild.members.len(), 1);
    assert_eq!(cache.unknown_members(), 2);
}
