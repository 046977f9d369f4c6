#![cfg(feature = "client")]

use std::sync::Arc;

use gateway_model::all::*;
use gateway_model::json::json;
use parking_lot::Mutex;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Upsert(Entity),
    Remove(EntityKey),
}

/// A cache that stores nothing and records every write.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }
}

impl CacheSink for Recorder {
    fn upsert(&self, entity: Entity) {
        self.calls.lock().push(Call::Upsert(entity));
    }

    fn remove(&self, key: EntityKey) {
        self.calls.lock().push(Call::Remove(key));
    }
}

impl CacheQuery for Recorder {
    fn channel(&self, _: ChannelId) -> Option<Channel> {
        None
    }

    fn guild(&self, _: GuildId) -> Option<Guild> {
        None
    }

    fn message(&self, _: MessageId) -> Option<Message> {
        None
    }

    fn user(&self, _: UserId) -> Option<User> {
        None
    }

    fn role(&self, _: RoleId) -> Option<Role> {
        None
    }

    fn member(&self, _: GuildId, _: UserId) -> Option<Member> {
        None
    }

    fn emoji(&self, _: EmojiId) -> Option<Emoji> {
        None
    }
}

#[derive(Default)]
struct Handler {
    bans: Mutex<Vec<(GuildId, UserId, BanAction)>>,
    deleted_guilds: Mutex<Vec<Option<Guild>>>,
    message_seen: Mutex<Vec<bool>>,
    unknown: Mutex<Vec<String>>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn guild_ban(&self, _: Context, ban: &GuildBanEvent) {
        self.bans.lock().push((ban.guild_id, ban.user.id, ban.action));
    }

    async fn message(&self, ctx: Context, event: &MessageCreateEvent) {
        self.message_seen.lock().push(ctx.cache.message(event.message.id).is_some());
    }

    async fn message_delete(&self, ctx: Context, event: &MessageDeleteEvent) {
        self.deleted_guilds.lock().push(event.guild(&*ctx.cache));
    }

    async fn unknown(&self, _: Context, event: &UnknownEvent) {
        self.unknown.lock().push(event.kind.clone());
    }
}

struct Panicking;

#[async_trait]
impl EventHandler for Panicking {
    async fn guild_role_delete(&self, _: Context, _: &GuildRoleDeleteEvent) {
        panic!("handler failure");
    }
}

#[derive(Default)]
struct Raw {
    events: Mutex<Vec<EventType>>,
}

#[async_trait]
impl RawEventHandler for Raw {
    async fn raw_event(&self, _: Context, event: &Event) {
        self.events.lock().push(event.event_type());
    }
}

fn message_payload(id: &str) -> gateway_model::json::Value {
    json!({
        "id": id,
        "channel_id": "2",
        "author": {"id": "7", "username": "ferris"},
        "content": "hi",
        "timestamp": "2023-01-01T00:00:00Z",
    })
}

#[tokio::test]
async fn guild_ban_ids() {
    let handler = Arc::new(Handler::default());
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder()
        .event_handler::<Handler>(Arc::clone(&handler))
        .cache(Arc::clone(&recorder))
        .build();

    let payload = json!({"guild_id": "10", "user": {"id": "7", "username": "ferris"}});
    dispatcher.dispatch("GUILD_BAN_ADD", payload.clone()).await.unwrap();
    dispatcher.dispatch("GUILD_BAN_REMOVE", payload).await.unwrap();

    assert_eq!(*handler.bans.lock(), [
        (GuildId::new(10), UserId::new(7), BanAction::Added),
        (GuildId::new(10), UserId::new(7), BanAction::Removed),
    ]);
    assert_eq!(recorder.calls().len(), 2);
}

#[tokio::test]
async fn role_delete_removes_role_once() {
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder().cache(Arc::clone(&recorder)).build();

    dispatcher.dispatch("GUILD_ROLE_DELETE", json!({"guild_id": "10", "role_id": "20"})).await.unwrap();

    assert_eq!(recorder.calls(), [Call::Remove(EntityKey::Role(RoleId::new(20)))]);
}

#[tokio::test]
async fn role_update_upserts_snapshot_from_payload() {
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder().cache(Arc::clone(&recorder)).build();

    let role = json!({
        "id": "20",
        "name": "mods",
        "color": 3447003,
        "hoist": true,
        "position": 2,
        "permissions": "8",
        "managed": false,
        "mentionable": true,
    });
    dispatcher.dispatch("GUILD_ROLE_UPDATE", json!({"guild_id": "10", "role": role})).await.unwrap();

    let calls = recorder.calls();
    let [Call::Upsert(Entity::Role(snapshot))] = calls.as_slice() else {
        panic!("expected one role upsert, got {calls:?}");
    };
    assert_eq!(snapshot.id, RoleId::new(20));
    assert_eq!(snapshot.guild_id, GuildId::new(10));
    assert_eq!(snapshot.name, "mods");
    assert_eq!(snapshot.colour, 3447003);
    assert!(snapshot.hoist);
    assert_eq!(snapshot.position, 2);
    assert_eq!(snapshot.permissions, Permissions::ADMINISTRATOR);
    assert!(!snapshot.managed);
    assert!(snapshot.mentionable);
}

#[tokio::test]
async fn decode_failure_touches_nothing() {
    let handler = Arc::new(Handler::default());
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder()
        .event_handler::<Handler>(Arc::clone(&handler))
        .cache(Arc::clone(&recorder))
        .build();

    let payload = json!({"user": {"id": "7", "username": "ferris"}});
    let err = dispatcher.dispatch("GUILD_BAN_ADD", payload).await.unwrap_err();

    assert!(matches!(err, gateway_model::Error::Decode(DecodeError::MissingField { field: "guild_id", .. })));
    assert!(recorder.calls().is_empty());
    assert!(handler.bans.lock().is_empty());
}

#[tokio::test]
async fn message_delete_without_guild() {
    let handler = Arc::new(Handler::default());
    let dispatcher = Dispatcher::builder().event_handler::<Handler>(Arc::clone(&handler)).build();

    dispatcher.dispatch("MESSAGE_DELETE", json!({"id": "1", "channel_id": "2"})).await.unwrap();

    assert_eq!(*handler.deleted_guilds.lock(), [None]);
}

#[tokio::test]
async fn panicking_handler_still_applies_cache_effect() {
    let recorder = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::builder()
        .event_handler::<Panicking>(Panicking)
        .cache(Arc::clone(&recorder))
        .build();

    dispatcher.dispatch("GUILD_ROLE_DELETE", json!({"guild_id": "10", "role_id": "20"})).await.unwrap();

    assert_eq!(recorder.calls(), [Call::Remove(EntityKey::Role(RoleId::new(20)))]);
}

#[tokio::test]
async fn cache_effect_timing() {
    let handler = Arc::new(Handler::default());
    let after = Dispatcher::builder().event_handler::<Handler>(Arc::clone(&handler)).build();
    after.dispatch("MESSAGE_CREATE", message_payload("1")).await.unwrap();

    let mut settings = DispatchSettings::default();
    settings.cache_effect = CacheEffectTiming::BeforeHandlers;
    let before = Dispatcher::builder()
        .event_handler::<Handler>(Arc::clone(&handler))
        .settings(settings)
        .build();
    before.dispatch("MESSAGE_CREATE", message_payload("1")).await.unwrap();

    // Only handlers dispatched with the effect applied first see their own message.
    assert_eq!(*handler.message_seen.lock(), [false, true]);
    assert!(after.cache().message(MessageId::new(1)).is_some());
}

#[tokio::test]
async fn run_skips_bad_frames() {
    let handler = Arc::new(Handler::default());
    let raw = Arc::new(Raw::default());
    let dispatcher = Dispatcher::builder()
        .event_handler::<Handler>(Arc::clone(&handler))
        .raw_event_handler::<Raw>(Arc::clone(&raw))
        .build();

    let frames = vec![
        r#"{"op": 10, "d": {"heartbeat_interval": 41250}}"#.to_string(),
        json!({"op": 0, "s": 1, "t": "MESSAGE_CREATE", "d": message_payload("1")}).to_string(),
        "not json".to_string(),
        json!({"op": 0, "s": 2, "t": "GUILD_BAN_ADD", "d": {"user": {"id": "7", "username": "ferris"}}})
            .to_string(),
        json!({"op": 0, "s": 3, "t": "SOMETHING_NEW", "d": {"a": 1}}).to_string(),
        json!({"op": 0, "s": 4, "t": "MESSAGE_DELETE", "d": {"id": "1", "channel_id": "2"}}).to_string(),
    ];
    dispatcher.run(futures::stream::iter(frames)).await;

    assert_eq!(*raw.events.lock(), [
        EventType::MessageCreate,
        EventType::Other("SOMETHING_NEW".to_string()),
        EventType::MessageDelete,
    ]);
    assert_eq!(*handler.unknown.lock(), ["SOMETHING_NEW"]);
    assert!(dispatcher.cache().message(MessageId::new(1)).is_none());
}
