use super::{CacheSink, CacheUpdate, Entity, EntityKey};
use crate::model::event::{
    ChannelCreateEvent,
    ChannelDeleteEvent,
    ChannelUpdateEvent,
    GuildBanEvent,
    GuildCreateEvent,
    GuildDeleteEvent,
    GuildEmojisUpdateEvent,
    GuildMemberAddEvent,
    GuildMemberRemoveEvent,
    GuildRoleCreateEvent,
    GuildRoleDeleteEvent,
    GuildRoleUpdateEvent,
    GuildUpdateEvent,
    MessageCreateEvent,
    MessageDeleteEvent,
    MessageUpdateEvent,
    ReadyEvent,
};

impl CacheUpdate for ReadyEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::User(self.user.clone()));
    }
}

impl CacheUpdate for ChannelCreateEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::Channel(self.channel.clone()));
    }
}

impl CacheUpdate for ChannelUpdateEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::Channel(self.channel.clone()));
    }
}

impl CacheUpdate for ChannelDeleteEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.remove(EntityKey::Channel(self.channel.id));
    }
}

impl CacheUpdate for GuildCreateEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::Guild(self.guild.clone()));
    }
}

impl CacheUpdate for GuildUpdateEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::Guild(self.guild.clone()));
    }
}

impl CacheUpdate for GuildDeleteEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.remove(EntityKey::Guild(self.guild.id));
    }
}

impl CacheUpdate for GuildBanEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::User(self.user.clone()));
    }
}

impl CacheUpdate for GuildEmojisUpdateEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        for emoji in &self.emojis {
            cache.upsert(Entity::Emoji(emoji.clone()));
        }
    }
}

impl CacheUpdate for GuildMemberAddEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::Member(self.member.clone()));
    }
}

impl CacheUpdate for GuildMemberRemoveEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.remove(EntityKey::Member(self.guild_id, self.user.id));
    }
}

impl CacheUpdate for GuildRoleCreateEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::Role(self.role.clone()));
    }
}

impl CacheUpdate for GuildRoleUpdateEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::Role(self.role.clone()));
    }
}

impl CacheUpdate for GuildRoleDeleteEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.remove(EntityKey::Role(self.role_id));
    }
}

impl CacheUpdate for MessageCreateEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::Message(self.message.clone()));
    }
}

impl CacheUpdate for MessageUpdateEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.upsert(Entity::Message(self.message.clone()));
    }
}

impl CacheUpdate for MessageDeleteEvent {
    fn update<S: CacheSink + ?Sized>(&self, cache: &S) {
        cache.remove(EntityKey::Message(self.id));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::cache::CacheSink;
    use crate::json::json;
    use crate::model::prelude::*;

    #[derive(Default)]
    struct Recorder {
        upserts: RefCell<Vec<Entity>>,
        removes: RefCell<Vec<EntityKey>>,
    }

    impl CacheSink for Recorder {
        fn upsert(&self, entity: Entity) {
            self.upserts.borrow_mut().push(entity);
        }

        fn remove(&self, key: EntityKey) {
            self.removes.borrow_mut().push(key);
        }
    }

    fn effect(name: &str, payload: crate::json::Value) -> Recorder {
        let recorder = Recorder::default();
        Event::decode_named(name, payload).unwrap().apply_cache_effect(&recorder);
        recorder
    }

    #[test]
    fn deletes_remove_by_key() {
        let recorder = effect("GUILD_ROLE_DELETE", json!({"guild_id": "10", "role_id": "20"}));
        assert_eq!(*recorder.removes.borrow(), [EntityKey::Role(RoleId::new(20))]);
        assert!(recorder.upserts.borrow().is_empty());

        let recorder = effect(
            "GUILD_MEMBER_REMOVE",
            json!({"guild_id": "10", "user": {"id": "7", "username": "ferris"}}),
        );
        assert_eq!(*recorder.removes.borrow(), [EntityKey::Member(GuildId::new(10), UserId::new(7))]);

        let recorder = effect("MESSAGE_DELETE", json!({"id": "1", "channel_id": "2"}));
        assert_eq!(*recorder.removes.borrow(), [EntityKey::Message(MessageId::new(1))]);
    }

    #[test]
    fn emojis_update_upserts_each_emoji() {
        let recorder = effect(
            "GUILD_EMOJIS_UPDATE",
            json!({"guild_id": "10", "emojis": [{"id": "1", "name": "a"}, {"id": "2", "name": "b"}]}),
        );

        let keys: Vec<_> = recorder.upserts.borrow().iter().map(Entity::key).collect();
        assert_eq!(keys, [EntityKey::Emoji(EmojiId::new(1)), EntityKey::Emoji(EmojiId::new(2))]);
    }

    #[test]
    fn events_without_entities_do_nothing() {
        for (name, payload) in [
            ("CHANNEL_PINS_UPDATE", json!({"channel_id": "2"})),
            ("GUILD_INTEGRATIONS_UPDATE", json!({"guild_id": "10"})),
            ("APPLICATION_COMMAND_CREATE", json!({"id": "3", "name": "ping"})),
            ("TYPING_START", json!({"channel_id": "2"})),
        ] {
            let recorder = effect(name, payload);
            assert!(recorder.upserts.borrow().is_empty(), "{name} upserted");
            assert!(recorder.removes.borrow().is_empty(), "{name} removed");
        }
    }
}
