use async_trait::async_trait;

use super::context::Context;
use crate::model::prelude::*;

/// The core trait for handling events.
///
/// Every method has an empty default body, so implementors only override the events they care
/// about. Handlers receive the typed record by reference; the record also carries the raw
/// payload in its `raw` field.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Dispatched upon startup.
    ///
    /// Provides data about the bot and the guilds it's in.
    async fn ready(&self, _ctx: Context, _ready: &ReadyEvent) {}

    /// Dispatched when a channel is created.
    ///
    /// Provides said channel's data.
    async fn channel_create(&self, _ctx: Context, _event: &ChannelCreateEvent) {}

    /// Dispatched when a channel is updated.
    ///
    /// The channel as it was before the update can be looked up with
    /// [`ChannelUpdateEvent::original`], as long as the cache effect hasn't been applied yet.
    async fn channel_update(&self, _ctx: Context, _event: &ChannelUpdateEvent) {}

    /// Dispatched when a channel is deleted.
    async fn channel_delete(&self, _ctx: Context, _event: &ChannelDeleteEvent) {}

    /// Dispatched when a pin is added or deleted.
    async fn channel_pins_update(&self, _ctx: Context, _pin: &ChannelPinsUpdateEvent) {}

    /// Dispatched when a guild is created, or an existing guild's data is sent to us.
    async fn guild_create(&self, _ctx: Context, _event: &GuildCreateEvent) {}

    /// Dispatched when the guild is updated.
    async fn guild_update(&self, _ctx: Context, _event: &GuildUpdateEvent) {}

    /// Dispatched when a guild is deleted or becomes unavailable.
    async fn guild_delete(&self, _ctx: Context, _event: &GuildDeleteEvent) {}

    /// Dispatched when a user is banned from a guild, or a ban is lifted.
    ///
    /// Provides the guild's id and the user's data. Which of the two happened is given by
    /// [`GuildBanEvent::action`].
    async fn guild_ban(&self, _ctx: Context, _ban: &GuildBanEvent) {}

    /// Dispatched when the emojis are updated.
    async fn guild_emojis_update(&self, _ctx: Context, _event: &GuildEmojisUpdateEvent) {}

    /// Dispatched when a guild's integration is added, updated or removed.
    async fn guild_integrations_update(
        &self,
        _ctx: Context,
        _event: &GuildIntegrationsUpdateEvent,
    ) {
    }

    /// Dispatched when a user joins a guild.
    async fn guild_member_addition(&self, _ctx: Context, _event: &GuildMemberAddEvent) {}

    /// Dispatched when a user's membership ends by leaving, getting kicked, or being banned.
    async fn guild_member_removal(&self, _ctx: Context, _event: &GuildMemberRemoveEvent) {}

    /// Dispatched when a role is created.
    async fn guild_role_create(&self, _ctx: Context, _event: &GuildRoleCreateEvent) {}

    /// Dispatched when a role is updated.
    async fn guild_role_update(&self, _ctx: Context, _event: &GuildRoleUpdateEvent) {}

    /// Dispatched when a role is deleted.
    async fn guild_role_delete(&self, _ctx: Context, _event: &GuildRoleDeleteEvent) {}

    /// Dispatched when a message is created.
    async fn message(&self, _ctx: Context, _event: &MessageCreateEvent) {}

    /// Dispatched when a message is updated.
    async fn message_update(&self, _ctx: Context, _event: &MessageUpdateEvent) {}

    /// Dispatched when a message is deleted.
    ///
    /// The guild Id is absent for messages deleted in private channels.
    async fn message_delete(&self, _ctx: Context, _event: &MessageDeleteEvent) {}

    async fn application_command_create(&self, _ctx: Context, _event: &ApplicationCommandEvent) {}

    async fn application_command_update(&self, _ctx: Context, _event: &ApplicationCommandEvent) {}

    async fn application_command_delete(&self, _ctx: Context, _event: &ApplicationCommandEvent) {}

    /// Dispatched when an event this library doesn't model is received.
    ///
    /// Provides the event's name and its raw payload.
    async fn unknown(&self, _ctx: Context, _event: &UnknownEvent) {}
}

/// This core trait for handling raw events
#[async_trait]
pub trait RawEventHandler: Send + Sync {
    /// Dispatched when any event occurs
    async fn raw_event(&self, _ctx: Context, _ev: &Event) {}
}
