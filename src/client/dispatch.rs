use std::sync::Arc;

use tokio::task::JoinError;
use tracing::{error, trace};

use super::event_handler::{EventHandler, RawEventHandler};
use super::{CacheEffectTiming, Context};
use crate::internal::tokio::spawn_named;
use crate::model::event::Event;

/// Calls the user's event handlers and applies the event's cache effect.
///
/// Each handler runs in its own task, so a panicking handler is reported here instead of
/// unwinding into the caller. The cache effect is applied exactly once whether or not the
/// handlers completed.
pub(crate) async fn dispatch_model(
    event: Event,
    context: Context,
    event_handler: Option<Arc<dyn EventHandler>>,
    raw_event_handler: Option<Arc<dyn RawEventHandler>>,
    cache_effect: CacheEffectTiming,
) {
    let event = Arc::new(event);

    if cache_effect == CacheEffectTiming::BeforeHandlers {
        apply_cache_effect(&context, &event);
    }

    if let Some(raw_handler) = raw_event_handler {
        let (ctx, ev) = (context.clone(), Arc::clone(&event));
        let task = spawn_named("dispatch::raw_event_handler", async move {
            raw_handler.raw_event(ctx, &ev).await;
        });

        if let Err(why) = task.await {
            report(&event, "raw event handler", &why);
        }
    }

    if let Some(handler) = event_handler {
        let (ctx, ev) = (context.clone(), Arc::clone(&event));
        let task = spawn_named("dispatch::event_handler", async move {
            handle_event(ctx, &*handler, &ev).await;
        });

        if let Err(why) = task.await {
            report(&event, "event handler", &why);
        }
    }

    if cache_effect == CacheEffectTiming::AfterHandlers {
        apply_cache_effect(&context, &event);
    }
}

fn apply_cache_effect(context: &Context, event: &Event) {
    trace!("Applying cache effect of {}", event.event_type());
    event.apply_cache_effect(&*context.cache);
}

fn report(event: &Event, which: &str, why: &JoinError) {
    if why.is_panic() {
        error!("The {which} panicked while handling {}", event.event_type());
    } else {
        error!("The {which} for {} was cancelled: {why}", event.event_type());
    }
}

async fn handle_event(context: Context, handler: &dyn EventHandler, event: &Event) {
    match event {
        Event::Ready(event) => handler.ready(context, event).await,
        Event::ApplicationCommandCreate(event) => {
            handler.application_command_create(context, event).await;
        },
        Event::ApplicationCommandUpdate(event) => {
            handler.application_command_update(context, event).await;
        },
        Event::ApplicationCommandDelete(event) => {
            handler.application_command_delete(context, event).await;
        },
        Event::ChannelCreate(event) => handler.channel_create(context, event).await,
        Event::ChannelUpdate(event) => handler.channel_update(context, event).await,
        Event::ChannelDelete(event) => handler.channel_delete(context, event).await,
        Event::ChannelPinsUpdate(event) => handler.channel_pins_update(context, event).await,
        Event::GuildCreate(event) => handler.guild_create(context, event).await,
        Event::GuildUpdate(event) => handler.guild_update(context, event).await,
        Event::GuildDelete(event) => handler.guild_delete(context, event).await,
        Event::GuildBan(event) => handler.guild_ban(context, event).await,
        Event::GuildEmojisUpdate(event) => handler.guild_emojis_update(context, event).await,
        Event::GuildIntegrationsUpdate(event) => {
            handler.guild_integrations_update(context, event).await;
        },
        Event::GuildMemberAdd(event) => handler.guild_member_addition(context, event).await,
        Event::GuildMemberRemove(event) => handler.guild_member_removal(context, event).await,
        Event::GuildRoleCreate(event) => handler.guild_role_create(context, event).await,
        Event::GuildRoleUpdate(event) => handler.guild_role_update(context, event).await,
        Event::GuildRoleDelete(event) => handler.guild_role_delete(context, event).await,
        Event::MessageCreate(event) => handler.message(context, event).await,
        Event::MessageUpdate(event) => handler.message_update(context, event).await,
        Event::MessageDelete(event) => handler.message_delete(context, event).await,
        Event::Unknown(event) => handler.unknown(context, event).await,
    }
}
