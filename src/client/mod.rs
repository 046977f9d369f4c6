//! The dispatcher turns gateway payloads into typed records, runs the user's event handlers on
//! them and applies each record's cache effect.
//!
//! A [`Dispatcher`] does not own a connection. It is fed payloads, either one at a time through
//! [`Dispatcher::dispatch`] or as a stream of raw gateway frames through [`Dispatcher::run`].
//! Payloads are handled in the order they are given: the handlers and the cache effect of one
//! payload complete before the next payload is decoded.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gateway_model::all::*;
//!
//! struct Handler;
//!
//! #[gateway_model::async_trait]
//! impl EventHandler for Handler {
//!     async fn message_delete(&self, ctx: Context, event: &MessageDeleteEvent) {
//!         if let Some(guild) = event.guild(&*ctx.cache) {
//!             println!("A message was deleted in {}", guild.name);
//!         }
//!     }
//! }
//!
//! # async fn run(frames: futures::stream::BoxStream<'static, String>) {
//! let dispatcher = Dispatcher::builder().event_handler(Handler).build();
//! dispatcher.run(frames).await;
//! # }
//! ```

mod context;
mod dispatch;
mod event_handler;

use std::fmt;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tracing::{debug, instrument, trace, warn};

pub use self::context::Context;
pub use self::event_handler::{EventHandler, RawEventHandler};
use crate::cache::{Cache, CacheStore, Settings as CacheSettings};
use crate::internal::prelude::*;
use crate::model::event::Event;
use crate::model::gateway::GatewayEvent;

/// When a record's cache effect is applied relative to its handlers.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum CacheEffectTiming {
    /// Handlers see the cache as it was before the event, so accessors such as
    /// [`ChannelUpdateEvent::original`] return the previous snapshot.
    ///
    /// [`ChannelUpdateEvent::original`]: crate::model::event::ChannelUpdateEvent::original
    #[default]
    AfterHandlers,
    /// Handlers see the cache with the event's change already applied.
    BeforeHandlers,
}

/// Settings for the dispatcher.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct DispatchSettings {
    /// When to apply each record's cache effect.
    ///
    /// Defaults to [`CacheEffectTiming::AfterHandlers`].
    pub cache_effect: CacheEffectTiming,
}

/// A builder for a [`Dispatcher`].
#[must_use = "Builders do nothing unless built"]
pub struct DispatcherBuilder {
    cache: Option<Arc<dyn CacheStore>>,
    cache_settings: CacheSettings,
    settings: DispatchSettings,
    event_handler: Option<Arc<dyn EventHandler>>,
    raw_event_handler: Option<Arc<dyn RawEventHandler>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            cache: None,
            cache_settings: CacheSettings::default(),
            settings: DispatchSettings::default(),
            event_handler: None,
            raw_event_handler: None,
        }
    }

    /// Sets the cache the dispatcher writes into and hands to handlers.
    ///
    /// Any type implementing both [`CacheSink`] and [`CacheQuery`] can be used. If no cache is
    /// set, a new [`Cache`] is created from [`Self::cache_settings`].
    ///
    /// [`CacheSink`]: crate::cache::CacheSink
    /// [`CacheQuery`]: crate::cache::CacheQuery
    pub fn cache<C: CacheStore + 'static>(mut self, cache: Arc<C>) -> Self {
        self.cache = Some(cache);

        self
    }

    /// Sets the settings of the cache created when no cache is given through [`Self::cache`].
    /// Refer to [`Settings`] for more information.
    ///
    /// [`Settings`]: CacheSettings
    pub fn cache_settings(mut self, settings: CacheSettings) -> Self {
        self.cache_settings = settings;

        self
    }

    /// Sets the settings of the dispatcher.
    pub fn settings(mut self, settings: DispatchSettings) -> Self {
        self.settings = settings;

        self
    }

    /// Sets the event handler with multiple methods for each possible event.
    pub fn event_handler<H>(mut self, event_handler: impl Into<Arc<H>>) -> Self
    where
        H: EventHandler + 'static,
    {
        let event_handler: Arc<H> = event_handler.into();
        self.event_handler = Some(event_handler);

        self
    }

    /// Sets the event handler with a single method where all received gateway events will be
    /// dispatched.
    pub fn raw_event_handler<H>(mut self, raw_event_handler: impl Into<Arc<H>>) -> Self
    where
        H: RawEventHandler + 'static,
    {
        let raw_event_handler: Arc<H> = raw_event_handler.into();
        self.raw_event_handler = Some(raw_event_handler);

        self
    }

    pub fn build(self) -> Dispatcher {
        let cache = match self.cache {
            Some(cache) => cache,
            None => Arc::new(Cache::new_with_settings(self.cache_settings)),
        };

        Dispatcher {
            cache,
            settings: self.settings,
            event_handler: self.event_handler,
            raw_event_handler: self.raw_event_handler,
        }
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes gateway payloads and dispatches them to event handlers.
///
/// Construct one with [`Dispatcher::builder`].
pub struct Dispatcher {
    cache: Arc<dyn CacheStore>,
    settings: DispatchSettings,
    event_handler: Option<Arc<dyn EventHandler>>,
    raw_event_handler: Option<Arc<dyn RawEventHandler>>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// The cache this dispatcher writes into.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn CacheStore> {
        &self.cache
    }

    #[must_use]
    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }

    /// Decodes the payload of a dispatch and handles the resulting record.
    ///
    /// # Errors
    ///
    /// Returns the decoding error if the payload can't be turned into a record. In that case no
    /// handler runs and the cache is left untouched.
    #[instrument(skip(self, data))]
    pub async fn dispatch(&self, name: &str, data: Value) -> Result<()> {
        let event = match Event::decode_named(name, data) {
            Ok(event) => event,
            Err(why) => {
                warn!("Failed to decode {name} payload: {why}");

                return Err(why);
            },
        };

        trace!("Decoded {}", event.event_type());
        self.dispatch_event(event).await;

        Ok(())
    }

    /// Handles an already decoded record.
    pub async fn dispatch_event(&self, event: Event) {
        let context = Context::new(Arc::clone(&self.cache));

        dispatch::dispatch_model(
            event,
            context,
            self.event_handler.clone(),
            self.raw_event_handler.clone(),
            self.settings.cache_effect,
        )
        .await;
    }

    /// Decodes a raw gateway frame, dispatching it if it carries an event.
    ///
    /// Frames with other opcodes, such as heartbeat acknowledgements, are only logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame is malformed or its payload fails to decode.
    #[instrument(skip_all)]
    pub async fn dispatch_frame(&self, frame: &str) -> Result<()> {
        match GatewayEvent::from_json(frame)? {
            GatewayEvent::Dispatch(seq, event) => {
                trace!("Dispatching {} (seq {seq})", event.event_type());
                self.dispatch_event(event).await;
            },
            other => debug!("Received non-dispatch frame: {other:?}"),
        }

        Ok(())
    }

    /// Dispatches every frame of the stream in order, until it ends.
    ///
    /// A frame that fails to decode is logged and skipped.
    pub async fn run<S>(&self, mut frames: S)
    where
        S: Stream<Item = String> + Unpin,
    {
        while let Some(frame) = frames.next().await {
            if let Err(why) = self.dispatch_frame(&frame).await {
                warn!("Skipping gateway frame: {why}");
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("settings", &self.settings)
            .field("event_handler", &self.event_handler.is_some())
            .field("raw_event_handler", &self.raw_event_handler.is_some())
            .finish_non_exhaustive()
    }
}
