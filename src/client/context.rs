use std::fmt;
use std::sync::Arc;

use crate::cache::CacheStore;

/// The context is a general utility struct provided on event dispatches.
///
/// It gives handlers access to the cache the dispatcher writes into, so records can look up
/// related entities:
///
/// ```rust,no_run
/// # use gateway_model::all::*;
/// # async fn f(ctx: Context, event: &MessageDeleteEvent) {
/// if let Some(message) = event.message(&*ctx.cache) {
///     println!("{} deleted: {}", message.author.tag(), message.content);
/// }
/// # }
/// ```
///
/// A context will only live for the event it was dispatched for. After the event handler
/// finished, it is destroyed and will not be re-used.
#[derive(Clone)]
pub struct Context {
    pub cache: Arc<dyn CacheStore>,
}

impl Context {
    pub(crate) fn new(cache: Arc<dyn CacheStore>) -> Context {
        Context {
            cache,
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").finish_non_exhaustive()
    }
}
