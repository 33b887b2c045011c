use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Weak,
};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{
    config::Config,
    subscribers::{Subscribers, SharedSubscribers},
    Synchronizer, SyncError,
};

/// Owns the front end binding. Every synchronizer is created through a
/// context, and tearing the context down drops all of their subscriptions.
#[derive(Clone)]
pub struct RenderContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    config: Config,
    components: Mutex<Vec<Weak<Mutex<Subscribers>>>>,
    closed: AtomicBool,
}

impl RenderContext {
    pub fn init(config: Config) -> Self {
        info!("Initializing render context for `{}`", config.bundle);
        Self {
            inner: Arc::new(ContextInner {
                config,
                components: Mutex::new(Vec::new()),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Name of the front end module frames are published to.
    pub fn bundle(&self) -> &str {
        &self.inner.config.bundle
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn create_component(&self) -> Result<Synchronizer, SyncError> {
        if self.is_closed() {
            return Err(SyncError::ContextClosed);
        }

        let subscribers: SharedSubscribers = Subscribers::shared();
        let mut components = self.inner.components.lock();
        components.retain(|x| x.strong_count() > 0);
        components.push(Arc::downgrade(&subscribers));
        debug!("Created component #{}", components.len());

        Ok(Synchronizer::with_subscribers(&self.inner.config, subscribers))
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Drops the subscriptions of every component and refuses new
    /// components. Calling it again does nothing.
    pub fn teardown(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let components = std::mem::take(&mut *self.inner.components.lock());
        let live = (components.iter())
            .filter_map(Weak::upgrade)
            .inspect(|subscribers| subscribers.lock().close())
            .count();
        info!("Tore down render context ({live} live components)");
    }
}

impl Drop for ContextInner {
    fn drop(&mut self) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }

        for subscribers in self.components.get_mut().iter().filter_map(Weak::upgrade) {
            subscribers.lock().close();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use crate::properties::PropertyChange;

    use super::*;

    #[test]
    fn teardown_drops_subscriptions() {
        let context = RenderContext::init(Config::default());
        let mut a = context.create_component().unwrap();
        let mut b = context.create_component().unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        for sync in [&a, &b] {
            let counter = count.clone();
            sync.subscribe(move |_| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        }
        let rx = a.watch().unwrap();

        a.apply(&PropertyChange::AxesVisible(false)).unwrap();
        assert_eq!(count.load(Ordering::Relaxed), 1);

        context.teardown();
        assert!(context.is_closed());

        a.apply(&PropertyChange::AxesVisible(true)).unwrap();
        b.apply(&PropertyChange::AxesVisible(false)).unwrap();
        assert_eq!(count.load(Ordering::Relaxed), 1);

        // The channel saw the first frame, then its sender was dropped.
        assert_eq!(rx.iter().count(), 1);

        // Frames still update locally.
        assert!(a.frame().controls.axes_visible);
        assert_eq!(a.subscribe(|_| ()), Err(SyncError::ContextClosed));
        assert!(matches!(a.watch(), Err(SyncError::ContextClosed)));
    }

    #[test]
    fn callback_can_tear_down_context() {
        let context = RenderContext::init(Config::default());
        let mut sync = context.create_component().unwrap();
        let rx = sync.watch().unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let owner = context.clone();
        sync.subscribe(move |frame| {
            counter.fetch_add(1, Ordering::Relaxed);
            if !frame.controls.axes_visible {
                owner.teardown();
            }
        })
        .unwrap();

        sync.apply(&PropertyChange::AxesVisible(false)).unwrap();
        assert!(context.is_closed());

        sync.apply(&PropertyChange::AxesVisible(true)).unwrap();
        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert_eq!(rx.iter().count(), 1);
        assert!(matches!(sync.watch(), Err(SyncError::ContextClosed)));
    }

    #[test]
    fn closed_context_refuses_components() {
        let context = RenderContext::init(Config::default());
        context.teardown();
        context.teardown();

        assert!(matches!(
            context.create_component(),
            Err(SyncError::ContextClosed)
        ));
    }

    #[test]
    fn dropping_context_closes_components() {
        let context = RenderContext::init(Config {
            bundle: "viewer.js".into(),
            intensity: 1.0,
            ..Default::default()
        });
        assert_eq!(context.bundle(), "viewer.js");

        let sync = context.create_component().unwrap();
        assert_eq!(sync.frame().controls.intensity, 1.0);

        drop(context);
        assert!(matches!(sync.watch(), Err(SyncError::ContextClosed)));
    }
}
