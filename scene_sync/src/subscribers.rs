use std::{
    mem,
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc,
    },
};

use parking_lot::Mutex;
use tracing::debug;

use crate::{frame::Frame, SyncError};

pub type Callback = Box<dyn FnMut(&Arc<Frame>) + Send>;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observers of one synchronizer. Shared with the render context so it can
/// drop every subscription on teardown.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
    channels: Vec<Sender<Arc<Frame>>>,
    closed: bool,
}

pub type SharedSubscribers = Arc<Mutex<Subscribers>>;

impl Subscribers {
    pub fn shared() -> SharedSubscribers {
        Arc::new(Mutex::new(Self::default()))
    }

    pub fn subscribe(&mut self, callback: Callback) -> Result<SubscriptionId, SyncError> {
        if self.closed {
            return Err(SyncError::ContextClosed);
        }

        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        Ok(id)
    }

    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.callbacks.len();
        self.callbacks.retain(|(x, _)| *x != id);
        self.callbacks.len() != len
    }

    pub fn channel(&mut self) -> Result<Receiver<Arc<Frame>>, SyncError> {
        if self.closed {
            return Err(SyncError::ContextClosed);
        }

        let (tx, rx) = mpsc::channel();
        self.channels.push(tx);
        Ok(rx)
    }

    /// Drops every subscription and refuses new ones.
    pub fn close(&mut self) {
        self.closed = true;
        self.callbacks.clear();
        self.channels.clear();
    }
}

/// Hands `frame` to every observer. The registry is unlocked while callbacks
/// run, so a callback may tear down the owning context.
pub fn notify(shared: &SharedSubscribers, frame: &Arc<Frame>) {
    let (mut callbacks, mut channels) = {
        let mut subscribers = shared.lock();
        (
            mem::take(&mut subscribers.callbacks),
            mem::take(&mut subscribers.channels),
        )
    };

    for (_, callback) in callbacks.iter_mut() {
        callback(frame);
    }

    // Receivers that hung up are forgotten.
    let before = channels.len();
    channels.retain(|tx| tx.send(frame.clone()).is_ok());
    if channels.len() != before {
        debug!("Dropped {} closed frame channels", before - channels.len());
    }

    let mut subscribers = shared.lock();
    if subscribers.closed {
        // Dropped outside the lock, callbacks may own the context.
        drop(subscribers);
        return;
    }

    callbacks.append(&mut subscribers.callbacks);
    channels.append(&mut subscribers.channels);
    subscribers.callbacks = callbacks;
    subscribers.channels = channels;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::{config::Config, properties::Controls};

    use super::*;

    fn frame() -> Arc<Frame> {
        Arc::new(Frame::new(Controls::from(&Config::default())))
    }

    #[test]
    fn callbacks_can_close_the_registry() {
        let shared = Subscribers::shared();
        let count = Arc::new(AtomicUsize::new(0));

        let registry = shared.clone();
        let counter = count.clone();
        let callback: Callback = Box::new(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
            registry.lock().close();
        });
        shared.lock().subscribe(callback).unwrap();
        let rx = shared.lock().channel().unwrap();

        notify(&shared, &frame());
        notify(&shared, &frame());

        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert_eq!(rx.iter().count(), 1);
        assert!(shared.lock().channel().is_err());
    }

    #[test]
    fn keeps_order_and_drops_hung_up_channels() {
        let shared = Subscribers::shared();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let seen = seen.clone();
            let callback: Callback = Box::new(move |_| seen.lock().push(i));
            shared.lock().subscribe(callback).unwrap();
        }
        drop(shared.lock().channel().unwrap());
        let rx = shared.lock().channel().unwrap();

        notify(&shared, &frame());
        notify(&shared, &frame());

        assert_eq!(*seen.lock(), [0, 1, 2, 0, 1, 2]);
        assert_eq!(rx.try_iter().count(), 2);
        assert_eq!(shared.lock().channels.len(), 1);
    }
}
