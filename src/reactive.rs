// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Replay-last value subjects.
//!
//! A [`Subject`] holds the most recently published value and a list of
//! observers. Publishing swaps the value and calls every observer in
//! registration order; subscribing registers an observer and immediately
//! hands it the current value. Locks are released before observers run, so
//! an observer may publish again or subscribe without deadlocking.
//!
//! A publish made while another publish on the same subject is still
//! delivering is queued: every observer sees values in publish order and
//! the last value it sees is the one `get()` returns.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: Mutex<T>,
    observers: Mutex<Vec<(u64, Observer<T>)>>,
    next_id: AtomicU64,
    pending: Mutex<Delivery<T>>,
}

struct Delivery<T> {
    queue: VecDeque<T>,
    draining: bool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

trait Detach: Send + Sync {
    fn detach(&self, id: u64);
}

impl<T: Send + 'static> Detach for Inner<T> {
    fn detach(&self, id: u64) {
        lock(&self.observers).retain(|(oid, _)| *oid != id);
    }
}

pub struct Subject<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Subject<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(initial),
                observers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                pending: Mutex::new(Delivery {
                    queue: VecDeque::new(),
                    draining: false,
                }),
            }),
        }
    }

    pub fn get(&self) -> T {
        lock(&self.inner.value).clone()
    }

    pub fn publish(&self, value: T) {
        {
            let mut pending = lock(&self.inner.pending);
            *lock(&self.inner.value) = value.clone();
            pending.queue.push_back(value);
            if pending.draining {
                return;
            }
            pending.draining = true;
        }
        loop {
            let next = {
                let mut pending = lock(&self.inner.pending);
                let next = pending.queue.pop_front();
                if next.is_none() {
                    pending.draining = false;
                }
                next
            };
            let Some(value) = next else { break };
            let observers: Vec<Observer<T>> = lock(&self.inner.observers)
                .iter()
                .map(|(_, o)| Arc::clone(o))
                .collect();
            for observer in observers {
                observer(&value);
            }
        }
    }

    /// Registers `observer` and replays the current value to it at once.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let observer: Observer<T> = Arc::new(observer);
        lock(&self.inner.observers).push((id, Arc::clone(&observer)));
        let current = self.get();
        observer(&current);
        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        let source: Weak<dyn Detach> = weak;
        Subscription {
            id,
            source: Some(source),
        }
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.inner.observers).len()
    }

    pub fn read_only(&self) -> Derived<T> {
        Derived(self.clone())
    }
}

/// Read side of a [`Subject`]: can be observed but not published to.
pub struct Derived<T>(Subject<T>);

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Derived(self.0.clone())
    }
}

impl<T: Clone + Send + 'static> Derived<T> {
    pub fn get(&self) -> T {
        self.0.get()
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.0.subscribe(observer)
    }
}

/// Handle to a registered observer. Dropping it stops delivery.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    source: Option<Weak<dyn Detach>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(inner) = self.source.take().and_then(|w| w.upgrade()) {
            inner.detach(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.source.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_subscriber_gets_last_value() {
        let subject = Subject::new(1);
        subject.publish(2);
        subject.publish(3);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = subject.subscribe(move |v| sink.lock().unwrap().push(*v));
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn observers_see_every_publish_in_order() {
        let subject = Subject::new(0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let a = Arc::clone(&seen);
        let b = Arc::clone(&seen);
        let _s1 = subject.subscribe(move |v| a.lock().unwrap().push(("a", *v)));
        let _s2 = subject.subscribe(move |v| b.lock().unwrap().push(("b", *v)));
        subject.publish(5);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("a", 0), ("b", 0), ("a", 5), ("b", 5)]
        );
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let subject = Subject::new(0);
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let sub = subject.subscribe(move |_| *sink.lock().unwrap() += 1);
        assert_eq!(subject.observer_count(), 1);
        sub.unsubscribe();
        subject.publish(1);
        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(subject.observer_count(), 0);
    }

    #[test]
    fn observer_may_publish_reentrantly() {
        let subject = Subject::new(0);
        let echo = subject.clone();
        let _sub = subject.subscribe(move |v| {
            if *v == 1 {
                echo.publish(2);
            }
        });
        subject.publish(1);
        assert_eq!(subject.get(), 2);
    }

    #[test]
    fn nested_publish_reaches_later_observers_after_the_outer_value() {
        let subject = Subject::new(0);
        let echo = subject.clone();
        let _first = subject.subscribe(move |v| {
            if *v == 1 {
                echo.publish(2);
            }
        });
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _second = subject.subscribe(move |v| sink.lock().unwrap().push(*v));
        subject.publish(1);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(subject.get(), 2);
    }
}
