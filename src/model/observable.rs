// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Mutable state with change notification.
//!
//! An [`Observable`] holds a value and a registry of subscriber callbacks.
//! Subscribers are invoked on the control thread, synchronously, whenever the
//! value actually changes.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T) + Send>;

pub(crate) struct Observable<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
}

impl<T: PartialEq> Observable<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub(crate) fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value, notifying subscribers if it changed.
    ///
    /// Returns `true` if the value changed.
    pub(crate) fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }

        self.value = value;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.value);
        }

        true
    }

    pub(crate) fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }
}

impl<T: Copy + PartialEq> Observable<T> {
    pub(crate) fn value(&self) -> T {
        self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn set_notifies_only_on_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut position = Observable::new(None::<usize>);

        let sink = Arc::clone(&seen);
        position.subscribe(move |value| sink.lock().unwrap().push(*value));

        assert!(position.set(Some(0)));
        assert!(!position.set(Some(0)));
        assert!(position.set(Some(1)));
        assert!(position.set(None));

        assert_eq!(*seen.lock().unwrap(), vec![Some(0), Some(1), None]);
        assert_eq!(position.value(), None);
    }

    #[test]
    fn unsubscribed_callbacks_are_not_invoked() {
        let count = Arc::new(Mutex::new(0));
        let mut observable = Observable::new(0);

        let sink = Arc::clone(&count);
        let id = observable.subscribe(move |_| *sink.lock().unwrap() += 1);

        observable.set(1);
        observable.unsubscribe(id);
        observable.set(2);

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(*observable.get(), 2);
    }
}
