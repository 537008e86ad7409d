//! Replay-latest value holder

use tokio::sync::watch;

/// A value container that hands its latest value to every new subscriber
/// and notifies existing subscribers whenever the value is replaced.
#[derive(Debug)]
pub struct Observable<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            sender: watch::Sender::new(initial),
        }
    }

    /// Returns a clone of the current value without waiting.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replaces the value. Subscribers are notified even when nobody is listening yet.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let holder = Observable::new(None::<u32>);
        assert_eq!(holder.get(), None);

        holder.set(Some(3));
        assert_eq!(holder.get(), Some(3));

        // Last write wins
        holder.set(Some(7));
        assert_eq!(holder.get(), Some(7));
    }

    #[tokio::test]
    async fn test_subscriber_sees_current_value_then_updates() {
        let holder = Observable::new(false);
        holder.set(true);

        let mut rx = holder.subscribe();
        assert!(*rx.borrow_and_update());

        holder.set(false);
        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());
    }
}
