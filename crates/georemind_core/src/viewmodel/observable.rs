//! Observable state cell for view-model fields.

use tokio::sync::watch;

/// Latest-value cell that UI layers subscribe to.
///
/// Subscribers see the most recent value; intermediate values may be skipped.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replaces the value and notifies subscribers, even when nobody listens.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::Observable;

    #[tokio::test]
    async fn subscribers_see_latest_value() {
        let flag = Observable::new(false);
        let mut rx = flag.subscribe();

        flag.set(true);

        rx.changed().await.unwrap();
        assert!(*rx.borrow());
        assert!(flag.get());
    }
}
