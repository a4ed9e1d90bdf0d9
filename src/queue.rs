//! Destructor queues.

use crossbeam_channel as chan;

const MAX_QUEUE_SIZE: usize = 1024;

/// Send half of a [`Queue`].
///
/// [`Queue`]: struct.Queue.html
pub type Sender<T> = chan::Sender<T>;

/// A queue that collects the IDs of dropped GPU objects until the
/// factory is ready to delete them.
#[derive(Clone)]
pub struct Queue<T> {
    tx: chan::Sender<T>,
    rx: chan::Receiver<T>,
}

impl<T> Queue<T> {
    /// Constructor.
    pub fn new() -> Self {
        let (tx, rx) = chan::bounded(MAX_QUEUE_SIZE);
        Self { tx, rx }
    }

    /// Clone the send half of the queue, to be held by a destructor.
    pub fn tx(&self) -> Sender<T> {
        self.tx.clone()
    }

    /// Apply `f` to every item queued so far, emptying the queue.
    pub fn drain<F>(&self, mut f: F)
        where F: FnMut(T)
    {
        while let Ok(item) = self.rx.try_recv() {
            f(item);
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}
