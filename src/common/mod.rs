use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::thread;
use std::thread::JoinHandle;

/// Long-running thread with its own termination channel.
#[derive(Debug)]
pub struct Worker {
    pub join_handle: JoinHandle<()>,
    pub terminate_worker_tx: Sender<()>,
}

impl Worker {
    /// Sends the termination signal and waits for the thread to finish.
    pub fn terminate(self) {
        if self.terminate_worker_tx.send(()).is_err() {
            error!("Cannot send termination signal")
        }

        if self.join_handle.join().is_err() {
            error!("Worker returned an error")
        }
    }
}

pub fn run_worker<T: Send + 'static, F: Fn(T, Receiver<()>) + Send + 'static>(
    worker: F,
    params: T,
) -> Worker {
    let (terminate_worker_tx, terminate_worker_rx): (Sender<()>, Receiver<()>) =
        crossbeam_channel::unbounded();

    let join_handle = thread::spawn(move || worker(params, terminate_worker_rx));

    Worker {
        join_handle,
        terminate_worker_tx,
    }
}

#[derive(Debug)]
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new(workers: Vec<Worker>) -> WorkerPool {
        WorkerPool { workers }
    }

    pub fn terminate(&self) {
        for worker in &self.workers {
            let send_result = worker.terminate_worker_tx.send(());
            if send_result.is_err() {
                error!("Cannot send termination signal")
            }
        }
    }

    pub fn join(self) {
        for worker in self.workers {
            let join_result = worker.join_handle.join();
            if join_result.is_err() {
                error!("Worker returned an error")
            }
        }
    }
}

/// Creates a coalescing signal channel: pending signals collapse into one.
pub fn signal_channel() -> (Sender<()>, Receiver<()>) {
    crossbeam_channel::bounded(1)
}

/// Raises a coalescing signal. A full channel already holds a pending signal.
pub fn raise_signal(signal_tx: &Sender<()>) {
    let _ = signal_tx.try_send(());
}

/// Discards pending signals. Returns false when the channel is disconnected.
pub fn drain_signals(signal_rx: &Receiver<()>) -> bool {
    loop {
        match signal_rx.try_recv() {
            Ok(()) => continue,
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        }
    }
}
