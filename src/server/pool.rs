//! # Pool de Workers
//! src/server/pool.rs
//!
//! Implementa un pool de threads de tamaño fijo alimentado por una cola
//! acotada. Cada conexión aceptada se encola como un trabajo; si la cola
//! está llena el submit falla y el caller decide qué hacer con la conexión.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

/// Trabajo a ejecutar por un worker
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Error al encolar un trabajo
#[derive(Debug, PartialEq, Eq)]
pub enum PoolError {
    /// La cola alcanzó su capacidad máxima
    QueueFull,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::QueueFull => write!(f, "worker queue is full"),
        }
    }
}

impl std::error::Error for PoolError {}

/// Estado compartido entre el pool y sus workers
struct PoolState {
    queue: VecDeque<Job>,
    shutdown: bool,
}

struct PoolShared {
    state: Mutex<PoolState>,
    condvar: Condvar,
    capacity: usize,
}

/// Pool de workers con cola acotada
pub struct WorkerPool {
    shared: Arc<PoolShared>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Crea un pool con `workers` threads y una cola de capacidad `queue_capacity`
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        let shared = Arc::new(PoolShared {
            state: Mutex::new(PoolState {
                queue: VecDeque::new(),
                shutdown: false,
            }),
            condvar: Condvar::new(),
            capacity: queue_capacity,
        });

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let shared = Arc::clone(&shared);
            handles.push(thread::spawn(move || Self::worker_loop(shared)));
        }

        Self {
            shared,
            workers: handles,
        }
    }

    /// Encola un trabajo para que lo ejecute algún worker
    ///
    /// Retorna `Err(PoolError::QueueFull)` si la cola está llena.
    pub fn execute<F>(&self, job: F) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock().unwrap();

        if state.queue.len() >= self.shared.capacity {
            return Err(PoolError::QueueFull);
        }

        state.queue.push_back(Box::new(job));
        self.shared.condvar.notify_one();

        Ok(())
    }

    /// Cantidad de trabajos esperando en la cola
    pub fn queued(&self) -> usize {
        let state = self.shared.state.lock().unwrap();
        state.queue.len()
    }

    /// Capacidad máxima de la cola
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Cantidad de workers del pool
    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    /// Loop principal de cada worker: toma trabajos hasta el shutdown
    ///
    /// Los trabajos pendientes se drenan antes de salir.
    fn worker_loop(shared: Arc<PoolShared>) {
        loop {
            let job = {
                let mut state = shared.state.lock().unwrap();
                loop {
                    if let Some(job) = state.queue.pop_front() {
                        break job;
                    }
                    if state.shutdown {
                        return;
                    }
                    state = shared.condvar.wait(state).unwrap();
                }
            };

            job();
        }
    }
}

impl Drop for WorkerPool {
    /// Apaga el pool: marca el shutdown, despierta a los workers y los espera
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.shutdown = true;
        }
        self.shared.condvar.notify_all();

        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_executes_submitted_jobs() {
        let pool = WorkerPool::new(2, 16);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..8 {
            let counter = Arc::clone(&counter);
            pool.execute(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }

        // El drop espera a que los workers terminen los trabajos pendientes
        drop(pool);

        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_queue_full_rejects_job() {
        let pool = WorkerPool::new(1, 1);

        // Bloquear al único worker hasta que se lo indiquemos
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (started_tx, started_rx) = mpsc::channel::<()>();

        pool.execute(move || {
            started_tx.send(()).unwrap();
            release_rx.recv().unwrap();
        })
        .unwrap();

        // Esperar a que el worker esté ocupado
        started_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker never started");

        // Llenar la cola y verificar el rechazo
        assert!(pool.execute(|| {}).is_ok());
        assert_eq!(pool.execute(|| {}), Err(PoolError::QueueFull));
        assert_eq!(pool.queued(), 1);

        release_tx.send(()).unwrap();
    }

    #[test]
    fn test_capacity_and_workers() {
        let pool = WorkerPool::new(3, 7);
        assert_eq!(pool.workers(), 3);
        assert_eq!(pool.capacity(), 7);
        assert_eq!(pool.queued(), 0);
    }

    #[test]
    fn test_drop_joins_workers() {
        let counter = Arc::new(AtomicUsize::new(0));

        {
            let pool = WorkerPool::new(4, 32);
            for _ in 0..20 {
                let counter = Arc::clone(&counter);
                pool.execute(move || {
                    std::thread::sleep(Duration::from_millis(5));
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
            }
        }

        // Al salir del scope todos los trabajos ya corrieron
        assert_eq!(counter.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(PoolError::QueueFull.to_string(), "worker queue is full");
    }
}
