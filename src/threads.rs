use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::trace;

use crate::error::{Error, Result};
use crate::solver::Solver;

/// State that can be cut into `n` contiguous parts and rebuilt from them.
pub trait Split: Sized {
    fn split_parts(&self, n: usize) -> Vec<Self>;

    fn join_parts(parts: Vec<Self>) -> Self;
}

impl<T> Split for Vec<T>
where
    T: Clone,
{
    /// Part `i` covers `[i * len / n, (i + 1) * len / n)`, so sizes differ
    /// by at most one and every part exists even when `n > len`.
    fn split_parts(&self, n: usize) -> Vec<Self> {
        let bound = |i: usize| i * self.len() / n;
        (0..n)
            .map(|i| self[bound(i)..bound(i + 1)].to_vec())
            .collect()
    }

    fn join_parts(parts: Vec<Self>) -> Self {
        parts.into_iter().flatten().collect()
    }
}

/// A part tagged with its position in the original state.
#[derive(Debug)]
pub struct Part<T> {
    pub index: usize,
    pub data: T,
}

/// Puts parts back in index order. Every index in `0..parts.len()` must
/// appear exactly once.
pub fn reassemble<T: Split>(parts: Vec<Part<T>>) -> Result<T> {
    let n = parts.len();
    if n == 0 {
        return Err(Error::Join);
    }
    let mut slots: Vec<Option<T>> = (0..n).map(|_| None).collect();
    for part in parts {
        match slots.get_mut(part.index) {
            Some(slot) if slot.is_none() => *slot = Some(part.data),
            _ => return Err(Error::Join),
        }
    }
    let ordered: Vec<T> = slots.into_iter().flatten().collect();
    if ordered.len() != n {
        return Err(Error::Join);
    }
    Ok(T::join_parts(ordered))
}

type Job<T> = Part<T>;
type Outcome<T> = Result<Part<T>>;

/// Fixed pool of named worker threads. Each `solve` hands one part of the
/// state to every worker and waits for all of them.
pub struct ThreadedSolver<T> {
    jobs: Vec<Sender<Job<T>>>,
    results: Receiver<Outcome<T>>,
}

impl<T> ThreadedSolver<T>
where
    T: Split + Send + 'static,
{
    pub fn spawn<S>(n: usize, solver: &S) -> Result<Self>
    where
        S: Solver<T> + Clone + Send + 'static,
    {
        let (result_tx, results) = mpsc::channel::<Outcome<T>>();
        let mut jobs = Vec::with_capacity(n);
        for id in 0..n {
            let (job_tx, job_rx) = mpsc::channel::<Job<T>>();
            let solver = solver.clone();
            let result_tx = result_tx.clone();
            thread::Builder::new()
                .name(format!("escape-worker-{}", id))
                .spawn(move || {
                    for job in job_rx {
                        trace!("worker {} solving part {}", id, job.index);
                        let index = job.index;
                        let outcome = solver
                            .solve(&job.data)
                            .map(|data| Part { index, data });
                        if result_tx.send(outcome).is_err() {
                            break;
                        }
                    }
                })
                .map_err(Error::Spawn)?;
            jobs.push(job_tx);
        }
        Ok(Self { jobs, results })
    }
}

impl<T> Solver<T> for ThreadedSolver<T>
where
    T: Split + Send + 'static,
{
    fn solve(&self, state: &T) -> Result<T> {
        let n = self.jobs.len();
        if n == 0 {
            return Err(Error::WorkerDisconnected);
        }
        for (index, (job_tx, data)) in self.jobs.iter().zip(state.split_parts(n)).enumerate() {
            job_tx
                .send(Part { index, data })
                .map_err(|_| Error::WorkerDisconnected)?;
        }
        let parts = (0..n)
            .map(|_| self.results.recv().map_err(|_| Error::WorkerDisconnected)?)
            .collect::<Result<Vec<_>>>()?;
        reassemble(parts)
    }
}
