// Copyright (c) 2017 Jason White
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

use std::thread::{self, JoinHandle};

use log::{debug, info};

use crate::builder::Builder;
use crate::checkpoint;
use crate::error::Error;
use crate::task::{State, TaskId};
use crate::value::Value;

/// Runs every task in the (already analyzed and pruned) registry to
/// completion, or until the first failure.
///
/// A single coordinator thread (the caller) dispatches ready tasks onto
/// `std::thread::spawn` workers, then blocks on the graph's condition
/// variable between dispatch passes, waking up either because a worker
/// finished (the registry may have grown, if that worker's body created
/// nested tasks) or because a worker failed. Tasks registered by a running
/// body are not pre-analyzed: they have no inputs or outputs of their own,
/// so they become independent goals that this same loop picks up on its
/// next scan.
pub fn run(builder: &Builder, task_count: usize) -> Result<(), Error> {
    info!("DR: execute graph with {} tasks", task_count);

    let graph = builder.graph();
    let mut workers: Vec<JoinHandle<()>> = Vec::new();

    loop {
        let mut inner = graph.inner.lock().unwrap();

        // Once a failure has been recorded, stop dispatching new work but
        // keep draining outstanding workers cooperatively.
        if inner.failure.is_none() {
            let ready: Vec<TaskId> = inner
                .tasks
                .values()
                .filter(|t| {
                    t.is_ready(|id| {
                        inner
                            .tasks
                            .get(&id)
                            .map(|t| t.state)
                            .unwrap_or(State::Done)
                    })
                })
                .map(|t| t.id)
                .collect();

            for id in ready {
                // Gather everything the worker needs under shared borrows
                // first; a `&mut` on this task's own entry would otherwise
                // conflict with looking up its inputs' entries in the same
                // map.
                let (name, body, ckpt, inputs) = {
                    let task = inner.tasks.get(&id).expect("task vanished");
                    let inputs: Vec<Value> = task
                        .inputs
                        .iter()
                        .map(|input| {
                            inner
                                .tasks
                                .get(input)
                                .and_then(|t| t.result.clone())
                                .unwrap_or(Value::Unit)
                        })
                        .collect();
                    (task.name.clone(), task.body.clone(), task.ckpt.clone(), inputs)
                };

                inner.tasks.get_mut(&id).expect("task vanished").state =
                    State::Running;

                debug!("DR: start {}", name);

                let worker_graph = graph.clone();
                let worker_builder = builder.clone();

                inner.active_workers += 1;

                workers.push(thread::spawn(move || {
                    let result = body(&inputs, &worker_builder);

                    let mut inner = worker_graph.inner.lock().unwrap();
                    match result {
                        Ok(value) => {
                            if let Some(path) = &ckpt {
                                if let Err(err) = checkpoint::store(path, &value)
                                {
                                    inner.failure.get_or_insert(err);
                                }
                            }

                            if let Some(task) = inner.tasks.get_mut(&id) {
                                task.result = Some(value);
                                task.state = State::Done;
                            }
                        }
                        Err(err) => {
                            inner.failure.get_or_insert(Error::Body(err));
                        }
                    }

                    inner.active_workers -= 1;
                    worker_graph.cvar.notify_all();
                }));
            }
        }

        if inner.active_workers == 0 {
            // Quiescent: nothing running, nothing left to dispatch.
            let failure = inner.failure.take();
            drop(inner);
            join_all(workers);
            return match failure {
                Some(err) => Err(err),
                None => Ok(()),
            };
        }

        inner = graph.cvar.wait(inner).unwrap();
        drop(inner);
    }
}

fn join_all(workers: Vec<JoinHandle<()>>) {
    for worker in workers {
        let _ = worker.join();
    }
}
