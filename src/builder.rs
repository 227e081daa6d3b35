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

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex};

use log::debug;

use crate::error::Error;
use crate::process::Process;
use crate::task::{Body, Task, TaskId};
use crate::value::Value;

/// Shared state for one graph: the task registry, the id counter, the
/// "first failure" slot, and the count of outstanding workers. Guarded by a
/// single mutex/condvar pair.
pub(crate) struct Inner {
    pub tasks: HashMap<TaskId, Task>,
    next_id: usize,
    pub failure: Option<Error>,
    pub active_workers: usize,
}

/// The graph being built and, later, executed. One `Graph` backs exactly one
/// call to [`crate::run_graph`], including any nested calls.
pub struct Graph {
    pub(crate) inner: Mutex<Inner>,
    pub(crate) cvar: Condvar,
}

impl Graph {
    fn new() -> Graph {
        Graph {
            inner: Mutex::new(Inner {
                tasks: HashMap::new(),
                next_id: 0,
                failure: None,
                active_workers: 0,
            }),
            cvar: Condvar::new(),
        }
    }
}

/// The handle passed to a builder closure (and to every task body), carrying
/// the registration primitives used to add tasks to the graph.
///
/// Cloning a `Builder` is cheap: it's a thin wrapper around an `Arc<Graph>`.
#[derive(Clone)]
pub struct Builder {
    graph: Arc<Graph>,
}

impl Builder {
    pub(crate) fn new() -> Builder {
        Builder {
            graph: Arc::new(Graph::new()),
        }
    }

    pub(crate) fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    /// Registers a task. Thread-safe: may be called during the single
    /// threaded builder evaluation, or concurrently from within a running
    /// task body to add work dynamically.
    pub fn create_task(
        &self,
        name: Option<&str>,
        ckpt: Option<PathBuf>,
        body: Body,
    ) -> TaskId {
        let mut inner = self.graph.inner.lock().unwrap();

        let id = TaskId::from(inner.next_id);
        inner.next_id += 1;

        let task = Task::new(id, name.map(str::to_owned), ckpt, body);
        inner.tasks.insert(id, task);

        debug!("registered task {}", id);

        // Wake a scheduler that might already be waiting on the condition
        // variable (nested creation from within a running body).
        self.graph.cvar.notify_all();

        id
    }

    /// Registers a subprocess task. The body accepts zero or one input,
    /// spawns `argv`, feeds the (stringified) input to its stdin, and
    /// returns its captured stdout on a zero exit code.
    pub fn create_cmd(
        &self,
        argv: Vec<String>,
        name: Option<&str>,
        ckpt: Option<PathBuf>,
    ) -> TaskId {
        let name =
            name.map(str::to_owned).unwrap_or_else(|| argv.join(" "));

        let body: Body = Arc::new(move |inputs: &[Value], _builder: &Builder| {
            if inputs.len() > 1 {
                return Err(Box::new(Error::Usage(format!(
                    "cmd task {:?} received {} inputs, expected 0 or 1",
                    argv,
                    inputs.len()
                ))) as _);
            }

            let stdin = inputs.first().map(Value::to_string);

            Process::new(&argv)
                .run(stdin.as_deref())
                .map_err(|err| Box::new(err) as _)
        });

        self.create_task(Some(&name), ckpt, body)
    }
}
