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

//! An in-process concurrent build/execution graph engine.
//!
//! A caller describes a DAG of tasks through a [`Builder`] closure, then
//! calls [`run_graph`] to analyze the graph for cycles and checkpoint
//! opportunities, execute it with as much parallelism as the dependency
//! edges allow, and collect the builder's declared return expression.

mod analyzer;
mod builder;
mod checkpoint;
mod error;
mod ops;
mod process;
mod returns;
mod scheduler;
mod task;
mod value;

pub use builder::Builder;
pub use error::{Error, ExitReason};
pub use ops::{bundle, chain};
pub use returns::ReturnExpr;
pub use task::{BodyError, Composable, Group, TaskId};
pub use value::Value;

/// Builds, analyzes, and executes a graph in one call.
///
/// `build` receives a fresh [`Builder`] and is expected to register tasks
/// through it (directly or via [`chain`]/[`bundle`]), then return a
/// [`ReturnExpr`] describing what the overall call should resolve to. This
/// may itself call `run_graph` recursively: each invocation owns an
/// independent mutex/condvar/registry, so a task body running inside one
/// graph may freely build and run another graph to completion.
pub fn run_graph<F>(build: F) -> Result<Value, Error>
where
    F: FnOnce(&Builder) -> ReturnExpr,
{
    let builder = Builder::new();
    let expr = build(&builder);

    let graph = builder.graph();
    let mut inner = graph.inner.lock().unwrap();

    analyzer::analyze(&mut inner.tasks)?;
    let task_count = inner.tasks.len();
    drop(inner);

    if task_count > 0 {
        scheduler::run(&builder, task_count)?;
    }

    let inner = builder.graph().inner.lock().unwrap();
    Ok(expr.resolve(&inner.tasks))
}
