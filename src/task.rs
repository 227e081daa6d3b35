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

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::builder::Builder;
use crate::value::Value;

/// A type-safe, per-graph task identifier. Assigned in creation order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TaskId(usize);

impl From<usize> for TaskId {
    fn from(index: usize) -> Self {
        TaskId(index)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A boxed error produced by a task body. Wrapped by [`crate::Error::Body`]
/// when it propagates out of the scheduler.
pub type BodyError = Box<dyn std::error::Error + Send + Sync>;

/// The callable a task executes. Receives the results of its inputs, in
/// order, and a handle back onto the owning graph (so a body may register
/// further tasks, see the module docs for "nested task creation"), and
/// produces a single result.
pub type Body = Arc<
    dyn Fn(&[Value], &Builder) -> Result<Value, BodyError> + Send + Sync,
>;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    Pending,
    Running,
    Done,
    Skipped,
}

/// A node in the build graph.
///
/// Tasks are only ever mutated by the scheduler thread while it holds the
/// graph's mutex (see [`crate::scheduler`]); worker threads only read a
/// task's inputs (itself gated on the mutex) before releasing the lock to run
/// the body.
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub body: Body,
    pub inputs: Vec<TaskId>,
    pub outputs: Vec<TaskId>,
    pub ckpt: Option<PathBuf>,
    pub state: State,
    pub result: Option<Value>,
}

impl Task {
    pub fn new(
        id: TaskId,
        name: Option<String>,
        ckpt: Option<PathBuf>,
        body: Body,
    ) -> Task {
        Task {
            id,
            name: name.unwrap_or_else(|| id.to_string()),
            body,
            inputs: Vec::new(),
            outputs: Vec::new(),
            ckpt,
            state: State::Pending,
            result: None,
        }
    }

    /// Returns `true` if this task is ready to run: still pending and every
    /// input has produced a result.
    pub fn is_ready(&self, states: impl Fn(TaskId) -> State) -> bool {
        self.state == State::Pending
            && self
                .inputs
                .iter()
                .all(|&id| matches!(states(id), State::Done | State::Skipped))
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Either a single task or an ordered bundle of them. This is the operand
/// type that `chain` and `bundle` accept and produce, letting a lone task and
/// a [`Group`] compose uniformly.
#[derive(Clone, Debug)]
pub enum Composable {
    Single(TaskId),
    Many(Vec<TaskId>),
}

impl Composable {
    pub fn ids(&self) -> Vec<TaskId> {
        match self {
            Composable::Single(id) => vec![*id],
            Composable::Many(ids) => ids.clone(),
        }
    }
}

impl From<TaskId> for Composable {
    fn from(id: TaskId) -> Self {
        Composable::Single(id)
    }
}

impl From<Group> for Composable {
    fn from(group: Group) -> Self {
        Composable::Many(group.0)
    }
}

/// A transient, unregistered ordered bundle of tasks produced by [`bundle`].
/// Owns none of its members; never scheduled on its own.
///
/// [`bundle`]: crate::ops::bundle
#[derive(Clone, Debug, Default)]
pub struct Group(pub Vec<TaskId>);
