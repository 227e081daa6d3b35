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

use crate::task::{Composable, Task, TaskId};
use crate::value::Value;

/// The builder's return expression, captured verbatim at graph-construction
/// time. Leaves are either a task (substituted by its final result once the
/// graph has run) or a plain value.
#[derive(Clone, Debug)]
pub enum ReturnExpr {
    Task(TaskId),
    Value(Value),
    Seq(Vec<ReturnExpr>),
}

impl ReturnExpr {
    /// Walks the expression, replacing every task leaf with its final
    /// result, then collapses a singleton sequence down to its sole element
    /// (matching the source convention).
    pub fn resolve(&self, tasks: &HashMap<TaskId, Task>) -> Value {
        match self.resolve_seq(tasks) {
            Resolved::One(value) => value,
            Resolved::Seq(mut values) if values.len() == 1 => {
                values.pop().unwrap()
            }
            Resolved::Seq(values) => Value::List(values),
        }
    }

    fn resolve_seq(&self, tasks: &HashMap<TaskId, Task>) -> Resolved {
        match self {
            ReturnExpr::Task(id) => {
                let result = tasks
                    .get(id)
                    .and_then(|t| t.result.clone())
                    .unwrap_or(Value::Unit);
                Resolved::One(result)
            }
            ReturnExpr::Value(v) => Resolved::One(v.clone()),
            ReturnExpr::Seq(items) => Resolved::Seq(
                items
                    .iter()
                    .map(|item| match item.resolve_seq(tasks) {
                        Resolved::One(v) => v,
                        Resolved::Seq(vs) => Value::List(vs),
                    })
                    .collect(),
            ),
        }
    }
}

enum Resolved {
    One(Value),
    Seq(Vec<Value>),
}

impl From<TaskId> for ReturnExpr {
    fn from(id: TaskId) -> Self {
        ReturnExpr::Task(id)
    }
}

impl From<Composable> for ReturnExpr {
    fn from(c: Composable) -> Self {
        match c {
            Composable::Single(id) => ReturnExpr::Task(id),
            Composable::Many(ids) => {
                ReturnExpr::Seq(ids.into_iter().map(ReturnExpr::Task).collect())
            }
        }
    }
}

impl From<Value> for ReturnExpr {
    fn from(v: Value) -> Self {
        ReturnExpr::Value(v)
    }
}

impl From<()> for ReturnExpr {
    fn from(_: ()) -> Self {
        ReturnExpr::Value(Value::Unit)
    }
}

impl From<Vec<ReturnExpr>> for ReturnExpr {
    fn from(items: Vec<ReturnExpr>) -> Self {
        ReturnExpr::Seq(items)
    }
}
