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

use crate::builder::Builder;
use crate::task::{Composable, Group};

/// Serial composition: wires a complete bipartite dependency from every
/// task on the left to every task on the right, then returns the right side
/// unchanged.
///
/// No deduplication is performed; chaining the same pair of tasks twice
/// produces two edges between them.
pub fn chain(
    builder: &Builder,
    l: impl Into<Composable>,
    r: impl Into<Composable>,
) -> Composable {
    let l = l.into();
    let r = r.into();

    let mut inner = builder.graph().inner.lock().unwrap();

    for &a in &l.ids() {
        for &b in &r.ids() {
            inner.tasks.get_mut(&b).expect("unknown task").inputs.push(a);
            inner.tasks.get_mut(&a).expect("unknown task").outputs.push(b);
        }
    }

    r
}

/// Parallel composition: returns a transient [`Group`] containing the
/// members of both sides, in order. Does not touch any edges.
pub fn bundle(l: impl Into<Composable>, r: impl Into<Composable>) -> Group {
    let mut ids = l.into().ids();
    ids.extend(r.into().ids());
    Group(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;
    use crate::value::Value;
    use std::sync::Arc;

    fn noop_task(builder: &Builder) -> TaskId {
        builder.create_task(None, None, Arc::new(|_, _| Ok(Value::Unit)))
    }

    #[test]
    fn chain_forms_a_complete_bipartite_edge_set() {
        let builder = Builder::new();
        let a = noop_task(&builder);
        let b = noop_task(&builder);
        let c = noop_task(&builder);

        chain(&builder, bundle(a, b), c);

        let inner = builder.graph().inner.lock().unwrap();
        let c_task = &inner.tasks[&c];
        assert_eq!(c_task.inputs, vec![a, b]);
        assert_eq!(inner.tasks[&a].outputs, vec![c]);
        assert_eq!(inner.tasks[&b].outputs, vec![c]);
    }

    #[test]
    fn bundle_preserves_order_without_touching_edges() {
        let builder = Builder::new();
        let a = noop_task(&builder);
        let b = noop_task(&builder);

        let group = bundle(a, b);
        assert_eq!(group.0, vec![a, b]);

        let inner = builder.graph().inner.lock().unwrap();
        assert!(inner.tasks[&a].outputs.is_empty());
        assert!(inner.tasks[&b].outputs.is_empty());
    }
}
