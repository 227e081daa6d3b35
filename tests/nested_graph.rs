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

use std::sync::Arc;

use dagrunner::{chain, run_graph, Value};

/// A task body may call `run_graph` again; the nested call gets its own
/// mutex/condvar/registry and runs to completion before the outer body
/// returns.
#[test]
fn a_task_body_can_run_a_nested_graph() {
    let result = run_graph(|builder| {
        let inner = builder.create_task(
            Some("outer"),
            None,
            Arc::new(|_, _| {
                run_graph(|inner_builder| {
                    inner_builder
                        .create_task(
                            Some("foo"),
                            None,
                            Arc::new(|_, _| Ok(Value::Str("foo".into()))),
                        )
                        .into()
                })
                .map_err(|err| Box::new(err) as _)
            }),
        );

        let suffixed = builder.create_task(
            Some("suffixed"),
            None,
            Arc::new(|inputs, _| {
                Ok(Value::Str(format!(
                    "{}bar",
                    inputs[0].as_str().unwrap()
                )))
            }),
        );

        chain(builder, inner, suffixed).into()
    })
    .unwrap();

    assert_eq!(result, Value::Str("foobar".to_string()));
}
