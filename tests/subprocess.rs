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

use dagrunner::{chain, run_graph, Value};

/// `chain(cmd(["echo","foo"]), cmd(["sed","s/o/x/"]))` pipes the first
/// command's stdout into the second's stdin via the builder's in-memory
/// edges (not an OS pipe between the two children).
#[test]
fn echo_piped_through_sed() {
    let result = run_graph(|builder| {
        let echo = builder.create_cmd(
            vec!["echo".into(), "foo".into()],
            Some("echo"),
            None,
        );
        let sed = builder.create_cmd(
            vec!["sed".into(), "s/o/x/".into()],
            Some("sed"),
            None,
        );

        chain(builder, echo, sed).into()
    })
    .unwrap();

    assert_eq!(result, Value::Str("fxo\n".to_string()));
}
