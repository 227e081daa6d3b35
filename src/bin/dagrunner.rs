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

use std::process::exit;
use std::sync::Arc;

use dagrunner::{bundle, chain, run_graph, Value};
use structopt::StructOpt;

/// Runs one of the small example graphs compiled into this binary.
///
/// There is no build-description file to parse; the example graphs are
/// named Rust closures selected by name.
#[derive(StructOpt, Debug)]
#[structopt(name = "dagrunner")]
struct Opt {
    /// Name of the compiled-in example graph to run.
    #[structopt(possible_values = &["diamond", "pipeline"])]
    example: String,

    /// Number of worker threads to allow in flight at once.
    ///
    /// Currently advisory only: the scheduler dispatches every ready task
    /// as soon as its inputs are satisfied, with no pool-size cap.
    #[structopt(short = "j", long = "threads", default_value = "4")]
    threads: usize,
}

fn main() {
    pretty_env_logger::init();

    let opt = Opt::from_args();
    log::debug!("requested {} worker threads (advisory only)", opt.threads);

    let result = match opt.example.as_str() {
        "diamond" => run_graph(|builder| {
            let a = builder.create_task(
                Some("a"),
                None,
                Arc::new(|_, _| Ok(Value::Int(42))),
            );
            let b = builder.create_task(
                Some("b"),
                None,
                Arc::new(|inputs, _| {
                    Ok(Value::Int(inputs[0].as_int().unwrap() / 2))
                }),
            );
            let c = builder.create_task(
                Some("c"),
                None,
                Arc::new(|inputs, _| {
                    Ok(Value::Int(inputs[0].as_int().unwrap() * 2))
                }),
            );
            let d = builder.create_task(
                Some("d"),
                None,
                Arc::new(|inputs, _| {
                    Ok(Value::Int(
                        inputs[0].as_int().unwrap()
                            + inputs[1].as_int().unwrap(),
                    ))
                }),
            );

            chain(builder, a, bundle(b, c));
            chain(builder, bundle(b, c), d).into()
        }),
        "pipeline" => run_graph(|builder| {
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
        }),
        other => {
            eprintln!("unknown example graph: {}", other);
            exit(1);
        }
    };

    match result {
        Ok(value) => {
            println!("{}", value);
        }
        Err(err) => {
            eprintln!("error: {}", err);
            exit(1);
        }
    }
}
