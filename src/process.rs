// Copyright (c) 2018 Jason White
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

use std::io::{Read, Write};
use std::process;
use std::thread;

use crate::error::{Error, ExitReason};
use crate::value::Value;

/// Adapts a shell command to a task body: spawns `argv`, feeds an optional
/// input to stdin, and captures stdout.
///
/// stdin is always either a closed pipe or the caller's input, stdout is
/// captured through a pipe rather than buffered twice, and a non-zero or
/// signal-terminated exit becomes an error instead of a successful, garbage
/// result.
pub struct Process<'a> {
    argv: &'a [String],
}

impl<'a> Process<'a> {
    pub fn new(argv: &'a [String]) -> Process<'a> {
        Process { argv }
    }

    /// Spawns the process, writes `stdin` (if any) to its standard input,
    /// and waits for it to finish, returning its captured stdout.
    ///
    /// The write to stdin happens on its own thread, concurrently with
    /// reading stdout on this one. A child that fills its stdout pipe
    /// buffer before it has finished reading stdin would otherwise
    /// deadlock against a parent that writes all of stdin before reading
    /// any of stdout.
    pub fn run(&self, stdin: Option<&str>) -> Result<Value, Error> {
        let (program, args) = self
            .argv
            .split_first()
            .expect("cmd task must have a non-empty argv");

        let mut child = process::Command::new(program)
            .args(args)
            .stdin(process::Stdio::piped())
            .stdout(process::Stdio::piped())
            .stderr(process::Stdio::inherit())
            .spawn()?;

        let writer = match stdin {
            Some(input) => {
                // The child's stdin is always present since we requested a
                // piped stdio above.
                let mut pipe = child.stdin.take().unwrap();
                let input = input.to_owned();
                Some(thread::spawn(move || pipe.write_all(input.as_bytes())))
                // The pipe is dropped when the thread's closure returns,
                // closing it so the child sees EOF.
            }
            None => {
                child.stdin.take();
                None
            }
        };

        let mut stdout = Vec::new();
        child
            .stdout
            .take()
            .unwrap()
            .read_to_end(&mut stdout)?;

        if let Some(writer) = writer {
            writer.join().expect("stdin writer thread panicked")?;
        }

        let status = child.wait()?;

        match status.code() {
            Some(0) => Ok(Value::from_stdout(stdout)),
            Some(code) => Err(Error::Exec(ExitReason::Code(code))),
            None => Err(Error::Exec(ExitReason::Signal)),
        }
    }
}
