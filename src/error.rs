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

use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// The main error enum. All other errors trickle down into this one. This is
/// what `run_graph` returns when a build fails.
#[derive(Debug)]
pub enum Error {
    /// The graph contains a directed cycle, or a non-empty registry has no
    /// goal task.
    Cycle,

    /// The builder was misused, e.g. a `cmd` task was given more than one
    /// input.
    Usage(String),

    /// A subprocess exited with a non-zero code, or was killed by a signal.
    Exec(ExitReason),

    /// A task body raised its own error.
    Body(Box<dyn error::Error + Send + Sync>),

    /// A checkpoint file exists but could not be decoded.
    Checkpoint(PathBuf, String),

    /// Any other I/O failure that doesn't deserve its own variant.
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Cycle => write!(f, "graph contains a cycle"),
            Error::Usage(msg) => write!(f, "usage error: {}", msg),
            Error::Exec(reason) => write!(f, "process {}", reason),
            Error::Body(err) => write!(f, "task failed: {}", err),
            Error::Checkpoint(path, msg) => write!(
                f,
                "checkpoint at {:?} could not be decoded: {}",
                path, msg
            ),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Body(err) => Some(err.as_ref()),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ExitReason {
    Code(i32),
    Signal,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExitReason::Code(code) => write!(f, "exited with code {}", code),
            ExitReason::Signal => write!(f, "terminated by signal"),
        }
    }
}
