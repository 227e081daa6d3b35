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

use std::path::Path;

use crate::error::Error;
use crate::value::Value;

/// Writes `value` to `path`, encoded with `bincode`.
///
/// The encoded bytes are first written to a temporary file in `path`'s
/// parent directory, then renamed into place, so a concurrent `load` never
/// observes a partially-written checkpoint.
pub fn store(path: &Path, value: &Value) -> Result<(), Error> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;

    bincode::serialize_into(&mut temp, value).map_err(|err| {
        Error::Checkpoint(path.to_owned(), err.to_string())
    })?;

    temp.persist(path).map_err(|err| err.error)?;

    Ok(())
}

/// Loads a value previously written by [`store`]. Any I/O failure is
/// propagated as-is; a file that exists but doesn't decode as a `Value`
/// becomes `Error::Checkpoint`.
pub fn load(path: &Path) -> Result<Value, Error> {
    let file = std::fs::File::open(path)?;

    bincode::deserialize_from(file)
        .map_err(|err| Error::Checkpoint(path.to_owned(), err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_a_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ckpt");

        store(&path, &Value::Str("foo\n".into())).unwrap();
        assert_eq!(load(&path).unwrap(), Value::Str("foo\n".into()));
    }

    #[test]
    fn load_of_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing");

        match load(&path) {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn load_of_garbage_is_checkpoint_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage");
        std::fs::write(&path, b"\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff")
            .unwrap();

        match load(&path) {
            Err(Error::Checkpoint(p, _)) => assert_eq!(p, path),
            other => panic!("expected Checkpoint error, got {:?}", other),
        }
    }
}
