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

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::checkpoint;
use crate::error::Error;
use crate::task::{State, Task, TaskId};

#[derive(Copy, Clone, Eq, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Validates acyclicity and applies checkpoint pruning. Goals are tasks
/// with no outputs; a depth-first walk from each goal through `inputs`
/// either prunes a checkpointed task (and everything only reachable through
/// it) or keeps it as a survivor.
///
/// `tasks` is mutated in place: a pruned task's `state` becomes `Skipped`
/// and its `result` is loaded from its checkpoint, and the registry is then
/// trimmed down to exactly the survivor set. Anything a task body registers
/// later, while the scheduler is running, is not subject to this pass
/// (nested creation adds directly to the now-trimmed registry as
/// independent, unpruned goals).
pub fn analyze(tasks: &mut HashMap<TaskId, Task>) -> Result<(), Error> {
    if tasks.is_empty() {
        debug!("DR: No task in the graph");
        return Ok(());
    }

    let goals: Vec<TaskId> = tasks
        .values()
        .filter(|t| t.outputs.is_empty())
        .map(|t| t.id)
        .collect();

    if goals.is_empty() {
        return Err(Error::Cycle);
    }

    let mut colors: HashMap<TaskId, Color> = HashMap::new();
    let mut survivors = HashSet::new();
    let mut pruned = 0usize;

    for goal in goals {
        visit(goal, tasks, &mut colors, &mut survivors, &mut pruned)?;
    }

    if pruned > 0 {
        debug!("DR: {} tasks were skipped thanks to ckpts", pruned);
    }

    tasks.retain(|id, _| survivors.contains(id));

    Ok(())
}

fn visit(
    id: TaskId,
    tasks: &mut HashMap<TaskId, Task>,
    colors: &mut HashMap<TaskId, Color>,
    survivors: &mut HashSet<TaskId>,
    pruned: &mut usize,
) -> Result<(), Error> {
    match colors.get(&id) {
        Some(Color::Gray) => return Err(Error::Cycle),
        Some(Color::Black) => return Ok(()),
        _ => {}
    }

    let ckpt = tasks.get(&id).and_then(|t| t.ckpt.clone());

    if let Some(path) = ckpt {
        if path.exists() {
            debug!("DR: there is a ckpt {:?} for {}", path, id);

            let value = checkpoint::load(&path)?;

            let task = tasks.get_mut(&id).expect("task vanished");
            task.result = Some(value);
            task.state = State::Skipped;

            colors.insert(id, Color::Black);
            survivors.insert(id);
            *pruned += 1;
            return Ok(());
        }
    }

    colors.insert(id, Color::Gray);
    survivors.insert(id);

    let inputs = tasks.get(&id).expect("task vanished").inputs.clone();
    for input in inputs {
        visit(input, tasks, colors, survivors, pruned)?;
    }

    colors.insert(id, Color::Black);

    Ok(())
}
