use std::collections::{HashMap, HashSet};

use crate::config::{LintConfig, Patterns};
use crate::references::ReferenceMap;
use crate::tasks::{TaskDetail, TaskStub};

/// Everything a validator may consult besides the task under validation.
///
/// Built once per run and passed explicitly; validators never reach for global state.
#[derive(Debug)]
pub struct ValidationContext<'a> {
    pub tasks: &'a [TaskDetail],
    pub stubs: &'a [TaskStub],
    pub references: &'a ReferenceMap,
    pub config: &'a LintConfig,
    pub patterns: &'a Patterns,
    known_ids: HashSet<&'a str>,
    /// Document line where each subtask ID first appears
    first_subtask_lines: HashMap<&'a str, usize>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        tasks: &'a [TaskDetail],
        stubs: &'a [TaskStub],
        references: &'a ReferenceMap,
        config: &'a LintConfig,
        patterns: &'a Patterns,
    ) -> Self {
        let known_ids = stubs
            .iter()
            .map(|s| s.id.as_str())
            .chain(tasks.iter().map(|t| t.id.as_str()))
            .chain(
                tasks
                    .iter()
                    .flat_map(|t| t.subtasks.iter())
                    .filter(|s| s.has_valid_extraction())
                    .map(|s| s.id.as_str()),
            )
            .collect();

        let mut first_subtask_lines = HashMap::new();
        for task in tasks {
            for subtask in task.subtasks.iter().filter(|s| s.has_valid_extraction()) {
                let line = task.document_line(subtask.line_offset);
                first_subtask_lines
                    .entry(subtask.id.as_str())
                    .and_modify(|first: &mut usize| *first = (*first).min(line))
                    .or_insert(line);
            }
        }

        Self {
            tasks,
            stubs,
            references,
            config,
            patterns,
            known_ids,
            first_subtask_lines,
        }
    }

    /// Whether `id` names any task or subtask in the document
    pub fn is_known_id(&self, id: &str) -> bool {
        self.known_ids.contains(id)
    }

    /// Line of the first subtask using `id`, anywhere in the document
    pub fn first_subtask_line(&self, id: &str) -> Option<usize> {
        self.first_subtask_lines.get(id).copied()
    }

    /// Whether `id` names a task, from a table row or a detail heading
    pub fn is_task_id(&self, id: &str) -> bool {
        self.stubs.iter().any(|s| s.id == id) || self.tasks.iter().any(|t| t.id == id)
    }

    /// Stub rows for a task ID across both tables
    pub fn stubs_for<'s>(&'s self, id: &'s str) -> impl Iterator<Item = &'a TaskStub> + 's {
        self.stubs.iter().filter(move |s| s.id == id)
    }

    /// Status written in the task's detail section
    pub fn task_status(&self, task: &TaskDetail) -> Option<String> {
        task.field("Status").map(|f| f.value)
    }

    /// A task counts as completed if its detail status says so or a table lists it as such.
    pub fn is_completed(&self, task: &TaskDetail) -> bool {
        let completed = &self.config.status.completed;
        self.task_status(task).as_deref() == Some(completed.as_str())
            || self.stubs_for(&task.id).any(|s| s.is_completed(completed))
    }
}
