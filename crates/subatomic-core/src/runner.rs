use crate::error::Result;
use crate::task::Task;
use crate::task_list::TaskListMessage;

/// Executes a sequence of tasks against one task list message, strictly in
/// the order added.
///
/// Fail-fast, all-or-nothing-forward: the first `Ok(false)` or `Err` marks
/// every remaining Pending entry Failed and stops the run. Tasks that
/// already succeeded keep their status; there is no rollback — failure is a
/// reporting concern, not a transactional one.
pub struct TaskRunner<C: Send> {
    tasks: Vec<Box<dyn Task<C>>>,
    list: TaskListMessage,
}

impl<C: Send> TaskRunner<C> {
    pub fn new(list: TaskListMessage) -> Self {
        TaskRunner {
            tasks: Vec::new(),
            list,
        }
    }

    /// Bind a task to this runner's list (registering its entries) and
    /// append it to the execution sequence. Chainable.
    pub fn add_task(mut self, mut task: Box<dyn Task<C>>) -> Self {
        task.register(&mut self.list);
        self.tasks.push(task);
        self
    }

    pub fn list(&self) -> &TaskListMessage {
        &self.list
    }

    /// Render the initial all-Pending list, then run every task in order.
    /// Returns `Ok(true)` when all tasks succeeded, `Ok(false)` on a handled
    /// failure; an unexpected fault is re-thrown after the list is marked.
    pub async fn execute(&mut self, ctx: &mut C) -> Result<bool> {
        self.list.display().await?;
        for (index, task) in self.tasks.iter().enumerate() {
            match task.execute(ctx, &mut self.list).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(index, title = self.list.title(), "task failed, aborting run");
                    self.list.fail_remaining_tasks().await?;
                    return Ok(false);
                }
                Err(err) => {
                    tracing::error!(
                        index,
                        title = self.list.title(),
                        error = %err,
                        "task faulted, aborting run"
                    );
                    self.list.fail_remaining_tasks().await?;
                    return Err(err);
                }
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubatomicError;
    use crate::names::unique_name;
    use crate::testing::RecordingSurface;
    use crate::task::TaskStatus;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    enum Behavior {
        Succeed,
        Fail,
        Fault,
    }

    struct StepTask {
        key: String,
        behavior: Behavior,
        executions: Arc<AtomicUsize>,
    }

    impl StepTask {
        fn new(behavior: Behavior) -> Self {
            StepTask {
                key: unique_name("Step"),
                behavior,
                executions: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Task<()> for StepTask {
        fn register(&mut self, list: &mut TaskListMessage) {
            list.add_task(self.key.clone(), format!("Run {}", self.key));
        }

        async fn execute(&self, _ctx: &mut (), list: &mut TaskListMessage) -> Result<bool> {
            self.executions.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => {
                    list.succeed_task(&self.key).await?;
                    Ok(true)
                }
                Behavior::Fail => Ok(false),
                Behavior::Fault => Err(SubatomicError::user("jenkins unreachable")),
            }
        }
    }

    fn list() -> (TaskListMessage, Arc<RecordingSurface>) {
        let surface = RecordingSurface::new();
        (TaskListMessage::new("Provisioning", surface.clone()), surface)
    }

    #[tokio::test]
    async fn all_tasks_succeed_in_order() {
        let (list, surface) = list();
        let t1 = StepTask::new(Behavior::Succeed);
        let t2 = StepTask::new(Behavior::Succeed);
        let keys = [t1.key.clone(), t2.key.clone()];

        let mut runner = TaskRunner::new(list)
            .add_task(Box::new(t1))
            .add_task(Box::new(t2));
        let ok = runner.execute(&mut ()).await.unwrap();
        assert!(ok);
        for key in &keys {
            assert_eq!(runner.list().status(key), Some(TaskStatus::Successful));
        }
        // Initial all-Pending render plus one update per succeeded step.
        assert_eq!(surface.posts().len(), 3);
    }

    #[tokio::test]
    async fn handled_failure_is_fail_fast() {
        let (list, _surface) = list();
        let t1 = StepTask::new(Behavior::Succeed);
        let t2 = StepTask::new(Behavior::Fail);
        let t3 = StepTask::new(Behavior::Succeed);
        let keys = [t1.key.clone(), t2.key.clone(), t3.key.clone()];
        let third_executions = t3.executions.clone();

        let mut runner = TaskRunner::new(list)
            .add_task(Box::new(t1))
            .add_task(Box::new(t2))
            .add_task(Box::new(t3));
        let ok = runner.execute(&mut ()).await.unwrap();
        assert!(!ok);
        assert_eq!(runner.list().status(&keys[0]), Some(TaskStatus::Successful));
        assert_eq!(runner.list().status(&keys[1]), Some(TaskStatus::Failed));
        assert_eq!(runner.list().status(&keys[2]), Some(TaskStatus::Failed));
        assert_eq!(third_executions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fault_marks_list_then_propagates() {
        let (list, surface) = list();
        let t1 = StepTask::new(Behavior::Succeed);
        let t2 = StepTask::new(Behavior::Fault);
        let t3 = StepTask::new(Behavior::Succeed);
        let keys = [t1.key.clone(), t2.key.clone(), t3.key.clone()];
        let third_executions = t3.executions.clone();

        let mut runner = TaskRunner::new(list)
            .add_task(Box::new(t1))
            .add_task(Box::new(t2))
            .add_task(Box::new(t3));
        let err = runner.execute(&mut ()).await.unwrap_err();
        assert!(matches!(err, SubatomicError::UserFacing { .. }));
        assert_eq!(runner.list().status(&keys[1]), Some(TaskStatus::Failed));
        assert_eq!(runner.list().status(&keys[2]), Some(TaskStatus::Failed));
        assert_eq!(third_executions.load(Ordering::SeqCst), 0);

        // The final rendered message shows the remaining steps failed.
        let text = surface.last_post().unwrap().1.text;
        assert!(text.contains('✗'));
    }

    #[tokio::test]
    async fn two_instances_of_one_task_type_never_collide() {
        let (list, _surface) = list();
        let t1 = StepTask::new(Behavior::Succeed);
        let t2 = StepTask::new(Behavior::Succeed);
        assert_ne!(t1.key, t2.key);

        let keys = [t1.key.clone(), t2.key.clone()];
        let mut runner = TaskRunner::new(list)
            .add_task(Box::new(t1))
            .add_task(Box::new(t2));
        runner.execute(&mut ()).await.unwrap();
        assert_eq!(runner.list().status(&keys[0]), Some(TaskStatus::Successful));
        assert_eq!(runner.list().status(&keys[1]), Some(TaskStatus::Successful));
    }
}
