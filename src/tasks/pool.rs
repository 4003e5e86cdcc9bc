//! Task pool and weighted arbitration
//!
//! Critical tasks bypass weighting entirely: any critical candidate wins,
//! uniformly among them. Otherwise the draw is proportional to the
//! configured weight of each task's priority.

use super::Task;
use crate::core::config::PriorityWeights;
use crate::core::error::{AiError, Result};
use crate::core::rng::DecisionRng;

#[derive(Debug, Clone, Default)]
pub struct TaskPool {
    epoch: u64,
    critical: Vec<Task>,
    potential: Vec<Task>,
    /// Running weight totals, parallel to `potential`
    cumulative: Vec<u32>,
}

impl TaskPool {
    pub fn new(epoch: u64) -> Self {
        Self {
            epoch,
            ..Self::default()
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn add(&mut self, task: Task, weights: &PriorityWeights) {
        if task.is_critical() {
            self.critical.push(task);
            return;
        }
        let total = self.total_weight();
        self.cumulative
            .push(total.saturating_add(weights.weight(task.priority())));
        self.potential.push(task);
    }

    /// Add a task if one was built
    pub fn offer(&mut self, task: Option<Task>, weights: &PriorityWeights) {
        if let Some(task) = task {
            self.add(task, weights);
        }
    }

    pub fn critical(&self) -> &[Task] {
        &self.critical
    }

    pub fn potential(&self) -> &[Task] {
        &self.potential
    }

    pub fn len(&self) -> usize {
        self.critical.len() + self.potential.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_weight(&self) -> u32 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Pick exactly one task
    pub fn select(&self, rng: &mut dyn DecisionRng) -> Result<Task> {
        if !self.critical.is_empty() {
            let idx = rng.pick(self.critical.len());
            return Ok(self.critical[idx]);
        }

        let total = self.total_weight();
        if total == 0 {
            return Err(AiError::EmptyTaskPool { epoch: self.epoch });
        }

        let draw = rng.pick(total as usize) as u32;
        let idx = self.cumulative.partition_point(|&c| c <= draw);
        self.potential
            .get(idx)
            .copied()
            .ok_or(AiError::EmptyTaskPool { epoch: self.epoch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{ScriptedRng, SeededRng};
    use crate::core::types::{ActorId, NodeId, Priority};
    use crate::tasks::{TaskAction, TaskKind};

    fn task(priority: Priority, action: TaskAction) -> Task {
        Task::player(priority, action).unwrap()
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let pool = TaskPool::new(7);
        let mut rng = ScriptedRng::new();
        match pool.select(&mut rng) {
            Err(AiError::EmptyTaskPool { epoch }) => assert_eq!(epoch, 7),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_critical_always_wins() {
        let weights = PriorityWeights::default();
        let mut pool = TaskPool::new(0);
        for _ in 0..20 {
            pool.add(task(Priority::High, TaskAction::Idle), &weights);
        }
        pool.add(task(Priority::Critical, TaskAction::LieLow), &weights);

        let mut rng = SeededRng::new(1);
        for _ in 0..100 {
            assert_eq!(pool.select(&mut rng).unwrap().kind(), TaskKind::LieLow);
        }
    }

    #[test]
    fn test_cumulative_lookup() {
        let weights = PriorityWeights::default();
        let mut pool = TaskPool::new(0);
        pool.add(task(Priority::Low, TaskAction::Idle), &weights); // [0, 1)
        pool.add(task(Priority::High, TaskAction::LieLow), &weights); // [1, 4)
        pool.add(task(Priority::Medium, TaskAction::FactionLobby), &weights); // [4, 6)
        assert_eq!(pool.total_weight(), 6);

        let mut rng = ScriptedRng::new().with_picks(&[0, 1, 3, 4, 5]);
        let kinds: Vec<TaskKind> = (0..5).map(|_| pool.select(&mut rng).unwrap().kind()).collect();
        assert_eq!(
            kinds,
            vec![
                TaskKind::Idle,
                TaskKind::LieLow,
                TaskKind::LieLow,
                TaskKind::FactionLobby,
                TaskKind::FactionLobby,
            ]
        );
    }

    #[test]
    fn test_weighted_selection_converges() {
        let weights = PriorityWeights::default();
        let mut pool = TaskPool::new(0);
        pool.add(task(Priority::High, TaskAction::LieLow), &weights);
        pool.add(task(Priority::Low, TaskAction::Idle), &weights);

        let mut rng = SeededRng::new(99);
        let trials = 4000;
        let high = (0..trials)
            .filter(|_| pool.select(&mut rng).unwrap().kind() == TaskKind::LieLow)
            .count();

        let observed = high as f64 / trials as f64;
        assert!((observed - 0.75).abs() < 0.04, "observed {observed}");
    }

    #[test]
    fn test_two_criticals_split_evenly() {
        let weights = PriorityWeights::default();
        let mut pool = TaskPool::new(0);
        pool.add(task(Priority::Critical, TaskAction::LieLow), &weights);
        pool.add(
            task(
                Priority::Critical,
                TaskAction::Move {
                    to: NodeId(2),
                    via: None,
                },
            ),
            &weights,
        );

        let mut rng = SeededRng::new(5);
        let trials = 2000;
        let lie_low = (0..trials)
            .filter(|_| pool.select(&mut rng).unwrap().kind() == TaskKind::LieLow)
            .count();
        let observed = lie_low as f64 / trials as f64;
        assert!((observed - 0.5).abs() < 0.05, "observed {observed}");
    }

    #[test]
    fn test_zero_weight_tier_never_drawn() {
        let weights = PriorityWeights {
            high: 3,
            medium: 2,
            low: 0,
        };
        let mut pool = TaskPool::new(0);
        pool.add(task(Priority::Low, TaskAction::Idle), &weights);
        pool.add(
            task(Priority::Medium, TaskAction::DismissActor { actor: ActorId(1) }),
            &weights,
        );

        let mut rng = SeededRng::new(3);
        for _ in 0..50 {
            assert_eq!(pool.select(&mut rng).unwrap().kind(), TaskKind::DismissActor);
        }
    }
}
