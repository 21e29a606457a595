//! Linear undo/redo history over whole-state snapshots.
//!
//! [`History`] owns the live state together with its past and future stacks.
//! All mutation goes through [`History::commit`] or [`History::try_commit`]:
//! the outgoing state is pushed onto the past stack and the future stack is
//! cleared, so redo is only ever available directly after an undo.
//!
//! Snapshots are owned values. A state moved onto a stack can no longer be
//! reached through the live state, so later changes never leak into history.

use log::debug;

use crate::config::HistoryConfig;

/// Live state plus undo/redo stacks.
#[derive(Clone, Debug)]
pub struct History<S> {
	current: S,
	past: Vec<S>,
	future: Vec<S>,
	max_undo_steps: usize,
}

impl<S> History<S> {
	/// Start a history at `initial` with default limits.
	pub fn new(initial: S) -> Self {
		Self::with_config(initial, &HistoryConfig::default())
	}

	/// Start a history at `initial`.
	pub fn with_config(initial: S, config: &HistoryConfig) -> Self {
		Self {
			current: initial,
			past: Vec::new(),
			future: Vec::new(),
			max_undo_steps: config.max_undo_steps,
		}
	}

	/// The live state.
	pub fn current(&self) -> &S {
		&self.current
	}

	/// Replace the live state and forget all history.
	pub fn reset(&mut self, state: S) {
		self.current = state;
		self.past.clear();
		self.future.clear();
	}

	/// Record the current state and replace it with `updater(current)`.
	pub fn commit(&mut self, updater: impl FnOnce(&S) -> S) {
		let next = updater(&self.current);
		self.push(next);
	}

	/// Like [`commit`](Self::commit), but an `Err` from `updater` leaves the
	/// state and both stacks untouched.
	pub fn try_commit<E>(&mut self, updater: impl FnOnce(&S) -> Result<S, E>) -> Result<(), E> {
		let next = updater(&self.current)?;
		self.push(next);
		Ok(())
	}

	/// Step back one commit. Returns false when there is nothing to undo.
	pub fn undo(&mut self) -> bool {
		let Some(prev) = self.past.pop() else {
			return false;
		};
		let cur = std::mem::replace(&mut self.current, prev);
		self.future.push(cur);
		debug!("history: undo (past {}, future {})", self.past.len(), self.future.len());
		true
	}

	/// Step forward one undone commit. Returns false when there is nothing to redo.
	pub fn redo(&mut self) -> bool {
		let Some(next) = self.future.pop() else {
			return false;
		};
		let cur = std::mem::replace(&mut self.current, next);
		self.past.push(cur);
		debug!("history: redo (past {}, future {})", self.past.len(), self.future.len());
		true
	}

	/// True when [`undo`](Self::undo) would change the state.
	pub fn can_undo(&self) -> bool {
		!self.past.is_empty()
	}

	/// True when [`redo`](Self::redo) would change the state.
	pub fn can_redo(&self) -> bool {
		!self.future.is_empty()
	}

	/// Size of the past stack.
	pub fn past_len(&self) -> usize {
		self.past.len()
	}

	/// Size of the future stack.
	pub fn future_len(&self) -> usize {
		self.future.len()
	}

	fn push(&mut self, next: S) {
		let prev = std::mem::replace(&mut self.current, next);
		self.past.push(prev);
		self.future.clear();
		if self.past.len() > self.max_undo_steps {
			let excess = self.past.len() - self.max_undo_steps;
			self.past.drain(0..excess);
			debug!("history: trimmed {} oldest entries", excess);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn add(n: i32) -> impl FnOnce(&Vec<i32>) -> Vec<i32> {
		move |prev: &Vec<i32>| {
			let mut next = prev.clone();
			next.push(n);
			next
		}
	}

	#[test]
	fn commit_pushes_and_clears_redo() {
		let mut history = History::new(Vec::new());
		history.commit(add(1));
		history.commit(add(2));
		assert_eq!(history.past_len(), 2);

		assert!(history.undo());
		assert_eq!(history.future_len(), 1);

		history.commit(add(3));
		assert_eq!(history.current(), &vec![1, 3]);
		assert!(!history.can_redo(), "a fresh commit must clear redo");
		assert_eq!(history.past_len(), 2);
	}

	#[test]
	fn undo_then_redo_restores_state() {
		let mut history = History::new(vec![0]);
		history.commit(add(1));
		history.commit(add(2));
		let before = history.current().clone();

		assert!(history.undo());
		assert_eq!(history.current(), &vec![0, 1]);
		assert!(history.redo());
		assert_eq!(history.current(), &before);
		assert!(!history.can_redo());
	}

	#[test]
	fn undo_and_redo_on_empty_stacks_are_noops() {
		let mut history = History::new(vec![7]);
		assert!(!history.undo());
		assert!(!history.redo());
		assert_eq!(history.current(), &vec![7]);
		assert_eq!((history.past_len(), history.future_len()), (0, 0));
	}

	#[test]
	fn failed_try_commit_leaves_history_alone() {
		let mut history = History::new(vec![0]);
		history.commit(add(1));
		history.undo();

		let result: Result<(), &str> = history.try_commit(|_| Err("rejected"));
		assert_eq!(result, Err("rejected"));
		assert_eq!(history.current(), &vec![0]);
		assert_eq!(history.past_len(), 0);
		assert_eq!(history.future_len(), 1, "a rejected commit must not clear redo");
	}

	#[test]
	fn past_is_trimmed_to_limit() {
		let config = HistoryConfig { max_undo_steps: 3 };
		let mut history = History::with_config(Vec::new(), &config);
		for n in 0..5 {
			history.commit(add(n));
		}
		assert_eq!(history.past_len(), 3);

		while history.undo() {}
		assert_eq!(history.current(), &vec![0, 1]);
	}

	#[test]
	fn reset_forgets_history() {
		let mut history = History::new(vec![0]);
		history.commit(add(1));
		history.undo();
		history.reset(vec![9]);
		assert!(!history.can_undo());
		assert!(!history.can_redo());
		assert_eq!(history.current(), &vec![9]);
	}
}
