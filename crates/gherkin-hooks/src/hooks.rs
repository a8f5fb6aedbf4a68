//! Priority-ordered hook sets.

use std::fmt;

/// Optional hook priority. Lower values run first; `None` runs after every
/// prioritised hook.
pub type HookPriority = Option<u32>;

struct Entry<T: ?Sized> {
    priority: HookPriority,
    hook: Box<dyn Fn(&T) + Send + Sync>,
}

const fn rank(priority: HookPriority) -> (bool, u32) {
    match priority {
        Some(value) => (false, value),
        None => (true, 0),
    }
}

/// Hooks observing one kind of subject, kept in execution order.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use gherkin_hooks::HookSet;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let mut hooks = HookSet::<str>::default();
/// for (priority, label) in [(None, "last"), (Some(2), "second"), (Some(1), "first")] {
///     let seen = Arc::clone(&seen);
///     hooks.register(priority, move |_| seen.lock().unwrap().push(label));
/// }
/// hooks.run("feature");
/// assert_eq!(*seen.lock().unwrap(), ["first", "second", "last"]);
/// ```
pub struct HookSet<T: ?Sized> {
    entries: Vec<Entry<T>>,
}

impl<T: ?Sized> Default for HookSet<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for HookSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSet")
            .field(
                "priorities",
                &self.entries.iter().map(|e| e.priority).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T: ?Sized> HookSet<T> {
    /// Add a hook, placing it after every hook of the same or lower rank.
    pub fn register(&mut self, priority: HookPriority, hook: impl Fn(&T) + Send + Sync + 'static) {
        let index = self
            .entries
            .partition_point(|entry| rank(entry.priority) <= rank(priority));
        self.entries.insert(
            index,
            Entry {
                priority,
                hook: Box::new(hook),
            },
        );
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when no hook is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Priorities in execution order.
    pub fn priorities(&self) -> impl Iterator<Item = HookPriority> + '_ {
        self.entries.iter().map(|entry| entry.priority)
    }

    /// Invoke every hook with `subject`, in execution order.
    pub fn run(&self, subject: &T) {
        for (position, entry) in self.entries.iter().enumerate() {
            log::trace!(
                "running hook {position} of {} (priority {:?})",
                self.entries.len(),
                entry.priority
            );
            (entry.hook)(subject);
        }
    }
}

/// Before and after hooks for features, scenarios and steps.
///
/// `F`, `S` and `St` are the caller's feature, scenario and step types.
pub struct Lifecycle<F: ?Sized, S: ?Sized, St: ?Sized> {
    before_feature: HookSet<F>,
    after_feature: HookSet<F>,
    before_scenario: HookSet<S>,
    after_scenario: HookSet<S>,
    before_step: HookSet<St>,
    after_step: HookSet<St>,
}

impl<F: ?Sized, S: ?Sized, St: ?Sized> Default for Lifecycle<F, S, St> {
    fn default() -> Self {
        Self {
            before_feature: HookSet::default(),
            after_feature: HookSet::default(),
            before_scenario: HookSet::default(),
            after_scenario: HookSet::default(),
            before_step: HookSet::default(),
            after_step: HookSet::default(),
        }
    }
}

impl<F: ?Sized, S: ?Sized, St: ?Sized> fmt::Debug for Lifecycle<F, S, St> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("before_feature", &self.before_feature.len())
            .field("after_feature", &self.after_feature.len())
            .field("before_scenario", &self.before_scenario.len())
            .field("after_scenario", &self.after_scenario.len())
            .field("before_step", &self.before_step.len())
            .field("after_step", &self.after_step.len())
            .finish()
    }
}

impl<F: ?Sized, S: ?Sized, St: ?Sized> Lifecycle<F, S, St> {
    /// Register a hook to run before each feature.
    pub fn before_feature(
        &mut self,
        priority: HookPriority,
        hook: impl Fn(&F) + Send + Sync + 'static,
    ) -> &mut Self {
        self.before_feature.register(priority, hook);
        self
    }

    /// Register a hook to run after each feature.
    pub fn after_feature(
        &mut self,
        priority: HookPriority,
        hook: impl Fn(&F) + Send + Sync + 'static,
    ) -> &mut Self {
        self.after_feature.register(priority, hook);
        self
    }

    /// Register a hook to run before each scenario.
    pub fn before_scenario(
        &mut self,
        priority: HookPriority,
        hook: impl Fn(&S) + Send + Sync + 'static,
    ) -> &mut Self {
        self.before_scenario.register(priority, hook);
        self
    }

    /// Register a hook to run after each scenario.
    pub fn after_scenario(
        &mut self,
        priority: HookPriority,
        hook: impl Fn(&S) + Send + Sync + 'static,
    ) -> &mut Self {
        self.after_scenario.register(priority, hook);
        self
    }

    /// Register a hook to run before each step.
    pub fn before_step(
        &mut self,
        priority: HookPriority,
        hook: impl Fn(&St) + Send + Sync + 'static,
    ) -> &mut Self {
        self.before_step.register(priority, hook);
        self
    }

    /// Register a hook to run after each step.
    pub fn after_step(
        &mut self,
        priority: HookPriority,
        hook: impl Fn(&St) + Send + Sync + 'static,
    ) -> &mut Self {
        self.after_step.register(priority, hook);
        self
    }

    /// Run the before-feature hooks.
    pub fn run_before_feature(&self, feature: &F) {
        self.before_feature.run(feature);
    }

    /// Run the after-feature hooks.
    pub fn run_after_feature(&self, feature: &F) {
        self.after_feature.run(feature);
    }

    /// Run the before-scenario hooks.
    pub fn run_before_scenario(&self, scenario: &S) {
        self.before_scenario.run(scenario);
    }

    /// Run the after-scenario hooks.
    pub fn run_after_scenario(&self, scenario: &S) {
        self.after_scenario.run(scenario);
    }

    /// Run the before-step hooks.
    pub fn run_before_step(&self, step: &St) {
        self.before_step.run(step);
    }

    /// Run the after-step hooks.
    pub fn run_after_step(&self, step: &St) {
        self.after_step.run(step);
    }

    /// Total number of registered hooks across all six sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.before_feature.len()
            + self.after_feature.len()
            + self.before_scenario.len()
            + self.after_scenario.len()
            + self.before_step.len()
            + self.after_step.len()
    }

    /// Return `true` when no hook is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
