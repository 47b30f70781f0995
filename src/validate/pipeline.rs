//! Priority-ordered validator chain

use std::cmp::Reverse;

use super::context::ValidationContext;
use super::result::ValidationResult;
use super::validators::default_validators;
use crate::config::LintConfig;
use crate::tasks::TaskDetail;

/// A single rule family applied to one task at a time.
///
/// Implementations must be pure functions of `(task, ctx)` so tasks can be validated in
/// any order with identical results.
pub trait TaskValidator: Send + Sync {
    /// Short identifier, used to disable the validator from configuration
    fn name(&self) -> &'static str;

    /// Higher runs first
    fn priority(&self) -> u8;

    fn validate(&self, task: &TaskDetail, ctx: &ValidationContext<'_>) -> ValidationResult;
}

pub struct ValidationPipeline {
    validators: Vec<Box<dyn TaskValidator>>,
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new(default_validators())
    }
}

impl ValidationPipeline {
    /// Build a pipeline; validators are ordered by descending priority, ties keep their
    /// given order.
    pub fn new(validators: Vec<Box<dyn TaskValidator>>) -> Self {
        let mut pipeline = Self { validators };
        pipeline.sort();
        pipeline
    }

    /// Default validator set minus any named in `disabled_validators`
    pub fn from_config(config: &LintConfig) -> Self {
        let validators = default_validators()
            .into_iter()
            .filter(|v| !config.disabled_validators.iter().any(|name| name == v.name()))
            .collect();
        Self::new(validators)
    }

    pub fn register(&mut self, validator: Box<dyn TaskValidator>) {
        self.validators.push(validator);
        self.sort();
    }

    fn sort(&mut self) {
        self.validators.sort_by_key(|v| Reverse(v.priority()));
    }

    /// Validator names in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator against one task, stopping after the first validator whose
    /// result carries a critical finding. Results gathered so far are kept.
    pub fn validate_task(&self, task: &TaskDetail, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut combined = ValidationResult::success();

        for validator in &self.validators {
            let result = validator.validate(task, ctx);
            let halt = result.has_critical();
            combined = combined.combine(result);
            if halt {
                tracing::debug!(
                    task = %task.id,
                    validator = validator.name(),
                    "critical finding, skipping remaining validators"
                );
                break;
            }
        }

        combined
    }

    /// Validate every task in the context
    pub fn validate_all(&self, ctx: &ValidationContext<'_>) -> ValidationResult {
        ctx.tasks
            .iter()
            .map(|task| self.validate_task(task, ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::references::ReferenceMap;
    use crate::tasks::extract_task_details;
    use crate::validate::{ErrorKind, Severity, ValidationError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Recorder {
        name: &'static str,
        priority: u8,
        severity: Option<Severity>,
        calls: Arc<AtomicUsize>,
    }

    impl TaskValidator for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn validate(&self, task: &TaskDetail, _ctx: &ValidationContext<'_>) -> ValidationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let findings = self.severity.map(|severity| {
                ValidationError::new(ErrorKind::MissingRequiredSection, &task.id, self.name)
                    .with_severity(severity)
            });
            ValidationResult::from_findings(findings)
        }
    }

    fn recording(
        name: &'static str,
        priority: u8,
        severity: Option<Severity>,
    ) -> (Box<dyn TaskValidator>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let recorder = Recorder {
            name,
            priority,
            severity,
            calls: Arc::clone(&calls),
        };
        (Box::new(recorder), calls)
    }

    fn with_tasks(doc: &str, f: impl FnOnce(&ValidationContext<'_>)) {
        let tasks = extract_task_details(&Document::parse(doc));
        let refs = ReferenceMap::default();
        let config = LintConfig::default();
        let patterns = config.compile_patterns().unwrap();
        let ctx = ValidationContext::new(&tasks, &[], &refs, &config, &patterns);
        f(&ctx);
    }

    #[test]
    fn test_sorted_by_priority_with_stable_ties() {
        let (low, _) = recording("low", 10, None);
        let (tie_a, _) = recording("tie-a", 50, None);
        let (high, _) = recording("high", 90, None);
        let (tie_b, _) = recording("tie-b", 50, None);

        let pipeline = ValidationPipeline::new(vec![low, tie_a, high, tie_b]);
        assert_eq!(pipeline.names(), vec!["high", "tie-a", "tie-b", "low"]);
    }

    #[test]
    fn test_critical_halts_only_that_task() {
        let (first, first_calls) = recording("first", 90, Some(Severity::Critical));
        let (second, second_calls) = recording("second", 10, Some(Severity::Error));
        let pipeline = ValidationPipeline::new(vec![second, first]);

        with_tasks("### ABC001: One\n### ABC002: Two\n", |ctx| {
            let result = pipeline.validate_all(ctx);
            assert_eq!(first_calls.load(Ordering::SeqCst), 2);
            assert_eq!(second_calls.load(Ordering::SeqCst), 0);
            assert_eq!(result.errors.len(), 2);
            assert!(!result.valid);
        });
    }

    #[test]
    fn test_non_critical_errors_aggregate() {
        let (first, _) = recording("first", 90, Some(Severity::Error));
        let (second, _) = recording("second", 10, Some(Severity::Warning));
        let pipeline = ValidationPipeline::new(vec![first, second]);

        with_tasks("### ABC001: One\n", |ctx| {
            let result = pipeline.validate_all(ctx);
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.warnings.len(), 1);
            assert_eq!(result.errors[0].message, "first");
        });
    }

    #[test]
    fn test_register_keeps_order() {
        let (high, _) = recording("high", 90, None);
        let mut pipeline = ValidationPipeline::new(vec![high]);
        let (mid, _) = recording("mid", 50, None);
        pipeline.register(mid);
        let (top, _) = recording("top", 200, None);
        pipeline.register(top);

        assert_eq!(pipeline.names(), vec!["top", "high", "mid"]);
    }

    #[test]
    fn test_from_config_drops_disabled() {
        let config = LintConfig {
            disabled_validators: vec!["kpi".to_string(), "category".to_string()],
            ..LintConfig::default()
        };
        let pipeline = ValidationPipeline::from_config(&config);
        assert!(!pipeline.names().contains(&"kpi"));
        assert!(!pipeline.names().contains(&"category"));
        assert_eq!(pipeline.len(), ValidationPipeline::default().len() - 2);
    }

    #[test]
    fn test_default_order() {
        assert_eq!(
            ValidationPipeline::default().names(),
            vec!["id", "sections", "status", "dependencies", "kpi", "category", "subtasks"]
        );
    }
}
