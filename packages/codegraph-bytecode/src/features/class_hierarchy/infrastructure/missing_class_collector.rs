//! Missing-class reporter adapters

use crate::features::class_hierarchy::domain::ClassId;
use crate::features::class_hierarchy::ports::MissingClassReporter;
use parking_lot::Mutex;

/// Aggregates missing classes for a final report
#[derive(Debug, Default)]
pub struct MissingClassCollector {
    classes: Mutex<Vec<ClassId>>,
}

impl MissingClassCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reported classes in notification order
    pub fn classes(&self) -> Vec<ClassId> {
        self.classes.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.classes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.lock().is_empty()
    }

    /// Drain collected classes, leaving the collector empty
    pub fn take(&self) -> Vec<ClassId> {
        std::mem::take(&mut *self.classes.lock())
    }
}

impl MissingClassReporter for MissingClassCollector {
    fn report(&self, id: &ClassId) {
        self.classes.lock().push(id.clone());
    }
}

/// Logs each missing class as a warning
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMissingClassReporter;

impl MissingClassReporter for TracingMissingClassReporter {
    fn report(&self, id: &ClassId) {
        tracing::warn!(class = %id, "class not found on analysis classpath");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_keeps_order_and_drains() {
        let collector = MissingClassCollector::new();
        collector.report(&ClassId::new("b.B"));
        collector.report(&ClassId::new("a.A"));

        assert_eq!(collector.classes(), vec![ClassId::new("b.B"), ClassId::new("a.A")]);
        assert_eq!(collector.take().len(), 2);
        assert!(collector.is_empty());
    }

    #[test]
    fn test_tracing_reporter_does_not_panic() {
        TracingMissingClassReporter.report(&ClassId::new("a.Gone"));
    }
}
