use super::options::Transform;
use super::resolved::ResolvedConfig;

/// Runs the user hook once, or returns `config` untouched when there is none.
///
/// The hook's output is returned as-is and is not validated again; keeping it
/// well-formed is the hook's responsibility.
pub fn apply_transform(config: ResolvedConfig, transform: Option<&Transform>) -> ResolvedConfig {
    match transform {
        Some(transform) => transform(config),
        None => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::field::Field;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_identity_without_hook() {
        let mut config = ResolvedConfig::default();
        config.set(Field::ApiKey, "key");
        assert_eq!(apply_transform(config.clone(), None), config);
    }

    #[test]
    fn test_hook_runs_once_and_result_is_kept() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let hook: Transform = Arc::new(move |mut config: ResolvedConfig| {
            counter.fetch_add(1, Ordering::SeqCst);
            config.set(Field::AuthDomain, "Not A Domain");
            config
        });

        let out = apply_transform(ResolvedConfig::default(), Some(&hook));
        assert_eq!(out.get(Field::AuthDomain), Some("Not A Domain"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
