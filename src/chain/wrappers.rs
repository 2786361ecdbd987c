//! Transparent wrapper types and chain unwrapping.
//!
//! Some exception types carry nothing worth reporting except their inner
//! cause. Registered wrapper types are stripped from the outermost position
//! of a chain so the most specific cause is what gets grouped and displayed.

use super::exception::{ReportableError, TypeName};
use crate::utils::config::DEFAULT_WRAPPER_TYPES;
use log::{debug, warn};

/// Append-only set of wrapper type identities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperTypeSet {
    types: Vec<TypeName>,
}

impl WrapperTypeSet {
    /// Set seeded with the invocation and unhandled-request wrappers
    pub fn new() -> Self {
        let mut set = Self::empty();
        set.register_all(DEFAULT_WRAPPER_TYPES.iter().copied());
        set
    }

    /// Set with no entries at all
    pub fn empty() -> Self {
        Self { types: Vec::new() }
    }

    /// Register a wrapper type. Returns false if it was already present.
    pub fn register(&mut self, type_name: impl Into<TypeName>) -> bool {
        let type_name = type_name.into();
        if self.contains(&type_name) {
            return false;
        }
        debug!("Registered wrapper type: {}", type_name);
        self.types.push(type_name);
        true
    }

    pub fn register_all<I, T>(&mut self, types: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        for type_name in types {
            self.register(type_name);
        }
    }

    /// Exact identity match, no subtype matching
    pub fn contains(&self, type_name: &TypeName) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeName> {
        self.types.iter()
    }

    /// Strip registered wrappers from the outside in
    ///
    /// Stops at the first error that is not a registered wrapper, or at a
    /// wrapper with no inner cause. A wrapper reached a second time ends the
    /// walk there, so cyclic chains terminate.
    pub fn unwrap<'a>(&self, error: &'a dyn ReportableError) -> &'a dyn ReportableError {
        let mut visited: Vec<&dyn ReportableError> = Vec::new();
        let mut current = error;

        while self.contains(current.type_name()) {
            if visited.iter().any(|seen| std::ptr::addr_eq(*seen, current)) {
                warn!("Wrapper chain loops back to {}, stopping", current.type_name());
                break;
            }
            visited.push(current);

            match current.inner() {
                Some(inner) => {
                    debug!("Stripped wrapper {}", current.type_name());
                    current = inner;
                }
                None => break,
            }
        }

        current
    }
}

impl Default for WrapperTypeSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip registered wrappers from the outside in
pub fn unwrap_chain<'a>(error: &'a dyn ReportableError, wrappers: &WrapperTypeSet) -> &'a dyn ReportableError {
    wrappers.unwrap(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::exception::RawError;

    #[test]
    fn test_defaults_are_seeded() {
        let set = WrapperTypeSet::new();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&TypeName::new("System.Reflection.TargetInvocationException")));
        assert!(set.contains(&TypeName::new("System.Web.HttpUnhandledException")));
    }

    #[test]
    fn test_subtypes_are_not_matched() {
        let mut set = WrapperTypeSet::empty();
        set.register("App.Wrapper");

        let err = RawError::new("App.WrapperDerived", "x").with_inner(RawError::new("App.Real", "y"));
        assert_eq!(set.unwrap(&err).type_name().full_name(), "App.WrapperDerived");
    }

    #[test]
    fn test_self_referencing_wrapper_terminates() {
        #[derive(Debug)]
        struct Looping(TypeName);

        impl ReportableError for Looping {
            fn type_name(&self) -> &TypeName {
                &self.0
            }

            fn message(&self) -> &str {
                "loop"
            }

            fn inner(&self) -> Option<&dyn ReportableError> {
                Some(self)
            }
        }

        let mut set = WrapperTypeSet::empty();
        set.register("W");

        let err = Looping(TypeName::new("W"));
        let once = set.unwrap(&err);
        assert!(std::ptr::addr_eq(once, &err));
        assert!(std::ptr::addr_eq(set.unwrap(once), once));
    }
}
