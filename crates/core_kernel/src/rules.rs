//! Business rule framework
//!
//! Aggregates state their preconditions as a list of [`BusinessRule`]s built
//! inline from the values each rule needs. [`check_rules`] evaluates the
//! whole list and reports every broken rule together, so callers learn all
//! the reasons an operation was rejected instead of only the first.
//!
//! ```rust
//! use core_kernel::rules::{BusinessRule, check_rules};
//!
//! let versions = 0;
//! let number = 0;
//! let result = check_rules([
//!     BusinessRule::new("number_positive", number == 0, "Number must be greater than zero"),
//!     BusinessRule::new("has_versions", versions == 0, "Product must have any version."),
//! ]);
//!
//! let broken = result.unwrap_err();
//! assert_eq!(broken.len(), 2);
//! ```

use std::borrow::Cow;
use std::fmt;

/// A named precondition together with the message reported when it is broken
///
/// Rules carry no references to the entities they check; the predicate is
/// evaluated by the caller from already-extracted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessRule {
    name: &'static str,
    broken: bool,
    message: Cow<'static, str>,
}

impl BusinessRule {
    /// Creates a rule from its evaluated predicate
    ///
    /// # Arguments
    ///
    /// * `name` - Stable identifier of the rule, used to match violations
    /// * `broken` - Whether the rule is violated
    /// * `message` - Human-readable reason reported when broken
    pub fn new(name: &'static str, broken: bool, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name,
            broken,
            message: message.into(),
        }
    }

    /// Returns the rule identifier
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if the rule is violated
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Returns the message reported when the rule is violated
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    /// Identifier of the broken rule
    pub rule: &'static str,
    /// Reason reported by the rule
    pub message: String,
}

/// One or more broken business rules, in evaluation order
///
/// Never empty: it is only produced by [`check_rules`] when at least one
/// rule is broken, or by [`BrokenRules::single`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenRules {
    violations: Vec<RuleViolation>,
}

impl BrokenRules {
    /// Creates a failure carrying exactly one violation
    pub fn single(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![RuleViolation {
                rule,
                message: message.into(),
            }],
        }
    }

    /// Returns the violations in evaluation order
    pub fn violations(&self) -> &[RuleViolation] {
        &self.violations
    }

    /// Returns the human-readable messages in evaluation order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }

    /// Returns true if the named rule is among the violations
    pub fn contains_rule(&self, rule: &str) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }

    /// Returns the number of violated rules
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Appends the violations of another failure
    pub fn merge(&mut self, other: BrokenRules) {
        self.violations.extend(other.violations);
    }
}

impl fmt::Display for BrokenRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for BrokenRules {}

/// Evaluates every rule and collects the broken ones
///
/// All rules are evaluated; there is no short-circuit.
///
/// # Returns
///
/// `Ok(())` when no rule is broken, otherwise every violation in order
pub fn check_rules<I>(rules: I) -> Result<(), BrokenRules>
where
    I: IntoIterator<Item = BusinessRule>,
{
    let violations: Vec<RuleViolation> = rules
        .into_iter()
        .filter(BusinessRule::is_broken)
        .map(|rule| RuleViolation {
            rule: rule.name,
            message: rule.message.into_owned(),
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(BrokenRules { violations })
    }
}
