use regex::Regex;
use std::env;
use std::ffi::OsString;
use std::sync::LazyLock;

/// `NAME=value` followed by at least one space, anchored at the start.
/// NUL is excluded from values since the environment cannot hold it.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)=([^\s\x00]+) +").expect("assignment pattern is valid")
});

/// A single `NAME=value` prefix of a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

/// Strips leading `NAME=value` assignments from a line.
///
/// Values are literal: no quoting or escaping is recognized here. Scanning
/// stops at the first prefix that does not look like an assignment, and the
/// rest of the line is returned untouched.
pub fn extract_assignments(line: &str) -> (Vec<Assignment>, &str) {
    let mut assignments = Vec::new();
    let mut rest = line;

    while let Some(caps) = ASSIGNMENT.captures(rest) {
        assignments.push(Assignment {
            name: caps[1].to_string(),
            value: caps[2].to_string(),
        });
        rest = &rest[caps[0].len()..];
    }

    (assignments, rest)
}

/// Applies assignments to the process environment until dropped.
///
/// Each overridden variable's previous value is remembered; on drop the
/// variables are restored in reverse order, and any that did not exist
/// before are removed again. Restoration happens on every exit path.
#[derive(Debug)]
pub struct EnvOverrides {
    saved: Vec<(String, Option<OsString>)>,
}

impl EnvOverrides {
    pub fn apply(assignments: &[Assignment]) -> Self {
        let mut saved = Vec::with_capacity(assignments.len());
        for Assignment { name, value } in assignments {
            saved.push((name.clone(), env::var_os(name)));
            tracing::debug!(name = %name, "overriding environment variable");
            // SAFETY: the shell runs a single thread of control; nothing else
            // reads or writes the environment concurrently.
            unsafe { env::set_var(name, value) };
        }
        EnvOverrides { saved }
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

impl Drop for EnvOverrides {
    fn drop(&mut self) {
        while let Some((name, previous)) = self.saved.pop() {
            tracing::debug!(name = %name, restored = previous.is_some(), "restoring environment variable");
            // SAFETY: see `EnvOverrides::apply`.
            unsafe {
                match previous {
                    Some(value) => env::set_var(&name, value),
                    None => env::remove_var(&name),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::PROCESS_LOCK;

    fn assignment(name: &str, value: &str) -> Assignment {
        Assignment {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn extracts_leading_assignments_in_order() {
        let (assignments, rest) = extract_assignments("FOO=bar BAZ=1  env -i");
        assert_eq!(
            assignments,
            vec![assignment("FOO", "bar"), assignment("BAZ", "1")]
        );
        assert_eq!(rest, "env -i");
    }

    #[test]
    fn stops_at_first_non_assignment() {
        let (assignments, rest) = extract_assignments("echo A=b C=d");
        assert!(assignments.is_empty());
        assert_eq!(rest, "echo A=b C=d");

        let (assignments, rest) = extract_assignments("A=1 echo B=2 x");
        assert_eq!(assignments, vec![assignment("A", "1")]);
        assert_eq!(rest, "echo B=2 x");
    }

    #[test]
    fn requires_a_following_space() {
        let (assignments, rest) = extract_assignments("FOO=bar");
        assert!(assignments.is_empty());
        assert_eq!(rest, "FOO=bar");
    }

    #[test]
    fn values_are_taken_literally() {
        let (assignments, rest) = extract_assignments(r#"MSG="hi there" cmd"#);
        assert_eq!(assignments, vec![assignment("MSG", "\"hi")]);
        assert_eq!(rest, "there\" cmd");
    }

    #[test]
    fn empty_value_does_not_match() {
        let (assignments, rest) = extract_assignments("FOO= cmd");
        assert!(assignments.is_empty());
        assert_eq!(rest, "FOO= cmd");
    }

    #[test]
    fn values_containing_nul_are_not_assignments() {
        let (assignments, rest) = extract_assignments("FOO=a\0b echo x");
        assert!(assignments.is_empty());
        assert_eq!(rest, "FOO=a\0b echo x");

        let (assignments, rest) = extract_assignments("A=1 B=\0 cmd");
        assert_eq!(assignments, vec![assignment("A", "1")]);
        assert_eq!(rest, "B=\0 cmd");
    }

    #[test]
    fn overrides_are_restored_on_drop() {
        let _lock = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        unsafe {
            env::set_var("SHELL_REPL_TEST_KEEP", "before");
            env::remove_var("SHELL_REPL_TEST_NEW");
        }

        {
            let guard = EnvOverrides::apply(&[
                assignment("SHELL_REPL_TEST_KEEP", "during"),
                assignment("SHELL_REPL_TEST_NEW", "fresh"),
            ]);
            assert!(!guard.is_empty());
            assert_eq!(env::var("SHELL_REPL_TEST_KEEP").unwrap(), "during");
            assert_eq!(env::var("SHELL_REPL_TEST_NEW").unwrap(), "fresh");
        }

        assert_eq!(env::var("SHELL_REPL_TEST_KEEP").unwrap(), "before");
        assert!(env::var_os("SHELL_REPL_TEST_NEW").is_none());
        unsafe { env::remove_var("SHELL_REPL_TEST_KEEP") };
    }

    #[test]
    fn repeated_name_restores_original_value() {
        let _lock = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        unsafe { env::remove_var("SHELL_REPL_TEST_TWICE") };

        {
            let _guard = EnvOverrides::apply(&[
                assignment("SHELL_REPL_TEST_TWICE", "one"),
                assignment("SHELL_REPL_TEST_TWICE", "two"),
            ]);
            assert_eq!(env::var("SHELL_REPL_TEST_TWICE").unwrap(), "two");
        }

        assert!(env::var_os("SHELL_REPL_TEST_TWICE").is_none());
    }

    #[test]
    fn overrides_are_restored_when_unwinding() {
        let _lock = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        unsafe { env::remove_var("SHELL_REPL_TEST_PANIC") };

        let result = std::panic::catch_unwind(|| {
            let _guard = EnvOverrides::apply(&[assignment("SHELL_REPL_TEST_PANIC", "x")]);
            panic!("command failed");
        });

        assert!(result.is_err());
        assert!(env::var_os("SHELL_REPL_TEST_PANIC").is_none());
    }
}
