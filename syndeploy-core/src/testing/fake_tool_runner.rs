use std::io;
use std::sync::Mutex;

use crate::domain::{ToolOutput, ToolRunner};

///////////////////////////////////////////////////////////////////////////////
// FakeToolRunner
///////////////////////////////////////////////////////////////////////////////

struct Rule {
    needles: Vec<String>,
    output: ToolOutput,
    once: bool,
}

/// Scripted stand-in for external tools. Responses are keyed by argument
/// fragments; every invocation is recorded so tests can assert on call
/// presence and ordering. Unscripted invocations succeed with empty output,
/// which keeps happy-path scripting short.
pub struct FakeToolRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeToolRunner {
    pub fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(stdout: &str) -> ToolOutput {
        ToolOutput {
            status: Some(0),
            stdout: stdout.to_owned(),
            stderr: String::new(),
        }
    }

    pub fn err(status: i32, stderr: &str) -> ToolOutput {
        ToolOutput {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.to_owned(),
        }
    }

    /// Registers a scripted response for any invocation whose program name
    /// or arguments contain every given fragment. Later registrations take
    /// precedence.
    pub fn on(&self, needles: &[&str], output: ToolOutput) {
        self.push_rule(needles, output, false);
    }

    /// Like [`FakeToolRunner::on`] but the rule is consumed by its first
    /// match. Used to model control-plane state transitions (e.g. a
    /// deployment probe that answers differently after submission).
    pub fn on_once(&self, needles: &[&str], output: ToolOutput) {
        self.push_rule(needles, output, true);
    }

    fn push_rule(&self, needles: &[&str], output: ToolOutput, once: bool) {
        self.rules.lock().unwrap().push(Rule {
            needles: needles.iter().map(|s| (*s).to_owned()).collect(),
            output,
            once,
        });
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Index of the first recorded invocation matching all fragments
    pub fn find_call(&self, needles: &[&str]) -> Option<usize> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .position(|(program, args)| Self::matches(program, args, needles))
    }

    /// Index of the last recorded invocation matching all fragments
    pub fn rfind_call(&self, needles: &[&str]) -> Option<usize> {
        let calls = self.calls.lock().unwrap();
        calls
            .iter()
            .rposition(|(program, args)| Self::matches(program, args, needles))
    }

    pub fn count_calls(&self, needles: &[&str]) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(program, args)| Self::matches(program, args, needles))
            .count()
    }

    fn matches<S: AsRef<str>>(program: &str, args: &[String], needles: &[S]) -> bool {
        needles
            .iter()
            .all(|n| program == n.as_ref() || args.iter().any(|a| a == n.as_ref()))
    }
}

impl ToolRunner for FakeToolRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, io::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_owned(), args.to_vec()));

        let mut rules = self.rules.lock().unwrap();
        let matched = rules
            .iter()
            .rposition(|r| Self::matches(program, args, &r.needles));
        let output = match matched {
            Some(idx) => {
                let output = rules[idx].output.clone();
                if rules[idx].once {
                    rules.remove(idx);
                }
                output
            }
            None => Self::ok(""),
        };
        Ok(output)
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscripted_calls_succeed() {
        let fake = FakeToolRunner::new();
        let out = fake.run("az", &["account".to_owned()]).unwrap();
        assert!(out.success());
        assert_eq!(fake.calls().len(), 1);
    }

    #[test]
    fn test_later_rules_take_precedence() {
        let fake = FakeToolRunner::new();
        fake.on(&["show"], FakeToolRunner::ok("first"));
        fake.on(&["show"], FakeToolRunner::ok("second"));

        let out = fake.run("az", &["show".to_owned()]).unwrap();
        assert_eq!(out.stdout, "second");
    }

    #[test]
    fn test_once_rules_are_consumed() {
        let fake = FakeToolRunner::new();
        fake.on(&["show"], FakeToolRunner::ok("steady"));
        fake.on_once(&["show"], FakeToolRunner::err(1, "transient"));

        let first = fake.run("az", &["show".to_owned()]).unwrap();
        assert!(!first.success());
        let second = fake.run("az", &["show".to_owned()]).unwrap();
        assert_eq!(second.stdout, "steady");
    }

    #[test]
    fn test_call_ordering_queries() {
        let fake = FakeToolRunner::new();
        fake.run("az", &["a".to_owned()]).unwrap();
        fake.run("sqlcmd", &["-Q".to_owned(), "SELECT 1".to_owned()])
            .unwrap();
        fake.run("az", &["a".to_owned()]).unwrap();

        assert_eq!(fake.find_call(&["az"]), Some(0));
        assert_eq!(fake.rfind_call(&["az"]), Some(2));
        assert_eq!(fake.count_calls(&["az"]), 2);
        assert_eq!(fake.find_call(&["terraform"]), None);
    }
}
