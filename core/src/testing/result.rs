use std::time::Duration;

use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub testcase_name: String,
    pub judge: JudgeCode,
    pub execution_time: Duration,
    /// `None` on TLE.
    pub output: Option<ProcessOutput>,
    pub expected: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum JudgeCode {
    AC,
    WA,
    TLE,
    RE,
}
