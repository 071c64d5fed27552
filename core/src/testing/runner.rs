use std::{
    collections::HashMap,
    ffi::OsStr,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use anyhow::{bail, Context};
use tokio::process::Command;

use super::{result::*, testcase::*};
use crate::str_interp::{interp, InterpError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCommand {
    pub compile: Option<String>,
    pub run: String,
}

/// Runs one solution against testcases through `<shell> -c <command>`.
#[derive(Debug, Clone)]
pub struct TestRunner {
    cmd: TestCommand,
    shell: PathBuf,
    execution_time_limit: Duration,
}

impl TestRunner {
    const DEFAULT_SHELL: &str = "/bin/sh";
    const DEFAULT_EXEC_TIME_LIMIT: Duration = Duration::from_millis(2000);

    pub fn new(cmd: TestCommand) -> Self {
        Self {
            cmd,
            shell: Self::DEFAULT_SHELL.into(),
            execution_time_limit: Self::DEFAULT_EXEC_TIME_LIMIT,
        }
    }

    pub fn shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn execution_time_limit(mut self, limit: Duration) -> Self {
        self.execution_time_limit = limit;
        self
    }

    /// Fills `{file}`, `{dir}` and `{stem}` of both commands from `filepath`.
    pub fn program_file(
        mut self,
        filepath: impl AsRef<Path>,
    ) -> std::result::Result<Self, InterpError> {
        let vars = Self::make_cmd_interp_vars(filepath.as_ref());
        self.cmd.compile = self
            .cmd
            .compile
            .map(|fmt| interp(&fmt, &vars))
            .transpose()?;
        self.cmd.run = interp(&self.cmd.run, &vars)?;
        Ok(self)
    }

    fn make_cmd_interp_vars(filepath: &Path) -> HashMap<&'static str, &OsStr> {
        let mut m: HashMap<_, &OsStr> = HashMap::new();
        m.insert("file", filepath.as_os_str());
        m.insert(
            "dir",
            filepath
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .as_os_str(),
        );
        m.insert("stem", filepath.file_stem().unwrap_or(OsStr::new("")));
        m
    }

    pub fn get_command(&self) -> &TestCommand {
        &self.cmd
    }

    pub async fn compile(&self) -> anyhow::Result<()> {
        let Some(cmd) = &self.cmd.compile else {
            bail!("Undefined compile command")
        };

        let status = Command::new(&self.shell)
            .args(["-c", cmd])
            .status()
            .await
            .with_context(|| {
                format!(
                    "Failed to spawn '{} -c {}'",
                    self.shell.to_string_lossy(),
                    cmd
                )
            })?;

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => bail!("Compile error: exitcode={}", code),
            None => bail!("Failed to compile: process terminated by signal"),
        }
    }

    /// Feeds the testcase input on stdin and compares stdout with the
    /// expected output byte for byte.
    pub async fn run<'t, T>(&self, testcase: &'t T) -> anyhow::Result<TestOutcome>
    where
        T: AsyncTestcase<'t> + Sync,
    {
        let (mut input_reader, mut expected_reader) = tokio::try_join!(
            testcase.new_input_reader(),
            testcase.new_expected_reader()
        )?;
        let mut expected = Vec::new();
        tokio::io::copy(&mut expected_reader, &mut expected)
            .await
            .context("Failed to read expected output")?;

        let cmd = &self.cmd.run;
        let mut proc = Command::new(&self.shell)
            .args(["-c", cmd])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to spawn '{} -c {}'",
                    self.shell.to_string_lossy(),
                    cmd
                )
            })?;
        let mut stdin = proc.stdin.take().context("Failed to open stdin")?;
        let mut stdout = proc.stdout.take().context("Failed to open stdout")?;
        let mut stderr = proc.stderr.take().context("Failed to open stderr")?;

        let start_at = tokio::time::Instant::now();
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        let res = tokio::time::timeout(self.execution_time_limit, async {
            let feed = async {
                // A program may exit without reading its input.
                if let Err(e) = tokio::io::copy(&mut input_reader, &mut stdin).await {
                    if e.kind() != std::io::ErrorKind::BrokenPipe {
                        return Err(e);
                    }
                }
                drop(stdin);
                Ok(0)
            };
            tokio::try_join!(
                feed,
                tokio::io::copy(&mut stdout, &mut stdout_buf),
                tokio::io::copy(&mut stderr, &mut stderr_buf),
                proc.wait(),
            )
            .context("Failed to communicate with subprocess")
        })
        .await;

        let execution_time = start_at.elapsed();

        let (judge, output) = match res {
            Err(_elapsed) => {
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill TLE process: {:#}", e));
                (JudgeCode::TLE, None)
            }

            Ok(Err(e)) => bail!(e),

            Ok(Ok((_, _, _, exit_status))) => {
                let judge = if !exit_status.success() {
                    JudgeCode::RE
                } else if stdout_buf == expected {
                    JudgeCode::AC
                } else {
                    JudgeCode::WA
                };
                let output = ProcessOutput {
                    status: exit_status.code(),
                    stdout: String::from_utf8_lossy(&stdout_buf).into(),
                    stderr: String::from_utf8_lossy(&stderr_buf).into(),
                };
                (judge, Some(output))
            }
        };

        Ok(TestOutcome {
            testcase_name: testcase.name().to_owned(),
            judge,
            execution_time,
            output,
            expected: String::from_utf8_lossy(&expected).into(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct X {
        input: &'static str,
        expected: &'static str,
        script: &'static str,
        want_judge: JudgeCode,
        want_output: Option<ProcessOutput>,
    }

    async fn run_test(x: X) {
        let cmd = TestCommand {
            compile: None,
            run: x.script.to_owned(),
        };
        let t = OnMemoryTestcase::<&'static str>::new("test1", x.input, x.expected);
        let r = TestRunner::new(cmd).execution_time_limit(Duration::from_millis(300));

        let res = dbg!(r.run(&t).await).unwrap();
        assert_eq!(res.testcase_name, "test1");
        assert_eq!(res.judge, x.want_judge);
        assert_eq!(res.output, x.want_output);
        assert_eq!(res.expected, x.expected);
    }

    fn output(status: i32, stdout: &str, stderr: &str) -> Option<ProcessOutput> {
        Some(ProcessOutput {
            status: Some(status),
            stdout: stdout.into(),
            stderr: stderr.into(),
        })
    }

    #[tokio::test]
    async fn should_be_ac() {
        run_test(X {
            input: "123\n",
            expected: "hello_123\n",
            script: r#"read x; echo "hello_$x""#,
            want_judge: JudgeCode::AC,
            want_output: output(0, "hello_123\n", ""),
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_ac_even_if_stdin_is_not_read() {
        run_test(X {
            input: "123\n",
            expected: "hello_123\n",
            script: "echo hello_123",
            want_judge: JudgeCode::AC,
            want_output: output(0, "hello_123\n", ""),
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_wa() {
        run_test(X {
            input: "123\n",
            expected: "hello_123\n",
            script: "echo hello_123 >&2",
            want_judge: JudgeCode::WA,
            want_output: output(0, "", "hello_123\n"),
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_wa_if_just_missing_newline() {
        run_test(X {
            input: "123\n",
            expected: "hello_123\n",
            script: "printf hello_123",
            want_judge: JudgeCode::WA,
            want_output: output(0, "hello_123", ""),
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_re_even_if_stdout_is_correct() {
        run_test(X {
            input: "123\n",
            expected: "hello_123\n",
            script: "echo hello_123; exit 42",
            want_judge: JudgeCode::RE,
            want_output: output(42, "hello_123\n", ""),
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_tle() {
        run_test(X {
            input: "123\n",
            expected: "hello_123\n",
            script: "exec sleep 2",
            want_judge: JudgeCode::TLE,
            want_output: None,
        })
        .await;
    }

    #[test]
    fn program_file_fills_placeholders() {
        let cmd = TestCommand {
            compile: Some("g++ -o '{dir}/{stem}.out' '{file}'".into()),
            run: "'{dir}/{stem}.out'".into(),
        };
        let r = TestRunner::new(cmd)
            .program_file("abc334/A-christmas-present/48826402.cpp")
            .unwrap();
        assert_eq!(
            r.get_command(),
            &TestCommand {
                compile: Some(
                    "g++ -o 'abc334/A-christmas-present/48826402.out' \
                     'abc334/A-christmas-present/48826402.cpp'"
                        .into()
                ),
                run: "'abc334/A-christmas-present/48826402.out'".into(),
            }
        );

        let r = TestRunner::new(TestCommand {
            compile: None,
            run: "python3 {dir}/{stem}.py".into(),
        })
        .program_file("main.py")
        .unwrap();
        assert_eq!(r.get_command().run, "python3 ./main.py");
    }
}
