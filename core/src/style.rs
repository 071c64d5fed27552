use std::collections::BTreeMap;

use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;

use crate::testing::{JudgeCode, TestOutcome};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

fn judge_color(judge: JudgeCode) -> Color {
    match judge {
        JudgeCode::AC => Color::Green,
        JudgeCode::WA => Color::Yellow,
        JudgeCode::TLE => Color::Red,
        JudgeCode::RE => Color::Magenta,
    }
}

/// Fixed-width badge, e.g. `[AC ]`.
pub fn judge_icon(judge: JudgeCode) -> ColoredString {
    format!("[{:<3}]", judge.to_string())
        .color(judge_color(judge))
        .bold()
}

/// `"2/3 passed (WA x1)"`; the parenthesised part lists failing judges only.
pub fn summarize(results: &[TestOutcome]) -> String {
    let mut count: BTreeMap<JudgeCode, usize> = BTreeMap::new();
    for r in results {
        *count.entry(r.judge).or_default() += 1;
    }
    let passed = count.get(&JudgeCode::AC).copied().unwrap_or(0);
    let failures: Vec<String> = count
        .iter()
        .filter(|(&judge, _)| judge != JudgeCode::AC)
        .map(|(judge, n)| format!("{} x{}", judge, n))
        .collect();

    if failures.is_empty() {
        format!("{}/{} passed", passed, results.len())
    } else {
        format!(
            "{}/{} passed ({})",
            passed,
            results.len(),
            failures.join(", ")
        )
    }
}

pub fn print_test_result_summary(results: &[TestOutcome]) {
    let line = summarize(results);
    if results.iter().all(|r| r.judge == JudgeCode::AC) {
        println!("  {}", line.green().bold());
    } else {
        println!("  {}", line.bright_red().bold());
    }
}

/// 1-based number of the first line where `actual` differs from `expected`.
pub fn first_differing_line(expected: &str, actual: &str) -> Option<usize> {
    let mut exp = expected.split('\n');
    let mut act = actual.split('\n');
    let mut n = 1;
    loop {
        match (exp.next(), act.next()) {
            (None, None) => return None,
            (e, a) if e != a => return Some(n),
            _ => n += 1,
        }
    }
}

fn print_section(title: &str, body: &str, width: usize) {
    let rule = "·".repeat(width.saturating_sub(title.len() + 1));
    println!("{} {}", title.cyan().bold(), rule.dimmed());
    if body.is_empty() {
        println!("{}", "(empty)".dimmed());
        return;
    }
    print!("{}", body);
    if !body.ends_with('\n') {
        println!("{}", "⏎ no newline at end".on_yellow().black());
    }
}

/// Expected output, actual output and stderr of one failed testcase.
pub fn print_test_result_detail(res: &TestOutcome) {
    let width = terminal::size().map_or(60, |(cols, _)| cols as usize).min(100);

    println!(
        "\n{} {} {}ms",
        judge_icon(res.judge),
        res.testcase_name.bold(),
        res.execution_time.as_millis(),
    );
    print_section("expected", &res.expected, width);

    let Some(output) = &res.output else {
        println!("{}", "killed after the time limit; no output kept".red());
        return;
    };
    print_section("stdout", &output.stdout, width);
    if res.judge == JudgeCode::WA {
        if let Some(n) = first_differing_line(&res.expected, &output.stdout) {
            println!("{}", format!("first difference at line {}", n).yellow());
        }
    }
    if !output.stderr.is_empty() {
        print_section("stderr", &output.stderr, width);
    }
    match output.status {
        Some(0) => (),
        Some(code) => println!("{}", format!("exited with status {}", code).bright_red()),
        None => println!("{}", "terminated by a signal".bright_red()),
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    fn outcome(judge: JudgeCode) -> TestOutcome {
        TestOutcome {
            testcase_name: "test1".into(),
            judge,
            execution_time: Duration::from_millis(5),
            output: None,
            expected: String::new(),
        }
    }

    #[test]
    fn summary_lists_failures_only() {
        use JudgeCode::*;
        let results: Vec<_> = [AC, WA, AC, TLE, WA].into_iter().map(outcome).collect();
        assert_eq!(summarize(&results), "2/5 passed (WA x2, TLE x1)");
        assert_eq!(summarize(&results[..1]), "1/1 passed");
        assert_eq!(summarize(&[]), "0/0 passed");
    }

    #[test]
    fn differing_line_numbers() {
        assert_eq!(first_differing_line("1\n2\n", "1\n2\n"), None);
        assert_eq!(first_differing_line("1\n2\n", "1\n3\n"), Some(2));
        assert_eq!(first_differing_line("1\n", "1"), Some(2));
        assert_eq!(first_differing_line("1\n2\n", "1\n"), Some(2));
    }
}
