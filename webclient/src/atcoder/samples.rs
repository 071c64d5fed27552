use ::lazy_regex::{lazy_regex, Lazy, Regex};

use crate::model::SampleCase;

static RE_INPUT_HEAD: Lazy<Regex> =
    lazy_regex!(r"<h[0-9]+>Sample Input [0-9]*</h[0-9]+><pre>(.*)$");
static RE_OUTPUT_HEAD: Lazy<Regex> =
    lazy_regex!(r"<h[0-9]+>Sample Output [0-9]*</h[0-9]+><pre>(.*)$");
static RE_PRE_CLOSE: Lazy<Regex> = lazy_regex!(r"(.*)</pre>");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Inside(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action<'a> {
    /// Start a buffer with the text following `<pre>`.
    Open(Block, &'a str),
    /// Append `"\n" + text` to the open buffer.
    Append(&'a str),
    /// Append `"\n" + text` and complete the open buffer.
    Close(Block, &'a str),
    Skip,
}

fn step(state: State, line: &str) -> (State, Action<'_>) {
    use State::*;
    match state {
        Idle => {
            if let Some(caps) = RE_INPUT_HEAD.captures(line) {
                let text = caps.get(1).map_or("", |m| m.as_str());
                (Inside(Block::Input), Action::Open(Block::Input, text))
            } else if let Some(caps) = RE_OUTPUT_HEAD.captures(line) {
                let text = caps.get(1).map_or("", |m| m.as_str());
                (Inside(Block::Output), Action::Open(Block::Output, text))
            } else {
                (Idle, Action::Skip)
            }
        }
        Inside(block) => match RE_PRE_CLOSE.captures(line) {
            Some(caps) => (
                Idle,
                Action::Close(block, caps.get(1).map_or("", |m| m.as_str())),
            ),
            None => (Inside(block), Action::Append(line)),
        },
    }
}

/// Line scanner over a task statement. Collects every `Sample Input N` and
/// `Sample Output N` block in page order.
#[derive(Debug)]
pub struct SampleScanner {
    state: State,
    buf: String,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl Default for SampleScanner {
    fn default() -> Self {
        Self {
            state: State::Idle,
            buf: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }
}

impl SampleScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) {
        let (next, action) = step(self.state, line);
        match action {
            Action::Open(_, text) => {
                self.buf.clear();
                push_stripped(&mut self.buf, text);
            }
            Action::Append(text) => {
                self.buf.push('\n');
                push_stripped(&mut self.buf, text);
            }
            Action::Close(block, text) => {
                self.buf.push('\n');
                push_stripped(&mut self.buf, text);
                let done = std::mem::take(&mut self.buf);
                match block {
                    Block::Input => self.inputs.push(done),
                    Block::Output => self.outputs.push(done),
                }
            }
            Action::Skip => (),
        }
        self.state = next;
    }

    /// Pairs completed inputs with completed outputs by position.
    /// A block still open at the end of the page is discarded.
    pub fn finish(self) -> Vec<SampleCase> {
        if let State::Inside(block) = self.state {
            log::warn!("Unterminated sample {:?} block at end of page; dropped", block);
        }
        SampleCase::zip_positional(self.inputs, self.outputs)
    }
}

fn push_stripped(buf: &mut String, text: &str) {
    buf.extend(text.chars().filter(|&c| c != '\r'));
}

/// Extracts the sample cases of one task statement page.
pub fn extract_samples(html: &str) -> Vec<SampleCase> {
    let mut scanner = SampleScanner::new();
    for line in html.split('\n') {
        scanner.feed(line);
    }
    scanner.finish()
}
