use std::{borrow::Borrow, collections::HashMap, ffi::OsStr, hash::Hash};

pub type Result = std::result::Result<String, InterpError>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InterpError {
    #[error("Undefined placeholder '{{{0}}}' at {}", .1+1)]
    UndefinedVar(String, usize),

    #[error("Unclosed brace (found open brace at {})", .0+1)]
    UnclosedBrace(usize),

    #[error("Unmatched close brace at {}", .0+1)]
    UnmatchedCloseBrace(usize),
}

/// Replaces every `{name}` in `fmt` with its value in `variables`.
/// `{{` and `}}` stand for literal braces.
pub fn interp<K, V>(fmt: &str, variables: &HashMap<K, V>) -> Result
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<OsStr>,
{
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum State {
        Normal,
        OpenBrace,
        InsideBrace,
        CloseBrace,
    }
    use State::*;

    let mut state = Normal;
    let mut pos_open_brace = 0;
    let mut res = String::with_capacity(fmt.len() * 2);
    let mut var_name = String::with_capacity(16);

    for (i, c) in fmt.chars().enumerate() {
        state = match (c, state) {
            ('{', Normal) => {
                pos_open_brace = i;
                OpenBrace
            }
            ('{', OpenBrace) => {
                res.push('{');
                Normal
            }
            ('}', OpenBrace) => return Err(InterpError::UndefinedVar(String::new(), i - 1)),
            (_, OpenBrace) => {
                var_name.clear();
                var_name.push(c);
                InsideBrace
            }
            ('}', InsideBrace) => {
                let Some(value) = variables.get(var_name.as_str()) else {
                    return Err(InterpError::UndefinedVar(var_name, pos_open_brace))
                };
                res += value.as_ref().to_string_lossy().as_ref();
                Normal
            }
            ('{', InsideBrace) => return Err(InterpError::UnclosedBrace(pos_open_brace)),
            (_, InsideBrace) => {
                var_name.push(c);
                InsideBrace
            }
            ('}', Normal) => CloseBrace,
            ('}', CloseBrace) => {
                res.push('}');
                Normal
            }
            (_, CloseBrace) => return Err(InterpError::UnmatchedCloseBrace(i - 1)),
            (_, Normal) => {
                res.push(c);
                Normal
            }
        };
    }

    match state {
        Normal => Ok(res),
        OpenBrace | InsideBrace => Err(InterpError::UnclosedBrace(pos_open_brace)),
        CloseBrace => Err(InterpError::UnmatchedCloseBrace(fmt.chars().count() - 1)),
    }
}
