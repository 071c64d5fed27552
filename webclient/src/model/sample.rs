use serde::{Deserialize, Serialize};

/// One published (input, expected output) pair of a task.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct SampleCase {
    /// 1-based position in the statement.
    pub ord: u32,
    pub input: String,
    pub output: String,
}

impl SampleCase {
    /// Pairs inputs and outputs by position. Surplus entries on the longer
    /// side are dropped, never paired with an empty string.
    pub fn zip_positional(inputs: Vec<String>, outputs: Vec<String>) -> Vec<Self> {
        if inputs.len() != outputs.len() {
            log::warn!(
                "Sample count mismatch ({} inputs, {} outputs): keeping the first {} pairs",
                inputs.len(),
                outputs.len(),
                inputs.len().min(outputs.len()),
            );
        }
        inputs
            .into_iter()
            .zip(outputs)
            .enumerate()
            .map(|(i, (input, output))| SampleCase {
                ord: (i + 1) as u32,
                input,
                output,
            })
            .collect()
    }

    /// Returns tuple (input_filename, output_filename).
    ///
    /// ```
    /// use atcrawl_webclient::SampleCase;
    ///
    /// let (infile, outfile) = SampleCase::filenames(3);
    /// assert_eq!(infile, "test3");
    /// assert_eq!(outfile, "exp3");
    /// ```
    pub fn filenames(ord: u32) -> (String, String) {
        (format!("test{}", ord), format!("exp{}", ord))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn zip_truncates_to_shorter_side() {
        let cases = SampleCase::zip_positional(strings(&["1\n", "2\n", "3\n"]), strings(&["a\n"]));
        assert_eq!(
            cases,
            vec![SampleCase {
                ord: 1,
                input: "1\n".into(),
                output: "a\n".into(),
            }]
        );

        let cases = SampleCase::zip_positional(strings(&["1\n"]), strings(&["a\n", "b\n"]));
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].output, "a\n");
    }

    #[test]
    fn ordinals_are_one_based() {
        let cases = SampleCase::zip_positional(strings(&["x", "y"]), strings(&["X", "Y"]));
        let ords: Vec<_> = cases.iter().map(|c| c.ord).collect();
        assert_eq!(ords, [1, 2]);
    }
}
