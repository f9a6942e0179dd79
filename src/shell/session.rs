//! Menu loop over any line reader and writer

use std::io::{BufRead, Write};

use tracing::{debug, info};

use super::{Command, Mode};
use crate::config::Config;
use crate::error::Result;
use crate::glyph::{glyph_nodes, parse_pattern, render_grid, train_digits};
use crate::hopfield::{HopfieldNetwork, MathTranscript, NetworkObserver, Silent, MAX_NODES};

/// One interactive session
///
/// Input errors (bad pattern text, wrong length) are reported on the output
/// and the loop continues. IO errors end the session.
pub struct Session<R, W> {
    input: R,
    output: W,
    config: Config,
    mode: Mode,
}

enum Flow {
    Continue,
    Exit,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            input,
            output,
            config,
            mode: Mode::Default,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Run until `exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        self.show_welcome()?;

        let Some((columns, nodes)) = self.read_columns()? else {
            return Ok(());
        };
        let rows = self.config.glyph.rows;
        let mut network = HopfieldNetwork::with_config(nodes, self.config.recall.clone())?;
        info!(rows, columns, nodes = network.node_count(), "Session started");

        loop {
            self.show_options()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            let Some(command) = Command::parse(&line) else {
                writeln!(self.output, "> Unknown option: {}", line)?;
                continue;
            };
            debug!(command = command.label(), "Executing command");

            match self.execute(command, &mut network) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is_input_error() => writeln!(self.output, "> Error: {}", e)?,
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    fn execute(&mut self, command: Command, network: &mut HopfieldNetwork) -> Result<Flow> {
        match command {
            Command::Train => {
                let prompt = format!(
                    "> Please give your training digit pattern ({}) : ",
                    network.node_count()
                );
                let Some(pattern) = self.read_pattern(&prompt, network.node_count())? else {
                    return Ok(Flow::Exit);
                };
                self.observe(|observer| network.train_with(&pattern, observer))?;
                write!(self.output, "{}", render_grid(&pattern, self.config.glyph.rows)?)?;
                writeln!(self.output, "---------train success----------\n")?;
            }
            Command::Recognize => {
                let size = network.node_count();
                let Some(pattern) = self.read_pattern("> Provide input pattern: ", size)? else {
                    return Ok(Flow::Exit);
                };
                let output = self.observe(|observer| network.recognize_with(&pattern, observer))?;
                self.show_result(&pattern, &output)?;
            }
            Command::RecognizeAsync => {
                let size = network.node_count();
                let Some(pattern) = self.read_pattern("> Provide input pattern: ", size)? else {
                    return Ok(Flow::Exit);
                };
                let result =
                    self.observe(|observer| network.recall_async_with(&pattern, observer))?;
                if self.mode == Mode::Default {
                    for report in &result.sweeps {
                        writeln!(
                            self.output,
                            "Recall of {}-th state, Energy: {}",
                            report.sweep, report.energy
                        )?;
                    }
                }
                if !result.converged {
                    writeln!(
                        self.output,
                        "> Recall stopped after {} sweeps without converging",
                        result.sweeps.len()
                    )?;
                }
                self.show_result(&pattern, &result.pattern)?;
            }
            Command::Clear => {
                network.clear();
                writeln!(self.output, "------- Weight matrix cleared --------")?;
            }
            Command::SelectMode => {
                writeln!(self.output, "> Select mode: ")?;
                writeln!(self.output, "> 1) DEFAULT")?;
                writeln!(self.output, "> 2) SHOW_MATH")?;
                let Some(line) = self.read_line()? else {
                    return Ok(Flow::Exit);
                };
                self.mode = Mode::parse(&line);
                writeln!(self.output, "> Mode: {}", self.mode)?;
            }
            Command::Exit => return Ok(Flow::Exit),
            Command::AlreadyTrained => {
                train_digits(network)?;
                writeln!(self.output, "---------train success----------\n")?;
            }
        }

        Ok(Flow::Continue)
    }

    /// Run `f` with the observer matching the current mode
    fn observe<T>(
        &mut self,
        f: impl FnOnce(&mut dyn NetworkObserver) -> Result<T>,
    ) -> Result<T> {
        match self.mode {
            Mode::Default => f(&mut Silent),
            Mode::ShowMath => {
                let mut transcript = MathTranscript::new();
                let result = f(&mut transcript);
                self.output.write_all(transcript.as_str().as_bytes())?;
                result
            }
        }
    }

    fn show_result(&mut self, input: &[f64], output: &[f64]) -> Result<()> {
        let rows = self.config.glyph.rows;
        writeln!(self.output, "Input pattern:")?;
        write!(self.output, "{}", render_grid(input, rows)?)?;
        writeln!(self.output, "Output pattern:")?;
        write!(self.output, "{}", render_grid(output, rows)?)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_pattern(&mut self, prompt: &str, size: usize) -> Result<Option<Vec<f64>>> {
        writeln!(self.output, "{}", prompt)?;
        match self.read_line()? {
            Some(line) => parse_pattern(&line, size).map(Some),
            None => Ok(None),
        }
    }

    /// Column count and resulting node count; blank input picks the
    /// configured column count
    fn read_columns(&mut self) -> Result<Option<(usize, usize)>> {
        let rows = self.config.glyph.rows;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let columns = if line.is_empty() {
                Some(self.config.glyph.columns)
            } else {
                line.parse::<usize>().ok()
            };
            if let Some(columns) = columns {
                if let Some(nodes) = glyph_nodes(rows, columns) {
                    return Ok(Some((columns, nodes)));
                }
            }
            writeln!(
                self.output,
                "> Invalid number of columns: {}. Please enter an integer from 1 to {}: ",
                line,
                MAX_NODES / rows.max(1)
            )?;
        }
    }

    fn show_options(&mut self) -> Result<()> {
        writeln!(self.output, "> Select options: ")?;
        for (i, command) in Command::ALL.iter().enumerate() {
            writeln!(self.output, "> {}) {}", i + 1, command.label())?;
        }
        Ok(())
    }

    fn show_welcome(&mut self) -> Result<()> {
        let rows = self.config.glyph.rows;
        let banner = [
            "> =========================================================".to_string(),
            "> |           # Hopfield Digit Recognizer #               |".to_string(),
            "> =========================================================".to_string(),
            ">".to_string(),
            "> Input digit pattern format: ".to_string(),
            format!(">       [# of nodes] = [# of columns] x [{} rows]", rows),
            ">".to_string(),
            ">          # of columns".to_string(),
            ">           -------------".to_string(),
        ];
        for line in banner {
            writeln!(self.output, "{}", line)?;
        }
        for row in 1..=rows {
            writeln!(self.output, ">      {}|  x x x ... x x x", row)?;
        }
        writeln!(self.output, ">")?;
        writeln!(
            self.output,
            "> Please Enter # of columns (recommend {}): ",
            self.config.glyph.columns
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: &str = "11111001100110011111";
    const ZERO_NOISY: &str = "11111001100110011110";
    const ZERO_GRID: &str = "1111\n1001\n1001\n1001\n1111\n";

    fn run_script(script: &str) -> String {
        let mut out = Vec::new();
        let mut session = Session::new(script.as_bytes(), &mut out, Config::default());
        session.run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_train_then_recognize_noisy() {
        let out = run_script(&format!("4\n1\n{}\n2\n{}\n6\n", ZERO, ZERO_NOISY));

        assert!(out.contains("---------train success----------"));
        assert!(out.contains(&format!("Output pattern:\n{}", ZERO_GRID)));
    }

    #[test]
    fn test_recognize_async_keeps_weights() {
        let out = run_script(&format!(
            "4\n1\n{}\n3\n{}\n2\n{}\n6\n",
            ZERO, ZERO_NOISY, ZERO_NOISY
        ));

        assert!(out.contains("Recall of 1-th state, Energy: "));
        assert!(!out.contains("Weight matrix cleared"));
        assert_eq!(out.matches(&format!("Output pattern:\n{}", ZERO_GRID)).count(), 2);
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        let out = run_script("4\n1\n0101\n1\n01a10000000000000000\n6\n");

        assert!(out.contains("> Error: Pattern length mismatch: expected 20 nodes, got 4"));
        assert!(out.contains("> Error: Invalid glyph character 'a' at position 2"));
    }

    #[test]
    fn test_select_mode_persists() {
        let mut out = Vec::new();
        let mut session = Session::new("\n5\n2\n".as_bytes(), &mut out, Config::default());
        assert_eq!(session.mode(), Mode::Default);

        session.run().unwrap();
        assert_eq!(session.mode(), Mode::ShowMath);
    }

    #[test]
    fn test_show_math_mode() {
        let out = run_script(&format!("4\n5\nSHOW_MATH\n1\n{}\n2\n{}\n6\n", ZERO, ZERO));

        assert!(out.contains("> Mode: SHOW_MATH"));
        assert!(out.contains("#-- train --#"));
        assert!(out.contains("#-- recognize --#"));
        assert!(out.contains("[3.19] (bipolar matrix) . (Weight matrix column 19) ="));
    }

    #[test]
    fn test_already_trained_and_clear() {
        let out = run_script("4\n7\n4\n6\n");
        assert!(out.contains("---------train success----------"));
        assert!(out.contains("------- Weight matrix cleared --------"));

        let out = run_script("3\n7\n6\n");
        assert!(out.contains("> Error: Pattern length mismatch: expected 15 nodes, got 20"));
    }

    #[test]
    fn test_columns_prompt() {
        let out = run_script("abc\n0\n\n1\n0101\n6\n");
        assert_eq!(out.matches("> Invalid number of columns").count(), 2);
        assert!(out.contains("expected 20 nodes"));
    }

    #[test]
    fn test_columns_prompt_rejects_oversized_glyph() {
        let out = run_script("4000000000000000000\n1000\n6\n");
        assert_eq!(out.matches("> Invalid number of columns").count(), 2);
        assert!(out.contains("integer from 1 to 819"));
        assert!(out.contains("> Select options"));
    }

    #[test]
    fn test_unknown_option_and_eof() {
        let out = run_script("4\nhelp\n");
        assert!(out.contains("> Unknown option: help"));
        assert!(out.ends_with("> 7) alreadyTrained\n"));
    }

    #[test]
    fn test_empty_input_ends_quietly() {
        let out = run_script("");
        assert!(out.contains("Please Enter # of columns"));
        assert!(!out.contains("> Select options"));
    }
}
