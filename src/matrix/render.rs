//! Text rendering for matrices
//!
//! Values are truncated toward zero before printing; both forms are meant
//! for terminal display only.

use std::fmt;

use super::Matrix;

impl Matrix {
    /// Digits only, one line per row
    ///
    /// ```rust
    /// use hopfield_digits::matrix::Matrix;
    ///
    /// assert_eq!(Matrix::identity(2).to_packed_string(), "10\n01\n");
    /// ```
    pub fn to_packed_string(&self) -> String {
        let mut out = String::with_capacity(self.rows() * (self.cols() + 1));
        for row in self.as_array().rows() {
            for &value in row {
                out.push_str(&(value as i64).to_string());
            }
            out.push('\n');
        }
        out
    }

    /// Table with `column_label`NN headings and `row_label`NN row prefixes
    pub fn to_labeled_string(&self, column_label: &str, row_label: &str) -> String {
        let mut heading = String::from("    | ");
        for col in 0..self.cols() {
            heading.push_str(&format!(" {}{:02}", column_label, col));
        }
        heading.push('\n');

        let mut body = "-".repeat(heading.chars().count());
        body.push('\n');

        for (i, row) in self.as_array().rows().into_iter().enumerate() {
            body.push_str(&format!("{}{:02} |", row_label, i));
            for &value in row {
                let cell = if value >= 0.0 { "   " } else { "  " };
                body.push_str(cell);
                body.push_str(&(value as i64).to_string());
            }
            body.push('\n');
        }

        heading + &body
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_labeled_string("C", "R"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_string() {
        let glyph = Matrix::reshape(&[1.0, 1.0, 0.0, 1.0, 0.0, 1.0], 2).unwrap();
        assert_eq!(glyph.to_packed_string(), "110\n101\n");
    }

    #[test]
    fn test_labeled_string() {
        let mut w = Matrix::identity(2);
        w = w.subtract(&Matrix::from_rows(&[vec![0.0, 1.0], vec![0.0, 0.0]]).unwrap()).unwrap();

        let expected = "    |  N00 N01\n\
                        ---------------\n\
                        N00 |   1  -1\n\
                        N01 |   0   1\n";
        assert_eq!(w.to_labeled_string("N", "N"), expected);
    }

    #[test]
    fn test_display_uses_default_labels() {
        let text = Matrix::zeros(1, 1).to_string();
        assert!(text.starts_with("    |  C00\n"));
        assert!(text.contains("R00 |   0"));
    }
}
