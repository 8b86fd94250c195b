//! Line output shared by the demo handlers.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable handle onto one output stream.
///
/// Handlers run inside `emit`, so they need a writer they can share without
/// borrowing from the driver.
#[derive(Clone)]
pub(crate) struct Printer {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Printer {
    pub(crate) fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub(crate) fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write `parts` joined by single spaces as one line.
    pub(crate) fn row<I>(&self, parts: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let line = parts
            .into_iter()
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{line}")?;
        out.flush()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::capture;

    #[test]
    fn test_row_joins_with_spaces() {
        let (printer, buffer) = capture();
        printer.row(["I'm", "John", "and I'm eating", "eggs, bread"]).unwrap();
        printer.row([1, 2]).unwrap();

        assert_eq!(
            buffer.lines(),
            vec!["I'm John and I'm eating eggs, bread", "1 2"]
        );
    }

    #[test]
    fn test_single_part_row() {
        let (printer, buffer) = capture();
        printer.row(["alone"]).unwrap();
        assert_eq!(buffer.lines(), vec!["alone"]);
    }
}
