use std::error::Error as StdError;
use std::fmt::Write;

pub const STACKTRACE_FILE_NAME: &str = "stacktrace.txt";

/// Renders an error and its whole `source()` chain into the bytes of a text attachment.
pub fn capture(cause: &dyn StdError) -> Vec<u8> {
    let mut out = String::new();

    // writing into a String can't fail
    let _ = writeln!(out, "{}", cause);

    let mut source = cause.source();
    if source.is_some() {
        out.push_str("\nCaused by:\n");
    }
    let mut depth = 0;
    while let Some(inner) = source {
        let _ = writeln!(out, "{:>5}: {}", depth, inner);
        depth += 1;
        source = inner.source();
    }

    let _ = writeln!(out, "\nDetails:\n{:#?}", cause);

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fmt, io};

    #[derive(Debug)]
    struct Wrapper {
        inner: io::Error,
    }

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "failed to write the report")
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    #[test]
    fn single_error() {
        let e = io::Error::new(io::ErrorKind::Other, "Test Exception");
        let text = String::from_utf8(capture(&e)).unwrap();

        assert!(text.starts_with("Test Exception\n"));
        assert!(!text.contains("Caused by:"));
        assert!(text.contains("Details:"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn nested_chain() {
        let e = Wrapper {
            inner: io::Error::new(io::ErrorKind::NotFound, "report.txt missing"),
        };
        let text = String::from_utf8(capture(&e)).unwrap();

        assert!(text.starts_with("failed to write the report\n\nCaused by:\n    0: report.txt missing\n"));
        // the debug dump carries the concrete type
        assert!(text.contains("Wrapper"));
        assert!(text.contains("NotFound"));
    }
}
