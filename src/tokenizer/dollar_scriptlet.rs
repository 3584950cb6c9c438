//! Scanner for the body of a `${ ... }` scriptlet.
//!
//! The body may contain balanced braces, quoted strings, and double-quoted
//! strings that themselves interpolate `${ ... }`. Nesting is tracked with an
//! explicit stack of brace counters, never with recursion, so the depth of
//! interpolation is bounded only by memory.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    DoubleQuoted,
    SingleQuoted,
}

#[derive(Debug)]
struct Scanner {
    mode: Mode,
    /// Open braces at the current interpolation depth.
    open: usize,
    /// Counters of the enclosing depths, innermost last.
    suspended: Vec<usize>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            mode: Mode::Code,
            open: 0,
            suspended: Vec::new(),
        }
    }

    fn enter_interpolation(&mut self) {
        self.suspended.push(self.open);
        self.open = 0;
        self.mode = Mode::Code;
    }

    /// Returns false once the closing brace of the outermost depth is found.
    fn close_brace(&mut self) -> bool {
        if self.open > 0 {
            self.open -= 1;
            return true;
        }
        match self.suspended.pop() {
            Some(outer) => {
                self.open = outer;
                self.mode = Mode::DoubleQuoted;
                true
            }
            None => false,
        }
    }

    fn scan(&mut self, input: &str) -> usize {
        let bytes = input.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            match self.mode {
                Mode::Code => match bytes[i] {
                    b'{' => {
                        self.open += 1;
                        i += 1;
                    }
                    b'}' => {
                        if !self.close_brace() {
                            return i;
                        }
                        i += 1;
                    }
                    b'"' => {
                        self.mode = Mode::DoubleQuoted;
                        i += 1;
                    }
                    b'\'' => {
                        self.mode = Mode::SingleQuoted;
                        i += 1;
                    }
                    _ => i += code_run(&bytes[i..]),
                },
                Mode::DoubleQuoted => match bytes[i] {
                    b'\\' => i += 2,
                    b'"' => {
                        self.mode = Mode::Code;
                        i += 1;
                    }
                    b'$' if bytes.get(i + 1) == Some(&b'{') => {
                        self.enter_interpolation();
                        i += 2;
                    }
                    _ => i += 1,
                },
                Mode::SingleQuoted => match bytes[i] {
                    b'\\' => i += 2,
                    b'\'' => {
                        self.mode = Mode::Code;
                        i += 1;
                    }
                    _ => i += 1,
                },
            }
        }

        input.len()
    }
}

/// Length of the run of bytes with no meaning to the scanner, at least 1.
fn code_run(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .position(|b| matches!(b, b'{' | b'}' | b'"' | b'\''))
        .unwrap_or(bytes.len())
        .max(1)
}

/// Length in bytes of the scriptlet body at the start of `input`: up to, not
/// including, the `}` matching the already consumed `${`, or all of `input`
/// when that brace is missing.
pub fn scan(input: &str) -> usize {
    Scanner::new().scan(input)
}
